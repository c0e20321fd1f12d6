//! Human-readable rendering of trail/clause state for `tracing` output. Pure
//! formatting, no control flow; compiled out above `info` level in release
//! builds along with the `debug!`/`trace!` call sites that use it.

use crate::data::Lit;
use crate::trail::{Trail, TrailReason};

const RED: &str = "\u{1b}[31m";
const GREEN: &str = "\u{1b}[32m";
const END: &str = "\u{1b}[0m";

impl Trail {
    pub(crate) fn fmt_lit(&self, lit: Lit) -> String {
        match self.value_of(lit) {
            Some(true) => format!("{GREEN}{}{END}", lit.get()),
            Some(false) => format!("{RED}{}{END}", lit.get()),
            None => format!("{}", lit.get()),
        }
    }

    pub(crate) fn fmt_clause(&self, clause: &[Lit]) -> String {
        clause
            .iter()
            .map(|&lit| self.fmt_lit(lit))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn fmt_trail(&self) -> String {
        let rendered: Vec<String> = self
            .trail()
            .iter()
            .map(|elem| {
                let tag = match elem.reason {
                    TrailReason::Decision => "D",
                    TrailReason::Propagated(_) => "P",
                    TrailReason::Axiom => "A",
                };
                format!("{}{tag}", elem.lit)
            })
            .collect();

        format!("[{}]", rendered.join(", "))
    }
}
