//! Watch-list bookkeeping: which clauses currently watch a given literal.

use crate::clause::ClauseRef;
use crate::data::{Lit, LitVec};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Watch {
    pub clause: ClauseRef,
}

/// Maps a literal to the clauses that currently watch it.
///
/// A clause watching literal `l` is registered here under the key `l`
/// itself. The propagator looks a literal's watch list up under its
/// *complement* at the moment that complement is falsified: when `p` is
/// assigned true, `-p` has just become false, so the clauses that need
/// re-inspection are the ones in `watched_by(-p)`.
#[derive(Default)]
pub(crate) struct WatchIndex {
    watches: LitVec<Vec<Watch>>,
}

impl WatchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand(&mut self, lit: Lit) {
        self.watches.expand(lit, Vec::new());
        self.watches.expand(-lit, Vec::new());
    }

    /// Register `clause` as watching `lit`.
    pub fn add(&mut self, lit: Lit, clause: ClauseRef) {
        self.watches[lit].push(Watch { clause });
    }

    /// Take ownership of the watch list for `lit`, so the propagator can
    /// rebuild it in place while still being free to push entries onto
    /// other literals' watch lists.
    pub fn take(&mut self, lit: Lit) -> Vec<Watch> {
        std::mem::take(&mut self.watches[lit])
    }

    pub fn put_back(&mut self, lit: Lit, watches: Vec<Watch>) {
        self.watches[lit] = watches;
    }
}
