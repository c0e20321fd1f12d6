//! Clause storage.
//!
//! Clauses live in a single arena (`ClauseDb`) and are addressed by a stable
//! [`ClauseRef`] index rather than by object identity, so the watch index and
//! the trail can hold cheap, `Copy`, hashable handles to them. Clauses of
//! length >= 2 keep their two watched literals at positions `0` and `1` of
//! their literal list; the propagator is responsible for keeping that
//! invariant by swapping literals in place rather than tracking separate
//! watch indices.

use bitflags::bitflags;
use std::num::NonZeroU32;

use crate::data::Lit;

bitflags! {
    #[derive(Default)]
    pub struct ClauseFlags: u8 {
        /// Clause was derived by conflict analysis rather than part of the input formula.
        const LEARNT    = 0b001;
        /// Clause is currently the reason some trail literal was propagated.
        ///
        /// Not consumed by this core (there is no clause-deletion policy to
        /// consult it), but kept up to date the way a deleting implementation
        /// would need it, so that adding one later is additive.
        const IS_REASON = 0b010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClauseRef(u32);

/// Result of inserting a clause into the formula.
pub enum AddClauseOutcome {
    /// The clause was a tautology (contains `l` and `-l`) and was dropped.
    Tautology,
    /// The clause had no literals; the formula is unsatisfiable.
    Empty,
    /// The clause had exactly one literal; the caller should enqueue it at level 0.
    Unit(Lit),
    /// The clause was stored; watches still need to be registered by the caller.
    Added(ClauseRef),
}

struct ClauseRecord {
    lits: Vec<Lit>,
    flags: ClauseFlags,
    /// Literal-block distance (number of distinct decision levels) at the
    /// moment a learned clause was derived. `None` for original clauses.
    lbd: Option<NonZeroU32>,
}

#[derive(Default)]
pub struct ClauseDb {
    clauses: Vec<ClauseRecord>,
}

impl ClauseDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove duplicate literals in place and report whether the clause is a
    /// tautology (contains both `l` and `-l`).
    pub fn normalize(lits: &mut Vec<Lit>) -> bool {
        // Group by variable (not by signed value) so a variable's two
        // literals always end up adjacent, regardless of what other
        // variables' values fall in between.
        lits.sort_by_key(|l| (l.var().get(), l.is_neg()));
        lits.dedup();
        lits.windows(2).any(|w| w[0].var() == w[1].var())
    }

    /// Insert an already-normalized clause (no duplicate literals, not a
    /// tautology). `lbd` is `Some` for learned clauses.
    pub fn add_clause(&mut self, lits: Vec<Lit>, learnt: bool, lbd: Option<NonZeroU32>) -> AddClauseOutcome {
        match lits.len() {
            0 => AddClauseOutcome::Empty,
            1 => AddClauseOutcome::Unit(lits[0]),
            _ => {
                let flags = if learnt {
                    ClauseFlags::LEARNT
                } else {
                    ClauseFlags::empty()
                };
                self.clauses.push(ClauseRecord { lits, flags, lbd });
                AddClauseOutcome::Added(ClauseRef((self.clauses.len() - 1) as u32))
            }
        }
    }

    pub fn get(&self, r: ClauseRef) -> &[Lit] {
        &self.clauses[r.0 as usize].lits
    }

    pub fn get_mut(&mut self, r: ClauseRef) -> &mut [Lit] {
        &mut self.clauses[r.0 as usize].lits
    }

    pub fn is_learnt(&self, r: ClauseRef) -> bool {
        self.clauses[r.0 as usize].flags.contains(ClauseFlags::LEARNT)
    }

    pub fn lbd(&self, r: ClauseRef) -> Option<NonZeroU32> {
        self.clauses[r.0 as usize].lbd
    }

    pub fn set_is_reason(&mut self, r: ClauseRef, is_reason: bool) {
        self.clauses[r.0 as usize]
            .flags
            .set(ClauseFlags::IS_REASON, is_reason);
    }

    pub fn is_reason(&self, r: ClauseRef) -> bool {
        self.clauses[r.0 as usize].flags.contains(ClauseFlags::IS_REASON)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Lit]> + '_ {
        self.clauses.iter().map(|c| c.lits.as_slice())
    }

    /// Iterate only over clauses that belong to the original formula (not
    /// learned by conflict analysis). Used to check a candidate model
    /// against the input, since only the original formula has to hold.
    pub fn iter_original(&self) -> impl Iterator<Item = &[Lit]> + '_ {
        self.clauses
            .iter()
            .filter(|c| !c.flags.contains(ClauseFlags::LEARNT))
            .map(|c| c.lits.as_slice())
    }
}
