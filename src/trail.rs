//! The assignment trail: an ordered record of every literal assigned so far,
//! together with the decision-level boundaries inside it.

use crate::assignment::Assignment;
use crate::clause::ClauseRef;
use crate::data::{Lit, Var};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrailReason {
    /// Literal was branched on.
    Decision,
    /// Literal was forced by unit propagation from `ClauseRef`.
    Propagated(ClauseRef),
    /// Literal was asserted directly by the input formula (a unit clause) or
    /// by a learned unit clause; always at decision level 0.
    Axiom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrailElement {
    pub lit: Lit,
    pub reason: TrailReason,
}

#[derive(Default)]
pub(crate) struct Trail {
    trail: Vec<TrailElement>,
    /// `level_starts[k - 1]` is the trail index where decision level `k` began.
    level_starts: Vec<usize>,
    assignment: Assignment,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand(&mut self, var: Var) {
        self.assignment.expand(var);
    }

    pub fn total_vars(&self) -> usize {
        self.assignment.len()
    }

    pub fn assignment_complete(&self) -> bool {
        self.trail.len() == self.assignment.len()
    }

    pub fn current_level(&self) -> u32 {
        self.level_starts.len() as u32
    }

    pub fn begin_decision_level(&mut self) {
        self.level_starts.push(self.trail.len());
    }

    pub fn get(&self, idx: usize) -> Option<&TrailElement> {
        self.trail.get(idx)
    }

    pub fn trail(&self) -> &[TrailElement] {
        &self.trail
    }

    pub fn value_of(&self, lit: Lit) -> Option<bool> {
        self.assignment.get(lit)
    }

    pub fn level_of(&self, lit: Lit) -> Option<u32> {
        self.assignment.level_of(lit)
    }

    pub fn is_satisfied(&self, lit: Lit) -> bool {
        self.assignment.is_satisfied(lit)
    }

    pub fn is_unsatisfied(&self, lit: Lit) -> bool {
        self.assignment.is_unsatisfied(lit)
    }

    pub fn is_unassigned(&self, lit: Lit) -> bool {
        self.assignment.is_unassigned(lit)
    }

    pub fn is_assigned(&self, lit: Lit) -> bool {
        self.assignment.is_assigned(lit)
    }

    pub fn is_clause_satisfied(&self, clause: &[Lit]) -> bool {
        clause.iter().copied().any(|lit| self.is_satisfied(lit))
    }

    /// Assign `lit` true, recording `reason` at the current decision level.
    pub fn assign(&mut self, lit: Lit, reason: TrailReason) {
        debug_assert!(self.is_unassigned(lit));

        let level = self.current_level();
        self.assignment.assign(lit, level);
        self.trail.push(TrailElement { lit, reason });
    }

    /// Undo every assignment above `target_level`, invoking `on_unassign` for
    /// each popped trail element (innermost/most-recent first). Returns the
    /// new trail length, i.e. where propagation should resume from.
    pub fn backtrack_to(
        &mut self,
        target_level: u32,
        mut on_unassign: impl FnMut(&TrailElement),
    ) -> usize {
        debug_assert!(target_level <= self.current_level());

        if target_level == self.current_level() {
            return self.trail.len();
        }

        let boundary = self.level_starts[target_level as usize];

        while self.trail.len() > boundary {
            let elem = self.trail.pop().expect("boundary <= trail.len()");
            self.assignment.unassign(elem.lit);
            on_unassign(&elem);
        }

        self.level_starts.truncate(target_level as usize);
        boundary
    }
}
