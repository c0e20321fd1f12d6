//! Top-level solver state and the decide/propagate/analyze/backjump loop.

use tracing::debug;

use crate::analyze::AnalyzeState;
use crate::clause::{AddClauseOutcome, ClauseDb};
use crate::data::{Lit, Var};
use crate::propagate::PropagationResult;
use crate::trail::{Trail, TrailReason};
use crate::vsids::Vsids;
use crate::watch::WatchIndex;

#[derive(Default)]
pub struct Stats {
    pub conflicts: u64,
    pub propagations: u64,
    pub decisions: u64,
}

#[derive(Default)]
pub struct Solver {
    pub(crate) clause_db: ClauseDb,
    pub(crate) watches: WatchIndex,
    pub(crate) trail: Trail,

    /// Trail index up to which unit propagation has already been carried out.
    pub(crate) next_prop: usize,

    /// The original formula contained an empty clause or two conflicting unit
    /// clauses; no amount of search will ever satisfy it.
    trivially_unsat: bool,

    /// Original (non-learned) unit clauses, kept around for `check` since
    /// unit clauses are asserted directly and never stored in `clause_db`.
    original_units: Vec<Lit>,

    pub(crate) vsids: Vsids,
    pub(crate) analyze_state: AnalyzeState,
    pub(crate) stats: Stats,
}

pub struct Model<'a> {
    trail: &'a Trail,
}

impl<'a> Model<'a> {
    /// The truth value assigned to variable `v` (as a signed DIMACS literal,
    /// e.g. `v` or `-v`).
    pub fn value(&self, v: i32) -> bool {
        self.trail.value_of(Lit::new(v)).unwrap_or(false)
    }

    /// The model as a list of signed literals, one per variable, in
    /// increasing variable order.
    pub fn as_vec(&self) -> Vec<i32> {
        (1..=self.trail.total_vars() as i32)
            .map(|v| if self.value(v) { v } else { -v })
            .collect()
    }
}

impl std::fmt::Debug for Model<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Model").field(&self.as_vec()).finish()
    }
}

#[derive(Debug)]
pub enum SolverResult<'a> {
    Sat(Model<'a>),
    Unsat,
}

impl<'a> SolverResult<'a> {
    pub fn is_sat(&self) -> bool {
        matches!(self, SolverResult::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SolverResult::Unsat)
    }

    pub fn unwrap_sat(self) -> Model<'a> {
        match self {
            SolverResult::Sat(model) => model,
            SolverResult::Unsat => panic!("result is UNSAT, not SAT"),
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dimacs(input: &str) -> Result<Solver, crate::error::DimacsError> {
        let clauses = crate::dimacs::Dimacs::parse(input)?;

        let mut solver = Solver::new();
        for clause in clauses {
            solver.add_clause(clause);
        }

        Ok(solver)
    }

    fn expand_for(&mut self, max_var: Var) {
        self.trail.expand(max_var);
        self.vsids.expand(max_var);
        self.watches.expand(Lit::from(max_var));
        self.analyze_state.expand(max_var);
    }

    /// Add a clause of the original formula. Tautological clauses are
    /// dropped; unit clauses are asserted immediately at level 0; an empty
    /// clause marks the whole formula unsatisfiable.
    pub fn add_clause<I>(&mut self, cls: I)
    where
        I: IntoIterator<Item = i32>,
    {
        let mut lits: Vec<Lit> = cls.into_iter().map(Lit::new).collect();

        // Every variable named by this clause must end up in the model, even
        // if the clause itself is about to be dropped as a tautology.
        if let Some(&max_lit) = lits.iter().max_by_key(|l| l.var().get()) {
            self.expand_for(max_lit.var());
        }

        if ClauseDb::normalize(&mut lits) {
            return;
        }

        match self.clause_db.add_clause(lits, false, None) {
            AddClauseOutcome::Tautology => {}
            AddClauseOutcome::Empty => self.trivially_unsat = true,
            AddClauseOutcome::Unit(lit) => {
                if self.trail.is_unsatisfied(lit) {
                    self.trivially_unsat = true;
                } else if self.trail.is_unassigned(lit) {
                    self.trail.assign(lit, TrailReason::Axiom);
                    self.original_units.push(lit);
                }
            }
            AddClauseOutcome::Added(cls_ref) => {
                let lits = self.clause_db.get(cls_ref);
                let (w0, w1) = (lits[0], lits[1]);
                self.watches.add(w0, cls_ref);
                self.watches.add(w1, cls_ref);
            }
        }
    }

    fn all_vars_assigned(&self) -> bool {
        self.trail.assignment_complete()
    }

    fn decide(&mut self) -> Option<Var> {
        let trail = &self.trail;
        self.vsids
            .pop_unassigned(|v| trail.is_unassigned(Lit::from(v)))
    }

    /// Run the CDCL search to completion.
    pub fn solve(&mut self) -> SolverResult<'_> {
        if self.trivially_unsat {
            return SolverResult::Unsat;
        }

        if !self.preprocess() {
            return SolverResult::Unsat;
        }

        loop {
            let conflict = self.propagate();

            match conflict {
                PropagationResult::Conflict(conflicting_clause) => {
                    self.stats.conflicts += 1;
                    if self.trail.current_level() == 0 {
                        debug!("conflict at level 0: formula is UNSAT");
                        return SolverResult::Unsat;
                    }

                    debug!(
                        conflict = %self.trail.fmt_clause(self.clause_db.get(conflicting_clause)),
                        trail = %self.trail.fmt_trail(),
                        "conflict"
                    );

                    let analysis = self.analyze(conflicting_clause);
                    debug!(
                        backjump_level = analysis.backjump_level,
                        learnt = %self.trail.fmt_clause(&analysis.learnt),
                        "learned clause"
                    );
                    self.backjump(&analysis);
                    self.vsids.decay();
                }
                PropagationResult::Done => {
                    if self.all_vars_assigned() {
                        debug_assert!(
                            self.check(),
                            "generated assignment doesn't satisfy the input formula"
                        );
                        let model = Model { trail: &self.trail };
                        return SolverResult::Sat(model);
                    }

                    match self.decide() {
                        Some(var) => {
                            self.stats.decisions += 1;
                            debug!("new decision variable {var}");
                            self.trail.begin_decision_level();
                            self.trail
                                .assign(-Lit::from(var), TrailReason::Decision);
                        }
                        None => unreachable!(
                            "no decision candidate, but not all variables are assigned"
                        ),
                    }
                }
            }
        }
    }

    /// Check that every clause of the *original* formula is satisfied by the
    /// current (complete) assignment. Used for self-verification before
    /// returning `Sat`.
    fn check(&self) -> bool {
        self.original_units
            .iter()
            .all(|&lit| self.trail.is_satisfied(lit))
            && self
                .clause_db
                .iter_original()
                .all(|clause| self.trail.is_clause_satisfied(clause))
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_unit_clause_is_sat() {
        let mut solver = Solver::new();
        solver.add_clause([1]);
        assert!(solver.solve().is_sat());
    }

    #[test]
    fn conflicting_units_are_unsat() {
        let mut solver = Solver::new();
        solver.add_clause([1]);
        solver.add_clause([-1]);
        assert!(solver.solve().is_unsat());
    }

    #[test]
    fn propagation_chain() {
        let mut solver = Solver::new();
        solver.add_clause([-1, 2, 3]);
        solver.add_clause([-1, -2]);
        solver.add_clause([1]);
        assert!(solver.solve().is_sat());
    }

    #[test]
    fn tautology_is_ignored() {
        let mut solver = Solver::new();
        solver.add_clause([1, -1]);
        let result = solver.solve();
        assert!(result.is_sat());
    }
}
