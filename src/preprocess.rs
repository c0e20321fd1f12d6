//! Level-0 preprocessing: draining initial units, then pure-literal
//! elimination to a fixed point.

use crate::data::{Lit, Var, VarVec};
use crate::propagate::PropagationResult;
use crate::solver::Solver;
use crate::trail::TrailReason;

impl Solver {
    /// Run once before search begins. Returns `false` if the formula is
    /// already unsatisfiable at level 0.
    pub(crate) fn preprocess(&mut self) -> bool {
        loop {
            if let PropagationResult::Conflict(_) = self.propagate() {
                return false;
            }

            let pure_literals = self.find_pure_literals();
            if pure_literals.is_empty() {
                return true;
            }

            for lit in pure_literals {
                if self.trail.is_unassigned(lit) {
                    self.trail.assign(lit, TrailReason::Axiom);
                }
            }
        }
    }

    /// A literal `l` is pure if it occurs in some not-yet-satisfied clause
    /// and `-l` occurs in none of them.
    fn find_pure_literals(&self) -> Vec<Lit> {
        let total_vars = self.trail.total_vars();
        let mut occurs: VarVec<(bool, bool)> = VarVec::new();
        occurs.resize(total_vars, (false, false));

        for clause in self.clause_db.iter() {
            if self.trail.is_clause_satisfied(clause) {
                continue;
            }
            for &lit in clause {
                if self.trail.is_unassigned(lit) {
                    let entry = &mut occurs[lit.var()];
                    if lit.is_pos() {
                        entry.0 = true;
                    } else {
                        entry.1 = true;
                    }
                }
            }
        }

        (0..total_vars)
            .filter_map(|idx| {
                let var = Var::from_index(idx);
                match occurs[var] {
                    (true, false) => Some(Lit::from_var(var, true)),
                    (false, true) => Some(Lit::from_var(var, false)),
                    _ => None,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::solver::Solver;

    #[test]
    fn pure_literal_is_assigned_without_search() {
        let mut solver = Solver::new();
        solver.add_clause([1, 2]);
        solver.add_clause([1, -2]);
        let result = solver.solve();
        let model = result.unwrap_sat();
        assert!(model.value(1));
    }

    #[test]
    fn satisfied_clauses_do_not_block_later_pure_literals() {
        let mut solver = Solver::new();
        solver.add_clause([1, 2]);
        solver.add_clause([-1, 2, 3]);
        solver.add_clause([-2, 3]);
        let result = solver.solve();
        assert!(result.is_sat());
    }
}
