use proptest::collection::vec as pvec;
use proptest::prelude::*;

use cdcl_sat::{Solver, SolverResult};

const MAX_VARS: i32 = 6;

fn literal() -> impl Strategy<Value = i32> {
    (1..=MAX_VARS).prop_flat_map(|v| prop_oneof![Just(v), Just(-v)])
}

fn clause() -> impl Strategy<Value = Vec<i32>> {
    pvec(literal(), 1..=3)
}

fn formula() -> impl Strategy<Value = Vec<Vec<i32>>> {
    pvec(clause(), 0..=12)
}

fn brute_force_sat(clauses: &[Vec<i32>]) -> bool {
    (0u32..(1u32 << MAX_VARS)).any(|assignment| {
        clauses.iter().all(|clause| {
            clause.iter().any(|&lit| {
                let bit = (assignment >> (lit.unsigned_abs() - 1)) & 1 == 1;
                (lit > 0) == bit
            })
        })
    })
}

proptest! {
    // P2: the solver's UNSAT verdict agrees with an independent brute-force
    // oracle over small instances.
    #[test]
    fn solver_agrees_with_brute_force_oracle(clauses in formula()) {
        let mut solver = Solver::new();
        for clause in &clauses {
            solver.add_clause(clause.iter().copied());
        }
        prop_assert_eq!(solver.solve().is_sat(), brute_force_sat(&clauses));
    }

    // P1: every model the solver returns actually satisfies the input.
    #[test]
    fn sat_models_satisfy_every_clause(clauses in formula()) {
        let mut solver = Solver::new();
        for clause in &clauses {
            solver.add_clause(clause.iter().copied());
        }
        if let SolverResult::Sat(model) = solver.solve() {
            for clause in &clauses {
                prop_assert!(clause.iter().any(|&lit| model.value(lit)));
            }
        }
    }

    // P7: solving the same formula twice from scratch gives the same verdict.
    #[test]
    fn solving_is_deterministic(clauses in formula()) {
        let expected = {
            let mut solver = Solver::new();
            for clause in &clauses {
                solver.add_clause(clause.iter().copied());
            }
            solver.solve().is_sat()
        };

        for _ in 0..3 {
            let mut solver = Solver::new();
            for clause in &clauses {
                solver.add_clause(clause.iter().copied());
            }
            prop_assert_eq!(solver.solve().is_sat(), expected);
        }
    }
}
