use cdcl_sat::Solver;

#[test]
fn trivial_decision_and_propagation() {
    let mut solver = Solver::from_dimacs(
        "p cnf 2 2\n\
         1 2 0\n\
         -1 2 0\n",
    )
    .unwrap();
    let result = solver.solve();
    let model = result.unwrap_sat();
    assert!(model.value(2));
}

#[test]
fn propagation_chain_forces_a_unique_model() {
    let mut solver = Solver::from_dimacs(
        "p cnf 3 3\n\
         -1 -2 0\n\
         -1 3 0\n\
         1 0\n",
    )
    .unwrap();
    let model = solver.solve().unwrap_sat();
    assert!(model.value(1));
    assert!(!model.value(2));
    assert!(model.value(3));
}

#[test]
fn conflict_requires_backjump_across_two_levels() {
    // Needs a non-chronological backjump: the conflict at the deepest
    // decision level is only resolvable by undoing both decisions at once.
    let dimacs = "p cnf 4 6\n\
         1 2 0\n\
         -1 3 0\n\
         -2 4 0\n\
         -3 -4 0\n\
         1 -3 0\n\
         -1 2 0\n";
    let mut solver = Solver::from_dimacs(dimacs).unwrap();
    let result = solver.solve();
    assert!(result.is_sat());
}

#[test]
fn unsatisfiable_pigeonhole_two_into_one() {
    // Two pigeons, one hole: both pigeons can't avoid the hole, and they
    // can't share it.
    let dimacs = "p cnf 2 3\n\
         1 0\n\
         2 0\n\
         -1 -2 0\n";
    let mut solver = Solver::from_dimacs(dimacs).unwrap();
    assert!(solver.solve().is_unsat());
}

#[test]
fn empty_clause_is_immediately_unsat() {
    let dimacs = "p cnf 1 2\n\
         1 0\n\
         0\n";
    let mut solver = Solver::from_dimacs(dimacs).unwrap();
    assert!(solver.solve().is_unsat());
}

#[test]
fn larger_random_looking_instance_is_sat() {
    let dimacs = "p cnf 5 7\n\
         1 2 -3 0\n\
         -1 3 4 0\n\
         -2 -4 5 0\n\
         2 3 -5 0\n\
         -1 -2 4 0\n\
         1 -4 -5 0\n\
         3 4 5 0\n";
    let mut solver = Solver::from_dimacs(dimacs).unwrap();
    let result = solver.solve();
    assert!(result.is_sat());
}

#[test]
fn malformed_dimacs_is_rejected() {
    assert!(Solver::from_dimacs("not a cnf file").is_err());
}
