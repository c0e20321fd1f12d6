//! First-UIP conflict analysis and non-chronological backjumping.

use std::num::NonZeroU32;

use crate::clause::{AddClauseOutcome, ClauseRef};
use crate::data::{Lit, Var, VarVec};
use crate::solver::Solver;
use crate::trail::TrailReason;

/// Scratch state reused across calls to `analyze`, so it doesn't need to
/// reallocate its `seen` set on every conflict.
#[derive(Default)]
pub(crate) struct AnalyzeState {
    seen: VarVec<bool>,
}

impl AnalyzeState {
    pub fn expand(&mut self, var: Var) {
        self.seen.expand(var, false);
    }
}

/// The result of analyzing a single conflict: a learned clause, asserting at
/// `backjump_level` once the solver has backtracked there.
pub(crate) struct ConflictAnalysis {
    pub backjump_level: u32,
    pub learnt: Vec<Lit>,
    pub asserting_lit: Lit,
    pub lbd: u32,
}

impl Solver {
    /// Resolve the conflict graph back to its first unique implication point,
    /// producing a learned clause that is false under the current
    /// assignment and asserts its first literal once the solver backjumps.
    pub(crate) fn analyze(&mut self, conflict: ClauseRef) -> ConflictAnalysis {
        let current_level = self.trail.current_level();

        let mut tail: Vec<Lit> = Vec::new();
        let mut levels_seen: Vec<u32> = Vec::new();
        let mut open = 0u32;
        let mut p: Option<Lit> = None;
        let mut cur = conflict;
        let mut trail_idx = self.trail.trail().len();

        loop {
            let literals = self.clause_db.get(cur);

            for &lit in literals {
                if Some(lit) == p {
                    continue;
                }

                let var = lit.var();
                if self.analyze_state.seen[var] {
                    continue;
                }

                let level = self
                    .trail
                    .level_of(lit)
                    .expect("literal in a reason or conflict clause is always assigned");

                if level == 0 {
                    continue;
                }

                self.analyze_state.seen[var] = true;
                self.vsids.bump(var);

                if level == current_level {
                    open += 1;
                } else {
                    tail.push(lit);
                    if !levels_seen.contains(&level) {
                        levels_seen.push(level);
                    }
                }
            }

            let pivot = loop {
                trail_idx -= 1;
                let elem = self.trail.get(trail_idx).expect("walk stays within the trail");
                if self.analyze_state.seen[elem.lit.var()] {
                    break *elem;
                }
            };

            self.analyze_state.seen[pivot.lit.var()] = false;
            open -= 1;
            p = Some(pivot.lit);

            if open == 0 {
                break;
            }

            cur = match pivot.reason {
                TrailReason::Propagated(r) => r,
                _ => unreachable!("a literal still open at the current level must be propagated"),
            };
        }

        let pivot_lit = p.expect("loop always assigns p before breaking");
        let asserting_lit = -pivot_lit;

        let backjump_level = tail
            .iter()
            .map(|&lit| {
                self.trail
                    .level_of(lit)
                    .expect("tail literals are already assigned")
            })
            .max()
            .unwrap_or(0);

        let lbd = (levels_seen.len() + 1) as u32;

        let mut learnt = Vec::with_capacity(tail.len() + 1);
        learnt.push(asserting_lit);
        learnt.extend(tail);

        // Put the tail literal with the highest decision level at index 1,
        // next to the asserting literal at index 0, so the two watches are
        // the last two literals of the clause to become unassigned on a
        // later backtrack.
        if learnt.len() > 1 {
            let max_idx = learnt[1..]
                .iter()
                .enumerate()
                .max_by_key(|&(_, &lit)| {
                    self.trail
                        .level_of(lit)
                        .expect("tail literals are already assigned")
                })
                .map(|(idx, _)| idx + 1)
                .expect("learnt has at least 2 literals");
            learnt.swap(1, max_idx);
        }

        for &lit in &learnt {
            self.analyze_state.seen[lit.var()] = false;
        }

        ConflictAnalysis {
            backjump_level,
            learnt,
            asserting_lit,
            lbd,
        }
    }

    /// Undo the trail down to `analysis.backjump_level`, returning freed
    /// variables to VSIDS, then record the learned clause and enqueue its
    /// asserting literal.
    pub(crate) fn backjump(&mut self, analysis: &ConflictAnalysis) {
        let clause_db = &mut self.clause_db;
        let vsids = &mut self.vsids;

        self.trail.backtrack_to(analysis.backjump_level, |elem| {
            if let TrailReason::Propagated(reason) = elem.reason {
                clause_db.set_is_reason(reason, false);
            }
            vsids.make_available(elem.lit.var());
        });
        self.next_prop = self.trail.trail().len();

        if analysis.learnt.len() == 1 {
            debug_assert_eq!(analysis.backjump_level, 0);
            self.trail.assign(analysis.asserting_lit, TrailReason::Axiom);
            return;
        }

        let lbd = NonZeroU32::new(analysis.lbd.max(1)).unwrap();
        match self
            .clause_db
            .add_clause(analysis.learnt.clone(), true, Some(lbd))
        {
            AddClauseOutcome::Added(cls_ref) => {
                let (w0, w1) = {
                    let lits = self.clause_db.get(cls_ref);
                    (lits[0], lits[1])
                };
                self.watches.add(w0, cls_ref);
                self.watches.add(w1, cls_ref);
                self.clause_db.set_is_reason(cls_ref, true);
                self.trail
                    .assign(analysis.asserting_lit, TrailReason::Propagated(cls_ref));
            }
            _ => unreachable!("a learned clause with 2+ literals always gets stored"),
        }
    }
}
