//! Two-watched-literal unit propagation.

use crate::clause::ClauseRef;
use crate::solver::Solver;
use crate::trail::TrailReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropagationResult {
    Conflict(ClauseRef),
    Done,
}

impl Solver {
    /// Drain the trail from `next_prop` onward, maintaining the watch-list
    /// invariant and reporting the first conflict encountered, if any.
    pub(crate) fn propagate(&mut self) -> PropagationResult {
        while let Some(&elem) = self.trail.get(self.next_prop) {
            let p = elem.lit;
            debug_assert!(self.trail.is_satisfied(p));

            let watch_list = self.watches.take(-p);
            let mut kept = Vec::with_capacity(watch_list.len());
            let mut conflict = None;

            for watch in watch_list {
                if conflict.is_some() {
                    kept.push(watch);
                    continue;
                }

                let cls_ref = watch.clause;
                let cls = self.clause_db.get_mut(cls_ref);

                // Canonicalize so the just-falsified watch sits at position 1.
                if cls[0] == -p {
                    cls.swap(0, 1);
                }
                debug_assert_eq!(cls[1], -p);

                if self.trail.is_satisfied(cls[0]) {
                    kept.push(watch);
                    continue;
                }

                let replacement = cls[2..]
                    .iter()
                    .position(|&lit| !self.trail.is_unsatisfied(lit));

                if let Some(offset) = replacement {
                    let new_pos = offset + 2;
                    cls.swap(1, new_pos);
                    self.watches.add(cls[1], cls_ref);
                    continue; // moved to a different watch list, drop from this one
                }

                let other = cls[0];
                if self.trail.is_unassigned(other) {
                    self.trail.assign(other, TrailReason::Propagated(cls_ref));
                    self.stats.propagations += 1;
                    kept.push(watch);
                } else {
                    debug_assert!(self.trail.is_unsatisfied(other));
                    conflict = Some(cls_ref);
                    kept.push(watch);
                }
            }

            self.watches.put_back(-p, kept);

            if let Some(cls_ref) = conflict {
                return PropagationResult::Conflict(cls_ref);
            }

            self.next_prop += 1;
        }

        PropagationResult::Done
    }
}
