//! The VSIDS (variable-state-independent decaying sum) branching heuristic.
//!
//! Keeps an activity value per variable in a binary heap. Conflict analysis
//! bumps the activity of every variable it resolves on; the solver loop
//! decays all activities after learning a clause. Decisions always branch on
//! the unassigned variable with the highest activity.
//!
//! As an optimization, instead of multiplying every activity by the decay
//! factor on every conflict, the bump increment is divided by it; this is
//! equivalent up to a global scaling factor, which doesn't matter since only
//! the relative order of activities is observed. Both activities and the
//! bump increment are rescaled down together before either would overflow.

use crate::data::{Var, VarVec};

pub(crate) struct Vsids {
    /// The activity of each variable.
    activity: VarVec<f64>,
    /// A binary heap of the variables currently available to decide on.
    heap: Vec<Var>,
    /// The position of each variable in `heap`, if present.
    position: VarVec<Option<usize>>,
    /// The value added to a variable's activity on bump.
    bump: f64,
    /// The inverse of the decay factor.
    inv_decay: f64,
}

impl Default for Vsids {
    fn default() -> Self {
        Vsids {
            activity: VarVec::new(),
            heap: Vec::new(),
            position: VarVec::new(),
            bump: 1.0,
            inv_decay: 1.0 / 0.95,
        }
    }
}

impl Vsids {
    pub fn new() -> Self {
        Self::default()
    }

    fn rescale_limit() -> f64 {
        f64::MAX / 1e10
    }

    /// Grow internal storage so `var` is a valid index, making every
    /// newly-created slot (not just `var` itself) available for decisions.
    /// A clause only ever names its own literals' variables, so without
    /// this, any variable that is never the maximum of some clause would
    /// never enter the heap at all.
    pub fn expand(&mut self, var: Var) {
        let old_len = self.activity.len();
        self.activity.expand(var, 0.0);
        self.position.expand(var, None);

        for idx in old_len..self.activity.len() {
            self.make_available(Var::from_index(idx));
        }
    }

    /// Increase a variable's activity, keeping the heap ordered.
    pub fn bump(&mut self, var: Var) {
        self.activity[var] += self.bump;
        if self.activity[var] >= Self::rescale_limit() {
            self.rescale();
        }
        if let Some(pos) = self.position[var] {
            self.sift_up(pos);
        }
    }

    /// Decay all variable activities (relative to the bump increment).
    pub fn decay(&mut self) {
        self.bump *= self.inv_decay;
        if self.bump >= Self::rescale_limit() {
            self.rescale();
        }
    }

    fn rescale(&mut self) {
        let factor = 1.0 / Self::rescale_limit();
        for activity in &mut self.activity {
            *activity *= factor;
        }
        self.bump *= factor;
    }

    /// Insert a variable into the heap if it isn't already present. Used
    /// both for newly-registered variables and for variables returned by
    /// backtracking.
    pub fn make_available(&mut self, var: Var) {
        if self.position[var].is_none() {
            let pos = self.heap.len();
            self.position[var] = Some(pos);
            self.heap.push(var);
            self.sift_up(pos);
        }
    }

    /// Pop variables off the heap until an unassigned one is found (or the
    /// heap is exhausted).
    pub fn pop_unassigned(&mut self, is_unassigned: impl Fn(Var) -> bool) -> Option<Var> {
        loop {
            let var = self.pop()?;
            if is_unassigned(var) {
                return Some(var);
            }
        }
    }

    fn pop(&mut self) -> Option<Var> {
        if self.heap.is_empty() {
            return None;
        }
        let var = self.heap.swap_remove(0);
        self.position[var] = None;
        if !self.heap.is_empty() {
            let top = self.heap[0];
            self.position[top] = Some(0);
            self.sift_down(0);
        }
        Some(var)
    }

    fn sift_up(&mut self, mut pos: usize) {
        let var = self.heap[pos];
        while pos > 0 {
            let parent_pos = (pos - 1) / 2;
            let parent_var = self.heap[parent_pos];
            if self.activity[parent_var] >= self.activity[var] {
                break;
            }
            self.heap[pos] = parent_var;
            self.position[parent_var] = Some(pos);
            pos = parent_pos;
        }
        self.heap[pos] = var;
        self.position[var] = Some(pos);
    }

    fn sift_down(&mut self, mut pos: usize) {
        let var = self.heap[pos];
        loop {
            let mut largest_pos = pos;
            let mut largest_var = var;

            let left = pos * 2 + 1;
            if left < self.heap.len() && self.activity[self.heap[left]] > self.activity[largest_var] {
                largest_pos = left;
                largest_var = self.heap[left];
            }

            let right = pos * 2 + 2;
            if right < self.heap.len() && self.activity[self.heap[right]] > self.activity[largest_var]
            {
                largest_pos = right;
                largest_var = self.heap[right];
            }

            if largest_pos == pos {
                break;
            }

            self.heap[pos] = largest_var;
            self.position[largest_var] = Some(pos);
            pos = largest_pos;
        }
        self.heap[pos] = var;
        self.position[var] = Some(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_activity_popped_first() {
        let mut vsids = Vsids::new();
        for i in 0..8 {
            vsids.expand(Var::from_index(i));
        }

        for i in 0..8 {
            for _ in 0..i {
                vsids.bump(Var::from_index(i));
            }
        }

        for i in (0..8).rev() {
            assert_eq!(vsids.pop_unassigned(|_| true), Some(Var::from_index(i)));
        }
        assert_eq!(vsids.pop_unassigned(|_| true), None);
    }

    #[test]
    fn skips_assigned_variables() {
        let mut vsids = Vsids::new();
        for i in 0..4 {
            vsids.expand(Var::from_index(i));
        }
        for i in 0..4 {
            for _ in 0..i {
                vsids.bump(Var::from_index(i));
            }
        }
        // Variable 3 has the highest activity but is "assigned" and should be skipped.
        let assigned = Var::from_index(3);
        let picked = vsids.pop_unassigned(|v| v != assigned);
        assert_eq!(picked, Some(Var::from_index(2)));
    }

    #[test]
    fn decay_then_bump_reorders() {
        let mut vsids = Vsids::new();
        for i in 0..4 {
            vsids.expand(Var::from_index(i));
        }
        for i in 0..4 {
            for _ in 0..i {
                vsids.bump(Var::from_index(i));
            }
        }
        vsids.decay();
        vsids.decay();
        for _ in 0..10 {
            vsids.bump(Var::from_index(0));
        }
        assert_eq!(vsids.pop_unassigned(|_| true), Some(Var::from_index(0)));
    }
}
