//! The raw variable -> value/level map underlying the [`crate::trail::Trail`].

use crate::data::{Lit, Var, VarVec};

#[derive(Clone, Copy, Debug)]
struct AssignData {
    status: bool,
    level: u32,
}

#[derive(Default)]
pub(crate) struct Assignment {
    assignment: VarVec<Option<AssignData>>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand(&mut self, v: Var) {
        self.assignment.expand(v, None);
    }

    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn get(&self, lit: Lit) -> Option<bool> {
        self.assignment[lit.var()].map(|data| data.status == lit.is_pos())
    }

    pub fn level_of(&self, lit: Lit) -> Option<u32> {
        self.assignment[lit.var()].map(|data| data.level)
    }

    pub fn is_satisfied(&self, lit: Lit) -> bool {
        matches!(self.assignment[lit.var()], Some(data) if data.status == lit.is_pos())
    }

    pub fn is_assigned(&self, lit: Lit) -> bool {
        self.assignment[lit.var()].is_some()
    }

    pub fn is_unassigned(&self, lit: Lit) -> bool {
        self.assignment[lit.var()].is_none()
    }

    pub fn is_unsatisfied(&self, lit: Lit) -> bool {
        matches!(self.assignment[lit.var()], Some(data) if data.status != lit.is_pos())
    }

    pub fn assign(&mut self, lit: Lit, level: u32) {
        debug_assert!(self.is_unassigned(lit));

        self.assignment[lit.var()] = Some(AssignData {
            status: lit.is_pos(),
            level,
        });
    }

    pub fn unassign(&mut self, lit: Lit) {
        debug_assert!(self.is_assigned(lit));

        self.assignment[lit.var()] = None;
    }
}
