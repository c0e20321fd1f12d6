use super::Lit;

/// Wrapper over `Vec` which is indexed by [`Lit`] instead of `usize`.
///
/// Positive and negative literals of the same variable are stored next to
/// each other, so the watch index (keyed by a literal's complement) stays
/// cache-local for both polarities of a variable.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct LitVec<T>(Vec<T>);

impl<T> LitVec<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.0.iter_mut()
    }
}

impl<T: Clone> LitVec<T> {
    /// Resize so that `l` is a valid index.
    pub fn expand(&mut self, l: Lit, val: T) {
        let len = lit_to_idx(l) + 1;

        if len > self.0.len() {
            self.0.resize(len, val)
        }
    }
}

impl<T> Default for LitVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn lit_to_idx(lit: Lit) -> usize {
    let i = lit.get();

    // positive and negative lit of a variable are placed next to each other.
    // We subtract two, because there are no 0 or -0 literals.
    let idx = (i < 0) as i32 + 2 * i.abs() - 2;
    debug_assert!(idx >= 0);
    idx as usize
}

impl<T> std::ops::Index<Lit> for LitVec<T> {
    type Output = T;

    fn index(&self, index: Lit) -> &Self::Output {
        &self.0[lit_to_idx(index)]
    }
}

impl<T> std::ops::IndexMut<Lit> for LitVec<T> {
    fn index_mut(&mut self, index: Lit) -> &mut Self::Output {
        &mut self.0[lit_to_idx(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_to_idx() {
        assert_eq!(lit_to_idx(Lit::new(1)), 0);
        assert_eq!(lit_to_idx(Lit::new(-1)), 1);
        assert_eq!(lit_to_idx(Lit::new(2)), 2);
        assert_eq!(lit_to_idx(Lit::new(-2)), 3);
        assert_eq!(lit_to_idx(Lit::new(3)), 4);
        assert_eq!(lit_to_idx(Lit::new(-3)), 5);
    }

    #[test]
    fn indexes_positive_and_negative_independently() {
        let mut litvec: LitVec<i32> = LitVec::new();
        litvec.expand(Lit::new(3), 0);

        litvec[Lit::new(1)] = 1;
        litvec[Lit::new(-1)] = -1;
        litvec[Lit::new(3)] = 3;
        litvec[Lit::new(-3)] = -3;

        assert_eq!(litvec[Lit::new(1)], 1);
        assert_eq!(litvec[Lit::new(-1)], -1);
        assert_eq!(litvec[Lit::new(3)], 3);
        assert_eq!(litvec[Lit::new(-3)], -3);
        assert_eq!(litvec[Lit::new(2)], 0);
    }
}
