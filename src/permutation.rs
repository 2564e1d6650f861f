use crate::error::{Result, ShuffleError};
use std::ops::Deref;

/// A bijection over `0..n`, read as `permutation[target_position] = original_index`.
///
/// The only ways to obtain one are [`Permutation::identity`] and
/// [`Permutation::try_from`], both of which uphold the bijection invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(pos, &idx)| pos == idx)
    }

    /// Original index that should end up at `target_position`.
    pub fn original_at(&self, target_position: usize) -> usize {
        self.0[target_position]
    }

    /// Maps each original index to its target position.
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0; self.0.len()];
        for (pos, &idx) in self.0.iter().enumerate() {
            inv[idx] = pos;
        }
        Self(inv)
    }

    /// Number of slots whose item changes.
    pub fn num_displaced(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .filter(|&(pos, &idx)| pos != idx)
            .count()
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Generators start from the identity and only swap entries, which keeps
    /// the bijection intact.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [usize] {
        &mut self.0
    }
}

impl Deref for Permutation {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = ShuffleError;

    fn try_from(indices: Vec<usize>) -> Result<Self> {
        if !is_bijection(&indices) {
            return Err(ShuffleError::InvalidInput(format!(
                "{:?} is not a permutation of 0..{}",
                indices,
                indices.len()
            )));
        }
        Ok(Self(indices))
    }
}

fn is_bijection(indices: &[usize]) -> bool {
    let mut seen = vec![false; indices.len()];
    for &idx in indices {
        match seen.get_mut(idx) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_bijections() {
        for indices in [vec![], vec![0], vec![1, 0], vec![2, 0, 3, 1]] {
            let perm = Permutation::try_from(indices.clone()).unwrap();
            assert_eq!(&*perm, indices.as_slice());
        }
    }

    #[test]
    fn rejects_non_bijections() {
        for indices in [vec![1], vec![0, 0], vec![0, 2], vec![3, 1, 2, 1]] {
            assert!(matches!(
                Permutation::try_from(indices),
                Err(ShuffleError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn identity() {
        for n in 0..10 {
            let perm = Permutation::identity(n);
            assert_eq!(perm.len(), n);
            assert!(perm.is_identity());
            assert_eq!(perm.num_displaced(), 0);
        }

        assert!(!Permutation::try_from(vec![1, 0]).unwrap().is_identity());
    }

    #[test]
    fn inverse() {
        let perm = Permutation::try_from(vec![2, 0, 3, 1]).unwrap();
        let inv = perm.inverse();
        assert_eq!(&*inv, &[1, 3, 0, 2]);
        assert_eq!(inv.inverse(), perm);
        assert_eq!(perm.num_displaced(), 4);
    }
}
