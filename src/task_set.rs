//! Persistent task collections.
//!
//! A `TaskSet` is a bitset over the fixed task table of one planning instance.
//! Copying is a word-wise clone and equality/hashing look only at membership,
//! so two sets built in different orders compare equal.

use fixedbitset::FixedBitSet;

/// A set of task indices into an instance task table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskSet {
    bits: FixedBitSet,
}

impl TaskSet {
    /// An empty set able to hold indices `0..len`.
    pub fn empty(len: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(len),
        }
    }

    /// A set holding every index in `0..len`.
    pub fn full(len: usize) -> Self {
        let mut bits = FixedBitSet::with_capacity(len);
        bits.insert_range(..);
        Self { bits }
    }

    pub fn from_indices(len: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::empty(len);
        for index in indices {
            set.bits.insert(index);
        }
        set
    }

    pub fn contains(&self, index: usize) -> bool {
        self.bits.contains(index)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Copy of this set with `index` added.
    pub fn with(&self, index: usize) -> Self {
        let mut bits = self.bits.clone();
        bits.insert(index);
        Self { bits }
    }

    /// Copy of this set with `index` removed.
    pub fn without(&self, index: usize) -> Self {
        let mut bits = self.bits.clone();
        bits.set(index, false);
        Self { bits }
    }

    /// Members of `self` that are not in `other`.
    pub fn difference(&self, other: &TaskSet) -> Self {
        let mut bits = self.bits.clone();
        bits.difference_with(&other.bits);
        Self { bits }
    }

    /// Indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }

    /// Sum of the member weights, looked up in the instance weight table.
    pub fn weight(&self, weights: &[f64]) -> f64 {
        self.iter().map(|index| weights[index]).sum()
    }
}
