/*!

A `NatSet` is a set of natural numbers backed by a growable bit vector. The compiled layer assigns every type a
dense index and represents ancestor and descendant sets as `NatSet`s, so that set algebra becomes word-wise bit
operations.

*/

use std::fmt::{Debug, Display, Formatter};

use bit_set::BitSet;

use crate::abstractions::join_string;

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct NatSet(BitSet);

impl NatSet {
  /// A set whose backing storage can hold `width` elements without reallocating.
  pub fn with_width(width: usize) -> Self {
    NatSet(BitSet::with_capacity(width))
  }

  /// Returns `true` if `value` was not already present.
  #[inline(always)]
  pub fn insert(&mut self, value: usize) -> bool {
    self.0.insert(value)
  }

  #[inline(always)]
  pub fn remove(&mut self, value: usize) -> bool {
    self.0.remove(value)
  }

  #[inline(always)]
  pub fn contains(&self, value: usize) -> bool {
    self.0.contains(value)
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn intersect_in_place(&mut self, other: &NatSet) {
    self.0.intersect_with(&other.0);
  }

  /// Returns the intersection as a new set.
  pub fn intersection(&self, other: &NatSet) -> NatSet {
    let mut result = self.clone();
    result.intersect_in_place(other);
    result
  }

  pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    self.0.iter()
  }
}

impl Display for NatSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{{}}}", join_string(self.iter(), ", "))
  }
}

impl Debug for NatSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}
