/*!

The bit-vector encoding of one generation of a hierarchy.

Every type in the mask gets a dense index, in name order. For each index we store the set of indices of its proper
descendants and the set of indices of its proper ancestors, each a `NatSet`. A subsumption test is then a single bit
test, and bound candidates are an intersection of two vectors followed by the usual hull reduction, done with one more
intersection per candidate.

A masked state covers only a scope type and its descendants. Descendant sets of masked types are complete, because the
mask is closed downward; ancestor sets are cut off at the mask boundary.

*/

use crate::{
  abstractions::{HashMap, NatSet},
  api::ty::Type,
  core::{closure, hierarchy::Hierarchy},
};

/// Bit-vectors are sized in multiples of this many bits.
const STORAGE_GRANULARITY: usize = 32;

pub(crate) struct CompiledState {
  generation : u64,
  types      : Vec<Type>,
  index      : HashMap<Type, usize>,
  ancestors  : Vec<NatSet>,
  descendants: Vec<NatSet>,
  width      : usize,
}

impl CompiledState {
  pub fn build(hierarchy: &Hierarchy, scope: Option<&Type>) -> CompiledState {
    let types: Vec<Type> = match scope {
      None => hierarchy.types(),
      Some(scope) => {
        let mut types: Vec<Type> = closure::reflexive_descendants(hierarchy, scope).into_iter().collect();
        types.sort();
        types
      }
    };

    let width = types.len().div_ceil(STORAGE_GRANULARITY) * STORAGE_GRANULARITY;
    let index: HashMap<Type, usize> =
        types
            .iter()
            .enumerate()
            .map(|(i, ty)| (ty.clone(), i))
            .collect();

    let descendants: Vec<NatSet> =
        types
            .iter()
            .map(|ty| {
              let mut bits = NatSet::with_width(width);
              for descendant in closure::descendants(hierarchy, ty) {
                if let Some(&i) = index.get(&descendant) {
                  bits.insert(i);
                }
              }
              bits
            })
            .collect();

    let mut ancestors: Vec<NatSet> = (0..types.len()).map(|_| NatSet::with_width(width)).collect();
    for (i, below) in descendants.iter().enumerate() {
      for j in below.iter() {
        ancestors[j].insert(i);
      }
    }

    CompiledState {
      generation: hierarchy.generation(),
      types,
      index,
      ancestors,
      descendants,
      width,
    }
  }

  #[inline(always)]
  pub fn generation(&self) -> u64 {
    self.generation
  }

  #[inline(always)]
  pub fn width(&self) -> usize {
    self.width
  }

  #[inline(always)]
  pub fn index_of(&self, ty: &Type) -> Option<usize> {
    self.index.get(ty).copied()
  }

  #[inline(always)]
  pub fn subsumes(&self, general: usize, specific: usize) -> bool {
    general == specific || self.descendants[general].contains(specific)
  }

  pub fn least_upper_bounds(&self, left: usize, right: usize) -> Vec<Type> {
    self.bounds(&self.descendants, &self.ancestors, left, right)
  }

  /// Only meaningful for unmasked states.
  pub fn greatest_lower_bounds(&self, left: usize, right: usize) -> Vec<Type> {
    self.bounds(&self.ancestors, &self.descendants, left, right)
  }

  /// Intersects the reflexive `toward` sets of both operands and keeps the candidates whose `away` set meets no other
  /// candidate.
  fn bounds(&self, toward: &[NatSet], away: &[NatSet], left: usize, right: usize) -> Vec<Type> {
    let mut candidates = toward[left].clone();
    candidates.insert(left);
    let mut other = toward[right].clone();
    other.insert(right);
    candidates.intersect_in_place(&other);

    candidates
        .iter()
        .filter(|&x| {
          let mut beyond = away[x].intersection(&candidates);
          beyond.remove(x);
          beyond.is_empty()
        })
        .map(|x| self.types[x].clone())
        .collect()
  }
}
