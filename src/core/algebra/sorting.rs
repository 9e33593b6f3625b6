/*!

Ordering sets of types by subsumption. General types sort first: `compare(a, b)` is `Less` when `a` properly subsumes
`b`, which matches `le` being `subsumes`.

*/

use std::cmp::Ordering;

use crate::{
  abstractions::HashSet,
  api::{ty::Type, type_order::TypeOrder},
  core::{
    closure::{maximize, minimize},
    traversal::{traverse, Direction, TraversalConfig, TraversalFlag},
  },
};

pub(crate) fn compare<H: TypeOrder + ?Sized>(order: &H, left: &Type, right: &Type) -> Option<Ordering> {
  if left == right {
    Some(Ordering::Equal)
  } else if order.properly_subsumes(left, right) {
    Some(Ordering::Less)
  } else if order.properly_subsumes(right, left) {
    Some(Ordering::Greater)
  } else {
    None
  }
}

pub(crate) fn min<H: TypeOrder + ?Sized>(order: &H, types: &[Type]) -> Vec<Type> {
  let mut types = types.to_vec();
  minimize(&mut types, |general, specific| order.properly_subsumes(general, specific));
  types
}

pub(crate) fn max<H: TypeOrder + ?Sized>(order: &H, types: &[Type]) -> Vec<Type> {
  let mut types = types.to_vec();
  maximize(&mut types, |general, specific| order.properly_subsumes(general, specific));
  types
}

/// A topological sort that repeatedly takes the earliest remaining type not properly subsumed by another remaining
/// type. Types on a cycle subsume each other; when only such types remain, the earliest one is taken.
pub(crate) fn subsort<H: TypeOrder + ?Sized>(order: &H, types: &[Type]) -> Vec<Type> {
  let mut seen = HashSet::new();
  let mut remaining: Vec<Type> = types.iter().filter(|ty| seen.insert((*ty).clone())).cloned().collect();
  let mut sorted = Vec::with_capacity(remaining.len());

  while !remaining.is_empty() {
    let next =
        (0..remaining.len())
            .find(|&i| {
              !remaining
                  .iter()
                  .enumerate()
                  .any(|(j, other)| j != i && order.properly_subsumes(other, &remaining[i]))
            })
            .unwrap_or(0);
    sorted.push(remaining.remove(next));
  }

  sorted
}

/// Longest-path levels of the whole hierarchy, restricted to `types`. Empty levels are dropped.
pub(crate) fn stratasort<H: TypeOrder + ?Sized>(order: &H, types: &[Type]) -> Vec<Vec<Type>> {
  let mut seen        = HashSet::new();
  let mut wanted      = HashSet::new();
  let mut non_members = Vec::new();
  for ty in types {
    if !seen.insert(ty.clone()) {
      continue;
    }
    if order.has_type(ty) {
      wanted.insert(ty.clone());
    } else {
      non_members.push(ty.clone());
    }
  }

  let config = TraversalConfig::default().with_flags(TraversalFlag::Stratify);
  let walk   = traverse(order.hierarchy(), Direction::Down, config, |_, _| None::<()>);

  let mut strata: Vec<Vec<Type>> =
      walk.strata
          .into_iter()
          .map(|stratum| stratum.into_iter().filter(|ty| wanted.contains(ty)).collect::<Vec<_>>())
          .filter(|stratum| !stratum.is_empty())
          .collect();
  if !non_members.is_empty() {
    strata.push(non_members);
  }
  strata
}
