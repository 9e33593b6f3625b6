/*!

Transitive closure and hull reduction.

`ancestors` and `descendants` are upward and downward walks seeded with a type's immediate neighbours, so a type
belongs to its own closure only when it lies on a cycle. The reflexive variants add the type itself.

`minimize` and `maximize` reduce a set of types to its most general, respectively most specific, members. An element
is dropped when some *other* element of the set properly subsumes it (for `minimize`) or is properly subsumed by it
(for `maximize`). Because the test only ever looks at the original set, the result does not depend on the order in
which elements are examined, and applying either reduction twice changes nothing.

*/

use crate::{
  abstractions::HashSet,
  api::ty::{normalize, Type},
  core::{
    hierarchy::Hierarchy,
    traversal::{traverse, Direction, TraversalConfig},
  },
};

pub(crate) fn ancestors(hierarchy: &Hierarchy, ty: &Type) -> HashSet<Type> {
  closure(hierarchy, Direction::Up, ty)
}

pub(crate) fn descendants(hierarchy: &Hierarchy, ty: &Type) -> HashSet<Type> {
  closure(hierarchy, Direction::Down, ty)
}

/// `ancestors` plus `ty` itself, for members of the hierarchy.
pub(crate) fn reflexive_ancestors(hierarchy: &Hierarchy, ty: &Type) -> HashSet<Type> {
  let mut ancestors = ancestors(hierarchy, ty);
  if hierarchy.has_type(ty) {
    ancestors.insert(ty.clone());
  }
  ancestors
}

/// `descendants` plus `ty` itself, for members of the hierarchy.
pub(crate) fn reflexive_descendants(hierarchy: &Hierarchy, ty: &Type) -> HashSet<Type> {
  let mut descendants = descendants(hierarchy, ty);
  if hierarchy.has_type(ty) {
    descendants.insert(ty.clone());
  }
  descendants
}

fn closure(hierarchy: &Hierarchy, direction: Direction, ty: &Type) -> HashSet<Type> {
  let neighbours = match direction {
    Direction::Down => hierarchy.children(ty),
    Direction::Up   => hierarchy.parents(ty),
  };
  if neighbours.is_empty() {
    return HashSet::new();
  }

  let config = TraversalConfig::default().starting_at(neighbours);
  traverse(hierarchy, direction, config, |_, _| None::<()>)
      .order
      .into_iter()
      .collect()
}

/// Whether `to` can be reached from `from` in at least one step. Stops as soon as it gets there.
pub(crate) fn reaches(hierarchy: &Hierarchy, direction: Direction, from: &Type, to: &Type) -> bool {
  if !hierarchy.has_type(from) || !hierarchy.has_type(to) {
    return false;
  }
  let neighbours = match direction {
    Direction::Down => hierarchy.children(from),
    Direction::Up   => hierarchy.parents(from),
  };

  let config = TraversalConfig::default().starting_at(neighbours);
  traverse(hierarchy, direction, config, |ty, _| (ty == to).then_some(()))
      .halted()
}

/// Keeps the elements of `types` that no other element properly subsumes. Leaves `types` sorted and deduplicated.
pub fn minimize(types: &mut Vec<Type>, properly_subsumes: impl Fn(&Type, &Type) -> bool) {
  normalize(types);
  let all = types.clone();
  types.retain(|x| !all.iter().any(|y| y != x && properly_subsumes(y, x)));
}

/// Keeps the elements of `types` that properly subsume no other element. Leaves `types` sorted and deduplicated.
pub fn maximize(types: &mut Vec<Type>, properly_subsumes: impl Fn(&Type, &Type) -> bool) {
  normalize(types);
  let all = types.clone();
  types.retain(|x| !all.iter().any(|y| y != x && properly_subsumes(x, y)));
}
