/*!

Graph lookup, the last resolution rule, answered directly from the parent and child maps. Callers have already checked
that both operands are members.

The least upper bounds of two types are the most general types subsumed by both, that is, the hull of the
intersection of their reflexive descendant sets. The greatest lower bounds are the most specific types subsuming both.

*/

use crate::{
  abstractions::{HashMap, HashSet},
  api::ty::Type,
  core::{
    closure::{self, maximize, minimize},
    hierarchy::Hierarchy,
    traversal::Direction,
  },
};

pub(crate) fn subsumes(hierarchy: &Hierarchy, general: &Type, specific: &Type) -> bool {
  general == specific || closure::reaches(hierarchy, Direction::Down, general, specific)
}

pub(crate) fn least_upper_bounds(hierarchy: &Hierarchy, left: &Type, right: &Type) -> Vec<Type> {
  let below_left  = closure::reflexive_descendants(hierarchy, left);
  let below_right = closure::reflexive_descendants(hierarchy, right);
  let mut candidates: Vec<Type> = below_left.intersection(&below_right).cloned().collect();

  let below: HashMap<Type, HashSet<Type>> =
      candidates
          .iter()
          .map(|ty| (ty.clone(), closure::descendants(hierarchy, ty)))
          .collect();
  minimize(&mut candidates, |general, specific| {
    below.get(general).is_some_and(|descendants| descendants.contains(specific))
  });
  candidates
}

pub(crate) fn greatest_lower_bounds(hierarchy: &Hierarchy, left: &Type, right: &Type) -> Vec<Type> {
  let above_left  = closure::reflexive_ancestors(hierarchy, left);
  let above_right = closure::reflexive_ancestors(hierarchy, right);
  let mut candidates: Vec<Type> = above_left.intersection(&above_right).cloned().collect();

  let above: HashMap<Type, HashSet<Type>> =
      candidates
          .iter()
          .map(|ty| (ty.clone(), closure::ancestors(hierarchy, ty)))
          .collect();
  maximize(&mut candidates, |general, specific| {
    above.get(specific).is_some_and(|ancestors| ancestors.contains(general))
  });
  candidates
}
