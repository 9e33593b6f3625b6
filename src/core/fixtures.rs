/*!

Hierarchies shared by the test suites.

*/

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{api::ty::Type, core::hierarchy::Hierarchy};

/// BOTTOM > animal > {bird, mammal} > bat
pub(crate) fn zoo() -> Hierarchy {
  let mut hierarchy = Hierarchy::default();
  hierarchy
      .add("animal", ["BOTTOM"])
      .add("bird", ["animal"])
      .add("mammal", ["animal"])
      .add("bat", ["bird", "mammal"]);
  hierarchy
}

/// `zoo` plus a second common descendant of `bird` and `mammal`, incomparable with `bat`.
pub(crate) fn ambiguous_zoo() -> Hierarchy {
  let mut hierarchy = zoo();
  hierarchy.add("platypus", ["bird", "mammal"]);
  hierarchy
}

pub(crate) fn ty(name: &str) -> Type {
  Type::from(name)
}

pub(crate) fn types(names: &[&str]) -> Vec<Type> {
  names.iter().map(|name| Type::from(*name)).collect()
}

/// An acyclic hierarchy of `size` types `t0`, `t1`, ... Each type gets up to three parents among the types created
/// before it, so multiple inheritance, and with it non-unique bounds, is common.
pub(crate) fn random_hierarchy(seed: u64, size: usize) -> Hierarchy {
  let mut rng       = StdRng::seed_from_u64(seed);
  let mut hierarchy = Hierarchy::new("root");

  for i in 0..size {
    let parent_count = if i == 0 { 0 } else { rng.gen_range(0..=3.min(i)) };
    let parents: Vec<String> = (0..parent_count).map(|_| format!("t{}", rng.gen_range(0..i))).collect();
    hierarchy.add(format!("t{}", i), parents);
  }

  hierarchy
}

/// Applies `count` random structural edits: moves, extra parents, removals and fresh types.
pub(crate) fn mutate(hierarchy: &mut Hierarchy, seed: u64, count: usize) {
  let mut rng = StdRng::seed_from_u64(seed);

  for step in 0..count {
    let types: Vec<Type> = hierarchy.types().into_iter().filter(|ty| !hierarchy.is_root(ty)).collect();
    if types.is_empty() {
      hierarchy.add(format!("fresh{}", step), Vec::<String>::new());
      continue;
    }
    let pick = |rng: &mut StdRng| types[rng.gen_range(0..types.len())].to_string();

    match rng.gen_range(0..4) {
      0 => {
        let name   = pick(&mut rng);
        let parent = pick(&mut rng);
        hierarchy.move_type(name, [parent]);
      }
      1 => {
        let name   = pick(&mut rng);
        let parent = pick(&mut rng);
        hierarchy.add_parents(name, [parent]);
      }
      2 => {
        let name = pick(&mut rng);
        hierarchy.remove([name]);
      }
      _ => {
        let parent = pick(&mut rng);
        hierarchy.add(format!("fresh{}", step), [parent]);
      }
    }
  }
}
