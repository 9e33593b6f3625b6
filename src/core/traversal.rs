/*!

The one graph walk everything else is built from. `leaves`, `ancestors`, `descendants`, reachability and `stratasort`
are all calls to [`traverse`] with different options.

A walk goes either down the hierarchy (following child edges, starting from the root by default) or up (following
parent edges, starting from the leaves by default). Each type is visited at most once: the walk keeps a visited set,
which the caller may supply to share it between walks. Successors are visited in name order, so walks are
reproducible.

The callback sees each visited type with a [`Step`] and may halt the walk by returning `Some`. That value becomes
`Walk::result`.

## Stratified walks

With `TraversalFlag::Stratify` the walk emits types level by level, where a type's level is the length of the longest
path to it from the start set. A type is therefore visited only after every one of its predecessors reachable from
the start set, and no two types in the same level are related. A cycle stalls this ordering; when it does, every type
still waiting is emitted as one final level.

*/

use std::collections::VecDeque;

use enumflags2::{bitflags, BitFlags};

use crate::{
  abstractions::{HashMap, HashSet},
  api::ty::Type,
  core::hierarchy::Hierarchy,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
  /// From general to specific, along child edges.
  Down,
  /// From specific to general, along parent edges.
  Up,
}

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TraversalFlag {
  /// Record, for every visited type, the visited types that have an edge to it.
  TrackPredecessors,
  /// Visit in longest-path levels.
  Stratify,
}

pub type TraversalFlags = BitFlags<TraversalFlag, u8>;

#[derive(Default)]
pub struct TraversalConfig<'v> {
  /// Where the walk begins. Defaults to the root for `Down` and to the leaves for `Up`.
  pub start  : Option<Vec<Type>>,
  /// Types already processed. Supplying a set lets several walks share it; the walk adds what it visits.
  pub visited: Option<&'v mut HashSet<Type>>,
  /// Types skipped entirely, as if they were not in the hierarchy.
  pub ignore : HashSet<Type>,
  pub flags  : TraversalFlags,
}

impl<'v> TraversalConfig<'v> {
  pub fn starting_at(mut self, start: impl IntoIterator<Item = Type>) -> Self {
    self.start = Some(start.into_iter().collect());
    self
  }

  pub fn with_visited(mut self, visited: &'v mut HashSet<Type>) -> Self {
    self.visited = Some(visited);
    self
  }

  pub fn ignoring(mut self, ignore: impl IntoIterator<Item = Type>) -> Self {
    self.ignore.extend(ignore);
    self
  }

  pub fn with_flags(mut self, flags: impl Into<TraversalFlags>) -> Self {
    self.flags |= flags.into();
    self
  }
}

/// What the callback learns about the type being visited.
pub struct Step<'w> {
  /// Breadth-first distance from the start set, or the level index in a stratified walk.
  pub depth       : usize,
  /// The visited types with an edge to this one. `None` unless `TrackPredecessors` is set.
  pub predecessors: Option<&'w HashSet<Type>>,
}

pub struct Walk<R> {
  /// The value the callback halted with, if it did.
  pub result      : Option<R>,
  /// Every visited type, in visiting order.
  pub order       : Vec<Type>,
  /// The levels of a stratified walk; empty otherwise.
  pub strata      : Vec<Vec<Type>>,
  /// Populated only with `TrackPredecessors`.
  pub predecessors: HashMap<Type, HashSet<Type>>,
}

impl<R> Walk<R> {
  fn new() -> Self {
    Walk {
      result      : None,
      order       : Vec::new(),
      strata      : Vec::new(),
      predecessors: HashMap::new(),
    }
  }

  #[inline(always)]
  pub fn halted(&self) -> bool {
    self.result.is_some()
  }
}

pub fn traverse<R>(
  hierarchy: &Hierarchy,
  direction: Direction,
  mut config: TraversalConfig<'_>,
  mut visit: impl FnMut(&Type, &Step<'_>) -> Option<R>,
) -> Walk<R> {
  let ignore = std::mem::take(&mut config.ignore);
  let track  = config.flags.contains(TraversalFlag::TrackPredecessors);

  let start = match config.start.take() {
    Some(start) => start,
    None => {
      match direction {
        Direction::Down => vec![hierarchy.root().clone()],
        Direction::Up   => hierarchy.leaves(),
      }
    }
  };

  let mut local_visited = HashSet::new();
  let visited: &mut HashSet<Type> = match config.visited.take() {
    Some(visited) => visited,
    None          => &mut local_visited,
  };

  let mut seeds = Vec::with_capacity(start.len());
  for ty in start {
    if hierarchy.has_type(&ty) && !ignore.contains(&ty) && !visited.contains(&ty) && !seeds.contains(&ty) {
      seeds.push(ty);
    }
  }

  let successors = |ty: &Type| -> Vec<Type> {
    let set = match direction {
      Direction::Down => hierarchy.child_set(ty),
      Direction::Up   => hierarchy.parent_set(ty),
    };
    let mut next: Vec<Type> =
        set.into_iter()
           .flatten()
           .filter(|ty| !ignore.contains(*ty))
           .cloned()
           .collect();
    next.sort();
    next
  };

  if config.flags.contains(TraversalFlag::Stratify) {
    stratified(seeds, visited, track, successors, &mut visit)
  } else {
    breadth_first(seeds, visited, track, successors, &mut visit)
  }
}

fn breadth_first<R>(
  seeds     : Vec<Type>,
  visited   : &mut HashSet<Type>,
  track     : bool,
  successors: impl Fn(&Type) -> Vec<Type>,
  visit     : &mut impl FnMut(&Type, &Step<'_>) -> Option<R>,
) -> Walk<R> {
  let mut walk  = Walk::new();
  let mut queue = VecDeque::new();

  for ty in seeds {
    visited.insert(ty.clone());
    queue.push_back((ty, 0usize));
  }

  while let Some((ty, depth)) = queue.pop_front() {
    walk.order.push(ty.clone());

    let step = Step {
      depth,
      predecessors: if track { walk.predecessors.get(&ty) } else { None },
    };
    if let Some(result) = visit(&ty, &step) {
      walk.result = Some(result);
      break;
    }

    for next in successors(&ty) {
      if track {
        walk.predecessors.entry(next.clone()).or_default().insert(ty.clone());
      }
      if visited.insert(next.clone()) {
        queue.push_back((next, depth + 1));
      }
    }
  }

  walk
}

fn stratified<R>(
  seeds     : Vec<Type>,
  visited   : &mut HashSet<Type>,
  track     : bool,
  successors: impl Fn(&Type) -> Vec<Type>,
  visit     : &mut impl FnMut(&Type, &Step<'_>) -> Option<R>,
) -> Walk<R> {
  let mut walk = Walk::new();

  // Everything this walk will visit.
  let mut reachable: HashSet<Type> = seeds.iter().cloned().collect();
  let mut frontier = seeds.clone();
  while let Some(ty) = frontier.pop() {
    for next in successors(&ty) {
      if !visited.contains(&next) && reachable.insert(next.clone()) {
        frontier.push(next);
      }
    }
  }

  // The number of edges into each type from inside the walk.
  let mut pending: HashMap<Type, usize> = reachable.iter().map(|ty| (ty.clone(), 0)).collect();
  for ty in reachable.iter() {
    for next in successors(ty) {
      if let Some(count) = pending.get_mut(&next) {
        *count += 1;
      }
    }
  }

  let mut level: Vec<Type> =
      pending
          .iter()
          .filter(|(_, &count)| count == 0)
          .map(|(ty, _)| ty.clone())
          .collect();
  level.sort();

  let mut depth = 0;
  while !pending.is_empty() {
    if level.is_empty() {
      // Only cycles are left.
      level = pending.keys().cloned().collect();
      level.sort();
    }
    for ty in level.iter() {
      pending.remove(ty);
    }

    let mut emitted = Vec::with_capacity(level.len());
    for ty in level.iter() {
      visited.insert(ty.clone());
      walk.order.push(ty.clone());
      emitted.push(ty.clone());

      let step = Step {
        depth,
        predecessors: if track { walk.predecessors.get(ty) } else { None },
      };
      if let Some(result) = visit(ty, &step) {
        walk.result = Some(result);
        walk.strata.push(emitted);
        return walk;
      }
    }
    walk.strata.push(emitted);

    let mut next_level = Vec::new();
    for ty in level.iter() {
      for next in successors(ty) {
        if !reachable.contains(&next) {
          continue;
        }
        if track {
          walk.predecessors.entry(next.clone()).or_default().insert(ty.clone());
        }
        if let Some(count) = pending.get_mut(&next) {
          *count -= 1;
          if *count == 0 {
            next_level.push(next);
          }
        }
      }
    }
    next_level.sort();
    level = next_level;
    depth += 1;
  }

  walk
}
