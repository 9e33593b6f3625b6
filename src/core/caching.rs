/*!

A `CachingHierarchy` wraps any [`TypeOrder`] and memoizes its bound lookups in a bounded least-recently-used table.
Only graph lookups are memoized; the trivial rules, hooks and the membership guard are cheaper than a table probe.

Bounds are symmetric in their operands, so a pair is stored once under its name-ordered key. The table remembers the
generation of the hierarchy it was filled from and is emptied the moment that generation moves. Structural edits must
therefore go through `hierarchy_mut()` or `inner_mut()` (including whole-hierarchy replacement, which should use
`Hierarchy::assign`), never around them.

The wrapper changes how long answers take, never what they are.

*/

use std::{
  cell::RefCell,
  num::NonZeroUsize,
};

use lru::LruCache;

use crate::{
  api::{ty::Type, type_order::TypeOrder},
  core::hierarchy::Hierarchy,
  trace,
};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
enum Bound {
  Least,
  Greatest,
}

type MemoKey = (Bound, Type, Type);

struct Memo {
  generation: u64,
  table     : LruCache<MemoKey, Vec<Type>>,
  hits      : usize,
  misses    : usize,
}

impl Memo {
  /// Forgets everything computed for an earlier generation.
  fn refresh(&mut self, generation: u64) {
    if self.generation != generation {
      if !self.table.is_empty() {
        trace!(5, "generation {} -> {}: dropping {} memoized bounds", self.generation, generation, self.table.len());
      }
      self.table.clear();
      self.generation = generation;
    }
  }
}

pub struct CachingHierarchy<H: TypeOrder> {
  inner: H,
  memo : RefCell<Memo>,
}

impl<H: TypeOrder> CachingHierarchy<H> {
  /// Capacity comes from `AlgebraConfig::cache_capacity`.
  pub fn new(inner: H) -> Self {
    let capacity = inner.config().cache_capacity;
    CachingHierarchy::with_capacity(inner, capacity)
  }

  pub fn with_capacity(inner: H, capacity: NonZeroUsize) -> Self {
    let generation = inner.hierarchy().generation();
    CachingHierarchy {
      inner,
      memo: RefCell::new(Memo {
        generation,
        table : LruCache::new(capacity),
        hits  : 0,
        misses: 0,
      }),
    }
  }

  pub fn inner(&self) -> &H {
    &self.inner
  }

  pub fn inner_mut(&mut self) -> &mut H {
    &mut self.inner
  }

  pub fn into_inner(self) -> H {
    self.inner
  }

  pub fn hits(&self) -> usize {
    self.memo.borrow().hits
  }

  pub fn misses(&self) -> usize {
    self.memo.borrow().misses
  }

  /// Fraction of memoized lookups answered from the table, between 0 and 1.
  pub fn hit_rate(&self) -> f32 {
    let memo  = self.memo.borrow();
    let total = memo.hits + memo.misses;
    if total == 0 {
      0.0
    } else {
      memo.hits as f32 / total as f32
    }
  }

  /// Entries currently held. Entries from an earlier generation still count until the next lookup drops them.
  pub fn len(&self) -> usize {
    self.memo.borrow().table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn capacity(&self) -> NonZeroUsize {
    self.memo.borrow().table.cap()
  }

  /// Drops every entry and resets the statistics.
  pub fn clear_cache(&mut self) {
    let memo = self.memo.get_mut();
    memo.table.clear();
    memo.hits   = 0;
    memo.misses = 0;
  }

  fn memoized(&self, bound: Bound, left: &Type, right: &Type, compute: impl FnOnce() -> Vec<Type>) -> Vec<Type> {
    let key = if left <= right {
      (bound, left.clone(), right.clone())
    } else {
      (bound, right.clone(), left.clone())
    };

    {
      let mut guard = self.memo.borrow_mut();
      let memo      = &mut *guard;
      memo.refresh(self.inner.hierarchy().generation());
      if let Some(bounds) = memo.table.get(&key) {
        let bounds = bounds.clone();
        memo.hits += 1;
        return bounds;
      }
      memo.misses += 1;
    }

    let bounds = compute();
    self.memo.borrow_mut().table.put(key, bounds.clone());
    bounds
  }
}

impl<H: TypeOrder> TypeOrder for CachingHierarchy<H> {
  #[inline(always)]
  fn hierarchy(&self) -> &Hierarchy {
    self.inner.hierarchy()
  }

  #[inline(always)]
  fn hierarchy_mut(&mut self) -> &mut Hierarchy {
    self.inner.hierarchy_mut()
  }

  fn lookup_subsumes(&self, general: &Type, specific: &Type) -> bool {
    self.inner.lookup_subsumes(general, specific)
  }

  fn lookup_least_upper_bounds(&self, left: &Type, right: &Type) -> Vec<Type> {
    self.memoized(Bound::Least, left, right, || self.inner.lookup_least_upper_bounds(left, right))
  }

  fn lookup_greatest_lower_bounds(&self, left: &Type, right: &Type) -> Vec<Type> {
    self.memoized(Bound::Greatest, left, right, || self.inner.lookup_greatest_lower_bounds(left, right))
  }

  fn compiled(&self) -> bool {
    self.inner.compiled()
  }

  fn set_compiled(&mut self, compiled: bool) -> bool {
    self.inner.set_compiled(compiled)
  }

  fn compile(&self) -> bool {
    self.inner.compile()
  }
}
