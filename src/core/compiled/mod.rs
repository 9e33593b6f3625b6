/*!

A `CompiledHierarchy` answers graph lookups from precomputed ancestor and descendant bit-vectors instead of walking
the hierarchy. It owns its `Hierarchy`; edits go through `hierarchy_mut()` and the compiled state is rebuilt lazily,
on the first lookup after the hierarchy's generation has moved. Answers are identical to those of the plain hierarchy.

```
use typelattice::{CompiledHierarchy, Hierarchy, Type, TypeOrder};

let mut zoo = Hierarchy::default();
zoo.add("animal", ["BOTTOM"]).add("bird", ["animal"]).add("mammal", ["animal"]);

let mut compiled = CompiledHierarchy::new(zoo);
assert!(compiled.subsumes(&Type::from("animal"), &Type::from("bird")));

compiled.hierarchy_mut().add("bat", ["bird", "mammal"]);
assert_eq!(compiled.lub(&Type::from("bird"), &Type::from("mammal")), vec![Type::from("bat")]);
assert_eq!(compiled.compiled_width(), 32);
```

## Masks

`CompiledHierarchy::masked` restricts the vectors to one type and its descendants. Lookups with an operand outside
the mask fall back to walking the graph, and so do all greatest-lower-bound lookups, since ancestor sets leave the
mask.

*/

mod compiled_state;

use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  sync::Arc,
};

use crate::{
  api::{
    ty::{Type, TypeName},
    type_order::TypeOrder,
  },
  core::{algebra::lookup, hierarchy::Hierarchy},
  debug,
};

use compiled_state::CompiledState;

#[derive(Clone)]
pub struct CompiledHierarchy {
  hierarchy: Hierarchy,
  scope    : Option<Type>,
  enabled  : bool,
  state    : RefCell<Option<Arc<CompiledState>>>,
}

impl CompiledHierarchy {
  pub fn new(hierarchy: Hierarchy) -> CompiledHierarchy {
    CompiledHierarchy {
      hierarchy,
      scope  : None,
      enabled: true,
      state  : RefCell::new(None),
    }
  }

  /// Compiles only `scope` and its descendants.
  pub fn masked(hierarchy: Hierarchy, scope: impl Into<TypeName>) -> CompiledHierarchy {
    CompiledHierarchy {
      scope: Some(Type::Named(scope.into())),
      ..CompiledHierarchy::new(hierarchy)
    }
  }

  pub fn scope(&self) -> Option<&Type> {
    self.scope.as_ref()
  }

  pub fn into_inner(self) -> Hierarchy {
    self.hierarchy
  }

  /// The bit-vector width of the current compiled state, compiling first if needed. Zero when compilation is off.
  pub fn compiled_width(&self) -> usize {
    self.state().map_or(0, |state| state.width())
  }

  /// The compiled state for the current generation, or `None` when compilation is switched off.
  fn state(&self) -> Option<Arc<CompiledState>> {
    if !self.enabled {
      return None;
    }

    let mut slot  = self.state.borrow_mut();
    let current   = self.hierarchy.generation();
    let stale     = slot.as_ref().map_or(true, |state| state.generation() != current);
    if stale {
      let state = CompiledState::build(&self.hierarchy, self.scope.as_ref());
      debug!(
        4,
        "compiled generation {} of {}: {} bits per vector",
        current,
        self.hierarchy.root(),
        state.width()
      );
      *slot = Some(Arc::new(state));
    }
    slot.clone()
  }

  /// Indices of both operands, when both are inside the mask.
  fn indices(&self, left: &Type, right: &Type) -> Option<(Arc<CompiledState>, usize, usize)> {
    let state = self.state()?;
    let left  = state.index_of(left)?;
    let right = state.index_of(right)?;
    Some((state, left, right))
  }
}

impl From<Hierarchy> for CompiledHierarchy {
  fn from(hierarchy: Hierarchy) -> Self {
    CompiledHierarchy::new(hierarchy)
  }
}

impl TypeOrder for CompiledHierarchy {
  #[inline(always)]
  fn hierarchy(&self) -> &Hierarchy {
    &self.hierarchy
  }

  #[inline(always)]
  fn hierarchy_mut(&mut self) -> &mut Hierarchy {
    &mut self.hierarchy
  }

  fn lookup_subsumes(&self, general: &Type, specific: &Type) -> bool {
    match self.indices(general, specific) {
      Some((state, general, specific)) => state.subsumes(general, specific),
      None => lookup::subsumes(&self.hierarchy, general, specific),
    }
  }

  fn lookup_least_upper_bounds(&self, left: &Type, right: &Type) -> Vec<Type> {
    match self.indices(left, right) {
      Some((state, left, right)) => state.least_upper_bounds(left, right),
      None => lookup::least_upper_bounds(&self.hierarchy, left, right),
    }
  }

  fn lookup_greatest_lower_bounds(&self, left: &Type, right: &Type) -> Vec<Type> {
    if self.scope().is_some() {
      return lookup::greatest_lower_bounds(&self.hierarchy, left, right);
    }
    match self.indices(left, right) {
      Some((state, left, right)) => state.greatest_lower_bounds(left, right),
      None => lookup::greatest_lower_bounds(&self.hierarchy, left, right),
    }
  }

  fn compiled(&self) -> bool {
    self.enabled
  }

  fn set_compiled(&mut self, compiled: bool) -> bool {
    self.enabled = compiled;
    if !compiled {
      *self.state.get_mut() = None;
    }
    self.enabled
  }

  fn compile(&self) -> bool {
    self.state().is_some()
  }
}

impl Debug for CompiledHierarchy {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let compiled_generation = self.state.borrow().as_ref().map(|state| state.generation());
    writeln!(
      f,
      "CompiledHierarchy {{ enabled: {}, scope: {:?}, compiled generation: {:?} }}",
      self.enabled,
      self.scope(),
      compiled_generation
    )?;
    Debug::fmt(&self.hierarchy, f)
  }
}
