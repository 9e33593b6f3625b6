/*!

A finite partial order over named types, rooted at its most general type, with the algebra that goes with it:
subsumption, least upper and greatest lower bounds, n-ary joins and meets, and sorting by generality.

```
use typelattice::{Hierarchy, Type, TypeOrder};

let mut zoo = Hierarchy::default();
zoo.add("animal", ["BOTTOM"])
   .add("bird", ["animal"])
   .add("mammal", ["animal"])
   .add("bat", ["bird", "mammal"]);

let (bird, mammal) = (Type::from("bird"), Type::from("mammal"));
assert_eq!(zoo.least_upper_bounds(&bird, &mammal), vec![Type::from("bat")]);
assert_eq!(zoo.greatest_lower_bounds(&bird, &mammal), vec![Type::from("animal")]);
assert!(zoo.is_deterministic());
```

A [`Hierarchy`] answers by walking its graph. A [`CompiledHierarchy`] answers the same questions from bit-vectors
and a [`CachingHierarchy`] memoizes bound lookups of any of them; all three implement [`TypeOrder`] and agree on
every answer.

*/

pub mod abstractions;
pub mod api;
mod core;

// We re-export abstractions that are meant to be used publicly.
pub use abstractions::{
  log,
  IString
};

pub use api::{
  global_config,
  set_global_config,
  update_global_config,
  AlgebraConfig,
  HookAnswer,
  Operand,
  Operation,
  OrderHook,
  Sentinels,
  Type,
  TypeName,
  TypeOrder,
  Verbosity,
};

pub use crate::core::{
  caching::CachingHierarchy,
  compiled::CompiledHierarchy,
  hierarchy::{AttributeValue, Attributes, Hierarchy, MergeError, DEFAULT_ROOT},
  traversal::{traverse, Direction, Step, TraversalConfig, TraversalFlag, TraversalFlags, Walk},
};

/// Instance-free resolution of the binary operations, and hull reduction.
pub use crate::core::algebra as resolve;
