/*!

Resolution of the binary operations: `subsumes`, `properly_subsumes`, their converses `extends` and
`properly_extends`, `least_upper_bounds` and `greatest_lower_bounds`.

Each operation tries a fixed chain of rules and stops at the first that gives a definite answer:

 1. trivial rules (identical operands, `Undefined`, `Top`), see `trivial`;
 2. hook dispatch: an operand carrying its own ordering logic is asked, left operand first, the right one with the
    converse question. Skipped when `AlgebraConfig::user_hooks` is off. A hook may decline;
 3. the membership guard: both operands must be types in the hierarchy, otherwise the answer is `false` or `[]`;
 4. graph lookup, through the `TypeOrder::lookup_*` methods of whatever representation is being asked.

The public functions of this module run rules 1 and 2 only, so they need no hierarchy. Everything that does need
one goes through [`TypeOrder`](crate::TypeOrder).

```
use typelattice::{resolve, AlgebraConfig, Operand, Type};

let config = AlgebraConfig::default();
assert!(resolve::subsumes(&Operand::from(Type::Undefined), &Operand::from("bat"), &config));
assert_eq!(resolve::least_upper_bounds(&"bat".into(), &Type::Top.into(), &config), vec![Type::Top]);
```

*/

pub(crate) mod lattice;
pub(crate) mod lookup;
pub(crate) mod sorting;
pub(crate) mod trivial;
#[cfg(test)]
mod tests;

use crate::{
  api::{
    config::AlgebraConfig,
    operand::{HookAnswer, Operand, Operation},
    ty::{normalize, Type},
    type_order::TypeOrder,
  },
  trace,
};

pub use crate::core::closure::{maximize, minimize};

/// Decides `subsumes` from the operands alone. Undecided cases answer `false`.
pub fn subsumes(general: &Operand, specific: &Operand, config: &AlgebraConfig) -> bool {
  decide_relation(Operation::Subsumes, general, specific, config).unwrap_or(false)
}

pub fn properly_subsumes(general: &Operand, specific: &Operand, config: &AlgebraConfig) -> bool {
  decide_relation(Operation::ProperlySubsumes, general, specific, config).unwrap_or(false)
}

pub fn extends(specific: &Operand, general: &Operand, config: &AlgebraConfig) -> bool {
  decide_relation(Operation::Extends, specific, general, config).unwrap_or(false)
}

pub fn properly_extends(specific: &Operand, general: &Operand, config: &AlgebraConfig) -> bool {
  decide_relation(Operation::ProperlyExtends, specific, general, config).unwrap_or(false)
}

/// Decides `least_upper_bounds` from the operands alone. Undecided cases answer `[]`.
pub fn least_upper_bounds(left: &Operand, right: &Operand, config: &AlgebraConfig) -> Vec<Type> {
  decide_bounds(Operation::LeastUpperBounds, left, right, config).unwrap_or_default()
}

pub fn greatest_lower_bounds(left: &Operand, right: &Operand, config: &AlgebraConfig) -> Vec<Type> {
  decide_bounds(Operation::GreatestLowerBounds, left, right, config).unwrap_or_default()
}

/// The full chain for a relation.
pub(crate) fn resolve_relation<H: TypeOrder + ?Sized>(
  order    : &H,
  operation: Operation,
  left     : &Operand,
  right    : &Operand,
  config   : &AlgebraConfig,
) -> bool {
  if let Some(answer) = decide_relation(operation, left, right, config) {
    return answer;
  }

  let (Some(left), Some(right)) = (left.as_type(), right.as_type()) else {
    return false;
  };
  if !order.has_type(left) || !order.has_type(right) {
    return false;
  }
  match operation {
    Operation::Subsumes         => order.lookup_subsumes(left, right),
    Operation::ProperlySubsumes => left != right && order.lookup_subsumes(left, right),
    Operation::Extends          => order.lookup_subsumes(right, left),
    Operation::ProperlyExtends  => left != right && order.lookup_subsumes(right, left),
    _ => false,
  }
}

/// The full chain for a bound.
pub(crate) fn resolve_bounds<H: TypeOrder + ?Sized>(
  order    : &H,
  operation: Operation,
  left     : &Operand,
  right    : &Operand,
  config   : &AlgebraConfig,
) -> Vec<Type> {
  if let Some(bounds) = decide_bounds(operation, left, right, config) {
    return bounds;
  }

  let (Some(left), Some(right)) = (left.as_type(), right.as_type()) else {
    return Vec::new();
  };
  if !order.has_type(left) || !order.has_type(right) {
    return Vec::new();
  }
  match operation {
    Operation::LeastUpperBounds    => order.lookup_least_upper_bounds(left, right),
    Operation::GreatestLowerBounds => order.lookup_greatest_lower_bounds(left, right),
    _ => Vec::new(),
  }
}

/// Rules 1 and 2 for relations.
fn decide_relation(operation: Operation, left: &Operand, right: &Operand, config: &AlgebraConfig) -> Option<bool> {
  if let Some(answer) = trivial::relation(operation, left, right) {
    return Some(answer);
  }

  let answer = ask_hooks(operation, left, right, config, |answer| {
    match answer {
      HookAnswer::Relation(answer) => Some(answer),
      HookAnswer::Bounds(_)        => None,
    }
  });
  if let Some(answer) = answer {
    trace!(5, "{} of {:?} and {:?} answered by a hook: {}", operation.name(), left, right, answer);
  }
  answer
}

/// Rules 1 and 2 for bounds.
fn decide_bounds(
  operation: Operation,
  left     : &Operand,
  right    : &Operand,
  config   : &AlgebraConfig
) -> Option<Vec<Type>> {
  if let Some(bounds) = trivial::bounds(operation, left, right) {
    return Some(bounds);
  }

  ask_hooks(operation, left, right, config, |answer| {
    match answer {
      HookAnswer::Bounds(mut bounds) => {
        normalize(&mut bounds);
        Some(bounds)
      }
      HookAnswer::Relation(_) => None,
    }
  })
}

/// Asks the left operand, then the right one with the converse operation. An answer `accept` rejects counts as
/// declining.
fn ask_hooks<T>(
  operation: Operation,
  left     : &Operand,
  right    : &Operand,
  config   : &AlgebraConfig,
  accept   : impl Fn(HookAnswer) -> Option<T>,
) -> Option<T> {
  if !config.user_hooks || !(left.is_hook() || right.is_hook()) {
    return None;
  }
  left.ask(operation, right)
      .and_then(&accept)
      .or_else(|| right.ask(operation.converse(), left).and_then(&accept))
}
