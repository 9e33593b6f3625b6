/*!

Rules that decide an operation without looking at any hierarchy: identical operands and the two reserved values.

`Undefined` is the most general value and `Top` the most specific. Hence

| operation              | `Undefined`, `t`  | `Top`, `t`         | `t`, `t` |
|:-----------------------|:------------------|:-------------------|:---------|
| `subsumes(_, t)`       | `true`            | `t == Top`         | `true`   |
| `subsumes(t, _)`       | `t == Undefined`  | `true`             | `true`   |
| `least_upper_bounds`   | `[t]`             | `[Top]`            | `[t]`    |
| `greatest_lower_bounds`| `[Undefined]`     | `[t]`              | `[t]`    |

Everything returns `None` when the rules do not apply.

*/

use crate::api::{
  operand::{Operand, Operation},
  ty::Type,
};

pub(crate) fn subsumes(general: &Type, specific: &Type) -> Option<bool> {
  if general == specific {
    return Some(true);
  }
  match (general, specific) {
    (Type::Undefined, _) => Some(true),
    (_, Type::Undefined) => Some(false),
    (_, Type::Top)       => Some(true),
    (Type::Top, _)       => Some(false),
    _ => None,
  }
}

pub(crate) fn properly_subsumes(general: &Type, specific: &Type) -> Option<bool> {
  if general == specific {
    return Some(false);
  }
  subsumes(general, specific)
}

pub(crate) fn least_upper_bounds(left: &Type, right: &Type) -> Option<Vec<Type>> {
  if left == right {
    return Some(vec![left.clone()]);
  }
  match (left, right) {
    (Type::Top, _) | (_, Type::Top)             => Some(vec![Type::Top]),
    (Type::Undefined, t) | (t, Type::Undefined) => Some(vec![t.clone()]),
    _ => None,
  }
}

pub(crate) fn greatest_lower_bounds(left: &Type, right: &Type) -> Option<Vec<Type>> {
  if left == right {
    return Some(vec![left.clone()]);
  }
  match (left, right) {
    (Type::Undefined, _) | (_, Type::Undefined) => Some(vec![Type::Undefined]),
    (Type::Top, t) | (t, Type::Top)             => Some(vec![t.clone()]),
    _ => None,
  }
}

/// The relation rules lifted to operands. A hook operand is identical only to itself, and the reserved values relate
/// to hooks the same way they relate to types.
pub(crate) fn relation(operation: Operation, left: &Operand, right: &Operand) -> Option<bool> {
  let (general, specific) = match operation {
    Operation::Subsumes | Operation::ProperlySubsumes => (left, right),
    Operation::Extends | Operation::ProperlyExtends   => (right, left),
    _ => return None,
  };
  let proper = matches!(operation, Operation::ProperlySubsumes | Operation::ProperlyExtends);

  if let (Some(general), Some(specific)) = (general.as_type(), specific.as_type()) {
    return if proper { properly_subsumes(general, specific) } else { subsumes(general, specific) };
  }

  if general.is_identical(specific) {
    return Some(!proper);
  }
  match (general.as_type(), specific.as_type()) {
    (Some(Type::Undefined), _) => Some(true),
    (_, Some(Type::Undefined)) => Some(false),
    (_, Some(Type::Top))       => Some(true),
    (Some(Type::Top), _)       => Some(false),
    _ => None,
  }
}

/// The bound rules lifted to operands. With a hook involved only the absorbing values are decided: a join with `Top`
/// and a meet with `Undefined`.
pub(crate) fn bounds(operation: Operation, left: &Operand, right: &Operand) -> Option<Vec<Type>> {
  if let (Some(left), Some(right)) = (left.as_type(), right.as_type()) {
    return match operation {
      Operation::LeastUpperBounds    => least_upper_bounds(left, right),
      Operation::GreatestLowerBounds => greatest_lower_bounds(left, right),
      _ => None,
    };
  }

  let either = |ty: &Type| left.as_type() == Some(ty) || right.as_type() == Some(ty);
  match operation {
    Operation::LeastUpperBounds if either(&Type::Top)          => Some(vec![Type::Top]),
    Operation::GreatestLowerBounds if either(&Type::Undefined) => Some(vec![Type::Undefined]),
    _ => None,
  }
}
