/*!

Operands of the binary algebra operations.

An operand is usually just a [`Type`]. It may instead carry its own ordering logic, in which case the algebra asks the
operand before it looks at any hierarchy (provided `AlgebraConfig::user_hooks` is on). There are two ways to carry
logic:

 - `Operand::Predicate` wraps a closure that receives the [`Operation`] being resolved and the other operand;
 - `Operand::Object` wraps a value implementing [`OrderHook`], which has one method per operation.

Either may decline by answering `None`, and resolution continues with the next rule. When the hook operand is on the
right-hand side it is asked the converse question: `subsumes(t, hook)` asks the hook whether it `extends(t)`.

Hook results are plain `Type`s. A hook can reason about anything it likes, but what it reports back are members of the
type vocabulary.

*/

use std::{
  fmt::{Debug, Formatter},
  rc::Rc,
};

use crate::api::ty::Type;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operation {
  Subsumes,
  ProperlySubsumes,
  Extends,
  ProperlyExtends,
  LeastUpperBounds,
  GreatestLowerBounds,
}

impl Operation {
  /// The same question asked from the other operand's point of view.
  pub fn converse(self) -> Operation {
    match self {
      Operation::Subsumes            => Operation::Extends,
      Operation::ProperlySubsumes    => Operation::ProperlyExtends,
      Operation::Extends             => Operation::Subsumes,
      Operation::ProperlyExtends     => Operation::ProperlySubsumes,
      Operation::LeastUpperBounds    => Operation::LeastUpperBounds,
      Operation::GreatestLowerBounds => Operation::GreatestLowerBounds,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Operation::Subsumes            => "subsumes",
      Operation::ProperlySubsumes    => "properly_subsumes",
      Operation::Extends             => "extends",
      Operation::ProperlyExtends     => "properly_extends",
      Operation::LeastUpperBounds    => "least_upper_bounds",
      Operation::GreatestLowerBounds => "greatest_lower_bounds",
    }
  }
}

/// What a predicate hook answers. Relation operations expect `Relation`, bound operations expect `Bounds`; an answer
/// of the wrong shape counts as declining.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum HookAnswer {
  Relation(bool),
  Bounds(Vec<Type>),
}

pub type PredicateFn = dyn Fn(Operation, &Operand) -> Option<HookAnswer>;

/// Per-operand ordering logic. Every method defaults to declining.
pub trait OrderHook {
  fn subsumes(&self, _other: &Operand) -> Option<bool> {
    None
  }

  fn properly_subsumes(&self, _other: &Operand) -> Option<bool> {
    None
  }

  fn extends(&self, _other: &Operand) -> Option<bool> {
    None
  }

  fn properly_extends(&self, _other: &Operand) -> Option<bool> {
    None
  }

  fn least_upper_bounds(&self, _other: &Operand) -> Option<Vec<Type>> {
    None
  }

  fn greatest_lower_bounds(&self, _other: &Operand) -> Option<Vec<Type>> {
    None
  }

  /// Used in diagnostics.
  fn describe(&self) -> String {
    "<hook>".to_string()
  }
}

#[derive(Clone)]
pub enum Operand {
  Type(Type),
  Predicate(Rc<PredicateFn>),
  Object(Rc<dyn OrderHook>),
}

impl Operand {
  pub fn predicate(predicate: impl Fn(Operation, &Operand) -> Option<HookAnswer> + 'static) -> Operand {
    Operand::Predicate(Rc::new(predicate))
  }

  pub fn object(hook: impl OrderHook + 'static) -> Operand {
    Operand::Object(Rc::new(hook))
  }

  pub fn as_type(&self) -> Option<&Type> {
    match self {
      Operand::Type(ty) => Some(ty),
      _ => None,
    }
  }

  #[inline(always)]
  pub fn is_hook(&self) -> bool {
    !matches!(self, Operand::Type(_))
  }

  /// Identity: equal types, or the very same hook.
  pub fn is_identical(&self, other: &Operand) -> bool {
    match (self, other) {
      (Operand::Type(left), Operand::Type(right))           => left == right,
      (Operand::Predicate(left), Operand::Predicate(right)) => Rc::ptr_eq(left, right),
      (Operand::Object(left), Operand::Object(right))       => Rc::ptr_eq(left, right),
      _ => false,
    }
  }

  /// Puts `operation` to this operand with `other` as the argument. Plain types have no opinion.
  pub(crate) fn ask(&self, operation: Operation, other: &Operand) -> Option<HookAnswer> {
    match self {
      Operand::Type(_) => None,

      Operand::Predicate(predicate) => predicate(operation, other),

      Operand::Object(hook) => {
        match operation {
          Operation::Subsumes            => hook.subsumes(other).map(HookAnswer::Relation),
          Operation::ProperlySubsumes    => hook.properly_subsumes(other).map(HookAnswer::Relation),
          Operation::Extends             => hook.extends(other).map(HookAnswer::Relation),
          Operation::ProperlyExtends     => hook.properly_extends(other).map(HookAnswer::Relation),
          Operation::LeastUpperBounds    => hook.least_upper_bounds(other).map(HookAnswer::Bounds),
          Operation::GreatestLowerBounds => hook.greatest_lower_bounds(other).map(HookAnswer::Bounds),
        }
      }
    }
  }
}

impl From<Type> for Operand {
  fn from(ty: Type) -> Self {
    Operand::Type(ty)
  }
}

impl From<&Type> for Operand {
  fn from(ty: &Type) -> Self {
    Operand::Type(ty.clone())
  }
}

impl From<&str> for Operand {
  fn from(name: &str) -> Self {
    Operand::Type(Type::from(name))
  }
}

impl Debug for Operand {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Operand::Type(ty)     => write!(f, "{}", ty),
      Operand::Predicate(_) => write!(f, "<predicate>"),
      Operand::Object(hook) => write!(f, "{}", hook.describe()),
    }
  }
}
