/*!

A `Type` names a node of a hierarchy, or is one of the two reserved values that sit outside every hierarchy:

 - `Type::Undefined` carries no information at all. It subsumes every value and is subsumed only by itself. Joining
   with it is the identity; meeting with it gives it back.
 - `Type::Top` marks an inconsistency, the result of a join that has no solution. It is subsumed by every value and
   subsumes only itself.

Neither reserved value can be inserted into a hierarchy: the mutation API takes names, never `Type`s. How the reserved
values are spelled in text is configurable, see [`Sentinels`](crate::api::config::Sentinels).

*/

use std::{
  cmp::Ordering,
  fmt::{Debug, Display, Formatter},
};

use crate::{abstractions::IString, api::config::global_config};

/// Names are interned strings.
pub type TypeName = IString;

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Type {
  Undefined,
  Top,
  Named(TypeName),
}

impl Type {
  pub fn named(name: impl Into<TypeName>) -> Type {
    Type::Named(name.into())
  }

  #[inline(always)]
  pub fn is_top(&self) -> bool {
    matches!(self, Type::Top)
  }

  #[inline(always)]
  pub fn is_undefined(&self) -> bool {
    matches!(self, Type::Undefined)
  }

  /// Either reserved value.
  #[inline(always)]
  pub fn is_sentinel(&self) -> bool {
    !matches!(self, Type::Named(_))
  }

  pub fn name(&self) -> Option<&TypeName> {
    match self {
      Type::Named(name) => Some(name),
      _ => None,
    }
  }
}

/// Sentinels order before names, `Undefined` first; names order lexicographically. This is only a presentation order
/// used to make results reproducible. It has nothing to do with subsumption.
impl Ord for Type {
  fn cmp(&self, other: &Self) -> Ordering {
    match (self, other) {
      (Type::Named(left), Type::Named(right)) => (**left).cmp(&**right),
      _ => self.rank().cmp(&other.rank()),
    }
  }
}

impl PartialOrd for Type {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Type {
  fn rank(&self) -> u8 {
    match self {
      Type::Undefined => 0,
      Type::Top       => 1,
      Type::Named(_)  => 2,
    }
  }
}

impl From<&str> for Type {
  fn from(name: &str) -> Self {
    Type::Named(TypeName::from(name))
  }
}

impl From<String> for Type {
  fn from(name: String) -> Self {
    Type::Named(TypeName::from(name))
  }
}

impl From<TypeName> for Type {
  fn from(name: TypeName) -> Self {
    Type::Named(name)
  }
}

impl From<&Type> for Type {
  fn from(ty: &Type) -> Self {
    ty.clone()
  }
}

/// Reserved values are spelled as the active configuration's `Sentinels` say.
impl Display for Type {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Type::Named(name) => write!(f, "{}", name),
      sentinel          => write!(f, "{}", global_config().render(sentinel)),
    }
  }
}

impl Debug for Type {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

/// Sorts and deduplicates in place. Every set-valued result leaves the crate in this form.
pub(crate) fn normalize(types: &mut Vec<Type>) {
  types.sort();
  types.dedup();
}
