/*!

The `TypeOrder` trait is the algebra's view of a hierarchy. Everything an application asks of a partial order goes
through it: structural reads, the binary operations, the folds, and sorting.

Implementors supply `hierarchy()` and `hierarchy_mut()`. The three `lookup_*` methods answer graph lookup for two member
types and are where representations differ: [`Hierarchy`] walks its maps, the compiled layer tests bits, the caching
decorator memoizes. Every other method is provided and funnels into those three, so all representations agree on
everything but speed.

## Resolution

The typed methods (`subsumes`, `least_upper_bounds`, ...) apply the trivial rules for identical operands and the two
reserved values, then require both operands to be members (answering `false` or `[]` otherwise), then look up. The
`resolve_*` methods take [`Operand`]s instead and, when `AlgebraConfig::user_hooks` is on, give hook operands a chance
to answer before the membership check.

*/

use std::{cmp::Ordering, sync::Arc};

use crate::{
  api::{
    config::{global_config, AlgebraConfig},
    operand::{Operand, Operation},
    ty::Type,
  },
  core::{
    algebra::{self, lattice, sorting, trivial},
    hierarchy::Hierarchy,
  },
};

pub trait TypeOrder {
  fn hierarchy(&self) -> &Hierarchy;

  /// Mutable access for structural edits. Derived state is rebuilt on the next read.
  fn hierarchy_mut(&mut self) -> &mut Hierarchy;

  // region Graph lookup

  /// Whether `general` subsumes `specific`. Both are members.
  fn lookup_subsumes(&self, general: &Type, specific: &Type) -> bool {
    algebra::lookup::subsumes(self.hierarchy(), general, specific)
  }

  fn lookup_least_upper_bounds(&self, left: &Type, right: &Type) -> Vec<Type> {
    algebra::lookup::least_upper_bounds(self.hierarchy(), left, right)
  }

  fn lookup_greatest_lower_bounds(&self, left: &Type, right: &Type) -> Vec<Type> {
    algebra::lookup::greatest_lower_bounds(self.hierarchy(), left, right)
  }

  // endregion

  // region Compilation control

  /// Whether lookups are answered from a compiled form.
  fn compiled(&self) -> bool {
    false
  }

  /// Requests that lookups use (or stop using) a compiled form. Returns the resulting `compiled()` state.
  fn set_compiled(&mut self, _compiled: bool) -> bool {
    false
  }

  /// Brings the compiled form up to date now rather than on the next lookup. Returns `compiled()`.
  fn compile(&self) -> bool {
    false
  }

  // endregion

  /// The configuration operations read at their start.
  fn config(&self) -> Arc<AlgebraConfig> {
    global_config()
  }

  // region Structural reads

  fn root(&self) -> &Type {
    self.hierarchy().root()
  }

  fn size(&self) -> usize {
    self.hierarchy().size()
  }

  fn types(&self) -> Vec<Type> {
    self.hierarchy().types()
  }

  fn has_type(&self, ty: &Type) -> bool {
    self.hierarchy().has_type(ty)
  }

  fn parents(&self, ty: &Type) -> Vec<Type> {
    self.hierarchy().parents(ty)
  }

  fn children(&self, ty: &Type) -> Vec<Type> {
    self.hierarchy().children(ty)
  }

  fn ancestors(&self, ty: &Type) -> Vec<Type> {
    self.hierarchy().ancestors(ty)
  }

  fn descendants(&self, ty: &Type) -> Vec<Type> {
    self.hierarchy().descendants(ty)
  }

  fn leaves(&self) -> Vec<Type> {
    self.hierarchy().leaves()
  }

  // endregion

  // region Binary operations on types

  fn subsumes(&self, general: &Type, specific: &Type) -> bool {
    trivial::subsumes(general, specific).unwrap_or_else(|| {
      self.has_type(general) && self.has_type(specific) && self.lookup_subsumes(general, specific)
    })
  }

  fn properly_subsumes(&self, general: &Type, specific: &Type) -> bool {
    trivial::properly_subsumes(general, specific).unwrap_or_else(|| {
      self.has_type(general) && self.has_type(specific) && self.lookup_subsumes(general, specific)
    })
  }

  fn extends(&self, specific: &Type, general: &Type) -> bool {
    self.subsumes(general, specific)
  }

  fn properly_extends(&self, specific: &Type, general: &Type) -> bool {
    self.properly_subsumes(general, specific)
  }

  fn least_upper_bounds(&self, left: &Type, right: &Type) -> Vec<Type> {
    trivial::least_upper_bounds(left, right).unwrap_or_else(|| {
      if self.has_type(left) && self.has_type(right) {
        self.lookup_least_upper_bounds(left, right)
      } else {
        Vec::new()
      }
    })
  }

  fn greatest_lower_bounds(&self, left: &Type, right: &Type) -> Vec<Type> {
    trivial::greatest_lower_bounds(left, right).unwrap_or_else(|| {
      if self.has_type(left) && self.has_type(right) {
        self.lookup_greatest_lower_bounds(left, right)
      } else {
        Vec::new()
      }
    })
  }

  #[inline(always)]
  fn le(&self, left: &Type, right: &Type) -> bool {
    self.subsumes(left, right)
  }

  #[inline(always)]
  fn lt(&self, left: &Type, right: &Type) -> bool {
    self.properly_subsumes(left, right)
  }

  #[inline(always)]
  fn ge(&self, left: &Type, right: &Type) -> bool {
    self.extends(left, right)
  }

  #[inline(always)]
  fn gt(&self, left: &Type, right: &Type) -> bool {
    self.properly_extends(left, right)
  }

  #[inline(always)]
  fn lub(&self, left: &Type, right: &Type) -> Vec<Type> {
    self.least_upper_bounds(left, right)
  }

  #[inline(always)]
  fn glb(&self, left: &Type, right: &Type) -> Vec<Type> {
    self.greatest_lower_bounds(left, right)
  }

  // endregion

  // region Binary operations on operands

  fn resolve_subsumes(&self, general: &Operand, specific: &Operand) -> bool {
    algebra::resolve_relation(self, Operation::Subsumes, general, specific, &self.config())
  }

  fn resolve_properly_subsumes(&self, general: &Operand, specific: &Operand) -> bool {
    algebra::resolve_relation(self, Operation::ProperlySubsumes, general, specific, &self.config())
  }

  fn resolve_extends(&self, specific: &Operand, general: &Operand) -> bool {
    algebra::resolve_relation(self, Operation::Extends, specific, general, &self.config())
  }

  fn resolve_properly_extends(&self, specific: &Operand, general: &Operand) -> bool {
    algebra::resolve_relation(self, Operation::ProperlyExtends, specific, general, &self.config())
  }

  fn resolve_least_upper_bounds(&self, left: &Operand, right: &Operand) -> Vec<Type> {
    algebra::resolve_bounds(self, Operation::LeastUpperBounds, left, right, &self.config())
  }

  fn resolve_greatest_lower_bounds(&self, left: &Operand, right: &Operand) -> Vec<Type> {
    algebra::resolve_bounds(self, Operation::GreatestLowerBounds, left, right, &self.config())
  }

  // endregion

  // region Folds and determinism

  /// Folds least upper bounds over `operands` from the left. No operands give `Undefined`. A step with no bound, or
  /// with more than one, makes the result `Top`; the second case is reported as non-determinism.
  fn njoin(&self, operands: &[Operand]) -> Type {
    lattice::njoin(self, operands, &self.config())
  }

  /// Folds greatest lower bounds. No operands give `Top`; a step without a unique bound gives `Undefined`.
  fn nmeet(&self, operands: &[Operand]) -> Type {
    lattice::nmeet(self, operands, &self.config())
  }

  /// `njoin` for member types only, going straight to lookup.
  fn type_join(&self, types: &[Type]) -> Type {
    lattice::type_join(self, types, &self.config())
  }

  /// `nmeet` for member types only, going straight to lookup.
  fn type_meet(&self, types: &[Type]) -> Type {
    lattice::type_meet(self, types, &self.config())
  }

  /// No type has more than one parent.
  fn is_tree(&self) -> bool {
    lattice::is_tree(self.hierarchy())
  }

  /// Every pair of types has at most one least upper bound.
  fn is_deterministic(&self) -> bool {
    self.get_nondet_pair().is_none()
  }

  /// The first pair of types, in name order, with more than one least upper bound.
  fn get_nondet_pair(&self) -> Option<(Type, Type)> {
    lattice::get_nondet_pair(self)
  }

  // endregion

  // region Sorting

  /// `Less` when `left` properly subsumes `right`, `Greater` for the converse, `Equal` for identical types, `None`
  /// for incomparable ones.
  fn compare(&self, left: &Type, right: &Type) -> Option<Ordering> {
    sorting::compare(self, left, right)
  }

  /// The members of `types` that no other member properly subsumes.
  fn min(&self, types: &[Type]) -> Vec<Type> {
    sorting::min(self, types)
  }

  /// The members of `types` that properly subsume no other member.
  fn max(&self, types: &[Type]) -> Vec<Type> {
    sorting::max(self, types)
  }

  /// `types` without duplicates, ordered so that no type comes after one it properly subsumes.
  fn subsort(&self, types: &[Type]) -> Vec<Type> {
    sorting::subsort(self, types)
  }

  /// `types` grouped into levels of mutually incomparable types, most general first. Types that are not members of
  /// the hierarchy form a last level of their own.
  fn stratasort(&self, types: &[Type]) -> Vec<Vec<Type>> {
    sorting::stratasort(self, types)
  }

  // endregion
}

impl TypeOrder for Hierarchy {
  #[inline(always)]
  fn hierarchy(&self) -> &Hierarchy {
    self
  }

  #[inline(always)]
  fn hierarchy_mut(&mut self) -> &mut Hierarchy {
    self
  }
}
