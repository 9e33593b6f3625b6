/*!

A `Hierarchy` is the graph store: a finite set of named types with a distinguished root, the immediate parent and child
relations between them, and attribute maps. It owns all structural state; every other layer (the traversal engine,
the algebra, compiled bit-vectors, the memo table of the caching decorator) reads from it and is derived from it.

## Invariants

 - The parent map and the child map are exact inverses.
 - The root has no parents, and every type is reachable from the root by following child edges. Mutations preserve
   this by construction: new types without parents go under the root, `remove` hands a removed type's children to
   its parents, and a `move` that would cut a type off is given the root as an extra parent.
 - Cycles are not rejected. They are detectable with `is_circular`, and every walk over the graph tracks visited
   types, so they never cause non-termination.
 - Attribute maps are keyed by type; removing a type removes its attributes.

## Generations

Every structural mutation advances `generation()`. Derived state records the generation it was computed from and is
recomputed when it no longer matches. Attribute edits are not structural and leave the generation alone.

## Naming

Mutations take names (`impl Into<TypeName>`), never `Type`s, so the reserved values `Type::Top` and
`Type::Undefined` cannot enter a hierarchy. Queries take `&Type` and simply answer "no" for anything that is not a
member.

*/

mod attribute;
mod merge;

use std::fmt::{Debug, Display, Formatter};

use crate::{
  abstractions::{join_string, HashMap, HashSet, IString},
  api::{
    config::global_config,
    ty::{normalize, Type, TypeName},
  },
  core::{
    closure,
    traversal::{traverse, Direction, TraversalConfig},
  },
  debug,
  warning,
};

pub use attribute::{AttributeValue, Attributes};
pub use merge::MergeError;

/// The root of a hierarchy constructed with `Hierarchy::default()`.
pub const DEFAULT_ROOT: &str = "BOTTOM";

const DISPLAY_INDENT: usize = 2;

#[derive(Clone)]
pub struct Hierarchy {
  root                : Type,
  parents             : HashMap<Type, HashSet<Type>>,
  children            : HashMap<Type, HashSet<Type>>,
  attributes          : HashMap<Type, Attributes>,
  hierarchy_attributes: Attributes,
  generation          : u64,
}

impl Default for Hierarchy {
  fn default() -> Self {
    Hierarchy::new(DEFAULT_ROOT)
  }
}

impl Hierarchy {
  pub fn new(root: impl Into<TypeName>) -> Hierarchy {
    let root = Type::Named(root.into());
    let mut hierarchy = Hierarchy {
      root                : root.clone(),
      parents             : HashMap::new(),
      children            : HashMap::new(),
      attributes          : HashMap::new(),
      hierarchy_attributes: Attributes::new(),
      generation          : 0,
    };
    hierarchy.insert_node(root);
    hierarchy
  }

  // region Structural reads

  #[inline(always)]
  pub fn root(&self) -> &Type {
    &self.root
  }

  #[inline(always)]
  pub fn is_root(&self, ty: &Type) -> bool {
    *ty == self.root
  }

  /// Advances on every structural mutation.
  #[inline(always)]
  pub fn generation(&self) -> u64 {
    self.generation
  }

  /// The number of types, including the root.
  #[inline(always)]
  pub fn size(&self) -> usize {
    self.parents.len()
  }

  #[inline(always)]
  pub fn has_type(&self, ty: &Type) -> bool {
    self.parents.contains_key(ty)
  }

  pub fn has_types<'a>(&self, types: impl IntoIterator<Item = &'a Type>) -> bool {
    types.into_iter().all(|ty| self.has_type(ty))
  }

  pub fn types(&self) -> Vec<Type> {
    let mut types: Vec<Type> = self.parents.keys().cloned().collect();
    types.sort();
    types
  }

  pub fn parents(&self, ty: &Type) -> Vec<Type> {
    sorted(self.parent_set(ty))
  }

  pub fn children(&self, ty: &Type) -> Vec<Type> {
    sorted(self.child_set(ty))
  }

  pub(crate) fn parent_set(&self, ty: &Type) -> Option<&HashSet<Type>> {
    self.parents.get(ty)
  }

  pub(crate) fn child_set(&self, ty: &Type) -> Option<&HashSet<Type>> {
    self.children.get(ty)
  }

  pub fn has_parent(&self, ty: &Type, parent: &Type) -> bool {
    self.parent_set(ty).is_some_and(|parents| parents.contains(parent))
  }

  pub fn has_child(&self, ty: &Type, child: &Type) -> bool {
    self.child_set(ty).is_some_and(|children| children.contains(child))
  }

  /// Every type reachable by following parent edges from `ty`. Contains `ty` itself only if `ty` lies on a cycle.
  pub fn ancestors(&self, ty: &Type) -> Vec<Type> {
    let mut ancestors: Vec<Type> = closure::ancestors(self, ty).into_iter().collect();
    ancestors.sort();
    ancestors
  }

  /// Every type reachable by following child edges from `ty`. Contains `ty` itself only if `ty` lies on a cycle.
  pub fn descendants(&self, ty: &Type) -> Vec<Type> {
    let mut descendants: Vec<Type> = closure::descendants(self, ty).into_iter().collect();
    descendants.sort();
    descendants
  }

  pub fn has_ancestor(&self, ty: &Type, ancestor: &Type) -> bool {
    closure::reaches(self, Direction::Up, ty, ancestor)
  }

  pub fn has_descendant(&self, ty: &Type, descendant: &Type) -> bool {
    closure::reaches(self, Direction::Down, ty, descendant)
  }

  /// Types without children.
  pub fn leaves(&self) -> Vec<Type> {
    let mut leaves = Vec::new();
    traverse(self, Direction::Down, TraversalConfig::default(), |ty, _| {
      if self.child_set(ty).map_or(true, HashSet::is_empty) {
        leaves.push(ty.clone());
      }
      None::<()>
    });
    leaves.sort();
    leaves
  }

  pub fn common_parents(&self, left: &Type, right: &Type) -> Vec<Type> {
    intersect(self.parent_set(left), self.parent_set(right))
  }

  pub fn common_children(&self, left: &Type, right: &Type) -> Vec<Type> {
    intersect(self.child_set(left), self.child_set(right))
  }

  /// Types that are ancestors of both operands. Neither operand counts as its own ancestor here.
  pub fn common_ancestors(&self, left: &Type, right: &Type) -> Vec<Type> {
    let left  = closure::ancestors(self, left);
    let right = closure::ancestors(self, right);
    intersect(Some(&left), Some(&right))
  }

  pub fn common_descendants(&self, left: &Type, right: &Type) -> Vec<Type> {
    let left  = closure::descendants(self, left);
    let right = closure::descendants(self, right);
    intersect(Some(&left), Some(&right))
  }

  /// Whether some type is its own proper ancestor.
  ///
  /// Peels off types all of whose parents have already been peeled, starting from the parentless ones. Anything
  /// left over once nothing more can be peeled lies on or below a cycle.
  pub fn is_circular(&self) -> bool {
    !self.unpeelable().is_empty()
  }

  /// The types that are their own proper ancestors.
  pub fn circular_types(&self) -> Vec<Type> {
    let mut circular: Vec<Type> =
        self.unpeelable()
            .into_iter()
            .filter(|ty| self.has_ancestor(ty, ty))
            .collect();
    circular.sort();
    circular
  }

  fn unpeelable(&self) -> HashSet<Type> {
    let mut pending: HashMap<&Type, usize> =
        self.parents
            .iter()
            .map(|(ty, parents)| (ty, parents.len()))
            .collect();
    let mut ready: Vec<&Type> =
        pending
            .iter()
            .filter(|(_, &count)| count == 0)
            .map(|(&ty, _)| ty)
            .collect();

    while let Some(ty) = ready.pop() {
      pending.remove(ty);
      for child in self.children.get(ty).into_iter().flatten() {
        if let Some(count) = pending.get_mut(child) {
          *count -= 1;
          if *count == 0 {
            ready.push(child);
          }
        }
      }
    }

    pending.into_keys().cloned().collect()
  }

  // endregion

  // region Mutation

  /**
  Inserts `name` below each of `parents`. Parents that do not exist yet are created as children of the root; an empty
  parent list means the root. A type never becomes its own parent.

  If `name` already exists this is `move_type`: its parent set is replaced.
  */
  pub fn add<P: Into<TypeName>>(
    &mut self,
    name   : impl Into<TypeName>,
    parents: impl IntoIterator<Item = P>
  ) -> &mut Self {
    let ty      = Type::Named(name.into());
    let parents = named(parents);

    if names_sentinel(std::iter::once(&ty).chain(parents.iter())) {
      return self;
    }
    if self.has_type(&ty) {
      return self.rebind(ty, parents);
    }

    let parents: Vec<Type> = parents.into_iter().filter(|parent| *parent != ty).collect();
    let mut parents = self.resolve_parents(parents);
    if parents.is_empty() {
      parents.push(self.root.clone());
    }

    self.insert_node(ty.clone());
    for parent in parents.iter() {
      self.link(parent, &ty);
    }
    self.bump();
    self
  }

  /**
  Replaces the parent set of `name` with `parents`, disconnecting it from its previous parents. Behaves like `add` if
  `name` does not exist.

  The root cannot be moved. If every new parent is `name` itself or one of its descendants, the move would cut `name`
  off from the root; in that case the root is added as an extra parent and a warning is logged.
  */
  pub fn move_type<P: Into<TypeName>>(
    &mut self,
    name   : impl Into<TypeName>,
    parents: impl IntoIterator<Item = P>
  ) -> &mut Self {
    let name = name.into();
    let ty   = Type::Named(name.clone());

    if !self.has_type(&ty) {
      return self.add(name, parents);
    }
    self.rebind(ty, named(parents))
  }

  fn rebind(&mut self, ty: Type, parents: Vec<Type>) -> &mut Self {
    if names_sentinel(parents.iter()) {
      return self;
    }
    let parents: Vec<Type> = parents.into_iter().filter(|parent| *parent != ty).collect();
    if self.is_root(&ty) {
      if !parents.is_empty() {
        warning!(1, "refusing to give the root {} parents", ty);
      }
      return self;
    }

    let mut parents = self.resolve_parents(parents);
    if parents.is_empty() {
      parents.push(self.root.clone());
    }

    let mut below = closure::descendants(self, &ty);
    below.insert(ty.clone());
    if parents.iter().all(|parent| below.contains(parent)) {
      warning!(
        1,
        "moving {} below [{}] would detach it from the root {}; keeping the root as an extra parent",
        ty,
        join_string(parents.iter(), ", "),
        self.root
      );
      parents.push(self.root.clone());
    }

    let previous = sorted(self.parent_set(&ty));
    for parent in previous.iter() {
      self.unlink(parent, &ty);
    }
    for parent in parents.iter() {
      self.link(parent, &ty);
    }
    self.bump();
    self
  }

  /// Adds `parents` to the parent set of `name`, creating `name` (and missing parents) as needed. Existing parent
  /// edges are kept. The root cannot be given parents.
  pub fn add_parents<P: Into<TypeName>>(
    &mut self,
    name   : impl Into<TypeName>,
    parents: impl IntoIterator<Item = P>
  ) -> &mut Self {
    let name = name.into();
    let ty   = Type::Named(name.clone());

    if !self.has_type(&ty) {
      return self.add(name, parents);
    }

    let parents: Vec<Type> = named(parents).into_iter().filter(|parent| *parent != ty).collect();
    if parents.is_empty() || names_sentinel(parents.iter()) {
      return self;
    }
    if self.is_root(&ty) {
      warning!(1, "refusing to give the root {} parents", ty);
      return self;
    }

    for parent in self.resolve_parents(parents).iter() {
      self.link(parent, &ty);
    }
    self.bump();
    self
  }

  /**
  Deletes each named type together with its attributes. Each child of a removed type is handed every parent of the
  removed type, so subsumption between the surviving types is unchanged. The root cannot be removed; unknown names
  are ignored.
  */
  pub fn remove<N: Into<TypeName>>(&mut self, names: impl IntoIterator<Item = N>) -> &mut Self {
    let mut changed = false;

    for ty in named(names) {
      if self.is_root(&ty) {
        warning!(1, "refusing to remove the root {}", ty);
        continue;
      }
      if !self.has_type(&ty) {
        continue;
      }

      let parents : Vec<Type> = sorted(self.parent_set(&ty)).into_iter().filter(|p| *p != ty).collect();
      let children: Vec<Type> = sorted(self.child_set(&ty)).into_iter().filter(|c| *c != ty).collect();

      for child in children.iter() {
        self.unlink(&ty, child);
        for parent in parents.iter().filter(|&parent| parent != child) {
          self.link(parent, child);
        }
        if self.parent_set(child).map_or(true, HashSet::is_empty) {
          let root = self.root.clone();
          self.link(&root, child);
        }
      }
      for parent in parents.iter() {
        self.unlink(parent, &ty);
      }

      self.parents.remove(&ty);
      self.children.remove(&ty);
      self.attributes.remove(&ty);
      changed = true;
    }

    if changed {
      self.bump();
    }
    self
  }

  /**
  Renames `old` to `new`. If `new` already exists the two are merged: `new` gains `old`'s edges, and `old`'s
  attributes fill in keys `new` does not have. Replacing the root renames the root, and the new root drops any parents
  it had.
  */
  pub fn replace(&mut self, old: impl Into<TypeName>, new: impl Into<TypeName>) -> &mut Self {
    let old = Type::Named(old.into());
    let new = Type::Named(new.into());
    if old == new || !self.has_type(&old) || names_sentinel([&new]) {
      return self;
    }

    let was_root = self.is_root(&old);
    let parents  = sorted(self.parent_set(&old));
    let children = sorted(self.child_set(&old));
    let rename   = |ty: Type| if ty == old { new.clone() } else { ty };

    self.insert_node(new.clone());
    // An edge between `old` and `new` would become a self-loop and is dropped.
    for parent in parents {
      self.unlink(&parent, &old);
      if parent == new || was_root || self.is_root(&new) {
        continue;
      }
      self.link(&rename(parent), &new);
    }
    for child in children {
      self.unlink(&old, &child);
      if child == new {
        continue;
      }
      self.link(&new, &rename(child));
    }
    self.parents.remove(&old);
    self.children.remove(&old);

    if let Some(old_attributes) = self.attributes.remove(&old) {
      let attributes = self.attributes.entry(new.clone()).or_default();
      for (key, value) in old_attributes {
        attributes.entry(key).or_insert(value);
      }
    }

    if was_root {
      self.root = new.clone();
      for parent in sorted(self.parent_set(&new)) {
        self.unlink(&parent, &new);
      }
    }

    self.bump();
    self
  }

  /// Creates every named type that does not exist yet as a child of the root.
  pub fn ensure_types<N: Into<TypeName>>(&mut self, names: impl IntoIterator<Item = N>) -> &mut Self {
    let root = self.root.clone();
    let mut changed = false;

    for ty in named(names) {
      if names_sentinel([&ty]) {
        continue;
      }
      if self.insert_node(ty.clone()) {
        self.link(&root, &ty);
        changed = true;
      }
    }

    if changed {
      self.bump();
    }
    self
  }

  /// Removes every type but the root, and all attributes.
  pub fn clear(&mut self) -> &mut Self {
    self.parents.clear();
    self.children.clear();
    self.attributes.clear();
    self.hierarchy_attributes.clear();
    self.insert_node(self.root.clone());
    self.bump();
    self
  }

  /// Makes `self` an informationally identical copy of `other`. The generation still moves forward, so state derived
  /// from `self` before the assignment is recognized as stale.
  pub fn assign(&mut self, other: &Hierarchy) -> &mut Self {
    let generation = self.generation.max(other.generation) + 1;
    *self = other.clone();
    self.generation = generation;
    debug!(4, "assigned hierarchy rooted at {} with {} types", self.root, self.size());
    self
  }

  // endregion

  // region Attributes

  pub fn attributes(&self, ty: &Type) -> Option<&Attributes> {
    self.attributes.get(ty)
  }

  pub fn get_attribute(&self, ty: &Type, key: &str) -> Option<&AttributeValue> {
    self.attributes.get(ty)?.get(&IString::from(key))
  }

  /// Sets an attribute of an existing type and returns the previous value. Setting an attribute of a type that is not
  /// in the hierarchy does nothing.
  pub fn set_attribute(
    &mut self,
    ty   : &Type,
    key  : impl Into<IString>,
    value: impl Into<AttributeValue>
  ) -> Option<AttributeValue> {
    if !self.has_type(ty) {
      debug!(2, "ignoring attribute for unknown type {}", ty);
      return None;
    }
    self.attributes
        .entry(ty.clone())
        .or_default()
        .insert(key.into(), value.into())
  }

  pub fn remove_attribute(&mut self, ty: &Type, key: &str) -> Option<AttributeValue> {
    self.attributes.get_mut(ty)?.remove(&IString::from(key))
  }

  pub fn hierarchy_attributes(&self) -> &Attributes {
    &self.hierarchy_attributes
  }

  pub fn get_hierarchy_attribute(&self, key: &str) -> Option<&AttributeValue> {
    self.hierarchy_attributes.get(&IString::from(key))
  }

  pub fn set_hierarchy_attribute(
    &mut self,
    key  : impl Into<IString>,
    value: impl Into<AttributeValue>
  ) -> Option<AttributeValue> {
    self.hierarchy_attributes.insert(key.into(), value.into())
  }

  pub fn remove_hierarchy_attribute(&mut self, key: &str) -> Option<AttributeValue> {
    self.hierarchy_attributes.remove(&IString::from(key))
  }

  // endregion

  // region Internals

  fn bump(&mut self) {
    self.generation += 1;
  }

  /// Returns `true` if `ty` was not present.
  fn insert_node(&mut self, ty: Type) -> bool {
    if self.has_type(&ty) {
      return false;
    }
    self.parents.insert(ty.clone(), HashSet::new());
    self.children.entry(ty).or_default();
    true
  }

  fn link(&mut self, parent: &Type, child: &Type) {
    self.parents.entry(child.clone()).or_default().insert(parent.clone());
    self.children.entry(parent.clone()).or_default().insert(child.clone());
  }

  fn unlink(&mut self, parent: &Type, child: &Type) {
    if let Some(parents) = self.parents.get_mut(child) {
      parents.remove(parent);
    }
    if let Some(children) = self.children.get_mut(parent) {
      children.remove(child);
    }
  }

  /// Deduplicates `parents`, creating missing ones as children of the root. The root may appear.
  fn resolve_parents(&mut self, mut parents: Vec<Type>) -> Vec<Type> {
    normalize(&mut parents);
    let root = self.root.clone();
    for parent in parents.iter() {
      if self.insert_node(parent.clone()) {
        self.link(&root, parent);
      }
    }
    parents
  }

  // endregion

  /// Formats the hierarchy with `prefix` before each line. The `Debug` impl defers to this method.
  fn debug_fmt(&self, f: &mut Formatter<'_>, prefix: &str) -> std::fmt::Result {
    let inner_prefix = format!("{}{}", prefix, " ".repeat(DISPLAY_INDENT));
    writeln!(f, "{}Hierarchy {{", prefix)?;
    writeln!(f, "{}root: {}", inner_prefix, self.root)?;
    writeln!(f, "{}generation: {}", inner_prefix, self.generation)?;

    let types: Vec<String> =
        self.types()
            .into_iter()
            .filter(|ty| !self.is_root(ty))
            .map(|ty| format!("{}: {}", ty, join_string(self.parents(&ty).iter(), ", ")))
            .collect();
    if !types.is_empty() {
      format_named_list(f, &inner_prefix, "types", &types)?;
    }

    let mut annotated: Vec<(&Type, &Attributes)> =
        self.attributes
            .iter()
            .filter(|(_, attributes)| !attributes.is_empty())
            .collect();
    annotated.sort_by(|left, right| left.0.cmp(right.0));
    let attributes: Vec<String> =
        annotated
            .into_iter()
            .map(|(ty, attributes)| format!("{}: {}", ty, format_attributes(attributes)))
            .collect();
    if !attributes.is_empty() {
      format_named_list(f, &inner_prefix, "attributes", &attributes)?;
    }
    if !self.hierarchy_attributes.is_empty() {
      writeln!(f, "{}hierarchy attributes: {}", inner_prefix, format_attributes(&self.hierarchy_attributes))?;
    }

    writeln!(f, "{}}}", prefix)
  }
}

/// Structural equality: same root, same edges, same non-empty attribute maps. The generation is not compared.
impl PartialEq for Hierarchy {
  fn eq(&self, other: &Self) -> bool {
    let annotated = |hierarchy: &Hierarchy| -> HashMap<Type, Attributes> {
      hierarchy.attributes
               .iter()
               .filter(|(_, attributes)| !attributes.is_empty())
               .map(|(ty, attributes)| (ty.clone(), attributes.clone()))
               .collect()
    };

    self.root == other.root
        && self.parents == other.parents
        && self.hierarchy_attributes == other.hierarchy_attributes
        && annotated(self) == annotated(other)
  }
}

impl Eq for Hierarchy {}

impl Debug for Hierarchy {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    self.debug_fmt(f, "")
  }
}

/// Whether any of `types` is spelled like one of the reserved values. Such requests are refused with a warning.
fn names_sentinel<'a>(types: impl IntoIterator<Item = &'a Type>) -> bool {
  let config = global_config();
  let reserved = types.into_iter().find(|ty| {
    matches!(ty, Type::Named(name) if *name == config.sentinels.top || *name == config.sentinels.undefined)
  });

  match reserved {
    Some(ty) => {
      warning!(1, "refusing a structural request naming the reserved type {}", ty);
      true
    }
    None => false,
  }
}

fn named<N: Into<TypeName>>(names: impl IntoIterator<Item = N>) -> Vec<Type> {
  names.into_iter().map(|name| Type::Named(name.into())).collect()
}

fn sorted(set: Option<&HashSet<Type>>) -> Vec<Type> {
  let mut types: Vec<Type> = set.map(|set| set.iter().cloned().collect()).unwrap_or_default();
  types.sort();
  types
}

fn intersect(left: Option<&HashSet<Type>>, right: Option<&HashSet<Type>>) -> Vec<Type> {
  match (left, right) {
    (Some(left), Some(right)) => {
      let mut common: Vec<Type> = left.intersection(right).cloned().collect();
      common.sort();
      common
    }
    _ => Vec::new(),
  }
}

fn format_attributes(attributes: &Attributes) -> String {
  let mut entries: Vec<(&IString, &AttributeValue)> = attributes.iter().collect();
  entries.sort_by(|left, right| (**left.0).cmp(&**right.0));
  format!(
    "{{{}}}",
    join_string(entries.into_iter().map(|(key, value)| format!("{}={}", key, value)), ", ")
  )
}

/// Helper function to format a named list of something:
/// ```txt
/// thing_name: [
///   thing1
///   thing2
/// ]
/// ```
fn format_named_list<T: Display>(f: &mut Formatter<'_>, prefix: &str, name: &str, list: &[T]) -> std::fmt::Result {
  let tab = " ".repeat(DISPLAY_INDENT);
  writeln!(f, "{}{}: [", prefix, name)?;
  for item in list.iter() {
    writeln!(f, "{}{}{}", prefix, tab, item)?;
  }
  writeln!(f, "{}]", prefix)
}
