/*!

Merging one hierarchy into another.

The result has every type and every parent edge of both operands, and the union of their attributes. The source's
root is identified with the target's root when they share a name; otherwise it becomes an ordinary type under the
target's root. An edge of the source that would give the target's root a parent is dropped.

Merging is all-or-nothing. The work happens on a scratch copy of the target, and the target is only replaced once the
whole source has been folded in. If both sides define the same attribute with different values the merge fails with a
[`MergeError`] and the target is left exactly as it was.

*/

use thiserror::Error;

use crate::{
  abstractions::IString,
  api::ty::TypeName,
  core::hierarchy::{AttributeValue, Attributes, Hierarchy},
  debug,
  info,
};

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum MergeError {
  /// Both hierarchies give the same type the same attribute with different values.
  #[error("conflicting values for attribute '{key}' of type {type_name}: {left} vs {right}")]
  AttributeConflict {
    type_name: TypeName,
    key      : IString,
    left     : AttributeValue,
    right    : AttributeValue,
  },

  /// Both hierarchies define the same hierarchy-wide attribute with different values.
  #[error("conflicting values for hierarchy attribute '{key}': {left} vs {right}")]
  HierarchyAttributeConflict {
    key  : IString,
    left : AttributeValue,
    right: AttributeValue,
  },
}

impl Hierarchy {
  /// Folds `other` into `self`. On error `self` is unchanged.
  pub fn merge(&mut self, other: &Hierarchy) -> Result<&mut Self, MergeError> {
    let mut scratch = self.clone();

    if let Err(error) = scratch.absorb(other) {
      info!(2, "merge refused: {}", error);
      return Err(error);
    }

    let generation = self.generation.max(other.generation) + 1;
    *self = scratch;
    self.generation = generation;
    debug!(4, "merged hierarchy now has {} types", self.size());
    Ok(self)
  }

  fn absorb(&mut self, other: &Hierarchy) -> Result<(), MergeError> {
    let root = self.root.clone();

    for ty in other.types() {
      self.insert_node(ty);
    }
    for ty in other.types() {
      for parent in other.parents(&ty) {
        if ty == root {
          debug!(3, "dropping edge {} -> {}: {} is the root", parent, ty, ty);
          continue;
        }
        self.link(&parent, &ty);
      }
    }
    // Only a renamed source root can be left without parents.
    for ty in other.types() {
      if !self.is_root(&ty) && self.parent_set(&ty).map_or(true, |parents| parents.is_empty()) {
        self.link(&root, &ty);
      }
    }

    for (ty, attributes) in other.attributes.iter() {
      let target = self.attributes.entry(ty.clone()).or_default();
      union_attributes(target, attributes).map_err(|(key, left, right)| {
        MergeError::AttributeConflict {
          type_name: ty.name().cloned().unwrap_or_default(),
          key,
          left,
          right,
        }
      })?;
    }
    union_attributes(&mut self.hierarchy_attributes, &other.hierarchy_attributes).map_err(
      |(key, left, right)| MergeError::HierarchyAttributeConflict { key, left, right }
    )?;

    self.generation += 1;
    Ok(())
  }
}

/// Adds the entries of `source` missing from `target`. Reports the first key on which the two disagree.
fn union_attributes(
  target: &mut Attributes,
  source: &Attributes
) -> Result<(), (IString, AttributeValue, AttributeValue)> {
  let mut keys: Vec<&IString> = source.keys().collect();
  keys.sort_by(|left, right| (***left).cmp(&***right));

  for key in keys {
    let value = &source[key];
    match target.get(key) {
      Some(existing) if existing != value => {
        return Err((key.clone(), existing.clone(), value.clone()));
      }
      Some(_) => {}
      None => {
        target.insert(key.clone(), value.clone());
      }
    }
  }
  Ok(())
}
