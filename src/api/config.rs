/*!

Process-wide configuration of the algebra.

There is exactly one active [`AlgebraConfig`] per process. It starts out as `AlgebraConfig::default()` and only
changes through [`set_global_config`] or [`update_global_config`]. Every hierarchy reads the active configuration at
the start of each operation that needs it, so a change applies to all instances from the next operation on. The
instance-free entry points in [`resolve`](crate::resolve) take a configuration argument instead and never consult the
global one.

*/

use std::{
  num::NonZeroUsize,
  sync::{Arc, RwLock},
};

use once_cell::sync::Lazy;

use crate::{
  abstractions::IString,
  api::ty::Type,
};

const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(4096) {
  Some(capacity) => capacity,
  None           => panic!("default cache capacity must be nonzero"),
};

/// How much detail non-determinism diagnostics carry.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Default, Debug)]
pub enum Verbosity {
  Silent,
  /// Name the operation and the two operands.
  #[default]
  Warn,
  /// Additionally list every candidate bound and the arguments of the whole fold.
  WarnWithContext,
}

/// The textual spelling of the two reserved values.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Sentinels {
  pub top      : IString,
  pub undefined: IString,
}

impl Default for Sentinels {
  fn default() -> Self {
    Sentinels {
      top      : IString::from("TOP"),
      undefined: IString::from("UNDEFINED"),
    }
  }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct AlgebraConfig {
  /// Whether operands that carry their own ordering logic are consulted before the hierarchy.
  pub user_hooks    : bool,
  pub verbosity     : Verbosity,
  pub sentinels     : Sentinels,
  /// Default number of entries a [`CachingHierarchy`](crate::CachingHierarchy) keeps.
  pub cache_capacity: NonZeroUsize,
}

impl Default for AlgebraConfig {
  fn default() -> Self {
    AlgebraConfig {
      user_hooks    : true,
      verbosity     : Verbosity::default(),
      sentinels     : Sentinels::default(),
      cache_capacity: DEFAULT_CACHE_CAPACITY,
    }
  }
}

impl AlgebraConfig {
  /// Reads a type from its textual name, recognizing the configured sentinel spellings.
  pub fn parse_type(&self, name: &str) -> Type {
    if name == &*self.sentinels.top {
      Type::Top
    } else if name == &*self.sentinels.undefined {
      Type::Undefined
    } else {
      Type::from(name)
    }
  }

  /// The inverse of `parse_type`.
  pub fn render(&self, ty: &Type) -> IString {
    match ty {
      Type::Top         => self.sentinels.top.clone(),
      Type::Undefined   => self.sentinels.undefined.clone(),
      Type::Named(name) => name.clone(),
    }
  }
}

static GLOBAL_CONFIG: Lazy<RwLock<Arc<AlgebraConfig>>> =
    Lazy::new(|| RwLock::new(Arc::new(AlgebraConfig::default())));

/// A snapshot of the active configuration. Later changes do not affect a snapshot already taken.
pub fn global_config() -> Arc<AlgebraConfig> {
  match GLOBAL_CONFIG.read() {
    Ok(config)    => config.clone(),
    Err(poisoned) => poisoned.into_inner().clone(),
  }
}

pub fn set_global_config(config: AlgebraConfig) {
  update_global_config(|active| *active = config);
}

/// Edits a copy of the active configuration and installs it. The write lock is held throughout, so concurrent edits
/// do not lose each other's changes.
pub fn update_global_config(edit: impl FnOnce(&mut AlgebraConfig)) {
  let mut active = match GLOBAL_CONFIG.write() {
    Ok(active)    => active,
    Err(poisoned) => poisoned.into_inner(),
  };
  let mut config = (**active).clone();
  edit(&mut config);
  *active = Arc::new(config);
}
