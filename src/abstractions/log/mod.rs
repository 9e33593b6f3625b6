/*!

# Overview

The `log` module provides logging with a numeric verbosity threshold on top of the `tracing` ecosystem. The log
level describes what _kind_ of message is logged; the threshold describes how _chatty_ the message is. A message is
emitted only when its threshold is at most the global logging threshold. A message logged without a threshold has
threshold 0 and is always emitted.

```
use typelattice::log::*;

set_global_logging_threshold(1);

warning!(1, "type {} was re-attached to the root", "bat"); // Emitted
debug!(4, "recompiled {} types", 12);                      // Not emitted
info!("hierarchy cleared");                                 // Emitted, threshold 0
```

The crate itself logs non-determinism diagnostics and refused structural edits at threshold 1, cache and
compilation events at thresholds 4 and 5.

## Macros

`critical!`, `error!`, `warning!`, `info!`, `debug!`, `trace!`, each in two forms:

```ignore
level!(threshold, "format string", args...);
level!("literal message");   // threshold 0
```

The threshold is a `u8`. Format arguments always need the threshold form.

## Initialization

The subscriber is installed lazily the first time any macro fires. Its output goes to stdout without timestamps.

*/
mod formatter;
mod threshold_filter;
mod macros;

use std::sync::{
  atomic::{AtomicU8, Ordering},
  LazyLock
};

use tracing_subscriber::{
  fmt,
  layer::SubscriberExt,
  Registry
};

use threshold_filter::ThresholdFilterLayer;
use formatter::CustomFieldFormatter;
pub use macros::*;

// The macros expand in downstream crates, which should not need their own `tracing` dependency.
#[doc(hidden)]
pub use tracing as __tracing;

/// Used for implicit initialization. If the embedding application already installed a global subscriber, ours is
/// silently dropped and theirs receives the events.
static INIT_LOGGER: LazyLock<()> = LazyLock::new(|| {
  let subscriber = Registry::default()
      .with(ThresholdFilterLayer)
      .with(
        fmt::layer()
            .fmt_fields(CustomFieldFormatter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stdout),
      );

  let _ = tracing::subscriber::set_global_default(subscriber);
});

/// Initializes the logging system. The macros call this; there is no need to call it directly.
pub fn init_logger() {
  LazyLock::force(&INIT_LOGGER);
}

static GLOBAL_LOGGING_THRESHOLD: AtomicU8 = AtomicU8::new(3);

pub fn set_global_logging_threshold(new_threshold: u8) {
  GLOBAL_LOGGING_THRESHOLD.store(new_threshold, Ordering::SeqCst);
}

pub fn get_global_logging_threshold() -> u8 {
  GLOBAL_LOGGING_THRESHOLD.load(Ordering::SeqCst)
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn threshold_round_trip() {
    let previous = get_global_logging_threshold();

    set_global_logging_threshold(5);
    assert_eq!(get_global_logging_threshold(), 5);
    debug!(5, "emitted at threshold {}", 5);
    trace!(6, "suppressed at threshold {}", 6);

    set_global_logging_threshold(previous);
    assert_eq!(get_global_logging_threshold(), previous);
  }

  #[test]
  fn every_level_accepts_both_forms() {
    let type_name = "bat";
    critical!(9, "critical {}", type_name);
    error!("plain error");
    warning!(1, "warning about {}", type_name);
    info!("plain info");
    debug!(2, "debug {}", type_name);
    trace!(3, "trace {}", type_name);
  }
}
