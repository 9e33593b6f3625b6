//! Threshold-aware logging macros. Every macro forwards to `__log_event!`, which initializes the subscriber on first
//! use and records the threshold as a field that `ThresholdFilterLayer` inspects.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($level:expr, critical, $threshold:expr, $($arg:tt)+) => {
        {
            let threshold: u8 = $threshold;
            $crate::log::init_logger();
            $crate::log::__tracing::event!(
                $level,
                critical = true,
                threshold = threshold,
                message = format_args!($($arg)+)
            );
        }
    };
    ($level:expr, $threshold:expr, $($arg:tt)+) => {
        {
            let threshold: u8 = $threshold;
            $crate::log::init_logger();
            $crate::log::__tracing::event!(
                $level,
                threshold = threshold,
                message = format_args!($($arg)+)
            );
        }
    };
}

#[macro_export]
macro_rules! critical {
    ($message:literal) => {
        $crate::__log_event!($crate::log::__tracing::Level::ERROR, critical, 0, $message)
    };
    ($threshold:expr, $($arg:tt)+) => {
        $crate::__log_event!($crate::log::__tracing::Level::ERROR, critical, $threshold, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($message:literal) => {
        $crate::__log_event!($crate::log::__tracing::Level::ERROR, 0, $message)
    };
    ($threshold:expr, $($arg:tt)+) => {
        $crate::__log_event!($crate::log::__tracing::Level::ERROR, $threshold, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($message:literal) => {
        $crate::__log_event!($crate::log::__tracing::Level::WARN, 0, $message)
    };
    ($threshold:expr, $($arg:tt)+) => {
        $crate::__log_event!($crate::log::__tracing::Level::WARN, $threshold, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($message:literal) => {
        $crate::__log_event!($crate::log::__tracing::Level::INFO, 0, $message)
    };
    ($threshold:expr, $($arg:tt)+) => {
        $crate::__log_event!($crate::log::__tracing::Level::INFO, $threshold, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($message:literal) => {
        $crate::__log_event!($crate::log::__tracing::Level::DEBUG, 0, $message)
    };
    ($threshold:expr, $($arg:tt)+) => {
        $crate::__log_event!($crate::log::__tracing::Level::DEBUG, $threshold, $($arg)+)
    };
}

#[macro_export]
macro_rules! trace {
    ($message:literal) => {
        $crate::__log_event!($crate::log::__tracing::Level::TRACE, 0, $message)
    };
    ($threshold:expr, $($arg:tt)+) => {
        $crate::__log_event!($crate::log::__tracing::Level::TRACE, $threshold, $($arg)+)
    };
}

// The following makes the macros importable directly from the `log` module.
pub use crate::{critical, error, warning, info, debug, trace};
