//! Tagged, switchable logging macros.
//!
//! Every module that logs declares two constants and then uses the crate-root
//! macros. The tag becomes the `log` target, so a host can filter one stage
//! with directives such as `RUST_LOG=glycemic::estimator=debug`.
//!
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//! const LOG_TAG: &str = "glycemic::window";
//!
//! use crate::{log_debug, log_warn};
//!
//! log_debug!("dropped {} samples", dropped);
//! ```

/// Debug-level log under the calling module's `LOG_TAG`, when `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!(target: LOG_TAG, $($arg)*);
        }
    };
}

/// Info-level log under the calling module's `LOG_TAG`, when `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!(target: LOG_TAG, $($arg)*);
        }
    };
}

/// Warn-level log under the calling module's `LOG_TAG`, when `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!(target: LOG_TAG, $($arg)*);
        }
    };
}

/// Error-level log under the calling module's `LOG_TAG`, when `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!(target: LOG_TAG, $($arg)*);
        }
    };
}

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
