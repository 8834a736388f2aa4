//! Error types for dropkit.
//!
//! Each subsystem gets its own error enum so callers can match on exactly the
//! failures that subsystem produces:
//!
//! - [`ValidationError`]: guard-clause failures from the [`crate::ensure`] module
//! - [`DisposeError`]: release-hook failures surfaced by the disposal lifecycle
//! - [`AcquireError`]: semaphore acquisition outcomes that did not yield a permit
//!
//! Validation failures are raised synchronously at the call site performing the
//! check; nothing in this crate defers or batches validation.

use std::error::Error as StdError;
use std::fmt;
use std::fmt::Write;
use std::time::Duration;

use thiserror::Error;

/// Errors produced by the guard-clause validators in [`crate::ensure`].
///
/// Every variant carries the name of the offending parameter so the failure
/// can be traced back to a specific argument at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required argument was absent.
    #[error("parameter '{name}' must not be null")]
    Null {
        /// The parameter that was absent.
        name: String,
    },

    /// A string, identifier, or collection argument was present but had no content.
    #[error("parameter '{name}' {reason}")]
    Empty {
        /// The parameter that was empty.
        name: String,
        /// Human-readable reason ("cannot be empty", "cannot be whitespace", ...).
        reason: String,
    },

    /// A comparable value fell outside an inclusive lower/upper bound.
    #[error("parameter '{name}' with value {value} is out of range (expected {lower}..={upper})")]
    OutOfRange {
        /// The parameter that was out of range.
        name: String,
        /// The rejected value, rendered for display.
        value: String,
        /// The inclusive lower bound.
        lower: String,
        /// The inclusive upper bound.
        upper: String,
    },

    /// A value was not among the defined members of its enumerated type.
    #[error("parameter '{name}' with value {value} is not a valid member of {enum_type}")]
    InvalidEnum {
        /// The parameter holding the rejected value.
        name: String,
        /// The rejected raw value, rendered for display.
        value: String,
        /// The target enum type.
        enum_type: String,
    },
}

/// Type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The release phase in which a disposal hook failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleasePhase {
    /// The managed-resource release hook.
    Managed,
    /// The unmanaged-resource release hook.
    Unmanaged,
}

impl fmt::Display for ReleasePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Managed => f.write_str("managed"),
            Self::Unmanaged => f.write_str("unmanaged"),
        }
    }
}

/// Errors surfaced by the disposal lifecycle.
///
/// Release hooks are expected to succeed; a hook failure propagates out of an
/// explicit `dispose` call. On the drop fallback path there is no caller to
/// observe the failure, so it is logged via `tracing` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisposeError {
    /// A release hook reported a failure.
    #[error("{phase} release failed: {message}")]
    ReleaseFailed {
        /// Which release phase failed.
        phase: ReleasePhase,
        /// Description of the failure.
        message: String,
    },
}

impl DisposeError {
    /// A failure from the managed-resource release hook.
    pub fn managed(message: impl Into<String>) -> Self {
        Self::ReleaseFailed {
            phase: ReleasePhase::Managed,
            message: message.into(),
        }
    }

    /// A failure from the unmanaged-resource release hook.
    pub fn unmanaged(message: impl Into<String>) -> Self {
        Self::ReleaseFailed {
            phase: ReleasePhase::Unmanaged,
            message: message.into(),
        }
    }
}

/// Type alias for disposal results.
pub type DisposeResult<T> = Result<T, DisposeError>;

/// Semaphore acquisition outcomes that did not yield a permit.
///
/// `Timeout` is ordinary control flow for bounded waits and must not be
/// conflated with `Closed`, which signals that the caller's semaphore was shut
/// down while the wait was in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AcquireError {
    /// No slot became available before the deadline.
    #[error("semaphore acquisition timed out after {waited:?}")]
    Timeout {
        /// How long the acquisition waited before giving up.
        waited: Duration,
    },

    /// The semaphore was closed while waiting for a slot.
    #[error("semaphore closed while waiting for a permit")]
    Closed,
}

/// Type alias for acquisition results.
pub type AcquireResult<T> = Result<T, AcquireError>;

/// Render an error and its full `source()` chain as one message.
///
/// Useful when an error is about to leave the program through a boundary that
/// only carries a single string (log line, process exit message) and the
/// intermediate causes would otherwise be lost.
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        // Writing into a String cannot fail.
        let _ = write!(message, ": {cause}");
        source = cause.source();
    }
    message
}
