//! `dropkit` - guard-clause validation, two-phase disposal, scoped semaphores
//!
//! This crate packages three small utilities that show up in almost every
//! service codebase:
//!
//! - [`ensure`]: stateless guard-clause validators that return the validated
//!   value or a typed error naming the offending parameter.
//! - [`lifecycle`]: a disposal contract guaranteeing that managed and
//!   unmanaged release hooks run exactly once per entity, with synchronous
//!   ([`Disposable`]) and awaitable ([`AsyncDisposable`]) variants.
//! - [`semaphore`]: scoped acquisition of counting-semaphore slots, blocking
//!   ([`SyncSemaphore`]) or suspending ([`semaphore::acquire_scoped`]), where
//!   the returned permit gives the slot back exactly once on any exit path.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use dropkit::SyncSemaphore;
//!
//! let semaphore = Arc::new(SyncSemaphore::new(1));
//! {
//!     let _permit = semaphore.acquire_scoped();
//!     assert_eq!(semaphore.available_permits(), 0);
//! }
//! // The slot came back when the permit left scope.
//! assert_eq!(semaphore.available_permits(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ensure;
pub mod errors;
pub mod lifecycle;
pub mod semaphore;

pub use errors::{AcquireError, DisposeError, ValidationError};
pub use lifecycle::{AsyncDisposable, AsyncReleaseHooks, Disposable, DisposeState, ReleaseHooks};
pub use semaphore::{AsyncSemaphorePermit, SemaphorePermit, SyncSemaphore};
