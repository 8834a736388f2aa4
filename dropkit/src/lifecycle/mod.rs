//! Two-phase disposal lifecycle.
//!
//! This module provides a reusable contract guaranteeing that resource
//! cleanup runs exactly once per entity, split into a managed phase (cleanup
//! that may call back into the entity's still-valid object graph) and an
//! unmanaged phase (cleanup that must always run, such as returning a native
//! handle). Instead of a base-class hierarchy, the contract is expressed as
//! capability traits ([`ReleaseHooks`], [`AsyncReleaseHooks`]) plus wrapper
//! types ([`Disposable`], [`AsyncDisposable`]) that own the guarded one-time
//! state transition.
//!
//! The state machine per entity is `Live -> Disposing -> Disposed`. The
//! `Live -> Disposing` claim is an atomic compare-and-swap, so concurrent
//! disposal attempts from unrelated code paths resolve to exactly one winner;
//! `Disposed` is committed only after the release hooks complete, and is
//! terminal.
//!
//! There is no finalizer queue to fall back on in Rust. The `Drop`
//! implementations are the guaranteed-release path: explicit `dispose` calls
//! surface hook errors to the caller, while the drop path logs them via
//! `tracing` since nobody is there to observe a return value.

mod asynchronous;
mod hooks;
mod synchronous;


pub use asynchronous::AsyncDisposable;
pub use hooks::{AsyncReleaseHooks, ReleaseHooks};
pub use synchronous::Disposable;

use std::sync::atomic::{AtomicU8, Ordering};

/// Observable lifecycle states of a disposable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisposeState {
    /// The entity has not begun disposal; its resources are held.
    Live,
    /// A disposal path has claimed the transition and is running hooks.
    Disposing,
    /// All release hooks have completed; terminal.
    Disposed,
}

/// The guarded one-time transition shared by both lifecycle wrappers.
///
/// `claim` is the only way to enter the disposing state, and it succeeds for
/// exactly one caller per entity. `commit` must only be called by the path
/// whose `claim` succeeded.
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    const LIVE: u8 = 0;
    const DISPOSING: u8 = 1;
    const DISPOSED: u8 = 2;

    pub(crate) const fn new() -> Self {
        Self(AtomicU8::new(Self::LIVE))
    }

    /// Attempt the `Live -> Disposing` transition. True for exactly one caller.
    pub(crate) fn claim(&self) -> bool {
        self.0
            .compare_exchange(
                Self::LIVE,
                Self::DISPOSING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Commit the terminal `Disposed` state after hooks have run.
    pub(crate) fn commit(&self) {
        self.0.store(Self::DISPOSED, Ordering::Release);
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.0.load(Ordering::Acquire) == Self::DISPOSED
    }

    pub(crate) fn state(&self) -> DisposeState {
        match self.0.load(Ordering::Acquire) {
            Self::LIVE => DisposeState::Live,
            Self::DISPOSING => DisposeState::Disposing,
            _ => DisposeState::Disposed,
        }
    }
}
