//! Asynchronous disposal wrapper.

use crate::errors::DisposeResult;

use super::{AsyncReleaseHooks, DisposeState, StateCell};

/// A value paired with an awaitable disposal transition.
///
/// `AsyncDisposable` extends the synchronous lifecycle with an awaitable
/// managed-release phase. The single-execution guarantee is the same: the
/// first trigger wins the atomic claim, whether it is an explicit
/// [`dispose`](Self::dispose) or the `Drop` fallback, and the terminal state
/// is committed only after the hooks complete.
///
/// The `Drop` fallback cannot await, so it runs only the synchronous
/// unmanaged hook and logs a warning. Callers that need the managed phase to
/// run must call [`dispose`](Self::dispose) before the value goes out of
/// scope.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use dropkit::{AsyncDisposable, AsyncReleaseHooks};
/// use dropkit::errors::DisposeResult;
///
/// struct Session {
///     flushed: bool,
/// }
///
/// #[async_trait]
/// impl AsyncReleaseHooks for Session {
///     async fn release_managed(&mut self) -> DisposeResult<()> {
///         // e.g. flush buffered writes over the wire
///         self.flushed = true;
///         Ok(())
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let mut session = AsyncDisposable::new(Session { flushed: false });
/// session.dispose().await.unwrap();
/// assert!(session.is_disposed());
/// # });
/// ```
#[derive(Debug)]
pub struct AsyncDisposable<T: AsyncReleaseHooks> {
    hooks: T,
    state: StateCell,
}

impl<T: AsyncReleaseHooks> AsyncDisposable<T> {
    /// Wrap a value in the disposal lifecycle, starting in the live state.
    pub const fn new(hooks: T) -> Self {
        Self {
            hooks,
            state: StateCell::new(),
        }
    }

    /// Release the wrapped value's resources.
    ///
    /// The first call awaits the managed hook, then runs the synchronous
    /// unmanaged hook, then commits the terminal state. If disposal has
    /// already been claimed, this returns immediately without suspending.
    pub async fn dispose(&mut self) -> DisposeResult<()> {
        if !self.state.claim() {
            return Ok(());
        }

        let managed = self.hooks.release_managed().await;
        let unmanaged = self.hooks.release_unmanaged();
        self.state.commit();

        managed.and(unmanaged)
    }

    /// Whether disposal has completed.
    pub fn is_disposed(&self) -> bool {
        self.state.is_disposed()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> DisposeState {
        self.state.state()
    }

    /// Access the wrapped value.
    pub const fn get(&self) -> &T {
        &self.hooks
    }

    /// Access the wrapped value mutably.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.hooks
    }
}

impl<T: AsyncReleaseHooks> Drop for AsyncDisposable<T> {
    fn drop(&mut self) {
        if !self.state.claim() {
            return;
        }

        // The managed hook is awaitable and cannot run here; only the
        // synchronous unmanaged phase is covered on this path.
        tracing::warn!("async disposable dropped without dispose; running synchronous fallback");
        if let Err(error) = self.hooks.release_unmanaged() {
            tracing::error!(%error, "unmanaged release failed during drop");
        }
        self.state.commit();
    }
}
