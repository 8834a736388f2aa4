//! Synchronous disposal wrapper.

use crate::errors::DisposeResult;

use super::{DisposeState, ReleaseHooks, StateCell};

/// A value paired with a guarded one-time disposal transition.
///
/// `Disposable` owns a [`ReleaseHooks`] implementor and guarantees its hooks
/// run exactly once, no matter how many times [`dispose`](Self::dispose) is
/// called or whether the value is simply dropped. The first trigger wins the
/// atomic claim; every later trigger is a no-op.
///
/// # Example
///
/// ```rust
/// use dropkit::{Disposable, ReleaseHooks};
/// use dropkit::errors::DisposeResult;
///
/// struct Connection {
///     open: bool,
/// }
///
/// impl ReleaseHooks for Connection {
///     fn release_managed(&mut self) -> DisposeResult<()> {
///         self.open = false;
///         Ok(())
///     }
/// }
///
/// let mut conn = Disposable::new(Connection { open: true });
/// assert!(!conn.is_disposed());
///
/// conn.dispose().unwrap();
/// assert!(conn.is_disposed());
///
/// // Idempotent: the hook does not run again.
/// conn.dispose().unwrap();
/// ```
#[derive(Debug)]
pub struct Disposable<T: ReleaseHooks> {
    hooks: T,
    state: StateCell,
}

impl<T: ReleaseHooks> Disposable<T> {
    /// Wrap a value in the disposal lifecycle, starting in the live state.
    pub const fn new(hooks: T) -> Self {
        Self {
            hooks,
            state: StateCell::new(),
        }
    }

    /// Release the wrapped value's resources.
    ///
    /// The first call runs the managed hook, then the unmanaged hook, then
    /// commits the terminal state; it returns the first hook error, if any.
    /// Subsequent calls return `Ok(())` without running anything.
    pub fn dispose(&mut self) -> DisposeResult<()> {
        if !self.state.claim() {
            return Ok(());
        }

        let managed = self.hooks.release_managed();
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

impl<T: ReleaseHooks> Drop for Disposable<T> {
    fn drop(&mut self) {
        if !self.state.claim() {
            return;
        }

        // Scope exit is deterministic and the object graph is intact, so the
        // drop path runs both phases. Hook errors have no caller to reach.
        if let Err(error) = self.hooks.release_managed() {
            tracing::error!(%error, "managed release failed during drop");
        }
        if let Err(error) = self.hooks.release_unmanaged() {
            tracing::error!(%error, "unmanaged release failed during drop");
        }
        self.state.commit();
    }
}
