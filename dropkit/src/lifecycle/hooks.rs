//! Release-hook capability traits.

use async_trait::async_trait;

use crate::errors::DisposeResult;

/// Cleanup hooks for a synchronously disposable entity.
///
/// Implementors override the phases they need; both default to no-ops so a
/// type with only managed cleanup (or only unmanaged cleanup) implements a
/// single method. Hooks run at most once per entity, enforced by the wrapping
/// [`Disposable`](super::Disposable), and are expected to succeed: an error
/// from a hook propagates out of an explicit `dispose` call and is logged on
/// the drop path.
pub trait ReleaseHooks {
    /// Release resources whose cleanup calls back into the entity's
    /// still-valid object graph.
    fn release_managed(&mut self) -> DisposeResult<()> {
        Ok(())
    }

    /// Release resources that must be returned on every path, such as native
    /// handles or counted slots.
    fn release_unmanaged(&mut self) -> DisposeResult<()> {
        Ok(())
    }
}

/// Cleanup hooks for an asynchronously disposable entity.
///
/// The managed phase is awaitable, for resources whose cleanup is itself an
/// asynchronous operation (flushing a connection, draining a queue). The
/// unmanaged phase stays synchronous so it can also run from the `Drop`
/// fallback of [`AsyncDisposable`](super::AsyncDisposable), where nothing can
/// be awaited.
#[async_trait]
pub trait AsyncReleaseHooks: Send {
    /// Awaitable managed-resource release.
    async fn release_managed(&mut self) -> DisposeResult<()> {
        Ok(())
    }

    /// Synchronous unmanaged-resource release, runnable from `Drop`.
    fn release_unmanaged(&mut self) -> DisposeResult<()> {
        Ok(())
    }
}
