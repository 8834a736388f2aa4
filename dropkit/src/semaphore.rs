//! Scoped semaphore acquisition.
//!
//! Pairs acquisition of a counting-semaphore slot with a handle built on the
//! disposal lifecycle, so the slot is returned exactly once no matter how the
//! handle is released: explicit `dispose`, scope exit, or both.
//!
//! Two sides are provided:
//!
//! - [`SyncSemaphore`] is a blocking counting semaphore for thread-based
//!   callers, with optional deadline-bounded waits.
//! - [`acquire_scoped`] / [`acquire_scoped_timeout`] suspend on a
//!   [`tokio::sync::Semaphore`] for async callers. Dropping the acquisition
//!   future is the cancellation path and never changes the semaphore's count.
//!
//! In both cases the semaphore is owned by the caller; this module only
//! decrements and increments the available count and never closes the
//! semaphore itself.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::{Condvar, Mutex};
use tokio::sync::Semaphore;

use crate::errors::{AcquireError, AcquireResult, DisposeResult};
use crate::lifecycle::{AsyncDisposable, AsyncReleaseHooks, Disposable, ReleaseHooks};

/// A blocking counting semaphore.
///
/// Tracks an available-slot count and supports wait-for-slot (optionally
/// bounded by a deadline) and release-a-slot operations. Acquisition through
/// [`acquire_scoped`](Self::acquire_scoped) yields a [`SemaphorePermit`] that
/// returns the slot on release.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use dropkit::SyncSemaphore;
///
/// let semaphore = Arc::new(SyncSemaphore::new(2));
///
/// let permit = semaphore.acquire_scoped();
/// assert_eq!(semaphore.available_permits(), 1);
///
/// drop(permit);
/// assert_eq!(semaphore.available_permits(), 2);
/// ```
#[derive(Debug)]
pub struct SyncSemaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl SyncSemaphore {
    /// Create a semaphore with the given number of available slots.
    pub const fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// The number of slots currently available.
    pub fn available_permits(&self) -> usize {
        *self.permits.lock()
    }

    /// Return `n` slots to the semaphore, waking blocked waiters.
    pub fn add_permits(&self, n: usize) {
        if n == 0 {
            return;
        }
        let mut permits = self.permits.lock();
        *permits += n;
        if n == 1 {
            self.available.notify_one();
        } else {
            self.available.notify_all();
        }
    }

    /// Block until a slot is available, then take it.
    fn take_permit(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.available.wait(&mut permits);
        }
        *permits -= 1;
    }

    /// Take a slot if one becomes available before the deadline.
    fn take_permit_until(&self, deadline: Instant) -> bool {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            if self.available.wait_until(&mut permits, deadline).timed_out() {
                // A slot may have been released in the same instant the wait
                // expired; check once more before reporting a timeout.
                if *permits == 0 {
                    return false;
                }
                break;
            }
        }
        *permits -= 1;
        true
    }

    /// Block until a slot is available and wrap it in a releasing handle.
    pub fn acquire_scoped(self: &Arc<Self>) -> SemaphorePermit {
        self.take_permit();
        SemaphorePermit::new(Arc::clone(self))
    }

    /// Wait up to `timeout` for a slot.
    ///
    /// A timeout is a normal outcome signaled as [`AcquireError::Timeout`];
    /// the semaphore's count is untouched in that case because no slot was
    /// ever held.
    pub fn acquire_scoped_timeout(
        self: &Arc<Self>,
        timeout: Duration,
    ) -> AcquireResult<SemaphorePermit> {
        let started = Instant::now();
        if self.take_permit_until(started + timeout) {
            Ok(SemaphorePermit::new(Arc::clone(self)))
        } else {
            Err(AcquireError::Timeout {
                waited: started.elapsed(),
            })
        }
    }
}

/// Release hooks returning one slot to a [`SyncSemaphore`].
#[derive(Debug)]
struct SlotReturn {
    semaphore: Arc<SyncSemaphore>,
}

impl ReleaseHooks for SlotReturn {
    fn release_managed(&mut self) -> DisposeResult<()> {
        self.semaphore.add_permits(1);
        Ok(())
    }
}

/// A held slot of a [`SyncSemaphore`].
///
/// The slot is returned exactly once, on the first of: an explicit
/// [`dispose`](Self::dispose) call or the permit going out of scope. Disposing
/// twice, or disposing and then dropping, increments the available count by
/// one, not two.
#[derive(Debug)]
#[must_use = "the permit returns its slot when disposed or dropped"]
pub struct SemaphorePermit {
    inner: Disposable<SlotReturn>,
}

impl SemaphorePermit {
    fn new(semaphore: Arc<SyncSemaphore>) -> Self {
        Self {
            inner: Disposable::new(SlotReturn { semaphore }),
        }
    }

    /// Return the slot to the semaphore. Idempotent.
    pub fn dispose(&mut self) -> DisposeResult<()> {
        self.inner.dispose()
    }

    /// Whether the slot has been returned.
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }
}

/// Release hooks returning one slot to a [`tokio::sync::Semaphore`].
///
/// Returning the slot is synchronous and must survive a missed `dispose`, so
/// it lives in the unmanaged phase, which the drop fallback also runs.
#[derive(Debug)]
struct AsyncSlotReturn {
    semaphore: Arc<Semaphore>,
}

#[async_trait]
impl AsyncReleaseHooks for AsyncSlotReturn {
    fn release_unmanaged(&mut self) -> DisposeResult<()> {
        self.semaphore.add_permits(1);
        Ok(())
    }
}

/// A held slot of a [`tokio::sync::Semaphore`].
///
/// The slot is returned exactly once, on the first of: an explicit
/// [`dispose`](Self::dispose) call or the permit going out of scope.
#[derive(Debug)]
#[must_use = "the permit returns its slot when disposed or dropped"]
pub struct AsyncSemaphorePermit {
    inner: AsyncDisposable<AsyncSlotReturn>,
}

impl AsyncSemaphorePermit {
    fn new(semaphore: Arc<Semaphore>) -> Self {
        Self {
            inner: AsyncDisposable::new(AsyncSlotReturn { semaphore }),
        }
    }

    /// Return the slot to the semaphore. Idempotent.
    pub async fn dispose(&mut self) -> DisposeResult<()> {
        self.inner.dispose().await
    }

    /// Whether the slot has been returned.
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }
}

/// Suspend until a slot is available and wrap it in a releasing handle.
///
/// Dropping the returned future cancels the wait without changing the
/// semaphore's count. A closed semaphore yields [`AcquireError::Closed`].
pub async fn acquire_scoped(semaphore: Arc<Semaphore>) -> AcquireResult<AsyncSemaphorePermit> {
    let permit = Arc::clone(&semaphore)
        .acquire_owned()
        .await
        .map_err(|_| AcquireError::Closed)?;

    // Our handle owns the slot from here; detach tokio's own releaser.
    permit.forget();
    Ok(AsyncSemaphorePermit::new(semaphore))
}

/// Wait up to `timeout` for a slot.
///
/// Elapsing yields [`AcquireError::Timeout`], distinct from
/// [`AcquireError::Closed`]; neither outcome changes the semaphore's count.
pub async fn acquire_scoped_timeout(
    semaphore: Arc<Semaphore>,
    timeout: Duration,
) -> AcquireResult<AsyncSemaphorePermit> {
    let started = Instant::now();
    match tokio::time::timeout(timeout, Arc::clone(&semaphore).acquire_owned()).await {
        Ok(Ok(permit)) => {
            permit.forget();
            Ok(AsyncSemaphorePermit::new(semaphore))
        }
        Ok(Err(_)) => Err(AcquireError::Closed),
        Err(_) => Err(AcquireError::Timeout {
            waited: started.elapsed(),
        }),
    }
}
