//! Integration tests for the disposal lifecycle, exercised through the
//! public API the way a library consumer would use it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dropkit::errors::DisposeResult;
use dropkit::{AsyncDisposable, AsyncReleaseHooks, Disposable, ReleaseHooks};

/// A consumer-defined resource with both cleanup phases.
struct FileBackedCache {
    flushes: Arc<AtomicUsize>,
    handle_closes: Arc<AtomicUsize>,
}

impl ReleaseHooks for FileBackedCache {
    fn release_managed(&mut self) -> DisposeResult<()> {
        // Flushing consults the rest of the cache's object graph.
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn release_unmanaged(&mut self) -> DisposeResult<()> {
        // Closing the handle must happen on every path.
        self.handle_closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Idempotence law: disposing N >= 1 times runs each hook exactly once, and
/// `is_disposed` is true after the first call and stays true.
#[test]
fn dispose_is_idempotent_across_many_calls() {
    let flushes = Arc::new(AtomicUsize::new(0));
    let handle_closes = Arc::new(AtomicUsize::new(0));

    let mut cache = Disposable::new(FileBackedCache {
        flushes: Arc::clone(&flushes),
        handle_closes: Arc::clone(&handle_closes),
    });

    assert!(!cache.is_disposed(), "a fresh entity must report live");

    for _ in 0..5 {
        cache.dispose().expect("release hooks to succeed");
        assert!(cache.is_disposed());
    }

    assert_eq!(flushes.load(Ordering::SeqCst), 1);
    assert_eq!(handle_closes.load(Ordering::SeqCst), 1);
}

/// Scope exit is the guaranteed-release path: a consumer who never calls
/// `dispose` still gets both hooks, once.
#[test]
fn scope_exit_releases_exactly_once() {
    let flushes = Arc::new(AtomicUsize::new(0));
    let handle_closes = Arc::new(AtomicUsize::new(0));

    {
        let _cache = Disposable::new(FileBackedCache {
            flushes: Arc::clone(&flushes),
            handle_closes: Arc::clone(&handle_closes),
        });
    }

    assert_eq!(flushes.load(Ordering::SeqCst), 1);
    assert_eq!(handle_closes.load(Ordering::SeqCst), 1);
}

/// A consumer-defined resource whose managed cleanup is awaitable.
struct StreamingSession {
    drains: Arc<AtomicUsize>,
    handle_closes: Arc<AtomicUsize>,
}

#[async_trait]
impl AsyncReleaseHooks for StreamingSession {
    async fn release_managed(&mut self) -> DisposeResult<()> {
        // Draining suspends, e.g. waiting on in-flight writes.
        tokio::task::yield_now().await;
        self.drains.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn release_unmanaged(&mut self) -> DisposeResult<()> {
        self.handle_closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Async idempotence law: the awaitable hook runs exactly once, followed by
/// the unmanaged hook exactly once, across repeated disposal.
#[tokio::test]
async fn async_dispose_is_idempotent_across_many_calls() {
    let drains = Arc::new(AtomicUsize::new(0));
    let handle_closes = Arc::new(AtomicUsize::new(0));

    let mut session = AsyncDisposable::new(StreamingSession {
        drains: Arc::clone(&drains),
        handle_closes: Arc::clone(&handle_closes),
    });

    assert!(!session.is_disposed(), "a fresh entity must report live");

    for _ in 0..5 {
        session.dispose().await.expect("release hooks to succeed");
        assert!(session.is_disposed());
    }

    assert_eq!(drains.load(Ordering::SeqCst), 1);
    assert_eq!(handle_closes.load(Ordering::SeqCst), 1);
}

/// The drop fallback for the async variant cannot await, so only the
/// unmanaged hook runs there.
#[tokio::test]
async fn async_drop_fallback_skips_the_awaitable_hook() {
    let drains = Arc::new(AtomicUsize::new(0));
    let handle_closes = Arc::new(AtomicUsize::new(0));

    {
        let _session = AsyncDisposable::new(StreamingSession {
            drains: Arc::clone(&drains),
            handle_closes: Arc::clone(&handle_closes),
        });
    }

    assert_eq!(drains.load(Ordering::SeqCst), 0);
    assert_eq!(handle_closes.load(Ordering::SeqCst), 1);
}
