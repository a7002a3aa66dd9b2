// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Time-bounded snapshot cache.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// A cached value paired with the instant it was fetched.
#[derive(Debug)]
pub struct Snapshot<T> {
    value: Arc<T>,
    fetched_at: Instant,
}

impl<T> Snapshot<T> {
    /// Creates a snapshot stamped with the current instant.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(value),
            fetched_at: Instant::now(),
        }
    }

    /// Returns the cached value.
    #[must_use]
    pub fn value(&self) -> &Arc<T> {
        &self.value
    }

    /// Returns how long ago the value was fetched.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    /// Returns true while the snapshot is younger than `window`.
    #[must_use]
    pub fn is_fresh(&self, window: Duration) -> bool {
        self.age() < window
    }
}

/// A single-slot cache that refetches its value once it is older than the
/// staleness window.
///
/// The slot is guarded by one async mutex which is held across the fetch, so
/// concurrent callers that find the snapshot stale wait for the in-flight
/// fetch instead of issuing their own. Values are handed out as `Arc`s; a
/// caller keeps a consistent view even while the slot is replaced.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use toon_lib::state::StateCache;
///
/// # async fn example() -> Result<(), std::convert::Infallible> {
/// let cache = StateCache::new(Duration::from_secs(30));
/// let value = cache.get_or_fetch(|| async { Ok::<_, std::convert::Infallible>(42) }).await?;
/// assert_eq!(*value, 42);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StateCache<T> {
    window: Duration,
    slot: Mutex<Option<Snapshot<T>>>,
}

impl<T> StateCache<T> {
    /// Creates an empty cache with the given staleness window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            slot: Mutex::new(None),
        }
    }

    /// Returns the staleness window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns the cached value, fetching a new one first when the slot is
    /// empty or the snapshot has reached the staleness window.
    ///
    /// A failed fetch leaves the previous snapshot in place.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `fetch`.
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(snapshot) = slot.as_ref()
            && snapshot.is_fresh(self.window)
        {
            return Ok(Arc::clone(snapshot.value()));
        }

        tracing::debug!(window = ?self.window, "Snapshot missing or stale, fetching");
        let snapshot = Snapshot::new(fetch().await?);
        let value = Arc::clone(snapshot.value());
        *slot = Some(snapshot);
        Ok(value)
    }

    /// Returns the cached value without fetching, even if it is stale.
    pub async fn peek(&self) -> Option<Arc<T>> {
        self.slot
            .lock()
            .await
            .as_ref()
            .map(|snapshot| Arc::clone(snapshot.value()))
    }

    /// Drops the cached snapshot so the next access fetches.
    pub async fn invalidate(&self) {
        tracing::debug!("Clearing state cache");
        *self.slot.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicU32, Ordering};

    async fn counted(cache: &StateCache<u32>, calls: &AtomicU32) -> Arc<u32> {
        cache
            .get_or_fetch(|| async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Ok::<_, Infallible>(n)
            })
            .await
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_access_within_window_fetches_once() {
        let cache = StateCache::new(Duration::from_secs(30));
        let calls = AtomicU32::new(0);

        let first = counted(&cache, &calls).await;
        tokio::time::advance(Duration::from_secs(10)).await;
        let second = counted(&cache, &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test(start_paused = true)]
    async fn access_after_window_fetches_exactly_once_more() {
        let cache = StateCache::new(Duration::from_secs(30));
        let calls = AtomicU32::new(0);

        assert_eq!(*counted(&cache, &calls).await, 1);
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(*counted(&cache, &calls).await, 2);
        assert_eq!(*counted(&cache, &calls).await, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_forces_refetch() {
        let cache = StateCache::new(Duration::from_secs(30));
        let calls = AtomicU32::new(0);

        counted(&cache, &calls).await;
        cache.invalidate().await;
        assert!(cache.peek().await.is_none());
        assert_eq!(*counted(&cache, &calls).await, 2);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_snapshot() {
        let cache = StateCache::new(Duration::ZERO);
        cache
            .get_or_fetch(|| async { Ok::<_, &str>(7) })
            .await
            .unwrap();

        let result = cache.get_or_fetch(|| async { Err::<u32, _>("offline") }).await;

        assert_eq!(result.unwrap_err(), "offline");
        assert_eq!(cache.peek().await.as_deref(), Some(&7));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_one_fetch() {
        let cache = Arc::new(StateCache::new(Duration::from_secs(30)));
        let calls = Arc::new(AtomicU32::new(0));

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_fetch(|| async {
                            tokio::time::sleep(Duration::from_millis(50)).await;
                            Ok::<_, Infallible>(calls.fetch_add(1, Ordering::SeqCst))
                        })
                        .await
                        .unwrap()
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(*task.await.unwrap(), 0);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn snapshot_freshness() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        runtime.block_on(async {
            let snapshot = Snapshot::new("status");
            assert!(snapshot.is_fresh(Duration::from_secs(1)));
            tokio::time::advance(Duration::from_secs(1)).await;
            assert!(!snapshot.is_fresh(Duration::from_secs(1)));
            assert!(!snapshot.is_fresh(Duration::ZERO));
        });
    }
}
