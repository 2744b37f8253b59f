//! Collapses concurrent cache misses on the same key into one shared load.
//!
//! The first caller for a key registers its load as a shared future. Callers that
//! arrive while it is pending await the same future instead of starting their own, so
//! all of them finish together with the same outcome, success or failure.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::error::AppError;

/// Outcome of a load as seen by every caller that awaited it
pub type SharedOutcome<V> = Result<V, Arc<AppError>>;

type SharedLoad<V> = Shared<BoxFuture<'static, SharedOutcome<V>>>;

/// A registered load and the id that tells it apart from later loads of the same key
struct Pending<V: Clone> {
    id: u64,
    load: SharedLoad<V>,
}

/// In-flight loads keyed by cache key.
pub struct InFlight<V: Clone> {
    loads: Mutex<HashMap<String, Pending<V>>>,
    next_id: AtomicU64,
}

impl<V: Clone + Send + Sync + 'static> InFlight<V> {
    pub fn new() -> Self {
        Self {
            loads: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Runs `start()` for `key`, or joins the load already running for it.
    ///
    /// `start` is only called when no load is pending. The entry is removed once a
    /// caller has seen the outcome, so the next miss starts fresh.
    pub async fn run<F, Fut>(&self, key: &str, start: F) -> SharedOutcome<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, AppError>> + Send + 'static,
    {
        let (id, load) = {
            let mut loads = self.loads.lock().unwrap_or_else(|e| e.into_inner());
            match loads.get(key) {
                Some(pending) => {
                    debug!("Joining in-flight load: key={}", key);
                    (pending.id, pending.load.clone())
                }
                None => {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    let load = start().map(|r| r.map_err(Arc::new)).boxed().shared();
                    loads.insert(
                        key.to_string(),
                        Pending {
                            id,
                            load: load.clone(),
                        },
                    );
                    (id, load)
                }
            }
        };

        // Removes the entry on completion and also when this caller is cancelled,
        // so an abandoned load is never joined later
        let _release = Release {
            owner: self,
            key,
            id,
        };
        load.await
    }

    /// Number of keys with a load in flight
    pub fn active_keys(&self) -> usize {
        self.loads.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl<V: Clone + Send + Sync + 'static> Default for InFlight<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> std::fmt::Debug for InFlight<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys = self.loads.lock().map(|l| l.len()).unwrap_or_default();
        f.debug_struct("InFlight").field("keys", &keys).finish()
    }
}

struct Release<'a, V: Clone> {
    owner: &'a InFlight<V>,
    key: &'a str,
    id: u64,
}

impl<V: Clone> Drop for Release<'_, V> {
    fn drop(&mut self) {
        let mut loads = self.owner.loads.lock().unwrap_or_else(|e| e.into_inner());
        // A newer load may already own the key
        if loads.get(self.key).is_some_and(|pending| pending.id == self.id) {
            loads.remove(self.key);
        }
    }
}
