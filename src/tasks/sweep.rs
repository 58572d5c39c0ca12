//! Expiration Sweep Task
//!
//! Background task that periodically removes resources older than the
//! configured lifetime.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::CacheStore;
use crate::disk::DiskMirror;

/// Spawns the perpetual sweeper for one cache instance.
///
/// Each wake the task takes the same lock as Get/Save, removes every
/// resource whose age exceeds `ttl`, then dispatches delete-behind tasks
/// for the removed keys after the lock is released. Because a successful
/// Get refreshes a resource's timestamp, an item read at least once per
/// interval never expires regardless of the nominal TTL.
///
/// The task runs until the returned handle is aborted; `Cache` aborts it
/// on drop.
pub fn spawn_sweep_task(
    store: Arc<Mutex<CacheStore>>,
    mirror: DiskMirror,
    ttl: Duration,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(?ttl, ?interval, "expiration sweeper started");
        loop {
            tokio::time::sleep(interval).await;

            let expired = {
                let mut store = store.lock().await;
                store.sweep_expired(ttl)
            };

            if !expired.is_empty() {
                debug!(removed = expired.len(), "sweep removed expired resources");
            }
            for key in expired {
                mirror.spawn_remove(&key);
            }
        }
    })
}
