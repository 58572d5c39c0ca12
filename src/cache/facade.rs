//! Cache Facade Module
//!
//! The public cache handle: wires the store, the eviction policy, the disk
//! mirror, and the expiration sweeper together, and serializes all memory
//! operations behind one mutex.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::{CacheStats, CacheStore, EvictionPolicy, Headers};
use crate::config::CacheConfig;
use crate::disk::DiskMirror;
use crate::error::Result;
use crate::tasks::spawn_sweep_task;

// == Cache ==
/// A capacity-bounded cache instance.
///
/// Every `get`, `save`, and `size` call holds the instance mutex for its
/// full duration, so all memory-affecting operations are totally ordered.
/// Disk tasks are dispatched after the guard drops; slow storage never
/// blocks a cache hit, and Save reports success once the memory commit
/// succeeds, independent of disk outcome.
#[derive(Debug)]
pub struct Cache {
    store: Arc<Mutex<CacheStore>>,
    mirror: DiskMirror,
    sweeper: JoinHandle<()>,
}

impl Cache {
    // == Constructor ==
    /// Builds a cache from `config`: parses the replacement policy, opens
    /// the mount directory (creating it if absent), rehydrates persisted
    /// entries up to capacity, and starts the expiration sweeper.
    ///
    /// Fails with `BadReplacementPolicy` for an unrecognized policy string
    /// and `Mount` if the mount directory cannot be prepared.
    pub async fn new(config: &CacheConfig) -> Result<Self> {
        let policy: EvictionPolicy = config.policy.parse()?;
        let mirror = DiskMirror::open(&config.mount_path).await?;

        let mut store = CacheStore::new(policy, config.max_size_bytes);
        mirror.rehydrate(&mut store).await;

        info!(
            policy = ?policy,
            max_size_bytes = config.max_size_bytes,
            ttl_secs = config.ttl_secs,
            mount = %config.mount_path.display(),
            "cache initialized"
        );

        let store = Arc::new(Mutex::new(store));
        let sweeper = spawn_sweep_task(
            Arc::clone(&store),
            mirror.clone(),
            config.ttl(),
            config.sweep_interval(),
        );

        Ok(Self {
            store,
            mirror,
            sweeper,
        })
    }

    // == Get ==
    /// Retrieves a resource by key.
    ///
    /// A hit returns a copy of the stored body and headers and refreshes the
    /// resource's recency and access count. A miss returns `NotFound`; the
    /// caller is expected to fetch from origin and `save` the result.
    pub async fn get(&self, key: &str) -> Result<(Vec<u8>, Option<Headers>)> {
        self.store.lock().await.get(key)
    }

    // == Save ==
    /// Stores a resource, evicting under the replacement policy until it
    /// fits, then mirrors the commit to disk behind the lock: one detached
    /// write task for the new body, one detached remove task per victim.
    pub async fn save(&self, key: &str, body: Vec<u8>, headers: Option<Headers>) -> Result<()> {
        // Snapshot for the disk task before the store takes ownership.
        let snapshot = body.clone();

        let outcome = {
            let mut store = self.store.lock().await;
            store.save(key.to_string(), body, headers)?
        };

        for victim in &outcome.evicted {
            self.mirror.spawn_remove(victim);
        }
        self.mirror.spawn_write(key, snapshot);
        Ok(())
    }

    // == Size ==
    /// Current total size of cached bodies, in bytes.
    pub async fn size(&self) -> u64 {
        self.store.lock().await.size()
    }

    // == Stats ==
    /// Snapshot of the performance counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        // The sweeper holds its own Arc to the store and would otherwise
        // outlive the handle.
        self.sweeper.abort();
    }
}
