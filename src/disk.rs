//! Disk Mirror Module
//!
//! Best-effort persistence behind the in-memory index: write-behind on save,
//! delete-behind on eviction/expiry, and one-time rehydration at startup.
//! The memory index is the sole source of truth; disk is never consulted to
//! answer a Get, and every steady-state I/O failure is swallowed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::cache::{from_disk_name, to_disk_name, CacheStore};

// == Disk Mirror ==
/// Handle to the mount directory backing one cache instance.
///
/// Write and delete tasks are fire-and-forget: they are spawned outside the
/// cache lock, carry their own snapshot of the body bytes, and are not
/// ordered relative to each other or to later memory mutations on the same
/// key. A rapid save/evict/re-save can therefore leave the file behind the
/// latest memory content, which is acceptable because disk is only read at
/// startup.
#[derive(Debug, Clone)]
pub struct DiskMirror {
    mount_path: PathBuf,
}

impl DiskMirror {
    // == Constructor ==
    /// Opens the mirror at `mount_path`, creating the directory if it does
    /// not exist. Only this construction-time failure surfaces to callers.
    pub async fn open(mount_path: &Path) -> std::io::Result<Self> {
        match fs::metadata(mount_path).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(std::io::Error::new(
                    ErrorKind::AlreadyExists,
                    format!("mount path {} exists and is not a directory", mount_path.display()),
                ));
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(mount_path).await?;
                info!(mount = %mount_path.display(), "created cache mount directory");
            }
            Err(err) => return Err(err),
        }
        Ok(Self {
            mount_path: mount_path.to_path_buf(),
        })
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.mount_path.join(to_disk_name(key))
    }

    // == Write Behind ==
    /// Spawns a detached task that writes `body` to the key's file and
    /// flushes it to stable storage. Failures are logged and dropped.
    pub fn spawn_write(&self, key: &str, body: Vec<u8>) {
        let path = self.file_path(key);
        tokio::spawn(async move {
            if let Err(err) = write_and_sync(&path, &body).await {
                debug!(path = %path.display(), %err, "write-behind failed");
            }
        });
    }

    // == Delete Behind ==
    /// Spawns a detached task that removes the key's file. A file that is
    /// already gone is not an error.
    pub fn spawn_remove(&self, key: &str) {
        let path = self.file_path(key);
        tokio::spawn(async move {
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => debug!(path = %path.display(), %err, "delete-behind failed"),
            }
        });
    }

    // == Rehydration ==
    /// Loads previously persisted files into `store`, in filesystem
    /// enumeration order, skipping any file that does not fit in the
    /// remaining capacity. Skipped files stay on disk untouched. Which
    /// subset of an over-capacity directory loads is therefore
    /// nondeterministic across runs.
    pub async fn rehydrate(&self, store: &mut CacheStore) -> usize {
        let mut dir = match fs::read_dir(&self.mount_path).await {
            Ok(dir) => dir,
            Err(err) => {
                warn!(mount = %self.mount_path.display(), %err, "could not enumerate mount directory");
                return 0;
            }
        };

        let mut loaded = 0;
        loop {
            let entry = match dir.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => {
                    warn!(%err, "mount directory enumeration stopped early");
                    break;
                }
            };

            let meta = match entry.metadata().await {
                Ok(meta) => meta,
                Err(_) => continue,
            };
            if !meta.is_file() {
                continue;
            }

            // Check the length before reading so an over-capacity file is
            // skipped without pulling its bytes into memory.
            if store.size() + meta.len() > store.max_size() {
                debug!(file = %entry.path().display(), "skipping persisted file, over capacity");
                continue;
            }

            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let key = from_disk_name(name);

            let body = match fs::read(entry.path()).await {
                Ok(body) => body,
                Err(_) => continue,
            };
            if store.admit_rehydrated(key.clone(), body) {
                debug!(%key, "rehydrated resource from disk");
                loaded += 1;
            }
        }

        info!(loaded, size_bytes = store.size(), "finished loading cache from disk");
        loaded
    }
}

async fn write_and_sync(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(body).await?;
    file.sync_all().await?;
    Ok(())
}
