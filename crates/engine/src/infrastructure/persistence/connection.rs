//! Paged store connection management

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use super::{KeyCodec, StoreError, TypedMap};
use crate::infrastructure::codec::Codec;

const META_TREE: &str = "meta";
const VERSION_KEY: &[u8] = b"commit_version";

/// State shared between the store handle and every map opened from it.
#[derive(Debug)]
pub(super) struct StoreState {
    closed: AtomicBool,
}

impl StoreState {
    pub(super) fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

/// Ordered, disk-backed key-value store with named maps.
///
/// Writes are visible to readers in this process immediately. They are
/// durable only once [`commit`](Self::commit) returns.
///
/// The backend holds a file lock until every handle to it is dropped,
/// including maps opened from this store. Reopening the same path in one
/// process requires dropping those first.
#[derive(Clone)]
pub struct PagedStore {
    db: sled::Db,
    meta: sled::Tree,
    state: Arc<StoreState>,
    version: Arc<AtomicU64>,
    path: PathBuf,
}

impl PagedStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let db = sled::open(&path).map_err(|e| StoreError::backend("open", e))?;
        let meta = db
            .open_tree(META_TREE)
            .map_err(|e| StoreError::backend("open", e))?;

        let version = match meta
            .get(VERSION_KEY)
            .map_err(|e| StoreError::backend("open", e))?
        {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_ref().try_into().map_err(|_| {
                    StoreError::Invalid(format!("commit version of {} bytes", bytes.len()))
                })?;
                u64::from_be_bytes(raw)
            }
            None => 0,
        };

        tracing::info!(path = %path.display(), version, "Opened paged store");

        Ok(Self {
            db,
            meta,
            state: Arc::new(StoreState {
                closed: AtomicBool::new(false),
            }),
            version: Arc::new(AtomicU64::new(version)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open (creating if needed) the named map.
    ///
    /// The codec is not checked against data already in the map. A
    /// mismatch shows up as a decode error on the first read.
    pub fn open_map<K, V, C>(&self, name: &str, codec: C) -> Result<TypedMap<K, V, C>, StoreError>
    where
        K: KeyCodec,
        C: Codec<V>,
    {
        self.state.ensure_open()?;
        if name == META_TREE {
            return Err(StoreError::Invalid(format!("map name {name} is reserved")));
        }
        let tree = self
            .db
            .open_tree(name)
            .map_err(|e| StoreError::backend("open_map", e))?;
        Ok(TypedMap::new(name, tree, codec, Arc::clone(&self.state)))
    }

    /// Flush every map to disk and return the new commit version.
    ///
    /// Versions grow by one per commit and carry on across reopen.
    pub fn commit(&self) -> Result<u64, StoreError> {
        self.state.ensure_open()?;
        let next = self.version.load(Ordering::Acquire) + 1;
        self.meta
            .insert(VERSION_KEY, next.to_be_bytes().to_vec())
            .map_err(|e| StoreError::backend("commit", e))?;
        self.db
            .flush()
            .map_err(|e| StoreError::backend("commit", e))?;
        self.version.store(next, Ordering::Release);
        tracing::debug!(version = next, "Committed paged store");
        Ok(next)
    }

    /// Version of the last successful commit, `0` for a fresh store.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Commit, then refuse every later call on this store and its maps.
    pub fn close(&self) -> Result<(), StoreError> {
        let version = self.commit()?;
        self.state.closed.store(true, Ordering::Release);
        tracing::info!(path = %self.path.display(), version, "Closed paged store");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::codec::StringCodec;

    #[test]
    fn commit_versions_continue_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = PagedStore::open(dir.path()).unwrap();
            assert_eq!(store.version(), 0);
            assert_eq!(store.commit().unwrap(), 1);
            assert_eq!(store.commit().unwrap(), 2);
        }
        let store = PagedStore::open(dir.path()).unwrap();
        assert_eq!(store.version(), 2);
        assert_eq!(store.commit().unwrap(), 3);
    }

    #[test]
    fn closed_store_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let store = PagedStore::open(dir.path()).unwrap();
        let names = store
            .open_map::<u64, String, _>("names", StringCodec)
            .unwrap();
        store.close().unwrap();

        assert!(store.is_closed());
        assert!(store.commit().unwrap_err().is_closed());
        assert!(store.close().unwrap_err().is_closed());
        assert!(names.get(&1).unwrap_err().is_closed());
        assert!(store
            .open_map::<u64, String, _>("other", StringCodec)
            .is_err());
    }

    #[test]
    fn meta_tree_is_reserved() {
        let dir = tempfile::tempdir().unwrap();
        let store = PagedStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.open_map::<u64, String, _>(META_TREE, StringCodec),
            Err(StoreError::Invalid(_))
        ));
    }

    #[test]
    fn committed_writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = PagedStore::open(dir.path()).unwrap();
            let names = store
                .open_map::<u64, String, _>("names", StringCodec)
                .unwrap();
            names.insert(&7, &"seven".to_string()).unwrap();
            store.close().unwrap();
        }
        let store = PagedStore::open(dir.path()).unwrap();
        let names = store
            .open_map::<u64, String, _>("names", StringCodec)
            .unwrap();
        assert_eq!(names.get(&7).unwrap(), Some("seven".to_string()));
    }
}
