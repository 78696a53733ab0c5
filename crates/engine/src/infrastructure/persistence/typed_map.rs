use std::marker::PhantomData;
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

use sled::IVec;

use super::connection::StoreState;
use super::{KeyCodec, StoreError};
use crate::infrastructure::codec::{decode_from_slice, encode_to_vec, Codec};

/// One named map of a [`PagedStore`](super::PagedStore), typed by its key
/// encoding and value codec.
///
/// Every call checks that the store is still open before touching the
/// backend. Values decode on read; nothing is cached here.
pub struct TypedMap<K, V, C> {
    name: String,
    tree: sled::Tree,
    codec: C,
    state: Arc<StoreState>,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, C> TypedMap<K, V, C>
where
    K: KeyCodec,
    C: Codec<V>,
{
    pub(super) fn new(name: &str, tree: sled::Tree, codec: C, state: Arc<StoreState>) -> Self {
        Self {
            name: name.to_string(),
            tree,
            codec,
            state,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    fn decode_value(&self, bytes: Option<IVec>) -> Result<Option<V>, StoreError> {
        bytes
            .map(|bytes| decode_from_slice(&self.codec, &bytes))
            .transpose()
            .map_err(StoreError::from)
    }

    fn decode_entry(&self, (key, value): (IVec, IVec)) -> Result<(K, V), StoreError> {
        Ok((
            K::decode_key(&key)?,
            decode_from_slice(&self.codec, &value)?,
        ))
    }

    pub fn get(&self, key: &K) -> Result<Option<V>, StoreError> {
        self.state.ensure_open()?;
        let bytes = self
            .tree
            .get(key.encode_key())
            .map_err(|e| StoreError::backend("get", e))?;
        self.decode_value(bytes)
    }

    /// Store `value` under `key`, returning the value it replaced.
    pub fn insert(&self, key: &K, value: &V) -> Result<Option<V>, StoreError> {
        self.state.ensure_open()?;
        let bytes = encode_to_vec(&self.codec, value)?;
        let previous = self
            .tree
            .insert(key.encode_key(), bytes)
            .map_err(|e| StoreError::backend("insert", e))?;
        self.decode_value(previous)
    }

    pub fn remove(&self, key: &K) -> Result<Option<V>, StoreError> {
        self.state.ensure_open()?;
        let previous = self
            .tree
            .remove(key.encode_key())
            .map_err(|e| StoreError::backend("remove", e))?;
        self.decode_value(previous)
    }

    pub fn contains_key(&self, key: &K) -> Result<bool, StoreError> {
        self.state.ensure_open()?;
        self.tree
            .contains_key(key.encode_key())
            .map_err(|e| StoreError::backend("contains_key", e))
    }

    pub fn first_key(&self) -> Result<Option<K>, StoreError> {
        self.state.ensure_open()?;
        let first = self
            .tree
            .first()
            .map_err(|e| StoreError::backend("first_key", e))?;
        Ok(first.map(|(key, _)| K::decode_key(&key)).transpose()?)
    }

    pub fn last_key(&self) -> Result<Option<K>, StoreError> {
        self.state.ensure_open()?;
        let last = self
            .tree
            .last()
            .map_err(|e| StoreError::backend("last_key", e))?;
        Ok(last.map(|(key, _)| K::decode_key(&key)).transpose()?)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        self.state.ensure_open()?;
        Ok(self.tree.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.state.ensure_open()?;
        Ok(self.tree.is_empty())
    }

    /// All entries in key order. Each value decodes as the iterator reaches it.
    pub fn iter(&self) -> Result<impl Iterator<Item = Result<(K, V), StoreError>> + '_, StoreError> {
        self.state.ensure_open()?;
        Ok(self.tree.iter().map(move |entry| {
            let entry = entry.map_err(|e| StoreError::backend("iter", e))?;
            self.decode_entry(entry)
        }))
    }

    /// Entries whose keys fall in `range`, in key order.
    pub fn range<R>(
        &self,
        range: R,
    ) -> Result<impl Iterator<Item = Result<(K, V), StoreError>> + '_, StoreError>
    where
        R: RangeBounds<K>,
    {
        self.state.ensure_open()?;
        let encode = |bound: Bound<&K>| match bound {
            Bound::Included(key) => Bound::Included(key.encode_key()),
            Bound::Excluded(key) => Bound::Excluded(key.encode_key()),
            Bound::Unbounded => Bound::Unbounded,
        };
        let bounds = (encode(range.start_bound()), encode(range.end_bound()));
        Ok(self.tree.range::<Vec<u8>, _>(bounds).map(move |entry| {
            let entry = entry.map_err(|e| StoreError::backend("range", e))?;
            self.decode_entry(entry)
        }))
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.state.ensure_open()?;
        self.tree
            .clear()
            .map_err(|e| StoreError::backend("clear", e))
    }
}

#[cfg(test)]
mod tests {
    use super::super::PagedStore;
    use super::*;
    use crate::infrastructure::codec::{I32Codec, StringCodec};

    fn scratch() -> (tempfile::TempDir, PagedStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PagedStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn insert_returns_the_replaced_value() {
        let (_dir, store) = scratch();
        let map = store.open_map::<u64, String, _>("names", StringCodec).unwrap();
        assert_eq!(map.insert(&1, &"a".to_string()).unwrap(), None);
        assert_eq!(map.insert(&1, &"b".to_string()).unwrap(), Some("a".to_string()));
        assert_eq!(map.get(&1).unwrap(), Some("b".to_string()));
        assert_eq!(map.remove(&1).unwrap(), Some("b".to_string()));
        assert_eq!(map.get(&1).unwrap(), None);
        assert!(map.is_empty().unwrap());
    }

    #[test]
    fn numeric_keys_iterate_in_numeric_order() {
        let (_dir, store) = scratch();
        let map = store.open_map::<i32, i32, _>("levels", I32Codec).unwrap();
        for level in [3, -2, 256, 0, -300] {
            map.insert(&level, &(level * 10)).unwrap();
        }
        let keys: Vec<i32> = map.iter().unwrap().map(|e| e.unwrap().0).collect();
        assert_eq!(keys, vec![-300, -2, 0, 3, 256]);
        assert_eq!(map.first_key().unwrap(), Some(-300));
        assert_eq!(map.last_key().unwrap(), Some(256));
        assert_eq!(map.len().unwrap(), 5);
    }

    #[test]
    fn range_is_bounded_by_keys() {
        let (_dir, store) = scratch();
        let map = store.open_map::<u64, i32, _>("ticks", I32Codec).unwrap();
        for tick in 0..10u64 {
            map.insert(&tick, &(tick as i32)).unwrap();
        }
        let due: Vec<u64> = map.range(3..6).unwrap().map(|e| e.unwrap().0).collect();
        assert_eq!(due, vec![3, 4, 5]);
        let tail: Vec<u64> = map.range(8..).unwrap().map(|e| e.unwrap().0).collect();
        assert_eq!(tail, vec![8, 9]);
    }

    #[test]
    fn mismatched_codec_fails_on_read_not_open() {
        let (_dir, store) = scratch();
        let numbers = store.open_map::<u64, i32, _>("shared", I32Codec).unwrap();
        numbers.insert(&1, &-1).unwrap();

        let strings = store
            .open_map::<u64, String, _>("shared", StringCodec)
            .unwrap();
        assert!(matches!(strings.get(&1), Err(StoreError::Codec(_))));
    }

    #[test]
    fn maps_are_independent() {
        let (_dir, store) = scratch();
        let a = store.open_map::<u64, i32, _>("a", I32Codec).unwrap();
        let b = store.open_map::<u64, i32, _>("b", I32Codec).unwrap();
        a.insert(&1, &1).unwrap();
        assert!(!b.contains_key(&1).unwrap());
        a.clear().unwrap();
        assert!(a.is_empty().unwrap());
    }
}
