//! Keyed resource arena.
//!
//! Resources live in a slot map and are addressed by stable handles. A key
//! lookup on top memoizes construction per canonical key, so asking twice for
//! the same key yields the same handle and thus the same instance.

use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use slotmap::{Key, SlotMap};

pub struct KeyedStorage<K, H: Key, T> {
    map: SlotMap<H, T>,
    lookup: HashMap<K, H>,
}

impl<K: Hash + Eq, H: Key, T> KeyedStorage<K, H, T> {
    pub fn new() -> Self {
        Self {
            map: SlotMap::with_key(),
            lookup: HashMap::new(),
        }
    }

    /// Returns the handle stored under `key`, building and inserting the
    /// resource first if there is none. A failing `build` inserts nothing.
    ///
    /// The flag is `true` when the resource was created by this call.
    pub fn get_or_try_insert_with<Q, E>(
        &mut self,
        key: &Q,
        build: impl FnOnce() -> Result<T, E>,
    ) -> Result<(H, bool), E>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if let Some(&handle) = self.lookup.get(key) {
            return Ok((handle, false));
        }
        let handle = self.map.insert(build()?);
        self.lookup.insert(key.to_owned(), handle);
        Ok((handle, true))
    }

    pub fn handle<Q>(&self, key: &Q) -> Option<H>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup.get(key).copied()
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        self.map.get(handle)
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.map.get_mut(handle)
    }

    pub fn contains(&self, handle: H) -> bool {
        self.map.contains_key(handle)
    }

    /// Frees the resource and forgets its key. Handles to it go stale.
    pub fn release(&mut self, handle: H) -> Option<T> {
        let resource = self.map.remove(handle)?;
        self.lookup.retain(|_, h| *h != handle);
        Some(resource)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Hash + Eq, H: Key, T> Default for KeyedStorage<K, H, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use slotmap::new_key_type;

    use super::*;

    new_key_type! {
        struct TestHandle;
    }

    #[test]
    fn builds_once_per_key() {
        let mut storage: KeyedStorage<String, TestHandle, String> = KeyedStorage::new();
        let mut builds = 0;
        let (first, created) = storage
            .get_or_try_insert_with::<str, ()>("a", || {
                builds += 1;
                Ok("A".to_string())
            })
            .unwrap();
        assert!(created);
        let (second, created) = storage
            .get_or_try_insert_with::<str, ()>("a", || {
                builds += 1;
                Ok("other".to_string())
            })
            .unwrap();
        assert!(!created);
        assert_eq!(first, second);
        assert_eq!(builds, 1);
        assert_eq!(storage.get(first).map(String::as_str), Some("A"));
    }

    #[test]
    fn failed_build_inserts_nothing() {
        let mut storage: KeyedStorage<String, TestHandle, u32> = KeyedStorage::new();
        let result = storage.get_or_try_insert_with::<str, _>("broken", || Err("no such file"));
        assert_eq!(result, Err("no such file"));
        assert!(storage.is_empty());
        assert!(storage.handle("broken").is_none());
    }

    #[test]
    fn release_makes_handle_stale() {
        let mut storage: KeyedStorage<String, TestHandle, u32> = KeyedStorage::new();
        let (handle, _) = storage.get_or_try_insert_with::<str, ()>("a", || Ok(1)).unwrap();
        assert_eq!(storage.release(handle), Some(1));
        assert!(!storage.contains(handle));
        assert!(storage.get(handle).is_none());
        assert!(storage.handle("a").is_none());

        // the key can be loaded again and gets a fresh handle
        let (fresh, created) = storage.get_or_try_insert_with::<str, ()>("a", || Ok(2)).unwrap();
        assert!(created);
        assert_ne!(fresh, handle);
    }

    #[test]
    fn keys_are_compared_as_owned_values() {
        let mut storage: KeyedStorage<Vec<u8>, TestHandle, u32> = KeyedStorage::new();
        let (a, _) = storage
            .get_or_try_insert_with::<[u8], ()>(&[0xff], || Ok(1))
            .unwrap();
        let (b, created) = storage
            .get_or_try_insert_with::<[u8], ()>(&[0xfe], || Ok(2))
            .unwrap();
        assert!(created);
        assert_ne!(a, b);
        assert_eq!(storage.handle::<[u8]>(&[0xff]), Some(a));
    }
}
