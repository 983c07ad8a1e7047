//! Ordered ownership container used by every aggregate of the engine.
//!
//! [`CollectionOf`] keeps its entries in insertion order. The ownership mode is
//! picked per use site through the second type parameter:
//!
//! - [`Shared`] stores `Rc<RefCell<T>>`, so the same entry may be referenced
//!   from several owners (a scene node added to two scenes, a material kept
//!   alive by its storage while objects refer to it).
//! - [`Exclusive`] stores `Box<T>`; entries are never aliased.
//!
//! Both modes accept unsized `T`, which is how scenes hold `dyn SceneNode`
//! and materials hold boxed uniform callbacks.

use std::{
    cell::RefCell,
    ops::{Index, IndexMut},
    rc::Rc,
};

use crate::error::{NginError, Result};

/// Selects how a [`CollectionOf`] owns its entries.
pub trait Ownership {
    type Ptr<T: ?Sized>;

    /// Pointer identity: both pointers refer to the same entry.
    fn same<T: ?Sized>(a: &Self::Ptr<T>, b: &Self::Ptr<T>) -> bool;
}

/// Reference-counted, aliasable entries.
#[derive(Debug)]
pub struct Shared;

/// Uniquely owned entries.
#[derive(Debug)]
pub struct Exclusive;

impl Ownership for Shared {
    type Ptr<T: ?Sized> = Rc<RefCell<T>>;

    fn same<T: ?Sized>(a: &Self::Ptr<T>, b: &Self::Ptr<T>) -> bool {
        Rc::ptr_eq(a, b)
    }
}

impl Ownership for Exclusive {
    type Ptr<T: ?Sized> = Box<T>;

    fn same<T: ?Sized>(a: &Self::Ptr<T>, b: &Self::Ptr<T>) -> bool {
        std::ptr::addr_eq(&**a as *const T, &**b as *const T)
    }
}

pub type CollectionOfShared<T> = CollectionOf<T, Shared>;
pub type CollectionOfBoxed<T> = CollectionOf<T, Exclusive>;

pub struct CollectionOf<T: ?Sized, O: Ownership = Shared> {
    items: Vec<O::Ptr<T>>,
}

impl<T: ?Sized, O: Ownership> CollectionOf<T, O> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add(&mut self, item: O::Ptr<T>) {
        self.items.push(item);
    }

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<&O::Ptr<T>> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(NginError::OutOfRange { index, len })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut O::Ptr<T>> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(NginError::OutOfRange { index, len })
    }

    pub fn front(&self) -> Option<&O::Ptr<T>> {
        self.items.first()
    }

    pub fn back(&self) -> Option<&O::Ptr<T>> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes the entry at `index`. Out-of-range indices are ignored.
    ///
    /// Returns the removed entry so callers can keep it alive on purpose;
    /// otherwise it is dropped right away.
    pub fn delete_at(&mut self, index: usize) -> Option<O::Ptr<T>> {
        if index >= self.items.len() {
            return None;
        }
        Some(self.items.remove(index))
    }

    /// Removes every entry identical to `item` and returns how many were removed.
    pub fn delete(&mut self, item: &O::Ptr<T>) -> usize {
        let before = self.items.len();
        self.items.retain(|entry| !O::same(entry, item));
        before - self.items.len()
    }

    pub fn position(&self, item: &O::Ptr<T>) -> Option<usize> {
        self.items.iter().position(|entry| O::same(entry, item))
    }

    pub fn contains(&self, item: &O::Ptr<T>) -> bool {
        self.position(item).is_some()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[O::Ptr<T>] {
        &self.items
    }

    /// Forward traversal; call `.rev()` for the reverse order.
    pub fn iter(&self) -> std::slice::Iter<'_, O::Ptr<T>> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, O::Ptr<T>> {
        self.items.iter_mut()
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.items, &mut other.items);
    }
}

impl<T: ?Sized> CollectionOf<T, Shared> {
    /// Wraps `value` in shared ownership and appends it, returning the new entry.
    pub fn add_value(&mut self, value: T) -> Rc<RefCell<T>>
    where
        T: Sized,
    {
        let entry = Rc::new(RefCell::new(value));
        self.items.push(entry.clone());
        entry
    }
}

impl<T: ?Sized, O: Ownership> Default for CollectionOf<T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for CollectionOf<T, Shared> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

/// Unchecked access: panics when `index` is out of range. Use
/// [`CollectionOf::at`] to validate indices.
impl<T: ?Sized, O: Ownership> Index<usize> for CollectionOf<T, O> {
    type Output = O::Ptr<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<T: ?Sized, O: Ownership> IndexMut<usize> for CollectionOf<T, O> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.items[index]
    }
}

impl<'a, T: ?Sized, O: Ownership> IntoIterator for &'a CollectionOf<T, O> {
    type Item = &'a O::Ptr<T>;
    type IntoIter = std::slice::Iter<'a, O::Ptr<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T: ?Sized, O: Ownership> IntoIterator for &'a mut CollectionOf<T, O> {
    type Item = &'a mut O::Ptr<T>;
    type IntoIter = std::slice::IterMut<'a, O::Ptr<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

impl<T: ?Sized, O: Ownership> std::fmt::Debug for CollectionOf<T, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionOf")
            .field("len", &self.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_delete_shrinks_by_one() {
        let mut collection: CollectionOfShared<u32> = CollectionOf::new();
        let first = collection.add_value(1);
        let second = collection.add_value(2);
        assert_eq!(collection.len(), 2);

        assert_eq!(collection.delete(&first), 1);
        assert_eq!(collection.len(), 1);
        assert!(!collection.contains(&first));
        assert!(collection.contains(&second));
        // the collection released its reference immediately
        assert_eq!(Rc::strong_count(&first), 1);
    }

    #[test]
    fn delete_removes_every_alias() {
        let mut collection: CollectionOfShared<&str> = CollectionOf::new();
        let node = Rc::new(RefCell::new("node"));
        collection.add(node.clone());
        collection.add_value("other");
        collection.add(node.clone());

        assert_eq!(collection.delete(&node), 2);
        assert_eq!(collection.len(), 1);
        assert_eq!(*collection[0].borrow(), "other");
    }

    #[test]
    fn clear_empties_collection() {
        let mut collection: CollectionOfShared<u32> = CollectionOf::new();
        (0..5).for_each(|i| _ = collection.add_value(i));
        collection.clear();
        assert_eq!(collection.size(), 0);
        assert!(collection.is_empty());
    }

    #[test]
    fn checked_access_reports_out_of_range() {
        let mut collection: CollectionOfBoxed<u32> = CollectionOf::new();
        collection.add(Box::new(7));
        assert_eq!(**collection.at(0).unwrap(), 7);
        match collection.at(1) {
            Err(NginError::OutOfRange { index, len }) => {
                assert_eq!(index, 1);
                assert_eq!(len, 1);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn delete_at_ignores_out_of_range() {
        let mut collection: CollectionOfBoxed<u32> = CollectionOf::new();
        collection.add(Box::new(1));
        assert!(collection.delete_at(3).is_none());
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.delete_at(0).map(|b| *b), Some(1));
        assert!(collection.is_empty());
    }

    #[test]
    fn keeps_insertion_order_both_ways() {
        let mut collection: CollectionOfBoxed<u32> = CollectionOf::new();
        (1..=3).for_each(|i| collection.add(Box::new(i)));
        let forward: Vec<u32> = collection.iter().map(|b| **b).collect();
        let backward: Vec<u32> = collection.iter().rev().map(|b| **b).collect();
        assert_eq!(forward, vec![1, 2, 3]);
        assert_eq!(backward, vec![3, 2, 1]);
        for item in &mut collection {
            **item *= 10;
        }
        assert_eq!(**collection.front().unwrap(), 10);
        assert_eq!(**collection.back().unwrap(), 30);
    }

    #[test]
    fn exclusive_holds_unsized_entries() {
        let mut callbacks: CollectionOfBoxed<dyn Fn(u32) -> u32> = CollectionOf::new();
        callbacks.add(Box::new(|x: u32| x + 1));
        callbacks.add(Box::new(|x: u32| x * 2));
        let results: Vec<u32> = callbacks.iter().map(|f| f(3)).collect();
        assert_eq!(results, vec![4, 6]);
    }

    #[test]
    fn shared_clone_aliases_entries() {
        let mut collection: CollectionOfShared<u32> = CollectionOf::new();
        let entry = collection.add_value(1);
        let copy = collection.clone();
        *entry.borrow_mut() = 5;
        assert_eq!(*copy[0].borrow(), 5);

        let mut other = CollectionOf::new();
        other.swap(&mut collection);
        assert!(collection.is_empty());
        assert_eq!(other.len(), 1);
    }
}
