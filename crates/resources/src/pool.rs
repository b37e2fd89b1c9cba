//! Append-only arenas with typed handles.
//!
//! Entities refer to shared meshes and materials by [`Handle`]. A handle is
//! only meaningful for the pool that issued it; pools never remove items,
//! so a handle stays valid for the pool's lifetime.

use std::fmt;
use std::marker::PhantomData;

/// Typed index into a [`Pool<T>`].
pub struct Handle<T> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: u32) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Position of the item in its pool.
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

// Manual impls: derives would require `T: Clone` etc.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> std::hash::Hash for Handle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = std::any::type_name::<T>();
        let short = type_name.rsplit("::").next().unwrap_or(type_name);
        write!(f, "Handle<{}>({})", short, self.index)
    }
}

/// Append-only arena that owns its items.
#[derive(Debug)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `item` into the pool and return its handle.
    pub fn insert(&mut self, item: T) -> Handle<T> {
        let handle = Handle::new(self.items.len() as u32);
        self.items.push(item);
        handle
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.items.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.items.get_mut(handle.index())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over `(handle, item)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (Handle::new(index as u32), item))
    }
}

impl<T> std::ops::Index<Handle<T>> for Pool<T> {
    type Output = T;

    fn index(&self, handle: Handle<T>) -> &T {
        &self.items[handle.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut pool = Pool::new();
        let a = pool.insert("floor");
        let b = pool.insert("wall");

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(a), Some(&"floor"));
        assert_eq!(pool[b], "wall");
        assert_ne!(a, b);
    }

    #[test]
    fn test_foreign_handle_is_none() {
        let mut big = Pool::new();
        big.insert(1);
        let late = big.insert(2);

        let small: Pool<i32> = Pool::new();
        assert!(small.get(late).is_none());
    }

    #[test]
    fn test_get_mut() {
        let mut pool = Pool::new();
        let handle = pool.insert(1.0_f32);
        if let Some(value) = pool.get_mut(handle) {
            *value = 2.5;
        }
        assert_eq!(pool[handle], 2.5);
    }

    #[test]
    fn test_iter_order() {
        let mut pool = Pool::new();
        pool.insert('a');
        pool.insert('b');

        let collected: Vec<_> = pool.iter().map(|(h, c)| (h.index(), *c)).collect();
        assert_eq!(collected, vec![(0, 'a'), (1, 'b')]);
    }

    #[test]
    fn test_handle_debug() {
        let mut pool = Pool::new();
        let handle = pool.insert(String::new());
        assert_eq!(format!("{handle:?}"), "Handle<String>(0)");
    }
}
