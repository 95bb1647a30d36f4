use std::hash::Hash;

use parking_lot::RwLock;

use super::OrderedMap;
use crate::raw::RawOrderedMap;

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty map with capacity for at least `capacity` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, i32> = OrderedMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap {
            raw: RwLock::new(RawOrderedMap::with_capacity(capacity)),
        }
    }

    /// Returns the number of keys the map can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.read().capacity()
    }
}

impl<K: Hash + Eq + Clone, V> OrderedMap<K, V> {
    /// Reserves capacity for at least `additional` more keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([(1, "a")]);
    /// map.reserve(10);
    /// assert!(map.capacity() >= 11);
    /// ```
    pub fn reserve(&self, additional: usize) {
        self.raw.write().reserve(additional);
    }

    /// Shrinks the capacity of the map as much as possible.
    pub fn shrink_to_fit(&self) {
        self.raw.write().shrink_to_fit();
    }
}
