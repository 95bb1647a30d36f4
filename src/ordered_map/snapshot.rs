use std::hash::Hash;

use super::OrderedMap;

/// Point-in-time copies of the map's contents.
///
/// Each method takes the read lock once, so the result is a consistent view of
/// the map at a single instant. The returned vectors are independent of the map.
impl<K: Hash + Eq + Clone, V> OrderedMap<K, V> {
    /// Returns the keys in position order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::new();
    /// map.store(2, "b");
    /// map.store_first(1, "a");
    /// assert_eq!(map.keys(), [1, 2]);
    /// ```
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.raw.read().keys().cloned().collect()
    }

    /// Returns the values in the position order of their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.values(), ["b", "a"]);
    /// ```
    #[must_use]
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.raw.read().iter().map(|(_, value)| value.clone()).collect()
    }

    /// Returns every key-value pair in position order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.to_vec(), [(2, "b"), (1, "a")]);
    /// ```
    #[must_use]
    pub fn to_vec(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.raw.read().iter().map(|(key, value)| (key.clone(), value.clone())).collect()
    }
}
