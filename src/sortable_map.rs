use std::fmt;
use std::hash::Hash;
use std::ops::Deref;

use crate::ordered_map::{self, OrderedMap};
use crate::sort::{self, Sortable};

/// An [`OrderedMap`] that can be reordered by key with a comparison sort.
///
/// `SortableOrderedMap` adds [`less`](SortableOrderedMap::less) to the map and
/// implements [`Sortable`], so any routine written against that trait, such as
/// [`sort::sort`], can sort the map in place. Every [`OrderedMap`] method is
/// available through [`Deref`].
///
/// Keys are compared with [`PartialOrd`]. A key type whose order is only
/// partial, such as a wrapper that hashes an `f64` by its bits and so admits
/// `NaN`, has unspecified sort results: such keys compare as neither less nor
/// greater than anything, and a map holding them may not come out sorted.
///
/// Each `less` and `swap` call takes the map's lock on its own, so sorting
/// while other threads mutate the map is safe but does not produce a sorted
/// view of any single instant.
///
/// # Examples
///
/// ```
/// use sync_ordered_map::SortableOrderedMap;
///
/// let map = SortableOrderedMap::new();
/// map.store("pear", 3);
/// map.store("apple", 1);
/// map.store_first("fig", 2);
///
/// map.sort();
/// assert!(map.is_sorted());
/// assert_eq!(map.to_string(), "[apple:1 fig:2 pear:3]");
/// ```
pub struct SortableOrderedMap<K, V> {
    map: OrderedMap<K, V>,
}

impl<K, V> SortableOrderedMap<K, V> {
    /// Makes a new, empty `SortableOrderedMap`.
    #[must_use]
    pub fn new() -> SortableOrderedMap<K, V> {
        SortableOrderedMap { map: OrderedMap::new() }
    }

    /// Unwraps the underlying [`OrderedMap`].
    #[must_use]
    pub fn into_inner(self) -> OrderedMap<K, V> {
        self.map
    }
}

impl<K: PartialOrd, V> SortableOrderedMap<K, V> {
    /// Reports whether the key at position `i` is less than the key at
    /// position `j`.
    ///
    /// Returns `false` if either index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::SortableOrderedMap;
    ///
    /// let map = SortableOrderedMap::from([("b", 1), ("a", 2)]);
    /// assert!(map.less(1, 0));
    /// assert!(!map.less(0, 1));
    /// assert!(!map.less(0, 2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn less(&self, i: usize, j: usize) -> bool {
        let raw = self.map.raw().read();
        match (raw.key_at(i), raw.key_at(j)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }

    /// Sorts the map's order by key, ascending.
    ///
    /// The sort is not stable, though keys are unique so this is only
    /// observable for keys that compare neither less nor greater.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    pub fn sort(&self) {
        sort::sort(self);
    }

    /// Reports whether the map's order is sorted by key.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        sort::is_sorted(self)
    }
}

impl<K: PartialOrd, V> Sortable for SortableOrderedMap<K, V> {
    fn len(&self) -> usize {
        self.map.len()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        SortableOrderedMap::less(self, i, j)
    }

    fn swap(&self, i: usize, j: usize) {
        self.map.swap(i, j);
    }
}

impl<K, V> Deref for SortableOrderedMap<K, V> {
    type Target = OrderedMap<K, V>;

    fn deref(&self) -> &OrderedMap<K, V> {
        &self.map
    }
}

impl<K, V> From<OrderedMap<K, V>> for SortableOrderedMap<K, V> {
    fn from(map: OrderedMap<K, V>) -> Self {
        SortableOrderedMap { map }
    }
}

impl<K: Hash + Eq + Clone, V, const N: usize> From<[(K, V); N]> for SortableOrderedMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        SortableOrderedMap { map: OrderedMap::from(arr) }
    }
}

impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for SortableOrderedMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        SortableOrderedMap {
            map: OrderedMap::from_iter(iter),
        }
    }
}

impl<K, V> Default for SortableOrderedMap<K, V> {
    fn default() -> Self {
        SortableOrderedMap::new()
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Clone for SortableOrderedMap<K, V> {
    fn clone(&self) -> Self {
        SortableOrderedMap { map: self.map.clone() }
    }
}

impl<K: Hash + Eq + Clone + fmt::Debug, V: fmt::Debug> fmt::Debug for SortableOrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.map, f)
    }
}

/// Renders the map as `[key:value key:value]`; see the `Display`
/// implementation of [`OrderedMap`].
impl<K: Hash + Eq + Clone + fmt::Display, V: fmt::Display> fmt::Display for SortableOrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(std::any::type_name::<Self>())?;
        }
        ordered_map::write_entries(f, self.map.raw().read().iter())
    }
}
