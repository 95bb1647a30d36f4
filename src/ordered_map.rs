use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use parking_lot::RwLock;

use crate::position;
use crate::raw::RawOrderedMap;

mod capacity;
mod snapshot;

/// A map that remembers the order of its keys and is safe to share between
/// threads.
///
/// New keys are appended by [`store`](OrderedMap::store) or prepended by
/// [`store_first`](OrderedMap::store_first); storing an existing key only
/// replaces its value. The order can then be read by position with
/// [`index`](OrderedMap::index) and rearranged with
/// [`swap`](OrderedMap::swap).
///
/// Every method takes `&self`. The key order and the key→value map are guarded
/// together by a single reader/writer lock, so each call observes and leaves
/// both in agreement. Calls are individually atomic; there are no multi-call
/// transactions. Values leave the map as clones, never as references into it.
///
/// # Examples
///
/// ```
/// use sync_ordered_map::OrderedMap;
///
/// let map = OrderedMap::new();
/// map.store("a", 1);
/// map.store("b", 2);
/// map.store_first("c", 3);
///
/// assert_eq!(map.keys(), ["c", "a", "b"]);
/// assert_eq!(map.index(0), Some(("c", 3)));
/// assert_eq!(map.index(-1), Some(("b", 2)));
///
/// assert_eq!(map.load_and_delete_first(), Some(("c", 3)));
/// assert_eq!(map.keys(), ["a", "b"]);
/// ```
///
/// Sharing between threads:
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use sync_ordered_map::OrderedMap;
///
/// let map = Arc::new(OrderedMap::new());
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let map = Arc::clone(&map);
///         thread::spawn(move || map.store(t, t * 10))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(map.len(), 4);
/// ```
pub struct OrderedMap<K, V> {
    raw: RwLock<RawOrderedMap<K, V>>,
}

/// An owning iterator over the entries of an `OrderedMap`, in position order.
///
/// This `struct` is created by the [`into_iter`] method on [`OrderedMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// # Examples
///
/// ```
/// use sync_ordered_map::OrderedMap;
///
/// let map = OrderedMap::from([("x", 1), ("y", 2)]);
/// let mut iter = map.into_iter();
/// assert_eq!(iter.next(), Some(("x", 1)));
/// assert_eq!(iter.next_back(), Some(("y", 2)));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

impl<K, V> OrderedMap<K, V> {
    /// Makes a new, empty `OrderedMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map: OrderedMap<&str, i32> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> OrderedMap<K, V> {
        OrderedMap {
            raw: RwLock::new(RawOrderedMap::new()),
        }
    }

    /// Returns the number of keys in the map.
    ///
    /// The result is exact at the instant of the call and may be stale as soon
    /// as it returns if other threads are mutating the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.store(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.read().len()
    }

    /// Returns `true` if the map contains no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.read().is_empty()
    }

    /// Removes every key and value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([(1, "a")]);
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&self) {
        self.raw.write().clear();
    }

    /// Exchanges the positions of the keys at `i` and `j`.
    ///
    /// Values stay attached to their keys; only the order changes. Nothing
    /// happens if either index is out of bounds, and swapping an index with
    /// itself is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2)]);
    /// map.swap(0, 1);
    /// assert_eq!(map.keys(), ["b", "a"]);
    /// assert_eq!(map.load("a"), Some(1));
    ///
    /// map.swap(5, 6);
    /// assert_eq!(map.keys(), ["b", "a"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn swap(&self, i: usize, j: usize) {
        let mut raw = self.raw.write();
        if !raw.swap_indices(i, j) {
            log::trace!("`OrderedMap::swap()` ignored out-of-range indices ({i}, {j}) for length {}", raw.len());
        }
    }

    pub(crate) fn raw(&self) -> &RwLock<RawOrderedMap<K, V>> {
        &self.raw
    }
}

impl<K: Hash + Eq + Clone, V> OrderedMap<K, V> {
    /// Sets the value for `key`, appending `key` to the end of the order if it
    /// is not already in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::new();
    /// map.store("a", 1);
    /// map.store("b", 2);
    /// map.store("a", 3);
    /// assert_eq!(map.to_vec(), [("a", 3), ("b", 2)]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) expected
    pub fn store(&self, key: K, value: V) {
        self.raw.write().insert_back(key, value);
    }

    /// Sets the value for `key`, inserting `key` at the front of the order if
    /// it is not already in the map. Existing keys keep their position.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::new();
    /// map.store("a", 1);
    /// map.store_first("b", 2);
    /// map.store_first("a", 3);
    /// assert_eq!(map.to_vec(), [("b", 2), ("a", 3)]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) expected
    pub fn store_first(&self, key: K, value: V) {
        self.raw.write().insert_front(key, value);
    }

    /// Returns a clone of the value stored for `key`, or `None` if the key is
    /// absent.
    ///
    /// The key may be any borrowed form of the map's key type, but [`Hash`] and
    /// [`Eq`] on the borrowed form *must* match those for the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::new();
    /// map.store(String::from("a"), 1);
    /// assert_eq!(map.load("a"), Some(1));
    /// assert_eq!(map.load("b"), None);
    /// ```
    #[must_use]
    pub fn load<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.raw.read().get(key).cloned()
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.read().contains_key(key)
    }

    /// Returns the value already stored for `key` if there is one; otherwise
    /// stores `value` at the end of the order and returns it.
    ///
    /// The flag is `true` if the value was loaded and `false` if it was stored.
    /// The check and the store happen under one exclusive lock acquisition, so
    /// concurrent callers racing on the same absent key store exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::new();
    /// assert_eq!(map.load_or_store("a", 1), (1, false));
    /// assert_eq!(map.load_or_store("a", 2), (1, true));
    /// assert_eq!(map.load("a"), Some(1));
    /// ```
    pub fn load_or_store(&self, key: K, value: V) -> (V, bool)
    where
        V: Clone,
    {
        let mut raw = self.raw.write();
        let (actual, loaded) = raw.get_or_insert(key, value);
        (actual.clone(), loaded)
    }

    /// Removes `key` and its value. Does nothing if the key is absent.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn delete<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.write().remove(key);
    }

    /// Removes `key`, returning the value it held if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2)]);
    /// assert_eq!(map.load_and_delete("a"), Some(1));
    /// assert_eq!(map.load_and_delete("a"), None);
    /// assert_eq!(map.keys(), ["b"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn load_and_delete<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.write().remove(key).map(|(_, value)| value)
    }

    /// Removes and returns the entry at the front of the order, or `None` if
    /// the map is empty.
    ///
    /// # Complexity
    ///
    /// O(1) expected
    pub fn load_and_delete_first(&self) -> Option<(K, V)> {
        self.raw.write().pop_front()
    }

    /// Removes and returns the entry at the back of the order, or `None` if the
    /// map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2)]);
    /// assert_eq!(map.load_and_delete_last(), Some(("b", 2)));
    /// assert_eq!(map.load_and_delete_last(), Some(("a", 1)));
    /// assert_eq!(map.load_and_delete_last(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) expected
    pub fn load_and_delete_last(&self) -> Option<(K, V)> {
        self.raw.write().pop_back()
    }

    /// Returns clones of the key and value at position `n`.
    ///
    /// Non-negative `n` counts from the front, starting at `0`. Negative `n`
    /// counts from the back: `-1` is the last entry and `-len` the first.
    /// Returns `None` when `n` is outside `[-len, len)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// assert_eq!(map.index(1), Some(("b", 2)));
    /// assert_eq!(map.index(-3), Some(("a", 1)));
    /// assert_eq!(map.index(3), None);
    /// assert_eq!(map.index(-4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) expected
    #[must_use]
    pub fn index(&self, n: isize) -> Option<(K, V)>
    where
        V: Clone,
    {
        let raw = self.raw.read();
        let index = position::resolve(n, raw.len())?;
        raw.get_index(index).map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Returns the current position of `key`, or `None` if it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2)]);
    /// assert_eq!(map.position_of("b"), Some(1));
    /// assert_eq!(map.position_of("z"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn position_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.read().position_of(key)
    }

    /// Calls `f` with the position, key, and current value of each entry in
    /// order, stopping early if `f` returns `false`.
    ///
    /// `range` does not observe a consistent snapshot of the whole map. The
    /// key order is copied once when the call starts; afterwards the lock is
    /// only taken for long enough to clone each key's value, and it is never
    /// held while `f` runs. `f` may therefore call any method on this map,
    /// including ones that mutate it.
    ///
    /// Each position of the copied order is visited at most once, in order.
    /// The value passed for a key is whatever that key maps to when its turn
    /// comes, so it reflects every change made before the visit. A key that
    /// was deleted before its turn is passed with `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// let mut seen = Vec::new();
    /// map.range(|index, key, value| {
    ///     seen.push((index, *key, value));
    ///     if index == 0 {
    ///         map.delete("c");
    ///     }
    ///     true
    /// });
    /// assert_eq!(seen, [(0, "a", Some(1)), (1, "b", Some(2)), (2, "c", None)]);
    /// ```
    pub fn range<F>(&self, mut f: F)
    where
        F: FnMut(usize, &K, Option<V>) -> bool,
        V: Clone,
    {
        let keys: Vec<K> = self.raw.read().keys().cloned().collect();
        for (index, key) in keys.iter().enumerate() {
            let value = self.raw.read().get(key).cloned();
            if !f(index, key, value) {
                return;
            }
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Clone for OrderedMap<K, V> {
    /// Returns a map holding a consistent copy of this map's entries, with a
    /// lock of its own.
    fn clone(&self) -> Self {
        OrderedMap {
            raw: RwLock::new(self.raw.read().clone()),
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone + PartialEq> PartialEq for OrderedMap<K, V> {
    /// Two maps are equal if they hold the same keys in the same order with
    /// equal values.
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        // Never hold both locks at once.
        let ours = self.raw.read().clone();
        ours == *other.raw.read()
    }
}

impl<K: Hash + Eq + Clone, V: Clone + Eq> Eq for OrderedMap<K, V> {}

impl<K: Hash + Eq + Clone + fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.raw.read().iter()).finish()
    }
}

/// Renders the map as `[key:value key:value]` in position order.
///
/// The alternate form (`{:#}`) prefixes the map's type name. The format is
/// meant for diagnostics and is not guaranteed to stay the same between
/// versions.
///
/// # Examples
///
/// ```
/// use sync_ordered_map::OrderedMap;
///
/// let map = OrderedMap::from([("seven", 7), ("nine", 9), ("one", 1)]);
/// assert_eq!(map.to_string(), "[seven:7 nine:9 one:1]");
/// ```
impl<K: Hash + Eq + Clone + fmt::Display, V: fmt::Display> fmt::Display for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(std::any::type_name::<Self>())?;
        }
        write_entries(f, self.raw.read().iter())
    }
}

pub(crate) fn write_entries<'a, K, V, I>(f: &mut fmt::Formatter<'_>, entries: I) -> fmt::Result
where
    K: fmt::Display + 'a,
    V: fmt::Display + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    f.write_str("[")?;
    for (i, (key, value)) in entries.enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{key}:{value}")?;
    }
    f.write_str("]")
}

impl<K, V> Default for OrderedMap<K, V> {
    /// Creates an empty `OrderedMap`.
    fn default() -> OrderedMap<K, V> {
        OrderedMap::new()
    }
}

impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    /// Builds a map with keys in first-seen order. Later values for a repeated
    /// key replace earlier ones without moving the key.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> OrderedMap<K, V> {
        let map = OrderedMap::new();
        {
            let mut raw = map.raw.write();
            for (key, value) in iter {
                raw.insert_back(key, value);
            }
        }
        map
    }
}

impl<K: Hash + Eq + Clone, V> Extend<(K, V)> for OrderedMap<K, V> {
    /// Stores every pair as if by [`OrderedMap::store`], holding the write lock
    /// for the whole batch.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let raw = self.raw.get_mut();
        for (key, value) in iter {
            raw.insert_back(key, value);
        }
    }
}

impl<K: Hash + Eq + Clone, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V> {
    /// Converts a `[(K, V); N]` into an `OrderedMap<K, V>`, keeping the array's
    /// order.
    ///
    /// ```
    /// use sync_ordered_map::OrderedMap;
    ///
    /// let map1 = OrderedMap::from([(1, 2), (3, 4)]);
    /// let map2: OrderedMap<_, _> = [(1, 2), (3, 4)].into();
    /// assert_eq!(map1, map2);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        OrderedMap::from_iter(arr)
    }
}

impl<K: Hash + Eq + Clone, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Consumes the map, yielding its entries in position order. No lock is
    /// taken since the map is owned.
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.into_inner().into_ordered_vec().into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}
