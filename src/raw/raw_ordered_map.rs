use std::borrow::Borrow;
use std::collections::hash_map::{self, HashMap};
use std::collections::vec_deque::{self, VecDeque};
use std::hash::Hash;

/// The unsynchronized dual structure behind [`OrderedMap`](crate::OrderedMap).
///
/// `order` defines the observable position of every key and `entries` holds the
/// values. Every method leaves both structures holding exactly the same set of
/// keys, with no key repeated in `order`.
#[derive(Clone)]
pub(crate) struct RawOrderedMap<K, V> {
    order: VecDeque<K>,
    entries: HashMap<K, V>,
}

impl<K, V> RawOrderedMap<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            order: VecDeque::new(),
            entries: HashMap::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(capacity),
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// The number of keys both structures can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.order.capacity().min(self.entries.capacity())
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }

    /// Keys in position order.
    pub(crate) fn keys(&self) -> vec_deque::Iter<'_, K> {
        self.order.iter()
    }

    /// Exchanges the positions of the keys at `i` and `j`.
    ///
    /// Returns `false`, leaving the order untouched, if either index is out of
    /// bounds.
    pub(crate) fn swap_indices(&mut self, i: usize, j: usize) -> bool {
        if i >= self.order.len() || j >= self.order.len() {
            return false;
        }
        self.order.swap(i, j);
        true
    }

    pub(crate) fn key_at(&self, index: usize) -> Option<&K> {
        self.order.get(index)
    }
}

impl<K: Hash + Eq + Clone, V> RawOrderedMap<K, V> {
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.order.reserve(additional);
        self.entries.reserve(additional);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.order.shrink_to_fit();
        self.entries.shrink_to_fit();
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get(key)
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.contains_key(key)
    }

    /// Returns the key and value at `index` in position order.
    pub(crate) fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        let key = self.order.get(index)?;
        let value = self.entries.get(key).expect("`RawOrderedMap::get_index()` - key missing from `entries`!");
        Some((key, value))
    }

    /// Returns the current position of `key`.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub(crate) fn position_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.entries.contains_key(key) {
            return None;
        }
        self.order.iter().position(|k| <K as Borrow<Q>>::borrow(k) == key)
    }

    /// Sets `value` for `key`, appending `key` if it is new. Returns the
    /// previous value, if any.
    pub(crate) fn insert_back(&mut self, key: K, value: V) -> Option<V> {
        match self.entries.entry(key) {
            hash_map::Entry::Occupied(mut occupied) => Some(occupied.insert(value)),
            hash_map::Entry::Vacant(vacant) => {
                self.order.push_back(vacant.key().clone());
                vacant.insert(value);
                None
            }
        }
    }

    /// Sets `value` for `key`, prepending `key` if it is new. Existing keys keep
    /// their position. Returns the previous value, if any.
    pub(crate) fn insert_front(&mut self, key: K, value: V) -> Option<V> {
        match self.entries.entry(key) {
            hash_map::Entry::Occupied(mut occupied) => Some(occupied.insert(value)),
            hash_map::Entry::Vacant(vacant) => {
                self.order.push_front(vacant.key().clone());
                vacant.insert(value);
                None
            }
        }
    }

    /// Returns the value for `key`, appending `value` under `key` first if the
    /// key is absent. The flag is `true` when the key was already present.
    pub(crate) fn get_or_insert(&mut self, key: K, value: V) -> (&V, bool) {
        match self.entries.entry(key) {
            hash_map::Entry::Occupied(occupied) => (occupied.into_mut(), true),
            hash_map::Entry::Vacant(vacant) => {
                self.order.push_back(vacant.key().clone());
                (vacant.insert(value), false)
            }
        }
    }

    /// Removes `key` from both structures.
    ///
    /// # Complexity
    ///
    /// O(n) to locate the key's position.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (key, value) = self.entries.remove_entry(key)?;
        let index = self
            .order
            .iter()
            .position(|k| *k == key)
            .expect("`RawOrderedMap::remove()` - key missing from `order`!");
        self.order.remove(index);
        Some((key, value))
    }

    pub(crate) fn pop_front(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_front()?;
        let value = self.entries.remove(&key).expect("`RawOrderedMap::pop_front()` - key missing from `entries`!");
        Some((key, value))
    }

    pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_back()?;
        let value = self.entries.remove(&key).expect("`RawOrderedMap::pop_back()` - key missing from `entries`!");
        Some((key, value))
    }

    /// Iterates entries in position order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|key| {
            let value = self.entries.get(key).expect("`RawOrderedMap::iter()` - key missing from `entries`!");
            (key, value)
        })
    }

    /// Consumes the map, yielding entries in position order.
    pub(crate) fn into_ordered_vec(self) -> Vec<(K, V)> {
        let Self { order, mut entries } = self;
        order
            .into_iter()
            .map(|key| {
                let value = entries.remove(&key).expect("`RawOrderedMap::into_ordered_vec()` - key missing from `entries`!");
                (key, value)
            })
            .collect()
    }
}

impl<K: Hash + Eq + Clone, V: PartialEq> PartialEq for RawOrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.entries == other.entries
    }
}

#[cfg(test)]
impl<K: Hash + Eq + Clone, V> RawOrderedMap<K, V> {
    /// Asserts that `order` and `entries` hold the same keys exactly once.
    pub(crate) fn assert_consistent(&self) {
        use std::collections::HashSet;

        assert_eq!(self.order.len(), self.entries.len(), "`order` and `entries` differ in length");
        let mut seen = HashSet::with_capacity(self.order.len());
        for key in &self.order {
            assert!(seen.insert(key), "duplicate key in `order`");
            assert!(self.entries.contains_key(key), "key in `order` missing from `entries`");
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn keys_of(raw: &RawOrderedMap<u8, u32>) -> Vec<u8> {
        raw.keys().copied().collect()
    }

    #[test]
    fn insert_positions() {
        let mut raw = RawOrderedMap::new();
        assert_eq!(raw.insert_back(1u8, 10u32), None);
        assert_eq!(raw.insert_back(2, 20), None);
        assert_eq!(raw.insert_front(3, 30), None);
        assert_eq!(keys_of(&raw), [3, 1, 2]);

        // Updates never move a key.
        assert_eq!(raw.insert_front(2, 21), Some(20));
        assert_eq!(raw.insert_back(3, 31), Some(30));
        assert_eq!(keys_of(&raw), [3, 1, 2]);
        assert_eq!(raw.get(&2), Some(&21));
        raw.assert_consistent();
    }

    #[test]
    fn get_or_insert_only_inserts_once() {
        let mut raw = RawOrderedMap::new();
        assert_eq!(raw.get_or_insert(7u8, 1u32), (&1, false));
        assert_eq!(raw.get_or_insert(7, 2), (&1, true));
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn swap_out_of_bounds() {
        let mut raw: RawOrderedMap<u8, u32> = RawOrderedMap::new();
        raw.insert_back(1, 1);
        raw.insert_back(2, 2);
        assert!(!raw.swap_indices(0, 2));
        assert!(raw.swap_indices(1, 1));
        assert!(raw.swap_indices(0, 1));
        assert_eq!(keys_of(&raw), [2, 1]);
    }

    #[test]
    fn into_ordered_vec_keeps_order() {
        let mut raw = RawOrderedMap::with_capacity(4);
        raw.insert_back(2u8, 20u32);
        raw.insert_front(1, 10);
        raw.insert_back(3, 30);
        assert!(raw.capacity() >= 4);
        assert_eq!(raw.into_ordered_vec(), [(1, 10), (2, 20), (3, 30)]);
    }

    proptest! {
        #[test]
        fn raw_behaves_like_model(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(u8, u32)> = Vec::new();
            let mut raw: RawOrderedMap<u8, u32> = RawOrderedMap::new();

            for operation in operations {
                match operation {
                    Operation::InsertBack(key, value) => {
                        let expected = match model.iter_mut().find(|(k, _)| *k == key) {
                            Some(entry) => Some(std::mem::replace(&mut entry.1, value)),
                            None => {
                                model.push((key, value));
                                None
                            }
                        };
                        prop_assert_eq!(raw.insert_back(key, value), expected);
                    }
                    Operation::InsertFront(key, value) => {
                        let expected = match model.iter_mut().find(|(k, _)| *k == key) {
                            Some(entry) => Some(std::mem::replace(&mut entry.1, value)),
                            None => {
                                model.insert(0, (key, value));
                                None
                            }
                        };
                        prop_assert_eq!(raw.insert_front(key, value), expected);
                    }
                    Operation::Remove(key) => {
                        let expected = model.iter().position(|(k, _)| *k == key).map(|i| model.remove(i));
                        prop_assert_eq!(raw.remove(&key), expected);
                    }
                    Operation::PopFront => {
                        let expected = (!model.is_empty()).then(|| model.remove(0));
                        prop_assert_eq!(raw.pop_front(), expected);
                    }
                    Operation::PopBack => {
                        prop_assert_eq!(raw.pop_back(), model.pop());
                    }
                    Operation::Swap(i, j) => {
                        let in_bounds = i < model.len() && j < model.len();
                        if in_bounds {
                            model.swap(i, j);
                        }
                        prop_assert_eq!(raw.swap_indices(i, j), in_bounds);
                    }
                    Operation::Clear => {
                        raw.clear();
                        model.clear();
                    }
                }

                raw.assert_consistent();
                prop_assert_eq!(raw.len(), model.len());
                prop_assert_eq!(raw.is_empty(), model.is_empty());
                for (index, (key, value)) in model.iter().enumerate() {
                    prop_assert_eq!(raw.get_index(index), Some((key, value)));
                    prop_assert_eq!(raw.position_of(key), Some(index));
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        InsertBack(u8, u32),
        InsertFront(u8, u32),
        Remove(u8),
        PopFront,
        PopBack,
        Swap(usize, usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => (any::<u8>(), any::<u32>()).prop_map(|(key, value)| Operation::InsertBack(key, value)),
            10 => (any::<u8>(), any::<u32>()).prop_map(|(key, value)| Operation::InsertFront(key, value)),
            10 => any::<u8>().prop_map(Operation::Remove),
            3 => Just(Operation::PopFront),
            3 => Just(Operation::PopBack),
            5 => (0usize..64, 0usize..64).prop_map(|(i, j)| Operation::Swap(i, j)),
            1 => Just(Operation::Clear),
        ]
    }
}
