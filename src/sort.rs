//! Index-addressed, in-place comparison sorting.
//!
//! [`Sortable`] is the capability set a collection exposes so it can be
//! reordered without the sorting routine knowing anything about the element
//! type or about how the collection synchronizes access. [`sort`] and
//! [`is_sorted`] only ever call [`Sortable::len`], [`Sortable::less`], and
//! [`Sortable::swap`].
//!
//! # Examples
//!
//! ```
//! use sync_ordered_map::SortableOrderedMap;
//! use sync_ordered_map::sort;
//!
//! let map = SortableOrderedMap::from([(3, "c"), (1, "a"), (2, "b")]);
//! assert!(!sort::is_sorted(&map));
//!
//! sort::sort(&map);
//! assert!(sort::is_sorted(&map));
//! assert_eq!(map.keys(), [1, 2, 3]);
//! ```

/// Inputs at or below this length are insertion sorted.
const INSERTION_SORT_THRESHOLD: usize = 12;

/// A collection that can be sorted by element position.
///
/// Receivers are shared references because implementors are expected to
/// synchronize internally. Out-of-range indices must not panic: `less` should
/// return `false` and `swap` should do nothing.
pub trait Sortable {
    /// The number of elements in the collection.
    fn len(&self) -> usize;

    /// Reports whether the element at `i` must sort before the element at `j`.
    fn less(&self, i: usize, j: usize) -> bool;

    /// Exchanges the elements at `i` and `j`.
    fn swap(&self, i: usize, j: usize);

    /// Reports whether the collection has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sorts `data` in place in ascending order.
///
/// The sort is not stable. `data.len()` is read once, before sorting starts;
/// elements added or removed concurrently are not accounted for.
///
/// # Complexity
///
/// O(n log n) calls to `less` and `swap`.
pub fn sort<S: Sortable + ?Sized>(data: &S) {
    let n = data.len();
    log::trace!("sorting {n} elements");
    if n <= INSERTION_SORT_THRESHOLD {
        insertion_sort(data, 0, n);
    } else {
        heap_sort(data, 0, n);
    }
}

/// Reports whether `data` is sorted in ascending order.
///
/// # Complexity
///
/// O(n) calls to `less`.
#[must_use]
pub fn is_sorted<S: Sortable + ?Sized>(data: &S) -> bool {
    let n = data.len();
    (1..n).rev().all(|i| !data.less(i, i - 1))
}

fn insertion_sort<S: Sortable + ?Sized>(data: &S, a: usize, b: usize) {
    for i in a + 1..b {
        let mut j = i;
        while j > a && data.less(j, j - 1) {
            data.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Restores the max-heap property for the subtree rooted at `lo` within
/// `data[first..first + hi]`.
fn sift_down<S: Sortable + ?Sized>(data: &S, lo: usize, hi: usize, first: usize) {
    let mut root = lo;
    loop {
        let mut child = 2 * root + 1;
        if child >= hi {
            return;
        }
        if child + 1 < hi && data.less(first + child, first + child + 1) {
            child += 1;
        }
        if !data.less(first + root, first + child) {
            return;
        }
        data.swap(first + root, first + child);
        root = child;
    }
}

fn heap_sort<S: Sortable + ?Sized>(data: &S, a: usize, b: usize) {
    let first = a;
    let hi = b - a;

    for i in (0..hi / 2).rev() {
        sift_down(data, i, hi, first);
    }

    for i in (1..hi).rev() {
        data.swap(first, first + i);
        sift_down(data, 0, i, first);
    }
}
