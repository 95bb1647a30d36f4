//! Insertion-ordered maps that are safe to share between threads.
//!
//! This crate provides [`OrderedMap`], a map that remembers the order in which
//! its keys were added, and [`SortableOrderedMap`], which can additionally be
//! reordered by key with an index-addressed comparison sort.
//!
//! - [`store`](OrderedMap::store) / [`store_first`](OrderedMap::store_first) - Insert at the back or front
//! - [`index`](OrderedMap::index) - Positional access, with negative positions counting from the back
//! - [`swap`](OrderedMap::swap) - Positional reordering
//! - [`range`](OrderedMap::range) - Re-entrant, weakly consistent iteration
//! - [`sort::sort`] - Sorting through the [`Sortable`](sort::Sortable) capability set
//!
//! # Example
//!
//! ```
//! use sync_ordered_map::{OrderedMap, SortableOrderedMap};
//!
//! let queue = OrderedMap::new();
//! queue.store("build", 2);
//! queue.store("test", 3);
//! queue.store_first("fetch", 1);
//!
//! // Keys keep the order they were placed in.
//! assert_eq!(queue.keys(), ["fetch", "build", "test"]);
//! assert_eq!(queue.index(-1), Some(("test", 3)));
//!
//! // Storing an existing key only updates its value.
//! queue.store("fetch", 10);
//! assert_eq!(queue.index(0), Some(("fetch", 10)));
//!
//! // Sort by key.
//! let sorted = SortableOrderedMap::from(queue);
//! sorted.sort();
//! assert_eq!(sorted.keys(), ["build", "fetch", "test"]);
//! ```
//!
//! # Concurrency
//!
//! Every operation takes `&self`. The key order and the key→value map live
//! behind one reader/writer lock, so no call ever observes one updated without
//! the other. Each call is atomic on its own; sequences of calls are not.
//! [`range`](OrderedMap::range) is the exception: it never holds the lock while
//! running its callback, trading a consistent snapshot for the freedom to call
//! back into the map.
//!
//! # Implementation
//!
//! Keys are kept twice: once in a `VecDeque` that defines their order and once
//! in a `HashMap` that holds their values. Point lookups are O(1) expected,
//! positional access is O(1), and deleting a key by name is O(n) because its
//! position has to be found.

#![forbid(unsafe_code)]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod position;
mod raw;

pub mod ordered_map;
pub mod sort;
pub mod sortable_map;

pub use ordered_map::OrderedMap;
pub use sortable_map::SortableOrderedMap;
