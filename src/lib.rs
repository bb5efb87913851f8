//! AVL tree collections for Rust.
//!
//! This crate provides [`AvlMap`] and [`AvlSet`], which are drop-in replacements
//! for the standard library's `BTreeMap` and `BTreeSet` backed by a rigidly
//! balanced AVL tree:
//!
//! - Every node's subtree heights differ by at most one, kept as a per-node
//!   balance factor in {-1, 0, +1}
//! - The tree height never exceeds 1.44 log<sub>2</sub>(n + 2), so lookups stay
//!   flat even under adversarial insertion orders
//! - [`height`](AvlMap::height) and [`equal_leaf_depths`](AvlMap::equal_leaf_depths)
//!   expose the balanced structure for inspection
//!
//! # Example
//!
//! ```
//! use yama_tree::AvlMap;
//!
//! let mut scores = AvlMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! // Standard BTreeMap operations work as expected
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Entries come back in key order
//! let names: Vec<_> = scores.keys().copied().collect();
//! assert_eq!(names, ["Alice", "Bob", "Carol"]);
//!
//! // Structural queries (extensions over the std API)
//! assert_eq!(scores.height(), 2);
//! assert!(scores.equal_leaf_depths());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Drop-in replacement** - API mirrors `std::collections::BTreeMap`/`BTreeSet`
//! - **Rigid balancing** - AVL height bound of 1.44 log<sub>2</sub>(n + 2), flatter than
//!   a red-black tree for read-heavy workloads
//! - **Cache-efficient** - Nodes live in a contiguous arena addressed by compact handles
//!
//! # Implementation
//!
//! The collections are implemented as parent-linked AVL trees stored in an arena.
//! Each node records a balance factor instead of a height; insertions and removals
//! restore the balance invariant with iterative fix-up walks that apply at most two
//! rotations per visited level. Values live in a separate arena from the node
//! wiring, which keeps value mutation and structural navigation independent.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: We have to allow unsafe code in order to performantly match BTreeMap and BTreeSet's functionality.
// #![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod avl_map;
pub mod avl_set;

pub use avl_map::AvlMap;
pub use avl_set::AvlSet;
