//! Flag-constrained mutable graphs and a k-d tree.
//!
//! A [`Graph`] is configured with [`GraphFlags`] that restrict which edge
//! sets it may hold (directed, cyclic, parallel edges, self-loops, or a
//! plain tree). The `make_*` converters rewrite the edge set to match new
//! flags. Traversals, Dijkstra and spanning trees work on top of it.
//!
//! [`KdTree`] is independent: an immutable spatial index with
//! k-nearest-neighbour queries under L1, L2 or L∞ distances.

pub mod algorithms;
pub(crate) mod arena;
pub mod core;
pub mod error;
pub mod flags;
pub mod graph;
pub mod interner;
pub mod kdtree;
pub mod traits;
pub mod traversal;

pub use algorithms::{PathEntry, ShortestPaths};
pub use self::core::*;
pub use error::*;
pub use flags::*;
pub use graph::*;
pub use interner::*;
pub use kdtree::{KdNode, KdTree, KdTreeConfig};
pub use traits::*;
pub use traversal::*;
