//! An immutable k-d tree for k-nearest-neighbour queries.
//!
//! ## Creation
//!
//! [`KdTree::new`] copies a set of [`KdNode`]s into the tree and splits them
//! recursively at the median of the cut dimension, which cycles with depth.
//! [`KdTree::with_config`] additionally takes per-axis weights.
//!
//! ## Search
//!
//! [`KdTree::k_nearest_neighbors`] returns the `k` closest points in
//! ascending distance. [`KdTree::k_nearest_neighbors_filtered`] only
//! returns points accepted by a [`KdPredicate`].
//!
//! ## Example
//!
//! ```
//! use morphgraph::kdtree::{DistanceMetric, KdNode, KdTree};
//!
//! let points = vec![
//!     KdNode::new(vec![0.0, 0.0], "origin"),
//!     KdNode::new(vec![5.0, 5.0], "far"),
//!     KdNode::new(vec![1.0, 0.0], "near"),
//! ];
//! let tree = KdTree::new(points, DistanceMetric::Euclidean).unwrap();
//!
//! let found = tree.k_nearest_neighbors(&[0.9, 0.1], 2).unwrap();
//! let names: Vec<&str> = found.iter().map(|n| n.node.data).collect();
//! assert_eq!(names, vec!["near", "origin"]);
//! ```

mod build;
mod distance;
mod search;

#[cfg(test)]
mod kdtree_tests;

pub use distance::{Distance, DistanceMetric};
pub use search::brute_force_k_nearest;

use crate::error::KdTreeError;

/// A point and the caller's data attached to it.
#[derive(Clone, Debug, PartialEq)]
pub struct KdNode<T> {
    pub point: Vec<f64>,
    pub data: T,
}

impl<T> KdNode<T> {
    pub fn new(point: Vec<f64>, data: T) -> Self {
        Self { point, data }
    }
}

/// One query result.
#[derive(Debug, PartialEq)]
pub struct Neighbor<'a, T> {
    /// Distance under the tree's metric (squared for Euclidean).
    pub distance: f64,
    pub node: &'a KdNode<T>,
}

impl<T> Clone for Neighbor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Neighbor<'_, T> {}

/// Decides which points a filtered query may return.
pub trait KdPredicate<T> {
    fn admits(&self, node: &KdNode<T>) -> bool;
}

impl<T, F> KdPredicate<T> for F
where
    F: Fn(&KdNode<T>) -> bool,
{
    fn admits(&self, node: &KdNode<T>) -> bool {
        self(node)
    }
}

/// Admits every point.
#[derive(Copy, Clone, Debug, Default)]
pub struct AlwaysAdmit;

impl<T> KdPredicate<T> for AlwaysAdmit {
    fn admits(&self, _node: &KdNode<T>) -> bool {
        true
    }
}

/// Construction options for a [`KdTree`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KdTreeConfig {
    pub metric: DistanceMetric,
    /// One weight per dimension; `None` weighs every axis 1.
    pub weights: Option<Vec<f64>>,
}

impl KdTreeConfig {
    #[must_use]
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Builds the config from a numeric metric code.
    pub fn from_code(code: u8) -> Result<Self, KdTreeError> {
        Ok(Self::default().with_metric(DistanceMetric::try_from(code)?))
    }
}

/// Internal node: the point at `index` splits its subtree on `cutdim`.
/// `lobound`/`upbound` bound every point of the subtree.
#[derive(Clone, Debug)]
pub(crate) struct KdCell {
    pub(crate) index: usize,
    pub(crate) cutdim: usize,
    pub(crate) loson: Option<usize>,
    pub(crate) hison: Option<usize>,
    pub(crate) lobound: Vec<f64>,
    pub(crate) upbound: Vec<f64>,
}

#[derive(Clone, Debug)]
pub struct KdTree<T> {
    pub(crate) nodes: Vec<KdNode<T>>,
    pub(crate) cells: Vec<KdCell>,
    pub(crate) root: Option<usize>,
    pub(crate) dimension: usize,
    pub(crate) distance: Distance,
}

impl<T> KdTree<T> {
    pub fn new(points: Vec<KdNode<T>>, metric: DistanceMetric) -> Result<Self, KdTreeError> {
        Self::with_config(points, KdTreeConfig::default().with_metric(metric))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of coordinates per point; 0 for an empty tree without weights.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn metric(&self) -> DistanceMetric {
        self.distance.metric()
    }

    pub fn distance(&self) -> &Distance {
        &self.distance
    }

    /// The stored points, in tree order.
    pub fn nodes(&self) -> &[KdNode<T>] {
        &self.nodes
    }

    fn check_query(&self, point: &[f64]) -> Result<(), KdTreeError> {
        if point.len() != self.dimension {
            return Err(KdTreeError::DimensionMismatch {
                expected: self.dimension,
                found: point.len(),
            });
        }
        Ok(())
    }
}
