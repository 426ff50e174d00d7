//! Error types for the graph engine and the k-d tree.

use std::fmt;

use thiserror::Error;

use crate::core::EdgeId;

/// Result alias used throughout the graph engine.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Which morphology restriction an edge insertion broke.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Restriction {
    SelfLoop,
    ParallelEdge,
    Cycle,
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Restriction::SelfLoop => write!(f, "self-loops are not allowed"),
            Restriction::ParallelEdge => write!(f, "parallel edges are not allowed"),
            Restriction::Cycle => write!(f, "cycles are not allowed"),
        }
    }
}

/// Errors reported by [`Graph`](crate::Graph) and the graph algorithms.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    /// The request contradicts the graph's structure; the graph is unchanged.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("edge not found: {0}")]
    EdgeNotFound(String),

    /// Only raised when `CHECK_ON_INSERT` is set. The insertion was rolled back.
    #[error("edge insertion rolled back: {0}")]
    RestrictionViolation(Restriction),

    #[error("negative weight {weight} on edge {edge:?}")]
    NegativeWeight { edge: EdgeId, weight: f64 },

    #[error("greedy coloring needs {needed} colors but only {available} are allowed")]
    NotEnoughColors { needed: usize, available: usize },
}

/// Errors reported by [`KdTree`](crate::KdTree).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KdTreeError {
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("points must have at least one coordinate")]
    ZeroDimension,

    #[error("unknown distance metric code {0} (expected 0, 1 or 2)")]
    UnknownMetric(u8),
}
