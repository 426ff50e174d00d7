use std::fmt;

use crate::error::KdTreeError;

/// Distance metric of a [`KdTree`](super::KdTree). The discriminants are the
/// numeric metric codes accepted by `TryFrom<u8>`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DistanceMetric {
    /// L∞: largest per-axis difference.
    Chebyshev = 0,
    /// L1: sum of per-axis differences.
    Manhattan = 1,
    /// L2, compared squared.
    #[default]
    Euclidean = 2,
}

impl TryFrom<u8> for DistanceMetric {
    type Error = KdTreeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Chebyshev),
            1 => Ok(Self::Manhattan),
            2 => Ok(Self::Euclidean),
            other => Err(KdTreeError::UnknownMetric(other)),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chebyshev => "chebyshev",
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
        };
        f.write_str(name)
    }
}

/// A metric with optional per-axis weights.
///
/// The per-axis term never exceeds the full distance, which is what makes
/// the bounding-box pruning of the tree search sound. Euclidean distances
/// are left squared.
#[derive(Clone, Debug, PartialEq)]
pub struct Distance {
    metric: DistanceMetric,
    weights: Option<Vec<f64>>,
}

impl Distance {
    pub fn new(metric: DistanceMetric, weights: Option<Vec<f64>>) -> Self {
        Self { metric, weights }
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    fn weight(&self, dim: usize) -> f64 {
        self.weights
            .as_ref()
            .and_then(|w| w.get(dim).copied())
            .unwrap_or(1.0)
    }

    /// Contribution of axis `dim` to the distance between `x` and `y`.
    pub fn coordinate_distance(&self, x: f64, y: f64, dim: usize) -> f64 {
        let diff = x - y;
        match self.metric {
            DistanceMetric::Euclidean => self.weight(dim) * diff * diff,
            DistanceMetric::Chebyshev | DistanceMetric::Manhattan => self.weight(dim) * diff.abs(),
        }
    }

    /// Folds one axis term into a running total.
    pub fn accumulate(&self, total: f64, term: f64) -> f64 {
        match self.metric {
            DistanceMetric::Chebyshev => total.max(term),
            DistanceMetric::Manhattan | DistanceMetric::Euclidean => total + term,
        }
    }

    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b)
            .enumerate()
            .fold(0.0, |total, (dim, (&x, &y))| {
                self.accumulate(total, self.coordinate_distance(x, y, dim))
            })
    }
}

impl From<DistanceMetric> for Distance {
    fn from(metric: DistanceMetric) -> Self {
        Self::new(metric, None)
    }
}
