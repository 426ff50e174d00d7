use tracing::debug;

use super::{Distance, KdCell, KdNode, KdTree, KdTreeConfig};
use crate::error::KdTreeError;

/// Running bounding box threaded through the recursive build. Each level
/// narrows one side before recursing and restores it afterwards.
struct Bounds {
    lobound: Vec<f64>,
    upbound: Vec<f64>,
}

impl Bounds {
    fn around<T>(nodes: &[KdNode<T>], dimension: usize) -> Self {
        let mut lobound = vec![f64::INFINITY; dimension];
        let mut upbound = vec![f64::NEG_INFINITY; dimension];
        for node in nodes {
            for (dim, &x) in node.point.iter().enumerate() {
                lobound[dim] = lobound[dim].min(x);
                upbound[dim] = upbound[dim].max(x);
            }
        }
        Self { lobound, upbound }
    }
}

impl<T> KdTree<T> {
    pub fn with_config(points: Vec<KdNode<T>>, config: KdTreeConfig) -> Result<Self, KdTreeError> {
        let dimension = match points.first() {
            Some(first) => first.point.len(),
            None => config.weights.as_ref().map_or(0, Vec::len),
        };
        if !points.is_empty() && dimension == 0 {
            return Err(KdTreeError::ZeroDimension);
        }
        if let Some(node) = points.iter().find(|n| n.point.len() != dimension) {
            return Err(KdTreeError::DimensionMismatch {
                expected: dimension,
                found: node.point.len(),
            });
        }
        if let Some(weights) = &config.weights {
            if weights.len() != dimension {
                return Err(KdTreeError::DimensionMismatch {
                    expected: dimension,
                    found: weights.len(),
                });
            }
        }

        let mut tree = KdTree {
            nodes: points,
            cells: Vec::new(),
            root: None,
            dimension,
            distance: Distance::new(config.metric, config.weights),
        };
        let mut bounds = Bounds::around(&tree.nodes, dimension);
        let len = tree.nodes.len();
        tree.cells.reserve(len);
        tree.root = tree.build(0, len, 0, &mut bounds);

        debug!(
            points = len,
            dimension,
            metric = %tree.distance.metric(),
            "built k-d tree"
        );
        Ok(tree)
    }

    /// Builds the subtree over `nodes[a..b]` and returns its cell index.
    fn build(&mut self, a: usize, b: usize, depth: usize, bounds: &mut Bounds) -> Option<usize> {
        if a >= b {
            return None;
        }
        let cutdim = depth % self.dimension;
        let mid = a + (b - a) / 2;
        self.nodes[a..b].select_nth_unstable_by(mid - a, |p, q| {
            p.point[cutdim].total_cmp(&q.point[cutdim])
        });
        let cut = self.nodes[mid].point[cutdim];

        let cell = self.cells.len();
        self.cells.push(KdCell {
            index: mid,
            cutdim,
            loson: None,
            hison: None,
            lobound: bounds.lobound.clone(),
            upbound: bounds.upbound.clone(),
        });

        let saved = std::mem::replace(&mut bounds.upbound[cutdim], cut);
        let loson = self.build(a, mid, depth + 1, bounds);
        bounds.upbound[cutdim] = saved;

        let saved = std::mem::replace(&mut bounds.lobound[cutdim], cut);
        let hison = self.build(mid + 1, b, depth + 1, bounds);
        bounds.lobound[cutdim] = saved;

        self.cells[cell].loson = loson;
        self.cells[cell].hison = hison;
        Some(cell)
    }
}
