use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{AlwaysAdmit, Distance, DistanceMetric, KdCell, KdNode, KdPredicate, KdTree, Neighbor};
use crate::error::KdTreeError;

/// Max-heap entry: the worst of the current `k` best sits on top.
#[derive(Copy, Clone, Debug)]
struct Candidate {
    distance: f64,
    index: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Keeps the `k` smallest candidates seen so far.
struct BoundedHeap {
    k: usize,
    heap: BinaryHeap<Candidate>,
}

impl BoundedHeap {
    fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k + 1),
        }
    }

    fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Distance of the current k-th best; infinite until `k` are known.
    fn worst(&self) -> f64 {
        match self.heap.peek() {
            Some(top) if self.is_full() => top.distance,
            _ => f64::INFINITY,
        }
    }

    fn offer(&mut self, candidate: Candidate) {
        if !self.is_full() {
            self.heap.push(candidate);
        } else if self.heap.peek().is_some_and(|top| candidate < *top) {
            self.heap.pop();
            self.heap.push(candidate);
        }
    }

    fn into_sorted(self) -> Vec<Candidate> {
        self.heap.into_sorted_vec()
    }
}

/// Whether the box `[lo, hi]` holds a point within `radius` of `point`.
fn bounds_overlap_ball(distance: &Distance, point: &[f64], radius: f64, lo: &[f64], hi: &[f64]) -> bool {
    let mut total = 0.0;
    for (dim, &x) in point.iter().enumerate() {
        let term = if x < lo[dim] {
            distance.coordinate_distance(x, lo[dim], dim)
        } else if x > hi[dim] {
            distance.coordinate_distance(x, hi[dim], dim)
        } else {
            0.0
        };
        total = distance.accumulate(total, term);
        if total > radius {
            return false;
        }
    }
    true
}

/// Whether the ball of `radius` around `point` lies inside the box, so no
/// point outside the box can be closer.
fn ball_within_bounds(distance: &Distance, point: &[f64], radius: f64, lo: &[f64], hi: &[f64]) -> bool {
    point.iter().enumerate().all(|(dim, &x)| {
        x >= lo[dim]
            && x <= hi[dim]
            && distance.coordinate_distance(x, lo[dim], dim) > radius
            && distance.coordinate_distance(x, hi[dim], dim) > radius
    })
}

struct Search<'q, P: ?Sized> {
    query: &'q [f64],
    predicate: &'q P,
    found: BoundedHeap,
}

impl<T> KdTree<T> {
    /// The `k` points closest to `point`, nearest first.
    pub fn k_nearest_neighbors(&self, point: &[f64], k: usize) -> Result<Vec<Neighbor<'_, T>>, KdTreeError> {
        self.k_nearest_neighbors_filtered(point, k, &AlwaysAdmit)
    }

    /// Like [`KdTree::k_nearest_neighbors`] but skips points the predicate
    /// rejects. Rejected points do not stop the search from looking past them.
    pub fn k_nearest_neighbors_filtered<P>(
        &self,
        point: &[f64],
        k: usize,
        predicate: &P,
    ) -> Result<Vec<Neighbor<'_, T>>, KdTreeError>
    where
        P: KdPredicate<T> + ?Sized,
    {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        self.check_query(point)?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut state = Search {
            query: point,
            predicate,
            found: BoundedHeap::new(k),
        };
        if let Some(root) = self.root {
            self.search(root, &mut state);
        }

        Ok(state
            .found
            .into_sorted()
            .into_iter()
            .map(|c| Neighbor {
                distance: c.distance,
                node: &self.nodes[c.index],
            })
            .collect())
    }

    pub fn nearest_neighbor(&self, point: &[f64]) -> Result<Option<Neighbor<'_, T>>, KdTreeError> {
        Ok(self.k_nearest_neighbors(point, 1)?.into_iter().next())
    }

    /// Visits the subtree at `cell`. Returns true once the k best are known
    /// to be final.
    fn search<P>(&self, cell: usize, state: &mut Search<'_, P>) -> bool
    where
        P: KdPredicate<T> + ?Sized,
    {
        let KdCell {
            index,
            cutdim,
            loson,
            hison,
            ..
        } = self.cells[cell];
        let node = &self.nodes[index];

        if state.predicate.admits(node) {
            let distance = self.distance.distance(state.query, &node.point);
            state.found.offer(Candidate { distance, index });
        }

        let (near, far) = if state.query[cutdim] < node.point[cutdim] {
            (loson, hison)
        } else {
            (hison, loson)
        };

        if let Some(near) = near {
            if self.search(near, state) {
                return true;
            }
        }

        if let Some(far) = far {
            let far_cell = &self.cells[far];
            let reachable = !state.found.is_full()
                || bounds_overlap_ball(
                    &self.distance,
                    state.query,
                    state.found.worst(),
                    &far_cell.lobound,
                    &far_cell.upbound,
                );
            if reachable && self.search(far, state) {
                return true;
            }
        }

        let here = &self.cells[cell];
        state.found.is_full()
            && ball_within_bounds(
                &self.distance,
                state.query,
                state.found.worst(),
                &here.lobound,
                &here.upbound,
            )
    }
}

/// Linear-scan k nearest neighbours, nearest first. Ties keep input order.
pub fn brute_force_k_nearest<'a, T>(
    points: &'a [KdNode<T>],
    query: &[f64],
    k: usize,
    metric: DistanceMetric,
) -> Result<Vec<Neighbor<'a, T>>, KdTreeError> {
    if let Some(node) = points.iter().find(|n| n.point.len() != query.len()) {
        return Err(KdTreeError::DimensionMismatch {
            expected: query.len(),
            found: node.point.len(),
        });
    }
    let distance = Distance::from(metric);
    let mut found: Vec<Neighbor<'a, T>> = points
        .iter()
        .map(|node| Neighbor {
            distance: distance.distance(query, &node.point),
            node,
        })
        .collect();
    found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    found.truncate(k);
    Ok(found)
}
