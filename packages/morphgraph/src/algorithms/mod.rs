pub mod dijkstra;
pub mod kruskal;
pub mod spanning_tree;


pub use dijkstra::*;
pub use kruskal::*;
pub use spanning_tree::*;

use std::cmp::Ordering;

/// Heap entry ordered by ascending score, so that `BinaryHeap` pops the
/// smallest score first. Equal scores pop the smallest payload first.
#[derive(Copy, Clone, Debug)]
pub(crate) struct MinScored<T>(pub f64, pub T);

impl<T: Ord> PartialEq for MinScored<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for MinScored<T> {}

impl<T: Ord> PartialOrd for MinScored<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for MinScored<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .total_cmp(&self.0)
            .then_with(|| other.1.cmp(&self.1))
    }
}
