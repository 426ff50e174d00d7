//! Read-only graph capability shared by the traversal and path algorithms.

use crate::core::{EdgeId, NodeId};

/// Minimal read-only graph trait. Algorithms written against it never see
/// payloads or labels, only ids, incidence and weights.
pub trait GraphBase {
    /// Number of nodes.
    fn order(&self) -> usize;
    /// Number of physical edges.
    fn size(&self) -> usize;

    fn is_directed(&self) -> bool;

    fn contains_node(&self, v: NodeId) -> bool;
    fn node_ids(&self) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Every edge touching `v`, in insertion order, regardless of direction.
    fn incident_edges(&self, v: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_>;

    /// The node reached by walking `e` starting at `from`, or `None` if the
    /// edge cannot be walked from there.
    fn traverse(&self, e: EdgeId, from: NodeId) -> Option<NodeId>;

    fn weight_of(&self, e: EdgeId) -> Option<f64>;

    /// Nodes reachable from `v` through one edge, in incidence order.
    /// A neighbour connected by several edges appears once per edge.
    fn successors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(
            self.incident_edges(v)
                .filter_map(move |e| self.traverse(e, v)),
        )
    }
}
