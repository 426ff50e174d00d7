use crate::core::{EdgeId, GraphData, NodeId};

/// A vertex. The graph owns it; the node only lists the edges touching it.
#[derive(Clone, Debug)]
pub struct Node<K>
where
    K: GraphData,
{
    pub(crate) value: K,
    /// Incident edges. Self-loops are listed once.
    pub(crate) edges: Vec<EdgeId>,
    /// Disjoint-set parent; the node is its set's representative when this
    /// points back at the node itself.
    pub(crate) set_parent: NodeId,
    pub(crate) set_rank: u32,
    pub(crate) color: Option<usize>,
}

impl<K> Node<K>
where
    K: GraphData,
{
    pub(crate) fn new(value: K, id: NodeId) -> Self {
        Self {
            value,
            edges: Vec::new(),
            set_parent: id,
            set_rank: 0,
            color: None,
        }
    }

    pub fn value(&self) -> &K {
        &self.value
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn nedges(&self) -> usize {
        self.edges.len()
    }

    /// Colour assigned by the last [`colorize`](crate::Graph::colorize) run.
    pub fn color(&self) -> Option<usize> {
        self.color
    }

    pub(crate) fn detach_edge(&mut self, e: EdgeId) {
        self.edges.retain(|&x| x != e);
    }
}
