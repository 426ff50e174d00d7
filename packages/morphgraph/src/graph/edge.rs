use crate::core::NodeId;

/// A connection between two nodes of the same graph.
#[derive(Clone, Debug)]
pub struct Edge<L> {
    pub(crate) from: NodeId,
    pub(crate) to: NodeId,
    pub(crate) directed: bool,
    pub(crate) weight: f64,
    pub(crate) label: Option<L>,
}

impl<L> Edge<L> {
    pub fn from_node(&self) -> NodeId {
        self.from
    }

    pub fn to_node(&self) -> NodeId {
        self.to
    }

    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.from, self.to)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn label(&self) -> Option<&L> {
        self.label.as_ref()
    }

    /// Walks the edge starting at `node`. Returns the other endpoint, or
    /// `None` when `node` is not an endpoint (or is the head of a directed edge).
    pub fn traverse(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to && !self.directed {
            Some(self.from)
        } else {
            None
        }
    }

    /// The endpoint opposite `node`, ignoring direction.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    /// Key under which parallel edges collide: ordered for directed edges,
    /// unordered for undirected ones.
    pub(crate) fn pair_key(&self) -> (NodeId, NodeId) {
        if self.directed || self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

/// Options for a single edge insertion.
#[derive(Clone, Debug)]
pub struct EdgeOptions<L> {
    pub weight: f64,
    /// `None` follows the graph's own directedness.
    pub directed: Option<bool>,
    pub label: Option<L>,
}

impl<L> Default for EdgeOptions<L> {
    fn default() -> Self {
        Self {
            weight: 1.0,
            directed: None,
            label: None,
        }
    }
}

impl<L> EdgeOptions<L> {
    #[must_use]
    pub fn weighted(weight: f64) -> Self {
        Self {
            weight,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = Some(directed);
        self
    }

    #[must_use]
    pub fn label(mut self, label: L) -> Self {
        self.label = Some(label);
        self
    }
}
