//! Node and edge insertion/removal.
//!
//! Public methods validate their arguments; the `*_raw` and `unlink_*`
//! helpers assume live ids and leave the disjoint-set bookkeeping to their
//! callers.

use tracing::debug;

use super::{Edge, EdgeOptions, Graph, Node};
use crate::core::{EdgeId, GraphData, NodeId};
use crate::error::{GraphError, Restriction, Result};
use crate::flags::GraphFlags;
use crate::interner::AsNode;

impl<K, L> Graph<K, L>
where
    K: GraphData,
    L: Clone,
{
    /// Inserts a node for `value`. Returns false (and changes nothing) if a
    /// node with an equal payload already exists.
    pub fn add_node(&mut self, value: K) -> bool {
        if self.index.contains(&value) {
            return false;
        }
        self.insert_node_raw(value);
        true
    }

    /// Returns the node holding `value`, inserting it first if needed.
    pub fn add_node_id(&mut self, value: K) -> NodeId {
        self.node_for(value).0
    }

    pub fn add_nodes<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = K>,
    {
        values.into_iter().filter(|v| self.add_node(v.clone())).count()
    }

    fn node_for(&mut self, value: K) -> (NodeId, bool) {
        match self.index.get_id(&value) {
            Some(id) => (id, false),
            None => (self.insert_node_raw(value), true),
        }
    }

    fn insert_node_raw(&mut self, value: K) -> NodeId {
        let id = self.nodes.insert_with(|id| Node::new(value.clone(), id));
        self.index.insert(value, id);
        id
    }

    /// Adds an edge of weight 1 between two payloads, creating missing nodes.
    pub fn add_edge(&mut self, from: K, to: K) -> Result<usize> {
        self.add_edge_with(from, to, EdgeOptions::default())
    }

    /// Adds an edge between two payloads, creating missing nodes.
    ///
    /// Returns the number of physical edges created: 2 when an undirected
    /// edge is requested on a directed graph (the reverse edge is added too),
    /// 1 otherwise. Requesting a directed edge on an undirected graph fails
    /// with [`GraphError::InvalidArgument`] and leaves the graph untouched.
    pub fn add_edge_with(&mut self, from: K, to: K, options: EdgeOptions<L>) -> Result<usize> {
        self.check_directedness(&options)?;
        let (from, from_created) = self.node_for(from);
        let (to, to_created) = self.node_for(to);

        let result = self.insert_edges(from, to, options);
        if result.is_err() {
            if to_created {
                self.remove_isolated_node(to);
            }
            if from_created {
                self.remove_isolated_node(from);
            }
        }
        result
    }

    pub fn add_edge_by_id(
        &mut self,
        from: NodeId,
        to: NodeId,
        options: EdgeOptions<L>,
    ) -> Result<usize> {
        self.check_directedness(&options)?;
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        self.insert_edges(from, to, options)
    }

    /// Adds weighted edges in order, stopping at the first failure.
    pub fn add_edges<I>(&mut self, edges: I) -> Result<usize>
    where
        I: IntoIterator<Item = (K, K, f64)>,
    {
        let mut created = 0;
        for (from, to, weight) in edges {
            created += self.add_edge_with(from, to, EdgeOptions::weighted(weight))?;
        }
        Ok(created)
    }

    fn check_directedness(&self, options: &EdgeOptions<L>) -> Result<()> {
        if options.directed == Some(true) && !self.flags.contains(GraphFlags::DIRECTED) {
            return Err(GraphError::InvalidArgument(
                "an undirected graph cannot hold a directed edge".to_string(),
            ));
        }
        Ok(())
    }

    /// Creates the physical edge(s) for one logical connection.
    ///
    /// Under `CHECK_ON_INSERT` every edge is appended, validated, and on a
    /// violation removed again together with the edges this call already
    /// committed.
    pub(crate) fn insert_edges(
        &mut self,
        from: NodeId,
        to: NodeId,
        options: EdgeOptions<L>,
    ) -> Result<usize> {
        let directed = self.flags.contains(GraphFlags::DIRECTED);
        let twin = directed && options.directed == Some(false) && from != to;
        let EdgeOptions { weight, label, .. } = options;

        let mut pairs = vec![(from, to)];
        if twin {
            pairs.push((to, from));
        }

        let mut committed = Vec::with_capacity(pairs.len());
        for (a, b) in pairs {
            let e = self.insert_edge_raw(a, b, directed, weight, label.clone());
            if self.flags.contains(GraphFlags::CHECK_ON_INSERT) {
                if let Some(restriction) = self.violation(e) {
                    self.unlink_edge(e);
                    self.remove_edges(&committed);
                    debug!(%restriction, from = %a, to = %b, "edge insertion rolled back");
                    return Err(GraphError::RestrictionViolation(restriction));
                }
            }
            self.commit_edge(e);
            committed.push(e);
        }
        Ok(committed.len())
    }

    /// The restriction `e` breaks, if any. `e` is already linked but not yet
    /// merged into the disjoint sets.
    fn violation(&self, e: EdgeId) -> Option<Restriction> {
        let edge = self.edges.get(e)?;
        let (from, to) = edge.endpoints();

        if from == to && !self.flags.contains(GraphFlags::SELF_CONNECTED) {
            return Some(Restriction::SelfLoop);
        }
        if !self.flags.contains(GraphFlags::MULTI_CONNECTED) && self.has_parallel(e) {
            return Some(Restriction::ParallelEdge);
        }
        if !self.flags.contains(GraphFlags::CYCLIC) {
            let closes_cycle = if from == to {
                true
            } else if edge.directed {
                self.directed_path(to, from)
            } else {
                self.set_find(from) == self.set_find(to)
            };
            if closes_cycle {
                return Some(Restriction::Cycle);
            }
        }
        None
    }

    fn has_parallel(&self, e: EdgeId) -> bool {
        let Some(edge) = self.edges.get(e) else {
            return false;
        };
        let key = edge.pair_key();
        self.nodes.get(edge.from).is_some_and(|node| {
            node.edges.iter().any(|&other| {
                other != e
                    && self
                        .edges
                        .get(other)
                        .is_some_and(|o| o.directed == edge.directed && o.pair_key() == key)
            })
        })
    }

    pub(crate) fn insert_edge_raw(
        &mut self,
        from: NodeId,
        to: NodeId,
        directed: bool,
        weight: f64,
        label: Option<L>,
    ) -> EdgeId {
        let e = self.edges.insert(Edge {
            from,
            to,
            directed,
            weight,
            label,
        });
        if let Some(node) = self.nodes.get_mut(from) {
            node.edges.push(e);
        }
        if to != from {
            if let Some(node) = self.nodes.get_mut(to) {
                node.edges.push(e);
            }
        }
        e
    }

    /// Drops `e` from the arena and from its endpoints' incidence lists.
    pub(crate) fn unlink_edge(&mut self, e: EdgeId) -> Option<Edge<L>> {
        let edge = self.edges.remove(e)?;
        if let Some(node) = self.nodes.get_mut(edge.from) {
            node.detach_edge(e);
        }
        if let Some(node) = self.nodes.get_mut(edge.to) {
            node.detach_edge(e);
        }
        Some(edge)
    }

    /// Removes a batch of edges, then re-partitions the components they
    /// touched.
    pub(crate) fn remove_edges(&mut self, victims: &[EdgeId]) {
        if victims.is_empty() {
            return;
        }
        let mut seeds = Vec::with_capacity(victims.len() * 2);
        for &e in victims {
            if let Some(edge) = self.unlink_edge(e) {
                seeds.push(edge.from);
                seeds.push(edge.to);
            }
        }
        self.repartition(seeds);
    }

    fn remove_isolated_node(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(id) {
            self.index.remove(&node.value);
        }
    }

    fn remove_node_inner(&mut self, id: NodeId) {
        let incident = self
            .nodes
            .get(id)
            .map(|node| node.edges.clone())
            .unwrap_or_default();
        self.remove_edges(&incident);
        self.remove_isolated_node(id);
    }

    /// Removes a node and bridges the gap it leaves.
    ///
    /// Every (in-edge, out-edge) pair through the node becomes an edge
    /// between the two outer endpoints whose weight is the sum of both.
    /// Bridges that would be self-loops are skipped unless the graph is
    /// `SELF_CONNECTED`; under `CHECK_ON_INSERT` violating bridges are skipped.
    pub fn remove_node(&mut self, node: impl AsNode<K>) -> Result<()> {
        let id = self.resolve(node)?;
        let bridges = self.bridges_through(id);
        self.remove_node_inner(id);

        let self_loops_allowed = self.flags.contains(GraphFlags::SELF_CONNECTED);
        for (a, b, weight) in bridges {
            if a == b && !self_loops_allowed {
                continue;
            }
            match self.insert_edges(a, b, EdgeOptions::weighted(weight)) {
                Ok(_) => {}
                Err(GraphError::RestrictionViolation(restriction)) => {
                    debug!(%restriction, from = %a, to = %b, "skipped bridge edge");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn bridges_through(&self, id: NodeId) -> Vec<(NodeId, NodeId, f64)> {
        let incident: Vec<&Edge<L>> = self
            .nodes
            .get(id)
            .map(|node| {
                node.edges
                    .iter()
                    .filter_map(|&e| self.edges.get(e))
                    .filter(|edge| !edge.is_self_loop())
                    .collect()
            })
            .unwrap_or_default();

        let mut bridges = Vec::new();
        if self.flags.contains(GraphFlags::DIRECTED) {
            for incoming in incident.iter().filter(|e| e.to == id) {
                for outgoing in incident.iter().filter(|e| e.from == id) {
                    bridges.push((incoming.from, outgoing.to, incoming.weight + outgoing.weight));
                }
            }
        } else {
            for (i, first) in incident.iter().enumerate() {
                for second in &incident[i + 1..] {
                    if let (Some(a), Some(b)) = (first.other(id), second.other(id)) {
                        bridges.push((a, b, first.weight + second.weight));
                    }
                }
            }
        }
        bridges
    }

    /// Removes a node together with its incident edges, without bridging.
    pub fn remove_node_and_edges(&mut self, node: impl AsNode<K>) -> Result<()> {
        let id = self.resolve(node)?;
        self.remove_node_inner(id);
        Ok(())
    }

    /// Removes every edge connecting `from` to `to` and returns how many
    /// there were. Undirected edges match in either orientation.
    pub fn remove_edge(&mut self, from: impl AsNode<K>, to: impl AsNode<K>) -> Result<usize> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        let victims = self.edges_between_ids(from, to);
        if victims.is_empty() {
            return Err(GraphError::EdgeNotFound(format!("{from} -> {to}")));
        }
        self.remove_edges(&victims);
        Ok(victims.len())
    }

    pub fn remove_edge_by_id(&mut self, e: EdgeId) -> Result<()> {
        if !self.edges.contains(e) {
            return Err(GraphError::EdgeNotFound(e.to_string()));
        }
        self.remove_edges(&[e]);
        Ok(())
    }

    pub fn remove_all_edges(&mut self) {
        let all: Vec<EdgeId> = self.edges.ids().collect();
        for e in all {
            self.unlink_edge(e);
        }
        self.reset_sets();
    }
}
