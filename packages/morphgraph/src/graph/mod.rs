//! The mutable, flag-constrained graph.
//!
//! A [`Graph`] owns its nodes and edges in generational arenas and keeps a
//! payload-to-node map, the morphology [`GraphFlags`] and an incremental
//! disjoint-set partition of its nodes.
//!
//! # Example
//!
//! ```rust
//! use morphgraph::{Graph, GraphFlags, EdgeOptions};
//!
//! let mut graph: Graph<&str> = Graph::new(GraphFlags::UNDIRECTED);
//! graph.add_edge_with("a", "b", EdgeOptions::weighted(2.0)).unwrap();
//! graph.add_edge_with("b", "c", EdgeOptions::weighted(3.0)).unwrap();
//!
//! assert!(graph.has_edge(&"c", &"b"));
//! assert_eq!(graph.nsubgraphs(), 1);
//!
//! let paths = graph.dijkstra_shortest_path(&"a").unwrap();
//! let c = graph.get_node(&"c").unwrap();
//! assert_eq!(paths.cost_to(c), Some(5.0));
//! ```

mod coloring;
mod edge;
mod morphology;
mod mutate;
mod node;
mod subgraphs;

#[cfg(test)]
mod morphology_tests;
#[cfg(test)]
mod subgraphs_tests;

pub use edge::{Edge, EdgeOptions};
pub use node::Node;

use indexmap::IndexMap;

use crate::algorithms::{self, ShortestPaths};
use crate::arena::Arena;
use crate::core::{EdgeId, GraphData, NodeId};
use crate::error::{GraphError, Result};
use crate::flags::GraphFlags;
use crate::interner::{AsNode, NodeInterner};
use crate::traits::GraphBase;
use crate::traversal::{BfsIterator, DfsIterator};

#[derive(Clone, Debug)]
pub struct Graph<K, L = ()>
where
    K: GraphData,
{
    pub(crate) nodes: Arena<NodeId, Node<K>>,
    pub(crate) edges: Arena<EdgeId, Edge<L>>,
    pub(crate) index: NodeInterner<K>,
    pub(crate) flags: GraphFlags,
}

impl<K: GraphData, L: Clone> Default for Graph<K, L> {
    fn default() -> Self {
        Self::new(GraphFlags::FREE)
    }
}

impl<K, L> Graph<K, L>
where
    K: GraphData,
    L: Clone,
{
    /// Creates an empty graph. The flags are closed under the implication
    /// rules before use.
    pub fn new(flags: GraphFlags) -> Self {
        Self {
            nodes: Arena::new(),
            edges: Arena::new(),
            index: NodeInterner::new(),
            flags: flags.normalized(),
        }
    }

    pub fn flags(&self) -> GraphFlags {
        self.flags
    }

    pub fn has_flag(&self, flag: GraphFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn nnodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn nedges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    pub(crate) fn resolve(&self, node: impl AsNode<K>) -> Result<NodeId> {
        node.lookup(&self.index)
            .filter(|id| self.nodes.contains(*id))
            .ok_or_else(|| GraphError::NodeNotFound(node.describe()))
    }

    pub fn has_node(&self, node: impl AsNode<K>) -> bool {
        node.lookup(&self.index)
            .is_some_and(|id| self.nodes.contains(id))
    }

    pub fn get_node(&self, value: &K) -> Result<NodeId> {
        self.resolve(value)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<K>> {
        self.nodes.get(id)
    }

    pub fn value(&self, node: impl AsNode<K>) -> Result<&K> {
        let id = self.resolve(node)?;
        self.nodes
            .get(id)
            .map(|n| &n.value)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    /// Node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.ids()
    }

    pub fn node_values(&self) -> impl Iterator<Item = &K> + '_ {
        self.index.iter().map(|(k, _)| k)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge<L>> {
        self.edges.get(id)
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge<L>)> + '_ {
        self.edges.iter()
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.ids()
    }

    /// Whether `e` connects `from` to `to`. Undirected edges match either way round.
    fn edge_matches(edge: &Edge<L>, from: NodeId, to: NodeId) -> bool {
        (edge.from == from && edge.to == to)
            || (!edge.directed && edge.from == to && edge.to == from)
    }

    pub(crate) fn edges_between_ids(&self, from: NodeId, to: NodeId) -> Vec<EdgeId> {
        let Some(node) = self.nodes.get(from) else {
            return Vec::new();
        };
        node.edges
            .iter()
            .copied()
            .filter(|&e| {
                self.edges
                    .get(e)
                    .is_some_and(|edge| Self::edge_matches(edge, from, to))
            })
            .collect()
    }

    pub fn has_edge(&self, from: impl AsNode<K>, to: impl AsNode<K>) -> bool {
        match (self.resolve(from), self.resolve(to)) {
            (Ok(from), Ok(to)) => !self.edges_between_ids(from, to).is_empty(),
            _ => false,
        }
    }

    pub fn edges_between(&self, from: impl AsNode<K>, to: impl AsNode<K>) -> Result<Vec<EdgeId>> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        Ok(self.edges_between_ids(from, to))
    }

    /// Edges that can be walked away from `node`.
    pub fn out_edges(&self, node: impl AsNode<K>) -> Result<Vec<EdgeId>> {
        let id = self.resolve(node)?;
        Ok(self
            .incident_edges(id)
            .filter(|&e| self.traverse(e, id).is_some())
            .collect())
    }

    /// Edges that can be walked into `node`.
    pub fn in_edges(&self, node: impl AsNode<K>) -> Result<Vec<EdgeId>> {
        let id = self.resolve(node)?;
        Ok(self
            .incident_edges(id)
            .filter(|&e| {
                self.edges
                    .get(e)
                    .is_some_and(|edge| edge.to == id || (!edge.directed && edge.from == id))
            })
            .collect())
    }

    /// Distinct nodes reachable from `node` through one edge.
    pub fn neighbors(&self, node: impl AsNode<K>) -> Result<Vec<NodeId>> {
        let id = self.resolve(node)?;
        let mut seen = Vec::new();
        for next in self.successors(id) {
            if !seen.contains(&next) {
                seen.push(next);
            }
        }
        Ok(seen)
    }

    pub fn nedges_of(&self, node: impl AsNode<K>) -> Result<usize> {
        let id = self.resolve(node)?;
        Ok(self.nodes.get(id).map_or(0, Node::nedges))
    }

    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|(_, e)| e.weight).sum()
    }

    pub fn bfs(&self, start: impl AsNode<K>) -> Result<BfsIterator<'_, Self>> {
        let start = self.resolve(start)?;
        Ok(BfsIterator::new(self, start))
    }

    pub fn dfs(&self, start: impl AsNode<K>) -> Result<DfsIterator<'_, Self>> {
        let start = self.resolve(start)?;
        Ok(DfsIterator::new(self, start))
    }

    pub fn dijkstra_shortest_path(&self, source: impl AsNode<K>) -> Result<ShortestPaths> {
        let source = self.resolve(source)?;
        algorithms::dijkstra_shortest_path(self, source)
    }

    pub fn dijkstra_all_pairs_shortest_path(&self) -> Result<IndexMap<NodeId, ShortestPaths>> {
        algorithms::dijkstra_all_pairs_shortest_path(self)
    }

    pub fn reachable_subtree(&self, start: impl AsNode<K>) -> Result<Graph<K, L>> {
        let start = self.resolve(start)?;
        Ok(algorithms::reachable_subtree(self, start))
    }

    pub fn spanning_forest(&self) -> Graph<K, L> {
        algorithms::spanning_forest(self)
    }

    pub fn minimum_spanning_tree(&self) -> Result<Graph<K, L>> {
        algorithms::minimum_spanning_tree(self)
    }
}

impl<K, L> GraphBase for Graph<K, L>
where
    K: GraphData,
    L: Clone,
{
    fn order(&self) -> usize {
        self.nnodes()
    }

    fn size(&self) -> usize {
        self.nedges()
    }

    fn is_directed(&self) -> bool {
        self.flags.contains(GraphFlags::DIRECTED)
    }

    fn contains_node(&self, v: NodeId) -> bool {
        self.nodes.contains(v)
    }

    fn node_ids(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.nodes())
    }

    fn incident_edges(&self, v: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        Box::new(
            self.nodes
                .get(v)
                .into_iter()
                .flat_map(|node| node.edges.iter().copied()),
        )
    }

    fn traverse(&self, e: EdgeId, from: NodeId) -> Option<NodeId> {
        self.edges.get(e)?.traverse(from)
    }

    fn weight_of(&self, e: EdgeId) -> Option<f64> {
        self.edges.get(e).map(|edge| edge.weight)
    }
}
