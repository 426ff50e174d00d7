//! Connected-component bookkeeping.
//!
//! Nodes carry a disjoint-set parent (by id) and rank. Edge insertion is a
//! union, near O(1) amortised. Union-find cannot undo a union, so edge
//! removal re-partitions the touched components with a breadth-first walk
//! over the remaining edges. Components are weak: edge direction is ignored.

use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;
use tracing::trace;

use super::Graph;
use crate::core::{EdgeId, GraphData, NodeId};
use crate::error::Result;
use crate::flags::GraphFlags;
use crate::interner::AsNode;
use crate::traits::GraphBase;

impl<K, L> Graph<K, L>
where
    K: GraphData,
    L: Clone,
{
    /// Set representative of `id`, without path compression.
    pub(crate) fn set_find(&self, id: NodeId) -> NodeId {
        let mut current = id;
        loop {
            let parent = self.nodes.get(current).map_or(current, |n| n.set_parent);
            if parent == current {
                return current;
            }
            current = parent;
        }
    }

    fn set_find_compress(&mut self, id: NodeId) -> NodeId {
        let root = self.set_find(id);
        let mut current = id;
        while current != root {
            let Some(node) = self.nodes.get_mut(current) else {
                break;
            };
            let next = node.set_parent;
            node.set_parent = root;
            current = next;
        }
        root
    }

    fn set_union(&mut self, a: NodeId, b: NodeId) -> bool {
        let root_a = self.set_find_compress(a);
        let root_b = self.set_find_compress(b);
        if root_a == root_b {
            return false;
        }

        let rank_a = self.nodes.get(root_a).map_or(0, |n| n.set_rank);
        let rank_b = self.nodes.get(root_b).map_or(0, |n| n.set_rank);
        // Union by rank: attach smaller tree to larger tree
        let (child, parent) = match rank_a.cmp(&rank_b) {
            Ordering::Less => (root_a, root_b),
            Ordering::Greater => (root_b, root_a),
            Ordering::Equal => {
                if let Some(node) = self.nodes.get_mut(root_a) {
                    node.set_rank += 1;
                }
                (root_b, root_a)
            }
        };
        if let Some(node) = self.nodes.get_mut(child) {
            node.set_parent = parent;
        }
        true
    }

    /// Merges the endpoints of a freshly linked edge.
    pub(crate) fn commit_edge(&mut self, e: EdgeId) {
        if let Some((a, b)) = self.edges.get(e).map(|edge| edge.endpoints()) {
            self.set_union(a, b);
        }
    }

    /// Rebuilds the sets of every component containing one of `seeds`.
    /// Members outside those components are left alone.
    pub(crate) fn repartition(&mut self, seeds: impl IntoIterator<Item = NodeId>) {
        let mut settled = HashSet::new();
        for seed in seeds {
            if settled.contains(&seed) || !self.nodes.contains(seed) {
                continue;
            }
            let members = self.weak_component(seed);
            trace!(seed = %seed, size = members.len(), "re-partitioned component");
            let rank = u32::from(members.len() > 1);
            for &member in &members {
                if let Some(node) = self.nodes.get_mut(member) {
                    node.set_parent = seed;
                    node.set_rank = if member == seed { rank } else { 0 };
                }
                settled.insert(member);
            }
        }
    }

    pub(crate) fn reset_sets(&mut self) {
        let ids: Vec<NodeId> = self.nodes.ids().collect();
        for id in ids {
            if let Some(node) = self.nodes.get_mut(id) {
                node.set_parent = id;
                node.set_rank = 0;
            }
        }
    }

    /// Nodes connected to `start`, ignoring edge direction.
    fn weak_component(&self, start: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::from([start]);
        let mut members = vec![start];
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for e in self.incident_edges(current) {
                let Some(next) = self.edges.get(e).and_then(|edge| edge.other(current)) else {
                    continue;
                };
                if seen.insert(next) {
                    members.push(next);
                    queue.push_back(next);
                }
            }
        }
        members
    }

    /// Whether `to` can be reached from `from` following edge direction.
    pub(crate) fn directed_path(&self, from: NodeId, to: NodeId) -> bool {
        if from == to {
            return true;
        }
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);
        while let Some(current) = queue.pop_front() {
            for next in self.successors(current) {
                if next == to {
                    return true;
                }
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Whether a path leads from `from` to `to`. False if either is absent.
    pub fn has_path(&self, from: impl AsNode<K>, to: impl AsNode<K>) -> bool {
        let (Ok(from), Ok(to)) = (self.resolve(from), self.resolve(to)) else {
            return false;
        };
        if self.flags.contains(GraphFlags::DIRECTED) {
            self.directed_path(from, to)
        } else {
            self.set_find(from) == self.set_find(to)
        }
    }

    /// One node per weakly connected component, in insertion order of the
    /// component's first node.
    ///
    /// Undirected graphs report each set representative. Directed graphs
    /// prefer the first node of the component without incoming edges, so
    /// that a traversal from the root reaches as much as possible.
    pub fn subgraph_roots(&self) -> Vec<NodeId> {
        let directed = self.flags.contains(GraphFlags::DIRECTED);
        let mut roots: IndexMap<NodeId, Option<NodeId>> = IndexMap::new();
        for id in self.nodes() {
            let rep = self.set_find(id);
            let slot = roots.entry(rep).or_insert(None);
            if slot.is_none() && directed && !self.has_incoming(id) {
                *slot = Some(id);
            }
        }
        roots
            .into_iter()
            .map(|(rep, preferred)| preferred.unwrap_or(rep))
            .collect()
    }

    fn has_incoming(&self, id: NodeId) -> bool {
        self.incident_edges(id).any(|e| {
            self.edges
                .get(e)
                .is_some_and(|edge| edge.to == id && edge.from != id)
        })
    }

    pub fn nsubgraphs(&self) -> usize {
        self.nodes
            .iter()
            .filter(|(id, node)| node.set_parent == *id)
            .count()
    }

    /// Number of nodes in the component containing `node`.
    pub fn size_of_subgraph(&self, node: impl AsNode<K>) -> Result<usize> {
        let id = self.resolve(node)?;
        let rep = self.set_find(id);
        Ok(self.nodes.ids().filter(|&n| self.set_find(n) == rep).count())
    }

    pub fn is_fully_connected(&self) -> bool {
        self.nsubgraphs() <= 1
    }
}
