//! Morphology predicates (`is_*`) and converters (`make_*`).
//!
//! Converters update the flags and rewrite the edge set so that the graph
//! conforms to the new flags. Every converter is idempotent.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::Graph;
use crate::core::{EdgeId, GraphData, NodeId};
use crate::flags::GraphFlags;
use crate::traits::GraphBase;
use crate::traversal::DfsIterator;

#[derive(Copy, Clone, PartialEq, Eq)]
enum Color {
    Gray,
    Black,
}

impl<K, L> Graph<K, L>
where
    K: GraphData,
    L: Clone,
{
    pub fn is_directed(&self) -> bool {
        self.flags.contains(GraphFlags::DIRECTED)
    }

    pub fn is_undirected(&self) -> bool {
        !self.is_directed()
    }

    /// Whether the edge set contains a cycle. Self-loops count, and so do
    /// parallel edges of an undirected graph.
    pub fn is_cyclic(&self) -> bool {
        if self.nedges() == 0 {
            return false;
        }
        if self.nnodes() == 1 {
            return true;
        }
        if self.is_directed() {
            !self.back_edges(true).is_empty()
        } else {
            self.subgraph_roots().into_iter().any(|root| {
                let mut dfs = DfsIterator::new(self, root);
                dfs.by_ref().for_each(drop);
                dfs.has_cycles()
            })
        }
    }

    pub fn is_acyclic(&self) -> bool {
        !self.is_cyclic()
    }

    /// Whether some node pair is joined by more than one edge.
    pub fn is_multi_connected(&self) -> bool {
        let mut seen = HashSet::new();
        self.edges
            .iter()
            .any(|(_, edge)| !seen.insert((edge.directed, edge.pair_key())))
    }

    pub fn is_singly_connected(&self) -> bool {
        !self.is_multi_connected()
    }

    pub fn is_self_connected(&self) -> bool {
        self.edges.iter().any(|(_, edge)| edge.is_self_loop())
    }

    /// Undirected, acyclic (and therefore free of loops and parallel edges).
    pub fn is_tree(&self) -> bool {
        self.is_undirected() && self.is_acyclic()
    }

    pub fn is_blob(&self) -> bool {
        !self.is_tree()
    }

    /// Whether the actual edge set stays within what the flags allow.
    pub fn conforms_restrictions(&self) -> bool {
        let directed = self.is_directed();
        if self.edges.iter().any(|(_, edge)| edge.directed != directed) {
            return false;
        }
        if !self.has_flag(GraphFlags::SELF_CONNECTED) && self.is_self_connected() {
            return false;
        }
        if !self.has_flag(GraphFlags::MULTI_CONNECTED) && self.is_multi_connected() {
            return false;
        }
        if !self.has_flag(GraphFlags::CYCLIC) && self.is_cyclic() {
            return false;
        }
        if !self.has_flag(GraphFlags::BLOB) && !self.is_tree() {
            return false;
        }
        true
    }

    /// Makes every edge directed.
    ///
    /// On a `CYCLIC` graph each undirected edge also gets its reverse twin so
    /// both directions stay walkable. An acyclic graph keeps each edge's
    /// stored orientation instead, since a twin would close a 2-cycle.
    pub fn make_directed(&mut self) {
        if self.is_directed() {
            return;
        }
        self.flags = self.flags.with(GraphFlags::DIRECTED);
        let add_twins = self.flags.contains(GraphFlags::CYCLIC);

        let mut twins = Vec::new();
        for edge in self.edges.values_mut() {
            if edge.directed {
                continue;
            }
            edge.directed = true;
            if add_twins && !edge.is_self_loop() {
                twins.push((edge.to, edge.from, edge.weight, edge.label.clone()));
            }
        }

        let added = twins.len();
        for (from, to, weight, label) in twins {
            let e = self.insert_edge_raw(from, to, true, weight, label);
            self.commit_edge(e);
        }
        debug!(added, "made graph directed");
    }

    /// Makes every edge undirected. Each `a -> b` edge absorbs one unpaired
    /// `b -> a` edge. A graph that is not `CYCLIC` is then made acyclic again.
    pub fn make_undirected(&mut self) {
        if !self.is_directed() {
            return;
        }
        self.flags = self.flags.without(GraphFlags::DIRECTED);

        let mut unpaired: HashMap<(NodeId, NodeId), Vec<EdgeId>> = HashMap::new();
        let mut redundant = Vec::new();
        for (e, edge) in self.edges.iter() {
            if edge.is_self_loop() {
                continue;
            }
            match unpaired.get_mut(&(edge.to, edge.from)) {
                Some(waiting) if !waiting.is_empty() => {
                    waiting.pop();
                    redundant.push(e);
                }
                _ => unpaired.entry((edge.from, edge.to)).or_default().push(e),
            }
        }

        self.remove_edges(&redundant);
        for edge in self.edges.values_mut() {
            edge.directed = false;
        }
        debug!(removed = redundant.len(), "made graph undirected");

        if !self.flags.contains(GraphFlags::CYCLIC) {
            self.remove_cycles();
        }
    }

    pub fn make_cyclic(&mut self) {
        self.flags = self.flags.with(GraphFlags::CYCLIC);
    }

    /// Removes every edge that closes a cycle, after dropping self-loops and
    /// parallel edges.
    pub fn make_acyclic(&mut self) {
        self.make_not_self_connected();
        self.make_singly_connected_default();
        self.remove_cycles();
        self.flags = self.flags.without(GraphFlags::CYCLIC);
    }

    fn remove_cycles(&mut self) {
        let victims = if self.is_directed() {
            self.back_edges(false)
        } else {
            self.non_tree_edges()
        };
        debug!(removed = victims.len(), "removed cycle-closing edges");
        self.remove_edges(&victims);
    }

    /// Edges closing a directed cycle, found by a three-colour depth-first
    /// search over all nodes in insertion order. With `first_only` the search
    /// stops at the first one.
    fn back_edges(&self, first_only: bool) -> Vec<EdgeId> {
        let mut color: HashMap<NodeId, Color> = HashMap::new();
        let mut found = Vec::new();

        for start in self.nodes() {
            if color.contains_key(&start) {
                continue;
            }
            color.insert(start, Color::Gray);
            let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];

            while let Some(&(current, cursor)) = stack.last() {
                let incident = self.nodes.get(current).map_or(&[][..], |n| n.edges());
                let Some(&e) = incident.get(cursor) else {
                    color.insert(current, Color::Black);
                    stack.pop();
                    continue;
                };
                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }

                let Some(next) = self.traverse(e, current) else {
                    continue;
                };
                match color.get(&next) {
                    None => {
                        color.insert(next, Color::Gray);
                        stack.push((next, 0));
                    }
                    Some(Color::Gray) => {
                        found.push(e);
                        if first_only {
                            return found;
                        }
                    }
                    Some(Color::Black) => {}
                }
            }
        }
        found
    }

    /// Edges outside a depth-first spanning forest of an undirected graph.
    fn non_tree_edges(&self) -> Vec<EdgeId> {
        let mut visited = HashSet::new();
        let mut used = HashSet::new();
        let mut found = Vec::new();

        for root in self.subgraph_roots() {
            if !visited.insert(root) {
                continue;
            }
            let mut stack = vec![root];
            while let Some(current) = stack.pop() {
                for e in self.incident_edges(current) {
                    if !used.insert(e) {
                        continue;
                    }
                    let Some(next) = self.traverse(e, current) else {
                        continue;
                    };
                    if visited.insert(next) {
                        stack.push(next);
                    } else {
                        found.push(e);
                    }
                }
            }
        }
        found
    }

    /// Keeps one edge per connected node pair: the most expensive one when
    /// `prefer_max_cost` is set, the cheapest otherwise.
    pub fn make_singly_connected(&mut self, prefer_max_cost: bool) {
        let mut keep: HashMap<(bool, NodeId, NodeId), (EdgeId, f64)> = HashMap::new();
        let mut victims = Vec::new();

        for (e, edge) in self.edges.iter() {
            let (a, b) = edge.pair_key();
            match keep.get_mut(&(edge.directed, a, b)) {
                None => {
                    keep.insert((edge.directed, a, b), (e, edge.weight));
                }
                Some(kept) => {
                    let better = if prefer_max_cost {
                        edge.weight > kept.1
                    } else {
                        edge.weight < kept.1
                    };
                    if better {
                        victims.push(kept.0);
                        *kept = (e, edge.weight);
                    } else {
                        victims.push(e);
                    }
                }
            }
        }

        debug!(removed = victims.len(), prefer_max_cost, "made graph singly connected");
        self.remove_edges(&victims);
        self.flags = self.flags.without(GraphFlags::MULTI_CONNECTED);
    }

    /// [`Graph::make_singly_connected`] keeping the most expensive edge.
    pub fn make_singly_connected_default(&mut self) {
        self.make_singly_connected(true);
    }

    pub fn make_multi_connected(&mut self) {
        self.flags = self.flags.with(GraphFlags::MULTI_CONNECTED);
    }

    pub fn make_not_self_connected(&mut self) {
        let victims: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|(_, edge)| edge.is_self_loop())
            .map(|(e, _)| e)
            .collect();
        debug!(removed = victims.len(), "removed self-loops");
        self.remove_edges(&victims);
        self.flags = self.flags.without(GraphFlags::SELF_CONNECTED);
    }

    pub fn make_self_connected(&mut self) {
        self.flags = self.flags.with(GraphFlags::SELF_CONNECTED);
    }

    pub fn make_blob(&mut self) {
        self.flags = self.flags.with(GraphFlags::BLOB);
    }

    /// Turns the graph into an undirected forest.
    pub fn make_tree(&mut self) {
        self.make_undirected();
        self.make_acyclic();
        self.flags = self.flags.without(GraphFlags::BLOB);
    }

    /// A copy of this graph converted to `flags`.
    pub fn copy_with_flags(&self, flags: GraphFlags) -> Graph<K, L> {
        let target = flags.normalized();
        let mut copy = self.clone();

        // Widen first so the converters below see the target's permissions.
        let permissive = GraphFlags::CYCLIC | GraphFlags::MULTI_CONNECTED | GraphFlags::SELF_CONNECTED;
        copy.flags = copy.flags.with(target & permissive);

        if target.contains(GraphFlags::DIRECTED) {
            copy.make_directed();
        } else {
            copy.make_undirected();
        }
        if !target.contains(GraphFlags::SELF_CONNECTED) {
            copy.make_not_self_connected();
        }
        if !target.contains(GraphFlags::MULTI_CONNECTED) {
            copy.make_singly_connected(true);
        }
        if !target.contains(GraphFlags::CYCLIC) {
            copy.make_acyclic();
        }
        copy.flags = target;
        copy
    }
}
