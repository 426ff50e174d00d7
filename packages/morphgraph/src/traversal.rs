//! Breadth- and depth-first node iterators.
//!
//! Both hold a shared borrow of the graph, so the graph cannot be mutated
//! while a traversal is in progress.

use std::collections::{HashSet, VecDeque};

use crate::core::{EdgeId, NodeId};
use crate::traits::GraphBase;

/// Yields nodes in breadth-first order, starting with `start`.
pub struct BfsIterator<'g, G: GraphBase + ?Sized> {
    graph: &'g G,
    queue: VecDeque<NodeId>,
    visited: HashSet<NodeId>,
}

impl<'g, G: GraphBase + ?Sized> BfsIterator<'g, G> {
    pub fn new(graph: &'g G, start: NodeId) -> Self {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        if graph.contains_node(start) {
            queue.push_back(start);
            visited.insert(start);
        }
        Self {
            graph,
            queue,
            visited,
        }
    }

    pub fn is_visited(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }
}

impl<G: GraphBase + ?Sized> Iterator for BfsIterator<'_, G> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.queue.pop_front()?;
        for next in self.graph.successors(current) {
            if self.visited.insert(next) {
                self.queue.push_back(next);
            }
        }
        Some(current)
    }
}

/// Yields nodes in depth-first (stack) order, starting with `start`.
///
/// While walking it records which edges it used; meeting an already visited
/// node over a fresh edge means the walked part of the graph has a cycle.
/// This is exact for undirected graphs only.
pub struct DfsIterator<'g, G: GraphBase + ?Sized> {
    graph: &'g G,
    stack: Vec<NodeId>,
    visited: HashSet<NodeId>,
    used_edges: HashSet<EdgeId>,
    has_cycles: bool,
}

impl<'g, G: GraphBase + ?Sized> DfsIterator<'g, G> {
    pub fn new(graph: &'g G, start: NodeId) -> Self {
        let mut stack = Vec::new();
        let mut visited = HashSet::new();
        if graph.contains_node(start) {
            stack.push(start);
            visited.insert(start);
        }
        Self {
            graph,
            stack,
            visited,
            used_edges: HashSet::new(),
            has_cycles: false,
        }
    }

    pub fn has_cycles(&self) -> bool {
        self.has_cycles
    }

    pub fn is_visited(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }

    /// Edges walked so far. Each one led to a node first seen through it,
    /// or closed a cycle.
    pub fn used_edges(&self) -> &HashSet<EdgeId> {
        &self.used_edges
    }
}

impl<G: GraphBase + ?Sized> Iterator for DfsIterator<'_, G> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        for e in self.graph.incident_edges(current) {
            let Some(next) = self.graph.traverse(e, current) else {
                continue;
            };
            if !self.used_edges.insert(e) {
                continue;
            }
            if self.visited.insert(next) {
                self.stack.push(next);
            } else {
                self.has_cycles = true;
            }
        }
        Some(current)
    }
}
