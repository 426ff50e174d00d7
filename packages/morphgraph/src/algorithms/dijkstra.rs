use std::collections::{BinaryHeap, HashMap, HashSet};

use indexmap::IndexMap;

use super::MinScored;
use crate::core::{EdgeId, NodeId};
use crate::error::{GraphError, Result};
use crate::traits::GraphBase;

/// Cheapest known way to reach one node.
#[derive(Clone, Debug, PartialEq)]
pub struct PathEntry {
    pub cost: f64,
    /// Nodes from the source to the target, both included.
    pub path: Vec<NodeId>,
}

/// Single-source shortest paths, keyed by target in the order the targets
/// were settled. Unreachable nodes have no entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShortestPaths {
    pub source: Option<NodeId>,
    entries: IndexMap<NodeId, PathEntry>,
}

impl ShortestPaths {
    pub fn cost_to(&self, target: NodeId) -> Option<f64> {
        self.entries.get(&target).map(|entry| entry.cost)
    }

    pub fn path_to(&self, target: NodeId) -> Option<&[NodeId]> {
        self.entries.get(&target).map(|entry| entry.path.as_slice())
    }

    pub fn get(&self, target: NodeId) -> Option<&PathEntry> {
        self.entries.get(&target)
    }

    pub fn contains(&self, target: NodeId) -> bool {
        self.entries.contains_key(&target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &PathEntry)> + '_ {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Nodes reachable from `source` and every edge walkable from them.
fn reachable<G>(graph: &G, source: NodeId) -> (HashSet<NodeId>, Vec<EdgeId>)
where
    G: GraphBase + ?Sized,
{
    let mut seen = HashSet::from([source]);
    let mut edges = Vec::new();
    let mut stack = vec![source];
    while let Some(current) = stack.pop() {
        for e in graph.incident_edges(current) {
            let Some(next) = graph.traverse(e, current) else {
                continue;
            };
            edges.push(e);
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }
    (seen, edges)
}

/// Dijkstra from `source`.
///
/// Every edge reachable from `source` must have a non-negative weight,
/// otherwise [`GraphError::NegativeWeight`] is returned. Undirected edges
/// relax from whichever endpoint is settled first.
pub fn dijkstra_shortest_path<G>(graph: &G, source: NodeId) -> Result<ShortestPaths>
where
    G: GraphBase + ?Sized,
{
    if !graph.contains_node(source) {
        return Err(GraphError::NodeNotFound(source.to_string()));
    }

    let (reach, walkable) = reachable(graph, source);
    for e in walkable {
        let weight = graph.weight_of(e).unwrap_or(0.0);
        if weight < 0.0 {
            return Err(GraphError::NegativeWeight { edge: e, weight });
        }
    }

    let mut tentative: HashMap<NodeId, f64> = HashMap::with_capacity(reach.len());
    let mut predecessors: HashMap<NodeId, NodeId> = HashMap::with_capacity(reach.len());
    let mut settled: IndexMap<NodeId, f64> = IndexMap::with_capacity(reach.len());
    let mut heap = BinaryHeap::new();

    tentative.insert(source, 0.0);
    heap.push(MinScored(0.0, source));

    while let Some(MinScored(cost, current)) = heap.pop() {
        if settled.contains_key(&current) {
            continue;
        }
        settled.insert(current, cost);

        for e in graph.incident_edges(current) {
            let Some(next) = graph.traverse(e, current) else {
                continue;
            };
            if settled.contains_key(&next) {
                continue;
            }
            let alt = cost + graph.weight_of(e).unwrap_or(0.0);
            if tentative.get(&next).is_none_or(|&known| alt < known) {
                tentative.insert(next, alt);
                predecessors.insert(next, current);
                heap.push(MinScored(alt, next));
            }
        }
    }

    let entries = settled
        .into_iter()
        .map(|(target, cost)| {
            let mut path = vec![target];
            let mut current = target;
            while let Some(&pred) = predecessors.get(&current) {
                path.push(pred);
                current = pred;
            }
            path.reverse();
            (target, PathEntry { cost, path })
        })
        .collect();

    Ok(ShortestPaths {
        source: Some(source),
        entries,
    })
}

/// One [`dijkstra_shortest_path`] run per node, keyed by source in node
/// order.
pub fn dijkstra_all_pairs_shortest_path<G>(graph: &G) -> Result<IndexMap<NodeId, ShortestPaths>>
where
    G: GraphBase + ?Sized,
{
    graph
        .node_ids()
        .map(|source| Ok((source, dijkstra_shortest_path(graph, source)?)))
        .collect()
}
