//! Greedy vertex colouring.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::Graph;
use crate::core::{GraphData, NodeId};
use crate::error::{GraphError, Result};
use crate::interner::AsNode;

impl<K, L> Graph<K, L>
where
    K: GraphData,
    L: Clone,
{
    /// Nodes joined to `id` by an edge in either direction, self excluded.
    fn adjacent(&self, id: NodeId) -> HashSet<NodeId> {
        self.nodes
            .get(id)
            .map(|node| {
                node.edges
                    .iter()
                    .filter_map(|&e| self.edges.get(e)?.other(id))
                    .filter(|&other| other != id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Colours the nodes with at most `ncolors` colours so that no two
    /// adjacent nodes share one, visiting nodes by descending degree and
    /// giving each the smallest colour its neighbours leave free.
    ///
    /// Returns the number of colours used. Edge direction is ignored and
    /// self-loops do not constrain. If the greedy pass needs more than
    /// `ncolors` colours the existing colouring is kept and
    /// [`GraphError::NotEnoughColors`] is returned.
    pub fn colorize(&mut self, ncolors: usize) -> Result<usize> {
        let adjacency: HashMap<NodeId, HashSet<NodeId>> = self
            .nodes()
            .map(|id| (id, self.adjacent(id)))
            .collect();

        let mut order: Vec<NodeId> = self.nodes().collect();
        // Stable sort keeps insertion order among equal degrees.
        order.sort_by_key(|id| Reverse(adjacency.get(id).map_or(0, HashSet::len)));

        let mut assigned: HashMap<NodeId, usize> = HashMap::with_capacity(order.len());
        let mut used = 0;
        for id in order {
            let taken: HashSet<usize> = adjacency
                .get(&id)
                .into_iter()
                .flatten()
                .filter_map(|n| assigned.get(n).copied())
                .collect();
            let color = (0..).find(|c| !taken.contains(c)).unwrap_or(0);
            if color >= ncolors {
                return Err(GraphError::NotEnoughColors {
                    needed: color + 1,
                    available: ncolors,
                });
            }
            used = used.max(color + 1);
            assigned.insert(id, color);
        }

        for (id, color) in assigned {
            if let Some(node) = self.nodes.get_mut(id) {
                node.color = Some(color);
            }
        }
        debug!(used, ncolors, "coloured graph");
        Ok(used)
    }

    /// Colour assigned by the last successful [`Graph::colorize`].
    pub fn get_color(&self, node: impl AsNode<K>) -> Result<usize> {
        let id = self.resolve(node)?;
        self.nodes
            .get(id)
            .and_then(|n| n.color)
            .ok_or_else(|| GraphError::InvalidArgument(format!("node {id} has no colour")))
    }

    pub fn clear_colors(&mut self) {
        for node in self.nodes.values_mut() {
            node.color = None;
        }
    }
}
