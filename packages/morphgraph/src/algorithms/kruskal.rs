use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use super::MinScored;
use crate::core::{EdgeId, GraphData, NodeId};
use crate::error::{GraphError, Result};
use crate::flags::GraphFlags;
use crate::graph::Graph;

/// Kruskal's minimum spanning tree of an undirected graph.
///
/// Every node is copied; edges are taken cheapest first and kept when their
/// endpoints are not yet connected in the tree being built. A disconnected
/// graph yields a minimum spanning forest.
pub fn minimum_spanning_tree<K, L>(graph: &Graph<K, L>) -> Result<Graph<K, L>>
where
    K: GraphData,
    L: Clone,
{
    if graph.is_directed() {
        return Err(GraphError::InvalidArgument(
            "minimum spanning trees need an undirected graph".to_string(),
        ));
    }

    let mut tree: Graph<K, L> = Graph::new(GraphFlags::TREE);
    let mut mapping: HashMap<NodeId, NodeId> = HashMap::with_capacity(graph.nnodes());
    for id in graph.nodes() {
        if let Some(node) = graph.node(id) {
            mapping.insert(id, tree.add_node_id(node.value().clone()));
        }
    }

    let mut heap: BinaryHeap<MinScored<EdgeId>> = graph
        .edges()
        .map(|(e, edge)| MinScored(edge.weight(), e))
        .collect();

    let wanted = graph.nnodes().saturating_sub(1);
    while tree.nedges() < wanted {
        let Some(MinScored(weight, e)) = heap.pop() else {
            break;
        };
        let Some(edge) = graph.edge(e) else {
            continue;
        };
        let (Some(&a), Some(&b)) = (mapping.get(&edge.from_node()), mapping.get(&edge.to_node()))
        else {
            continue;
        };
        if tree.has_path(a, b) {
            continue;
        }
        let tree_edge = tree.insert_edge_raw(a, b, false, weight, edge.label().cloned());
        tree.commit_edge(tree_edge);
    }

    debug!(
        edges = tree.nedges(),
        total_weight = tree.total_weight(),
        "built minimum spanning tree"
    );
    Ok(tree)
}
