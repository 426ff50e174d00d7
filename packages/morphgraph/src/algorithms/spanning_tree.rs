use std::collections::HashMap;

use tracing::debug;

use crate::core::{GraphData, NodeId};
use crate::flags::GraphFlags;
use crate::graph::Graph;
use crate::traits::GraphBase;

fn tree_flags<K: GraphData, L: Clone>(graph: &Graph<K, L>) -> GraphFlags {
    if graph.is_directed() {
        GraphFlags::DIRECTED | GraphFlags::BLOB
    } else {
        GraphFlags::TREE
    }
}

/// Copies the depth-first tree of `graph` rooted at `start` into `tree`.
/// `mapping` translates source ids to tree ids and doubles as the visited set.
fn grow_tree<K, L>(
    graph: &Graph<K, L>,
    start: NodeId,
    tree: &mut Graph<K, L>,
    mapping: &mut HashMap<NodeId, NodeId>,
) where
    K: GraphData,
    L: Clone,
{
    let Some(node) = graph.node(start) else {
        return;
    };
    if mapping.contains_key(&start) {
        return;
    }
    mapping.insert(start, tree.add_node_id(node.value().clone()));

    let directed = graph.is_directed();
    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
        for e in graph.incident_edges(current) {
            let Some(next) = graph.traverse(e, current) else {
                continue;
            };
            if mapping.contains_key(&next) {
                continue;
            }
            let (Some(edge), Some(next_node)) = (graph.edge(e), graph.node(next)) else {
                continue;
            };
            let Some(&tree_from) = mapping.get(&current) else {
                continue;
            };
            let tree_to = tree.add_node_id(next_node.value().clone());
            mapping.insert(next, tree_to);

            let tree_edge = tree.insert_edge_raw(
                tree_from,
                tree_to,
                directed,
                edge.weight(),
                edge.label().cloned(),
            );
            tree.commit_edge(tree_edge);
            stack.push(next);
        }
    }
}

/// The depth-first tree of everything reachable from `start`.
///
/// Undirected sources give a `TREE` graph; directed sources give a directed
/// acyclic one. Payloads, weights and labels are cloned.
pub fn reachable_subtree<K, L>(graph: &Graph<K, L>, start: NodeId) -> Graph<K, L>
where
    K: GraphData,
    L: Clone,
{
    let mut tree = Graph::new(tree_flags(graph));
    let mut mapping = HashMap::new();
    grow_tree(graph, start, &mut tree, &mut mapping);
    debug!(nodes = tree.nnodes(), edges = tree.nedges(), "built reachable subtree");
    tree
}

/// A depth-first spanning forest covering every node.
///
/// Trees are grown from each subgraph root first. On a directed graph a
/// root may not reach its whole weak component, so any node still missing
/// afterwards starts a tree of its own.
pub fn spanning_forest<K, L>(graph: &Graph<K, L>) -> Graph<K, L>
where
    K: GraphData,
    L: Clone,
{
    let mut tree = Graph::new(tree_flags(graph));
    let mut mapping = HashMap::with_capacity(graph.nnodes());
    for start in graph.subgraph_roots().into_iter().chain(graph.nodes()) {
        grow_tree(graph, start, &mut tree, &mut mapping);
    }
    debug!(nodes = tree.nnodes(), edges = tree.nedges(), "built spanning forest");
    tree
}
