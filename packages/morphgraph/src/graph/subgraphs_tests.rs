//! Tests for connected-component bookkeeping.

use super::*;
use crate::GraphFlags;

fn values(g: &Graph<u32>, ids: Vec<NodeId>) -> Vec<u32> {
    ids.into_iter().map(|id| *g.value(id).unwrap()).collect()
}

#[test]
fn test_components_merge_and_split() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::TREE);
    g.add_nodes(1..=5);
    g.add_edge(1, 2).unwrap();
    g.add_edge(3, 4).unwrap();

    assert_eq!(g.nsubgraphs(), 3);
    assert!(!g.is_fully_connected());
    assert_eq!(g.size_of_subgraph(&1).unwrap(), 2);
    assert_eq!(g.size_of_subgraph(&5).unwrap(), 1);

    g.add_edge(2, 3).unwrap();
    assert_eq!(g.nsubgraphs(), 2);
    assert_eq!(g.size_of_subgraph(&4).unwrap(), 4);

    g.remove_edge(&2, &3).unwrap();
    assert_eq!(g.nsubgraphs(), 3);
    assert!(!g.has_path(&1, &4));

    g.add_edge(5, 1).unwrap();
    g.add_edge(5, 3).unwrap();
    assert!(g.is_fully_connected());
}

#[test]
fn test_removing_a_cycle_edge_keeps_component() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::UNDIRECTED);
    g.add_edges([(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0)]).unwrap();

    g.remove_edge(&1, &2).unwrap();

    assert_eq!(g.nsubgraphs(), 1);
    assert!(g.has_path(&1, &2));
}

#[test]
fn test_node_removal_updates_components() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::UNDIRECTED);
    g.add_edges([(1, 2, 1.0), (2, 3, 1.0)]).unwrap();

    let mut cut = g.clone();
    cut.remove_node_and_edges(&2).unwrap();
    assert_eq!(cut.nsubgraphs(), 2);

    let mut stitched = g.clone();
    stitched.remove_node(&2).unwrap();
    assert_eq!(stitched.nsubgraphs(), 1);
    assert!(stitched.has_path(&1, &3));
}

#[test]
fn test_has_path_follows_direction() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::DIRECTED | GraphFlags::BLOB);
    g.add_edges([(1, 2, 1.0), (2, 3, 1.0)]).unwrap();
    g.add_node(4);

    assert!(g.has_path(&1, &3));
    assert!(!g.has_path(&3, &1));
    assert!(g.has_path(&3, &3));
    assert!(!g.has_path(&1, &4));
    assert!(!g.has_path(&1, &99));
    // Components are weak.
    assert_eq!(g.nsubgraphs(), 2);
}

#[test]
fn test_directed_roots_prefer_nodes_without_incoming_edges() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::DIRECTED | GraphFlags::BLOB);
    g.add_node(1);
    g.add_edge(2, 1).unwrap();
    g.add_edge(3, 4).unwrap();

    assert_eq!(values(&g, g.subgraph_roots()), vec![2, 3]);
}

#[test]
fn test_undirected_roots_one_per_component() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::UNDIRECTED);
    g.add_edges([(1, 2, 1.0), (3, 4, 1.0), (4, 5, 1.0)]).unwrap();
    g.add_node(6);

    let roots = g.subgraph_roots();
    assert_eq!(roots.len(), g.nsubgraphs());
    assert_eq!(roots.len(), 3);

    let sizes: Vec<usize> = roots
        .iter()
        .map(|&root| g.size_of_subgraph(root).unwrap())
        .collect();
    assert_eq!(sizes, vec![2, 3, 1]);
}

#[test]
fn test_size_of_missing_subgraph() {
    let g: Graph<u32> = Graph::default();
    assert!(g.size_of_subgraph(&1).is_err());
    assert!(g.is_fully_connected());
}
