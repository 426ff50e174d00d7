//! Tests for morphology predicates and converters.

use super::*;
use crate::GraphFlags;

fn square(flags: GraphFlags) -> Graph<char> {
    let mut g = Graph::new(flags);
    g.add_edges([
        ('a', 'b', 1.0),
        ('b', 'c', 2.0),
        ('c', 'd', 3.0),
        ('d', 'a', 4.0),
    ])
    .unwrap();
    g
}

fn edge_set<K: GraphData>(g: &Graph<K>) -> Vec<(K, K, bool)> {
    let mut set: Vec<(K, K, bool)> = g
        .edges()
        .map(|(_, edge)| {
            let (from, to) = edge.endpoints();
            (
                g.value(from).unwrap().clone(),
                g.value(to).unwrap().clone(),
                edge.is_directed(),
            )
        })
        .collect();
    set.sort_by_key(|(a, b, d)| format!("{a:?}{b:?}{d}"));
    set
}

#[test]
fn test_is_cyclic_trivial_cases() {
    let empty: Graph<u32> = Graph::new(GraphFlags::FREE);
    assert!(!empty.is_cyclic());

    let mut single: Graph<u32> = Graph::new(GraphFlags::UNDIRECTED);
    single.add_edge(1, 1).unwrap();
    assert!(single.is_cyclic());
    assert!(single.is_self_connected());
}

#[test]
fn test_is_cyclic_undirected() {
    let mut path: Graph<u32> = Graph::new(GraphFlags::UNDIRECTED);
    path.add_edges([(1, 2, 1.0), (2, 3, 1.0)]).unwrap();
    assert!(!path.is_cyclic());
    assert!(path.is_tree());

    path.add_edge(3, 1).unwrap();
    assert!(path.is_cyclic());
    assert!(path.is_blob());

    let mut parallel: Graph<u32> = Graph::new(GraphFlags::UNDIRECTED);
    parallel.add_edge(1, 2).unwrap();
    parallel.add_edge(2, 1).unwrap();
    assert!(parallel.is_cyclic());
    assert!(parallel.is_multi_connected());
}

#[test]
fn test_is_cyclic_directed_needs_a_back_edge() {
    let mut diamond: Graph<u32> = Graph::new(GraphFlags::FREE);
    diamond
        .add_edges([(1, 2, 1.0), (1, 3, 1.0), (2, 4, 1.0), (3, 4, 1.0)])
        .unwrap();
    assert!(!diamond.is_cyclic());
    assert!(!diamond.is_tree());

    diamond.add_edge(4, 1).unwrap();
    assert!(diamond.is_cyclic());
}

#[test]
fn test_cycle_round_trip() {
    let mut g = square(GraphFlags::UNDIRECTED);
    assert!(g.is_cyclic());

    g.make_acyclic();

    assert!(!g.is_cyclic());
    assert_eq!(g.nedges(), g.nnodes() - 1);
    assert!(g.is_fully_connected());
    assert!(!g.has_flag(GraphFlags::CYCLIC));
    assert!(!g.has_flag(GraphFlags::MULTI_CONNECTED));
    assert!(g.conforms_restrictions());
}

#[test]
fn test_make_acyclic_directed() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::FREE);
    g.add_edges([(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0), (3, 3, 1.0)])
        .unwrap();

    g.make_acyclic();

    assert_eq!(g.nedges(), 2);
    assert!(g.is_acyclic());
    assert!(g.is_directed());
    assert_eq!(g.flags(), GraphFlags::DIRECTED | GraphFlags::BLOB);
}

#[test]
fn test_make_directed_adds_twins_on_cyclic_graph() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::UNDIRECTED);
    g.add_edges([(1, 2, 1.0), (2, 3, 1.0)]).unwrap();

    g.make_directed();

    assert!(g.is_directed());
    assert_eq!(g.nedges(), 4);
    assert!(g.has_edge(&2, &1));
    assert!(g.has_edge(&3, &2));
    assert!(g.conforms_restrictions());
}

#[test]
fn test_make_directed_keeps_orientation_on_acyclic_graph() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::TREE);
    g.add_edges([(1, 2, 1.0), (2, 3, 1.0)]).unwrap();

    g.make_directed();

    assert_eq!(g.nedges(), 2);
    assert!(g.has_edge(&1, &2));
    assert!(!g.has_edge(&2, &1));
    assert_eq!(g.flags(), GraphFlags::DIRECTED | GraphFlags::BLOB);
    assert!(g.conforms_restrictions());
}

#[test]
fn test_make_undirected_collapses_reverse_pairs() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::FREE);
    g.add_edges([(1, 2, 1.0), (2, 1, 1.0), (2, 3, 1.0)]).unwrap();

    g.make_undirected();

    assert!(g.is_undirected());
    assert_eq!(g.nedges(), 2);
    assert!(g.has_edge(&2, &1));
    assert!(g.edges().all(|(_, e)| !e.is_directed()));
}

#[test]
fn test_make_undirected_on_acyclic_graph_stays_acyclic() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::DIRECTED | GraphFlags::BLOB);
    g.add_edges([(1, 2, 1.0), (2, 3, 1.0), (1, 3, 1.0)]).unwrap();
    assert!(g.is_acyclic());

    g.make_undirected();

    assert_eq!(g.nedges(), 2);
    assert!(g.is_tree());
    assert!(g.conforms_restrictions());
}

#[test]
fn test_make_singly_connected_policy() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::UNDIRECTED);
    g.add_edges([(1, 2, 5.0), (1, 2, 1.0), (2, 1, 3.0), (2, 3, 2.0)])
        .unwrap();

    let mut costly = g.clone();
    costly.make_singly_connected(true);
    assert_eq!(costly.nedges(), 2);
    assert_eq!(costly.total_weight(), 7.0);
    assert!(costly.is_singly_connected());
    assert!(!costly.has_flag(GraphFlags::MULTI_CONNECTED));

    let mut cheap = g.clone();
    cheap.make_singly_connected(false);
    assert_eq!(cheap.total_weight(), 3.0);
}

#[test]
fn test_directed_reverse_edges_are_not_parallel() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::FREE);
    g.add_edge(1, 2).unwrap();
    g.add_edge(2, 1).unwrap();
    assert!(g.is_singly_connected());

    g.add_edge(1, 2).unwrap();
    assert!(g.is_multi_connected());
}

#[test]
fn test_make_not_self_connected() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::UNDIRECTED);
    g.add_edges([(1, 1, 1.0), (1, 2, 1.0), (2, 2, 1.0)]).unwrap();

    g.make_not_self_connected();

    assert_eq!(g.nedges(), 1);
    assert!(!g.is_self_connected());
    assert!(!g.has_flag(GraphFlags::SELF_CONNECTED));
    assert!(g.has_flag(GraphFlags::CYCLIC));
}

#[test]
fn test_make_tree_from_free_graph() {
    let mut g = square(GraphFlags::FREE);
    g.add_edge('a', 'a').unwrap();
    g.add_edge('b', 'a').unwrap();

    g.make_tree();

    assert_eq!(g.flags(), GraphFlags::TREE);
    assert!(g.is_tree());
    assert_eq!(g.nedges(), 3);
    assert!(g.conforms_restrictions());
}

#[test]
fn test_flag_setters_pull_in_prerequisites() {
    let mut g: Graph<u32> = Graph::new(GraphFlags::TREE);
    g.make_multi_connected();
    assert_eq!(
        g.flags(),
        GraphFlags::MULTI_CONNECTED | GraphFlags::CYCLIC | GraphFlags::BLOB
    );

    let mut g: Graph<u32> = Graph::new(GraphFlags::TREE);
    g.make_self_connected();
    assert!(g.has_flag(GraphFlags::CYCLIC));

    let mut g: Graph<u32> = Graph::new(GraphFlags::TREE);
    g.make_cyclic();
    assert_eq!(g.flags(), GraphFlags::CYCLIC | GraphFlags::BLOB);

    let mut g: Graph<u32> = Graph::new(GraphFlags::TREE);
    g.make_blob();
    assert_eq!(g.flags(), GraphFlags::BLOB);
}

#[test]
fn test_unchecked_tree_can_drift_out_of_conformance() {
    let mut g = square(GraphFlags::TREE);
    assert!(!g.conforms_restrictions());

    g.make_acyclic();

    assert!(g.conforms_restrictions());
    assert_eq!(g.nedges(), 3);
}

#[test]
fn test_copy_with_flags_leaves_original_alone() {
    let mut g = square(GraphFlags::FREE);
    g.add_edge('c', 'c').unwrap();

    let tree = g.copy_with_flags(GraphFlags::TREE);

    assert_eq!(tree.flags(), GraphFlags::TREE);
    assert!(tree.is_tree());
    assert_eq!(tree.nnodes(), 4);
    assert_eq!(tree.nedges(), 3);
    assert_eq!(g.nedges(), 5);
    assert!(g.is_directed());

    let undirected = g.copy_with_flags(GraphFlags::UNDIRECTED);
    assert!(undirected.is_undirected());
    assert_eq!(undirected.nedges(), 5);
    assert!(undirected.conforms_restrictions());
}

#[test]
fn test_converters_are_idempotent() {
    type Convert = fn(&mut Graph<char>);
    let converters: [(&str, Convert); 6] = [
        ("make_directed", Graph::make_directed),
        ("make_undirected", Graph::make_undirected),
        ("make_acyclic", Graph::make_acyclic),
        ("make_not_self_connected", Graph::make_not_self_connected),
        ("make_tree", Graph::make_tree),
        ("make_singly_connected", |g: &mut Graph<char>| {
            g.make_singly_connected(true)
        }),
    ];

    for (name, convert) in converters {
        let mut g = square(GraphFlags::FREE);
        g.add_edge('a', 'c').unwrap();
        g.add_edge('c', 'a').unwrap();
        g.add_edge('b', 'b').unwrap();
        g.add_edge('a', 'b').unwrap();

        convert(&mut g);
        let once = (g.flags(), edge_set(&g));
        convert(&mut g);
        let twice = (g.flags(), edge_set(&g));
        assert_eq!(once, twice, "{name}");
    }
}
