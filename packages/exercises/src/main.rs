use std::error::Error;

use morphgraph::kdtree::{DistanceMetric, KdNode, KdTree};
use morphgraph::{EdgeOptions, Graph, GraphFlags};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type DemoResult = Result<(), Box<dyn Error>>;

fn road_network() -> Result<Graph<&'static str, &'static str>, Box<dyn Error>> {
    let mut graph = Graph::new(GraphFlags::UNDIRECTED);
    for (from, to, weight, road) in [
        ("s", "u", 10.0, "a1"),
        ("s", "x", 5.0, "a2"),
        ("u", "x", 2.0, "b1"),
        ("u", "v", 1.0, "b2"),
        ("x", "v", 9.0, "c1"),
        ("x", "y", 2.0, "c2"),
        ("v", "y", 4.0, "d1"),
        ("y", "s", 7.0, "d2"),
    ] {
        graph.add_edge_with(from, to, EdgeOptions::weighted(weight).label(road))?;
    }
    Ok(graph)
}

fn dijkstra_example() -> DemoResult {
    let graph = road_network()?;
    let source = graph.get_node(&"s")?;
    let paths = graph.dijkstra_shortest_path(source)?;

    for (target, entry) in paths.iter() {
        let names: Vec<&str> = entry
            .path
            .iter()
            .map(|&id| graph.value(id).copied())
            .collect::<Result<_, _>>()?;
        info!(to = graph.value(target)?, cost = entry.cost, path = ?names, "shortest path");
    }
    Ok(())
}

fn kruskal_example() -> DemoResult {
    let graph = road_network()?;
    let mst = graph.minimum_spanning_tree()?;

    for (_, edge) in mst.edges() {
        let (from, to) = edge.endpoints();
        info!(
            from = mst.value(from)?,
            to = mst.value(to)?,
            weight = edge.weight(),
            road = ?edge.label(),
            "tree edge"
        );
    }
    info!(total = mst.total_weight(), "minimum spanning tree");
    Ok(())
}

fn morphology_example() -> DemoResult {
    let mut graph: Graph<u32> = Graph::new(GraphFlags::FREE);
    graph.add_edges([(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0), (3, 3, 1.0), (1, 2, 4.0)])?;
    info!(
        flags = %graph.flags(),
        edges = graph.nedges(),
        cyclic = graph.is_cyclic(),
        multi = graph.is_multi_connected(),
        "free graph"
    );

    let tree = graph.copy_with_flags(GraphFlags::TREE);
    info!(flags = %tree.flags(), edges = tree.nedges(), is_tree = tree.is_tree(), "copied as tree");

    graph.make_acyclic();
    info!(flags = %graph.flags(), edges = graph.nedges(), "made acyclic");

    graph.remove_node(&2)?;
    info!(
        edges = graph.nedges(),
        bridged = graph.has_edge(&1, &3),
        "removed node 2"
    );

    let mut colored: Graph<u32> = Graph::new(GraphFlags::UNDIRECTED);
    colored.add_edges([(1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0), (4, 1, 1.0)])?;
    let used = colored.colorize(2)?;
    info!(used, "colored a 4-cycle");
    Ok(())
}

fn kdtree_example() -> DemoResult {
    let cities = vec![
        KdNode::new(vec![52.52, 13.40], "berlin"),
        KdNode::new(vec![48.86, 2.35], "paris"),
        KdNode::new(vec![51.51, -0.13], "london"),
        KdNode::new(vec![50.08, 14.44], "prague"),
        KdNode::new(vec![48.21, 16.37], "vienna"),
        KdNode::new(vec![52.37, 4.90], "amsterdam"),
    ];
    let tree = KdTree::new(cities, DistanceMetric::Euclidean)?;

    let query = [50.11, 8.68];
    for neighbor in tree.k_nearest_neighbors(&query, 3)? {
        info!(city = neighbor.node.data, distance = neighbor.distance, "near frankfurt");
    }

    let not_east = |node: &KdNode<&str>| node.point[1] < 10.0;
    for neighbor in tree.k_nearest_neighbors_filtered(&query, 2, &not_east)? {
        info!(city = neighbor.node.data, distance = neighbor.distance, "west of 10E");
    }
    Ok(())
}

fn main() -> DemoResult {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dijkstra_example()?;
    kruskal_example()?;
    morphology_example()?;
    kdtree_example()?;
    Ok(())
}
