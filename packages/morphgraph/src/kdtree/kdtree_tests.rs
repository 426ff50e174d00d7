//! Tests for k-d tree construction and queries.

use super::*;

fn grid(n: usize) -> Vec<KdNode<(usize, usize)>> {
    let mut points = Vec::with_capacity(n * n);
    for x in 0..n {
        for y in 0..n {
            points.push(KdNode::new(vec![x as f64, y as f64], (x, y)));
        }
    }
    points
}

/// Checks the split invariant of every cell and that every point lies in
/// its cell's bounding box.
fn assert_well_formed<T>(tree: &KdTree<T>) {
    for cell in &tree.cells {
        let cut = tree.nodes[cell.index].point[cell.cutdim];
        if let Some(lo) = cell.loson {
            assert!(tree.nodes[tree.cells[lo].index].point[cell.cutdim] <= cut);
        }
        if let Some(hi) = cell.hison {
            assert!(tree.nodes[tree.cells[hi].index].point[cell.cutdim] >= cut);
        }
        let point = &tree.nodes[cell.index].point;
        for dim in 0..tree.dimension {
            assert!(cell.lobound[dim] <= point[dim] && point[dim] <= cell.upbound[dim]);
        }
    }
}

#[test]
fn test_build_keeps_every_point() {
    let tree = KdTree::new(grid(5), DistanceMetric::Euclidean).unwrap();
    assert_eq!(tree.len(), 25);
    assert_eq!(tree.dimension(), 2);
    assert_eq!(tree.cells.len(), 25);
    assert_eq!(tree.metric(), DistanceMetric::Euclidean);
    assert_well_formed(&tree);
}

#[test]
fn test_cut_dimension_cycles_with_depth() {
    let tree = KdTree::new(grid(4), DistanceMetric::Manhattan).unwrap();
    let root = &tree.cells[tree.root.unwrap()];
    assert_eq!(root.cutdim, 0);
    let child = &tree.cells[root.loson.unwrap()];
    assert_eq!(child.cutdim, 1);
}

#[test]
fn test_k_nearest_sorted_ascending() {
    let tree = KdTree::new(grid(6), DistanceMetric::Euclidean).unwrap();
    let found = tree.k_nearest_neighbors(&[2.1, 3.2], 5).unwrap();

    assert_eq!(found.len(), 5);
    assert_eq!(found[0].node.data, (2, 3));
    assert!(found.windows(2).all(|w| w[0].distance <= w[1].distance));
}

#[test]
fn test_k_larger_than_tree_returns_everything() {
    let tree = KdTree::new(grid(2), DistanceMetric::Chebyshev).unwrap();
    let found = tree.k_nearest_neighbors(&[0.0, 0.0], 10).unwrap();
    assert_eq!(found.len(), 4);
    assert_eq!(found[0].distance, 0.0);
    assert_eq!(found[3].distance, 1.0);
}

#[test]
fn test_matches_brute_force_for_every_metric() {
    let points = grid(7);
    let query = [3.3, 1.7];
    for metric in [
        DistanceMetric::Chebyshev,
        DistanceMetric::Manhattan,
        DistanceMetric::Euclidean,
    ] {
        let tree = KdTree::new(points.clone(), metric).unwrap();
        let fast: Vec<f64> = tree
            .k_nearest_neighbors(&query, 6)
            .unwrap()
            .iter()
            .map(|n| n.distance)
            .collect();
        let slow: Vec<f64> = brute_force_k_nearest(&points, &query, 6, metric)
            .unwrap()
            .iter()
            .map(|n| n.distance)
            .collect();
        assert_eq!(fast, slow, "metric {metric}");
    }
}

#[test]
fn test_predicate_skips_rejected_points() {
    let tree = KdTree::new(grid(5), DistanceMetric::Euclidean).unwrap();
    let not_origin = |node: &KdNode<(usize, usize)>| node.data != (0, 0);

    let found = tree
        .k_nearest_neighbors_filtered(&[0.0, 0.0], 2, &not_origin)
        .unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|n| n.node.data != (0, 0)));
    assert!(found.iter().all(|n| n.distance == 1.0));
}

#[test]
fn test_predicate_rejecting_everything_returns_nothing() {
    let tree = KdTree::new(grid(3), DistanceMetric::Euclidean).unwrap();
    let found = tree
        .k_nearest_neighbors_filtered(&[1.0, 1.0], 3, &|_: &KdNode<(usize, usize)>| false)
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_weights_change_the_nearest_point() {
    let points = vec![
        KdNode::new(vec![1.0, 0.0], "x"),
        KdNode::new(vec![0.0, 2.0], "y"),
    ];
    let plain = KdTree::new(points.clone(), DistanceMetric::Manhattan).unwrap();
    assert_eq!(plain.nearest_neighbor(&[0.0, 0.0]).unwrap().unwrap().node.data, "x");

    let config = KdTreeConfig::default()
        .with_metric(DistanceMetric::Manhattan)
        .with_weights(vec![10.0, 1.0]);
    let weighted = KdTree::with_config(points, config).unwrap();
    let nearest = weighted.nearest_neighbor(&[0.0, 0.0]).unwrap().unwrap();
    assert_eq!(nearest.node.data, "y");
    assert_eq!(nearest.distance, 2.0);
}

#[test]
fn test_dimension_errors() {
    let mixed = vec![KdNode::new(vec![0.0, 0.0], ()), KdNode::new(vec![1.0], ())];
    assert_eq!(
        KdTree::new(mixed, DistanceMetric::Euclidean).unwrap_err(),
        KdTreeError::DimensionMismatch {
            expected: 2,
            found: 1
        }
    );

    let flat = vec![KdNode::new(Vec::new(), ())];
    assert_eq!(
        KdTree::new(flat, DistanceMetric::Euclidean).unwrap_err(),
        KdTreeError::ZeroDimension
    );

    let config = KdTreeConfig::default().with_weights(vec![1.0]);
    assert!(matches!(
        KdTree::with_config(grid(2), config),
        Err(KdTreeError::DimensionMismatch { expected: 2, found: 1 })
    ));

    let tree = KdTree::new(grid(2), DistanceMetric::Euclidean).unwrap();
    assert!(matches!(
        tree.k_nearest_neighbors(&[0.0, 0.0, 0.0], 1),
        Err(KdTreeError::DimensionMismatch { expected: 2, found: 3 })
    ));
}

#[test]
fn test_unknown_metric_code() {
    assert_eq!(
        KdTreeConfig::from_code(9).unwrap_err(),
        KdTreeError::UnknownMetric(9)
    );
    assert_eq!(
        KdTreeConfig::from_code(1).unwrap().metric,
        DistanceMetric::Manhattan
    );
}

#[test]
fn test_empty_tree() {
    let tree: KdTree<()> = KdTree::new(Vec::new(), DistanceMetric::Euclidean).unwrap();
    assert!(tree.is_empty());
    assert!(tree.k_nearest_neighbors(&[1.0], 3).unwrap().is_empty());
    assert!(tree.nearest_neighbor(&[]).unwrap().is_none());
}

#[test]
fn test_duplicate_points_are_all_returned() {
    let points = vec![
        KdNode::new(vec![1.0, 1.0], 'a'),
        KdNode::new(vec![1.0, 1.0], 'b'),
        KdNode::new(vec![1.0, 1.0], 'c'),
        KdNode::new(vec![9.0, 9.0], 'z'),
    ];
    let tree = KdTree::new(points, DistanceMetric::Euclidean).unwrap();
    let mut found: Vec<char> = tree
        .k_nearest_neighbors(&[1.0, 1.0], 3)
        .unwrap()
        .iter()
        .map(|n| n.node.data)
        .collect();
    found.sort_unstable();
    assert_eq!(found, vec!['a', 'b', 'c']);
}
