//! End-to-end checks on the 12-node reference network.

use ripplespread::pareto::DominanceComparator;
use ripplespread::prelude::*;

const INSTANCE: &str = include_str!("../instances/rsa_12_node.yaml");

fn load() -> (GraphInstance, Graph) {
    let instance = GraphInstance::from_yaml(INSTANCE).unwrap();
    let graph = instance.to_graph().unwrap();
    (instance, graph)
}

fn run_reference() -> (Graph, RunResult) {
    let (instance, graph) = load();
    let result = ripplespread::run(&graph, instance.source).unwrap();
    (graph, result)
}

#[test]
fn instance_loads_with_expected_layout() {
    let (instance, graph) = load();
    assert_eq!(instance.source, 0);
    assert_eq!(graph.node_count(), 12);
    assert_eq!(graph.edge_count(), 23);
    assert_eq!(
        *graph.layout(),
        ObjectiveLayout::new(2, 2, FuzzyShape::Triangular)
    );
    assert!(graph.out_edges(11).is_empty());
}

#[test]
fn reference_paths_match_in_arrival_order() {
    let (_, result) = run_reference();
    let expected: Vec<Vec<Vec<NodeId>>> = vec![
        vec![vec![0]],
        vec![vec![0, 1]],
        vec![vec![0, 2]],
        vec![vec![0, 1, 3]],
        vec![vec![0, 4], vec![0, 1, 3, 4]],
        vec![vec![0, 2, 5]],
        vec![vec![0, 1, 3, 6], vec![0, 4, 6]],
        vec![vec![0, 4, 7], vec![0, 2, 5, 7], vec![0, 1, 3, 4, 7]],
        vec![vec![0, 1, 3, 6, 8], vec![0, 4, 6, 8]],
        vec![vec![0, 4, 9], vec![0, 4, 7, 9], vec![0, 2, 5, 7, 9], vec![0, 1, 3, 4, 7, 9]],
        vec![vec![0, 4, 7, 10], vec![0, 2, 5, 7, 10], vec![0, 1, 3, 4, 7, 10]],
        vec![
            vec![0, 4, 7, 10, 11],
            vec![0, 2, 5, 7, 10, 11],
            vec![0, 4, 9, 11],
            vec![0, 1, 3, 6, 8, 11],
            vec![0, 1, 3, 4, 7, 10, 11],
            vec![0, 4, 7, 9, 11],
            vec![0, 2, 5, 7, 9, 11],
            vec![0, 1, 3, 4, 7, 9, 11],
        ],
    ];

    for (node, paths) in expected.iter().enumerate() {
        let actual: Vec<Vec<NodeId>> = result
            .for_node(node)
            .iter()
            .map(|r| r.path.clone())
            .collect();
        assert_eq!(&actual, paths, "paths at node {node}");
    }
    assert_eq!(result.for_node(11)[0].objective.crisp, vec![23.0, 18.0]);
}

#[test]
fn calibration_picks_first_crisp_dimension() {
    // dim 0 spans 1..9 (ratio 9), dim 1 spans 1..9 as well; tie goes to dim 0
    let (_, graph) = load();
    let calibration = SpeedCalibration::calibrate(&graph.neighbor_index()).unwrap();
    assert_eq!(calibration.dimension(), 0);
    assert!((calibration.speed() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn sink_has_non_dominated_paths_from_source() {
    let (_, result) = run_reference();
    let records = result.for_node(11);
    assert!(!records.is_empty());

    let comparator = DominanceComparator::new(ClosedFormMetric::new());
    for record in records {
        assert_eq!(record.path.first(), Some(&0));
        assert_eq!(record.path.last(), Some(&11));
    }
    for a in records {
        for b in records {
            assert!(!comparator.dominates(&a.objective, &b.objective));
        }
    }
}

#[test]
fn every_node_is_reached() {
    let (graph, result) = run_reference();
    assert_eq!(result.reached(), (0..graph.node_count()).collect::<Vec<_>>());
    assert_eq!(result.for_node(0).len(), 1);
    assert_eq!(result.for_node(0)[0].path, vec![0]);
}

#[test]
fn objectives_are_exact_path_sums() {
    let (graph, result) = run_reference();
    for node in 0..graph.node_count() {
        for record in result.for_node(node) {
            let mut expected = ObjectiveVector::zero(graph.layout());
            for pair in record.path.windows(2) {
                expected = expected.extended(graph.weight(pair[0], pair[1]).unwrap());
            }
            assert_eq!(record.objective, expected, "path {:?}", record.path);
        }
    }
}

#[test]
fn run_stays_within_step_bound() {
    let (instance, graph) = load();
    let engine = RippleEngine::new(&graph, instance.source, &RunConfig::default()).unwrap();
    let bound = engine.calibration().step_bound(graph.node_count());
    let result = engine.run().unwrap();
    assert!(result.steps > 0);
    assert!(result.steps <= bound);
}

#[test]
fn manual_stepping_matches_run() {
    let (instance, graph) = load();
    let config = RunConfig::default();

    let mut engine = RippleEngine::new(&graph, instance.source, &config).unwrap();
    let mut accepted = 0;
    while !engine.is_finished() {
        let report = engine.step().unwrap();
        assert!(report.accepted <= report.candidates);
        accepted += report.accepted;
    }
    assert_eq!(engine.registry().len(), accepted + 1);
    let stepped = engine.into_result();

    let direct = RippleEngine::new(&graph, instance.source, &config)
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(stepped, direct);
}

#[test]
fn defuzzified_view_has_one_score_per_objective() {
    let (_, result) = run_reference();
    let metric = ClosedFormMetric::new();
    for record in result.for_node(11) {
        let scores = record.defuzzified(&metric);
        assert_eq!(scores.len(), 4);
        assert_eq!(&scores[..2], record.objective.crisp.as_slice());
    }
}

#[test]
fn other_source_runs() {
    let (_, graph) = load();
    let result = ripplespread::run(&graph, 7).unwrap();
    assert!(result.for_node(0).is_empty());
    assert!(!result.for_node(11).is_empty());
    assert!(result.for_node(11).iter().all(|r| r.path[0] == 7));
}

#[test]
fn sink_as_source_is_trivial() {
    let (_, graph) = load();
    let result = ripplespread::run(&graph, 11).unwrap();
    assert_eq!(result.total_paths(), 1);
    assert_eq!(result.for_node(11)[0].path, vec![11]);
    assert!(result.for_node(11)[0]
        .objective
        .crisp
        .iter()
        .all(|&c| c == 0.0));
}
