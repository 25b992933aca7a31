// Copyright 2026 The Noesis Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! End-to-end scenarios through the public session API.

use float_cmp::approx_eq;

use noesis_layout::{
    Concept, DomainInput, ErrorCode, LayoutMode, LayoutOptions, LayoutSession, LogicalStructure,
    Relation, SimulationStatus,
};

fn concept(id: &str, related: &[&str]) -> Concept {
    Concept {
        id: id.to_string(),
        name: id.to_uppercase(),
        definition: format!("definition of {id}"),
        related_concepts: related.iter().map(|s| s.to_string()).collect(),
    }
}

fn force_session(concepts: Vec<Concept>) -> LayoutSession {
    let mut session = LayoutSession::new(LayoutMode::Force, LayoutOptions::default());
    session.build(DomainInput::Concepts(concepts));
    session
}

#[test]
fn mutual_references_produce_a_single_edge() {
    let session = force_session(vec![concept("a", &["b"]), concept("b", &["a"])]);

    let stats = session.statistics();
    assert_eq!(stats.node_count, 2);
    assert_eq!(stats.edge_count, 1);
    assert!(approx_eq!(f64, stats.density, 0.5));
}

#[test]
fn every_edge_endpoint_exists_in_the_node_set() {
    let session = force_session(vec![
        concept("a", &["b", "missing", "a"]),
        concept("b", &["c"]),
        concept("c", &["a", "nowhere"]),
    ]);

    let snapshot = session.snapshot();
    for edge in snapshot.edges() {
        assert!(snapshot.node(&edge.source).is_some());
        assert!(snapshot.node(&edge.target).is_some());
    }
}

#[test]
fn bare_proposition_yields_three_node_tree() {
    let mut session = LayoutSession::new(LayoutMode::Hierarchical, LayoutOptions::default());
    session.build(DomainInput::Structure(LogicalStructure {
        subject: "All men".to_string(),
        predicate: "are mortal".to_string(),
        modifiers: vec![],
        relations: vec![],
    }));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.node_count(), 3);
    assert!(snapshot.node("root").is_some());
    assert!(snapshot.node("subject").is_some());
    assert!(snapshot.node("predicate").is_some());
    assert!(snapshot.node("modifiers").is_none());
    assert!(snapshot.node("relations").is_none());
}

#[test]
fn full_proposition_tree_layout_is_deterministic() {
    let structure = LogicalStructure {
        subject: "the soul".to_string(),
        predicate: "is immortal".to_string(),
        modifiers: vec!["necessarily".to_string()],
        relations: vec![Relation {
            relation_type: "implication".to_string(),
        }],
    };

    let mut first = LayoutSession::new(LayoutMode::Hierarchical, LayoutOptions::default());
    first.build(DomainInput::Structure(structure.clone()));
    let mut second = LayoutSession::new(LayoutMode::Hierarchical, LayoutOptions::default());
    second.build(DomainInput::Structure(structure));

    let (a, b) = (first.snapshot(), second.snapshot());
    assert_eq!(a.node_count(), b.node_count());
    for (na, nb) in a.nodes().iter().zip(b.nodes()) {
        let (pa, pb) = (na.position.unwrap(), nb.position.unwrap());
        assert_eq!(pa.x.to_bits(), pb.x.to_bits());
        assert_eq!(pa.y.to_bits(), pb.y.to_bits());
    }
}

#[test]
fn drag_to_point_then_release() {
    let mut session = force_session(vec![
        concept("x", &["y"]),
        concept("y", &["z"]),
        concept("z", &[]),
    ]);
    session.settle().unwrap();

    session.drag_start("x").unwrap();
    session.drag_move("x", 100.0, 200.0).unwrap();
    session.drag_end("x").unwrap();

    // fixed at the drop point immediately after dragEnd
    let dropped = session.snapshot().node("x").unwrap().position.unwrap();
    assert!(approx_eq!(f64, dropped.x, 100.0));
    assert!(approx_eq!(f64, dropped.y, 200.0));

    // free to move again on subsequent ticks
    session.tick().unwrap();
    let moved = session.snapshot().node("x").unwrap().position.unwrap();
    assert!(
        !approx_eq!(f64, moved.x, 100.0) || !approx_eq!(f64, moved.y, 200.0),
        "unpinned node should respond to forces after release"
    );
}

#[test]
fn removing_a_node_removes_its_edges() {
    let mut session = force_session(vec![concept("a", &["b"]), concept("b", &["c"]), concept("c", &[])]);
    session.remove_node("a").unwrap();

    let snapshot = session.snapshot();
    assert!(snapshot.node("a").is_none());
    assert!(snapshot.node("b").is_some());
    assert_eq!(snapshot.edge_count(), 1);
    assert_eq!(snapshot.edges()[0].id, "b-c");
}

#[test]
fn converged_simulation_is_idempotent() {
    let mut session = force_session(vec![
        concept("a", &["b", "c"]),
        concept("b", &["c"]),
        concept("c", &[]),
    ]);
    assert_eq!(session.settle(), Some(SimulationStatus::Converged));

    let before = session.snapshot();
    for _ in 0..25 {
        session.tick();
    }
    let after = session.snapshot();

    for (a, b) in before.nodes().iter().zip(after.nodes()) {
        let (pa, pb) = (a.position.unwrap(), b.position.unwrap());
        assert!(pa.distance(pb) < 1e-9, "{} drifted at rest", a.id);
    }
}

#[test]
fn no_overlaps_after_convergence() {
    let ids = ["a", "b", "c", "d", "e", "f"];
    let concepts: Vec<Concept> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| concept(id, &[ids[(i + 1) % ids.len()]]))
        .collect();
    let mut session = force_session(concepts);
    session.settle().unwrap();

    let snapshot = session.snapshot();
    let nodes = snapshot.nodes();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let d = nodes[i]
                .position
                .unwrap()
                .distance(nodes[j].position.unwrap());
            assert!(
                d >= nodes[i].radius + nodes[j].radius - 1e-6,
                "{} overlaps {}",
                nodes[i].id,
                nodes[j].id
            );
        }
    }
}

#[test]
fn exhausted_budget_surfaces_divergent_status_with_snapshot() {
    let options = LayoutOptions {
        max_ticks: 2,
        ..LayoutOptions::default()
    };
    let mut session = LayoutSession::new(LayoutMode::Force, options);
    session.build(DomainInput::Concepts(vec![
        concept("a", &["b"]),
        concept("b", &[]),
    ]));

    assert_eq!(session.settle(), Some(SimulationStatus::Divergent));
    assert_eq!(session.last_status(), Some(SimulationStatus::Divergent));
    let snapshot = session.snapshot();
    assert!(snapshot.nodes().iter().all(|n| n.position.is_some()));
}

#[test]
fn invalid_drag_is_a_signaled_noop() {
    let mut session = force_session(vec![concept("a", &[])]);
    let before = session.snapshot();

    let err = session.drag_start("ghost").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidOperation);

    let after = session.snapshot();
    let (pa, pb) = (
        before.node("a").unwrap().position.unwrap(),
        after.node("a").unwrap().position.unwrap(),
    );
    assert!(approx_eq!(f64, pa.x, pb.x));
    assert!(approx_eq!(f64, pa.y, pb.y));
}

#[test]
fn layered_concept_map_ranks_top_to_bottom() {
    let mut session = LayoutSession::new(LayoutMode::Hierarchical, LayoutOptions::default());
    session.build(DomainInput::Concepts(vec![
        concept("root", &["mid1", "mid2"]),
        concept("mid1", &["leaf"]),
        concept("mid2", &[]),
        concept("leaf", &[]),
    ]));

    let snapshot = session.snapshot();
    let y = |id: &str| snapshot.node(id).unwrap().position.unwrap().y;
    assert!(y("root") < y("mid1"));
    assert!(y("mid1") < y("leaf"));
    assert!(approx_eq!(f64, y("mid1"), y("mid2")));

    let x = |id: &str| snapshot.node(id).unwrap().position.unwrap().x;
    assert!(x("mid1") < x("mid2"), "rank rows keep insertion order");
}
