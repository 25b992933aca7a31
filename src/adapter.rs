// Copyright 2026 The Noesis Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Converts domain objects into the engine's graph primitives. Pure
//! transformation: malformed pieces of input are logged and dropped so a
//! best-effort graph always comes out the other side.

use std::collections::HashSet;

use tracing::warn;

use crate::config::LayoutOptions;
use crate::domain::{Concept, LogicalStructure};
use crate::graph::{Edge, EdgeKind, Graph, Node, NodeKind};

/// A rooted tree produced from a logical structure, consumed by the
/// hierarchical layout. Never mutated after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        TreeNode {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        TreeNode {
            id: id.into(),
            label: label.into(),
            children,
        }
    }
}

/// One node per concept, one `Related` edge per (concept, related id)
/// pair. Self-loops, duplicate unordered pairs, references to unknown
/// ids, and concepts without an id are dropped, not fatal.
pub fn graph_from_concepts(concepts: &[Concept], options: &LayoutOptions) -> Graph {
    let mut graph = Graph::new();

    for concept in concepts {
        if concept.id.is_empty() {
            warn!(name = %concept.name, "dropping concept without an id");
            continue;
        }
        let node = Node::new(
            &concept.id,
            &concept.name,
            NodeKind::Concept,
            options.concept_radius,
        );
        if let Err(err) = graph.add_node(node) {
            warn!(%err, id = %concept.id, "dropping duplicate concept");
        }
    }

    let mut emitted: HashSet<(String, String)> = HashSet::new();
    for concept in concepts {
        if !graph.has_node(&concept.id) {
            continue;
        }
        for related in &concept.related_concepts {
            if *related == concept.id {
                continue;
            }
            if !graph.has_node(related) {
                warn!(
                    id = %concept.id,
                    related = %related,
                    "dropping reference to unknown concept"
                );
                continue;
            }
            let key = if concept.id < *related {
                (concept.id.clone(), related.clone())
            } else {
                (related.clone(), concept.id.clone())
            };
            if !emitted.insert(key) {
                continue;
            }
            if let Err(err) = graph.add_edge(Edge::new(&concept.id, related, EdgeKind::Related)) {
                warn!(%err, "dropping edge");
            }
        }
    }

    graph
}

/// Synthetic rooted tree for a proposition's logical structure. The
/// `modifiers` and `relations` group nodes appear only when their source
/// lists are non-empty; no empty placeholder nodes.
pub fn tree_from_structure(structure: &LogicalStructure) -> TreeNode {
    let mut children = vec![
        TreeNode::leaf("subject", &structure.subject),
        TreeNode::leaf("predicate", &structure.predicate),
    ];

    if !structure.modifiers.is_empty() {
        let modifiers = structure
            .modifiers
            .iter()
            .enumerate()
            .map(|(i, modifier)| TreeNode::leaf(format!("modifier-{i}"), modifier))
            .collect();
        children.push(TreeNode::with_children("modifiers", "Modifiers", modifiers));
    }

    if !structure.relations.is_empty() {
        let relations = structure
            .relations
            .iter()
            .enumerate()
            .map(|(i, relation)| TreeNode::leaf(format!("relation-{i}"), &relation.relation_type))
            .collect();
        children.push(TreeNode::with_children("relations", "Relations", relations));
    }

    TreeNode::with_children("root", "Proposition", children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Relation;

    fn concept(id: &str, related: &[&str]) -> Concept {
        Concept {
            id: id.to_string(),
            name: id.to_uppercase(),
            definition: String::new(),
            related_concepts: related.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_mutual_references_dedupe_to_one_edge() {
        let concepts = vec![concept("a", &["b"]), concept("b", &["a"])];
        let graph = graph_from_concepts(&concepts, &LayoutOptions::default());

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges()[0].id, "a-b");
        assert!((graph.edges()[0].weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_self_loops_skipped() {
        let graph = graph_from_concepts(&[concept("a", &["a"])], &LayoutOptions::default());
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_unknown_references_dropped() {
        let graph = graph_from_concepts(&[concept("a", &["ghost"])], &LayoutOptions::default());
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_missing_and_duplicate_ids_dropped() {
        let concepts = vec![concept("", &[]), concept("a", &[]), concept("a", &["b"])];
        let graph = graph_from_concepts(&concepts, &LayoutOptions::default());
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.nodes()[0].id, "a");
    }

    #[test]
    fn test_concept_nodes_get_fixed_radius() {
        let graph = graph_from_concepts(&[concept("a", &[])], &LayoutOptions::default());
        assert!((graph.nodes()[0].radius - 30.0).abs() < f64::EPSILON);
        assert_eq!(graph.nodes()[0].kind, NodeKind::Concept);
    }

    #[test]
    fn test_no_dangling_edges_for_any_input() {
        let concepts = vec![
            concept("a", &["b", "x", "a"]),
            concept("b", &["c", "a"]),
            concept("c", &["nowhere"]),
        ];
        let graph = graph_from_concepts(&concepts, &LayoutOptions::default());
        for edge in graph.edges() {
            assert!(graph.has_node(&edge.source));
            assert!(graph.has_node(&edge.target));
        }
    }

    #[test]
    fn test_minimal_tree_has_three_nodes() {
        let structure = LogicalStructure {
            subject: "All men".to_string(),
            predicate: "are mortal".to_string(),
            modifiers: vec![],
            relations: vec![],
        };
        let tree = tree_from_structure(&structure);

        assert_eq!(tree.id, "root");
        assert_eq!(tree.label, "Proposition");
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].id, "subject");
        assert_eq!(tree.children[0].label, "All men");
        assert_eq!(tree.children[1].id, "predicate");
        assert!(tree.children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_groups_present_only_when_non_empty() {
        let structure = LogicalStructure {
            subject: "the soul".to_string(),
            predicate: "is immortal".to_string(),
            modifiers: vec!["necessarily".to_string(), "always".to_string()],
            relations: vec![Relation {
                relation_type: "implication".to_string(),
            }],
        };
        let tree = tree_from_structure(&structure);

        assert_eq!(tree.children.len(), 4);
        let modifiers = &tree.children[2];
        assert_eq!(modifiers.id, "modifiers");
        assert_eq!(modifiers.children.len(), 2);
        assert_eq!(modifiers.children[0].id, "modifier-0");
        assert_eq!(modifiers.children[0].label, "necessarily");

        let relations = &tree.children[3];
        assert_eq!(relations.id, "relations");
        assert_eq!(relations.children[0].label, "implication");
    }
}
