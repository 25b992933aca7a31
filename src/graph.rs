// Copyright 2026 The Noesis Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::HashMap;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::common::{Error, ErrorCode, ErrorKind, Result};

/// 2D position/vector used throughout the layout pipeline.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }
}

impl Add for Position {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Position {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// What a node stands for in the source domain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Concept,
    PropositionPart,
    Experiment,
}

/// How an edge relates its endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Related,
    Modifier,
    Relation,
}

/// A laid-out (or not-yet-laid-out) graph node. Identity is by `id`,
/// unique within one graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub radius: f64,
    #[serde(flatten)]
    pub position: Option<Position>,
    pub pinned: bool,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind, radius: f64) -> Self {
        Node {
            id: id.into(),
            label: label.into(),
            kind,
            radius,
            position: None,
            pinned: false,
        }
    }
}

/// An edge referencing nodes by id. `weight` defaults to 1.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub kind: EdgeKind,
}

impl Edge {
    /// Edge with the derived `source-target` id and unit weight.
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: EdgeKind) -> Self {
        let source = source.into();
        let target = target.into();
        Edge {
            id: format!("{source}-{target}"),
            source,
            target,
            weight: 1.0,
            kind,
        }
    }
}

/// Insertion-ordered node/edge store. The node arena keeps input order
/// (the stable tie-break order for layout) and an id index for O(1)
/// lookup. Mutating operations validate and repair, so a `Graph` never
/// holds duplicate ids or dangling edges.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index(id).map(|i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.node_index(id).map(|i| &mut self.nodes[i])
    }

    pub fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn node_at_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }

    /// Edge density: `e / (n * (n - 1))`, defined as 0 below two nodes.
    pub fn density(&self) -> f64 {
        let n = self.nodes.len();
        if n < 2 {
            0.0
        } else {
            self.edges.len() as f64 / (n * (n - 1)) as f64
        }
    }

    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if node.id.is_empty() {
            return Err(Error::new(
                ErrorKind::Layout,
                ErrorCode::MissingId,
                Some("node without an id".to_string()),
            ));
        }
        if self.index.contains_key(&node.id) {
            return Err(Error::new(
                ErrorKind::Layout,
                ErrorCode::DuplicateNode,
                Some(node.id),
            ));
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Add an edge whose endpoints must already exist; a dangling edge is
    /// rejected rather than stored.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        for endpoint in [&edge.source, &edge.target] {
            if !self.index.contains_key(endpoint) {
                return Err(Error::new(
                    ErrorKind::Layout,
                    ErrorCode::DanglingEdge,
                    Some(format!("{}: unknown endpoint {endpoint}", edge.id)),
                ));
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Remove a node and every edge incident to it.
    pub fn remove_node(&mut self, id: &str) -> Result<Node> {
        let Some(idx) = self.node_index(id) else {
            return Err(Error::new(
                ErrorKind::Layout,
                ErrorCode::DoesNotExist,
                Some(id.to_string()),
            ));
        };
        let node = self.nodes.remove(idx);
        self.edges.retain(|e| e.source != id && e.target != id);
        self.reindex();
        Ok(node)
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Result<Edge> {
        let Some(idx) = self.edges.iter().position(|e| e.id == edge_id) else {
            return Err(Error::new(
                ErrorKind::Layout,
                ErrorCode::DoesNotExist,
                Some(edge_id.to_string()),
            ));
        };
        Ok(self.edges.remove(idx))
    }

    /// Drop every edge with a missing endpoint, returning how many were
    /// dropped. Repair path for graphs assembled from untrusted parts.
    pub fn prune_dangling_edges(&mut self) -> usize {
        let before = self.edges.len();
        let index = &self.index;
        self.edges
            .retain(|e| index.contains_key(&e.source) && index.contains_key(&e.target));
        before - self.edges.len()
    }

    fn reindex(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
    }
}
