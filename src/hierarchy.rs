// Copyright 2026 The Noesis Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Deterministic layered placement: ranks increase top-to-bottom, nodes
//! within a rank keep their input order left-to-right. Used for logic
//! trees and for the concept map's layered mode. No randomness anywhere
//! in this module.

use std::collections::VecDeque;

use tracing::warn;

use crate::adapter::TreeNode;
use crate::config::LayoutOptions;
use crate::graph::{Edge, EdgeKind, Graph, Node, NodeKind, Position};

/// A tree node flattened for placement.
struct PlacedNode {
    depth: usize,
    /// Horizontal position in leaf-slot units.
    units: f64,
}

/// Lay out a rooted tree top-to-bottom: rank equals depth from the root,
/// leaves consume one `node_size.width` slot each in input order, and
/// every parent is centered over the horizontal span of its children
/// (post-order). Identical tree + options always yields identical
/// positions.
pub fn layout_tree(root: &TreeNode, options: &LayoutOptions) -> Graph {
    let mut graph = Graph::new();
    build_graph(root, None, &mut graph, options);

    let mut placements: Vec<PlacedNode> = Vec::with_capacity(graph.node_count());
    let mut next_slot = 0.0;
    place_subtree(root, 0, &mut placements, &mut next_slot, &graph);

    let max_units = placements.iter().map(|p| p.units).fold(0.0, f64::max);
    let max_depth = placements.iter().map(|p| p.depth).max().unwrap_or(0);

    for (idx, placed) in placements.iter().enumerate() {
        let x = scale_units(placed.units, max_units, options);
        let y = scale_depth(placed.depth, max_depth, options);
        graph.node_at_mut(idx).position = Some(Position::new(x, y));
    }

    graph
}

/// Insert the subtree's nodes and edges in DFS pre-order, which makes the
/// arena index of each node equal its flatten order.
fn build_graph(node: &TreeNode, parent: Option<&str>, graph: &mut Graph, options: &LayoutOptions) {
    let n = Node::new(
        &node.id,
        &node.label,
        NodeKind::PropositionPart,
        options.part_radius,
    );
    if let Err(err) = graph.add_node(n) {
        warn!(%err, "skipping tree node");
        return;
    }
    if let Some(parent_id) = parent {
        let kind = subtree_edge_kind(&node.id, parent_id);
        if let Err(err) = graph.add_edge(Edge::new(parent_id, &node.id, kind)) {
            warn!(%err, "skipping tree edge");
        }
    }
    for child in &node.children {
        build_graph(child, Some(&node.id), graph, options);
    }
}

/// Edges into the `modifiers`/`relations` group subtrees carry the kind
/// the group names; the structural root edges stay `Related`.
fn subtree_edge_kind(child_id: &str, parent_id: &str) -> EdgeKind {
    match (parent_id, child_id) {
        (_, "modifiers") | ("modifiers", _) => EdgeKind::Modifier,
        (_, "relations") | ("relations", _) => EdgeKind::Relation,
        _ => EdgeKind::Related,
    }
}

/// Post-order slot assignment: leaves take the next free slot, parents
/// the mean of their children. Returns the node's slot position.
fn place_subtree(
    node: &TreeNode,
    depth: usize,
    placements: &mut Vec<PlacedNode>,
    next_slot: &mut f64,
    graph: &Graph,
) -> f64 {
    // Mirror the skip in build_graph so arena indices stay aligned.
    if graph.node_index(&node.id) != Some(placements.len()) {
        return *next_slot;
    }
    let my_index = placements.len();
    placements.push(PlacedNode {
        depth,
        units: 0.0,
    });

    let units = if node.children.is_empty() {
        let slot = *next_slot;
        *next_slot += 1.0;
        slot
    } else {
        let mut sum = 0.0;
        let mut count = 0.0;
        for child in &node.children {
            sum += place_subtree(child, depth + 1, placements, next_slot, graph);
            count += 1.0;
        }
        sum / count
    };

    placements[my_index].units = units;
    units
}

/// Layered top-to-bottom placement for a general concept graph: ranks by
/// BFS from zero-in-degree roots, cyclic
/// remainders seeded in insertion order, each rank row centered
/// horizontally with nodes in insertion order.
pub fn layout_graph(graph: &mut Graph, options: &LayoutOptions) {
    let n = graph.node_count();
    if n == 0 {
        return;
    }

    let ranks = assign_ranks(graph);
    let max_rank = ranks.iter().copied().max().unwrap_or(0);

    // Row membership in arena (insertion) order.
    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    for (idx, &rank) in ranks.iter().enumerate() {
        rows[rank].push(idx);
    }

    for (rank, row) in rows.iter().enumerate() {
        let last = (row.len().saturating_sub(1)) as f64;
        let y = scale_depth(rank, max_rank, options);
        for (i, &idx) in row.iter().enumerate() {
            let x = scale_row_slot(i as f64, last, options);
            graph.node_at_mut(idx).position = Some(Position::new(x, y));
        }
    }
}

/// BFS rank assignment over edge direction. Nodes unreachable from any
/// zero-in-degree root (cycles) are seeded as new roots in insertion
/// order, keeping the result deterministic.
fn assign_ranks(graph: &Graph) -> Vec<usize> {
    let n = graph.node_count();
    let mut in_degree = vec![0usize; n];
    let mut out: Vec<Vec<usize>> = vec![Vec::new(); n];
    for edge in graph.edges() {
        // Endpoints always resolve: the graph repairs dangling edges.
        if let (Some(s), Some(t)) = (graph.node_index(&edge.source), graph.node_index(&edge.target))
        {
            in_degree[t] += 1;
            out[s].push(t);
        }
    }

    let mut rank = vec![usize::MAX; n];
    let mut queue: VecDeque<usize> = VecDeque::new();
    for idx in 0..n {
        if in_degree[idx] == 0 {
            rank[idx] = 0;
            queue.push_back(idx);
        }
    }

    loop {
        while let Some(idx) = queue.pop_front() {
            for &next in &out[idx] {
                if rank[next] == usize::MAX {
                    rank[next] = rank[idx] + 1;
                    queue.push_back(next);
                }
            }
        }
        match rank.iter().position(|&r| r == usize::MAX) {
            Some(idx) => {
                rank[idx] = 0;
                queue.push_back(idx);
            }
            None => break,
        }
    }

    rank
}

/// Map a slot-unit x into the viewport: natural `node_size.width` spacing
/// centered within the margins, compressed to fit when the span
/// overflows the available width.
fn scale_units(units: f64, max_units: f64, options: &LayoutOptions) -> f64 {
    let available = (options.width - options.margin.left - options.margin.right).max(0.0);
    let span = max_units * options.node_size.width;
    if span <= available {
        options.margin.left + (available - span) / 2.0 + units * options.node_size.width
    } else {
        options.margin.left + units / max_units * available
    }
}

fn scale_row_slot(slot: f64, last: f64, options: &LayoutOptions) -> f64 {
    scale_units(slot, last.max(0.0), options)
}

/// Depth-to-y mapping: rows `node_size.height` apart from the top margin,
/// compressed to fit when the ranks overflow the available height.
fn scale_depth(depth: usize, max_depth: usize, options: &LayoutOptions) -> f64 {
    let available = (options.height - options.margin.top - options.margin.bottom).max(0.0);
    let span = max_depth as f64 * options.node_size.height;
    if span <= available {
        options.margin.top + depth as f64 * options.node_size.height
    } else {
        options.margin.top + depth as f64 / max_depth as f64 * available
    }
}
