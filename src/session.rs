// Copyright 2026 The Noesis Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! One visualization instance: a session owns its graph and whichever
//! layout strategy is active, coordinates adapter -> layout -> interaction,
//! and hands renderers positioned copies. Nothing here is shared between
//! sessions, and nothing here does I/O.

use serde::Serialize;
use tracing::debug;

use crate::adapter::{self, TreeNode};
use crate::common::{Error, ErrorCode, ErrorKind, Result};
use crate::config::LayoutOptions;
use crate::force::{ForceSimulation, SimulationStatus};
use crate::graph::{Edge, Graph, Node};
use crate::hierarchy;
use crate::op_err;

/// Domain data a session can be built from.
#[derive(Clone, Debug)]
pub enum DomainInput {
    Concepts(Vec<crate::domain::Concept>),
    Structure(crate::domain::LogicalStructure),
}

/// How concept graphs get laid out. Logical structures are always
/// hierarchical.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    Hierarchical,
    Force,
}

/// The active layout, a tagged variant rather than parallel session
/// types. Hierarchical layouts keep their source tree so a resize can
/// re-run the tree pass instead of degrading to the generic layered one.
enum LayoutStrategy {
    Hierarchy {
        graph: Graph,
        tree: Option<TreeNode>,
    },
    Force(ForceSimulation),
}

/// Counts and density of the current graph.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
}

/// Owns one graph's layout for the lifetime of one visualization
/// instance; discarded on teardown.
pub struct LayoutSession {
    mode: LayoutMode,
    options: LayoutOptions,
    strategy: Option<LayoutStrategy>,
    last_status: Option<SimulationStatus>,
}

impl LayoutSession {
    pub fn new(mode: LayoutMode, options: LayoutOptions) -> Self {
        LayoutSession {
            mode,
            options,
            strategy: None,
            last_status: None,
        }
    }

    /// Run the adapter and replace the current graph, resetting the
    /// active layout.
    pub fn build(&mut self, input: DomainInput) {
        self.last_status = None;
        self.strategy = Some(match input {
            DomainInput::Structure(structure) => {
                let tree = adapter::tree_from_structure(&structure);
                let graph = hierarchy::layout_tree(&tree, &self.options);
                debug!(nodes = graph.node_count(), "built logic tree layout");
                LayoutStrategy::Hierarchy {
                    graph,
                    tree: Some(tree),
                }
            }
            DomainInput::Concepts(concepts) => {
                let mut graph = adapter::graph_from_concepts(&concepts, &self.options);
                debug!(
                    nodes = graph.node_count(),
                    edges = graph.edge_count(),
                    mode = ?self.mode,
                    "built concept graph"
                );
                match self.mode {
                    LayoutMode::Hierarchical => {
                        hierarchy::layout_graph(&mut graph, &self.options);
                        LayoutStrategy::Hierarchy { graph, tree: None }
                    }
                    LayoutMode::Force => {
                        LayoutStrategy::Force(ForceSimulation::new(graph, self.options.clone()))
                    }
                }
            }
        });
    }

    /// Advance the force simulation one tick. `None` when no simulation
    /// is active (hierarchical layout, or cleared session).
    pub fn tick(&mut self) -> Option<SimulationStatus> {
        match &mut self.strategy {
            Some(LayoutStrategy::Force(sim)) => {
                let status = sim.tick();
                self.last_status = Some(status);
                Some(status)
            }
            _ => None,
        }
    }

    /// Run the force simulation to rest (or its tick budget).
    pub fn settle(&mut self) -> Option<SimulationStatus> {
        match &mut self.strategy {
            Some(LayoutStrategy::Force(sim)) => {
                let status = sim.settle();
                self.last_status = Some(status);
                Some(status)
            }
            _ => None,
        }
    }

    /// The status of the most recent simulation activity —
    /// `Divergent` is the non-fatal warning the renderer may surface.
    pub fn last_status(&self) -> Option<SimulationStatus> {
        self.last_status
    }

    /// Positioned copy of the current graph for rendering. Copy-out:
    /// the caller can never alias or corrupt live simulation state.
    pub fn snapshot(&self) -> Graph {
        match &self.strategy {
            Some(LayoutStrategy::Hierarchy { graph, .. }) => graph.clone(),
            Some(LayoutStrategy::Force(sim)) => sim.graph().clone(),
            None => Graph::new(),
        }
    }

    pub fn statistics(&self) -> Statistics {
        let (node_count, edge_count, density) = match &self.strategy {
            Some(LayoutStrategy::Hierarchy { graph, .. }) => {
                (graph.node_count(), graph.edge_count(), graph.density())
            }
            Some(LayoutStrategy::Force(sim)) => (
                sim.graph().node_count(),
                sim.graph().edge_count(),
                sim.graph().density(),
            ),
            None => (0, 0, 0.0),
        };
        Statistics {
            node_count,
            edge_count,
            density,
        }
    }

    /// New viewport bounds. The force simulation re-centers and
    /// restarts; a hierarchical layout recomputes against the new
    /// available width.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.options.width = width;
        self.options.height = height;
        match &mut self.strategy {
            Some(LayoutStrategy::Hierarchy { graph, tree }) => match tree {
                Some(tree) => *graph = hierarchy::layout_tree(tree, &self.options),
                None => hierarchy::layout_graph(graph, &self.options),
            },
            Some(LayoutStrategy::Force(sim)) => sim.resize(width, height),
            None => {}
        }
    }

    /// Stable textual serialization of the current snapshot, for
    /// persistence or debugging by external collaborators.
    pub fn export_serialized(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(|err| {
            Error::new(
                ErrorKind::Session,
                ErrorCode::Serialization,
                Some(err.to_string()),
            )
        })
    }

    /// Drop the graph and simulation state; no further ticks run until
    /// the next `build`.
    pub fn clear(&mut self) {
        self.strategy = None;
        self.last_status = None;
    }

    fn force_mut(&mut self) -> Result<&mut ForceSimulation> {
        match &mut self.strategy {
            Some(LayoutStrategy::Force(sim)) => Ok(sim),
            _ => op_err!(InvalidOperation, "no active force simulation".to_string()),
        }
    }

    // Interaction passthrough: the session is the single mutation path
    // into simulation state.

    pub fn drag_start(&mut self, id: &str) -> Result<()> {
        self.force_mut()?.drag_start(id)
    }

    pub fn drag_move(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        self.force_mut()?.drag_move(id, x, y)
    }

    pub fn drag_end(&mut self, id: &str) -> Result<()> {
        self.force_mut()?.drag_end(id)
    }

    pub fn pin(&mut self, id: &str) -> Result<()> {
        self.force_mut()?.pin(id)
    }

    pub fn release(&mut self, id: &str) -> Result<()> {
        self.force_mut()?.release(id)
    }

    // Incremental graph mutation. Under the force strategy these restart
    // the simulation, preserving layout continuity; under a hierarchical
    // strategy the layered layout is recomputed.

    pub fn add_node(&mut self, node: Node) -> Result<()> {
        match &mut self.strategy {
            Some(LayoutStrategy::Force(sim)) => sim.add_node(node),
            Some(LayoutStrategy::Hierarchy { graph, tree }) => {
                graph.add_node(node)?;
                *tree = None;
                hierarchy::layout_graph(graph, &self.options);
                Ok(())
            }
            None => op_err!(InvalidOperation, "session has no graph".to_string()),
        }
    }

    pub fn remove_node(&mut self, id: &str) -> Result<()> {
        match &mut self.strategy {
            Some(LayoutStrategy::Force(sim)) => sim.remove_node(id).map(|_| ()),
            Some(LayoutStrategy::Hierarchy { graph, tree }) => {
                graph.remove_node(id)?;
                *tree = None;
                hierarchy::layout_graph(graph, &self.options);
                Ok(())
            }
            None => op_err!(InvalidOperation, "session has no graph".to_string()),
        }
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        match &mut self.strategy {
            Some(LayoutStrategy::Force(sim)) => sim.add_edge(edge),
            Some(LayoutStrategy::Hierarchy { graph, tree }) => {
                graph.add_edge(edge)?;
                *tree = None;
                hierarchy::layout_graph(graph, &self.options);
                Ok(())
            }
            None => op_err!(InvalidOperation, "session has no graph".to_string()),
        }
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Result<()> {
        match &mut self.strategy {
            Some(LayoutStrategy::Force(sim)) => sim.remove_edge(edge_id).map(|_| ()),
            Some(LayoutStrategy::Hierarchy { graph, tree }) => {
                graph.remove_edge(edge_id)?;
                *tree = None;
                hierarchy::layout_graph(graph, &self.options);
                Ok(())
            }
            None => op_err!(InvalidOperation, "session has no graph".to_string()),
        }
    }
}
