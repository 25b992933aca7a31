// Copyright 2026 The Noesis Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Iterative force layout for concept networks. Each tick is one bounded,
//! synchronous step: link springs, pairwise repulsion, and centering
//! accumulate into per-node velocities, damped integration moves the
//! nodes, and a positional pass resolves circle collisions. A global
//! alpha decays geometrically toward its target and gates both force
//! magnitude and convergence. The O(n^2) pair passes are fine at the
//! node counts this engine sees (tens to low hundreds).

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use tracing::{debug, warn};

use crate::common::{Error, ErrorCode, ErrorKind, Result};
use crate::config::LayoutOptions;
use crate::graph::{Edge, Graph, Node, Position};
use crate::interaction::DragPhase;

/// Minimum pair distance used when computing force directions, to keep
/// coincident nodes from producing infinite forces.
const MIN_DISTANCE: f64 = 1e-6;

/// Per-node simulation state, stored in an arena parallel to the graph's
/// node arena.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeState {
    pub(crate) velocity: Position,
    /// Hard position constraint while the node is pinned or dragged.
    pub(crate) fixed: Option<Position>,
    pub(crate) phase: DragPhase,
}

/// Where the simulation stands relative to its convergence criteria.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimulationStatus {
    /// Still hot; further ticks will move nodes.
    Active,
    /// Alpha fell below the floor; further ticks are no-ops.
    Converged,
    /// The tick budget ran out before alpha reached the floor. The
    /// layout is still usable, best-effort.
    Divergent,
}

/// A running force layout over one graph. Ticks are host-driven and
/// strictly sequential; `restart()` re-heats after perturbations instead
/// of recomputing from scratch.
pub struct ForceSimulation {
    pub(crate) graph: Graph,
    pub(crate) states: Vec<NodeState>,
    pub(crate) options: LayoutOptions,
    pub(crate) alpha: f64,
    pub(crate) alpha_target: f64,
    ticks: usize,
    budget_warned: bool,
    rng: StdRng,
}

impl ForceSimulation {
    pub fn new(graph: Graph, options: LayoutOptions) -> Self {
        let rng = StdRng::seed_from_u64(options.seed);
        let mut sim = ForceSimulation {
            states: vec![NodeState::default(); graph.node_count()],
            graph,
            options,
            alpha: 1.0,
            alpha_target: 0.0,
            ticks: 0,
            budget_warned: false,
            rng,
        };
        sim.seed_missing_positions();
        sim
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn status(&self) -> SimulationStatus {
        if self.alpha < self.options.alpha_min {
            SimulationStatus::Converged
        } else if self.ticks >= self.options.max_ticks {
            SimulationStatus::Divergent
        } else {
            SimulationStatus::Active
        }
    }

    /// Deterministic initial placement for nodes without a position,
    /// scattered across the viewport by the seeded rng.
    fn seed_missing_positions(&mut self) {
        let (w, h) = (self.options.width, self.options.height);
        for idx in 0..self.graph.node_count() {
            if self.graph.node_at(idx).position.is_none() {
                let pos = Position::new(self.rng.random::<f64>() * w, self.rng.random::<f64>() * h);
                self.graph.node_at_mut(idx).position = Some(pos);
            }
        }
    }

    /// Re-heat after a perturbation (drag start, graph mutation, resize):
    /// alpha comes back up to the restart level rather than to 1, so the
    /// existing layout shifts instead of re-forming, and the tick budget
    /// starts over.
    pub fn restart(&mut self) {
        self.alpha = self.alpha.max(self.options.restart_alpha);
        self.ticks = 0;
        self.budget_warned = false;
    }

    pub(crate) fn set_alpha_target(&mut self, target: f64) {
        self.alpha_target = target;
    }

    /// Advance one tick. A no-op once converged or out of budget; returns
    /// the status after the step.
    pub fn tick(&mut self) -> SimulationStatus {
        if self.status() != SimulationStatus::Active {
            return self.status();
        }

        self.ticks += 1;
        self.alpha += (self.alpha_target - self.alpha) * self.options.alpha_decay;

        self.apply_link_springs();
        self.apply_repulsion();
        self.apply_centering();
        self.integrate();
        self.resolve_collisions();

        let status = self.status();
        if status == SimulationStatus::Divergent && !self.budget_warned {
            self.budget_warned = true;
            warn!(
                ticks = self.ticks,
                alpha = self.alpha,
                "tick budget exhausted before convergence"
            );
        }
        status
    }

    /// Run ticks until the simulation is at rest or out of budget.
    pub fn settle(&mut self) -> SimulationStatus {
        loop {
            match self.tick() {
                SimulationStatus::Active => continue,
                status => {
                    debug!(ticks = self.ticks, alpha = self.alpha, ?status, "settled");
                    return status;
                }
            }
        }
    }

    fn position(&self, idx: usize) -> Position {
        self.graph.node_at(idx).position.unwrap_or_default()
    }

    /// Springs along edges pull endpoints toward the rest distance.
    /// Fixed endpoints are hard constraints and take no spring
    /// displacement.
    fn apply_link_springs(&mut self) {
        let rest = self.options.link_distance;
        let strength = self.options.spring_strength;
        for edge_idx in 0..self.graph.edge_count() {
            let edge = &self.graph.edges()[edge_idx];
            let weight = edge.weight;
            let (Some(s), Some(t)) = (
                self.graph.node_index(&edge.source),
                self.graph.node_index(&edge.target),
            ) else {
                continue;
            };

            let delta = self.position(t) - self.position(s);
            let dist = delta.length().max(MIN_DISTANCE);
            let f = strength * (dist - rest) * weight * self.alpha;
            let step = Position::new(delta.x / dist * f, delta.y / dist * f);

            if self.states[s].fixed.is_none() {
                self.states[s].velocity = self.states[s].velocity + step;
            }
            if self.states[t].fixed.is_none() {
                self.states[t].velocity = self.states[t].velocity - step;
            }
        }
    }

    /// Many-body repulsion between every node pair, inversely
    /// proportional to squared distance and scaled by alpha.
    fn apply_repulsion(&mut self) {
        let strength = self.options.repulsion_strength;
        let n = self.graph.node_count();
        for i in 0..n {
            let pi = self.position(i);
            for j in (i + 1)..n {
                let pj = self.position(j);
                let delta = pj - pi;
                let d2 = (delta.x * delta.x + delta.y * delta.y).max(1.0);
                let d = d2.sqrt();
                // strength is negative, so the step pushes the pair apart
                let f = strength * self.alpha / d2;
                let step = Position::new(delta.x / d * f, delta.y / d * f);

                if self.states[i].fixed.is_none() {
                    self.states[i].velocity = self.states[i].velocity + step;
                }
                if self.states[j].fixed.is_none() {
                    self.states[j].velocity = self.states[j].velocity - step;
                }
            }
        }
    }

    /// Shift free nodes so the barycenter of the whole graph moves onto
    /// the viewport center. Direct positional translation, not a spring.
    fn apply_centering(&mut self) {
        let n = self.graph.node_count();
        if n == 0 {
            return;
        }
        let mut sum = Position::default();
        for idx in 0..n {
            sum = sum + self.position(idx);
        }
        let (cx, cy) = self.options.center();
        let shift = Position::new(cx - sum.x / n as f64, cy - sum.y / n as f64);
        for idx in 0..n {
            if self.states[idx].fixed.is_none() {
                let pos = self.position(idx) + shift;
                self.graph.node_at_mut(idx).position = Some(pos);
            }
        }
    }

    /// Damped velocity integration. Fixed nodes snap to their override
    /// with zero velocity.
    fn integrate(&mut self) {
        let damping = self.options.damping_factor;
        for idx in 0..self.graph.node_count() {
            match self.states[idx].fixed {
                Some(fixed) => {
                    self.states[idx].velocity = Position::default();
                    self.graph.node_at_mut(idx).position = Some(fixed);
                }
                None => {
                    let v = Position::new(
                        self.states[idx].velocity.x * damping,
                        self.states[idx].velocity.y * damping,
                    );
                    self.states[idx].velocity = v;
                    let pos = self.position(idx) + v;
                    self.graph.node_at_mut(idx).position = Some(pos);
                }
            }
        }
    }

    /// Iterative positional correction keeping node circles from
    /// overlapping. A fixed node absorbs no correction; its partner
    /// takes the full push.
    fn resolve_collisions(&mut self) {
        let n = self.graph.node_count();
        for _ in 0..self.options.collision_iterations {
            for i in 0..n {
                for j in (i + 1)..n {
                    let (pi, pj) = (self.position(i), self.position(j));
                    let min_dist = self.graph.node_at(i).radius + self.graph.node_at(j).radius;
                    let mut delta = pj - pi;
                    let mut dist = delta.length();
                    if dist >= min_dist {
                        continue;
                    }
                    if dist < MIN_DISTANCE {
                        // coincident centers: separate along a
                        // deterministic axis
                        delta = Position::new(min_dist, 0.0);
                        dist = min_dist;
                    }
                    let overlap = min_dist - dist;
                    let push = Position::new(
                        delta.x / dist * overlap,
                        delta.y / dist * overlap,
                    );

                    let i_free = self.states[i].fixed.is_none();
                    let j_free = self.states[j].fixed.is_none();
                    match (i_free, j_free) {
                        (true, true) => {
                            let half = Position::new(push.x / 2.0, push.y / 2.0);
                            self.graph.node_at_mut(i).position = Some(pi - half);
                            self.graph.node_at_mut(j).position = Some(pj + half);
                        }
                        (true, false) => {
                            self.graph.node_at_mut(i).position = Some(pi - push);
                        }
                        (false, true) => {
                            self.graph.node_at_mut(j).position = Some(pj + push);
                        }
                        (false, false) => {}
                    }
                }
            }
        }
    }

    // Mid-simulation graph mutation. Each call validates, repairs, and
    // restarts rather than resetting positions, so the layout keeps its
    // continuity for unaffected nodes.

    pub fn add_node(&mut self, node: Node) -> Result<()> {
        self.graph.add_node(node)?;
        self.states.push(NodeState::default());
        self.seed_missing_positions();
        self.restart();
        Ok(())
    }

    pub fn remove_node(&mut self, id: &str) -> Result<Node> {
        let Some(idx) = self.graph.node_index(id) else {
            return Err(Error::new(
                ErrorKind::Simulation,
                ErrorCode::DoesNotExist,
                Some(id.to_string()),
            ));
        };
        let node = self.graph.remove_node(id)?;
        self.states.remove(idx);
        self.restart();
        Ok(node)
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        self.graph.add_edge(edge)?;
        self.restart();
        Ok(())
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Result<Edge> {
        let edge = self.graph.remove_edge(edge_id)?;
        self.restart();
        Ok(edge)
    }

    /// New viewport bounds: the centering attractor moves and the layout
    /// re-heats toward it.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.options.width = width;
        self.options.height = height;
        self.restart();
    }
}
