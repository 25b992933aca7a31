// Copyright 2026 The Noesis Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Drag and pin handling over live simulation state. The controller is
//! plain method calls — whatever input layer the host uses turns its
//! pointer events into these, and the session is the only mutation path.
//!
//! Per node: `Free -> Dragging -> Free`, with `Pinned` holding until an
//! explicit release. A dragged node's position is a hard constraint that
//! tracks the pointer exactly; forces resume on release unless the node
//! is pinned.

use crate::common::Result;
use crate::force::ForceSimulation;
use crate::graph::Position;
use crate::op_err;

/// Interaction state of a single node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Free,
    Dragging,
    Pinned,
}

impl ForceSimulation {
    pub fn drag_phase(&self, id: &str) -> Option<DragPhase> {
        self.graph.node_index(id).map(|idx| self.states[idx].phase)
    }

    /// Begin dragging: fix the node at its current position, zero its
    /// velocity, and re-heat the simulation so neighbors respond.
    /// Starting a drag on an already-dragging node is a no-op reusing
    /// the existing drag session.
    pub fn drag_start(&mut self, id: &str) -> Result<()> {
        let Some(idx) = self.graph.node_index(id) else {
            return op_err!(InvalidOperation, format!("drag_start: unknown node {id}"));
        };
        if self.states[idx].phase == DragPhase::Dragging {
            return Ok(());
        }

        let position = self.graph.node_at(idx).position.unwrap_or_default();
        self.states[idx].phase = DragPhase::Dragging;
        self.states[idx].fixed = Some(position);
        self.states[idx].velocity = Position::default();

        self.set_alpha_target(self.options.restart_alpha);
        self.restart();
        Ok(())
    }

    /// Track the pointer exactly: no smoothing between events.
    pub fn drag_move(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        let Some(idx) = self.graph.node_index(id) else {
            return op_err!(InvalidOperation, format!("drag_move: unknown node {id}"));
        };
        if self.states[idx].phase != DragPhase::Dragging {
            return op_err!(InvalidOperation, format!("drag_move: {id} is not dragging"));
        }

        let position = Position::new(x, y);
        self.states[idx].fixed = Some(position);
        self.graph.node_at_mut(idx).position = Some(position);
        Ok(())
    }

    /// Release the position constraint. The node stays where the drag
    /// left it until the next tick applies forces — unless it was
    /// explicitly pinned, in which case it returns to `Pinned` and keeps
    /// its override. Ending a drag that never started is a no-op.
    pub fn drag_end(&mut self, id: &str) -> Result<()> {
        let Some(idx) = self.graph.node_index(id) else {
            return op_err!(InvalidOperation, format!("drag_end: unknown node {id}"));
        };
        if self.states[idx].phase != DragPhase::Dragging {
            return Ok(());
        }

        if self.graph.node_at(idx).pinned {
            self.states[idx].phase = DragPhase::Pinned;
        } else {
            self.states[idx].phase = DragPhase::Free;
            self.states[idx].fixed = None;
        }
        self.set_alpha_target(0.0);
        Ok(())
    }

    /// Pin a node at its current position, excluding it from forces
    /// until released.
    pub fn pin(&mut self, id: &str) -> Result<()> {
        let Some(idx) = self.graph.node_index(id) else {
            return op_err!(InvalidOperation, format!("pin: unknown node {id}"));
        };
        let position = self.graph.node_at(idx).position.unwrap_or_default();
        self.states[idx].phase = DragPhase::Pinned;
        self.states[idx].fixed = Some(position);
        self.states[idx].velocity = Position::default();
        self.graph.node_at_mut(idx).pinned = true;
        Ok(())
    }

    /// Release a pinned node back to the simulation's control.
    pub fn release(&mut self, id: &str) -> Result<()> {
        let Some(idx) = self.graph.node_index(id) else {
            return op_err!(InvalidOperation, format!("release: unknown node {id}"));
        };
        self.graph.node_at_mut(idx).pinned = false;
        if self.states[idx].phase != DragPhase::Dragging {
            self.states[idx].phase = DragPhase::Free;
            self.states[idx].fixed = None;
        }
        self.restart();
        Ok(())
    }
}
