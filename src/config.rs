// Copyright 2026 The Noesis Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

/// Margins around the drawable area, in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Per-node cell consumed by the layered layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
}

/// Layout configuration shared by the hierarchical layout and the force
/// simulation. All spacing and dimension values are in logical layout
/// units (not pixels). Callers override any subset via struct update
/// syntax on `LayoutOptions::default()`.
#[derive(Clone, Debug)]
pub struct LayoutOptions {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Margins kept free of nodes by the hierarchical layout.
    pub margin: Margin,
    /// Cell consumed per node in the layered layout.
    pub node_size: NodeSize,

    /// Circle radius assigned to concept nodes.
    pub concept_radius: f64,
    /// Circle radius assigned to proposition-part nodes.
    pub part_radius: f64,

    // Force simulation parameters
    /// Many-body charge; negative repels. Scaled by alpha each tick.
    pub repulsion_strength: f64,
    /// Spring rest length for linked nodes.
    pub link_distance: f64,
    /// Spring constant for link forces.
    pub spring_strength: f64,
    /// Per-tick velocity multiplier, in (0, 1).
    pub damping_factor: f64,
    /// Per-tick geometric decay of alpha toward its target, in (0, 1).
    /// The default reaches the 0.001 floor in roughly 300 ticks.
    pub alpha_decay: f64,
    /// Alpha below this is at rest.
    pub alpha_min: f64,
    /// Alpha restored by `restart()` after a perturbation (drag, resize,
    /// graph mutation); deliberately well below 1 so the layout shifts
    /// rather than re-forms.
    pub restart_alpha: f64,
    /// Safety bound on ticks per run before the simulation is reported
    /// divergent.
    pub max_ticks: usize,
    /// Positional correction passes per tick for circle collisions.
    pub collision_iterations: usize,
    /// Seed for the deterministic initial placement.
    pub seed: u64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: Margin {
                top: 20.0,
                right: 90.0,
                bottom: 30.0,
                left: 90.0,
            },
            node_size: NodeSize {
                width: 200.0,
                height: 100.0,
            },
            concept_radius: 30.0,
            part_radius: 10.0,
            repulsion_strength: -300.0,
            link_distance: 100.0,
            spring_strength: 0.1,
            damping_factor: 0.6,
            alpha_decay: 0.0228,
            alpha_min: 0.001,
            restart_alpha: 0.3,
            max_ticks: 300,
            collision_iterations: 2,
            seed: 42,
        }
    }
}

impl LayoutOptions {
    /// Viewport center, the attractor for the centering force.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}
