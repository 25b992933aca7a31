// Copyright 2026 The Noesis Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub mod adapter;
pub mod common;
pub mod config;
pub mod domain;
pub mod force;
pub mod graph;
pub mod hierarchy;
pub mod interaction;
pub mod session;

pub use self::common::{Error, ErrorCode, ErrorKind, Result};
pub use self::config::{LayoutOptions, Margin, NodeSize};
pub use self::domain::{Concept, LogicalStructure, Relation};
pub use self::force::{ForceSimulation, SimulationStatus};
pub use self::graph::{Edge, EdgeKind, Graph, Node, NodeKind, Position};
pub use self::interaction::DragPhase;
pub use self::session::{DomainInput, LayoutMode, LayoutSession, Statistics};
