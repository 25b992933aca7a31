// Copyright 2026 The Noesis Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::{Deserialize, Serialize};

/// A concept handed over by the upstream analysis API, already validated
/// and fetched. `related_concepts` holds ids of other concepts; references
/// to ids absent from the batch are dropped by the adapter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub related_concepts: Vec<String>,
}

/// A named relation within a proposition's logical structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(rename = "type")]
    pub relation_type: String,
}

/// The analyzed logical structure of a proposition: what it predicates of
/// what, plus any modifiers and relations the analyzer extracted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogicalStructure {
    pub subject: String,
    pub predicate: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}
