// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::atomic::{write_atomic, StoreError, WriteDurability};
use crate::layout::LayoutMetrics;
use crate::model::{BranchId, BranchNode, Edge, Forest, TentativePlan};

/// A node entry: either a bare branch name or a full [`BranchNode`] object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeEntry {
    Name(BranchId),
    Node(BranchNode),
}

impl NodeEntry {
    fn into_node(self) -> BranchNode {
        match self {
            Self::Name(id) => BranchNode::new(id),
            Self::Node(node) => node,
        }
    }
}

/// The on-disk description of a forest.
///
/// ```json
/// {
///   "default_branch": "main",
///   "nodes": ["main", "feature/auth"],
///   "edges": [{ "parent": "main", "child": "feature/auth" }],
///   "tentative": { "base_branch": "feature/auth", "tasks": [{ "id": "t1", "title": "Docs" }] },
///   "metrics": { "node_width": 20 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestDocument {
    pub default_branch: BranchId,
    #[serde(default)]
    pub nodes: Vec<NodeEntry>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tentative: Option<TentativePlan>,
    /// Partial [`LayoutMetrics`] applied over whichever preset the host starts from.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metrics: Map<String, Value>,
}

impl ForestDocument {
    pub fn from_forest(forest: &Forest) -> Self {
        Self {
            default_branch: forest.default_branch().clone(),
            nodes: forest.nodes().iter().cloned().map(NodeEntry::Node).collect(),
            edges: forest.edges().to_vec(),
            tentative: forest.tentative().cloned(),
            metrics: Map::new(),
        }
    }

    pub fn forest(&self) -> Forest {
        Forest::from_parts(
            self.nodes.iter().cloned().map(NodeEntry::into_node).collect(),
            self.edges.clone(),
            self.default_branch.clone(),
            self.tentative.clone(),
        )
    }

    /// `base` with the document's overrides applied field by field.
    pub fn metrics_over(&self, base: LayoutMetrics) -> Result<LayoutMetrics, serde_json::Error> {
        if self.metrics.is_empty() {
            return Ok(base);
        }
        let mut merged = match serde_json::to_value(base)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.extend(self.metrics.iter().map(|(key, value)| (key.clone(), value.clone())));
        serde_json::from_value(Value::Object(merged))
    }

    /// Makes `parent` the only parent of `child`. Returns `false` when nothing changed.
    pub fn reparent(&mut self, parent: &BranchId, child: &BranchId) -> bool {
        let mut forest = self.forest();
        if !forest.reparent(parent, child) {
            return false;
        }
        self.edges = forest.edges().to_vec();
        true
    }
}

/// A JSON file holding one [`ForestDocument`].
#[derive(Debug, Clone)]
pub struct ForestDocumentFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl ForestDocumentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ForestDocument, StoreError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })?;
        let document: ForestDocument = serde_json::from_str(&text)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;
        tracing::debug!(
            path = %self.path.display(),
            nodes = document.nodes.len(),
            edges = document.edges.len(),
            "loaded forest document"
        );
        Ok(document)
    }

    pub fn load_metrics(
        &self,
        document: &ForestDocument,
        base: LayoutMetrics,
    ) -> Result<LayoutMetrics, StoreError> {
        document
            .metrics_over(base)
            .map_err(|source| StoreError::Metrics { path: self.path.clone(), source })
    }

    pub fn save(&self, document: &ForestDocument) -> Result<(), StoreError> {
        let mut json = serde_json::to_string_pretty(document)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;
        json.push('\n');
        write_atomic(&self.path, json.as_bytes(), self.durability)
    }
}
