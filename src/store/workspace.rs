// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::PathBuf;

use super::atomic::StoreError;
use super::document::{ForestDocument, ForestDocumentFile};
use super::view_state::{ViewState, ViewStateFile};
use crate::gesture::GestureEvent;
use crate::layout::LayoutMetrics;
use crate::model::Forest;

/// A forest document and its view state, kept in sync with their files.
///
/// Either file may be absent, in which case that half lives in memory only (the built-in demo
/// forest has no document file).
#[derive(Debug, Clone)]
pub struct Workspace {
    document: ForestDocument,
    document_file: Option<ForestDocumentFile>,
    view: ViewState,
    view_file: Option<ViewStateFile>,
}

impl Workspace {
    pub fn open(
        document_file: ForestDocumentFile,
        view_file: Option<ViewStateFile>,
    ) -> Result<Self, StoreError> {
        let document = document_file.load()?;
        let mut workspace = Self::in_memory(document, None)?;
        workspace.document_file = Some(document_file);
        workspace.view_file = view_file;
        workspace.reload_view()?;
        Ok(workspace)
    }

    pub fn in_memory(
        document: ForestDocument,
        view_file: Option<ViewStateFile>,
    ) -> Result<Self, StoreError> {
        let mut workspace =
            Self { document, document_file: None, view: ViewState::default(), view_file };
        workspace.reload_view()?;
        Ok(workspace)
    }

    fn reload_view(&mut self) -> Result<(), StoreError> {
        if let Some(file) = &self.view_file {
            self.view = file.load()?;
        }
        Ok(())
    }

    pub fn document(&self) -> &ForestDocument {
        &self.document
    }

    pub fn document_file(&self) -> Option<&ForestDocumentFile> {
        self.document_file.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_file(&self) -> Option<&ViewStateFile> {
        self.view_file.as_ref()
    }

    /// The layout input: the document's forest with the view state applied.
    pub fn forest(&self) -> Forest {
        let mut forest = self.document.forest();
        self.view.apply_to(&mut forest);
        forest
    }

    pub fn metrics(&self, base: LayoutMetrics) -> Result<LayoutMetrics, StoreError> {
        match &self.document_file {
            Some(file) => file.load_metrics(&self.document, base),
            None => self.document.metrics_over(base).map_err(|source| StoreError::Metrics {
                path: PathBuf::from("<memory>"),
                source,
            }),
        }
    }

    /// Applies a committed gesture and writes whichever file it touches.
    ///
    /// Returns `true` when the document changed; the caller must lay the forest out again. On a
    /// failed write the workspace keeps its previous state.
    pub fn apply(&mut self, event: &GestureEvent) -> Result<bool, StoreError> {
        match event {
            GestureEvent::EdgeRequested { parent, child } => {
                let mut document = self.document.clone();
                if !document.reparent(parent, child) {
                    return Ok(false);
                }
                if let Some(file) = &self.document_file {
                    file.save(&document)?;
                }
                tracing::info!(%parent, %child, "reparented branch");
                self.document = document;
                Ok(true)
            }
            _ => {
                let changed = self.update_view(|view| {
                    view.apply_event(event);
                })?;
                Ok(changed && matches!(event, GestureEvent::SiblingOrderChanged(_)))
            }
        }
    }

    /// Edits a copy of the view state and keeps it once persisted.
    pub fn update_view(&mut self, edit: impl FnOnce(&mut ViewState)) -> Result<bool, StoreError> {
        let mut view = self.view.clone();
        edit(&mut view);
        if view == self.view {
            return Ok(false);
        }
        if let Some(file) = &self.view_file {
            file.save(&view)?;
        }
        self.view = view;
        Ok(true)
    }
}
