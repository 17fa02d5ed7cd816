// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::atomic::{read_optional, write_atomic, StoreError, WriteDurability};
use crate::gesture::GestureEvent;
use crate::model::{Forest, MinimizeState, SiblingOrder};

/// View preferences the layout reads but never owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub sibling_order: SiblingOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_separator_index: Option<usize>,
    #[serde(flatten)]
    pub minimize: MinimizeState,
}

impl ViewState {
    pub fn apply_to(&self, forest: &mut Forest) {
        forest.set_sibling_order(self.sibling_order.clone());
        forest.set_minimize(self.minimize.clone());
    }

    /// Folds a committed gesture into the state. Returns `true` when something a view-state file
    /// stores changed; edge requests belong to the forest document and are ignored here.
    pub fn apply_event(&mut self, event: &GestureEvent) -> bool {
        match event {
            GestureEvent::SiblingOrderChanged(order) if *order != self.sibling_order => {
                self.sibling_order = order.clone();
                true
            }
            GestureEvent::FocusSeparatorIndexChanged(index)
                if *index != self.focus_separator_index =>
            {
                self.focus_separator_index = *index;
                true
            }
            _ => false,
        }
    }
}

/// A JSON file holding one [`ViewState`].
#[derive(Debug, Clone)]
pub struct ViewStateFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl ViewStateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    /// `<document>.view.json` next to a forest document.
    pub fn beside(document: &Path) -> Self {
        let mut name = document.file_name().unwrap_or_default().to_os_string();
        name.push(".view.json");
        Self::new(document.with_file_name(name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    /// Loads the stored state; a missing file yields the default state.
    pub fn load(&self) -> Result<ViewState, StoreError> {
        let Some(text) = read_optional(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "no view state yet; using defaults");
            return Ok(ViewState::default());
        };
        serde_json::from_str(&text)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })
    }

    pub fn save(&self, state: &ViewState) -> Result<(), StoreError> {
        let mut json = serde_json::to_string_pretty(state)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;
        json.push('\n');
        write_atomic(&self.path, json.as_bytes(), self.durability)
    }
}
