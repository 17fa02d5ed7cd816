// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence on disk.
//!
//! Forest documents describe the branches and edges; view-state files hold the preferences the
//! layout reads (sibling order, focus separator, minimize filter). Both are JSON and both are
//! written atomically.

mod atomic;
pub mod document;
pub mod view_state;
pub mod workspace;


pub use atomic::{StoreError, WriteDurability};
pub use document::{ForestDocument, ForestDocumentFile, NodeEntry};
pub use view_state::{ViewState, ViewStateFile};
pub use workspace::Workspace;
