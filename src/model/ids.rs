// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

use super::sibling_order::ROOTS_KEY;

/// The identity of a branch (or of a tentative planning task) on the canvas.
///
/// Branch names are short and cloned on every layout pass and gesture sample, so the value is
/// kept in a `SmolStr`. Only names that git itself could never produce are rejected: empty
/// names and names containing whitespace or control characters. `/` is allowed
/// (`feature/login` is an ordinary branch name). [`ROOTS_KEY`] is reserved for the root
/// sibling order and is rejected too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchId(SmolStr);

impl BranchId {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        validate_branch_name(value)?;
        Ok(Self(SmolStr::new(value)))
    }

    /// For names known valid at compile time, such as the built-in demo forest.
    pub(crate) const fn from_static(value: &'static str) -> Self {
        Self(SmolStr::new_static(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for BranchId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for BranchId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for BranchId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for BranchId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for BranchId {
    type Error = IdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BranchId> for String {
    fn from(value: BranchId) -> Self {
        value.0.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("branch name must not be empty")]
    Empty,
    #[error("branch name must not contain {0:?}")]
    InvalidChar(char),
    #[error("branch name {0:?} is reserved")]
    Reserved(&'static str),
}

fn validate_branch_name(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if let Some(ch) = value.chars().find(|ch| ch.is_whitespace() || ch.is_control()) {
        return Err(IdError::InvalidChar(ch));
    }
    if value == ROOTS_KEY {
        return Err(IdError::Reserved(ROOTS_KEY));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{BranchId, IdError};

    #[test]
    fn branch_id_rejects_empty() {
        assert_eq!(BranchId::new(""), Err(IdError::Empty));
    }

    #[test]
    fn branch_id_rejects_whitespace() {
        assert_eq!(BranchId::new("feature x"), Err(IdError::InvalidChar(' ')));
        assert_eq!(BranchId::new("a\tb"), Err(IdError::InvalidChar('\t')));
    }

    #[test]
    fn branch_id_rejects_the_root_order_key() {
        assert_eq!(BranchId::new("__roots__"), Err(IdError::Reserved("__roots__")));
        assert!(serde_json::from_str::<BranchId>(r#""__roots__""#).is_err());
    }

    #[test]
    fn branch_id_accepts_slashes() {
        let id = BranchId::new("feature/login").expect("branch id");
        assert_eq!(id.as_str(), "feature/login");
    }

    #[test]
    fn branch_id_borrows_as_str_for_map_lookups() {
        let mut map = BTreeMap::new();
        map.insert(BranchId::new("main").expect("branch id"), 1);
        assert_eq!(map.get("main"), Some(&1));
    }

    #[test]
    fn branch_id_serde_validates() {
        let id: BranchId = serde_json::from_str("\"main\"").expect("deserialize");
        assert_eq!(id.as_str(), "main");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"main\"");

        serde_json::from_str::<BranchId>("\"\"").unwrap_err();
    }
}
