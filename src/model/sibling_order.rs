// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ids::BranchId;

/// Wire/storage key used for the ordering of parentless branches.
pub const ROOTS_KEY: &str = "__roots__";

/// Which sibling group an ordering applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SiblingKey {
    /// Branches without a parent edge.
    Roots,
    /// Children of the given branch.
    Parent(BranchId),
}

impl SiblingKey {
    pub fn for_parent(parent: Option<&BranchId>) -> Self {
        match parent {
            Some(parent) => Self::Parent(parent.clone()),
            None => Self::Roots,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Roots => ROOTS_KEY,
            Self::Parent(parent) => parent.as_str(),
        }
    }
}

impl fmt::Display for SiblingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SiblingKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SiblingKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == ROOTS_KEY {
            return Ok(Self::Roots);
        }
        BranchId::new(&raw).map(Self::Parent).map_err(D::Error::custom)
    }
}

/// Persisted per-parent ordering overrides.
///
/// Owned by the caller (typically persisted next to the forest document) and consumed read-only
/// by every layout pass. A drag commit produces a *new* map instead of editing this one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiblingOrder {
    orders: BTreeMap<SiblingKey, Vec<BranchId>>,
}

impl SiblingOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SiblingKey) -> Option<&[BranchId]> {
        self.orders.get(key).map(Vec::as_slice)
    }

    pub fn set(&mut self, key: SiblingKey, order: Vec<BranchId>) {
        self.orders.insert(key, order);
    }

    /// Returns a copy with `key` replaced by `order`.
    pub fn with(&self, key: SiblingKey, order: Vec<BranchId>) -> Self {
        let mut next = self.clone();
        next.set(key, order);
        next
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SiblingKey, &[BranchId])> {
        self.orders.iter().map(|(key, order)| (key, order.as_slice()))
    }

    /// Sorts `siblings` in place using the custom order for `key`.
    ///
    /// Entries listed in the custom order come first, by their index in it. Everything else
    /// follows alphabetically. Without a custom order the whole group is alphabetical.
    pub fn sort_siblings(&self, key: &SiblingKey, siblings: &mut [BranchId]) {
        sort_by_custom_order(self.get(key), siblings);
    }
}

pub(crate) fn sort_by_custom_order(custom: Option<&[BranchId]>, siblings: &mut [BranchId]) {
    let Some(custom) = custom.filter(|custom| !custom.is_empty()) else {
        siblings.sort();
        return;
    };

    let mut rank = BTreeMap::<&str, usize>::new();
    for (idx, id) in custom.iter().enumerate() {
        rank.entry(id.as_str()).or_insert(idx);
    }

    siblings.sort_by(|a, b| {
        let rank_a = rank.get(a.as_str()).copied().unwrap_or(usize::MAX);
        let rank_b = rank.get(b.as_str()).copied().unwrap_or(usize::MAX);
        rank_a.cmp(&rank_b).then_with(|| a.cmp(b))
    });
}
