//! Source entity - lootable data objects inside nodes.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::SourceId;

/// A data source or other lootable object within a node.
///
/// # Invariants
///
/// - `data_value` is never negative (u32 by construction)
/// - Looting is monotonic: a source pays out at most once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    id: SourceId,
    name: String,
    data_value: u32,
    looted: bool,
}

impl Source {
    pub fn new(name: impl Into<String>, data_value: u32) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invariant("source name cannot be empty"));
        }
        Ok(Self {
            id: SourceId::new(),
            name,
            data_value,
            looted: false,
        })
    }

    /// Set the ID (used when loading from storage).
    pub fn with_id(mut self, id: SourceId) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn id(&self) -> SourceId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn data_value(&self) -> u32 {
        self.data_value
    }

    #[inline]
    pub fn is_looted(&self) -> bool {
        self.looted
    }

    /// Take the payout. Returns the data value the first time, `None` after.
    pub(crate) fn loot(&mut self) -> Option<u32> {
        if self.looted {
            return None;
        }
        self.looted = true;
        Some(self.data_value)
    }
}
