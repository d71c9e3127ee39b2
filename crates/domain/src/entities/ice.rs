//! ICE entity - Intrusion Countermeasures Electronics.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::IceId;

/// ICE classification. Closed set so the engine can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IceType {
    /// Lethal countermeasures
    Black,
    /// Passive barriers and trace programs
    White,
    /// Everything in between
    Gray,
}

/// A defensive program guarding a node.
///
/// # Invariants
///
/// - `strength` is never negative (validated at construction)
/// - Deactivation is permanent: once defeated, ICE never reactivates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ice {
    id: IceId,
    name: String,
    kind: IceType,
    strength: i32,
    active: bool,
}

impl Ice {
    /// Create active ICE attached to a node at system-build time.
    pub fn new(name: impl Into<String>, kind: IceType, strength: i32) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invariant("ICE name cannot be empty"));
        }
        if strength < 0 {
            return Err(DomainError::invariant(format!(
                "ICE strength cannot be negative (got {strength})"
            )));
        }
        Ok(Self {
            id: IceId::new(),
            name,
            kind,
            strength,
            active: true,
        })
    }

    /// Set the ID (used when loading from storage).
    pub fn with_id(mut self, id: IceId) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn id(&self) -> IceId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> IceType {
        self.kind
    }

    #[inline]
    pub fn strength(&self) -> i32 {
        self.strength
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Permanently deactivate this ICE. Idempotent.
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }
}
