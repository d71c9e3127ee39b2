//! Program entity - hacking software carried in a character's inventory.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ProgramId;

/// Program classification. Closed set so the engine can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramType {
    /// Icebreakers - contribute their rating to attack resolution
    Attack,
    /// Masking and evasion software
    Stealth,
    /// Search, analysis, loaders
    Utility,
    /// Shields and medics
    Defense,
}

/// A hacking program a character can own or buy.
///
/// # Invariants
///
/// - `size` is always positive (it consumes memory capacity)
/// - `cost` and `rating` are never negative (u32 by construction)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    id: ProgramId,
    name: String,
    kind: ProgramType,
    size: u32,
    cost: u32,
    rating: u32,
    description: String,
}

impl Program {
    pub fn new(
        name: impl Into<String>,
        kind: ProgramType,
        size: u32,
        cost: u32,
        rating: u32,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invariant("program name cannot be empty"));
        }
        if size == 0 {
            return Err(DomainError::invariant("program size must be positive"));
        }
        Ok(Self {
            id: ProgramId::new(),
            name,
            kind,
            size,
            cost,
            rating,
            description: String::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the ID (used when loading from storage).
    pub fn with_id(mut self, id: ProgramId) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn id(&self) -> ProgramId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> ProgramType {
        self.kind
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    #[inline]
    pub fn rating(&self) -> u32 {
        self.rating
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_program_validates() {
        let program = Program::new("IcePick v1", ProgramType::Attack, 10, 500, 2).unwrap();
        assert_eq!(program.name(), "IcePick v1");
        assert_eq!(program.kind(), ProgramType::Attack);
        assert_eq!(program.size(), 10);
    }

    #[test]
    fn zero_size_rejected() {
        assert!(matches!(
            Program::new("Ghost", ProgramType::Stealth, 0, 100, 1),
            Err(DomainError::Invariant(_))
        ));
    }

    #[test]
    fn empty_name_rejected() {
        assert!(matches!(
            Program::new("", ProgramType::Utility, 5, 100, 0),
            Err(DomainError::Invariant(_))
        ));
    }

    #[test]
    fn serde_roundtrip() {
        let program = Program::new("Hammer v1", ProgramType::Attack, 20, 1200, 4)
            .unwrap()
            .with_description("A heavy-duty breaker program.");
        let json = serde_json::to_string(&program).unwrap();
        let back: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(back, program);
    }
}
