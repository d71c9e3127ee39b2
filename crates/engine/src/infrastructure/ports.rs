//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - Aggregate storage (in-memory today, could swap for a database)
//! - Event delivery (UI, logging)
//! - Clock/Random (for testing)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use decker_domain::{
    Character, CharacterId, Contract, ContractId, DomainEvent, IntrusionRun, Node, NodeId, Player,
    PlayerId, RunId, System, SystemId,
};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Event sink rejected envelope: {0}")]
    Rejected(String),
}

// =============================================================================
// Storage Ports (one per aggregate type)
// =============================================================================

#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError>;
    async fn save(&self, player: &Player) -> Result<(), RepoError>;
    async fn delete(&self, id: PlayerId) -> Result<(), RepoError>;
}

#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn save(&self, character: &Character) -> Result<(), RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<Character>, RepoError>;
}

#[async_trait]
pub trait ContractRepo: Send + Sync {
    async fn get(&self, id: ContractId) -> Result<Option<Contract>, RepoError>;
    async fn save(&self, contract: &Contract) -> Result<(), RepoError>;
    async fn delete(&self, id: ContractId) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<Contract>, RepoError>;
}

#[async_trait]
pub trait SystemRepo: Send + Sync {
    async fn get(&self, id: SystemId) -> Result<Option<System>, RepoError>;
    async fn save(&self, system: &System) -> Result<(), RepoError>;
    async fn delete(&self, id: SystemId) -> Result<(), RepoError>;
}

#[async_trait]
pub trait NodeRepo: Send + Sync {
    async fn get(&self, id: NodeId) -> Result<Option<Node>, RepoError>;
    async fn save(&self, node: &Node) -> Result<(), RepoError>;
    async fn delete(&self, id: NodeId) -> Result<(), RepoError>;
}

#[async_trait]
pub trait RunRepo: Send + Sync {
    async fn get(&self, id: RunId) -> Result<Option<IntrusionRun>, RepoError>;
    async fn save(&self, run: &IntrusionRun) -> Result<(), RepoError>;
    async fn delete(&self, id: RunId) -> Result<(), RepoError>;
}

// =============================================================================
// Event Port
// =============================================================================

/// A domain event stamped with identity and wall-clock time at dispatch.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    pub event_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub event: DomainEvent,
}

/// Append-only destination for domain events.
///
/// Implementations must not block the caller; delivery to slow consumers is
/// the sink's problem, not the core's.
#[cfg_attr(test, mockall::automock)]
pub trait EventSinkPort: Send + Sync {
    fn publish(&self, envelope: EventEnvelope) -> Result<(), SinkError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
