//! Decker domain layer.
//!
//! Aggregates, value objects, domain events and the intrusion engine. This
//! crate is pure: no I/O, no async, no hidden randomness - callers inject a
//! [`RandomSource`] wherever dice get rolled.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod intrusion;
pub mod rng;
pub mod value_objects;

pub use error::DomainError;
pub use events::DomainEvent;
pub use rng::RandomSource;

// Re-export aggregates and their outcome types
pub use aggregates::{
    AlertRaised, BreachOutcome, Character, Contract, ContractStatus, DamageOutcome, HealOutcome,
    IceDefeatOutcome, LootedSource, Node, Player, ProgramPurchase, SkillChange, System, MAX_HEALTH,
};

// Re-export entities
pub use entities::{Ice, IceType, Program, ProgramType, Source};

// Re-export the intrusion engine
pub use intrusion::{EngageOutcome, IntrusionRun, IntrusionTuning, RunState, StepOutcome};

// Re-export ID types
pub use ids::{
    CharacterId, ContractId, IceId, NodeId, PlayerId, ProgramId, RunId, SourceId, SystemId,
};

// Re-export value objects
pub use value_objects::{AlertLevel, Credits, DicePool, SkillSet};
