//! Aggregate roots - consistency boundaries persisted as single units.
//!
//! Aggregates hold identifier references to each other (System -> Node,
//! Contract -> System) rather than embedded objects, so each aggregate
//! persists on its own and cross-aggregate mutation is impossible.

pub mod character;
pub mod contract;
pub mod node;
pub mod player;
pub mod system;

pub use character::{Character, ProgramPurchase, SkillChange};
pub use contract::{Contract, ContractStatus};
pub use node::{BreachOutcome, IceDefeatOutcome, LootedSource, Node};
pub use player::{DamageOutcome, HealOutcome, Player, MAX_HEALTH};
pub use system::{AlertRaised, System};
