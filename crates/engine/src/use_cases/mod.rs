//! Use cases - user story orchestration.
//!
//! Each module orchestrates one domain area: load aggregates by id, invoke
//! one domain operation, persist on success, dispatch the raised events.
//! Game rules never live here.

pub mod character;
pub mod contract;
pub mod dispatch;
pub mod intrusion;
pub mod player;
pub mod views;

pub use character::{CharacterError, CharacterOps, CreateCharacterInput, ProgramOrder};
pub use contract::{ContractError, ContractOps};
pub use dispatch::EventDispatcher;
pub use intrusion::{IntrusionError, IntrusionOps, LootReport, RunProgress};
pub use player::{PlayerError, PlayerOps};
pub use views::{
    CharacterSheetView, ContractSummary, IceView, NodeView, PlayerView, ProgramView, RunView,
    SkillView, SystemView,
};
