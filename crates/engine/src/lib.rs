//! Decker engine - application layer over the domain core.
//!
//! Ports and adapters live in [`infrastructure`]; orchestration lives in
//! [`use_cases`]. The engine owns no game rules - those belong to
//! `decker-domain`.

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::{App, Repositories, UseCases};

pub use infrastructure::{
    BufferingEventSink, CharacterRepo, ClockPort, ContractRepo, EventEnvelope, EventSinkPort,
    InMemoryCharacterRepo, InMemoryContractRepo, InMemoryNodeRepo, InMemoryPlayerRepo,
    InMemoryRunRepo, InMemorySystemRepo, NodeRepo, PlayerRepo, RepoError, RunRepo, SinkError,
    SystemClock, SystemRandom, SystemRepo, TracingEventSink,
};
pub use use_cases::{
    CharacterError, CharacterOps, CharacterSheetView, ContractError, ContractOps, ContractSummary,
    CreateCharacterInput, EventDispatcher, IntrusionError, IntrusionOps, LootReport, PlayerError,
    PlayerOps, ProgramOrder, RunProgress, RunView,
};
