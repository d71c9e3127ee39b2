//! Infrastructure - ports and their concrete adapters.

pub mod clock;
pub mod event_sink;
pub mod persistence;
pub mod ports;

pub use clock::{SystemClock, SystemRandom};
pub use event_sink::{BufferingEventSink, TracingEventSink};
pub use persistence::{
    InMemoryCharacterRepo, InMemoryContractRepo, InMemoryNodeRepo, InMemoryPlayerRepo,
    InMemoryRunRepo, InMemorySystemRepo,
};
pub use ports::{
    CharacterRepo, ClockPort, ContractRepo, EventEnvelope, EventSinkPort, NodeRepo, PlayerRepo,
    RepoError, RunRepo, SinkError, SystemRepo,
};
