//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    event_sink::TracingEventSink,
    persistence::{
        InMemoryCharacterRepo, InMemoryContractRepo, InMemoryNodeRepo, InMemoryPlayerRepo,
        InMemoryRunRepo, InMemorySystemRepo,
    },
    ports::{
        CharacterRepo, ClockPort, ContractRepo, EventSinkPort, NodeRepo, PlayerRepo, RunRepo,
        SystemRepo,
    },
};
use crate::use_cases::{
    CharacterOps, ContractOps, EventDispatcher, IntrusionOps, PlayerOps,
};
use decker_domain::{IntrusionTuning, RandomSource};

/// Main application state.
///
/// Holds the repository ports and the use-case services wired against them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for the repository ports.
pub struct Repositories {
    pub players: Arc<dyn PlayerRepo>,
    pub characters: Arc<dyn CharacterRepo>,
    pub contracts: Arc<dyn ContractRepo>,
    pub systems: Arc<dyn SystemRepo>,
    pub nodes: Arc<dyn NodeRepo>,
    pub runs: Arc<dyn RunRepo>,
}

/// Container for the use-case services.
pub struct UseCases {
    pub player: PlayerOps,
    pub character: CharacterOps,
    pub contract: ContractOps,
    pub intrusion: IntrusionOps,
}

impl App {
    /// Wire a full in-memory session: real adapters, system clock and RNG,
    /// events logged through `tracing`.
    pub fn in_memory(tuning: IntrusionTuning) -> Self {
        Self::wired(
            Arc::new(TracingEventSink::new()),
            Arc::new(SystemClock::new()),
            Arc::new(SystemRandom::new()),
            tuning,
        )
    }

    /// Wire in-memory storage against caller-supplied sink, clock, and
    /// random source. Tests use this to script outcomes.
    pub fn wired(
        sink: Arc<dyn EventSinkPort>,
        clock: Arc<dyn ClockPort>,
        rng: Arc<dyn RandomSource>,
        tuning: IntrusionTuning,
    ) -> Self {
        let repositories = Repositories {
            players: Arc::new(InMemoryPlayerRepo::new()),
            characters: Arc::new(InMemoryCharacterRepo::new()),
            contracts: Arc::new(InMemoryContractRepo::new()),
            systems: Arc::new(InMemorySystemRepo::new()),
            nodes: Arc::new(InMemoryNodeRepo::new()),
            runs: Arc::new(InMemoryRunRepo::new()),
        };
        let dispatcher = Arc::new(EventDispatcher::new(sink, clock));

        let use_cases = UseCases {
            player: PlayerOps::new(repositories.players.clone(), dispatcher.clone()),
            character: CharacterOps::new(repositories.characters.clone(), dispatcher.clone()),
            contract: ContractOps::new(
                repositories.contracts.clone(),
                repositories.characters.clone(),
                dispatcher.clone(),
            ),
            intrusion: IntrusionOps::new(
                repositories.runs.clone(),
                repositories.systems.clone(),
                repositories.nodes.clone(),
                repositories.characters.clone(),
                dispatcher,
                rng,
                tuning,
            ),
        };

        Self {
            repositories,
            use_cases,
        }
    }
}
