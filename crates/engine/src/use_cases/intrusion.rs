//! Intrusion use cases: starting, advancing, and ending matrix runs.
//!
//! All game rules live in the domain engine; this module only loads
//! aggregates, invokes one domain operation, persists on success, and
//! dispatches the raised events.

use std::sync::Arc;

use crate::infrastructure::ports::{
    CharacterRepo, NodeRepo, RepoError, RunRepo, SystemRepo,
};
use crate::use_cases::dispatch::EventDispatcher;
use crate::use_cases::views::{NodeView, RunView, SystemView};
use decker_domain::{
    Character, CharacterId, DomainError, DomainEvent, EngageOutcome, IntrusionRun,
    IntrusionTuning, LootedSource, Node, NodeId, RandomSource, RunId, RunState, StepOutcome,
    System, SystemId,
};

#[derive(Debug, thiserror::Error)]
pub enum IntrusionError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// What one `advance_run` call accomplished.
#[derive(Debug, Clone, PartialEq)]
pub enum RunProgress {
    /// Moved into the node and locked onto ICE.
    Engaged { ice_name: String, strength: i32 },
    /// The node's defenses are down; it can be looted now.
    NodeBreached,
    /// Downed one ICE; another took its place.
    IceDefeated { next_target: String },
    /// Attack failed but went unnoticed; still engaged.
    Repelled,
    /// Security spotted the intruder. Run over.
    Detected { alert_level: f32 },
}

/// Payout from looting a breached node.
#[derive(Debug, Clone, PartialEq)]
pub struct LootReport {
    pub sources: Vec<LootedSource>,
    pub total: u32,
}

pub struct IntrusionOps {
    runs: Arc<dyn RunRepo>,
    systems: Arc<dyn SystemRepo>,
    nodes: Arc<dyn NodeRepo>,
    characters: Arc<dyn CharacterRepo>,
    dispatcher: Arc<EventDispatcher>,
    rng: Arc<dyn RandomSource>,
    tuning: IntrusionTuning,
}

impl IntrusionOps {
    pub fn new(
        runs: Arc<dyn RunRepo>,
        systems: Arc<dyn SystemRepo>,
        nodes: Arc<dyn NodeRepo>,
        characters: Arc<dyn CharacterRepo>,
        dispatcher: Arc<EventDispatcher>,
        rng: Arc<dyn RandomSource>,
        tuning: IntrusionTuning,
    ) -> Self {
        Self {
            runs,
            systems,
            nodes,
            characters,
            dispatcher,
            rng,
            tuning,
        }
    }

    /// Start a run against the system's entry node.
    pub async fn start_run(
        &self,
        character_id: CharacterId,
        system_id: SystemId,
        skill: &str,
    ) -> Result<RunId, IntrusionError> {
        // The character must exist before a run binds to it
        self.load_character(character_id).await?;
        let system = self.load_system(system_id).await?;

        let run = IntrusionRun::begin(character_id, &system, skill)?;
        self.runs.save(&run).await?;

        tracing::info!(
            run_id = %run.id(),
            character_id = %character_id,
            system = system.name(),
            "intrusion run started"
        );
        Ok(run.id())
    }

    /// Advance the run one transition: engage from approach, or resolve one
    /// attack while engaged. Nothing persists if the domain call fails.
    pub async fn advance_run(&self, run_id: RunId) -> Result<RunProgress, IntrusionError> {
        let mut run = self.load_run(run_id).await?;

        match run.state() {
            RunState::Approaching { node_id } => {
                let mut node = self.load_node(node_id).await?;
                let outcome = run.engage(&mut node)?;

                self.nodes.save(&node).await?;
                self.runs.save(&run).await?;
                self.dispatcher.dispatch(run.take_events());

                Ok(match outcome {
                    EngageOutcome::Engaged {
                        ice_name, strength, ..
                    } => RunProgress::Engaged { ice_name, strength },
                    EngageOutcome::Breached => RunProgress::NodeBreached,
                })
            }
            RunState::Engaging { node_id, .. } => {
                let character = self.load_character(run.character_id()).await?;
                let mut node = self.load_node(node_id).await?;
                let mut system = self.load_system(run.system_id()).await?;

                let outcome = run.resolve_attack(
                    &character,
                    &mut node,
                    &mut system,
                    &self.tuning,
                    self.rng.as_ref(),
                )?;

                self.nodes.save(&node).await?;
                self.systems.save(&system).await?;
                self.runs.save(&run).await?;
                self.dispatcher.dispatch(run.take_events());

                Ok(match outcome {
                    StepOutcome::NodeBreached { .. } => RunProgress::NodeBreached,
                    StepOutcome::IceDefeated { next_ice_id, .. } => {
                        let next_target = node
                            .ice()
                            .iter()
                            .find(|ice| ice.id() == next_ice_id)
                            .map(|ice| ice.name().to_string())
                            .unwrap_or_default();
                        RunProgress::IceDefeated { next_target }
                    }
                    StepOutcome::Repelled { .. } => RunProgress::Repelled,
                    StepOutcome::Detected { alert_level } => {
                        tracing::warn!(run_id = %run_id, alert_level, "intrusion detected");
                        RunProgress::Detected { alert_level }
                    }
                })
            }
            _ => Err(DomainError::invalid_transition("run has already ended").into()),
        }
    }

    /// Back out of an unresolved run. The system alert stays untouched.
    pub async fn retreat_run(&self, run_id: RunId) -> Result<(), IntrusionError> {
        let mut run = self.load_run(run_id).await?;
        run.retreat()?;
        self.runs.save(&run).await?;
        self.dispatcher.dispatch(run.take_events());
        Ok(())
    }

    /// Loot every source in the breached node and pay the character.
    pub async fn loot_node(&self, run_id: RunId) -> Result<LootReport, IntrusionError> {
        let mut run = self.load_run(run_id).await?;
        let node_id = match run.state() {
            RunState::Breached { node_id } => node_id,
            _ => {
                return Err(
                    DomainError::invalid_transition("only a breached node can be looted").into(),
                )
            }
        };

        let mut node = self.load_node(node_id).await?;
        let mut character = self.load_character(run.character_id()).await?;

        let sources = node.loot_sources()?;
        let total: u32 = sources.iter().map(|loot| loot.value).sum();
        character.award_credits(total);

        self.nodes.save(&node).await?;
        self.characters.save(&character).await?;

        let events: Vec<DomainEvent> = sources
            .iter()
            .map(|loot| DomainEvent::SourceLooted {
                system_id: run.system_id(),
                node_id,
                source_id: loot.source_id,
                character_id: character.id(),
                value: loot.value,
            })
            .collect();
        self.dispatcher.dispatch(events);

        tracing::info!(run_id = %run_id, total, "node looted");
        Ok(LootReport { sources, total })
    }

    /// Snapshot of the run for the matrix screen.
    pub async fn run_view(&self, run_id: RunId) -> Result<RunView, IntrusionError> {
        let run = self.load_run(run_id).await?;
        let system = self.load_system(run.system_id()).await?;
        let node = self.load_node(run.node_id()).await?;

        Ok(RunView {
            state: run.state(),
            system: SystemView::from(&system),
            node: NodeView::from(&node),
        })
    }

    async fn load_run(&self, run_id: RunId) -> Result<IntrusionRun, IntrusionError> {
        Ok(self
            .runs
            .get(run_id)
            .await?
            .ok_or_else(|| DomainError::not_found("IntrusionRun", run_id))?)
    }

    async fn load_system(&self, system_id: SystemId) -> Result<System, IntrusionError> {
        Ok(self
            .systems
            .get(system_id)
            .await?
            .ok_or_else(|| DomainError::not_found("System", system_id))?)
    }

    async fn load_node(&self, node_id: NodeId) -> Result<Node, IntrusionError> {
        Ok(self
            .nodes
            .get(node_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Node", node_id))?)
    }

    async fn load_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Character, IntrusionError> {
        Ok(self
            .characters
            .get(character_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Character", character_id))?)
    }
}
