//! The intrusion run state machine.
//!
//! One run is a character's assault on a single node of a system:
//!
//! ```text
//! Approaching(node) -> Engaging(node, ice) -> Breached(node)
//!                                          -> Detected
//!                                          -> Retreated
//! ```
//!
//! `Breached`, `Detected` and `Retreated` are terminal. A failed attack that
//! goes unnoticed stays in `Engaging`, so the caller can press the attack or
//! retreat. Every transition completes within one call; nothing suspends.
//!
//! The run appends domain events as it goes. Callers drain them with
//! [`IntrusionRun::take_events`] after persisting the mutated aggregates.

use serde::{Deserialize, Serialize};

use crate::aggregates::{BreachOutcome, Character, IceDefeatOutcome, Node, System};
use crate::error::DomainError;
use crate::events::DomainEvent;
use crate::ids::{CharacterId, IceId, NodeId, RunId, SystemId};
use crate::rng::RandomSource;

use super::tuning::IntrusionTuning;

/// Where an intrusion run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "phase")]
pub enum RunState {
    /// Closing in on the node; no ICE engaged yet.
    Approaching { node_id: NodeId },
    /// Locked in combat with one specific ICE.
    Engaging { node_id: NodeId, ice_id: IceId },
    /// Terminal: the node's defenses are down.
    Breached { node_id: NodeId },
    /// Terminal: system security spotted the intruder.
    Detected { node_id: NodeId },
    /// Terminal: the intruder backed out before resolution.
    Retreated { node_id: NodeId },
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Breached { .. } | Self::Detected { .. } | Self::Retreated { .. }
        )
    }

    pub fn node_id(&self) -> NodeId {
        match self {
            Self::Approaching { node_id }
            | Self::Engaging { node_id, .. }
            | Self::Breached { node_id }
            | Self::Detected { node_id }
            | Self::Retreated { node_id } => *node_id,
        }
    }
}

/// What happened when the run moved from `Approaching` into the node.
#[derive(Debug, Clone, PartialEq)]
pub enum EngageOutcome {
    /// ICE guards the node; combat begins against this one.
    Engaged {
        ice_id: IceId,
        ice_name: String,
        strength: i32,
    },
    /// Nothing guards the node; it falls immediately.
    Breached,
}

/// What happened when an engaged attack was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The engaged ICE went down and no active ICE remains: node breached.
    NodeBreached { node_id: NodeId },
    /// The engaged ICE went down but more remains; combat re-targets.
    IceDefeated {
        ice_id: IceId,
        next_ice_id: IceId,
    },
    /// The attack failed but went unnoticed; still engaging the same ICE.
    Repelled { ice_id: IceId },
    /// The attack failed and security noticed. Run over.
    Detected { alert_level: f32 },
}

/// A single intrusion attempt by one character against one node.
///
/// # Invariants
///
/// - Terminal states accept no further operations (`InvalidTransition`)
/// - Alert changes happen only on ICE defeat and on detection; a retreat
///   leaves the system alert untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrusionRun {
    id: RunId,
    character_id: CharacterId,
    system_id: SystemId,
    /// Skill driving this run's attack value.
    skill: String,
    state: RunState,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl IntrusionRun {
    /// Start a run against the system's entry node.
    pub fn begin(
        character_id: CharacterId,
        system: &System,
        skill: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let entry = system
            .entry_node()
            .ok_or_else(|| DomainError::invariant("system has no nodes to intrude"))?;
        Self::begin_at(character_id, system, entry, skill)
    }

    /// Start a run against a specific node of the system.
    pub fn begin_at(
        character_id: CharacterId,
        system: &System,
        node_id: NodeId,
        skill: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if !system.contains_node(node_id) {
            return Err(DomainError::not_found("Node", node_id));
        }
        Ok(Self {
            id: RunId::new(),
            character_id,
            system_id: system.id(),
            skill: skill.into(),
            state: RunState::Approaching { node_id },
            events: Vec::new(),
        })
    }

    /// Set the ID (used when loading from storage).
    pub fn with_id(mut self, id: RunId) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn id(&self) -> RunId {
        self.id
    }

    #[inline]
    pub fn character_id(&self) -> CharacterId {
        self.character_id
    }

    #[inline]
    pub fn system_id(&self) -> SystemId {
        self.system_id
    }

    #[inline]
    pub fn skill(&self) -> &str {
        &self.skill
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn node_id(&self) -> NodeId {
        self.state.node_id()
    }

    /// Drain events raised since the last call, for the caller to dispatch.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move from `Approaching` into the node.
    ///
    /// Picks the engagement target (highest-strength active ICE, ties to the
    /// lowest id). An undefended node is breached on the spot.
    pub fn engage(&mut self, node: &mut Node) -> Result<EngageOutcome, DomainError> {
        let node_id = match self.state {
            RunState::Approaching { node_id } => node_id,
            _ => {
                return Err(DomainError::invalid_transition(
                    "can only engage while approaching",
                ))
            }
        };
        self.check_node(node, node_id)?;

        match node.engagement_target() {
            Some(ice) => {
                let outcome = EngageOutcome::Engaged {
                    ice_id: ice.id(),
                    ice_name: ice.name().to_string(),
                    strength: ice.strength(),
                };
                self.state = RunState::Engaging {
                    node_id,
                    ice_id: ice.id(),
                };
                Ok(outcome)
            }
            None => {
                let breach = node.mark_breached()?;
                self.state = RunState::Breached { node_id };
                if breach == BreachOutcome::NewlyBreached {
                    self.events.push(DomainEvent::NodeBreached {
                        system_id: self.system_id,
                        node_id,
                        node_name: node.name().to_string(),
                    });
                }
                Ok(EngageOutcome::Breached)
            }
        }
    }

    /// Resolve one attack against the engaged ICE.
    ///
    /// The attack lands when the character's effective attack value exceeds
    /// the ICE strength. A failed attack triggers a detection check: a roll
    /// of `1..=detection_die` at or under the ICE strength ends the run.
    pub fn resolve_attack(
        &mut self,
        character: &Character,
        node: &mut Node,
        system: &mut System,
        tuning: &IntrusionTuning,
        rng: &dyn RandomSource,
    ) -> Result<StepOutcome, DomainError> {
        let (node_id, ice_id) = match self.state {
            RunState::Engaging { node_id, ice_id } => (node_id, ice_id),
            _ => {
                return Err(DomainError::invalid_transition(
                    "no ICE is engaged",
                ))
            }
        };
        self.check_node(node, node_id)?;
        self.check_system(system)?;
        if character.id() != self.character_id {
            return Err(DomainError::invariant(
                "character does not belong to this run",
            ));
        }

        let ice = node
            .ice()
            .iter()
            .find(|ice| ice.id() == ice_id)
            .ok_or_else(|| DomainError::not_found("Ice", ice_id))?;
        let strength = ice.strength();
        let ice_name = ice.name().to_string();

        let attack = character.effective_attack(&self.skill);
        if attack > strength {
            let outcome = node.defeat_ice(ice_id)?;
            system.raise_alert(tuning.breach_alert_per_strength * strength as f32);
            self.events.push(DomainEvent::IceDefeated {
                system_id: self.system_id,
                node_id,
                ice_id,
                ice_name,
                strength,
            });

            match outcome {
                IceDefeatOutcome::NodeBreached => {
                    self.state = RunState::Breached { node_id };
                    self.events.push(DomainEvent::NodeBreached {
                        system_id: self.system_id,
                        node_id,
                        node_name: node.name().to_string(),
                    });
                    Ok(StepOutcome::NodeBreached { node_id })
                }
                IceDefeatOutcome::IceDeactivated { .. } => {
                    // Re-target: selection is deterministic, so the next
                    // strongest active ICE takes over the engagement.
                    let next = node.engagement_target().ok_or_else(|| {
                        DomainError::invariant("active ICE disappeared mid-engagement")
                    })?;
                    let next_ice_id = next.id();
                    self.state = RunState::Engaging {
                        node_id,
                        ice_id: next_ice_id,
                    };
                    Ok(StepOutcome::IceDefeated {
                        ice_id,
                        next_ice_id,
                    })
                }
            }
        } else {
            let roll = rng.gen_range(1, tuning.detection_die);
            if roll <= strength {
                let raised =
                    system.raise_alert(tuning.detection_alert_per_strength * strength as f32);
                self.state = RunState::Detected { node_id };
                self.events.push(DomainEvent::IntrusionDetected {
                    system_id: self.system_id,
                    node_id,
                    character_id: self.character_id,
                    alert_level: raised.to.value(),
                });
                Ok(StepOutcome::Detected {
                    alert_level: raised.to.value(),
                })
            } else {
                Ok(StepOutcome::Repelled { ice_id })
            }
        }
    }

    /// Back out of the run before resolution. Never raises the alert.
    pub fn retreat(&mut self) -> Result<(), DomainError> {
        match self.state {
            RunState::Approaching { node_id } | RunState::Engaging { node_id, .. } => {
                self.state = RunState::Retreated { node_id };
                self.events.push(DomainEvent::IntrusionRetreated {
                    system_id: self.system_id,
                    node_id,
                    character_id: self.character_id,
                });
                Ok(())
            }
            _ => Err(DomainError::invalid_transition(
                "run has already ended",
            )),
        }
    }

    fn check_node(&self, node: &Node, expected: NodeId) -> Result<(), DomainError> {
        if node.id() != expected {
            return Err(DomainError::invariant(
                "node does not match the run's current node",
            ));
        }
        Ok(())
    }

    fn check_system(&self, system: &System) -> Result<(), DomainError> {
        if system.id() != self.system_id {
            return Err(DomainError::invariant(
                "system does not match the run's target",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Ice, IceType};
    use crate::rng::FixedRandom;
    use crate::value_objects::{Credits, SkillSet};

    struct Scenario {
        character: Character,
        system: System,
        node: Node,
        run: IntrusionRun,
    }

    /// Node with one ICE of the given strength, character with hacking 6.
    fn scenario(ice_strength: i32) -> Scenario {
        scenario_with_ice(vec![
            Ice::new("Sentry", IceType::White, ice_strength).unwrap()
        ])
    }

    fn scenario_with_ice(ice: Vec<Ice>) -> Scenario {
        let skills = SkillSet::from_ratings([("hacking", 6)]).unwrap();
        let character = Character::new("Case", skills, Credits::zero(), 50).unwrap();

        let mut node = Node::new("data store").unwrap();
        for i in ice {
            node = node.with_ice(i);
        }
        let system = System::new("Host").unwrap().with_node(node.id());
        let run = IntrusionRun::begin(character.id(), &system, "hacking").unwrap();

        Scenario {
            character,
            system,
            node,
            run,
        }
    }

    mod begin {
        use super::*;

        #[test]
        fn begin_targets_entry_node() {
            let s = scenario(5);
            assert_eq!(
                s.run.state(),
                RunState::Approaching { node_id: s.node.id() }
            );
            assert!(!s.run.state().is_terminal());
        }

        #[test]
        fn begin_on_empty_system_fails() {
            let system = System::new("Husk").unwrap();
            let err =
                IntrusionRun::begin(CharacterId::new(), &system, "hacking").unwrap_err();
            assert!(matches!(err, DomainError::Invariant(_)));
        }

        #[test]
        fn begin_at_foreign_node_fails() {
            let s = scenario(5);
            let err = IntrusionRun::begin_at(
                s.character.id(),
                &s.system,
                NodeId::new(),
                "hacking",
            )
            .unwrap_err();
            assert!(matches!(err, DomainError::NotFound { .. }));
        }
    }

    mod engage {
        use super::*;

        #[test]
        fn engage_picks_strongest_ice() {
            let mut s = scenario_with_ice(vec![
                Ice::new("Watchdog", IceType::White, 2).unwrap(),
                Ice::new("Hellhound", IceType::Black, 8).unwrap(),
            ]);

            let outcome = s.run.engage(&mut s.node).unwrap();
            match outcome {
                EngageOutcome::Engaged {
                    ice_name, strength, ..
                } => {
                    assert_eq!(ice_name, "Hellhound");
                    assert_eq!(strength, 8);
                }
                other => panic!("expected engagement, got {other:?}"),
            }
        }

        #[test]
        fn undefended_node_breaches_immediately() {
            let mut s = scenario_with_ice(vec![]);

            let outcome = s.run.engage(&mut s.node).unwrap();
            assert_eq!(outcome, EngageOutcome::Breached);
            assert!(s.node.is_breached());
            assert!(s.run.state().is_terminal());

            let events = s.run.take_events();
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].event_type(), "node_breached");
        }

        #[test]
        fn engage_twice_is_invalid() {
            let mut s = scenario(5);
            s.run.engage(&mut s.node).unwrap();
            assert!(matches!(
                s.run.engage(&mut s.node),
                Err(DomainError::InvalidTransition(_))
            ));
        }

        #[test]
        fn engage_wrong_node_is_rejected() {
            let mut s = scenario(5);
            let mut other = Node::new("decoy").unwrap();
            assert!(matches!(
                s.run.engage(&mut other),
                Err(DomainError::Invariant(_))
            ));
        }
    }

    mod resolve {
        use super::*;

        #[test]
        fn winning_attack_breaches_node() {
            // ICE strength 5 against attack value 6
            let mut s = scenario(5);
            s.run.engage(&mut s.node).unwrap();

            let outcome = s
                .run
                .resolve_attack(
                    &s.character,
                    &mut s.node,
                    &mut s.system,
                    &IntrusionTuning::default(),
                    &FixedRandom(20),
                )
                .unwrap();

            assert_eq!(outcome, StepOutcome::NodeBreached { node_id: s.node.id() });
            assert!(s.node.is_breached());
            assert!(!s.node.ice()[0].is_active());
            // Breach increment: 0.5 per strength point
            assert_eq!(s.system.alert().value(), 2.5);

            let events = s.run.take_events();
            let types: Vec<_> = events.iter().map(|e| e.event_type()).collect();
            assert_eq!(types, vec!["ice_defeated", "node_breached"]);
        }

        #[test]
        fn equal_attack_does_not_win() {
            // Attack must exceed strength; 6 vs 6 fails
            let mut s = scenario(6);
            s.run.engage(&mut s.node).unwrap();

            let outcome = s
                .run
                .resolve_attack(
                    &s.character,
                    &mut s.node,
                    &mut s.system,
                    &IntrusionTuning::default(),
                    &FixedRandom(20),
                )
                .unwrap();

            assert!(matches!(outcome, StepOutcome::Repelled { .. }));
            assert!(s.node.ice()[0].is_active());
            assert!(s.system.alert().is_calm());
        }

        #[test]
        fn failed_attack_with_low_roll_is_detected() {
            let mut s = scenario(9);
            s.run.engage(&mut s.node).unwrap();

            let outcome = s
                .run
                .resolve_attack(
                    &s.character,
                    &mut s.node,
                    &mut s.system,
                    &IntrusionTuning::default(),
                    &FixedRandom(3), // 3 <= strength 9: detected
                )
                .unwrap();

            match outcome {
                StepOutcome::Detected { alert_level } => {
                    // Detection increment: 1.5 per strength point
                    assert_eq!(alert_level, 13.5);
                }
                other => panic!("expected detection, got {other:?}"),
            }
            assert!(s.run.state().is_terminal());

            let events = s.run.take_events();
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].event_type(), "intrusion_detected");
        }

        #[test]
        fn failed_attack_with_high_roll_stays_engaged() {
            let mut s = scenario(9);
            s.run.engage(&mut s.node).unwrap();

            let outcome = s
                .run
                .resolve_attack(
                    &s.character,
                    &mut s.node,
                    &mut s.system,
                    &IntrusionTuning::default(),
                    &FixedRandom(15), // 15 > strength 9: unnoticed
                )
                .unwrap();

            assert!(matches!(outcome, StepOutcome::Repelled { .. }));
            assert!(matches!(s.run.state(), RunState::Engaging { .. }));
            assert!(s.system.alert().is_calm());
            assert!(s.run.take_events().is_empty());
        }

        #[test]
        fn defeating_one_ice_retargets_the_next() {
            let mut s = scenario_with_ice(vec![
                Ice::new("Watchdog", IceType::White, 2).unwrap(),
                Ice::new("Sentry", IceType::Gray, 4).unwrap(),
            ]);
            s.run.engage(&mut s.node).unwrap();

            // First resolution downs the Sentry (strength 4 < attack 6)
            let outcome = s
                .run
                .resolve_attack(
                    &s.character,
                    &mut s.node,
                    &mut s.system,
                    &IntrusionTuning::default(),
                    &FixedRandom(20),
                )
                .unwrap();
            assert!(matches!(outcome, StepOutcome::IceDefeated { .. }));
            assert!(!s.node.is_breached());

            // Second resolution downs the Watchdog and breaches the node
            let outcome = s
                .run
                .resolve_attack(
                    &s.character,
                    &mut s.node,
                    &mut s.system,
                    &IntrusionTuning::default(),
                    &FixedRandom(20),
                )
                .unwrap();
            assert!(matches!(outcome, StepOutcome::NodeBreached { .. }));
            assert!(s.node.is_breached());
            // Alert raised for both defeats: (4 + 2) * 0.5
            assert_eq!(s.system.alert().value(), 3.0);
        }

        #[test]
        fn determinism_with_same_random_source() {
            let run_once = || {
                let mut s = scenario(9);
                s.run.engage(&mut s.node).unwrap();
                let outcome = s
                    .run
                    .resolve_attack(
                        &s.character,
                        &mut s.node,
                        &mut s.system,
                        &IntrusionTuning::default(),
                        &FixedRandom(3),
                    )
                    .unwrap();
                (outcome, s.system.alert().value())
            };
            assert_eq!(run_once(), run_once());
        }

        #[test]
        fn resolve_before_engage_is_invalid() {
            let mut s = scenario(5);
            let err = s
                .run
                .resolve_attack(
                    &s.character,
                    &mut s.node,
                    &mut s.system,
                    &IntrusionTuning::default(),
                    &FixedRandom(1),
                )
                .unwrap_err();
            assert!(matches!(err, DomainError::InvalidTransition(_)));
        }

        #[test]
        fn wrong_character_is_rejected() {
            let mut s = scenario(5);
            s.run.engage(&mut s.node).unwrap();

            let impostor = Character::new(
                "Armitage",
                SkillSet::new(),
                Credits::zero(),
                10,
            )
            .unwrap();
            let err = s
                .run
                .resolve_attack(
                    &impostor,
                    &mut s.node,
                    &mut s.system,
                    &IntrusionTuning::default(),
                    &FixedRandom(1),
                )
                .unwrap_err();
            assert!(matches!(err, DomainError::Invariant(_)));
        }
    }

    mod retreat {
        use super::*;

        #[test]
        fn retreat_leaves_alert_untouched() {
            let mut s = scenario(5);
            s.run.engage(&mut s.node).unwrap();

            s.run.retreat().unwrap();
            assert_eq!(
                s.run.state(),
                RunState::Retreated { node_id: s.node.id() }
            );
            assert!(s.system.alert().is_calm());
            assert!(s.node.ice()[0].is_active());

            let events = s.run.take_events();
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].event_type(), "intrusion_retreated");
        }

        #[test]
        fn retreat_from_terminal_state_is_invalid() {
            let mut s = scenario_with_ice(vec![]);
            s.run.engage(&mut s.node).unwrap(); // breaches immediately
            assert!(matches!(
                s.run.retreat(),
                Err(DomainError::InvalidTransition(_))
            ));
        }
    }
}
