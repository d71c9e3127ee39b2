//! Domain events.
//!
//! Coarse-grained events representing significant state changes. Aggregates
//! and the intrusion engine append these; application services dispatch them
//! to an event sink after a successful save, never before.

use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, ContractId, IceId, NodeId, PlayerId, ProgramId, SourceId, SystemId};

/// Domain event for significant state changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DomainEvent {
    // Session
    PlayerCreated {
        player_id: PlayerId,
        name: String,
        initial_health: i32,
    },
    CharacterCreated {
        character_id: CharacterId,
        name: String,
    },

    // Character progression & gear
    SkillIncreased {
        character_id: CharacterId,
        skill_name: String,
        new_rating: u8,
    },
    SkillDecreased {
        character_id: CharacterId,
        skill_name: String,
        new_rating: u8,
    },
    ProgramPurchased {
        character_id: CharacterId,
        program_id: ProgramId,
        program_name: String,
        cost: u32,
    },

    // Contracts
    ContractAccepted {
        contract_id: ContractId,
        character_id: CharacterId,
        title: String,
    },
    ContractCompleted {
        contract_id: ContractId,
        character_id: CharacterId,
        reward: u32,
    },

    // Intrusion
    IceDefeated {
        system_id: SystemId,
        node_id: NodeId,
        ice_id: IceId,
        ice_name: String,
        strength: i32,
    },
    NodeBreached {
        system_id: SystemId,
        node_id: NodeId,
        node_name: String,
    },
    IntrusionDetected {
        system_id: SystemId,
        node_id: NodeId,
        character_id: CharacterId,
        alert_level: f32,
    },
    IntrusionRetreated {
        system_id: SystemId,
        node_id: NodeId,
        character_id: CharacterId,
    },
    SourceLooted {
        system_id: SystemId,
        node_id: NodeId,
        source_id: SourceId,
        character_id: CharacterId,
        value: u32,
    },
}

impl DomainEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::PlayerCreated { .. } => "player_created",
            Self::CharacterCreated { .. } => "character_created",
            Self::SkillIncreased { .. } => "skill_increased",
            Self::SkillDecreased { .. } => "skill_decreased",
            Self::ProgramPurchased { .. } => "program_purchased",
            Self::ContractAccepted { .. } => "contract_accepted",
            Self::ContractCompleted { .. } => "contract_completed",
            Self::IceDefeated { .. } => "ice_defeated",
            Self::NodeBreached { .. } => "node_breached",
            Self::IntrusionDetected { .. } => "intrusion_detected",
            Self::IntrusionRetreated { .. } => "intrusion_retreated",
            Self::SourceLooted { .. } => "source_looted",
        }
    }

    /// The system this event concerns, when it concerns one.
    pub fn system_id(&self) -> Option<SystemId> {
        match self {
            Self::IceDefeated { system_id, .. }
            | Self::NodeBreached { system_id, .. }
            | Self::IntrusionDetected { system_id, .. }
            | Self::IntrusionRetreated { system_id, .. }
            | Self::SourceLooted { system_id, .. } => Some(*system_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_names_are_stable() {
        let event = DomainEvent::NodeBreached {
            system_id: SystemId::new(),
            node_id: NodeId::new(),
            node_name: "cpu".into(),
        };
        assert_eq!(event.event_type(), "node_breached");
        assert!(event.system_id().is_some());
    }

    #[test]
    fn session_events_have_no_system() {
        let event = DomainEvent::PlayerCreated {
            player_id: PlayerId::new(),
            name: "Case".into(),
            initial_health: 100,
        };
        assert_eq!(event.system_id(), None);
    }

    #[test]
    fn serde_uses_camel_case() {
        let event = DomainEvent::ContractCompleted {
            contract_id: ContractId::new(),
            character_id: CharacterId::new(),
            reward: 5000,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("contractCompleted"));
        assert!(json.contains("contractId"));
    }
}
