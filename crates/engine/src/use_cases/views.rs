//! Read-only view DTOs for the presentation layer.
//!
//! Snapshots, not live references: the UI renders these without ever
//! touching a domain object.

use serde::Serialize;

use decker_domain::{
    Character, CharacterId, Contract, ContractId, IceType, Node, NodeId, Player, PlayerId,
    ProgramType, RunState, System, SystemId, MAX_HEALTH,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id(),
            name: player.name().to_string(),
            health: player.health(),
            max_health: MAX_HEALTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramView {
    pub name: String,
    pub kind: ProgramType,
    pub size: u32,
    pub rating: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheetView {
    pub id: CharacterId,
    pub name: String,
    pub skills: Vec<SkillView>,
    pub unused_skill_points: u32,
    pub credits: u32,
    pub used_memory: u32,
    pub memory_capacity: u32,
    pub programs: Vec<ProgramView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillView {
    pub name: String,
    pub rating: u8,
}

impl From<&Character> for CharacterSheetView {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id(),
            name: character.name().to_string(),
            skills: character
                .skills()
                .iter()
                .map(|(name, rating)| SkillView {
                    name: name.to_string(),
                    rating,
                })
                .collect(),
            unused_skill_points: character.unused_skill_points(),
            credits: character.credits().amount(),
            used_memory: character.used_memory(),
            memory_capacity: character.memory_capacity(),
            programs: character
                .inventory()
                .iter()
                .map(|program| ProgramView {
                    name: program.name().to_string(),
                    kind: program.kind(),
                    size: program.size(),
                    rating: program.rating(),
                })
                .collect(),
        }
    }
}

/// A summary of a contract for list views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSummary {
    pub id: ContractId,
    pub title: String,
    pub client: String,
    pub reward: u32,
    pub is_open: bool,
}

impl From<&Contract> for ContractSummary {
    fn from(contract: &Contract) -> Self {
        Self {
            id: contract.id(),
            title: contract.title().to_string(),
            client: contract.client().to_string(),
            reward: contract.reward_credits(),
            is_open: contract.is_open(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IceView {
    pub name: String,
    pub kind: IceType,
    pub strength: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: NodeId,
    pub name: String,
    pub is_breached: bool,
    pub active_ice: Vec<IceView>,
    pub unlooted_sources: usize,
    /// Connected node ids, for the map view.
    pub connections: Vec<NodeId>,
}

impl From<&Node> for NodeView {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id(),
            name: node.name().to_string(),
            is_breached: node.is_breached(),
            active_ice: node
                .active_ice()
                .map(|ice| IceView {
                    name: ice.name().to_string(),
                    kind: ice.kind(),
                    strength: ice.strength(),
                })
                .collect(),
            unlooted_sources: node
                .sources()
                .iter()
                .filter(|source| !source.is_looted())
                .count(),
            connections: node.connections().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemView {
    pub id: SystemId,
    pub name: String,
    pub alert_level: f32,
}

impl From<&System> for SystemView {
    fn from(system: &System) -> Self {
        Self {
            id: system.id(),
            name: system.name().to_string(),
            alert_level: system.alert().value(),
        }
    }
}

/// Everything the matrix-run screen needs for one intrusion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunView {
    pub state: RunState,
    pub system: SystemView,
    pub node: NodeView,
}
