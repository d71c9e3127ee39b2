//! Node aggregate - a single location within a system's network graph.
//!
//! A node owns its ICE and data sources outright; other nodes are referenced
//! only by identifier so each node persists as one unit.

use serde::{Deserialize, Serialize};

use crate::entities::{Ice, Source};
use crate::error::DomainError;
use crate::ids::{IceId, NodeId, SourceId};

/// What happened when ICE in this node was defeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IceDefeatOutcome {
    /// The ICE went down but others still guard the node
    IceDeactivated { remaining_active: usize },
    /// That was the last active ICE; the node is now breached
    NodeBreached,
}

/// What happened when the node was marked breached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreachOutcome {
    NewlyBreached,
    AlreadyBreached,
}

/// A single looted source payout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootedSource {
    pub source_id: SourceId,
    pub name: String,
    pub value: u32,
}

/// A single node within a computer system.
///
/// # Invariants
///
/// - `breached` is monotonic: it only goes false -> true, and only
///   `reset_security` may clear it again
/// - Defeated ICE stays inactive even across `reset_security`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    id: NodeId,
    name: String,
    ice: Vec<Ice>,
    sources: Vec<Source>,
    connections: Vec<NodeId>,
    breached: bool,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invariant("node name cannot be empty"));
        }
        Ok(Self {
            id: NodeId::new(),
            name,
            ice: Vec::new(),
            sources: Vec::new(),
            connections: Vec::new(),
            breached: false,
        })
    }

    /// Attach ICE at system-build time.
    pub fn with_ice(mut self, ice: Ice) -> Self {
        self.ice.push(ice);
        self
    }

    /// Place a lootable source.
    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Link this node to another node in the same system.
    pub fn with_connection(mut self, node_id: NodeId) -> Self {
        self.connections.push(node_id);
        self
    }

    /// Set the ID (used when loading from storage).
    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ice(&self) -> &[Ice] {
        &self.ice
    }

    #[inline]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    #[inline]
    pub fn connections(&self) -> &[NodeId] {
        &self.connections
    }

    #[inline]
    pub fn is_breached(&self) -> bool {
        self.breached
    }

    pub fn active_ice(&self) -> impl Iterator<Item = &Ice> {
        self.ice.iter().filter(|ice| ice.is_active())
    }

    pub fn has_active_ice(&self) -> bool {
        self.active_ice().next().is_some()
    }

    /// The ICE an intruder must engage: highest strength wins, ties broken
    /// by lowest identifier so selection is deterministic.
    pub fn engagement_target(&self) -> Option<&Ice> {
        self.active_ice().min_by(|a, b| {
            b.strength()
                .cmp(&a.strength())
                .then_with(|| a.id().cmp(&b.id()))
        })
    }

    /// Deactivate the given ICE after it loses an engagement.
    ///
    /// Marks the node breached when no active ICE remain. Fails with
    /// `NotFound` for an unknown ICE id and `InvalidTransition` for ICE
    /// that is already down.
    pub fn defeat_ice(&mut self, ice_id: IceId) -> Result<IceDefeatOutcome, DomainError> {
        let ice = self
            .ice
            .iter_mut()
            .find(|ice| ice.id() == ice_id)
            .ok_or_else(|| DomainError::not_found("Ice", ice_id))?;
        if !ice.is_active() {
            return Err(DomainError::invalid_transition(format!(
                "ICE '{}' is already inactive",
                ice.name()
            )));
        }
        ice.deactivate();

        let remaining_active = self.active_ice().count();
        if remaining_active == 0 {
            self.breached = true;
            Ok(IceDefeatOutcome::NodeBreached)
        } else {
            Ok(IceDefeatOutcome::IceDeactivated { remaining_active })
        }
    }

    /// Mark an undefended node as breached.
    ///
    /// Fails with `InvalidTransition` while active ICE still guards the node.
    pub fn mark_breached(&mut self) -> Result<BreachOutcome, DomainError> {
        if self.has_active_ice() {
            return Err(DomainError::invalid_transition(
                "cannot mark a node breached while ICE is active",
            ));
        }
        if self.breached {
            return Ok(BreachOutcome::AlreadyBreached);
        }
        self.breached = true;
        Ok(BreachOutcome::NewlyBreached)
    }

    /// Loot every unlooted source in the node.
    ///
    /// Only a breached node can be looted. Each source pays at most once.
    pub fn loot_sources(&mut self) -> Result<Vec<LootedSource>, DomainError> {
        if !self.breached {
            return Err(DomainError::invalid_transition(
                "cannot loot a node that has not been breached",
            ));
        }
        let mut looted = Vec::new();
        for source in &mut self.sources {
            let name = source.name().to_string();
            let id = source.id();
            if let Some(value) = source.loot() {
                looted.push(LootedSource {
                    source_id: id,
                    name,
                    value,
                });
            }
        }
        Ok(looted)
    }

    /// Explicit security reset: clears the breached flag.
    ///
    /// Defeated ICE and looted sources stay spent - only the breach state
    /// resets.
    pub fn reset_security(&mut self) {
        self.breached = false;
    }
}
