//! System aggregate - a corporate host composed of nodes.
//!
//! The system holds node identifiers only; the nodes themselves are separate
//! aggregates so each persists on its own.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{NodeId, SystemId};
use crate::value_objects::AlertLevel;

/// Result of raising the system alert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertRaised {
    pub from: AlertLevel,
    pub to: AlertLevel,
}

/// A full computer system, e.g. "Saeder-Krupp Corporate HQ".
///
/// # Invariants
///
/// - `alert` is never negative (enforced by `AlertLevel`)
/// - The node list is ordered; the first entry is the entry node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    id: SystemId,
    name: String,
    alert: AlertLevel,
    nodes: Vec<NodeId>,
}

impl System {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invariant("system name cannot be empty"));
        }
        Ok(Self {
            id: SystemId::new(),
            name,
            alert: AlertLevel::calm(),
            nodes: Vec::new(),
        })
    }

    /// Append a node reference at system-build time.
    pub fn with_node(mut self, node_id: NodeId) -> Self {
        self.nodes.push(node_id);
        self
    }

    /// Set the ID (used when loading from storage).
    pub fn with_id(mut self, id: SystemId) -> Self {
        self.id = id;
        self
    }

    /// Set the alert level (used when loading from storage).
    pub fn with_alert(mut self, alert: AlertLevel) -> Self {
        self.alert = alert;
        self
    }

    #[inline]
    pub fn id(&self) -> SystemId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn alert(&self) -> AlertLevel {
        self.alert
    }

    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// The node an intrusion starts from.
    pub fn entry_node(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn contains_node(&self, node_id: NodeId) -> bool {
        self.nodes.contains(&node_id)
    }

    /// Raise the alert by a non-negative amount.
    pub fn raise_alert(&mut self, amount: f32) -> AlertRaised {
        let from = self.alert;
        self.alert = self.alert.raised(amount);
        AlertRaised {
            from,
            to: self.alert,
        }
    }

    /// Drop the alert back to calm, e.g. after a security sweep.
    pub fn clear_alert(&mut self) {
        self.alert = AlertLevel::calm();
    }
}
