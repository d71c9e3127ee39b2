//! Contract aggregate - a job a character can undertake.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{CharacterId, ContractId, SystemId};

/// Contract lifecycle. Transitions run strictly forward:
/// `Open -> Accepted -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ContractStatus {
    Open,
    Accepted { by: CharacterId },
    Completed { by: CharacterId },
}

/// A job or mission against a target system.
///
/// # Invariants
///
/// - Status is monotonic: a completed contract never reopens
/// - `reward_credits` is never negative (u32 by construction)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    id: ContractId,
    title: String,
    client: String,
    target_system: SystemId,
    objectives: Vec<String>,
    reward_credits: u32,
    status: ContractStatus,
}

impl Contract {
    pub fn new(
        title: impl Into<String>,
        client: impl Into<String>,
        target_system: SystemId,
        reward_credits: u32,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::invariant("contract title cannot be empty"));
        }
        Ok(Self {
            id: ContractId::new(),
            title,
            client: client.into(),
            target_system,
            objectives: Vec::new(),
            reward_credits,
            status: ContractStatus::Open,
        })
    }

    /// Append an objective line.
    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.objectives.push(objective.into());
        self
    }

    /// Set the ID (used when loading from storage).
    pub fn with_id(mut self, id: ContractId) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn id(&self) -> ContractId {
        self.id
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn client(&self) -> &str {
        &self.client
    }

    #[inline]
    pub fn target_system(&self) -> SystemId {
        self.target_system
    }

    #[inline]
    pub fn objectives(&self) -> &[String] {
        &self.objectives
    }

    #[inline]
    pub fn reward_credits(&self) -> u32 {
        self.reward_credits
    }

    #[inline]
    pub fn status(&self) -> ContractStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, ContractStatus::Open)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, ContractStatus::Completed { .. })
    }

    /// Who holds the contract, once accepted.
    pub fn accepted_by(&self) -> Option<CharacterId> {
        match self.status {
            ContractStatus::Open => None,
            ContractStatus::Accepted { by } | ContractStatus::Completed { by } => Some(by),
        }
    }

    /// A character takes the job. Only open contracts can be accepted.
    pub fn accept(&mut self, character_id: CharacterId) -> Result<(), DomainError> {
        match self.status {
            ContractStatus::Open => {
                self.status = ContractStatus::Accepted { by: character_id };
                Ok(())
            }
            ContractStatus::Accepted { .. } => Err(DomainError::invalid_transition(
                "contract is already accepted",
            )),
            ContractStatus::Completed { .. } => Err(DomainError::invalid_transition(
                "contract is already completed",
            )),
        }
    }

    /// Close out the job. Returns the reward to pay, exactly once.
    pub fn complete(&mut self) -> Result<u32, DomainError> {
        match self.status {
            ContractStatus::Accepted { by } => {
                self.status = ContractStatus::Completed { by };
                Ok(self.reward_credits)
            }
            ContractStatus::Open => Err(DomainError::invalid_transition(
                "contract must be accepted before completion",
            )),
            ContractStatus::Completed { .. } => Err(DomainError::invalid_transition(
                "contract is already completed",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_contract() -> Contract {
        Contract::new("Steal the formula", "Mr. Johnson", SystemId::new(), 5000)
            .unwrap()
            .with_objective("Breach the R&D data store")
            .with_objective("Loot the formula file")
    }

    #[test]
    fn new_contract_is_open() {
        let contract = open_contract();
        assert!(contract.is_open());
        assert!(!contract.is_completed());
        assert_eq!(contract.accepted_by(), None);
        assert_eq!(contract.objectives().len(), 2);
    }

    #[test]
    fn empty_title_rejected() {
        let err = Contract::new("", "client", SystemId::new(), 0).unwrap_err();
        assert!(matches!(err, DomainError::Invariant(_)));
    }

    #[test]
    fn accept_then_complete_pays_once() {
        let mut contract = open_contract();
        let character = CharacterId::new();

        contract.accept(character).unwrap();
        assert_eq!(contract.accepted_by(), Some(character));

        let reward = contract.complete().unwrap();
        assert_eq!(reward, 5000);
        assert!(contract.is_completed());

        // A second completion never pays again
        assert!(matches!(
            contract.complete(),
            Err(DomainError::InvalidTransition(_))
        ));
    }

    #[test]
    fn double_accept_rejected() {
        let mut contract = open_contract();
        contract.accept(CharacterId::new()).unwrap();
        assert!(matches!(
            contract.accept(CharacterId::new()),
            Err(DomainError::InvalidTransition(_))
        ));
    }

    #[test]
    fn completion_requires_acceptance() {
        let mut contract = open_contract();
        assert!(matches!(
            contract.complete(),
            Err(DomainError::InvalidTransition(_))
        ));
        assert!(contract.is_open());
    }

    #[test]
    fn status_serializes_with_tag() {
        let mut contract = open_contract();
        contract.accept(CharacterId::new()).unwrap();
        let json = serde_json::to_string(&contract).unwrap();
        assert!(json.contains("\"status\":\"accepted\""));
    }
}
