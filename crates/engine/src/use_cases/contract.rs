//! Contract use cases: listing, acceptance, and completion.

use std::sync::Arc;

use crate::infrastructure::ports::{CharacterRepo, ContractRepo, RepoError};
use crate::use_cases::dispatch::EventDispatcher;
use crate::use_cases::views::ContractSummary;
use decker_domain::{CharacterId, Contract, ContractId, DomainError, DomainEvent};

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub struct ContractOps {
    contracts: Arc<dyn ContractRepo>,
    characters: Arc<dyn CharacterRepo>,
    dispatcher: Arc<EventDispatcher>,
}

impl ContractOps {
    pub fn new(
        contracts: Arc<dyn ContractRepo>,
        characters: Arc<dyn CharacterRepo>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            contracts,
            characters,
            dispatcher,
        }
    }

    /// Summaries of every contract still open for acceptance.
    pub async fn available_contracts(&self) -> Result<Vec<ContractSummary>, ContractError> {
        let contracts = self.contracts.list().await?;
        Ok(contracts
            .iter()
            .filter(|contract| contract.is_open())
            .map(ContractSummary::from)
            .collect())
    }

    /// A character takes an open contract.
    ///
    /// Fails with `NotFound` if either side is missing; nothing persists on
    /// failure.
    pub async fn accept_contract(
        &self,
        contract_id: ContractId,
        character_id: CharacterId,
    ) -> Result<(), ContractError> {
        let mut contract = self.load(contract_id).await?;
        // The character must exist before the contract binds to it
        self.characters
            .get(character_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Character", character_id))?;

        contract.accept(character_id)?;
        self.contracts.save(&contract).await?;

        tracing::info!(contract_id = %contract_id, character_id = %character_id, "contract accepted");
        self.dispatcher.dispatch(vec![DomainEvent::ContractAccepted {
            contract_id,
            character_id,
            title: contract.title().to_string(),
        }]);
        Ok(())
    }

    /// Close an accepted contract and pay the holder its reward.
    pub async fn complete_contract(&self, contract_id: ContractId) -> Result<(), ContractError> {
        let mut contract = self.load(contract_id).await?;
        let holder_id = contract
            .accepted_by()
            .ok_or_else(|| DomainError::invalid_transition("contract has no holder"))?;
        let mut holder = self
            .characters
            .get(holder_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Character", holder_id))?;

        let reward = contract.complete()?;
        holder.award_credits(reward);

        self.contracts.save(&contract).await?;
        self.characters.save(&holder).await?;

        tracing::info!(contract_id = %contract_id, reward, "contract completed");
        self.dispatcher.dispatch(vec![DomainEvent::ContractCompleted {
            contract_id,
            character_id: holder_id,
            reward,
        }]);
        Ok(())
    }

    async fn load(&self, contract_id: ContractId) -> Result<Contract, ContractError> {
        Ok(self
            .contracts
            .get(contract_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Contract", contract_id))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::event_sink::BufferingEventSink;
    use crate::infrastructure::persistence::{InMemoryCharacterRepo, InMemoryContractRepo};
    use decker_domain::{Character, Credits, SkillSet, SystemId};

    struct Fixture {
        ops: ContractOps,
        contracts: Arc<InMemoryContractRepo>,
        characters: Arc<InMemoryCharacterRepo>,
        sink: Arc<BufferingEventSink>,
    }

    fn fixture() -> Fixture {
        let contracts = Arc::new(InMemoryContractRepo::new());
        let characters = Arc::new(InMemoryCharacterRepo::new());
        let sink = Arc::new(BufferingEventSink::new());
        let dispatcher = Arc::new(EventDispatcher::new(
            sink.clone(),
            Arc::new(SystemClock::new()),
        ));
        Fixture {
            ops: ContractOps::new(contracts.clone(), characters.clone(), dispatcher),
            contracts,
            characters,
            sink,
        }
    }

    async fn seed_character(fixture: &Fixture) -> CharacterId {
        let character = Character::new(
            "Case",
            SkillSet::new(),
            Credits::new(100),
            20,
        )
        .expect("valid character");
        fixture.characters.save(&character).await.unwrap();
        character.id()
    }

    async fn seed_contract(fixture: &Fixture, reward: u32) -> ContractId {
        let contract = Contract::new("Steal the formula", "Mr. Johnson", SystemId::new(), reward)
            .expect("valid contract");
        fixture.contracts.save(&contract).await.unwrap();
        contract.id()
    }

    #[tokio::test]
    async fn available_lists_only_open_contracts() {
        let f = fixture();
        let character_id = seed_character(&f).await;
        let open_id = seed_contract(&f, 1000).await;
        let taken_id = seed_contract(&f, 2000).await;

        f.ops.accept_contract(taken_id, character_id).await.unwrap();

        let available = f.ops.available_contracts().await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, open_id);
    }

    #[tokio::test]
    async fn accept_unknown_contract_leaves_store_unmodified() {
        let f = fixture();
        let character_id = seed_character(&f).await;

        let err = f
            .ops
            .accept_contract(ContractId::new(), character_id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::Domain(DomainError::NotFound { .. })
        ));
        assert!(f.contracts.list().await.unwrap().is_empty());
        assert!(f.sink.envelopes().is_empty());
    }

    #[tokio::test]
    async fn accept_with_unknown_character_persists_nothing() {
        let f = fixture();
        let contract_id = seed_contract(&f, 1000).await;

        let err = f
            .ops
            .accept_contract(contract_id, CharacterId::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::Domain(DomainError::NotFound { .. })
        ));

        let stored = f.contracts.get(contract_id).await.unwrap().unwrap();
        assert!(stored.is_open());
    }

    #[tokio::test]
    async fn complete_pays_reward_exactly_once() {
        let f = fixture();
        let character_id = seed_character(&f).await;
        let contract_id = seed_contract(&f, 5000).await;

        f.ops.accept_contract(contract_id, character_id).await.unwrap();
        f.ops.complete_contract(contract_id).await.unwrap();

        let holder = f.characters.get(character_id).await.unwrap().unwrap();
        assert_eq!(holder.credits(), Credits::new(5100));

        // Completing again must fail and must not pay again
        let err = f.ops.complete_contract(contract_id).await.unwrap_err();
        assert!(matches!(
            err,
            ContractError::Domain(DomainError::InvalidTransition(_))
        ));
        let holder = f.characters.get(character_id).await.unwrap().unwrap();
        assert_eq!(holder.credits(), Credits::new(5100));

        assert_eq!(
            f.sink.event_types(),
            vec!["contract_accepted", "contract_completed"]
        );
    }

    #[tokio::test]
    async fn complete_open_contract_is_invalid() {
        let f = fixture();
        let contract_id = seed_contract(&f, 5000).await;

        let err = f.ops.complete_contract(contract_id).await.unwrap_err();
        assert!(matches!(
            err,
            ContractError::Domain(DomainError::InvalidTransition(_))
        ));
    }
}
