//! Character use cases: creation, skill training, and software purchases.

use std::sync::Arc;

use crate::infrastructure::ports::{CharacterRepo, RepoError};
use crate::use_cases::dispatch::EventDispatcher;
use crate::use_cases::views::CharacterSheetView;
use decker_domain::{
    Character, CharacterId, Credits, DomainError, DomainEvent, Program, ProgramType, SkillSet,
};

#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Input for creating a character.
pub struct CreateCharacterInput {
    pub name: String,
    pub skills: Vec<(String, u8)>,
    pub starting_credits: u32,
    pub memory_capacity: u32,
    pub skill_points: u32,
}

/// A program offered for sale, e.g. a shop catalog line.
#[derive(Debug, Clone)]
pub struct ProgramOrder {
    pub name: String,
    pub kind: ProgramType,
    pub size: u32,
    pub cost: u32,
    pub rating: u32,
    pub description: String,
}

pub struct CharacterOps {
    characters: Arc<dyn CharacterRepo>,
    dispatcher: Arc<EventDispatcher>,
}

impl CharacterOps {
    pub fn new(characters: Arc<dyn CharacterRepo>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            characters,
            dispatcher,
        }
    }

    pub async fn create_character(
        &self,
        input: CreateCharacterInput,
    ) -> Result<CharacterId, CharacterError> {
        let skills = SkillSet::from_ratings(input.skills)?;
        let character = Character::new(
            input.name,
            skills,
            Credits::new(input.starting_credits),
            input.memory_capacity,
        )?
        .with_skill_points(input.skill_points);

        self.characters.save(&character).await?;

        tracing::info!(character_id = %character.id(), name = character.name(), "character created");
        self.dispatcher.dispatch(vec![DomainEvent::CharacterCreated {
            character_id: character.id(),
            name: character.name().to_string(),
        }]);
        Ok(character.id())
    }

    pub async fn increase_skill(
        &self,
        character_id: CharacterId,
        skill_name: &str,
    ) -> Result<(), CharacterError> {
        let mut character = self.load(character_id).await?;
        let change = character.increase_skill(skill_name)?;
        self.characters.save(&character).await?;

        self.dispatcher.dispatch(vec![DomainEvent::SkillIncreased {
            character_id,
            skill_name: change.skill_name,
            new_rating: change.new_rating,
        }]);
        Ok(())
    }

    pub async fn decrease_skill(
        &self,
        character_id: CharacterId,
        skill_name: &str,
    ) -> Result<(), CharacterError> {
        let mut character = self.load(character_id).await?;
        let change = character.decrease_skill(skill_name)?;
        self.characters.save(&character).await?;

        self.dispatcher.dispatch(vec![DomainEvent::SkillDecreased {
            character_id,
            skill_name: change.skill_name,
            new_rating: change.new_rating,
        }]);
        Ok(())
    }

    /// Buy a program. Insufficient credits or memory surface as typed
    /// failures and persist nothing.
    pub async fn purchase_program(
        &self,
        character_id: CharacterId,
        order: ProgramOrder,
    ) -> Result<(), CharacterError> {
        let mut character = self.load(character_id).await?;
        let program = Program::new(order.name, order.kind, order.size, order.cost, order.rating)?
            .with_description(order.description);
        let purchase = character.purchase_program(program)?;
        self.characters.save(&character).await?;

        tracing::info!(
            character_id = %character_id,
            program = purchase.program_name.as_str(),
            cost = purchase.cost,
            "program purchased"
        );
        self.dispatcher.dispatch(vec![DomainEvent::ProgramPurchased {
            character_id,
            program_id: purchase.program_id,
            program_name: purchase.program_name,
            cost: purchase.cost,
        }]);
        Ok(())
    }

    pub async fn character_sheet(
        &self,
        character_id: CharacterId,
    ) -> Result<CharacterSheetView, CharacterError> {
        let character = self.load(character_id).await?;
        Ok(CharacterSheetView::from(&character))
    }

    async fn load(&self, character_id: CharacterId) -> Result<Character, CharacterError> {
        Ok(self
            .characters
            .get(character_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Character", character_id))?)
    }
}
