//! Player use cases.

use std::sync::Arc;

use crate::infrastructure::ports::{PlayerRepo, RepoError};
use crate::use_cases::dispatch::EventDispatcher;
use crate::use_cases::views::PlayerView;
use decker_domain::{DomainError, DomainEvent, Player, PlayerId};

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub struct PlayerOps {
    players: Arc<dyn PlayerRepo>,
    dispatcher: Arc<EventDispatcher>,
}

impl PlayerOps {
    pub fn new(players: Arc<dyn PlayerRepo>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            players,
            dispatcher,
        }
    }

    /// Create the session's player. Events go out only after the save lands.
    pub async fn create_player(&self, name: &str) -> Result<PlayerId, PlayerError> {
        let player = Player::create(name)?;
        self.players.save(&player).await?;

        tracing::info!(player_id = %player.id(), name = player.name(), "player created");
        self.dispatcher.dispatch(vec![DomainEvent::PlayerCreated {
            player_id: player.id(),
            name: player.name().to_string(),
            initial_health: player.health(),
        }]);
        Ok(player.id())
    }

    pub async fn player_status(&self, id: PlayerId) -> Result<PlayerView, PlayerError> {
        let player = self
            .players
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Player", id))?;
        Ok(PlayerView::from(&player))
    }
}
