//! Player aggregate - the person at the keyboard.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::PlayerId;

/// Health ceiling for a fresh player.
pub const MAX_HEALTH: i32 = 100;

/// Outcome of applying damage to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Wounded { remaining_health: i32 },
    Flatlined,
}

/// Outcome of healing the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealOutcome {
    Healed { new_health: i32 },
    AlreadyFull,
}

/// The player aggregate root.
///
/// # Invariants
///
/// - `health` stays within `0..=MAX_HEALTH`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    id: PlayerId,
    name: String,
    health: i32,
}

impl Player {
    /// Factory for a fresh player at full health. Called once per session.
    pub fn create(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invariant("player name cannot be empty"));
        }
        Ok(Self {
            id: PlayerId::new(),
            name,
            health: MAX_HEALTH,
        })
    }

    /// Set the ID (used when loading from storage).
    pub fn with_id(mut self, id: PlayerId) -> Self {
        self.id = id;
        self
    }

    /// Set the health (used when loading from storage). Clamped to range.
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health.clamp(0, MAX_HEALTH);
        self
    }

    #[inline]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_flatlined(&self) -> bool {
        self.health == 0
    }

    /// Apply damage, flooring at zero.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        self.health = (self.health - amount.max(0)).max(0);
        if self.health == 0 {
            DamageOutcome::Flatlined
        } else {
            DamageOutcome::Wounded {
                remaining_health: self.health,
            }
        }
    }

    /// Heal, capping at `MAX_HEALTH`.
    pub fn heal(&mut self, amount: i32) -> HealOutcome {
        if self.health >= MAX_HEALTH {
            return HealOutcome::AlreadyFull;
        }
        self.health = (self.health + amount.max(0)).min(MAX_HEALTH);
        HealOutcome::Healed {
            new_health: self.health,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_starts_at_full_health() {
        let player = Player::create("Case").unwrap();
        assert_eq!(player.health(), MAX_HEALTH);
        assert!(!player.is_flatlined());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(matches!(
            Player::create("  "),
            Err(DomainError::Invariant(_))
        ));
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut player = Player::create("Case").unwrap();
        assert_eq!(
            player.take_damage(30),
            DamageOutcome::Wounded {
                remaining_health: 70
            }
        );
        assert_eq!(player.take_damage(500), DamageOutcome::Flatlined);
        assert_eq!(player.health(), 0);
    }

    #[test]
    fn heal_caps_at_max() {
        let mut player = Player::create("Case").unwrap();
        player.take_damage(50);
        assert_eq!(player.heal(80), HealOutcome::Healed { new_health: 100 });
        assert_eq!(player.heal(10), HealOutcome::AlreadyFull);
    }

    #[test]
    fn negative_amounts_are_ignored() {
        let mut player = Player::create("Case").unwrap();
        player.take_damage(-10);
        assert_eq!(player.health(), MAX_HEALTH);
    }
}
