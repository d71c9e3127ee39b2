//! Character aggregate - the decker doing the intruding.
//!
//! # Invariants
//!
//! - Credits never go negative; any operation that would overdraw fails and
//!   leaves the balance unchanged
//! - Inventory total size never exceeds memory capacity
//! - Skill ratings never go below zero
//!
//! Mutations validate every precondition before touching a field, so a
//! failed operation leaves the aggregate exactly as it was.

use serde::{Deserialize, Serialize};

use crate::entities::{Program, ProgramType};
use crate::error::DomainError;
use crate::ids::{CharacterId, ProgramId};
use crate::value_objects::{Credits, SkillSet};

/// Result of a skill increase or decrease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillChange {
    pub skill_name: String,
    pub new_rating: u8,
    pub points_remaining: u32,
}

/// Result of a successful program purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramPurchase {
    pub program_id: ProgramId,
    pub program_name: String,
    pub cost: u32,
}

/// A character: skills, software inventory, and a credit balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    id: CharacterId,
    name: String,
    skills: SkillSet,
    unused_skill_points: u32,
    inventory: Vec<Program>,
    memory_capacity: u32,
    credits: Credits,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        skills: SkillSet,
        credits: Credits,
        memory_capacity: u32,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invariant("character name cannot be empty"));
        }
        Ok(Self {
            id: CharacterId::new(),
            name,
            skills,
            unused_skill_points: 0,
            inventory: Vec::new(),
            memory_capacity,
            credits,
        })
    }

    /// Set the starting skill point pool.
    pub fn with_skill_points(mut self, points: u32) -> Self {
        self.unused_skill_points = points;
        self
    }

    /// Set the ID (used when loading from storage).
    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    /// Add a program without payment (used when loading from storage).
    pub fn with_program(mut self, program: Program) -> Self {
        self.inventory.push(program);
        self
    }

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    #[inline]
    pub fn unused_skill_points(&self) -> u32 {
        self.unused_skill_points
    }

    #[inline]
    pub fn inventory(&self) -> &[Program] {
        &self.inventory
    }

    #[inline]
    pub fn memory_capacity(&self) -> u32 {
        self.memory_capacity
    }

    #[inline]
    pub fn credits(&self) -> Credits {
        self.credits
    }

    /// Memory consumed by the current inventory.
    pub fn used_memory(&self) -> u32 {
        self.inventory.iter().map(Program::size).sum()
    }

    pub fn free_memory(&self) -> u32 {
        self.memory_capacity.saturating_sub(self.used_memory())
    }

    /// Total attack bonus from equipped attack-class programs.
    pub fn attack_bonus(&self) -> i32 {
        self.inventory
            .iter()
            .filter(|program| program.kind() == ProgramType::Attack)
            .map(|program| program.rating() as i32)
            .sum()
    }

    /// Effective attack value for an engagement: skill rating plus program
    /// bonus. An untrained skill contributes zero.
    pub fn effective_attack(&self, skill_name: &str) -> i32 {
        let rating = self.skills.rating(skill_name).unwrap_or(0);
        i32::from(rating) + self.attack_bonus()
    }

    /// Spend skill points to raise a skill one step.
    ///
    /// Raising from rating `n` costs `n + 1` points.
    pub fn increase_skill(&mut self, skill_name: &str) -> Result<SkillChange, DomainError> {
        let current = self
            .skills
            .rating(skill_name)
            .ok_or_else(|| DomainError::invariant(format!("unknown skill '{skill_name}'")))?;
        let cost = u32::from(current) + 1;
        if self.unused_skill_points < cost {
            return Err(DomainError::invariant(format!(
                "not enough skill points: need {cost}, have {}",
                self.unused_skill_points
            )));
        }
        let new_rating = current
            .checked_add(1)
            .ok_or_else(|| DomainError::invariant("skill rating at maximum"))?;

        self.unused_skill_points -= cost;
        self.skills.set_rating(skill_name, new_rating);
        Ok(SkillChange {
            skill_name: skill_name.to_string(),
            new_rating,
            points_remaining: self.unused_skill_points,
        })
    }

    /// Lower a skill one step, refunding points.
    ///
    /// Lowering from rating `n` refunds `n` points (the cost of the raise).
    pub fn decrease_skill(&mut self, skill_name: &str) -> Result<SkillChange, DomainError> {
        let current = self
            .skills
            .rating(skill_name)
            .ok_or_else(|| DomainError::invariant(format!("unknown skill '{skill_name}'")))?;
        if current == 0 {
            return Err(DomainError::invariant(format!(
                "cannot decrease '{skill_name}' below 0"
            )));
        }
        let new_rating = current - 1;

        self.unused_skill_points += u32::from(current);
        self.skills.set_rating(skill_name, new_rating);
        Ok(SkillChange {
            skill_name: skill_name.to_string(),
            new_rating,
            points_remaining: self.unused_skill_points,
        })
    }

    /// Buy a program: debit its cost and install it.
    ///
    /// Checks both the credit balance and the memory budget before
    /// committing either change.
    pub fn purchase_program(&mut self, program: Program) -> Result<ProgramPurchase, DomainError> {
        let required = self.used_memory() + program.size();
        if required > self.memory_capacity {
            return Err(DomainError::MemoryExceeded {
                required,
                capacity: self.memory_capacity,
            });
        }
        let debited = self.credits.debited(program.cost())?;

        self.credits = debited;
        let purchase = ProgramPurchase {
            program_id: program.id(),
            program_name: program.name().to_string(),
            cost: program.cost(),
        };
        self.inventory.push(program);
        Ok(purchase)
    }

    /// Find, remove, and return a program by name.
    pub fn remove_program(&mut self, program_name: &str) -> Result<Program, DomainError> {
        let index = self
            .inventory
            .iter()
            .position(|program| program.name() == program_name)
            .ok_or_else(|| DomainError::not_found("Program", program_name))?;
        Ok(self.inventory.remove(index))
    }

    /// Pay the character, e.g. a contract reward or loot payout.
    pub fn award_credits(&mut self, amount: u32) {
        self.credits = self.credits.credited(amount);
    }
}
