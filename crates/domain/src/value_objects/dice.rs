//! Dice rolling value object.
//!
//! A `DicePool` is a fixed roll specification like 3d6+2. Rolls draw from an
//! injected `RandomSource`, never from a global generator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::rng::RandomSource;

/// A dice pool: roll `count` dice of `sides` sides and add `modifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DicePool {
    count: u8,
    sides: u8,
    modifier: i32,
}

impl DicePool {
    pub fn new(count: u8, sides: u8, modifier: i32) -> Result<Self, DomainError> {
        if count == 0 {
            return Err(DomainError::invariant("dice count must be at least 1"));
        }
        if sides < 2 {
            return Err(DomainError::invariant("die must have at least 2 sides"));
        }
        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Roll the pool and return the total.
    pub fn roll(&self, rng: &dyn RandomSource) -> i32 {
        let dice: i32 = (0..self.count)
            .map(|_| rng.gen_range(1, i32::from(self.sides)))
            .sum();
        dice + self.modifier
    }

    pub fn min_roll(&self) -> i32 {
        i32::from(self.count) + self.modifier
    }

    pub fn max_roll(&self) -> i32 {
        i32::from(self.count) * i32::from(self.sides) + self.modifier
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier == 0 {
            write!(f, "{}d{}", self.count, self.sides)
        } else if self.modifier > 0 {
            write!(f, "{}d{}+{}", self.count, self.sides, self.modifier)
        } else {
            write!(f, "{}d{}{}", self.count, self.sides, self.modifier)
        }
    }
}
