//! Credits value object.
//!
//! Credits can never go negative: any debit that would overdraw fails with
//! `InsufficientCredits` and leaves the balance unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A non-negative credit balance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Credits(u32);

impl Credits {
    pub fn new(amount: u32) -> Self {
        Self(amount)
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn amount(&self) -> u32 {
        self.0
    }

    /// Add to the balance, saturating at `u32::MAX`.
    #[must_use]
    pub fn credited(self, amount: u32) -> Self {
        Self(self.0.saturating_add(amount))
    }

    /// Subtract from the balance.
    ///
    /// Fails with `InsufficientCredits` if the balance cannot cover the
    /// amount; the original balance is untouched in that case.
    pub fn debited(self, amount: u32) -> Result<Self, DomainError> {
        self.0
            .checked_sub(amount)
            .map(Self)
            .ok_or(DomainError::InsufficientCredits {
                required: amount,
                available: self.0,
            })
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.0 >= amount
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}cr", self.0)
    }
}

impl From<u32> for Credits {
    fn from(amount: u32) -> Self {
        Self(amount)
    }
}
