//! System alert level value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A system-wide security alert level.
///
/// # Invariants
///
/// - Never negative (enforced by construction and by `raised`/`lowered`)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertLevel(f32);

impl AlertLevel {
    /// A quiet system with no suspicion of intruders.
    pub fn calm() -> Self {
        Self(0.0)
    }

    /// Construct from a raw value; negative or non-finite input clamps to 0.
    pub fn from_value(value: f32) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self(0.0)
        }
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn is_calm(&self) -> bool {
        self.0 == 0.0
    }

    /// Raise the alert by a non-negative amount.
    #[must_use]
    pub fn raised(self, amount: f32) -> Self {
        Self::from_value(self.0 + amount.max(0.0))
    }

    /// Lower the alert, bottoming out at calm.
    #[must_use]
    pub fn lowered(self, amount: f32) -> Self {
        Self::from_value(self.0 - amount.max(0.0))
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}
