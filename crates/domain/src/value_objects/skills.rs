//! Character skill ratings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::DomainError;

/// A character's skill ratings, keyed by unique skill name.
///
/// Backed by a `BTreeMap` so iteration order is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeMap<String, u8>);

impl SkillSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build a skill set from (name, rating) pairs.
    ///
    /// Fails if a skill name is empty or appears more than once.
    pub fn from_ratings<I, S>(ratings: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (S, u8)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (name, rating) in ratings {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(DomainError::invariant("skill name cannot be empty"));
            }
            if map.insert(name.clone(), rating).is_some() {
                return Err(DomainError::invariant(format!(
                    "duplicate skill name '{name}'"
                )));
            }
        }
        Ok(Self(map))
    }

    pub fn rating(&self, name: &str) -> Option<u8> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(name, rating)| (name.as_str(), *rating))
    }

    pub(crate) fn set_rating(&mut self, name: &str, rating: u8) {
        self.0.insert(name.to_string(), rating);
    }
}
