//! Value objects shared across aggregates.

pub mod alert;
pub mod credits;
pub mod dice;
pub mod skills;

pub use alert::AlertLevel;
pub use credits::Credits;
pub use dice::DicePool;
pub use skills::SkillSet;
