//! The intrusion engine.
//!
//! Resolves a character's attempt on a system node: ICE engagement, attack
//! resolution, detection checks, and alert escalation. Randomness comes from
//! an injected [`crate::RandomSource`]; all numeric knobs live in
//! [`IntrusionTuning`].

pub mod run;
pub mod tuning;

pub use run::{EngageOutcome, IntrusionRun, RunState, StepOutcome};
pub use tuning::IntrusionTuning;
