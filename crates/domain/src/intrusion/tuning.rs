//! Numeric knobs for the intrusion engine.

use serde::{Deserialize, Serialize};

/// Tuning values for intrusion resolution.
///
/// Passed explicitly to the engine - there is no global configuration. The
/// defaults are placeholder game-design numbers, not balanced values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntrusionTuning {
    /// Alert raised per point of ICE strength when ICE is defeated.
    pub breach_alert_per_strength: f32,
    /// Alert raised per point of ICE strength when the intruder is detected.
    /// Kept strictly above the breach factor: getting caught is louder than
    /// getting through.
    pub detection_alert_per_strength: f32,
    /// Size of the detection die. A failed attack is detected when a roll of
    /// `1..=detection_die` comes up at or under the ICE strength.
    pub detection_die: i32,
}

impl Default for IntrusionTuning {
    fn default() -> Self {
        Self {
            breach_alert_per_strength: 0.5,
            detection_alert_per_strength: 1.5,
            detection_die: 20,
        }
    }
}
