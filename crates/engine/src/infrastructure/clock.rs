//! Clock and random implementations.

use chrono::{DateTime, Utc};

use crate::infrastructure::ports::ClockPort;
use decker_domain::RandomSource;

/// System clock - uses real time.
#[derive(Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
#[derive(Default)]
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for SystemRandom {
    fn gen_range(&self, low: i32, high: i32) -> i32 {
        use rand::Rng;
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fixed random for testing - always returns the same value (clamped).
#[cfg(test)]
pub struct FixedRandom(pub i32);

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn gen_range(&self, low: i32, high: i32) -> i32 {
        self.0.clamp(low, high)
    }
}

/// Scripted random for testing - pops values front to back, then repeats the
/// last one.
#[cfg(test)]
pub struct SequenceRandom(pub std::sync::Mutex<Vec<i32>>);

#[cfg(test)]
impl SequenceRandom {
    pub fn new(values: Vec<i32>) -> Self {
        Self(std::sync::Mutex::new(values))
    }
}

#[cfg(test)]
impl RandomSource for SequenceRandom {
    fn gen_range(&self, low: i32, high: i32) -> i32 {
        let mut values = self.0.lock().expect("sequence lock poisoned");
        let value = if values.len() > 1 {
            values.remove(0)
        } else {
            values.first().copied().unwrap_or(low)
        };
        value.clamp(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_respects_bounds() {
        let rng = SystemRandom::new();
        for _ in 0..100 {
            let roll = rng.gen_range(1, 20);
            assert!((1..=20).contains(&roll));
        }
    }

    #[test]
    fn sequence_random_pops_then_repeats() {
        let rng = SequenceRandom::new(vec![3, 7]);
        assert_eq!(rng.gen_range(1, 20), 3);
        assert_eq!(rng.gen_range(1, 20), 7);
        assert_eq!(rng.gen_range(1, 20), 7);
    }
}
