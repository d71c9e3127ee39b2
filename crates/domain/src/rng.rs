//! Injectable randomness.
//!
//! The domain never touches a global RNG. Every probability roll goes
//! through a `RandomSource` supplied by the caller, so engine outcomes are
//! reproducible under test.

/// Provider of uniformly distributed integers over a closed range.
pub trait RandomSource: Send + Sync {
    /// Returns a uniform integer in `[low, high]` (both ends inclusive).
    fn gen_range(&self, low: i32, high: i32) -> i32;
}

/// Fixed random source for tests - always returns the same value.
#[cfg(test)]
pub(crate) struct FixedRandom(pub i32);

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn gen_range(&self, low: i32, high: i32) -> i32 {
        self.0.clamp(low, high)
    }
}
