//! Timestamp type used throughout the engine.
//!
//! The engine has no clock of its own: every operation receives the
//! current time as a `Timestamp` argument, and callers must supply a
//! monotonically non-decreasing sequence. Internally all subtraction
//! saturates so a misbehaving clock can never wrap an unsigned duration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in time, in whole seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Time zero.
    pub const ZERO: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds from `self` to `later`, or 0 if `later` precedes `self`.
    pub fn elapsed_until(&self, later: Timestamp) -> u64 {
        later.0.saturating_sub(self.0)
    }

    /// This instant shifted forward by `secs`.
    pub fn plus_secs(&self, secs: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
