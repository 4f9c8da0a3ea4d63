//! Per-pool and per-position accounting state.

use crate::error::StakingError;
use harvest_types::{Timestamp, TokenId};
use serde::{Deserialize, Serialize};

/// Fixed-point scale for the reward-per-unit accumulator (1e18).
///
/// Division by `SCALE` truncates toward zero; the lost fraction is
/// accepted dust, never negative and never double-counted.
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// One staking market: a principal token plus an emission schedule of the
/// engine's reward token.
///
/// `reward_per_unit_stored` and `last_update_time` only ever move forward.
/// `reward_rate` is derived from schedule funding, never set directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// The principal token this pool accepts.
    pub stake_token: TokenId,
    /// Sum of every position's `amount` in this pool.
    pub total_staked: u128,
    /// Last instant the accumulator was settled.
    pub last_update_time: Timestamp,
    /// When the current emission schedule ends; accrual clamps here.
    pub period_finish: Timestamp,
    /// Length of the current/next emission period, in seconds.
    pub duration: u64,
    /// Reward units emitted per second.
    pub reward_rate: u128,
    /// Cumulative reward per staked unit since inception, scaled by `SCALE`.
    pub reward_per_unit_stored: u128,
}

impl Pool {
    /// A fresh pool with every numeric field zeroed.
    pub fn new(stake_token: TokenId) -> Self {
        Self {
            stake_token,
            total_staked: 0,
            last_update_time: Timestamp::ZERO,
            period_finish: Timestamp::ZERO,
            duration: 0,
            reward_rate: 0,
            reward_per_unit_stored: 0,
        }
    }

    /// The instant accrual runs up to: `now`, clamped to the schedule end.
    pub fn applicable_time(&self, now: Timestamp) -> Timestamp {
        now.min(self.period_finish)
    }

    /// Cumulative reward per staked unit at `now`, scaled by `SCALE`.
    ///
    /// With nothing staked there is no denominator and the accumulator
    /// holds still — rewards for empty intervals are credited to no one.
    pub fn reward_per_unit(&self, now: Timestamp) -> Result<u128, StakingError> {
        if self.total_staked == 0 {
            return Ok(self.reward_per_unit_stored);
        }
        let elapsed = self
            .last_update_time
            .elapsed_until(self.applicable_time(now));
        let emitted = self
            .reward_rate
            .checked_mul(elapsed as u128)
            .and_then(|v| v.checked_mul(SCALE))
            .ok_or(StakingError::Overflow)?;
        self.reward_per_unit_stored
            .checked_add(emitted / self.total_staked)
            .ok_or(StakingError::Overflow)
    }
}

/// One account's position in one pool.
///
/// Created lazily on first interaction and never deleted; an entry with
/// zero `amount` and zero `pending_rewards` is equivalent to no entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakerPosition {
    /// Current principal staked.
    pub amount: u128,
    /// Settled but not yet harvested reward units.
    pub pending_rewards: u128,
    /// Snapshot of the pool accumulator at the last settlement.
    pub reward_per_unit_paid: u128,
}

impl StakerPosition {
    /// Total rewards owed at accumulator value `reward_per_unit`.
    ///
    /// Must be evaluated against the checkpoint as it stands; settlement
    /// overwrites `reward_per_unit_paid` only after reading this.
    pub fn earned(&self, reward_per_unit: u128) -> Result<u128, StakingError> {
        let delta = reward_per_unit
            .checked_sub(self.reward_per_unit_paid)
            .ok_or(StakingError::Overflow)?;
        let newly_earned = self
            .amount
            .checked_mul(delta)
            .ok_or(StakingError::Overflow)?
            / SCALE;
        self.pending_rewards
            .checked_add(newly_earned)
            .ok_or(StakingError::Overflow)
    }
}
