//! The reward accrual engine.
//!
//! Every mutating operation follows the same shape: settle the pool (and
//! the affected position) against the injected `now`, validate, run the
//! external value transfer, and only then commit balance changes and emit
//! the event. The transfer is ordered before the commit so a failed
//! transfer aborts the operation with no balance touched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::StakingError;
use crate::events::{EventSink, StakingEvent};
use crate::policy::AdminPolicy;
use crate::registry::{PoolId, PoolRegistry};
use crate::state::{Pool, StakerPosition};
use harvest_ledger::ValueTransfer;
use harvest_types::{AccountId, Timestamp, TokenId};

/// Multi-pool staking-reward engine.
///
/// Owns the accounting state only; token custody, authorization, the
/// clock, and event delivery are injected per call. Operations take
/// `&mut self`, so a shared engine needs one lock around it; no caller
/// can then observe a half-settled pool or position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewardsEngine {
    config: EngineConfig,
    registry: PoolRegistry,
    /// Positions per pool. Entries are created lazily and never removed;
    /// a fully zeroed position is equivalent to an absent one.
    positions: HashMap<PoolId, HashMap<AccountId, StakerPosition>>,
}

impl RewardsEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            registry: PoolRegistry::new(),
            positions: HashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bring a pool's accumulator (and optionally one position's
    /// checkpoint) up to date with `now`.
    ///
    /// Idempotent at a fixed instant. `account: None` is the pool-only
    /// form used by schedule changes, which affect no single position.
    fn settle(
        &mut self,
        pool_id: PoolId,
        account: Option<&AccountId>,
        now: Timestamp,
    ) -> Result<(), StakingError> {
        let pool = self.registry.get_mut(pool_id)?;
        let reward_per_unit = pool.reward_per_unit(now)?;
        pool.reward_per_unit_stored = reward_per_unit;
        let applicable = pool.applicable_time(now);
        if applicable > pool.last_update_time {
            pool.last_update_time = applicable;
        }
        tracing::debug!(pool = pool_id, reward_per_unit, "settled pool accumulator");

        if let Some(account) = account {
            let position = self
                .positions
                .entry(pool_id)
                .or_default()
                .entry(account.clone())
                .or_default();
            // earned() must read the old checkpoint before it is replaced.
            let owed = position.earned(reward_per_unit)?;
            position.pending_rewards = owed;
            position.reward_per_unit_paid = reward_per_unit;
        }
        Ok(())
    }

    // ── Administrative operations ────────────────────────────────────────

    /// Create a pool accepting `stake_token`. Administrator only.
    pub fn create_pool(
        &mut self,
        policy: &dyn AdminPolicy,
        caller: &AccountId,
        sink: &mut dyn EventSink,
        stake_token: TokenId,
    ) -> Result<PoolId, StakingError> {
        if !policy.is_authorized(caller) {
            return Err(StakingError::Unauthorized);
        }
        let pool_id = self.registry.create(stake_token);
        tracing::info!(pool = pool_id, "pool created");
        sink.emit(StakingEvent::PoolCreated { pool_id });
        Ok(pool_id)
    }

    /// Change a pool's emission period length. Administrator only;
    /// rejected while the current schedule is still running.
    pub fn set_duration(
        &mut self,
        policy: &dyn AdminPolicy,
        caller: &AccountId,
        pool_id: PoolId,
        new_duration: u64,
        now: Timestamp,
    ) -> Result<(), StakingError> {
        if !policy.is_authorized(caller) {
            return Err(StakingError::Unauthorized);
        }
        self.registry.set_duration(pool_id, new_duration, now)?;
        tracing::info!(pool = pool_id, duration = new_duration, "emission duration set");
        Ok(())
    }

    /// Fund a new emission schedule with `amount_to_add` reward units.
    /// Administrator only.
    ///
    /// A top-up before `period_finish` folds the unpaid remainder of the
    /// current schedule into the new rate, so nothing already promised is
    /// lost or paid twice. The solvency check runs against the total
    /// prospective payout `rate × duration`, not the increment, and must
    /// not exceed the reward vault's current balance.
    pub fn update_rate(
        &mut self,
        policy: &dyn AdminPolicy,
        caller: &AccountId,
        ledger: &dyn ValueTransfer,
        pool_id: PoolId,
        amount_to_add: u128,
        now: Timestamp,
    ) -> Result<(), StakingError> {
        if !policy.is_authorized(caller) {
            return Err(StakingError::Unauthorized);
        }
        self.settle(pool_id, None, now)?;

        let available = ledger.balance_of(&self.config.reward_token, &self.config.reward_vault);
        let pool = self.registry.get_mut(pool_id)?;
        if pool.duration == 0 {
            return Err(StakingError::InvariantViolation("emission duration is not set"));
        }
        let duration = pool.duration as u128;

        let rate = if now >= pool.period_finish {
            amount_to_add / duration
        } else {
            let remaining_secs = now.elapsed_until(pool.period_finish) as u128;
            let remaining = remaining_secs
                .checked_mul(pool.reward_rate)
                .ok_or(StakingError::Overflow)?;
            amount_to_add
                .checked_add(remaining)
                .ok_or(StakingError::Overflow)?
                / duration
        };
        if rate == 0 {
            return Err(StakingError::InvariantViolation("computed reward rate is zero"));
        }
        let committed = rate.checked_mul(duration).ok_or(StakingError::Overflow)?;
        if committed > available {
            tracing::warn!(
                pool = pool_id,
                committed,
                available,
                "rejecting emission schedule beyond reward reserves"
            );
            return Err(StakingError::InsufficientReserves {
                committed,
                available,
            });
        }

        pool.reward_rate = rate;
        pool.period_finish = now.plus_secs(pool.duration);
        pool.last_update_time = now;
        tracing::info!(
            pool = pool_id,
            rate,
            period_finish = pool.period_finish.as_secs(),
            "emission schedule updated"
        );
        Ok(())
    }

    // ── Staker operations ────────────────────────────────────────────────

    /// Deposit `amount` of the pool's principal token.
    pub fn stake(
        &mut self,
        ledger: &mut dyn ValueTransfer,
        sink: &mut dyn EventSink,
        account: &AccountId,
        pool_id: PoolId,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), StakingError> {
        if amount == 0 {
            return Err(StakingError::InvalidAmount);
        }
        self.settle(pool_id, Some(account), now)?;

        let pool = self.registry.get(pool_id)?;
        let stake_token = pool.stake_token.clone();
        let new_total = pool
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;
        let new_amount = self
            .staked_amount(pool_id, account)
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;

        ledger.transfer_from(&stake_token, account, &self.config.stake_vault, amount)?;

        self.registry.get_mut(pool_id)?.total_staked = new_total;
        self.position_mut(pool_id, account).amount = new_amount;
        tracing::debug!(pool = pool_id, account = %account, amount, "stake deposited");
        sink.emit(StakingEvent::Deposit {
            account: account.clone(),
            pool_id,
            amount,
        });
        Ok(())
    }

    /// Return `amount` of staked principal to `account`.
    pub fn withdraw(
        &mut self,
        ledger: &mut dyn ValueTransfer,
        sink: &mut dyn EventSink,
        account: &AccountId,
        pool_id: PoolId,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), StakingError> {
        if amount == 0 {
            return Err(StakingError::InvalidAmount);
        }
        self.settle(pool_id, Some(account), now)?;

        let held = self.staked_amount(pool_id, account);
        if amount > held {
            return Err(StakingError::InsufficientBalance {
                needed: amount,
                available: held,
            });
        }
        let pool = self.registry.get(pool_id)?;
        let stake_token = pool.stake_token.clone();
        let new_total = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::Overflow)?;

        ledger.transfer_from(&stake_token, &self.config.stake_vault, account, amount)?;

        self.registry.get_mut(pool_id)?.total_staked = new_total;
        self.position_mut(pool_id, account).amount = held - amount;
        tracing::debug!(pool = pool_id, account = %account, amount, "stake withdrawn");
        sink.emit(StakingEvent::Withdraw {
            account: account.clone(),
            pool_id,
            amount,
        });
        Ok(())
    }

    /// Pay out `account`'s settled rewards; returns the amount paid.
    ///
    /// With nothing pending this succeeds as a no-op, and the zero-amount
    /// event is still emitted.
    pub fn harvest(
        &mut self,
        ledger: &mut dyn ValueTransfer,
        sink: &mut dyn EventSink,
        account: &AccountId,
        pool_id: PoolId,
        now: Timestamp,
    ) -> Result<u128, StakingError> {
        self.settle(pool_id, Some(account), now)?;

        let reward = self
            .position(pool_id, account)
            .map(|p| p.pending_rewards)
            .unwrap_or(0);
        if reward > 0 {
            ledger.transfer_from(
                &self.config.reward_token,
                &self.config.reward_vault,
                account,
                reward,
            )?;
            self.position_mut(pool_id, account).pending_rewards = 0;
            tracing::debug!(pool = pool_id, account = %account, amount = reward, "rewards harvested");
        }
        sink.emit(StakingEvent::HarvestRewards {
            account: account.clone(),
            pool_id,
            amount: reward,
        });
        Ok(reward)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// The instant accrual for this pool has run (or would run) up to.
    pub fn last_applicable_time(
        &self,
        pool_id: PoolId,
        now: Timestamp,
    ) -> Result<Timestamp, StakingError> {
        Ok(self.registry.get(pool_id)?.applicable_time(now))
    }

    /// Current value of the pool's reward-per-unit accumulator.
    pub fn reward_per_unit(&self, pool_id: PoolId, now: Timestamp) -> Result<u128, StakingError> {
        self.registry.get(pool_id)?.reward_per_unit(now)
    }

    /// Rewards `account` would receive from a harvest at `now`.
    /// Zero for accounts that never staked.
    pub fn earned(
        &self,
        pool_id: PoolId,
        account: &AccountId,
        now: Timestamp,
    ) -> Result<u128, StakingError> {
        let reward_per_unit = self.registry.get(pool_id)?.reward_per_unit(now)?;
        match self.position(pool_id, account) {
            Some(position) => position.earned(reward_per_unit),
            None => Ok(0),
        }
    }

    pub fn pool(&self, pool_id: PoolId) -> Result<&Pool, StakingError> {
        self.registry.get(pool_id)
    }

    pub fn pool_count(&self) -> usize {
        self.registry.len()
    }

    pub fn position(&self, pool_id: PoolId, account: &AccountId) -> Option<&StakerPosition> {
        self.positions.get(&pool_id).and_then(|m| m.get(account))
    }

    /// Principal currently staked by `account` in `pool_id`.
    pub fn staked_amount(&self, pool_id: PoolId, account: &AccountId) -> u128 {
        self.position(pool_id, account).map(|p| p.amount).unwrap_or(0)
    }

    fn position_mut(&mut self, pool_id: PoolId, account: &AccountId) -> &mut StakerPosition {
        self.positions
            .entry(pool_id)
            .or_default()
            .entry(account.clone())
            .or_default()
    }
}

impl RewardsEngine {
    /// Serialize the full accounting state (config, pools, positions).
    pub fn snapshot(&self) -> Result<Vec<u8>, StakingError> {
        bincode::serialize(self).map_err(|e| StakingError::Serialization(e.to_string()))
    }

    /// Rebuild an engine from [`snapshot`](Self::snapshot) bytes.
    pub fn restore(bytes: &[u8]) -> Result<Self, StakingError> {
        bincode::deserialize(bytes).map_err(|e| StakingError::Serialization(e.to_string()))
    }
}
