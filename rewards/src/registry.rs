//! The pool registry — an append-only collection of staking markets.

use crate::error::StakingError;
use crate::state::Pool;
use harvest_types::{Timestamp, TokenId};
use serde::{Deserialize, Serialize};

/// Pool identifier: the pool's index in the registry. Never reused.
pub type PoolId = u64;

/// Ordered collection of pools.
///
/// Pure bookkeeping — authorization for the mutating operations is
/// enforced by the engine wrapper.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PoolRegistry {
    pools: Vec<Pool>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new zeroed pool accepting `stake_token`; returns its id.
    pub fn create(&mut self, stake_token: TokenId) -> PoolId {
        let id = self.pools.len() as PoolId;
        self.pools.push(Pool::new(stake_token));
        id
    }

    pub fn get(&self, id: PoolId) -> Result<&Pool, StakingError> {
        self.pools
            .get(id as usize)
            .ok_or(StakingError::PoolNotFound(id))
    }

    pub fn get_mut(&mut self, id: PoolId) -> Result<&mut Pool, StakingError> {
        self.pools
            .get_mut(id as usize)
            .ok_or(StakingError::PoolNotFound(id))
    }

    /// Change a pool's emission period length.
    ///
    /// Rejected while the current schedule is still running, so an active
    /// payout is never truncated or stretched. Only `duration` changes on
    /// success; the rate is recomputed by the next schedule funding.
    pub fn set_duration(
        &mut self,
        id: PoolId,
        new_duration: u64,
        now: Timestamp,
    ) -> Result<(), StakingError> {
        if new_duration == 0 {
            return Err(StakingError::InvalidAmount);
        }
        let pool = self.get_mut(id)?;
        if now < pool.period_finish {
            return Err(StakingError::InvariantViolation(
                "emission schedule still active",
            ));
        }
        pool.duration = new_duration;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pool> {
        self.pools.iter()
    }
}
