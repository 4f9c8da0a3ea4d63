//! Staking engine errors.

use crate::registry::PoolId;
use harvest_ledger::TransferError;
use thiserror::Error;

/// Errors surfaced by the staking engine.
///
/// Every error aborts the whole operation: no pool or position record is
/// left partially updated, and nothing is retried internally. Settlement
/// is idempotent at a fixed instant, so a caller that retries simply
/// re-runs the full operation.
#[derive(Debug, Error)]
pub enum StakingError {
    #[error("caller is not an authorized administrator")]
    Unauthorized,

    #[error("pool {0} does not exist")]
    PoolNotFound(PoolId),

    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("insufficient staked balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    #[error("insufficient reward reserves: schedule commits {committed}, custody holds {available}")]
    InsufficientReserves { committed: u128, available: u128 },

    #[error("value transfer failed: {0}")]
    Transfer(#[from] TransferError),

    #[error("arithmetic overflow in reward computation")]
    Overflow,

    #[error("snapshot serialization failed: {0}")]
    Serialization(String),
}
