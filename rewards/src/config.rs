//! Engine configuration.

use harvest_types::{AccountId, TokenId};
use serde::{Deserialize, Serialize};

/// Static configuration of a [`RewardsEngine`](crate::RewardsEngine).
///
/// The two vaults are accounts on the embedder's ledger that the engine
/// treats as its custody: staked principal sits in `stake_vault`, reward
/// reserves in `reward_vault`. Keeping them separate lets a pool stake
/// the reward token itself without principal masquerading as reserves in
/// the solvency check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The single reward token every pool pays out.
    pub reward_token: TokenId,
    /// Custody account for staked principal.
    pub stake_vault: AccountId,
    /// Custody account whose balance backs emission schedules.
    pub reward_vault: AccountId,
}

impl EngineConfig {
    pub fn new(reward_token: TokenId, stake_vault: AccountId, reward_vault: AccountId) -> Self {
        Self {
            reward_token,
            stake_vault,
            reward_vault,
        }
    }
}
