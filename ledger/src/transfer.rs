//! The value-transfer trait.

use crate::TransferError;
use harvest_types::{AccountId, TokenId};

/// Moves fungible tokens between accounts on behalf of the engine.
///
/// Implementations must guarantee that a returned `Ok(())` means exactly
/// `amount` moved from `from` to `to`, and that a returned error means no
/// value moved at all. The engine orders its own bookkeeping around that
/// contract: transfers run before balances are committed, so a failed
/// transfer aborts the whole operation.
///
/// Custody-sourced payouts are expressed as `transfer_from` with the
/// engine's vault account as `from` — the vault accounts are under the
/// embedder's control and named in the engine configuration.
pub trait ValueTransfer {
    /// Move `amount` of `token` from `from` to `to`.
    fn transfer_from(
        &mut self,
        token: &TokenId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TransferError>;

    /// Current balance of `holder` in `token`.
    fn balance_of(&self, token: &TokenId, holder: &AccountId) -> u128;
}
