//! In-memory ledger for deterministic testing and in-process embedding.

use crate::{TransferError, ValueTransfer};
use harvest_types::{AccountId, TokenId};
use std::collections::HashMap;

/// A simple in-memory token ledger.
///
/// Balances live in a map keyed by (token, holder). Accounts do not need
/// to be registered: an absent entry is a zero balance. Transfers are
/// all-or-nothing, so a failed transfer leaves every balance untouched.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    balances: HashMap<(TokenId, AccountId), u128>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `token` to `to` out of thin air.
    ///
    /// Test setup helper; real deployments fund accounts through whatever
    /// issuance path their ledger has.
    pub fn mint(&mut self, token: &TokenId, to: &AccountId, amount: u128) {
        let balance = self
            .balances
            .entry((token.clone(), to.clone()))
            .or_insert(0);
        *balance = balance.saturating_add(amount);
    }
}

impl ValueTransfer for MemoryLedger {
    fn transfer_from(
        &mut self,
        token: &TokenId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TransferError> {
        let available = self.balance_of(token, from);
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        if from == to || amount == 0 {
            return Ok(());
        }
        self.balances
            .insert((token.clone(), from.clone()), available - amount);
        let credit = self
            .balances
            .entry((token.clone(), to.clone()))
            .or_insert(0);
        *credit = credit.saturating_add(amount);
        Ok(())
    }

    fn balance_of(&self, token: &TokenId, holder: &AccountId) -> u128 {
        self.balances
            .get(&(token.clone(), holder.clone()))
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> TokenId {
        TokenId::new("GOLD")
    }

    #[test]
    fn unknown_account_has_zero_balance() {
        let ledger = MemoryLedger::new();
        assert_eq!(ledger.balance_of(&token(), &AccountId::new("nobody")), 0);
    }

    #[test]
    fn mint_then_transfer_moves_exact_amount() {
        let mut ledger = MemoryLedger::new();
        let alice = AccountId::new("alice");
        let bob = AccountId::new("bob");
        ledger.mint(&token(), &alice, 1000);

        ledger.transfer_from(&token(), &alice, &bob, 300).unwrap();

        assert_eq!(ledger.balance_of(&token(), &alice), 700);
        assert_eq!(ledger.balance_of(&token(), &bob), 300);
    }

    #[test]
    fn overdraft_fails_and_moves_nothing() {
        let mut ledger = MemoryLedger::new();
        let alice = AccountId::new("alice");
        let bob = AccountId::new("bob");
        ledger.mint(&token(), &alice, 100);

        let err = ledger
            .transfer_from(&token(), &alice, &bob, 101)
            .unwrap_err();
        assert_eq!(
            err,
            TransferError::InsufficientFunds {
                needed: 101,
                available: 100
            }
        );
        assert_eq!(ledger.balance_of(&token(), &alice), 100);
        assert_eq!(ledger.balance_of(&token(), &bob), 0);
    }

    #[test]
    fn tokens_do_not_mix() {
        let mut ledger = MemoryLedger::new();
        let alice = AccountId::new("alice");
        ledger.mint(&TokenId::new("GOLD"), &alice, 10);
        ledger.mint(&TokenId::new("SILVER"), &alice, 20);

        assert_eq!(ledger.balance_of(&TokenId::new("GOLD"), &alice), 10);
        assert_eq!(ledger.balance_of(&TokenId::new("SILVER"), &alice), 20);
    }

    #[test]
    fn self_transfer_is_a_no_op() {
        let mut ledger = MemoryLedger::new();
        let alice = AccountId::new("alice");
        ledger.mint(&token(), &alice, 50);

        ledger.transfer_from(&token(), &alice, &alice, 50).unwrap();
        assert_eq!(ledger.balance_of(&token(), &alice), 50);
    }
}
