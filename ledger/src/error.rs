//! Transfer errors.

use thiserror::Error;

/// Why a value transfer did not complete.
///
/// Any of these aborts the enclosing engine operation; the engine commits
/// no balance change when a transfer fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("insufficient funds: need {needed}, available {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("transfer rejected: {0}")]
    Rejected(String),
}
