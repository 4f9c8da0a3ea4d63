//! Fundamental types for the harvest staking engine.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: account identifiers, token identifiers, and timestamps.

pub mod account;
pub mod time;
pub mod token;

pub use account::AccountId;
pub use time::Timestamp;
pub use token::TokenId;
