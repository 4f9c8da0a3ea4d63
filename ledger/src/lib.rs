//! Value-transfer capability for the harvest engine.
//!
//! The engine never models token balances itself: moving principal and
//! reward tokens between users and the engine's custody accounts is
//! delegated to whatever ledger the embedding system already has. That
//! ledger implements [`ValueTransfer`]; the rest of the workspace depends
//! only on the trait.
//!
//! [`MemoryLedger`] is the in-memory reference implementation, used by
//! tests and by embedders that keep balances in process.

pub mod error;
pub mod memory;
pub mod transfer;

pub use error::TransferError;
pub use memory::MemoryLedger;
pub use transfer::ValueTransfer;
