//! Multi-pool staking-reward accounting.
//!
//! Each pool pairs one principal token with a bounded emission schedule of
//! the single reward token. Rewards accrue continuously and are settled
//! lazily: a per-pool `reward_per_unit` accumulator advances on every
//! state-changing call, and each position checkpoints the accumulator at
//! its last settlement, so any staker's share is
//! `amount × (accumulator − checkpoint) / SCALE` — O(1) state per pool and
//! per position, no per-tick ledger, no iteration over stakers.
//!
//! This crate handles:
//! - Pool creation and emission-schedule configuration
//! - Stake / withdraw / harvest under mandatory pre-settlement
//! - Mid-schedule rate top-ups that fold unpaid committed rewards forward
//! - Solvency checks bounding promised emissions by reward custody
//!
//! Time is injected: every operation takes `now`, and callers must supply
//! a non-decreasing sequence. Operations take `&mut self`, so one engine
//! is one mutual-exclusion domain; wrap it in a lock (or own it from a
//! single thread) when sharing across threads.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod policy;
pub mod registry;
pub mod state;

pub use config::EngineConfig;
pub use engine::RewardsEngine;
pub use error::StakingError;
pub use events::{EventSink, NullSink, RecordingSink, StakingEvent};
pub use policy::{AdminPolicy, SingleAdmin};
pub use registry::{PoolId, PoolRegistry};
pub use state::{Pool, StakerPosition, SCALE};
