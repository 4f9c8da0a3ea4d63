//! Event records produced by the engine.

use crate::registry::PoolId;
use harvest_types::AccountId;
use serde::{Deserialize, Serialize};

/// A record of a committed state change.
///
/// Emitted strictly after the corresponding balances are updated, so a
/// sink never observes an event for an operation that then failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakingEvent {
    PoolCreated {
        pool_id: PoolId,
    },
    Deposit {
        account: AccountId,
        pool_id: PoolId,
        amount: u128,
    },
    Withdraw {
        account: AccountId,
        pool_id: PoolId,
        amount: u128,
    },
    /// Recorded even when `amount` is zero, so observers see every
    /// harvest attempt.
    HarvestRewards {
        account: AccountId,
        pool_id: PoolId,
        amount: u128,
    },
}

/// Where the engine delivers its event records.
pub trait EventSink {
    fn emit(&mut self, event: StakingEvent);
}

/// Sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: StakingEvent) {}
}

/// Sink that buffers events in memory, in emission order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Vec<StakingEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[StakingEvent] {
        &self.events
    }

    /// Drain the buffer, leaving it empty.
    pub fn take(&mut self) -> Vec<StakingEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: StakingEvent) {
        self.events.push(event);
    }
}
