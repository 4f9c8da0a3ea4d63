//! Administrator authorization capability.

use harvest_types::AccountId;

/// Decides whether a caller may perform administrative operations
/// (pool creation, duration changes, schedule funding).
///
/// A capability predicate, not a role hierarchy: the engine asks this
/// question per call and stores nothing about callers.
pub trait AdminPolicy {
    fn is_authorized(&self, caller: &AccountId) -> bool;
}

/// Policy with exactly one administrator account.
#[derive(Clone, Debug)]
pub struct SingleAdmin {
    admin: AccountId,
}

impl SingleAdmin {
    pub fn new(admin: AccountId) -> Self {
        Self { admin }
    }
}

impl AdminPolicy for SingleAdmin {
    fn is_authorized(&self, caller: &AccountId) -> bool {
        *caller == self.admin
    }
}
