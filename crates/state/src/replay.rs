use std::collections::BTreeSet;

use peggy_primitives::WithdrawalId;
use serde::{Deserialize, Serialize};

/// Append-only record of honored withdrawal ids.
///
/// There is no eviction: an id stays in the set for the lifetime of the
/// bridge, so the set grows with the number of withdrawals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplayGuard {
    processed: BTreeSet<WithdrawalId>,
}

impl ReplayGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &WithdrawalId) -> bool {
        self.processed.contains(id)
    }

    /// Records `id`, returning `false` if it was already present.
    pub fn mark_if_new(&mut self, id: WithdrawalId) -> bool {
        self.processed.insert(id)
    }

    pub fn len(&self) -> usize {
        self.processed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}
