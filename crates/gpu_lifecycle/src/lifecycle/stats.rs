//! Lifecycle counters

use serde::{Deserialize, Serialize};

/// Counters describing what a manager has seen since it was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleStats {
    /// Loss signals that suspended dependents
    pub losses: u64,
    /// Loss signals absorbed as duplicates
    pub duplicate_losses: u64,
    /// Valid restore signals
    pub restores_attempted: u64,
    /// Restores that finished with every dependent recreated
    pub restores_succeeded: u64,
    /// Out-of-order signals reported to the caller
    pub protocol_errors: u64,
    /// Individual dependent recreate failures
    pub recreate_failures: u64,
    /// Registrations dropped because their owner went away
    pub dependents_pruned: u64,
}
