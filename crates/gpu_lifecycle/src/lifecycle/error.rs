//! Lifecycle error taxonomy

use super::dependent::DependentId;
use super::generation::ContextGeneration;
use super::state::{ContextSignal, ContextState};
use thiserror::Error;

/// A single dependent's failed recreate, collected during a restore pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dependent '{label}' ({id:?}) failed to recreate: {reason}")]
pub struct RecreateFailure {
    /// Registration id of the failing dependent
    pub id: DependentId,
    /// Label the dependent reported when it registered
    pub label: String,
    /// Error reported by the dependent
    pub reason: String,
}

/// Terminal condition after a restore in which some dependents failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedState {
    /// Generation the restore pass produced
    pub generation: ContextGeneration,
    /// Failures in notification order
    pub failures: Vec<RecreateFailure>,
}

impl DegradedState {
    /// Ids of the dependents that failed, in notification order
    pub fn failed_ids(&self) -> Vec<DependentId> {
        self.failures.iter().map(|failure| failure.id).collect()
    }
}

/// Errors reported to the caller of the lifecycle manager
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// A signal arrived in a state where it is not a valid transition
    #[error("protocol error: {signal} received while context is {state}")]
    Protocol {
        /// Offending signal
        signal: ContextSignal,
        /// State at the time the signal arrived
        state: ContextState,
    },

    /// The context came back but some dependents could not be rebuilt
    #[error(
        "context restored to {} with {} dependent(s) failing to recreate",
        .0.generation,
        .0.failures.len()
    )]
    Degraded(DegradedState),
}
