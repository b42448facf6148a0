//! Lifecycle state of a surface's GPU context

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of the context lifecycle manager.
///
/// ```text
/// Active --loss--> Lost --restore ok--> Active
///                  Lost --restore, >=1 failure--> Degraded (terminal)
/// ```
///
/// `Restoring` is only observable from inside a recreate pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextState {
    /// The context is valid and resources may be used
    Active,
    /// The context was lost; every handle is dangling
    Lost,
    /// A recreate pass is running
    Restoring,
    /// A restore finished with at least one dependent failing to recreate
    Degraded,
}

impl ContextState {
    /// Whether GPU work may be issued against the current generation, given
    /// the context has not been lost since
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::Active | Self::Degraded)
    }
}

impl fmt::Display for ContextState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "active",
            Self::Lost => "lost",
            Self::Restoring => "restoring",
            Self::Degraded => "degraded",
        };
        f.write_str(name)
    }
}

/// The two signal kinds a surface delivers to its lifecycle manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextSignal {
    /// The context became invalid
    Lost,
    /// The platform handed out a fresh context
    Restored,
}

impl fmt::Display for ContextSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lost => f.write_str("context-lost"),
            Self::Restored => f.write_str("context-restored"),
        }
    }
}

/// What the manager did with a loss signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    /// The signal was acted on and dependents were notified
    Applied,
    /// The signal was a duplicate and was absorbed without side effects
    Absorbed,
}
