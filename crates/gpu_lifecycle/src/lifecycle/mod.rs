//! GPU context lifecycle
//!
//! A surface's GPU context can vanish at any time (driver reset, the browser
//! reclaiming a WebGL context, a laptop switching GPUs). Everything allocated
//! against it becomes a dangling handle. [`ContextLifecycleManager`] tracks
//! which generation of the context is current and walks the registered
//! [`GpuDependent`]s through suspend and recreate when the context goes away
//! and comes back.

mod dependent;
mod error;
mod generation;
mod manager;
mod state;
mod stats;

#[cfg(test)]
mod tests;

pub use dependent::{DependentId, GpuDependent, RegistrationHandle};
pub use error::{DegradedState, LifecycleError, RecreateFailure};
pub use generation::ContextGeneration;
pub use manager::ContextLifecycleManager;
pub use state::{ContextSignal, ContextState, SignalOutcome};
pub use stats::LifecycleStats;
