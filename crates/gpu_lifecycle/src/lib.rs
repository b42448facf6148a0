//! # GPU Lifecycle
//!
//! GPU context loss and restore handling for surface-hosted renderers.
//!
//! ## Features
//!
//! - **Lifecycle Manager**: explicit Active/Lost/Restoring/Degraded state machine per surface
//! - **Dependent Registry**: weakly held suspend/recreate notifications in registration order
//! - **Generation Handles**: stale GPU handles are detected instead of used
//! - **Tracked Resources**: descriptor-backed textures, shader programs and buffers
//!   that rebuild themselves
//! - **Event Dispatch**: host-facing adapter with an explicit interruption policy
//!
//! ## Quick Start
//!
//! ```rust
//! use gpu_lifecycle::prelude::*;
//!
//! let config = ApplicationConfig::new("canvas");
//! let mut surface = SurfaceEventDispatcher::new(&config.lifecycle);
//!
//! let texture = TrackedResource::create(
//!     surface.manager_mut(),
//!     TextureDescriptor::new("white", 1, 1, vec![255; 4]),
//!     |_desc, generation| Ok(generation.value()),
//! )?;
//!
//! // The host reports `webglcontextlost` ...
//! let response = surface.dispatch_host_event("webglcontextlost").unwrap();
//! assert!(response.prevent_default);
//!
//! // ... and later `webglcontextrestored`.
//! surface.dispatch_host_event("webglcontextrestored");
//! let generation = surface.manager().current_generation();
//! assert!(texture.borrow().handle(generation).is_some());
//! assert!(surface.take_reports().is_empty());
//! # Ok::<(), ResourceError>(())
//! ```

pub mod config;
pub mod core;
pub mod events;
pub mod foundation;
pub mod lifecycle;
pub mod resources;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        core::{ApplicationConfig, Config, ConfigError, InterruptionPolicy, LifecycleConfig},
        events::{DispatchOutcome, EventResponse, LifecycleReport, SurfaceEventDispatcher},
        lifecycle::{
            ContextGeneration, ContextLifecycleManager, ContextSignal, ContextState,
            DegradedState, GpuDependent, LifecycleError, RegistrationHandle,
        },
        resources::{
            BufferDescriptor, BufferUsage, GpuHandle, ResourceError, ShaderProgramDescriptor,
            TextureDescriptor, TextureFilter, TrackedResource,
        },
    };
}
