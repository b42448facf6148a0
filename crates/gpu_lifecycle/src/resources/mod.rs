//! Generation-aware GPU resources
//!
//! Building blocks for resource owners: handles stamped with the generation
//! they were created under, descriptors that keep enough state to rebuild a
//! resource, and [`TrackedResource`], a ready-made [`GpuDependent`]
//! that ties the two together.
//!
//! [`GpuDependent`]: crate::lifecycle::GpuDependent

mod descriptor;
mod handle;
mod tracked;

pub use descriptor::{
    BufferDescriptor, BufferUsage, ResourceDescriptor, Rgba8, ShaderProgramDescriptor,
    TextureDescriptor, TextureFilter,
};
pub use handle::GpuHandle;
pub use tracked::{RecreateFn, TrackedResource};

use thiserror::Error;

/// Errors produced while (re)building a GPU resource
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// The saved descriptor cannot produce a resource
    #[error("Invalid descriptor for '{label}': {reason}")]
    InvalidDescriptor {
        /// Resource label
        label: String,
        /// What is wrong with it
        reason: String,
    },

    /// The graphics device refused to create the resource
    #[error("Failed to create '{label}': {reason}")]
    Creation {
        /// Resource label
        label: String,
        /// Device-reported reason
        reason: String,
    },
}
