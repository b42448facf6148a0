//! Generation-stamped handles

use crate::lifecycle::ContextGeneration;

/// A raw GPU handle together with the generation it was created under.
///
/// Once the context moves past that generation the raw value refers to an
/// object the platform has already destroyed; [`get`](Self::get) refuses to
/// hand it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuHandle<T> {
    raw: T,
    generation: ContextGeneration,
}

impl<T> GpuHandle<T> {
    /// Stamp `raw` with the generation it was created under
    pub const fn new(raw: T, generation: ContextGeneration) -> Self {
        Self { raw, generation }
    }

    /// Generation the handle belongs to
    pub const fn generation(&self) -> ContextGeneration {
        self.generation
    }

    /// Whether the handle predates `current`
    pub fn is_stale(&self, current: ContextGeneration) -> bool {
        self.generation != current
    }

    /// The raw handle if it is valid for `current`
    pub fn get(&self, current: ContextGeneration) -> Option<&T> {
        (!self.is_stale(current)).then_some(&self.raw)
    }

    /// Consume the handle without a staleness check
    pub fn into_raw(self) -> T {
        self.raw
    }
}
