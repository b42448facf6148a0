//! Dependents: owners of GPU handles that must follow context loss/restore

use super::generation::ContextGeneration;
use crate::resources::ResourceError;
use std::cell::RefCell;
use std::rc::Weak;

slotmap::new_key_type! {
    /// Identifies one registration with a lifecycle manager
    pub struct DependentId;
}

/// Anything holding GPU handles that become dangling when the context is lost.
///
/// Implementations must not call back into the manager from either method.
pub trait GpuDependent {
    /// Name used in logs and failure reports
    fn label(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Release or quiesce every handle; the context is gone.
    fn suspend(&mut self);

    /// Rebuild handles against the context identified by `generation`.
    fn recreate(&mut self, generation: ContextGeneration) -> Result<(), ResourceError>;
}

/// Returned by [`register`](super::ContextLifecycleManager::register); pass it
/// back to `unregister` when the dependent is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationHandle {
    id: DependentId,
}

impl RegistrationHandle {
    pub(crate) const fn new(id: DependentId) -> Self {
        Self { id }
    }

    /// Id reported in failure lists for this dependent
    pub const fn id(self) -> DependentId {
        self.id
    }
}

/// Registry entry. The manager only observes dependents; their owners keep
/// them alive.
pub(crate) struct Registration {
    pub(crate) label: String,
    pub(crate) dependent: Weak<RefCell<dyn GpuDependent>>,
}
