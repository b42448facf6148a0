//! Descriptor-backed resources that follow the context lifecycle

use super::descriptor::ResourceDescriptor;
use super::handle::GpuHandle;
use super::ResourceError;
use crate::lifecycle::{
    ContextGeneration, ContextLifecycleManager, GpuDependent, RegistrationHandle,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Builds the raw handle for a descriptor against a given generation
pub type RecreateFn<D, H> = Box<dyn FnMut(&D, ContextGeneration) -> Result<H, ResourceError>>;

/// A resource that keeps its descriptor and rebuilds itself after a restore.
///
/// The owner holds the `Rc`; the lifecycle manager only holds a weak
/// reference, so dropping the owner's handle is enough to stop notifications.
pub struct TrackedResource<D, H> {
    descriptor: D,
    recreate_fn: RecreateFn<D, H>,
    handle: Option<GpuHandle<H>>,
    registration: Option<RegistrationHandle>,
    builds: u32,
}

impl<D, H> TrackedResource<D, H>
where
    D: ResourceDescriptor + 'static,
    H: 'static,
{
    /// Create the resource and register it with `manager`.
    ///
    /// The handle is built immediately when the context is usable; otherwise
    /// creation waits for the next restore pass.
    pub fn create<F>(
        manager: &mut ContextLifecycleManager,
        descriptor: D,
        recreate_fn: F,
    ) -> Result<Rc<RefCell<Self>>, ResourceError>
    where
        F: FnMut(&D, ContextGeneration) -> Result<H, ResourceError> + 'static,
    {
        descriptor.validate()?;

        let mut resource = Self {
            descriptor,
            recreate_fn: Box::new(recreate_fn),
            handle: None,
            registration: None,
            builds: 0,
        };

        let generation = manager.current_generation();
        if manager.is_current(generation) {
            resource.build(generation)?;
        } else {
            log::debug!(
                "Deferring creation of '{}' until the context is restored",
                resource.descriptor.label()
            );
        }

        let shared = Rc::new(RefCell::new(resource));
        let registration = manager.register(&shared);
        shared.borrow_mut().registration = Some(registration);
        Ok(shared)
    }

    /// The live handle, if it belongs to `current`
    pub fn handle(&self, current: ContextGeneration) -> Option<&H> {
        self.handle.as_ref().and_then(|handle| handle.get(current))
    }

    /// Whether a handle is currently held
    pub const fn is_resident(&self) -> bool {
        self.handle.is_some()
    }

    /// Generation of the held handle
    pub fn generation(&self) -> Option<ContextGeneration> {
        self.handle.as_ref().map(GpuHandle::generation)
    }

    /// Saved creation state
    pub const fn descriptor(&self) -> &D {
        &self.descriptor
    }

    /// Edit the saved creation state, e.g. to stream new pixel data.
    ///
    /// The live handle is left as is. Changes take effect at the next rebuild,
    /// which validates the descriptor before calling the recreate function.
    pub fn descriptor_mut(&mut self) -> &mut D {
        &mut self.descriptor
    }

    /// How many times the recreate function has produced a handle
    pub const fn build_count(&self) -> u32 {
        self.builds
    }

    /// Registration with the manager, if still registered
    pub const fn registration(&self) -> Option<RegistrationHandle> {
        self.registration
    }

    /// Stop receiving lifecycle notifications
    pub fn unregister(&mut self, manager: &mut ContextLifecycleManager) {
        if let Some(registration) = self.registration.take() {
            manager.unregister(registration);
        }
    }

    fn build(&mut self, generation: ContextGeneration) -> Result<(), ResourceError> {
        let raw = (self.recreate_fn)(&self.descriptor, generation)?;
        self.handle = Some(GpuHandle::new(raw, generation));
        self.builds += 1;
        log::trace!("Built '{}' at {generation}", self.descriptor.label());
        Ok(())
    }
}

impl<D, H> GpuDependent for TrackedResource<D, H>
where
    D: ResourceDescriptor + 'static,
    H: 'static,
{
    fn label(&self) -> &str {
        self.descriptor.label()
    }

    fn suspend(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::trace!(
                "Released '{}' from {}",
                self.descriptor.label(),
                handle.generation()
            );
        }
    }

    fn recreate(&mut self, generation: ContextGeneration) -> Result<(), ResourceError> {
        self.handle = None;
        self.descriptor.validate()?;
        self.build(generation)
    }
}
