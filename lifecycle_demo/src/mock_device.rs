//! In-memory stand-in for a graphics device

use gpu_lifecycle::lifecycle::ContextGeneration;
use gpu_lifecycle::resources::{
    BufferDescriptor, ResourceError, ShaderProgramDescriptor, TextureDescriptor,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Raw object id handed out by the mock device
pub type ObjectId = u32;

/// Creates numbered objects; can be told to refuse textures after a restore
#[derive(Debug, Default)]
pub struct MockDevice {
    next_id: ObjectId,
    pub fail_textures_after_restore: bool,
    pub created: usize,
}

pub type SharedDevice = Rc<RefCell<MockDevice>>;

impl MockDevice {
    pub fn shared(fail_textures_after_restore: bool) -> SharedDevice {
        Rc::new(RefCell::new(Self {
            fail_textures_after_restore,
            ..Self::default()
        }))
    }

    fn allocate(&mut self, label: &str, generation: ContextGeneration) -> ObjectId {
        self.next_id += 1;
        self.created += 1;
        log::debug!("mock device: '{label}' -> object {} at {generation}", self.next_id);
        self.next_id
    }

    pub fn create_texture(
        &mut self,
        desc: &TextureDescriptor,
        generation: ContextGeneration,
    ) -> Result<ObjectId, ResourceError> {
        if self.fail_textures_after_restore && generation > ContextGeneration::INITIAL {
            return Err(ResourceError::Creation {
                label: desc.label.clone(),
                reason: "out of texture memory".to_string(),
            });
        }
        Ok(self.allocate(&desc.label, generation))
    }

    pub fn create_program(
        &mut self,
        desc: &ShaderProgramDescriptor,
        generation: ContextGeneration,
    ) -> Result<ObjectId, ResourceError> {
        Ok(self.allocate(&desc.label, generation))
    }

    pub fn create_buffer(
        &mut self,
        desc: &BufferDescriptor,
        generation: ContextGeneration,
    ) -> Result<ObjectId, ResourceError> {
        Ok(self.allocate(&desc.label, generation))
    }
}
