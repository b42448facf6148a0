//! Test dependent that records every notification it receives

use crate::lifecycle::{ContextGeneration, GpuDependent};
use crate::resources::ResourceError;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Suspend(&'static str),
    Recreate(&'static str, ContextGeneration),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub fn new_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct Recorder {
    name: &'static str,
    log: CallLog,
    pub fail_recreate: bool,
}

impl Recorder {
    pub fn shared(name: &'static str, log: &CallLog) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            name,
            log: Rc::clone(log),
            fail_recreate: false,
        }))
    }
}

impl GpuDependent for Recorder {
    fn label(&self) -> &str {
        self.name
    }

    fn suspend(&mut self) {
        self.log.borrow_mut().push(Call::Suspend(self.name));
    }

    fn recreate(&mut self, generation: ContextGeneration) -> Result<(), ResourceError> {
        self.log.borrow_mut().push(Call::Recreate(self.name, generation));
        if self.fail_recreate {
            return Err(ResourceError::Creation {
                label: self.name.to_string(),
                reason: "simulated device failure".to_string(),
            });
        }
        Ok(())
    }
}

pub fn suspends(log: &CallLog) -> Vec<&'static str> {
    log.borrow()
        .iter()
        .filter_map(|call| match call {
            Call::Suspend(name) => Some(*name),
            Call::Recreate(..) => None,
        })
        .collect()
}

pub fn recreates(log: &CallLog) -> Vec<(&'static str, ContextGeneration)> {
    log.borrow()
        .iter()
        .filter_map(|call| match call {
            Call::Recreate(name, generation) => Some((*name, *generation)),
            Call::Suspend(_) => None,
        })
        .collect()
}
