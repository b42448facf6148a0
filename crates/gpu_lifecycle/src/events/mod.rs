//! Surface event dispatch
//!
//! The host's event source (a canvas, a window system callback, a device-lost
//! future) calls in here. Dispatch never fails and never panics: ordering
//! violations and degraded restores are logged and queued as
//! [`LifecycleReport`]s for the bootstrap caller to drain at a point where it
//! can surface them.

use crate::core::{InterruptionPolicy, LifecycleConfig};
use crate::lifecycle::{
    ContextGeneration, ContextLifecycleManager, ContextSignal, LifecycleError, SignalOutcome,
};

/// Map a host event name to a lifecycle signal.
///
/// Accepts the WebGL canvas names and the generic canvas/offscreen names.
pub fn parse_host_event(event_type: &str) -> Option<ContextSignal> {
    match event_type {
        "webglcontextlost" | "contextlost" => Some(ContextSignal::Lost),
        "webglcontextrestored" | "contextrestored" => Some(ContextSignal::Restored),
        _ => None,
    }
}

/// Something the bootstrap caller has to surface to its error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleReport {
    /// Signal that produced the report
    pub signal: ContextSignal,
    /// What went wrong
    pub error: LifecycleError,
}

/// What a dispatched signal did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Dependents were suspended
    Suspended,
    /// Duplicate signal, nothing happened
    Absorbed,
    /// Every dependent was recreated at this generation
    Restored(ContextGeneration),
    /// A report was queued
    Reported,
}

/// Reply to the host's event source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventResponse {
    /// The host must prevent the event's default action
    pub prevent_default: bool,
    /// Effect of the signal
    pub outcome: DispatchOutcome,
}

/// Owns a surface's lifecycle manager and stands between it and the host's
/// event source. One per surface.
#[derive(Debug)]
pub struct SurfaceEventDispatcher {
    manager: ContextLifecycleManager,
    policy: InterruptionPolicy,
    reports: Vec<LifecycleReport>,
}

impl SurfaceEventDispatcher {
    /// Create the manager and dispatcher for a newly acquired surface
    pub fn new(config: &LifecycleConfig) -> Self {
        if config.interruption == InterruptionPolicy::HostDefault {
            log::info!(
                "Surface '{}': host default behaviour on context loss is enabled",
                config.surface_label
            );
        }
        Self {
            manager: ContextLifecycleManager::new(config),
            policy: config.interruption,
            reports: Vec::new(),
        }
    }

    /// Deliver one signal from the host
    pub fn dispatch(&mut self, signal: ContextSignal) -> EventResponse {
        let outcome = match signal {
            ContextSignal::Lost => match self.manager.on_context_lost() {
                SignalOutcome::Applied => DispatchOutcome::Suspended,
                SignalOutcome::Absorbed => DispatchOutcome::Absorbed,
            },
            ContextSignal::Restored => match self.manager.on_context_restored() {
                Ok(generation) => DispatchOutcome::Restored(generation),
                Err(error) => {
                    log::error!("Surface '{}': {error}", self.manager.surface_label());
                    self.reports.push(LifecycleReport { signal, error });
                    DispatchOutcome::Reported
                }
            },
        };

        EventResponse {
            prevent_default: signal == ContextSignal::Lost && self.policy.prevents_default(),
            outcome,
        }
    }

    /// Deliver a host event by name. Unrelated events return `None`.
    pub fn dispatch_host_event(&mut self, event_type: &str) -> Option<EventResponse> {
        let Some(signal) = parse_host_event(event_type) else {
            log::trace!("Ignoring unrelated host event '{event_type}'");
            return None;
        };
        Some(self.dispatch(signal))
    }

    /// Drain queued reports, oldest first
    pub fn take_reports(&mut self) -> Vec<LifecycleReport> {
        std::mem::take(&mut self.reports)
    }

    /// Number of reports waiting to be drained
    pub fn pending_reports(&self) -> usize {
        self.reports.len()
    }

    /// Active interruption policy
    pub const fn policy(&self) -> InterruptionPolicy {
        self.policy
    }

    /// The surface's lifecycle manager
    pub const fn manager(&self) -> &ContextLifecycleManager {
        &self.manager
    }

    /// Mutable access for registering dependents
    pub fn manager_mut(&mut self) -> &mut ContextLifecycleManager {
        &mut self.manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::ContextState;
    use crate::resources::{ResourceError, ShaderProgramDescriptor, TrackedResource};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_parse_host_event_names() {
        assert_eq!(parse_host_event("webglcontextlost"), Some(ContextSignal::Lost));
        assert_eq!(parse_host_event("contextrestored"), Some(ContextSignal::Restored));
        assert_eq!(parse_host_event("resize"), None);
    }

    #[test]
    fn test_loss_prevents_default_under_suppress() {
        let mut dispatcher = SurfaceEventDispatcher::new(&LifecycleConfig::default());
        let response = dispatcher.dispatch(ContextSignal::Lost);
        assert!(response.prevent_default);
        assert_eq!(response.outcome, DispatchOutcome::Suspended);

        let response = dispatcher.dispatch(ContextSignal::Restored);
        assert!(!response.prevent_default);
        assert_eq!(
            response.outcome,
            DispatchOutcome::Restored(dispatcher.manager().current_generation())
        );
    }

    #[test]
    fn test_host_default_is_opt_in() {
        let config = LifecycleConfig::default().with_interruption(InterruptionPolicy::HostDefault);
        let mut dispatcher = SurfaceEventDispatcher::new(&config);
        assert_eq!(dispatcher.policy(), InterruptionPolicy::HostDefault);
        let response = dispatcher.dispatch_host_event("webglcontextlost").unwrap();
        assert!(!response.prevent_default);
        assert_eq!(dispatcher.manager().state(), ContextState::Lost);
    }

    #[test]
    fn test_duplicate_loss_still_prevents_default() {
        let mut dispatcher = SurfaceEventDispatcher::new(&LifecycleConfig::default());
        dispatcher.dispatch(ContextSignal::Lost);
        let response = dispatcher.dispatch(ContextSignal::Lost);
        assert!(response.prevent_default);
        assert_eq!(response.outcome, DispatchOutcome::Absorbed);
        assert_eq!(dispatcher.pending_reports(), 0);
    }

    #[test]
    fn test_out_of_order_restore_is_queued_not_raised() {
        let mut dispatcher = SurfaceEventDispatcher::new(&LifecycleConfig::default());
        let response = dispatcher.dispatch_host_event("webglcontextrestored").unwrap();
        assert_eq!(response.outcome, DispatchOutcome::Reported);
        assert_eq!(dispatcher.manager().state(), ContextState::Active);

        let reports = dispatcher.take_reports();
        assert_eq!(
            reports,
            vec![LifecycleReport {
                signal: ContextSignal::Restored,
                error: LifecycleError::Protocol {
                    signal: ContextSignal::Restored,
                    state: ContextState::Active,
                },
            }]
        );
        assert_eq!(dispatcher.pending_reports(), 0);
    }

    #[test]
    fn test_degraded_restore_is_queued_not_raised() {
        let mut dispatcher = SurfaceEventDispatcher::new(&LifecycleConfig::default());
        let broken = Rc::new(Cell::new(false));
        let flag = Rc::clone(&broken);
        let program = TrackedResource::create(
            dispatcher.manager_mut(),
            ShaderProgramDescriptor::new("sprite", "vs", "fs"),
            move |desc: &ShaderProgramDescriptor, _| {
                if flag.get() {
                    Err(ResourceError::Creation {
                        label: desc.label.clone(),
                        reason: "link failed".to_string(),
                    })
                } else {
                    Ok(())
                }
            },
        )
        .unwrap();

        dispatcher.dispatch(ContextSignal::Lost);
        broken.set(true);
        let response = dispatcher.dispatch_host_event("webglcontextrestored").unwrap();
        assert_eq!(response.outcome, DispatchOutcome::Reported);
        assert!(!response.prevent_default);
        assert_eq!(dispatcher.manager().state(), ContextState::Degraded);
        assert_eq!(dispatcher.pending_reports(), 1);

        let reports = dispatcher.take_reports();
        assert_eq!(reports[0].signal, ContextSignal::Restored);
        match &reports[0].error {
            LifecycleError::Degraded(degraded) => {
                let registration = program.borrow().registration().unwrap();
                assert_eq!(degraded.failed_ids(), vec![registration.id()]);
                assert_eq!(degraded.generation, dispatcher.manager().current_generation());
                assert!(degraded.failures[0].reason.contains("link failed"));
            }
            other => panic!("expected degraded report, got {other:?}"),
        }
        assert_eq!(dispatcher.pending_reports(), 0);
    }

    #[test]
    fn test_unrelated_event_ignored() {
        let mut dispatcher = SurfaceEventDispatcher::new(&LifecycleConfig::default());
        assert!(dispatcher.dispatch_host_event("mousemove").is_none());
        assert_eq!(dispatcher.manager().stats().losses, 0);
    }
}
