//! Context lifecycle manager
//!
//! Single authoritative tracker of GPU-context validity for one surface, and
//! the fan-out point for loss/restore notifications.

use super::dependent::{DependentId, GpuDependent, Registration, RegistrationHandle};
use super::error::{DegradedState, LifecycleError, RecreateFailure};
use super::generation::ContextGeneration;
use super::state::{ContextSignal, ContextState, SignalOutcome};
use super::stats::LifecycleStats;
use crate::core::LifecycleConfig;
use crate::foundation::collections::OrderedSlotMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Tracks the context generation of one surface and drives its dependents
/// through loss and restore.
///
/// All methods run synchronously to completion on the surface's event thread.
/// Dependents are notified in registration order for both the suspend and the
/// recreate pass, so owners with ordering requirements (a pipeline built from a
/// shader module, say) must register in dependency order.
pub struct ContextLifecycleManager {
    surface_label: String,
    state: ContextState,
    generation: ContextGeneration,
    /// False between a loss and the end of the next restore pass
    context_valid: bool,
    dependents: OrderedSlotMap<DependentId, Registration>,
    degraded: Option<DegradedState>,
    stats: LifecycleStats,
    warn_on_anomaly: bool,
    prune_dropped: bool,
}

impl ContextLifecycleManager {
    /// Create a manager for a freshly acquired surface (generation 0, active)
    pub fn new(config: &LifecycleConfig) -> Self {
        log::debug!(
            "Creating context lifecycle manager for surface '{}'",
            config.surface_label
        );
        Self {
            surface_label: config.surface_label.clone(),
            state: ContextState::Active,
            generation: ContextGeneration::INITIAL,
            context_valid: true,
            dependents: OrderedSlotMap::new(),
            degraded: None,
            stats: LifecycleStats::default(),
            warn_on_anomaly: config.log_protocol_anomalies,
            prune_dropped: config.prune_dropped_dependents,
        }
    }

    /// Handle a loss signal from the surface.
    ///
    /// Moves `Active` to `Lost` and suspends every dependent. A repeated loss
    /// is absorbed. Never fails: the caller is the host's event dispatch path.
    pub fn on_context_lost(&mut self) -> SignalOutcome {
        match self.state {
            ContextState::Active => {
                log::info!(
                    "Surface '{}': context {} lost, suspending {} dependent(s)",
                    self.surface_label,
                    self.generation,
                    self.dependents.len()
                );
                self.state = ContextState::Lost;
                self.context_valid = false;
                self.stats.losses += 1;
                self.suspend_all();
                SignalOutcome::Applied
            }
            ContextState::Degraded if self.context_valid => {
                // Stays terminal; handles from the degraded generation dangle now.
                self.anomaly(ContextSignal::Lost);
                self.context_valid = false;
                self.stats.losses += 1;
                self.suspend_all();
                SignalOutcome::Applied
            }
            ContextState::Degraded | ContextState::Lost | ContextState::Restoring => {
                self.anomaly(ContextSignal::Lost);
                self.stats.duplicate_losses += 1;
                SignalOutcome::Absorbed
            }
        }
    }

    /// Handle a restore signal from the surface.
    ///
    /// Only valid while `Lost`. Advances the generation and asks every
    /// dependent to recreate against it. A failing dependent does not stop the
    /// pass; if any failed the manager ends in the terminal `Degraded` state and
    /// the error lists them.
    pub fn on_context_restored(&mut self) -> Result<ContextGeneration, LifecycleError> {
        if self.state != ContextState::Lost {
            self.anomaly(ContextSignal::Restored);
            self.stats.protocol_errors += 1;
            return Err(LifecycleError::Protocol {
                signal: ContextSignal::Restored,
                state: self.state,
            });
        }

        self.state = ContextState::Restoring;
        self.generation = self.generation.next();
        self.stats.restores_attempted += 1;
        log::info!(
            "Surface '{}': context restored as {}, recreating {} dependent(s)",
            self.surface_label,
            self.generation,
            self.dependents.len()
        );

        let failures = self.recreate_all(self.generation);
        self.context_valid = true;

        if failures.is_empty() {
            self.state = ContextState::Active;
            self.stats.restores_succeeded += 1;
            log::info!(
                "Surface '{}': recovery complete at {}",
                self.surface_label,
                self.generation
            );
            return Ok(self.generation);
        }

        self.state = ContextState::Degraded;
        self.stats.recreate_failures += failures.len() as u64;
        log::error!(
            "Surface '{}': {} dependent(s) failed to recreate at {}, context degraded",
            self.surface_label,
            failures.len(),
            self.generation
        );
        let degraded = DegradedState {
            generation: self.generation,
            failures,
        };
        self.degraded = Some(degraded.clone());
        Err(LifecycleError::Degraded(degraded))
    }

    /// Register a dependent. Valid in any state.
    ///
    /// The manager keeps only a weak reference; dropping the last strong
    /// reference is enough to stop notifications. A dependent joining while
    /// the context is invalid (lost, restoring, or lost again after a degraded
    /// restore) is suspended before it is added.
    pub fn register<D>(&mut self, dependent: &Rc<RefCell<D>>) -> RegistrationHandle
    where
        D: GpuDependent + 'static,
    {
        let label = dependent
            .try_borrow()
            .map_or_else(|_| "<borrowed>".to_string(), |d| d.label().to_string());

        if !self.context_valid {
            log::debug!(
                "Surface '{}': '{}' registered while {}, suspending it first",
                self.surface_label,
                label,
                self.state
            );
            match dependent.try_borrow_mut() {
                Ok(mut d) => d.suspend(),
                Err(_) => log::error!("Cannot suspend '{label}': dependent is already borrowed"),
            };
        }

        let weak: Weak<RefCell<D>> = Rc::downgrade(dependent);
        let weak: Weak<RefCell<dyn GpuDependent>> = weak;
        let id = self.dependents.insert(Registration {
            label,
            dependent: weak,
        });
        log::trace!("Registered dependent {id:?}");
        RegistrationHandle::new(id)
    }

    /// Remove a dependent. Unregistering twice is a no-op.
    pub fn unregister(&mut self, handle: RegistrationHandle) {
        if let Some(registration) = self.dependents.remove(handle.id()) {
            log::trace!("Unregistered dependent '{}'", registration.label);
        }
    }

    /// Current context generation
    pub const fn current_generation(&self) -> ContextGeneration {
        self.generation
    }

    /// Whether a handle created under `generation` may still be used
    pub fn is_current(&self, generation: ContextGeneration) -> bool {
        self.context_valid && self.state.is_usable() && generation == self.generation
    }

    /// Current state
    pub const fn state(&self) -> ContextState {
        self.state
    }

    /// Failure details once the manager is degraded
    pub const fn degraded(&self) -> Option<&DegradedState> {
        self.degraded.as_ref()
    }

    /// Number of registrations, including ones whose owner was dropped but
    /// which have not been pruned yet (or never will be, with pruning off)
    pub fn dependent_count(&self) -> usize {
        self.dependents.len()
    }

    /// Whether `handle` still refers to a registration
    pub fn is_registered(&self, handle: RegistrationHandle) -> bool {
        self.dependents.contains_key(handle.id())
    }

    /// Counters since creation
    pub const fn stats(&self) -> LifecycleStats {
        self.stats
    }

    /// Name of the surface this manager tracks
    pub fn surface_label(&self) -> &str {
        &self.surface_label
    }

    fn suspend_all(&mut self) {
        let mut dropped = Vec::new();
        let order: Vec<DependentId> = self.dependents.keys().collect();

        for id in order {
            let Some(registration) = self.dependents.get(id) else {
                continue;
            };
            let Some(dependent) = registration.dependent.upgrade() else {
                dropped.push(id);
                continue;
            };
            log::debug!("Suspending '{}'", registration.label);
            match dependent.try_borrow_mut() {
                Ok(mut d) => d.suspend(),
                Err(_) => log::error!(
                    "Cannot suspend '{}': dependent is already borrowed",
                    registration.label
                ),
            };
        }

        self.prune(&dropped);
    }

    fn recreate_all(&mut self, generation: ContextGeneration) -> Vec<RecreateFailure> {
        let mut failures = Vec::new();
        let mut dropped = Vec::new();
        let order: Vec<DependentId> = self.dependents.keys().collect();

        for id in order {
            let Some(registration) = self.dependents.get(id) else {
                continue;
            };
            let Some(dependent) = registration.dependent.upgrade() else {
                dropped.push(id);
                continue;
            };
            log::debug!("Recreating '{}' at {generation}", registration.label);

            let result = match dependent.try_borrow_mut() {
                Ok(mut d) => d.recreate(generation).map_err(|e| e.to_string()),
                Err(_) => Err("dependent is already borrowed".to_string()),
            };
            if let Err(reason) = result {
                log::error!("Failed to recreate '{}': {reason}", registration.label);
                failures.push(RecreateFailure {
                    id,
                    label: registration.label.clone(),
                    reason,
                });
            }
        }

        self.prune(&dropped);
        failures
    }

    fn prune(&mut self, dropped: &[DependentId]) {
        if !self.prune_dropped {
            if !dropped.is_empty() {
                log::trace!("Skipped {} dropped dependent(s), pruning is off", dropped.len());
            }
            return;
        }
        for id in dropped {
            if let Some(registration) = self.dependents.remove(*id) {
                log::debug!("Pruning dropped dependent '{}'", registration.label);
                self.stats.dependents_pruned += 1;
            }
        }
    }

    fn anomaly(&self, signal: ContextSignal) {
        if self.warn_on_anomaly {
            log::warn!(
                "Surface '{}': protocol anomaly, {signal} while {}",
                self.surface_label,
                self.state
            );
        } else {
            log::debug!(
                "Surface '{}': protocol anomaly, {signal} while {}",
                self.surface_label,
                self.state
            );
        }
    }
}

impl Default for ContextLifecycleManager {
    fn default() -> Self {
        Self::new(&LifecycleConfig::default())
    }
}

impl std::fmt::Debug for ContextLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextLifecycleManager")
            .field("surface_label", &self.surface_label)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("dependents", &self.dependents.len())
            .finish_non_exhaustive()
    }
}
