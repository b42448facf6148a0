//! # Unified Configuration
//!
//! Configuration structures for the lifecycle manager and its host glue.
//! Every structure has sensible defaults and can be loaded from TOML or RON
//! through the [`Config`] trait.
//!
//! ## Configuration Categories
//!
//! - **Logging Config**: log filter used by the host when initializing logging
//! - **Lifecycle Config**: surface naming, interruption policy, anomaly reporting
//! - **Application Config**: top-level aggregate loaded by the bootstrap caller

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError, ConfigFormat};

/// What the host should do with its own default reaction to a context loss.
///
/// Browsers, for example, will not restore a WebGL context unless the loss
/// event's default action is prevented; some hosts also show a blocking
/// "please reload" prompt by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptionPolicy {
    /// Prevent the host's default behaviour and treat loss as recoverable
    #[default]
    Suppress,
    /// Let the host run its default behaviour (explicit opt-in)
    HostDefault,
}

impl InterruptionPolicy {
    /// Whether loss events should have their default action prevented
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Suppress)
    }
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter passed to the logger, e.g. `"info"` or `"gpu_lifecycle=debug"`
    pub log_level: String,
}

impl LoggingConfig {
    /// Create a logging configuration with the default level
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Lifecycle Configuration
///
/// Per-surface settings for [`ContextLifecycleManager`](crate::lifecycle::ContextLifecycleManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Name of the surface, used in log lines
    pub surface_label: String,
    /// Handling of the host's default loss behaviour
    pub interruption: InterruptionPolicy,
    /// Log duplicate and out-of-order signals at `warn` instead of `debug`
    pub log_protocol_anomalies: bool,
    /// Remove registrations whose owner was dropped when a notification pass
    /// finds them. When off they are skipped and kept until unregistered.
    pub prune_dropped_dependents: bool,
}

impl LifecycleConfig {
    /// Create a lifecycle configuration for the named surface
    pub fn new(surface_label: impl Into<String>) -> Self {
        Self {
            surface_label: surface_label.into(),
            interruption: InterruptionPolicy::Suppress,
            log_protocol_anomalies: true,
            prune_dropped_dependents: true,
        }
    }

    /// Set the interruption policy
    pub fn with_interruption(mut self, policy: InterruptionPolicy) -> Self {
        self.interruption = policy;
        self
    }

    /// Enable or disable warn-level anomaly logging
    pub fn with_anomaly_logging(mut self, enabled: bool) -> Self {
        self.log_protocol_anomalies = enabled;
        self
    }

    /// Enable or disable pruning of dropped dependents
    pub fn with_pruning(mut self, enabled: bool) -> Self {
        self.prune_dropped_dependents = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface_label.trim().is_empty() {
            return Err(ConfigError::Invalid("surface label cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::new("canvas")
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration the bootstrap caller loads before acquiring the
/// surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Context lifecycle configuration
    pub lifecycle: LifecycleConfig,
}

impl ApplicationConfig {
    /// Create a configuration for the named surface with defaults elsewhere
    pub fn new(surface_label: impl Into<String>) -> Self {
        Self {
            logging: LoggingConfig::default(),
            lifecycle: LifecycleConfig::new(surface_label),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level cannot be empty".to_string()));
        }
        self.lifecycle.validate()
    }
}

impl Config for ApplicationConfig {}
