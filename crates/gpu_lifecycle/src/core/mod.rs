//! # Core Module
//!
//! Shared configuration types used by the lifecycle manager, the surface
//! event dispatcher and the bootstrap caller.

pub mod config;

pub use config::{
    ApplicationConfig,
    Config,
    ConfigError,
    ConfigFormat,
    InterruptionPolicy,
    LifecycleConfig,
    LoggingConfig,
};
