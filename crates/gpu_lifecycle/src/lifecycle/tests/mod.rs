//! Scenario and model-based tests for the lifecycle manager

mod recorder;
mod state_machine_model;
