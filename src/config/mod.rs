//! Configuration module for Zeta.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{BackendSettings, ChatSettings, GeneralSettings, PipelineSettings, Settings};
