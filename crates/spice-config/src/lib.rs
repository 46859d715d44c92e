//! Configuration management for spice
//!
//! Holds the on-disk config file (`~/.config/spice/spice.toml`) and the
//! registry credentials derived from it. Credentials are an explicit value
//! handed to the registry handle, never process-wide state.

pub mod config;
pub mod credentials;

pub use config::{Config, ConfigError};
pub use credentials::Credentials;
