//! Spice CLI library - expose modules for testing
//!
//! The binary in `main.rs` is a thin clap front end over these modules.

pub mod commands;
pub mod common;
pub mod context;
pub mod errors;

pub use common::GlobalOpts;
pub use spice_logger as logger;
