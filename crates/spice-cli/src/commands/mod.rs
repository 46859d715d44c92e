pub mod compute;
pub mod config;
pub mod export;
pub mod features;
pub mod submit;
