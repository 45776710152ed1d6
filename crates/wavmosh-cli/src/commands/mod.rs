//! CLI command implementations

pub mod config;
pub mod inspect;
pub mod json_output;
pub mod mosh;
