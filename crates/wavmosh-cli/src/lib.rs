//! Wavmosh CLI library.
//!
//! Command implementations and logging setup for the `wavmosh` binary.

pub mod commands;
pub mod input;
pub mod logging;
