//! Wavmosh parameter and configuration types.
//!
//! This crate holds everything a caller needs to describe a datamosh run
//! without pulling in the mixing engine itself:
//!
//! - [`params`]: strategy names, glitch size classes, and [`GlitchParameters`]
//! - [`config`]: the overridable constant table ([`MoshConfig`]) used by the
//!   engine's strategies, with the `smart` and `block` presets
//! - [`validation`]: range checks over a [`MoshConfig`]
//!
//! # Example
//!
//! ```
//! use wavmosh_spec::{GlitchParameters, MoshConfig, SizeClass, Strategy};
//!
//! let params = GlitchParameters::new(75)
//!     .with_size(SizeClass::Large)
//!     .with_strategy(Strategy::ChunkMix)
//!     .with_seed(42);
//! assert_eq!(params.intensity(), 75);
//!
//! let config = MoshConfig::default();
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod params;
pub mod validation;

pub use config::{
    ChunkMixConfig, HeaderCorruptConfig, ModeSelection, ModeWeights, MoshConfig, Preset,
    SizeProfile, SizeTable, SmartMoshConfig,
};
pub use params::{GlitchParameters, ParseParamError, SizeClass, Strategy, MAX_INTENSITY};
pub use validation::{ConfigError, ConfigResult};
