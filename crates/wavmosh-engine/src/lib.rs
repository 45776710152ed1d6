//! Wavmosh PCM Datamosh Engine
//!
//! Combines two PCM payloads into one glitched payload of the primary's
//! length. The engine is a pure function of its inputs plus a seeded random
//! stream: no I/O, no state between calls.
//!
//! # Strategies
//!
//! - **Smart mosh** - energy-guided splicing of faded secondary blocks, with
//!   per-sample direct, blend, bit-flip, and echo modes and a soft clipper
//! - **Hex swap** - byte-wise substitution at matching offsets
//! - **Chunk mix** - alternating runs of primary and secondary chunks
//! - **Byte replace** - random single-byte writes from random secondary offsets
//! - **Header corrupt** - random bytes in the header's format fields
//!
//! # Determinism
//!
//! Given the same request, parameters, and seed the output is byte-identical.
//! [`MixEngine::run_seeded`] draws from PCG32 with a per-strategy seed derived
//! via BLAKE3.
//!
//! # Example
//!
//! ```
//! use wavmosh_engine::wav::{write_wav_to_vec, WavFormat};
//! use wavmosh_engine::{BitDepth, MixEngine, MoshRequest};
//! use wavmosh_spec::{GlitchParameters, Strategy};
//!
//! let format = WavFormat::mono(44100, BitDepth::Pcm16);
//! let primary = write_wav_to_vec(&format, &[0u8; 1000]);
//! let secondary = write_wav_to_vec(&format, &[0xFFu8; 1000]);
//!
//! let request = MoshRequest::from_files(&primary, &secondary)?;
//! let params = GlitchParameters::new(50)
//!     .with_strategy(Strategy::HexSwap)
//!     .with_seed(7);
//! let output = MixEngine::default().run_seeded(&request, &params);
//!
//! assert_eq!(output.to_wav_bytes().len(), primary.len());
//! # Ok::<(), wavmosh_engine::MoshError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`engine`] - [`MixEngine`] dispatch, requests, and outputs
//! - [`strategies`] - the five glitch strategies
//! - [`codec`] - 16/24-bit sample codecs
//! - [`energy`] - transient detection for glitch placement
//! - [`header`] - bits-per-sample lookup
//! - [`rng`] - deterministic random streams
//! - [`wav`] - canonical WAV framing and hashing

pub mod codec;
pub mod energy;
pub mod engine;
pub mod error;
pub mod header;
pub mod rng;
pub mod strategies;
pub mod wav;

pub use codec::{codec_for, BitDepth, PcmBuffer, SampleCodec};
pub use engine::{resolve_bit_depth, MixEngine, MoshOutput, MoshRequest};
pub use error::{MoshError, MoshResult, MoshWarning};
pub use rng::{create_rng, MoshRng};
pub use strategies::{GlitchInput, GlitchOutput, GlitchStrategy};
