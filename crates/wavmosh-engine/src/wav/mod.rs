//! Canonical WAV framing.
//!
//! The engine itself only sees header and payload slices. This module splits
//! files into those parts, writes fresh canonical files for tests and tools,
//! and hashes payloads.

mod format;
mod parts;
mod pcm;
mod writer;


pub use format::WavFormat;
pub use parts::{find_data_chunk, split_canonical, WavParts};
pub use pcm::pcm_hash;
pub use writer::{canonical_header, write_wav, write_wav_to_vec, DeclaredSizes};
