//! Canonical header construction and size-field checks.
//!
//! A mixed file is the primary's header followed by the new payload. The
//! header is never rewritten, so its RIFF and data size fields are only
//! correct when the primary was canonical. [`DeclaredSizes`] reports whether
//! they still describe the payload.

use std::io::{self, Write};

use super::format::WavFormat;
use crate::header::HEADER_LEN;

const RIFF_SIZE_OFFSET: usize = 4;
const DATA_SIZE_OFFSET: usize = 40;

/// RIFF size of a canonical file: everything after the 8-byte RIFF preamble.
fn riff_size(data_len: u32) -> u32 {
    data_len.saturating_add(HEADER_LEN as u32 - 8)
}

/// Builds a canonical 44-byte PCM header.
///
/// Fields too large for their slot saturate instead of wrapping.
pub fn canonical_header(format: &WavFormat, data_len: usize) -> [u8; HEADER_LEN] {
    let data_len = u32::try_from(data_len).unwrap_or(u32::MAX);
    let byte_rate = u32::try_from(format.byte_rate()).unwrap_or(u32::MAX);
    let block_align = u16::try_from(format.block_align()).unwrap_or(u16::MAX);

    let mut header = [0u8; HEADER_LEN];
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&riff_size(data_len).to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
    header[22..24].copy_from_slice(&format.channels.to_le_bytes());
    header[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());
    header
}

/// Writes a canonical header followed by the payload.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, payload: &[u8]) -> io::Result<()> {
    writer.write_all(&canonical_header(format, payload.len()))?;
    writer.write_all(payload)
}

/// A canonical WAV file as bytes.
pub fn write_wav_to_vec(format: &WavFormat, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&canonical_header(format, payload.len()));
    bytes.extend_from_slice(payload);
    bytes
}

/// The size fields a header declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredSizes {
    /// Bytes after the RIFF preamble.
    pub riff: u32,
    /// Bytes in the data chunk.
    pub data: u32,
}

impl DeclaredSizes {
    /// Reads both fields. Returns `None` for a header shorter than 44 bytes.
    pub fn read(header: &[u8]) -> Option<Self> {
        if header.len() < HEADER_LEN {
            return None;
        }
        let field = |at: usize| {
            u32::from_le_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]])
        };
        Some(Self {
            riff: field(RIFF_SIZE_OFFSET),
            data: field(DATA_SIZE_OFFSET),
        })
    }

    /// Whether both fields describe a canonical file with this payload.
    pub fn matches(&self, payload_len: usize) -> bool {
        match u32::try_from(payload_len) {
            Ok(len) => self.data == len && self.riff == riff_size(len),
            Err(_) => false,
        }
    }
}
