//! Canonical PCM header inspection.
//!
//! Only the bits-per-sample field is read. Validating the rest of the header
//! is the caller's job (see [`crate::wav::split_canonical`]).

/// Length of the canonical RIFF/WAVE PCM header.
pub const HEADER_LEN: usize = 44;

/// Byte offset of the little-endian bits-per-sample field.
pub const BITS_PER_SAMPLE_OFFSET: usize = 34;

/// Reads the bits-per-sample field.
///
/// Returns whatever value is stored, including depths the codec does not
/// support. Returns `None` if the header is too short to contain the field.
pub fn bit_depth(header: &[u8]) -> Option<u16> {
    let field = header.get(BITS_PER_SAMPLE_OFFSET..BITS_PER_SAMPLE_OFFSET + 2)?;
    Some(u16::from_le_bytes([field[0], field[1]]))
}
