//! Splitting files into header and payload.

use std::ops::Range;

use crate::error::{MoshError, MoshResult};
use crate::header::{bit_depth, HEADER_LEN};

use super::format::WavFormat;

/// A file split at the canonical header boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavParts<'a> {
    /// First 44 bytes.
    pub header: &'a [u8],
    /// Everything after the header.
    pub payload: &'a [u8],
}

impl<'a> WavParts<'a> {
    /// Declared bits per sample.
    pub fn bit_depth(&self) -> Option<u16> {
        bit_depth(self.header)
    }

    /// Declared format fields.
    pub fn format(&self) -> Option<WavFormat> {
        WavFormat::from_header(self.header)
    }

    /// `true` if the file's `data` chunk starts right after the header.
    ///
    /// Files with extra chunks (LIST, fact, extended fmt) still split at 44
    /// bytes, so their metadata ends up in the payload.
    pub fn is_canonical(&self, file: &[u8]) -> bool {
        find_data_chunk(file).is_some_and(|range| range.start == HEADER_LEN)
    }
}

/// Splits a file at byte 44 after checking the RIFF and WAVE tags.
pub fn split_canonical(file: &[u8]) -> MoshResult<WavParts<'_>> {
    if file.len() < HEADER_LEN {
        return Err(MoshError::HeaderTooShort {
            expected: HEADER_LEN,
            actual: file.len(),
        });
    }
    if &file[0..4] != b"RIFF" || &file[8..12] != b"WAVE" {
        return Err(MoshError::NotRiffWave);
    }
    let (header, payload) = file.split_at(HEADER_LEN);
    Ok(WavParts { header, payload })
}

/// Locates the `data` chunk body by walking the chunk list.
///
/// Returns `None` if the file is not RIFF/WAVE or has no complete data chunk.
pub fn find_data_chunk(file: &[u8]) -> Option<Range<usize>> {
    if file.len() < 12 || &file[0..4] != b"RIFF" || &file[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= file.len() {
        let id = &file[pos..pos + 4];
        let size = u32::from_le_bytes([file[pos + 4], file[pos + 5], file[pos + 6], file[pos + 7]])
            as usize;

        if id == b"data" {
            let start = pos + 8;
            let end = start.checked_add(size)?;
            return (end <= file.len()).then_some(start..end);
        }

        pos = pos.checked_add(8 + size)?;
        // Chunks are word aligned.
        if size % 2 == 1 {
            pos += 1;
        }
    }

    None
}
