//! WAV format fields.

use crate::codec::BitDepth;
use crate::header::BITS_PER_SAMPLE_OFFSET;

const CHANNELS_OFFSET: usize = 22;
const SAMPLE_RATE_OFFSET: usize = 24;

/// WAV format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a mono format.
    pub fn mono(sample_rate: u32, depth: BitDepth) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: depth.bits(),
        }
    }

    /// Creates a stereo format.
    pub fn stereo(sample_rate: u32, depth: BitDepth) -> Self {
        Self {
            channels: 2,
            ..Self::mono(sample_rate, depth)
        }
    }

    /// Reads the format fields of a canonical header.
    ///
    /// Returns `None` if the header is too short.
    pub fn from_header(header: &[u8]) -> Option<Self> {
        let channels = header.get(CHANNELS_OFFSET..CHANNELS_OFFSET + 2)?;
        let rate = header.get(SAMPLE_RATE_OFFSET..SAMPLE_RATE_OFFSET + 4)?;
        let bits = header.get(BITS_PER_SAMPLE_OFFSET..BITS_PER_SAMPLE_OFFSET + 2)?;
        Some(Self {
            channels: u16::from_le_bytes([channels[0], channels[1]]),
            sample_rate: u32::from_le_bytes([rate[0], rate[1], rate[2], rate[3]]),
            bits_per_sample: u16::from_le_bytes([bits[0], bits[1]]),
        })
    }

    /// Bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes per sample frame.
    ///
    /// Widened so any header values, however bogus, fit.
    pub fn block_align(&self) -> u32 {
        self.channels as u32 * self.bytes_per_sample() as u32
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u64 {
        self.sample_rate as u64 * self.block_align() as u64
    }

    /// Duration of a payload in seconds, or 0 for a degenerate format.
    pub fn duration_seconds(&self, payload_len: usize) -> f64 {
        match self.byte_rate() {
            0 => 0.0,
            rate => payload_len as f64 / rate as f64,
        }
    }
}
