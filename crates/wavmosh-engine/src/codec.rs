//! PCM sample codecs keyed by bit depth.
//!
//! Samples are decoded to `i32` regardless of width so every strategy works on
//! one sample type. Channels are not modelled: interleaved data decodes to a
//! single flat sequence.

use crate::error::{MoshError, MoshResult};

/// Supported PCM bit depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 16-bit signed little-endian.
    Pcm16,
    /// 24-bit signed little-endian, packed in 3 bytes.
    Pcm24,
}

impl BitDepth {
    /// Bits per sample.
    pub fn bits(&self) -> u16 {
        match self {
            BitDepth::Pcm16 => 16,
            BitDepth::Pcm24 => 24,
        }
    }

    /// Codec for this depth.
    pub fn codec(&self) -> &'static dyn SampleCodec {
        codec_for(*self)
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = MoshError;

    fn try_from(bits: u16) -> MoshResult<Self> {
        match bits {
            16 => Ok(BitDepth::Pcm16),
            24 => Ok(BitDepth::Pcm24),
            _ => Err(MoshError::UnsupportedBitDepth { bits }),
        }
    }
}

/// Conversion between raw little-endian bytes and signed samples.
pub trait SampleCodec: Sync {
    /// Bytes occupied by one sample.
    fn bytes_per_sample(&self) -> usize;

    /// Smallest representable sample.
    fn min_value(&self) -> i32;

    /// Largest representable sample.
    fn max_value(&self) -> i32;

    /// Decodes whole samples; trailing bytes that do not fill a sample are ignored.
    fn decode(&self, bytes: &[u8]) -> Vec<i32>;

    /// Encodes samples, truncating each to the codec's width.
    fn encode(&self, samples: &[i32]) -> Vec<u8>;

    /// Number of whole samples in `byte_len` bytes.
    fn sample_count(&self, byte_len: usize) -> usize {
        byte_len / self.bytes_per_sample()
    }

    /// Clamps a value into the representable range.
    fn clamp(&self, value: i64) -> i32 {
        value.clamp(self.min_value() as i64, self.max_value() as i64) as i32
    }
}

/// 16-bit codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pcm16Codec;

impl SampleCodec for Pcm16Codec {
    fn bytes_per_sample(&self) -> usize {
        2
    }

    fn min_value(&self) -> i32 {
        i16::MIN as i32
    }

    fn max_value(&self) -> i32 {
        i16::MAX as i32
    }

    fn decode(&self, bytes: &[u8]) -> Vec<i32> {
        bytes
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]) as i32)
            .collect()
    }

    fn encode(&self, samples: &[i32]) -> Vec<u8> {
        let mut out = Vec::with_capacity(samples.len() * 2);
        for &sample in samples {
            out.extend_from_slice(&(sample as i16).to_le_bytes());
        }
        out
    }
}

/// 24-bit codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pcm24Codec;

const PCM24_MIN: i32 = -8_388_608;
const PCM24_MAX: i32 = 8_388_607;

impl SampleCodec for Pcm24Codec {
    fn bytes_per_sample(&self) -> usize {
        3
    }

    fn min_value(&self) -> i32 {
        PCM24_MIN
    }

    fn max_value(&self) -> i32 {
        PCM24_MAX
    }

    fn decode(&self, bytes: &[u8]) -> Vec<i32> {
        bytes
            .chunks_exact(3)
            // Place the 24 bits in the top of an i32, then shift back to sign-extend.
            .map(|b| i32::from_le_bytes([0, b[0], b[1], b[2]]) >> 8)
            .collect()
    }

    fn encode(&self, samples: &[i32]) -> Vec<u8> {
        let mut out = Vec::with_capacity(samples.len() * 3);
        for &sample in samples {
            let bytes = sample.to_le_bytes();
            out.extend_from_slice(&bytes[..3]);
        }
        out
    }
}

static PCM16: Pcm16Codec = Pcm16Codec;
static PCM24: Pcm24Codec = Pcm24Codec;

/// Returns the codec for a bit depth.
pub fn codec_for(depth: BitDepth) -> &'static dyn SampleCodec {
    match depth {
        BitDepth::Pcm16 => &PCM16,
        BitDepth::Pcm24 => &PCM24,
    }
}

/// A borrowed PCM byte region with its interpretation.
#[derive(Debug, Clone, Copy)]
pub struct PcmBuffer<'a> {
    bytes: &'a [u8],
    depth: BitDepth,
}

impl<'a> PcmBuffer<'a> {
    /// Wraps a byte region.
    pub fn new(bytes: &'a [u8], depth: BitDepth) -> Self {
        Self { bytes, depth }
    }

    /// Raw bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Declared depth.
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Number of whole samples.
    pub fn sample_count(&self) -> usize {
        self.depth.codec().sample_count(self.bytes.len())
    }

    /// Smallest sample value for the depth.
    pub fn min_value(&self) -> i32 {
        self.depth.codec().min_value()
    }

    /// Largest sample value for the depth.
    pub fn max_value(&self) -> i32 {
        self.depth.codec().max_value()
    }

    /// Decodes all whole samples.
    pub fn decode(&self) -> Vec<i32> {
        self.depth.codec().decode(self.bytes)
    }

    /// Bytes after the last whole sample.
    pub fn trailing_bytes(&self) -> &'a [u8] {
        let whole = self.sample_count() * self.depth.codec().bytes_per_sample();
        &self.bytes[whole..]
    }
}
