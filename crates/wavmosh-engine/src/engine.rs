//! The mixing engine façade.
//!
//! [`MixEngine`] owns a validated [`MoshConfig`] and dispatches each call to
//! one strategy. It keeps no state between calls: the output depends only on
//! the request, the parameters, and the random stream.

use std::io::{self, Write};

use tracing::{debug, warn};
use wavmosh_spec::{GlitchParameters, MoshConfig, Preset, Strategy};

use crate::codec::BitDepth;
use crate::error::{MoshError, MoshResult, MoshWarning};
use crate::rng::{create_strategy_rng, MoshRng};
use crate::strategies::{build_strategy, GlitchInput};
use crate::wav::{pcm_hash, split_canonical, DeclaredSizes};

/// Inputs for one mixing call.
#[derive(Debug, Clone, Copy)]
pub struct MoshRequest<'a> {
    /// Header of the primary file, returned as-is except by header corruption.
    pub header: &'a [u8],
    /// Primary payload.
    pub primary: &'a [u8],
    /// Secondary payload.
    pub secondary: &'a [u8],
    /// Bits per sample declared by the primary header.
    pub bit_depth: u16,
}

impl<'a> MoshRequest<'a> {
    /// Builds a request from two complete WAV files.
    ///
    /// Both files are split at the canonical 44-byte boundary. The primary's
    /// declared depth governs decoding of both payloads.
    pub fn from_files(primary: &'a [u8], secondary: &'a [u8]) -> MoshResult<Self> {
        let primary = split_canonical(primary)?;
        let secondary = split_canonical(secondary)?;
        Ok(Self {
            header: primary.header,
            primary: primary.payload,
            secondary: secondary.payload,
            bit_depth: primary.bit_depth().unwrap_or(16),
        })
    }
}

/// Result of one mixing call.
#[derive(Debug, Clone, PartialEq)]
pub struct MoshOutput {
    /// Header to write before the payload.
    pub header: Vec<u8>,
    /// Mixed payload, same length as the primary payload.
    pub payload: Vec<u8>,
    /// Strategy that ran.
    pub strategy: Strategy,
    /// Depth the payloads were interpreted as.
    pub bit_depth: BitDepth,
    /// Glitch events applied.
    pub glitches_applied: usize,
    /// Policy decisions taken during the call.
    pub warnings: Vec<MoshWarning>,
    /// BLAKE3 hex digest of the payload.
    pub pcm_hash: String,
}

impl MoshOutput {
    /// Header followed by payload.
    pub fn to_wav_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.header.len() + self.payload.len());
        bytes.extend_from_slice(&self.header);
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Streams header then payload.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.header)?;
        writer.write_all(&self.payload)
    }

    /// Whether the header's RIFF and data size fields describe the payload.
    ///
    /// False for a primary with extra chunks or a corrupted header.
    pub fn declared_sizes_match(&self) -> bool {
        DeclaredSizes::read(&self.header).is_some_and(|sizes| sizes.matches(self.payload.len()))
    }
}

/// Resolves a declared depth, falling back to 16-bit for anything unsupported.
pub fn resolve_bit_depth(bits: u16) -> (BitDepth, Option<MoshWarning>) {
    match BitDepth::try_from(bits) {
        Ok(depth) => (depth, None),
        Err(_) => (BitDepth::Pcm16, Some(MoshWarning::UnsupportedBitDepth { bits })),
    }
}

/// Stateless dispatcher over the glitch strategies.
#[derive(Debug, Clone, Default)]
pub struct MixEngine {
    config: MoshConfig,
}

impl MixEngine {
    /// Creates an engine, refusing a configuration that fails validation.
    pub fn new(config: MoshConfig) -> MoshResult<Self> {
        config.validate().map_err(MoshError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// Creates an engine from a built-in preset.
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            config: MoshConfig::from_preset(preset),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &MoshConfig {
        &self.config
    }

    /// Runs `params.strategy` with the supplied random stream.
    ///
    /// Never fails: an unsupported depth falls back to 16-bit, a short or
    /// empty secondary is clamped or skipped, and an empty primary yields an
    /// empty payload. Each such decision is attached as a warning.
    pub fn run(
        &self,
        request: &MoshRequest<'_>,
        params: &GlitchParameters,
        rng: &mut dyn MoshRng,
    ) -> MoshOutput {
        let (depth, depth_warning) = resolve_bit_depth(request.bit_depth);
        let mut warnings: Vec<MoshWarning> = depth_warning.into_iter().collect();

        debug!(
            strategy = %params.strategy,
            intensity = params.intensity(),
            size = %params.size,
            bits = depth.bits(),
            primary_len = request.primary.len(),
            secondary_len = request.secondary.len(),
            "dispatching"
        );

        let (header, payload, glitches) = if request.primary.is_empty() {
            debug!("primary payload is empty");
            (request.header.to_vec(), Vec::new(), 0)
        } else {
            let input = GlitchInput {
                header: request.header,
                primary: request.primary,
                secondary: request.secondary,
                depth,
                intensity: params.intensity(),
                size: params.size,
            };
            let output = build_strategy(params.strategy, &self.config).apply(&input, rng);
            warnings.extend(output.warnings);
            (output.header, output.payload, output.glitches)
        };

        for warning in &warnings {
            warn!(code = warning.code(), "{}", warning);
        }

        MoshOutput {
            pcm_hash: pcm_hash(&payload),
            header,
            payload,
            strategy: params.strategy,
            bit_depth: depth,
            glitches_applied: glitches,
            warnings,
        }
    }

    /// Runs with a PCG32 stream derived from `params.seed` and the strategy.
    pub fn run_seeded(&self, request: &MoshRequest<'_>, params: &GlitchParameters) -> MoshOutput {
        let mut rng = create_strategy_rng(params.seed, params.strategy);
        self.run(request, params, &mut rng)
    }

    /// Runs a strategy given by name, falling back to smart mosh for unknown names.
    pub fn run_named(
        &self,
        request: &MoshRequest<'_>,
        params: &GlitchParameters,
        method: &str,
    ) -> MoshOutput {
        let (strategy, fell_back) = Strategy::from_name_lenient(method);
        let params = params.with_strategy(strategy);
        let mut output = self.run_seeded(request, &params);
        if fell_back {
            let warning = MoshWarning::StrategyFallback {
                requested: method.to_string(),
            };
            warn!(code = warning.code(), "{}", warning);
            output.warnings.insert(0, warning);
        }
        output
    }
}
