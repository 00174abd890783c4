//! Encoder configuration types and the configuration/input-shape error classes (§7).

use s2tc_common::ColorDistMetric;
use thiserror::Error;

/// Which of the three S3TC block layouts to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DxtMode {
    /// 8-byte block, 1-bit (punch-through) alpha via the color ramp's transparency mode.
    Dxt1,
    /// 16-byte block, 4-bit explicit per-pixel alpha.
    Dxt3,
    /// 16-byte block, 3-bit indexed alpha ramp.
    Dxt5,
}

impl DxtMode {
    /// Size in bytes of one encoded block.
    #[inline]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Dxt1 => 8,
            Self::Dxt3 | Self::Dxt5 => 16,
        }
    }
}

/// How the endpoint selector (§4.2) builds its candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateMode {
    /// Candidates are the tile's distinct pixel colors.
    Normal,
    /// [`Self::Normal`]'s candidates plus `k` synthetic colors drawn from the tile's
    /// axis-aligned bounding box.
    Random {
        /// Number of synthetic candidates to draw, and the PRNG seed to draw them with.
        count: u32,
        /// PRNG seed for this tile's synthetic candidate draw.
        seed: u64,
    },
    /// Skip the selector: keep the pixel nearest to, and farthest from, black under the
    /// active metric. Incompatible with [`ColorDistMetric::Normalmap`].
    Fast,
}

/// How many refinement iterations the driver performs after the initial pixel assignment
/// (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefineMode {
    /// Assign once; discard the sums. No refinement.
    Never,
    /// Replace endpoints with their assigned pixels' centroids, once, unconditionally.
    Always,
    /// Like [`Self::Always`], but roll back to the pre-refinement endpoints if they score
    /// better on the *same* indices.
    Check,
    /// Iterate [`Self::Check`] until an iteration fails to improve or the endpoints stop
    /// moving.
    Loop,
}

/// The encoder's full per-image configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodeConfig {
    /// Target block layout.
    pub dxt_mode: DxtMode,
    /// Perceptual distance metric.
    pub metric: ColorDistMetric,
    /// Endpoint candidate generation strategy.
    pub candidates: CandidateMode,
    /// Refinement iteration strategy.
    pub refine: RefineMode,
}

impl EncodeConfig {
    /// Validates a configuration against the combination restrictions in §4.2/§4.3,
    /// surfacing a [`ConfigError`] at the API boundary before any encoding begins (§7, class
    /// 1).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.candidates, CandidateMode::Fast)
            && !self.metric.supports_fast_candidates()
        {
            return Err(ConfigError::FastIncompatibleWithMetric(self.metric));
        }
        if let CandidateMode::Random { count, .. } = self.candidates {
            if count == 0 {
                return Err(ConfigError::ZeroRandomCandidates);
            }
        }
        Ok(())
    }
}

/// Configuration errors (§7, class 1): an invalid combination of otherwise-valid settings.
/// Surfaced at the API boundary before encoding begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The Fast candidate mode was requested together with a metric that does not support it
    /// (currently only NORMALMAP).
    #[error("candidate mode `Fast` is not compatible with metric {0:?}")]
    FastIncompatibleWithMetric(ColorDistMetric),
    /// `Random` candidate mode was requested with zero synthetic candidates; use `Normal`
    /// instead.
    #[error("random candidate mode requires a nonzero candidate count")]
    ZeroRandomCandidates,
}

/// Input-shape errors (§7, class 2): detected at the API boundary; the encoder refuses to
/// proceed rather than read out of bounds or divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputShapeError {
    /// `width` or `height` was zero.
    #[error("image dimensions must be nonzero (got {width}x{height})")]
    ZeroSizedImage {
        /// Image width in pixels, as passed by the caller.
        width: usize,
        /// Image height in pixels, as passed by the caller.
        height: usize,
    },
    /// The input row stride is narrower than the image width.
    #[error("input row stride ({stride} pixels) is narrower than the image width ({width} pixels)")]
    InputStrideTooNarrow {
        /// Stride in pixels, as passed by the caller.
        stride: usize,
        /// Image width in pixels, as passed by the caller.
        width: usize,
    },
    /// The output row stride is narrower than one row of blocks requires.
    #[error("output row stride ({stride} bytes) is narrower than one block row requires ({required} bytes)")]
    OutputStrideTooNarrow {
        /// Stride in bytes, as passed by the caller.
        stride: usize,
        /// Minimum stride in bytes required to hold one row of blocks.
        required: usize,
    },
}
