//! Top-level encoder entry point (§6): drives the tile reader, selector, assigner, refinement
//! driver, and bit packer over a whole image, one block at a time.

use crate::config::{CandidateMode, DxtMode, EncodeConfig, InputShapeError};
use crate::pack::{pack_dxt1, pack_dxt3, pack_dxt5};
use crate::refine::{refine_alpha, refine_color};
use crate::selector::{select_alpha_endpoints, select_color_endpoints};
use crate::tile::Tile;
use thiserror::Error;

/// Errors an `encode_image` caller can receive: a bad configuration (§7, class 1) or a bad
/// input shape (§7, class 2). Both are caught at the API boundary before any block is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The supplied [`EncodeConfig`] combines settings that aren't allowed together.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    /// The supplied image dimensions or strides can't be encoded.
    #[error(transparent)]
    InputShape(#[from] InputShapeError),
}

#[inline]
fn div_round_up(n: usize, d: usize) -> usize {
    (n + d - 1) / d
}

/// Mixes a block's `(bx, by)` coordinates into a base seed so that [`CandidateMode::Random`]
/// draws independent synthetic candidates per tile instead of repeating the same draw for
/// every block in the image, while remaining fully deterministic for a given base seed.
///
/// A splitmix64-style finalizer; only used to decorrelate per-tile draws, not as a
/// cryptographic or statistical primitive.
#[inline]
fn mix_seed(seed: u64, bx: usize, by: usize) -> u64 {
    let mut z = seed
        ^ (bx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (by as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn tile_candidates(candidates: CandidateMode, bx: usize, by: usize) -> CandidateMode {
    match candidates {
        CandidateMode::Random { count, seed } => {
            CandidateMode::Random { count, seed: mix_seed(seed, bx, by) }
        }
        other => other,
    }
}

/// Encodes one already-read tile into a block of `config.dxt_mode.block_size()` bytes.
///
/// Exposed separately from [`encode_image`] so callers that already have their own tiling
/// (e.g. a transcoder re-encoding a single changed block) don't have to round-trip through a
/// whole image buffer.
pub fn encode_tile(tile: &Tile, config: &EncodeConfig, bx: usize, by: usize, out: &mut [u8]) {
    debug_assert_eq!(out.len(), config.dxt_mode.block_size());
    let candidates = tile_candidates(config.candidates, bx, by);

    match config.dxt_mode {
        DxtMode::Dxt1 => {
            let initial = select_color_endpoints(tile, config.metric, candidates);
            let (endpoints, indices) =
                refine_color(tile, initial, config.metric, DxtMode::Dxt1, config.refine, None);
            let has_transparent_pixel = indices.iter().any(|&i| i == 3);
            out.copy_from_slice(&pack_dxt1(endpoints, indices, has_transparent_pixel));
        }
        DxtMode::Dxt3 => {
            let initial = select_color_endpoints(tile, config.metric, candidates);
            let (endpoints, indices) =
                refine_color(tile, initial, config.metric, DxtMode::Dxt3, config.refine, None);
            let mut alpha = [0u8; 16];
            for (idx, pixel) in tile.iter() {
                alpha[idx as usize] = pixel.alpha;
            }
            out.copy_from_slice(&pack_dxt3(endpoints, indices, &alpha));
        }
        DxtMode::Dxt5 => {
            let initial_alpha = select_alpha_endpoints(tile, candidates);
            let (alpha_endpoints, alpha_indices) = refine_alpha(tile, initial_alpha, config.refine);
            let initial_color = select_color_endpoints(tile, config.metric, candidates);
            let (color_endpoints, color_indices) = refine_color(
                tile,
                initial_color,
                config.metric,
                DxtMode::Dxt5,
                config.refine,
                Some(&alpha_indices),
            );
            out.copy_from_slice(&pack_dxt5(
                color_endpoints,
                color_indices,
                alpha_endpoints,
                alpha_indices,
            ));
        }
    }
}

/// Encodes a whole `width`x`height` RGBA8 image into S2TC-conformant blocks, row-major, 4
/// pixel rows per block row, per §6.
///
/// `input_rgba` holds `height` rows of `input_row_stride_in_pixels` pixels (4 bytes each); a
/// row may be wider than `width` (the extra pixels are ignored) but never narrower.
/// `output_bytes` receives `div_round_up(height, 4)` block rows of
/// `div_round_up(width, 4)` blocks, each `config.dxt_mode.block_size()` bytes, at
/// `output_row_stride_in_bytes` per block row; the stride may exceed the minimum required but
/// never fall short of it.
///
/// The caller is responsible for `input_rgba`/`output_bytes` being large enough to hold the
/// strides and dimensions passed in; this function does not allocate and trusts the slices it
/// is given the way a raw-buffer C API would.
#[allow(clippy::too_many_arguments)]
pub fn encode_image(
    width: usize,
    height: usize,
    input_rgba: &[u8],
    input_row_stride_in_pixels: usize,
    output_bytes: &mut [u8],
    output_row_stride_in_bytes: usize,
    config: &EncodeConfig,
) -> Result<(), EncodeError> {
    config.validate()?;

    if width == 0 || height == 0 {
        return Err(InputShapeError::ZeroSizedImage { width, height }.into());
    }
    if input_row_stride_in_pixels < width {
        return Err(
            InputShapeError::InputStrideTooNarrow { stride: input_row_stride_in_pixels, width }
                .into(),
        );
    }
    let block_size = config.dxt_mode.block_size();
    let blocks_wide = div_round_up(width, 4);
    let blocks_high = div_round_up(height, 4);
    let required_stride = blocks_wide * block_size;
    if output_row_stride_in_bytes < required_stride {
        return Err(InputShapeError::OutputStrideTooNarrow {
            stride: output_row_stride_in_bytes,
            required: required_stride,
        }
        .into());
    }

    for by in 0..blocks_high {
        for bx in 0..blocks_wide {
            let tile = Tile::read(input_rgba, width, height, input_row_stride_in_pixels, bx, by);
            let offset = by * output_row_stride_in_bytes + bx * block_size;
            encode_tile(&tile, config, bx, by, &mut output_bytes[offset..offset + block_size]);
        }
    }

    Ok(())
}
