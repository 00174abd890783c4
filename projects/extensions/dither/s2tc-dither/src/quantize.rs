//! The dither front-end's public entry point (§4.7): quantizes an RGBA8 image down to
//! R5G6B5A{1,4,8} and widens every channel back to its 8-bit decode reconstruction, so the
//! result can be fed directly into `s2tc_encoder::encode_image`'s `input_rgba` parameter
//! unchanged.

use crate::diffuse::{diffuse, diffuse1, floyd, floyd1, widen, widen1};
use crate::strategy::{AlphaBits, DitherStrategy};
use alloc::vec;
use alloc::vec::Vec;
use thiserror::Error;

/// R/G/B quantization shifts: 5, 6, 5 bits respectively.
const SHIFT_R: u32 = 3;
const SHIFT_G: u32 = 2;
const SHIFT_B: u32 = 3;

/// Input-shape errors for the dither front-end, mirroring the core encoder's class-2 errors
/// (§7) at this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DitherError {
    /// `width` or `height` was zero.
    #[error("image dimensions must be nonzero (got {width}x{height})")]
    ZeroSizedImage {
        /// Image width in pixels, as passed by the caller.
        width: usize,
        /// Image height in pixels, as passed by the caller.
        height: usize,
    },
    /// The source row stride is narrower than the image width.
    #[error("source row stride ({stride} pixels) is narrower than the image width ({width} pixels)")]
    SrcStrideTooNarrow {
        /// Stride in pixels, as passed by the caller.
        stride: usize,
        /// Image width in pixels, as passed by the caller.
        width: usize,
    },
    /// The destination row stride is narrower than the image width.
    #[error("destination row stride ({stride} pixels) is narrower than the image width ({width} pixels)")]
    DstStrideTooNarrow {
        /// Stride in pixels, as passed by the caller.
        stride: usize,
        /// Image width in pixels, as passed by the caller.
        width: usize,
    },
}

#[inline]
fn diffuse_alpha(diff: &mut i32, src: i32, alpha_bits: AlphaBits) -> i32 {
    match alpha_bits {
        AlphaBits::One => diffuse1(diff, src),
        other => diffuse(diff, src, other.shift()),
    }
}

#[inline]
fn widen_alpha(code: i32, alpha_bits: AlphaBits) -> i32 {
    match alpha_bits {
        AlphaBits::One => widen1(code),
        other => widen(code, other.shift()),
    }
}

/// A per-channel rolling error-row pair for Floyd-Steinberg, padded with a one-element margin
/// on each side so neighbor writes never need bounds checks (§4.7).
struct FloydChannel {
    thisrow: Vec<i32>,
    downrow: Vec<i32>,
}

impl FloydChannel {
    fn new(width: usize) -> Self {
        let n = width + 2;
        Self { thisrow: vec![0i32; n], downrow: vec![0i32; n] }
    }

    fn advance_row(&mut self) {
        core::mem::swap(&mut self.thisrow, &mut self.downrow);
        for v in self.downrow.iter_mut() {
            *v = 0;
        }
    }
}

/// Quantizes an RGBA8 `width`x`height` image to R5G6B5A{1,4,8} under `strategy`, writing the
/// result back as RGBA8 with each channel widened to its simulated-decode 8-bit
/// reconstruction.
///
/// `src_rgba`/`dst_rgba` hold `height` rows of 4-byte RGBA pixels at
/// `src_row_stride_in_pixels`/`dst_row_stride_in_pixels` pixels per row respectively (a row may
/// be wider than `width`, but never narrower).
#[allow(clippy::too_many_arguments)]
pub fn dither_rgba(
    width: usize,
    height: usize,
    src_rgba: &[u8],
    src_row_stride_in_pixels: usize,
    dst_rgba: &mut [u8],
    dst_row_stride_in_pixels: usize,
    strategy: DitherStrategy,
    alpha_bits: AlphaBits,
) -> Result<(), DitherError> {
    if width == 0 || height == 0 {
        return Err(DitherError::ZeroSizedImage { width, height });
    }
    if src_row_stride_in_pixels < width {
        return Err(DitherError::SrcStrideTooNarrow { stride: src_row_stride_in_pixels, width });
    }
    if dst_row_stride_in_pixels < width {
        return Err(DitherError::DstStrideTooNarrow { stride: dst_row_stride_in_pixels, width });
    }

    match strategy {
        DitherStrategy::None => {
            for y in 0..height {
                for x in 0..width {
                    let src = (y * src_row_stride_in_pixels + x) * 4;
                    let dst = (y * dst_row_stride_in_pixels + x) * 4;
                    dst_rgba[dst] = widen((src_rgba[src] as i32) >> SHIFT_R, SHIFT_R) as u8;
                    dst_rgba[dst + 1] = widen((src_rgba[src + 1] as i32) >> SHIFT_G, SHIFT_G) as u8;
                    dst_rgba[dst + 2] = widen((src_rgba[src + 2] as i32) >> SHIFT_B, SHIFT_B) as u8;
                    let a_code = match alpha_bits {
                        AlphaBits::One => i32::from(src_rgba[src + 3] >= 128),
                        other => (src_rgba[src + 3] as i32) >> other.shift(),
                    };
                    dst_rgba[dst + 3] = widen_alpha(a_code, alpha_bits) as u8;
                }
            }
        }
        DitherStrategy::Simple => {
            for y in 0..height {
                let (mut r_diff, mut g_diff, mut b_diff, mut a_diff) = (0i32, 0i32, 0i32, 0i32);
                for x in 0..width {
                    let src = (y * src_row_stride_in_pixels + x) * 4;
                    let dst = (y * dst_row_stride_in_pixels + x) * 4;
                    let r = diffuse(&mut r_diff, src_rgba[src] as i32, SHIFT_R);
                    let g = diffuse(&mut g_diff, src_rgba[src + 1] as i32, SHIFT_G);
                    let b = diffuse(&mut b_diff, src_rgba[src + 2] as i32, SHIFT_B);
                    let a = diffuse_alpha(&mut a_diff, src_rgba[src + 3] as i32, alpha_bits);
                    dst_rgba[dst] = widen(r, SHIFT_R) as u8;
                    dst_rgba[dst + 1] = widen(g, SHIFT_G) as u8;
                    dst_rgba[dst + 2] = widen(b, SHIFT_B) as u8;
                    dst_rgba[dst + 3] = widen_alpha(a, alpha_bits) as u8;
                }
            }
        }
        DitherStrategy::FloydSteinberg => {
            let mut r_ch = FloydChannel::new(width);
            let mut g_ch = FloydChannel::new(width);
            let mut b_ch = FloydChannel::new(width);
            let mut a_ch = FloydChannel::new(width);
            for y in 0..height {
                for x in 0..width {
                    let src = (y * src_row_stride_in_pixels + x) * 4;
                    let dst = (y * dst_row_stride_in_pixels + x) * 4;
                    let r = floyd(&mut r_ch.thisrow, &mut r_ch.downrow, x, src_rgba[src] as i32, SHIFT_R);
                    let g =
                        floyd(&mut g_ch.thisrow, &mut g_ch.downrow, x, src_rgba[src + 1] as i32, SHIFT_G);
                    let b =
                        floyd(&mut b_ch.thisrow, &mut b_ch.downrow, x, src_rgba[src + 2] as i32, SHIFT_B);
                    let a = match alpha_bits {
                        AlphaBits::One => {
                            floyd1(&mut a_ch.thisrow, &mut a_ch.downrow, x, src_rgba[src + 3] as i32)
                        }
                        other => floyd(
                            &mut a_ch.thisrow,
                            &mut a_ch.downrow,
                            x,
                            src_rgba[src + 3] as i32,
                            other.shift(),
                        ),
                    };
                    dst_rgba[dst] = widen(r, SHIFT_R) as u8;
                    dst_rgba[dst + 1] = widen(g, SHIFT_G) as u8;
                    dst_rgba[dst + 2] = widen(b, SHIFT_B) as u8;
                    dst_rgba[dst + 3] = widen_alpha(a, alpha_bits) as u8;
                }
                r_ch.advance_row();
                g_ch.advance_row();
                b_ch.advance_row();
                a_ch.advance_row();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(w: usize, h: usize, rgba: [u8; 4]) -> Vec<u8> {
        let mut v = Vec::with_capacity(w * h * 4);
        for _ in 0..(w * h) {
            v.extend_from_slice(&rgba);
        }
        v
    }

    #[test]
    fn rejects_zero_sized_image() {
        let mut out = [0u8; 4];
        let err = dither_rgba(0, 1, &[], 0, &mut out, 1, DitherStrategy::None, AlphaBits::Eight)
            .unwrap_err();
        assert!(matches!(err, DitherError::ZeroSizedImage { .. }));
    }

    #[test]
    fn none_strategy_truncates_to_exact_levels_without_loss() {
        // 0xF8 = 11111000 round-trips exactly through 5-bit truncate+widen.
        let img = solid_image(2, 2, [0xF8, 0xFC, 0xF8, 0xFF]);
        let mut out = vec![0u8; img.len()];
        dither_rgba(2, 2, &img, 2, &mut out, 2, DitherStrategy::None, AlphaBits::Eight).unwrap();
        assert_eq!(&out[0..4], &[0xF8, 0xFC, 0xF8, 0xFF]);
    }

    #[test]
    fn eight_bit_alpha_is_never_perturbed_by_any_strategy() {
        let img = solid_image(4, 4, [10, 20, 30, 137]);
        for strategy in [DitherStrategy::None, DitherStrategy::Simple, DitherStrategy::FloydSteinberg] {
            let mut out = vec![0u8; img.len()];
            dither_rgba(4, 4, &img, 4, &mut out, 4, strategy, AlphaBits::Eight).unwrap();
            for chunk in out.chunks(4) {
                assert_eq!(chunk[3], 137);
            }
        }
    }

    #[test]
    fn one_bit_alpha_quantizes_to_only_the_two_sentinels() {
        let mut img = Vec::new();
        for a in [0u8, 50, 127, 128, 200, 255] {
            img.extend_from_slice(&[0, 0, 0, a]);
        }
        let mut out = vec![0u8; img.len()];
        dither_rgba(6, 1, &img, 6, &mut out, 6, DitherStrategy::None, AlphaBits::One).unwrap();
        for chunk in out.chunks(4) {
            assert!(chunk[3] == 0 || chunk[3] == 255);
        }
    }

    #[test]
    fn floyd_steinberg_matches_simple_on_a_flat_exact_level_image() {
        let img = solid_image(6, 5, [0xF8, 0xFC, 0xF8, 0xFF]);
        let mut simple = vec![0u8; img.len()];
        let mut floyd = vec![0u8; img.len()];
        dither_rgba(6, 5, &img, 6, &mut simple, 6, DitherStrategy::Simple, AlphaBits::Four).unwrap();
        dither_rgba(6, 5, &img, 6, &mut floyd, 6, DitherStrategy::FloydSteinberg, AlphaBits::Four)
            .unwrap();
        // An image already at an exact quantization level carries zero error regardless of
        // strategy, so both must reproduce the source color channels unchanged.
        for (s, f) in simple.chunks(4).zip(floyd.chunks(4)) {
            assert_eq!(s[0], f[0]);
            assert_eq!(s[1], f[1]);
            assert_eq!(s[2], f[2]);
        }
    }

    #[test]
    fn floyd_steinberg_resets_between_rows_independently_per_channel() {
        // A gradient that would accumulate very different error if rows leaked into each
        // other; just check it runs and produces valid 5/6/5-quantized levels.
        let mut img = Vec::new();
        for y in 0..4u8 {
            for x in 0..4u8 {
                img.extend_from_slice(&[x * 17, y * 17, (x + y) * 8, 255]);
            }
        }
        let mut out = vec![0u8; img.len()];
        dither_rgba(4, 4, &img, 4, &mut out, 4, DitherStrategy::FloydSteinberg, AlphaBits::Eight)
            .unwrap();
        for chunk in out.chunks(4) {
            // Widened 5-bit reconstruction only ever takes one of 32 distinct values.
            assert_eq!(chunk[0] & 0b0000_0111, chunk[0] >> 5);
        }
    }
}
