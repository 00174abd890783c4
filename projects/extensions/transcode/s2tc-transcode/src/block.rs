//! Per-block S3TC -> S2TC rewriter (§4.6): branch-free bit-parallel masking that collapses
//! the interpolated 2/3:1/3 ramp entries onto one of the two endpoints, then fixes up the
//! endpoint order (and the indices that depend on it) to match the result.

/// Which S3TC block layout a block being transcoded uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFormat {
    /// 8-byte block, optional 1-bit punch-through alpha.
    Dxt1,
    /// 16-byte block, 4-bit explicit per-pixel alpha.
    Dxt3,
    /// 16-byte block, 3-bit indexed alpha ramp.
    Dxt5,
}

impl BlockFormat {
    /// Size in bytes of one block in this layout.
    #[inline]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Dxt1 => 8,
            Self::Dxt3 | Self::Dxt5 => 16,
        }
    }
}

/// Collapses a 2-bit-per-pixel color index word where no index can legitimately mean
/// "transparent": both interpolated codepoints (`10`, `11`) fold onto `00`/`01`.
///
/// `00 -> 00`, `01 -> 01`, `10 -> 00 or 01`, `11 -> 00 or 01`.
#[inline]
fn collapse_color_opaque(pixels: u32) -> u32 {
    (pixels & ((!pixels & 0xAAAA_AAAA) >> 1)) | ((pixels & 0x2288_2288) >> 1)
}

/// Collapses a 2-bit-per-pixel color index word where `11` means "transparent" and must
/// survive: only `10` folds onto `00`/`01`; `11` is left untouched.
///
/// `00 -> 00`, `01 -> 01`, `10 -> 00 or 01`, `11 -> 11`.
#[inline]
fn collapse_color_preserve_transparent(pixels: u32) -> u32 {
    (pixels & !((!pixels & 0x5555_5555) << 1)) | ((pixels & 0x2288_2288) >> 1)
}

/// Flips the low bit of every 2-bit group whose high bit is `0` (i.e. swaps index `0 <-> 1`
/// while leaving index `3`, the transparency marker, untouched). Branch-free equivalent of
/// `for each group: if group & 0b10 == 0 { group ^= 1 }`.
#[inline]
fn flip_low_bit_unless_high_bit_set(pixels: u32) -> u32 {
    pixels ^ ((!pixels & 0xAAAA_AAAA) >> 1)
}

fn read_color_half(buf: &[u8]) -> (u16, u16, u32) {
    let c0 = u16::from_le_bytes([buf[0], buf[1]]);
    let c1 = u16::from_le_bytes([buf[2], buf[3]]);
    let pixels = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    (c0, c1, pixels)
}

fn write_color_half(buf: &mut [u8], c0: u16, c1: u16, pixels: u32) {
    buf[0..2].copy_from_slice(&c0.to_le_bytes());
    buf[2..4].copy_from_slice(&c1.to_le_bytes());
    buf[4..8].copy_from_slice(&pixels.to_le_bytes());
}

/// Transcodes one color half (8 bytes: 2 endpoints + 2-bit index word).
///
/// `allow_transparency` selects which of the two S3TC decode conventions this half could
/// currently be using: `true` for a full DXT1 block (where `c0 <= c1` selects the
/// 3-color-plus-transparent ramp and index `3` is a real transparency marker), `false` for
/// DXT3/DXT5's color half (which never has transparency semantics, regardless of endpoint
/// order).
///
/// Unlike the reference implementation's block-layout-preserving heuristic, the final
/// endpoint order here is decided by whether index `3` actually survives in this block after
/// collapsing — matching this crate family's own canonicalization invariant (DXT1: `c0 < c1`
/// iff an index-3 pixel is present; DXT3/DXT5 color: `c0 >= c1` always) rather than blindly
/// trusting the input block's pre-existing mode bit. This makes the transform idempotent on
/// this family's own encoder output (property 5) without depending on the input already being
/// well-formed.
fn transcode_color_half(buf: &mut [u8], allow_transparency: bool) {
    let (c0, c1, pixels) = read_color_half(buf);

    if !allow_transparency {
        let pixels = collapse_color_opaque(pixels);
        if c0 < c1 {
            write_color_half(buf, c1, c0, pixels ^ 0x5555_5555);
        } else {
            write_color_half(buf, c0, c1, pixels);
        }
        return;
    }

    let currently_alpha_capable = c1 >= c0;
    let pixels = if currently_alpha_capable {
        collapse_color_preserve_transparent(pixels)
    } else {
        collapse_color_opaque(pixels)
    };
    let has_transparent_pixel = (0..16).any(|i| (pixels >> (i * 2)) & 0b11 == 3);
    let want_c0_ge_c1 = !has_transparent_pixel;
    let currently_c0_ge_c1 = c0 >= c1;

    if currently_c0_ge_c1 != want_c0_ge_c1 {
        write_color_half(buf, c1, c0, flip_low_bit_unless_high_bit_set(pixels));
    } else {
        write_color_half(buf, c0, c1, pixels);
    }
}

/// Collapses a 3-bit-per-pixel alpha index word assuming `a0 <= a1` (the 6-entry ramp:
/// indices 6/7 are the literal 0/255 sentinels and must survive): `010`/`011` fold to
/// `000`/`001`, `100`/`101` fold to `001`/`000`, `110`/`111` (the sentinels) are untouched.
#[inline]
fn collapse_alpha_six_entry(pixels: u64) -> u64 {
    let indicator = ((pixels >> 1) ^ (pixels >> 2)) & 0x1111_1111_1111u64;
    (pixels & !(indicator * 7)) | ((indicator & 0x0101_0101_0101u64) * 7)
}

/// Collapses a 3-bit-per-pixel alpha index word assuming `a0 > a1` (the 8-entry interpolated
/// ramp, which S2TC never wants): everything except `000`/`001` folds toward them, including
/// what would otherwise be the `110`/`111` interior points of this ramp (they are *not*
/// sentinels in this mode).
#[inline]
fn collapse_alpha_eight_entry(pixels: u64) -> u64 {
    let indicator = ((pixels >> 1) | (pixels >> 2)) & 0x1111_1111_1111u64;
    (pixels & !(indicator * 7)) | ((indicator & 0x0101_0101_0101u64) * 7)
}

fn read_alpha_half(buf: &[u8]) -> (u8, u8, u64) {
    let a0 = buf[0];
    let a1 = buf[1];
    let mut pixels = 0u64;
    for (i, &b) in buf[2..8].iter().enumerate() {
        pixels |= (b as u64) << (i * 8);
    }
    (a0, a1, pixels)
}

fn write_alpha_half(buf: &mut [u8], a0: u8, a1: u8, pixels: u64) {
    buf[0] = a0;
    buf[1] = a1;
    let bytes = pixels.to_le_bytes();
    buf[2..8].copy_from_slice(&bytes[..6]);
}

/// Transcodes the DXT5 alpha half (8 bytes: 2 endpoints + 48-bit index word), per §4.6's
/// bit-parallel masking, ported from the reference implementation's octal mask ladder.
fn transcode_alpha_half(buf: &mut [u8]) {
    let (a0, a1, pixels) = read_alpha_half(buf);

    let (a0, a1, pixels) = if a1 >= a0 {
        (a0, a1, collapse_alpha_six_entry(pixels))
    } else {
        let collapsed = collapse_alpha_eight_entry(pixels);
        (a1, a0, collapsed ^ 0x0001_1111_1111_1111u64)
    };

    // Constant-alpha degeneracy (matches the core encoder's packer, §4.5): a 7-entry ramp
    // would be needed to express a flat non-sentinel value with a0 == a1, so collapse every
    // non-sentinel index down to 0 rather than leave an undefined ramp entry referenced.
    let pixels = if a0 == a1 {
        let mut out = 0u64;
        for i in 0..16u32 {
            let v = (pixels >> (i * 3)) & 0b111;
            let v = if v == 0 || v == 1 { 0 } else { v };
            out |= v << (i * 3);
        }
        out
    } else {
        pixels
    };

    write_alpha_half(buf, a0, a1, pixels);
}

/// Rewrites `block` (`format.block_size()` bytes) in place so it conforms to this crate
/// family's S2TC restriction: never uses the interpolated ramp codepoints.
pub fn transcode_block(format: BlockFormat, block: &mut [u8]) {
    debug_assert_eq!(block.len(), format.block_size());
    match format {
        BlockFormat::Dxt1 => transcode_color_half(&mut block[0..8], true),
        BlockFormat::Dxt3 => transcode_color_half(&mut block[8..16], false),
        BlockFormat::Dxt5 => {
            transcode_alpha_half(&mut block[0..8]);
            transcode_color_half(&mut block[8..16], false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_index_words(buf: &[u8; 8]) -> (u16, u16, u32) {
        read_color_half(buf)
    }

    #[test]
    fn opaque_block_never_leaves_reserved_codepoint_two_or_three() {
        // c0 < c1 (currently "alpha capable" but allow_transparency=false, as for DXT3/DXT5
        // color), indices use every 2-bit pattern.
        let mut buf = [0x00u8, 0x00, 0xFF, 0xFF, 0b11_10_01_00, 0b11_10_01_00, 0, 0];
        transcode_color_half(&mut buf, false);
        let (_, _, pixels) = color_index_words(&buf);
        for i in 0..16 {
            let v = (pixels >> (i * 2)) & 0b11;
            assert_ne!(v, 2);
        }
    }

    #[test]
    fn opaque_color_half_ends_with_c0_gte_c1() {
        let mut buf = [0x00u8, 0x00, 0xFF, 0xFF, 0, 0, 0, 0];
        transcode_color_half(&mut buf, false);
        let (c0, c1, _) = color_index_words(&buf);
        assert!(c0 >= c1);
    }

    #[test]
    fn dxt1_block_with_transparent_pixel_ends_with_c0_lt_c1_and_index_three_preserved() {
        // Already "alpha capable" order (c0 < c1), first pixel index 3 (transparent).
        let mut buf = [0x00u8, 0x00, 0xFF, 0xFF, 0b00_00_00_11, 0, 0, 0];
        transcode_color_half(&mut buf, true);
        let (c0, c1, pixels) = color_index_words(&buf);
        assert!(c0 < c1);
        assert_eq!(pixels & 0b11, 3);
    }

    #[test]
    fn dxt1_block_without_transparency_ends_with_c0_gte_c1_regardless_of_input_order() {
        // Input is in "alpha capable" byte order (c0 < c1) but uses no index-3 pixel at all.
        let mut buf = [0x00u8, 0x00, 0xFF, 0xFF, 0b01_00_01_00, 0, 0, 0];
        transcode_color_half(&mut buf, true);
        let (c0, c1, pixels) = color_index_words(&buf);
        assert!(c0 >= c1);
        for i in 0..16 {
            assert_ne!((pixels >> (i * 2)) & 0b11, 3);
        }
    }

    #[test]
    fn dxt5_alpha_never_leaves_interpolated_codepoints() {
        let mut buf = [10u8, 200, 0b1011_1010, 0b1101_0110, 0b0111_1101, 0xFF, 0xFF, 0xFF];
        transcode_alpha_half(&mut buf);
        let (_, _, pixels) = read_alpha_half(&buf);
        for i in 0..16 {
            let v = (pixels >> (i * 3)) & 0b111;
            assert!(matches!(v, 0 | 1 | 6 | 7));
        }
    }

    #[test]
    fn dxt5_alpha_order_is_canonical_unless_constant() {
        let mut buf = [200u8, 10, 0, 0, 0, 0, 0, 0];
        transcode_alpha_half(&mut buf);
        assert!(buf[0] <= buf[1]);
    }

    #[test]
    fn dxt5_constant_alpha_clears_nonsentinel_indices() {
        let mut buf = [128u8, 128, 0b0100_1001, 0, 0, 0, 0, 0];
        transcode_alpha_half(&mut buf);
        let (_, _, pixels) = read_alpha_half(&buf);
        for i in 0..16 {
            let v = (pixels >> (i * 3)) & 0b111;
            assert!(v == 0 || v == 6 || v == 7);
        }
    }

    #[test]
    fn transcode_is_idempotent_on_its_own_output() {
        let mut buf = [0x12u8, 0x34, 0xBF, 0x9C, 0x77, 0x4B, 0xE2, 0x1A];
        transcode_block(BlockFormat::Dxt1, &mut buf);
        let once = buf;
        transcode_block(BlockFormat::Dxt1, &mut buf);
        assert_eq!(once, buf);
    }

    #[test]
    fn dxt5_transcode_is_idempotent_on_its_own_output() {
        let mut buf = [10u8, 200, 0b1011_1010, 0b1101_0110, 0b0111_1101, 0xAB, 0x3F, 0xC9, 1, 2, 3, 4, 5, 6, 7, 8];
        transcode_block(BlockFormat::Dxt5, &mut buf);
        let once = buf;
        transcode_block(BlockFormat::Dxt5, &mut buf);
        assert_eq!(once, buf);
    }
}
