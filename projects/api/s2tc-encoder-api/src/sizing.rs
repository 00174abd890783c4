//! Output buffer sizing for a tightly packed (no row padding) encoded image.

use s2tc_encoder::DxtMode;

/// Block-grid dimensions and tightly packed byte layout for a `width`x`height` image encoded
/// with `dxt_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedLayout {
    /// Blocks per block row.
    pub blocks_wide: usize,
    /// Block rows.
    pub blocks_high: usize,
    /// Bytes per block row, with no padding between blocks.
    pub row_stride_in_bytes: usize,
    /// Total bytes for the whole image at this stride: `row_stride_in_bytes * blocks_high`.
    pub total_len: usize,
}

/// Computes the tightly packed output layout for `width`x`height` pixels encoded as `dxt_mode`.
pub fn encoded_layout(width: usize, height: usize, dxt_mode: DxtMode) -> EncodedLayout {
    let blocks_wide = width.div_ceil(4).max(1);
    let blocks_high = height.div_ceil(4).max(1);
    let row_stride_in_bytes = blocks_wide * dxt_mode.block_size();
    EncodedLayout {
        blocks_wide,
        blocks_high,
        row_stride_in_bytes,
        total_len: row_stride_in_bytes * blocks_high,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple_of_four() {
        let layout = encoded_layout(8, 4, DxtMode::Dxt1);
        assert_eq!(layout.blocks_wide, 2);
        assert_eq!(layout.blocks_high, 1);
        assert_eq!(layout.row_stride_in_bytes, 16);
        assert_eq!(layout.total_len, 16);
    }

    #[test]
    fn rounds_up_partial_blocks() {
        let layout = encoded_layout(6, 5, DxtMode::Dxt5);
        assert_eq!(layout.blocks_wide, 2);
        assert_eq!(layout.blocks_high, 2);
        assert_eq!(layout.row_stride_in_bytes, 32);
        assert_eq!(layout.total_len, 64);
    }
}
