//! Whole-file convenience wrapper: rewrites every mip level of a DDS image in place.
//!
//! This is a self-contained minimal DDS header reader (magic + fourcc + dimensions), not a
//! full parser — it exists so this crate can be used standalone on a `.dds` file without
//! pulling in the file-format crate's writer/layout machinery, mirroring how the reference
//! implementation's own conversion tool is a single standalone program.

use crate::block::{transcode_block, BlockFormat};
use thiserror::Error;

const DDS_MAGIC: [u8; 4] = *b"DDS ";
const HEADER_LEN: usize = 128;
const FOURCC_OFFSET: usize = 84;
const HEIGHT_OFFSET: usize = 12;
const WIDTH_OFFSET: usize = 16;

/// Failure modes for [`transcode_dds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TranscodeDdsError {
    /// The buffer is too short to hold a DDS header.
    #[error("buffer of {len} bytes is smaller than the {HEADER_LEN}-byte DDS header")]
    TooShortForHeader {
        /// Length of the buffer that was passed in.
        len: usize,
    },
    /// The buffer doesn't start with the `DDS ` magic.
    #[error("missing 'DDS ' magic")]
    BadMagic,
    /// The fourcc at byte offset 84 isn't one this crate knows how to transcode.
    #[error("unsupported fourcc {fourcc:?}")]
    UnsupportedFourCc {
        /// The four raw fourcc bytes that were found.
        fourcc: [u8; 4],
    },
    /// The pixel data after the header is shorter than `width * height` implies.
    #[error("pixel data of {len} bytes is smaller than the {required} bytes implied by width/height")]
    TruncatedPixelData {
        /// Length of the pixel data actually present.
        len: usize,
        /// Length required by the header's declared dimensions.
        required: usize,
    },
}

fn block_format_for_fourcc(fourcc: [u8; 4]) -> Result<BlockFormat, TranscodeDdsError> {
    match &fourcc {
        b"DXT1" => Ok(BlockFormat::Dxt1),
        b"DXT3" => Ok(BlockFormat::Dxt3),
        b"DXT5" => Ok(BlockFormat::Dxt5),
        _ => Err(TranscodeDdsError::UnsupportedFourCc { fourcc }),
    }
}

/// Rewrites every block of the base level of the DDS image in `data` in place so the blocks
/// are S2TC-conformant. Only the base mip level is touched; any further mip levels trailing
/// in the buffer are left as-is (this mirrors the reference implementation, which only ever
/// converts the single base-level image it was asked about).
pub fn transcode_dds(data: &mut [u8]) -> Result<(), TranscodeDdsError> {
    if data.len() < HEADER_LEN {
        return Err(TranscodeDdsError::TooShortForHeader { len: data.len() });
    }
    if data[0..4] != DDS_MAGIC {
        return Err(TranscodeDdsError::BadMagic);
    }

    let height = u32::from_le_bytes(data[HEIGHT_OFFSET..HEIGHT_OFFSET + 4].try_into().unwrap()) as usize;
    let width = u32::from_le_bytes(data[WIDTH_OFFSET..WIDTH_OFFSET + 4].try_into().unwrap()) as usize;
    let fourcc: [u8; 4] = data[FOURCC_OFFSET..FOURCC_OFFSET + 4].try_into().unwrap();
    let format = block_format_for_fourcc(fourcc)?;

    let blocks_wide = width.div_ceil(4).max(1);
    let blocks_high = height.div_ceil(4).max(1);
    let block_count = blocks_wide * blocks_high;
    let required = block_count * format.block_size();

    let pixel_data = &mut data[HEADER_LEN..];
    if pixel_data.len() < required {
        return Err(TranscodeDdsError::TruncatedPixelData { len: pixel_data.len(), required });
    }

    for block in pixel_data[..required].chunks_exact_mut(format.block_size()) {
        transcode_block(format, block);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn minimal_dxt1_dds(blocks_wide: u32, blocks_high: u32) -> alloc::vec::Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data[0..4].copy_from_slice(&DDS_MAGIC);
        data[HEIGHT_OFFSET..HEIGHT_OFFSET + 4].copy_from_slice(&(blocks_high * 4).to_le_bytes());
        data[WIDTH_OFFSET..WIDTH_OFFSET + 4].copy_from_slice(&(blocks_wide * 4).to_le_bytes());
        data[FOURCC_OFFSET..FOURCC_OFFSET + 4].copy_from_slice(b"DXT1");
        data.extend(core::iter::repeat(0u8).take((blocks_wide * blocks_high * 8) as usize));
        data
    }

    #[test]
    fn rejects_short_buffer() {
        let mut data = vec![0u8; 4];
        assert_eq!(transcode_dds(&mut data), Err(TranscodeDdsError::TooShortForHeader { len: 4 }));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = vec![0u8; HEADER_LEN];
        assert_eq!(transcode_dds(&mut data), Err(TranscodeDdsError::BadMagic));
    }

    #[test]
    fn rejects_unsupported_fourcc() {
        let mut data = minimal_dxt1_dds(1, 1);
        data[FOURCC_OFFSET..FOURCC_OFFSET + 4].copy_from_slice(b"DXT2");
        assert_eq!(
            transcode_dds(&mut data),
            Err(TranscodeDdsError::UnsupportedFourCc { fourcc: *b"DXT2" })
        );
    }

    #[test]
    fn rejects_truncated_pixel_data() {
        let mut data = minimal_dxt1_dds(2, 2);
        data.truncate(HEADER_LEN + 4);
        assert_eq!(
            transcode_dds(&mut data),
            Err(TranscodeDdsError::TruncatedPixelData { len: 4, required: 32 })
        );
    }

    #[test]
    fn transcodes_every_block_in_the_base_level() {
        let mut data = minimal_dxt1_dds(2, 1);
        data[HEADER_LEN..HEADER_LEN + 8].copy_from_slice(&[0x00, 0x00, 0xFF, 0xFF, 0, 0, 0, 0]);
        data[HEADER_LEN + 8..HEADER_LEN + 16].copy_from_slice(&[0xFF, 0xFF, 0x00, 0x00, 0, 0, 0, 0]);
        transcode_dds(&mut data).unwrap();
        assert!(data[HEADER_LEN] >= data[HEADER_LEN + 2]);
        assert!(data[HEADER_LEN + 8] >= data[HEADER_LEN + 10]);
    }
}
