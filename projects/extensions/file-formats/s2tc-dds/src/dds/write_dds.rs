use super::constants::*;
use super::parse_dds::DdsFormat;
use endian_writer::{EndianWriter, LittleEndianWriter};
use thiserror::Error;

/// Failure modes for [`write_dds_header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DdsWriteError {
    /// `out` is shorter than [`DDS_HEADER_SIZE`].
    #[error("output buffer of {len} bytes is smaller than the {DDS_HEADER_SIZE}-byte DDS header")]
    OutputTooSmall {
        /// Length of the buffer that was passed in.
        len: usize,
    },
}

/// Writes a 128-byte DDS header for a `width`x`height` base-level image encoded as `format` into
/// `out[0..128]`. `has_alpha` selects the pixel-format flags word (`0x05` with alpha pixels
/// present, `0x04` without) — for DXT3/DXT5 callers should always pass `true`; for DXT1, pass
/// whether any encoded block used the punch-through alpha mode.
///
/// Writes only the header; any bytes at `out[128..]` are left untouched.
pub fn write_dds_header(
    out: &mut [u8],
    width: u32,
    height: u32,
    format: DdsFormat,
    has_alpha: bool,
) -> Result<(), DdsWriteError> {
    if out.len() < DDS_HEADER_SIZE {
        return Err(DdsWriteError::OutputTooSmall { len: out.len() });
    }

    out[..DDS_HEADER_SIZE].fill(0);

    let blocks_wide = (width.div_ceil(4)).max(1);
    let blocks_high = (height.div_ceil(4)).max(1);
    let main_surface_bytes = blocks_wide * blocks_high * format.block_size() as u32;

    // SAFETY: length checked above, every offset written below is < DDS_HEADER_SIZE.
    let mut writer = unsafe { LittleEndianWriter::new(out.as_mut_ptr()) };
    unsafe {
        writer.write_u32_at(DDS_MAGIC, 0);
        writer.write_u32_at(DDS_HEADER_DWSIZE, DDS_SIZE_OFFSET as isize);
        writer.write_u32_at(
            DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT | DDSD_LINEARSIZE,
            DDS_FLAGS_OFFSET as isize,
        );
        writer.write_u32_at(height, DDS_HEIGHT_OFFSET as isize);
        writer.write_u32_at(width, DDS_WIDTH_OFFSET as isize);
        writer.write_u32_at(main_surface_bytes, DDS_PITCH_OR_LINEAR_SIZE_OFFSET as isize);
        writer.write_u32_at(1, DDS_MIPMAP_COUNT_OFFSET as isize);

        writer.write_u32_at(DDS_PIXELFORMAT_DWSIZE, DDS_PIXELFORMAT_SIZE_OFFSET as isize);
        let pixel_flags = if has_alpha { DDPF_FOURCC | DDPF_ALPHAPIXELS } else { DDPF_FOURCC };
        writer.write_u32_at(pixel_flags, DDS_PIXELFORMAT_FLAGS_OFFSET as isize);
        writer.write_u32_at(format.fourcc_for_write(), FOURCC_OFFSET as isize);

        writer.write_u32_at(DDS_CAPS1, DDS_CAPS_OFFSET as isize);
    }

    Ok(())
}

impl DdsFormat {
    #[inline]
    fn fourcc_for_write(self) -> u32 {
        match self {
            Self::Dxt1 => FOURCC_DXT1,
            Self::Dxt3 => FOURCC_DXT3,
            Self::Dxt5 => FOURCC_DXT5,
        }
    }
}

/// Total byte length (128-byte header + tightly packed base-level block data) of a DDS file
/// for a `width`x`height` image encoded as `format`.
pub fn encoded_dds_len(width: u32, height: u32, format: DdsFormat) -> usize {
    let blocks_wide = (width.div_ceil(4)).max(1) as usize;
    let blocks_high = (height.div_ceil(4)).max(1) as usize;
    DDS_HEADER_SIZE + blocks_wide * blocks_high * format.block_size()
}

#[cfg(test)]
mod tests {
    use super::super::parse_dds::parse_dds;
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn rejects_output_buffer_too_small() {
        let mut out = [0u8; DDS_HEADER_SIZE - 1];
        let err = write_dds_header(&mut out, 4, 4, DdsFormat::Dxt1, false).unwrap_err();
        assert_eq!(err, DdsWriteError::OutputTooSmall { len: DDS_HEADER_SIZE - 1 });
    }

    #[rstest]
    #[case(DdsFormat::Dxt1)]
    #[case(DdsFormat::Dxt3)]
    #[case(DdsFormat::Dxt5)]
    fn header_round_trips_through_parse_dds(#[case] format: DdsFormat) {
        let mut out = vec![0u8; encoded_dds_len(10, 6, format)];
        write_dds_header(&mut out, 10, 6, format, true).unwrap();
        let info = parse_dds(&out).unwrap();
        assert_eq!(info.format, format);
        assert_eq!(info.width, 10);
        assert_eq!(info.height, 6);
        assert_eq!(info.data_offset, DDS_HEADER_SIZE);
        assert_eq!(info.data_length, out.len() - DDS_HEADER_SIZE);
    }

    #[test]
    fn has_alpha_selects_pixel_format_flags() {
        let mut with_alpha = [0u8; DDS_HEADER_SIZE];
        write_dds_header(&mut with_alpha, 4, 4, DdsFormat::Dxt1, true).unwrap();
        assert_eq!(
            u32::from_le_bytes(with_alpha[0x50..0x54].try_into().unwrap()),
            DDPF_FOURCC | DDPF_ALPHAPIXELS
        );

        let mut without_alpha = [0u8; DDS_HEADER_SIZE];
        write_dds_header(&mut without_alpha, 4, 4, DdsFormat::Dxt1, false).unwrap();
        assert_eq!(u32::from_le_bytes(without_alpha[0x50..0x54].try_into().unwrap()), DDPF_FOURCC);
    }

    #[test]
    fn caps1_matches_fixed_value() {
        let mut out = [0u8; DDS_HEADER_SIZE];
        write_dds_header(&mut out, 4, 4, DdsFormat::Dxt1, false).unwrap();
        assert_eq!(u32::from_le_bytes(out[0x6C..0x70].try_into().unwrap()), 0x0040_1008);
    }
}
