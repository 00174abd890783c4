use super::{constants::*, likely_dds};
use endian_writer::{EndianReader, LittleEndianReader};

/// Which of the three S2TC block layouts a DDS file's fourcc names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DdsFormat {
    /// a.k.a. BC1.
    Dxt1 = 0,
    /// a.k.a. BC2.
    Dxt3 = 1,
    /// a.k.a. BC3.
    Dxt5 = 2,
}

impl DdsFormat {
    /// Size in bytes of one encoded block in this layout.
    #[inline]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Dxt1 => 8,
            Self::Dxt3 | Self::Dxt5 => 16,
        }
    }
}

/// The information extracted from a DDS file's base-level header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsInfo {
    /// The block layout the fourcc names.
    pub format: DdsFormat,
    /// Pixel width of the base level, as declared by the header.
    pub width: u32,
    /// Pixel height of the base level, as declared by the header.
    pub height: u32,
    /// Byte offset of the base level's compressed block data (always [`DDS_HEADER_SIZE`] for
    /// the headers this crate understands — no DX10 header is ever present).
    pub data_offset: usize,
    /// Byte length of the base level's compressed block data.
    pub data_length: usize,
}

/// Parses the base-level header of a DDS file, returning `None` if `data` doesn't start with
/// the `'DDS '` magic, is shorter than a 128-byte header, or names a fourcc other than
/// `DXT1`/`DXT3`/`DXT5`.
pub fn parse_dds(data: &[u8]) -> Option<DdsInfo> {
    if !likely_dds(data) {
        return None;
    }
    parse_dds_ignore_magic(data)
}

/// Like [`parse_dds`], but does not check the magic at offset 0 — for data whose magic has
/// already been overwritten or is otherwise known-good.
pub fn parse_dds_ignore_magic(data: &[u8]) -> Option<DdsInfo> {
    if data.len() < DDS_HEADER_SIZE {
        return None;
    }

    // SAFETY: length checked above, every offset read below is < DDS_HEADER_SIZE.
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
    let fourcc = unsafe { reader.read_u32_at(FOURCC_OFFSET as isize) };
    let format = match fourcc {
        FOURCC_DXT1 => DdsFormat::Dxt1,
        FOURCC_DXT3 => DdsFormat::Dxt3,
        FOURCC_DXT5 => DdsFormat::Dxt5,
        _ => return None,
    };

    let height = unsafe { reader.read_u32_at(DDS_HEIGHT_OFFSET as isize) };
    let width = unsafe { reader.read_u32_at(DDS_WIDTH_OFFSET as isize) };

    let blocks_wide = (width.div_ceil(4)).max(1) as usize;
    let blocks_high = (height.div_ceil(4)).max(1) as usize;
    let data_length = blocks_wide * blocks_high * format.block_size();

    Some(DdsInfo { format, width, height, data_offset: DDS_HEADER_SIZE, data_length })
}
