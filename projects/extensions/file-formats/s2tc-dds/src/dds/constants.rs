//! DDS header field offsets and constants this crate actually uses.
#![allow(dead_code)]

/// Magic header for DDS files.
pub(crate) const DDS_MAGIC: u32 = 0x2053_3444; // 'DDS ' in little-endian

/// Total size of the (non-DX10) DDS header this crate reads and writes.
pub(crate) const DDS_HEADER_SIZE: usize = 0x80;

pub(crate) const DDS_SIZE_OFFSET: usize = 0x04;
pub(crate) const DDS_FLAGS_OFFSET: usize = 0x08;
pub(crate) const DDS_HEIGHT_OFFSET: usize = 0x0C;
pub(crate) const DDS_WIDTH_OFFSET: usize = 0x10;
pub(crate) const DDS_PITCH_OR_LINEAR_SIZE_OFFSET: usize = 0x14;
pub(crate) const DDS_MIPMAP_COUNT_OFFSET: usize = 0x1C;

pub(crate) const DDS_PIXELFORMAT_SIZE_OFFSET: usize = 0x4C;
pub(crate) const DDS_PIXELFORMAT_FLAGS_OFFSET: usize = 0x50;
pub(crate) const FOURCC_OFFSET: usize = 0x54;
pub(crate) const DDS_CAPS_OFFSET: usize = 0x6C;

pub(crate) const FOURCC_DXT1: u32 = 0x3154_5844; // 'DXT1'
pub(crate) const FOURCC_DXT3: u32 = 0x3354_5844; // 'DXT3'
pub(crate) const FOURCC_DXT5: u32 = 0x3554_5844; // 'DXT5'

pub(crate) const DDSD_CAPS: u32 = 0x1;
pub(crate) const DDSD_HEIGHT: u32 = 0x2;
pub(crate) const DDSD_WIDTH: u32 = 0x4;
pub(crate) const DDSD_PIXELFORMAT: u32 = 0x1000;
pub(crate) const DDSD_LINEARSIZE: u32 = 0x80000;

pub(crate) const DDPF_ALPHAPIXELS: u32 = 0x1;
pub(crate) const DDPF_FOURCC: u32 = 0x4;

/// `DDSCAPS_COMPLEX | DDSCAPS_TEXTURE | DDSCAPS_MIPMAP`, written unconditionally: this matches
/// what every S2TC-producing DDS file in the wild carries regardless of whether a mip chain is
/// actually present, and is what this crate's reader accepts without further checking.
pub(crate) const DDS_CAPS1: u32 = 0x0040_1008;

pub(crate) const DDS_HEADER_DWSIZE: u32 = 124;
pub(crate) const DDS_PIXELFORMAT_DWSIZE: u32 = 32;
