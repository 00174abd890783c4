//! Common test imports and utilities for DDS extension tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use alloc::{boxed::Box, format, string::String, vec, vec::Vec};
pub use rstest::rstest;

use crate::dds::constants::*;
use crate::dds::{write_dds_header, DdsFormat};

/// Builds a minimal, fully valid DDS file for `format` at `width`x`height`: a proper 128-byte
/// header followed by zeroed block data of the exact required length.
pub fn make_dds(format: DdsFormat, width: u32, height: u32) -> Vec<u8> {
    let blocks_wide = (width.div_ceil(4)).max(1) as usize;
    let blocks_high = (height.div_ceil(4)).max(1) as usize;
    let mut data = vec![0u8; DDS_HEADER_SIZE + blocks_wide * blocks_high * format.block_size()];
    write_dds_header(&mut data, width, height, format, true).unwrap();
    data
}
