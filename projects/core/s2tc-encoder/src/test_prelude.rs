//! Common test imports and utilities, re-exported so other test modules in this crate don't
//! each have to repeat the same `use` block.
#![allow(unused_imports)]

pub use crate::config::{CandidateMode, DxtMode, EncodeConfig, RefineMode};
pub use crate::encode::{encode_image, encode_tile};
pub use crate::tile::{Tile, TilePixel, TILE_PIXELS};
pub use alloc::vec::Vec;
pub use rstest::rstest;
pub use s2tc_common::{Color565, ColorDistMetric};

/// Builds a single-row tile from `(r, g, b, a)` tuples, for tests that only care about one
/// dimension's worth of pixel variation.
pub fn tile_of(pixels: &[(u8, u8, u8, u8)]) -> Tile {
    let mut img = [0u8; TILE_PIXELS * 4];
    for (i, &(r, g, b, a)) in pixels.iter().enumerate() {
        img[i * 4..i * 4 + 4].copy_from_slice(&[r, g, b, a]);
    }
    Tile::read(&img, pixels.len(), 1, pixels.len(), 0, 0)
}

/// Builds a full 4x4 tile filled with one RGBA color.
pub fn solid_tile(rgba: [u8; 4]) -> Tile {
    let mut img = [0u8; TILE_PIXELS * 4];
    for chunk in img.chunks_mut(4) {
        chunk.copy_from_slice(&rgba);
    }
    Tile::read(&img, 4, 4, 4, 0, 0)
}
