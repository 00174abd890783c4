#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
pub mod test_prelude;

pub mod assign;
pub mod config;
#[cfg(test)]
pub mod decode;
pub mod encode;
pub mod pack;
pub mod refine;
pub mod selector;
pub mod tile;

pub use config::{CandidateMode, ConfigError, DxtMode, EncodeConfig, InputShapeError, RefineMode};
pub use encode::{encode_image, encode_tile, EncodeError};
pub use tile::{Tile, TilePixel};
