#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
pub mod test_prelude;

mod block;
pub mod dds;

pub use block::{transcode_block, BlockFormat};
pub use dds::{transcode_dds, TranscodeDdsError};
