#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
pub mod test_prelude;

mod diffuse;
pub mod quantize;
pub mod strategy;

pub use quantize::{dither_rgba, DitherError};
pub use strategy::{AlphaBits, DitherStrategy};
