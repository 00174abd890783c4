#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
pub mod test_prelude;

pub mod builder;
pub mod encode;
pub mod error;
pub mod sizing;

pub use builder::EncodeConfigBuilder;
pub use encode::encode_image;
#[cfg(feature = "std")]
pub use encode::encode_image_allocating;
pub use error::S2tcEncodeError;
pub use sizing::{encoded_layout, EncodedLayout};
