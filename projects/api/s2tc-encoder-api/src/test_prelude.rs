//! Common test imports re-exported so other test modules in this crate don't each have to
//! repeat the same `use` block.
#![allow(unused_imports)]

pub use crate::builder::EncodeConfigBuilder;
pub use crate::encode::encode_image;
#[cfg(feature = "std")]
pub use crate::encode::encode_image_allocating;
pub use crate::error::S2tcEncodeError;
pub use crate::sizing::{encoded_layout, EncodedLayout};
pub use alloc::vec;
pub use alloc::vec::Vec;
pub use rstest::rstest;
