//! Common test imports re-exported so other test modules in this crate don't each have to
//! repeat the same `use` block.
#![allow(unused_imports)]

pub use crate::block::{transcode_block, BlockFormat};
pub use crate::dds::{transcode_dds, TranscodeDdsError};
pub use alloc::vec;
pub use alloc::vec::Vec;
pub use rstest::rstest;
