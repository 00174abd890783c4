#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
pub mod test_prelude;

pub mod dds;

pub use dds::{
    encoded_dds_len, likely_dds, parse_dds, parse_dds_ignore_magic, write_dds_header, DdsFormat,
    DdsInfo, DdsWriteError,
};
