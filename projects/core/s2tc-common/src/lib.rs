#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
pub mod test_prelude;

pub mod color565;
pub mod metrics;
pub mod prng;

pub use color565::{Color565, WideColor565};
pub use metrics::ColorDistMetric;
pub use prng::{CandidateRng, DecodeTieBreakRng};
