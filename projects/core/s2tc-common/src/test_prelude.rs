//! Common test imports and utilities, re-exported so other test modules in this crate don't
//! each have to repeat the same `use` block.
#![allow(unused_imports)]

pub use crate::color565::{round_half_up_div, Color565, WideColor565};
pub use crate::metrics::{alpha_dist, ColorDistMetric};
pub use crate::prng::{CandidateRng, DecodeTieBreakRng};
pub use rstest::rstest;
