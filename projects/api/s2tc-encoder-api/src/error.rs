//! Error types for the high-level encode entry points.

use s2tc_encoder::EncodeError as CoreEncodeError;
use thiserror::Error;

/// Errors [`encode_image`](crate::encode_image) and
/// [`encode_image_allocating`](crate::encode_image_allocating) can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum S2tcEncodeError {
    /// The underlying encoder rejected the configuration or input shape.
    #[error(transparent)]
    Encode(#[from] CoreEncodeError),
    /// The caller-provided output buffer is smaller than the size required for this image and
    /// configuration.
    #[error("output buffer too small: need {needed} bytes, have {actual}")]
    OutputBufferTooSmall {
        /// Bytes required to hold the full encoded image.
        needed: usize,
        /// Bytes actually present in the buffer the caller passed in.
        actual: usize,
    },
}
