//! High-level `encode_image` entry points: tightly packed output, validated buffer sizing.

use crate::error::S2tcEncodeError;
use crate::sizing::encoded_layout;
use s2tc_encoder::EncodeConfig;

/// Encodes `width`x`height` RGBA8 pixels (tightly packed: `input_rgba` holds exactly
/// `width * height * 4` bytes, row-major, no padding) into `output` using `config`.
///
/// `output` must be at least as long as the tightly packed layout
/// [`crate::sizing::encoded_layout`] reports for this image and `config.dxt_mode`; any extra
/// bytes are left untouched.
pub fn encode_image(
    width: usize,
    height: usize,
    input_rgba: &[u8],
    output: &mut [u8],
    config: &EncodeConfig,
) -> Result<(), S2tcEncodeError> {
    let layout = encoded_layout(width, height, config.dxt_mode);
    if output.len() < layout.total_len {
        return Err(S2tcEncodeError::OutputBufferTooSmall {
            needed: layout.total_len,
            actual: output.len(),
        });
    }

    s2tc_encoder::encode_image(
        width,
        height,
        input_rgba,
        width,
        output,
        layout.row_stride_in_bytes,
        config,
    )?;

    Ok(())
}

/// Like [`encode_image`], but allocates the output buffer for you.
#[cfg(feature = "std")]
pub fn encode_image_allocating(
    width: usize,
    height: usize,
    input_rgba: &[u8],
    config: &EncodeConfig,
) -> Result<std::vec::Vec<u8>, S2tcEncodeError> {
    let layout = encoded_layout(width, height, config.dxt_mode);
    let mut output = std::vec![0u8; layout.total_len];
    encode_image(width, height, input_rgba, &mut output, config)?;
    Ok(output)
}
