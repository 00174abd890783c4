//! Minimal TGA loader: truecolor uncompressed (image type 2) and truecolor RLE (image type 10),
//! 24-bit (BGR) or 32-bit (BGRA) pixel depth only. Indexed, grayscale, and compressed-grayscale
//! TGAs are out of scope — this exists only to get `s2tc-cli encode` runnable end to end, not
//! to be a general-purpose TGA reader.

use thiserror::Error;

const HEADER_LEN: usize = 18;
const IMAGE_TYPE_UNCOMPRESSED_TRUECOLOR: u8 = 2;
const IMAGE_TYPE_RLE_TRUECOLOR: u8 = 10;
const DESCRIPTOR_TOP_TO_BOTTOM_BIT: u8 = 0x20;

/// Failure modes for [`load_tga`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TgaError {
    /// The buffer is too short to hold an 18-byte TGA header.
    #[error("buffer of {len} bytes is smaller than the {HEADER_LEN}-byte TGA header")]
    TooShortForHeader {
        /// Length of the buffer that was passed in.
        len: usize,
    },
    /// The header names an image type this loader doesn't understand.
    #[error("unsupported TGA image type {image_type} (only uncompressed/RLE truecolor are supported)")]
    UnsupportedImageType {
        /// The raw image-type byte from the header.
        image_type: u8,
    },
    /// The header names a pixel depth this loader doesn't understand.
    #[error("unsupported TGA pixel depth {depth} (only 24 and 32 are supported)")]
    UnsupportedPixelDepth {
        /// The raw pixel-depth byte from the header.
        depth: u8,
    },
    /// The color map fields claim a nonzero color map, which truecolor images shouldn't have.
    #[error("truecolor TGA unexpectedly declares a nonzero color map")]
    UnexpectedColorMap,
    /// The buffer is too short to hold the pixel data the header implies.
    #[error("truncated TGA pixel data: ran out of input while decoding")]
    TruncatedPixelData,
}

/// Loads a truecolor TGA image from `data`, returning `(width, height, rgba8)` with `rgba8` in
/// top-to-bottom row-major order regardless of the source's stored scan-line order.
pub fn load_tga(data: &[u8]) -> Result<(u32, u32, Vec<u8>), TgaError> {
    if data.len() < HEADER_LEN {
        return Err(TgaError::TooShortForHeader { len: data.len() });
    }

    let id_length = data[0];
    let color_map_type = data[1];
    let image_type = data[2];
    let color_map_length = u16::from_le_bytes([data[5], data[6]]);
    let width = u16::from_le_bytes([data[12], data[13]]) as u32;
    let height = u16::from_le_bytes([data[14], data[15]]) as u32;
    let pixel_depth = data[16];
    let descriptor = data[17];

    if color_map_type != 0 || color_map_length != 0 {
        return Err(TgaError::UnexpectedColorMap);
    }
    if image_type != IMAGE_TYPE_UNCOMPRESSED_TRUECOLOR && image_type != IMAGE_TYPE_RLE_TRUECOLOR {
        return Err(TgaError::UnsupportedImageType { image_type });
    }
    let bytes_per_pixel = match pixel_depth {
        24 => 3,
        32 => 4,
        _ => return Err(TgaError::UnsupportedPixelDepth { depth: pixel_depth }),
    };

    let mut cursor = HEADER_LEN + id_length as usize;
    let pixel_count = width as usize * height as usize;
    let mut bgra = vec![0u8; pixel_count * bytes_per_pixel];

    if image_type == IMAGE_TYPE_UNCOMPRESSED_TRUECOLOR {
        let needed = pixel_count * bytes_per_pixel;
        let src = data.get(cursor..cursor + needed).ok_or(TgaError::TruncatedPixelData)?;
        bgra.copy_from_slice(src);
    } else {
        let mut written = 0usize;
        while written < bgra.len() {
            let packet_header = *data.get(cursor).ok_or(TgaError::TruncatedPixelData)?;
            cursor += 1;
            let count = (packet_header & 0x7F) as usize + 1;

            if packet_header & 0x80 != 0 {
                let pixel =
                    data.get(cursor..cursor + bytes_per_pixel).ok_or(TgaError::TruncatedPixelData)?;
                cursor += bytes_per_pixel;
                for _ in 0..count {
                    bgra[written..written + bytes_per_pixel].copy_from_slice(pixel);
                    written += bytes_per_pixel;
                }
            } else {
                let needed = count * bytes_per_pixel;
                let raw = data.get(cursor..cursor + needed).ok_or(TgaError::TruncatedPixelData)?;
                cursor += needed;
                bgra[written..written + needed].copy_from_slice(raw);
                written += needed;
            }
        }
    }

    let mut rgba = Vec::with_capacity(pixel_count * 4);
    for pixel in bgra.chunks_exact(bytes_per_pixel) {
        let (b, g, r) = (pixel[0], pixel[1], pixel[2]);
        let a = if bytes_per_pixel == 4 { pixel[3] } else { 255 };
        rgba.extend_from_slice(&[r, g, b, a]);
    }

    if descriptor & DESCRIPTOR_TOP_TO_BOTTOM_BIT == 0 {
        flip_vertically(&mut rgba, width as usize, height as usize);
    }

    Ok((width, height, rgba))
}

fn flip_vertically(rgba: &mut [u8], width: usize, height: usize) {
    let row_bytes = width * 4;
    for y in 0..height / 2 {
        let top = y * row_bytes;
        let bottom = (height - 1 - y) * row_bytes;
        let (top_slice, bottom_slice) = rgba.split_at_mut(bottom);
        top_slice[top..top + row_bytes].swap_with_slice(&mut bottom_slice[..row_bytes]);
    }
}
