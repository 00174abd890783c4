use super::constants::*;

/// Determines whether `data` looks like a DDS file: the `'DDS '` magic at offset 0 and at
/// least a full 128-byte header's worth of bytes. Does not validate any other header field; use
/// [`parse_dds`](super::parse_dds) for that.
#[inline(always)]
pub fn likely_dds(data: &[u8]) -> bool {
    data.len() >= DDS_HEADER_SIZE
        && u32::from_le_bytes([data[0], data[1], data[2], data[3]]) == DDS_MAGIC
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use core::iter::repeat_n;

    #[test]
    fn matches_valid_header_and_sufficient_length() {
        let valid_data =
            [0x44, 0x44, 0x53, 0x20].into_iter().chain(repeat_n(0, 124)).collect::<Vec<u8>>();
        assert!(likely_dds(&valid_data));
    }

    #[test]
    fn rejects_valid_header_but_insufficient_length() {
        let short = [0x44, 0x44, 0x53, 0x20].into_iter().chain(repeat_n(0, 123)).collect::<Vec<u8>>();
        assert!(!likely_dds(&short));
    }

    #[test]
    fn rejects_invalid_header() {
        let invalid_data = repeat_n(0u8, 128).collect::<Vec<u8>>();
        assert!(!likely_dds(&invalid_data));
    }

    #[test]
    fn rejects_empty_data() {
        assert!(!likely_dds(&[]));
    }
}
