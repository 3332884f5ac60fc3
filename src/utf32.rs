use alloc::vec::Vec;

use crate::encoding::{Encoding, EncodingKind, UnicodeEncoding};
use crate::error::EncodingError;
use crate::str::Str;
use crate::uchar::UChar;

/// UTF-32 encoding marker.
///
/// Each native `u32` code unit holds one scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Utf32;

impl Encoding for Utf32 {
    type CodeUnit = u32;
    type Char = UChar;

    const KIND: EncodingKind = EncodingKind::Utf32;
    const MAX_UNITS_PER_CHAR: usize = 1;

    fn validate(units: &[u32]) -> Result<(), EncodingError> {
        match units.iter().position(|&u| UChar::from_u32(u).is_none()) {
            Some(offset) => Err(EncodingError::new(offset, Some(1))),
            None => Ok(()),
        }
    }

    #[inline]
    fn decode_char_at(units: &[u32], offset: usize) -> Option<(UChar, usize)> {
        let c = UChar::from_u32(*units.get(offset)?)?;
        Some((c, offset + 1))
    }

    #[inline]
    fn decode_char_before(units: &[u32], offset: usize) -> Option<(UChar, usize)> {
        let start = offset.checked_sub(1)?;
        let c = UChar::from_u32(*units.get(start)?)?;
        Some((c, start))
    }

    #[inline]
    fn is_char_boundary(units: &[u32], index: usize) -> bool {
        index <= units.len()
    }

    #[inline]
    fn encoded_len(_: UChar) -> usize {
        1
    }

    #[inline]
    fn encode_char(c: UChar, buf: &mut [u32]) -> usize {
        buf[0] = c.value();
        1
    }

    #[inline]
    fn char_from_scalar(c: UChar) -> Option<UChar> {
        Some(c)
    }
}

impl UnicodeEncoding for Utf32 {}

impl Str<Utf32> {
    /// Serializes the code units in little-endian byte order.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.as_code_units().iter().flat_map(|u| u.to_le_bytes()).collect()
    }

    /// Serializes the code units in big-endian byte order.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.as_code_units().iter().flat_map(|u| u.to_be_bytes()).collect()
    }
}

// === Registry registration ===

#[cfg(feature = "registry")]
inventory::submit! {
    crate::registry::EncodingEntry {
        name: "UTF-32LE",
        aliases: &["UTF32LE", "UCS-4LE"],
        kind: EncodingKind::Utf32,
        from_utf8: |bytes| {
            let s = crate::decode::transcode_from_utf8_slice::<Utf32>(bytes)?;
            Ok(s.to_le_bytes())
        },
        from_utf8_lossy: |bytes| crate::decode::transcode_from_utf8_lossy::<Utf32>(bytes).to_le_bytes(),
    }
}

#[cfg(feature = "registry")]
inventory::submit! {
    crate::registry::EncodingEntry {
        name: "UTF-32BE",
        aliases: &["UTF32BE", "UCS-4BE", "UTF-32", "UTF32"],
        kind: EncodingKind::Utf32,
        from_utf8: |bytes| {
            let s = crate::decode::transcode_from_utf8_slice::<Utf32>(bytes)?;
            Ok(s.to_be_bytes())
        },
        from_utf8_lossy: |bytes| crate::decode::transcode_from_utf8_lossy::<Utf32>(bytes).to_be_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Utf32::validate(&[0x68, 0x1F600, 0x10FFFF]).is_ok());
        assert_eq!(
            Utf32::validate(&[0x68, 0xD800]),
            Err(EncodingError::new(1, Some(1)))
        );
        assert_eq!(
            Utf32::validate(&[0x110000]),
            Err(EncodingError::new(0, Some(1)))
        );
    }

    #[test]
    fn test_decode() {
        let units = [0x68, 0x1F600];
        assert_eq!(Utf32::decode_char_at(&units, 1), Some((UChar::from_char('😀'), 2)));
        assert_eq!(Utf32::decode_char_at(&units, 2), None);
        assert_eq!(Utf32::decode_char_before(&units, 1), Some((UChar::from_char('h'), 0)));
        assert_eq!(Utf32::decode_char_at(&[0xDFFF], 0), None);
    }

    #[test]
    fn test_encode() {
        let mut buf = [0u32; 1];
        assert_eq!(Utf32::encode_char(UChar::from_char('€'), &mut buf), 1);
        assert_eq!(buf, [0x20AC]);
    }

    #[test]
    fn test_byte_order() {
        let units = [0x1F600];
        let s = Str::<Utf32>::from_code_units(&units).unwrap();
        assert_eq!(s.to_le_bytes(), [0x00, 0xF6, 0x01, 0x00]);
        assert_eq!(s.to_be_bytes(), [0x00, 0x01, 0xF6, 0x00]);
    }
}
