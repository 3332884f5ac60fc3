use alloc::vec::Vec;

use crate::encoding::{Encoding, EncodingKind, UnicodeEncoding};
use crate::error::EncodingError;
use crate::str::Str;
use crate::uchar::UChar;

/// UTF-16 encoding marker.
///
/// Code units are native `u16`s; byte order only matters when serializing,
/// see [`Str::to_le_bytes`] and [`Str::to_be_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Utf16;

const SURROGATE_HIGH_START: u16 = 0xD800;
const SURROGATE_HIGH_END: u16 = 0xDBFF;
const SURROGATE_LOW_START: u16 = 0xDC00;
const SURROGATE_LOW_END: u16 = 0xDFFF;

#[inline]
fn is_high_surrogate(unit: u16) -> bool {
    (SURROGATE_HIGH_START..=SURROGATE_HIGH_END).contains(&unit)
}

#[inline]
fn is_low_surrogate(unit: u16) -> bool {
    (SURROGATE_LOW_START..=SURROGATE_LOW_END).contains(&unit)
}

#[inline]
fn combine(high: u16, low: u16) -> UChar {
    let cp = 0x10000 + (((high - SURROGATE_HIGH_START) as u32) << 10) + (low - SURROGATE_LOW_START) as u32;
    // SAFETY: a surrogate pair always combines to U+10000..=U+10FFFF.
    unsafe { UChar::from_u32_unchecked(cp) }
}

impl Encoding for Utf16 {
    type CodeUnit = u16;
    type Char = UChar;

    const KIND: EncodingKind = EncodingKind::Utf16;
    const MAX_UNITS_PER_CHAR: usize = 2;

    fn validate(units: &[u16]) -> Result<(), EncodingError> {
        let mut offset = 0;
        while offset < units.len() {
            let unit = units[offset];

            if is_high_surrogate(unit) {
                // High surrogate - must be followed by low surrogate
                match units.get(offset + 1) {
                    Some(&low) if is_low_surrogate(low) => offset += 2,
                    Some(_) => return Err(EncodingError::new(offset, Some(1))),
                    None => return Err(EncodingError::new(offset, None)),
                }
            } else if is_low_surrogate(unit) {
                return Err(EncodingError::new(offset, Some(1)));
            } else {
                offset += 1;
            }
        }

        Ok(())
    }

    fn decode_char_at(units: &[u16], offset: usize) -> Option<(UChar, usize)> {
        let unit = *units.get(offset)?;

        if is_high_surrogate(unit) {
            let low = *units.get(offset + 1)?;
            if !is_low_surrogate(low) {
                return None;
            }
            Some((combine(unit, low), offset + 2))
        } else if is_low_surrogate(unit) {
            None
        } else {
            // SAFETY: not a surrogate, and every u16 is below U+10FFFF.
            Some((unsafe { UChar::from_u32_unchecked(unit as u32) }, offset + 1))
        }
    }

    fn decode_char_before(units: &[u16], offset: usize) -> Option<(UChar, usize)> {
        if offset == 0 || offset > units.len() {
            return None;
        }

        let prev = units[offset - 1];

        if is_low_surrogate(prev) {
            let high = *units.get(offset.checked_sub(2)?)?;
            if !is_high_surrogate(high) {
                return None;
            }
            Some((combine(high, prev), offset - 2))
        } else if is_high_surrogate(prev) {
            None
        } else {
            // SAFETY: not a surrogate.
            Some((unsafe { UChar::from_u32_unchecked(prev as u32) }, offset - 1))
        }
    }

    #[inline]
    fn is_char_boundary(units: &[u16], index: usize) -> bool {
        match units.get(index) {
            // The middle of a pair is the only non-boundary.
            Some(&unit) => !is_low_surrogate(unit),
            None => index == units.len(),
        }
    }

    #[inline]
    fn encoded_len(c: UChar) -> usize {
        c.len_utf16()
    }

    #[inline]
    fn encode_char(c: UChar, buf: &mut [u16]) -> usize {
        let encoded = c.encode_utf16();
        buf[..encoded.len()].copy_from_slice(&encoded);
        encoded.len()
    }

    #[inline]
    fn char_from_scalar(c: UChar) -> Option<UChar> {
        Some(c)
    }
}

impl UnicodeEncoding for Utf16 {}

impl Str<Utf16> {
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
        name: "UTF-16LE",
        aliases: &["UTF16LE"],
        kind: EncodingKind::Utf16,
        from_utf8: |bytes| {
            let s = crate::decode::transcode_from_utf8_slice::<Utf16>(bytes)?;
            Ok(s.to_le_bytes())
        },
        from_utf8_lossy: |bytes| crate::decode::transcode_from_utf8_lossy::<Utf16>(bytes).to_le_bytes(),
    }
}

#[cfg(feature = "registry")]
inventory::submit! {
    crate::registry::EncodingEntry {
        name: "UTF-16BE",
        aliases: &["UTF16BE", "UTF-16", "UTF16"],
        kind: EncodingKind::Utf16,
        from_utf8: |bytes| {
            let s = crate::decode::transcode_from_utf8_slice::<Utf16>(bytes)?;
            Ok(s.to_be_bytes())
        },
        from_utf8_lossy: |bytes| crate::decode::transcode_from_utf8_lossy::<Utf16>(bytes).to_be_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_surrogate_pair() {
        // U+1F600 (😀) = D83D DE00
        assert!(Utf16::validate(&[0xD83D, 0xDE00]).is_ok());
        assert!(Utf16::validate(&[0x68, 0x65]).is_ok());
    }

    #[test]
    fn test_validate_lone_surrogate() {
        // Lone high surrogate
        assert_eq!(
            Utf16::validate(&[0x68, 0xD83D, 0x68]),
            Err(EncodingError::new(1, Some(1)))
        );
        // Lone low surrogate
        assert_eq!(Utf16::validate(&[0xDE00, 0x68]), Err(EncodingError::new(0, Some(1))));
        // Reversed pair
        assert_eq!(Utf16::validate(&[0xDE00, 0xD83D]), Err(EncodingError::new(0, Some(1))));
        // High surrogate at the end
        assert_eq!(Utf16::validate(&[0x68, 0xD83D]), Err(EncodingError::new(1, None)));
    }

    #[test]
    fn test_decode_surrogate_pair() {
        let units = [0x68, 0xD83D, 0xDE00];
        assert_eq!(Utf16::decode_char_at(&units, 1), Some((UChar::from_char('😀'), 3)));
        assert_eq!(Utf16::decode_char_at(&units, 2), None);
        assert_eq!(Utf16::decode_char_before(&units, 3), Some((UChar::from_char('😀'), 1)));
        assert_eq!(Utf16::decode_char_before(&units, 1), Some((UChar::from_char('h'), 0)));
        assert_eq!(Utf16::decode_char_before(&units, 2), None);
    }

    #[test]
    fn test_is_char_boundary() {
        // "h😀"
        let units = [0x68, 0xD83D, 0xDE00];

        assert!(Utf16::is_char_boundary(&units, 0));
        assert!(Utf16::is_char_boundary(&units, 1)); // Start of emoji
        assert!(!Utf16::is_char_boundary(&units, 2)); // Low surrogate (middle of emoji)
        assert!(Utf16::is_char_boundary(&units, 3)); // End
        assert!(!Utf16::is_char_boundary(&units, 4));
    }

    #[test]
    fn test_roundtrip_all_scalars() {
        let mut buf = [0u16; 2];
        for cp in (0u32..=0x10FFFF).filter(|cp| !(0xD800..=0xDFFF).contains(cp)) {
            let c = UChar::from_u32(cp).unwrap();
            let len = Utf16::encode_char(c, &mut buf);
            assert_eq!(len, Utf16::encoded_len(c));
            let (decoded, next) = Utf16::decode_char_at(&buf[..len], 0).unwrap();
            assert_eq!(decoded, c, "roundtrip failed for U+{:04X}", cp);
            assert_eq!(next, len);
        }
    }

    #[test]
    fn test_byte_order() {
        let units = [0x0068, 0xD83D, 0xDE00];
        let s = Str::<Utf16>::from_code_units(&units).unwrap();
        assert_eq!(s.to_le_bytes(), [0x68, 0x00, 0x3D, 0xD8, 0x00, 0xDE]);
        assert_eq!(s.to_be_bytes(), [0x00, 0x68, 0xD8, 0x3D, 0xDE, 0x00]);
    }
}
