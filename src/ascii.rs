use crate::achar::AsciiChar;
use crate::encoding::{Encoding, EncodingKind};
use crate::error::EncodingError;
use crate::string::String;
use crate::uchar::UChar;

/// 7-bit ASCII encoding marker.
///
/// Every byte is one character, so any index up to the length is a
/// character boundary. Bytes `0x80..=0xFF` are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ascii;

impl Encoding for Ascii {
    type CodeUnit = u8;
    type Char = AsciiChar;

    const KIND: EncodingKind = EncodingKind::Ascii;
    const MAX_UNITS_PER_CHAR: usize = 1;

    #[inline]
    fn validate(bytes: &[u8]) -> Result<(), EncodingError> {
        match bytes.iter().position(|&b| !b.is_ascii()) {
            Some(index) => Err(EncodingError::new(index, Some(1))),
            None => Ok(()),
        }
    }

    #[inline]
    fn decode_char_at(bytes: &[u8], offset: usize) -> Option<(AsciiChar, usize)> {
        let c = AsciiChar::from_u8(*bytes.get(offset)?)?;
        Some((c, offset + 1))
    }

    #[inline]
    fn decode_char_before(bytes: &[u8], offset: usize) -> Option<(AsciiChar, usize)> {
        let start = offset.checked_sub(1)?;
        let c = AsciiChar::from_u8(*bytes.get(start)?)?;
        Some((c, start))
    }

    #[inline]
    fn is_char_boundary(bytes: &[u8], index: usize) -> bool {
        index <= bytes.len()
    }

    #[inline]
    fn encoded_len(_: AsciiChar) -> usize {
        1
    }

    #[inline]
    fn encode_char(c: AsciiChar, buf: &mut [u8]) -> usize {
        buf[0] = c.value();
        1
    }

    #[inline]
    fn char_from_scalar(c: UChar) -> Option<AsciiChar> {
        c.as_ascii()
    }
}

impl String<Ascii> {
    /// Converts bytes to ASCII, substituting [`AsciiChar::SUBSTITUTE`] for
    /// every byte above `0x7F`.
    ///
    /// ```
    /// use unitext::AsciiString;
    ///
    /// let s = AsciiString::from_bytes_lossy(b"caf\xE9");
    /// assert_eq!(s.as_code_units(), b"caf\x1A");
    /// ```
    pub fn from_bytes_lossy(bytes: &[u8]) -> Self {
        bytes.iter().map(|&b| AsciiChar::from_u8_lossy(b)).collect()
    }
}

impl From<AsciiChar> for String<Ascii> {
    fn from(c: AsciiChar) -> Self {
        let mut s = String::new();
        s.push(c);
        s
    }
}
