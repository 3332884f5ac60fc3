use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::decode;
use crate::dfa::{ACCEPT, REJECT, accumulate, class_of, is_leading_byte, transition};
use crate::encoding::{Encoding, EncodingKind, UnicodeEncoding};
use crate::error::{EncodingError, FromUtf8Error};
use crate::str::Str;
use crate::string::String;
use crate::uchar::UChar;

/// UTF-8 encoding marker.
///
/// Validation and decoding run on the automaton in [`dfa`](crate::dfa), so
/// every `Str<Utf8>` accepts exactly the inputs `core::str::from_utf8` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Utf8;

impl Encoding for Utf8 {
    type CodeUnit = u8;
    type Char = UChar;

    const KIND: EncodingKind = EncodingKind::Utf8;
    const MAX_UNITS_PER_CHAR: usize = 4;

    #[inline]
    fn validate(bytes: &[u8]) -> Result<(), EncodingError> {
        decode::validate_utf8(bytes).map_err(EncodingError::from)
    }

    fn decode_char_at(bytes: &[u8], offset: usize) -> Option<(UChar, usize)> {
        let tail = bytes.get(offset..)?;
        let mut state = ACCEPT;
        let mut code_point = 0;

        for (i, &byte) in tail.iter().take(Self::MAX_UNITS_PER_CHAR).enumerate() {
            let class = class_of(byte);
            code_point = accumulate(state, code_point, byte, class);
            state = transition(state, class);
            match state {
                ACCEPT => return UChar::from_u32(code_point).map(|c| (c, offset + i + 1)),
                REJECT => return None,
                _ => {}
            }
        }

        None
    }

    #[inline]
    fn encoded_len(c: UChar) -> usize {
        c.len_utf8()
    }

    #[inline]
    fn encode_char(c: UChar, buf: &mut [u8]) -> usize {
        let encoded = c.encode_utf8();
        buf[..encoded.len()].copy_from_slice(&encoded);
        encoded.len()
    }

    #[inline]
    fn is_char_boundary(bytes: &[u8], index: usize) -> bool {
        match bytes.get(index) {
            Some(&byte) => is_leading_byte(byte),
            None => index == bytes.len(),
        }
    }

    fn decode_char_before(bytes: &[u8], offset: usize) -> Option<(UChar, usize)> {
        if offset == 0 || offset > bytes.len() {
            return None;
        }

        // Self-synchronizing: the leading byte is at most three bytes back.
        let mut start = offset - 1;
        while start > 0 && offset - start < Self::MAX_UNITS_PER_CHAR && !is_leading_byte(bytes[start]) {
            start -= 1;
        }

        match Self::decode_char_at(bytes, start) {
            Some((c, end)) if end == offset => Some((c, start)),
            _ => None,
        }
    }

    #[inline]
    fn char_from_scalar(c: UChar) -> Option<UChar> {
        Some(c)
    }
}

impl UnicodeEncoding for Utf8 {}

// === Owned UTF-8 input ===

impl String<Utf8> {
    /// Converts a vector of bytes to a `String<Utf8>` without copying.
    ///
    /// On failure the vector is handed back inside the error, like
    /// `std::string::String::from_utf8`.
    ///
    /// ```
    /// use unitext::Utf8String;
    ///
    /// let s = Utf8String::from_utf8_vec(b"caf\xC3\xA9".to_vec()).unwrap();
    /// assert_eq!(s.as_std(), "café");
    ///
    /// let err = Utf8String::from_utf8_vec(vec![b'a', 0xC3]).unwrap_err();
    /// assert_eq!(err.utf8_error().valid_up_to(), 1);
    /// assert_eq!(err.into_bytes(), [b'a', 0xC3]);
    /// ```
    pub fn from_utf8_vec(bytes: Vec<u8>) -> Result<Self, FromUtf8Error> {
        match decode::validate_utf8(&bytes) {
            // SAFETY: validated above.
            Ok(()) => Ok(unsafe { String::from_code_units_unchecked(bytes) }),
            Err(e) => Err(FromUtf8Error::new(bytes, e)),
        }
    }
}

// === Conversions from/to standard library str ===

impl Str<Utf8> {
    /// Returns this string slice as a `&str`.
    ///
    /// This is a zero-cost conversion since both types are UTF-8.
    #[inline]
    pub fn as_std(&self) -> &str {
        // SAFETY: Str<Utf8> is always valid UTF-8
        unsafe { core::str::from_utf8_unchecked(self.as_code_units()) }
    }

    /// Wraps a `&str`. Zero-cost.
    #[inline]
    pub fn from_std(s: &str) -> &Self {
        // SAFETY: &str is always valid UTF-8
        unsafe { Str::from_code_units_unchecked(s.as_bytes()) }
    }
}

impl<'a> From<&'a str> for &'a Str<Utf8> {
    #[inline]
    fn from(s: &'a str) -> Self {
        Str::from_std(s)
    }
}

impl<'a> From<&'a Str<Utf8>> for &'a str {
    #[inline]
    fn from(s: &'a Str<Utf8>) -> &'a str {
        s.as_std()
    }
}

impl From<std::string::String> for String<Utf8> {
    /// Takes over the allocation of a `std::string::String`.
    #[inline]
    fn from(s: std::string::String) -> Self {
        // SAFETY: std::string::String is always valid UTF-8
        unsafe { String::from_code_units_unchecked(s.into_bytes()) }
    }
}

impl From<String<Utf8>> for std::string::String {
    #[inline]
    fn from(s: String<Utf8>) -> std::string::String {
        // SAFETY: String<Utf8> is always valid UTF-8
        unsafe { std::string::String::from_utf8_unchecked(s.into_code_units()) }
    }
}

impl From<Box<str>> for String<Utf8> {
    #[inline]
    fn from(s: Box<str>) -> Self {
        String::from(s.into_string())
    }
}

impl<'a> From<Cow<'a, str>> for String<Utf8> {
    #[inline]
    fn from(s: Cow<'a, str>) -> Self {
        String::from(s.into_owned())
    }
}

impl AsRef<str> for Str<Utf8> {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_std()
    }
}

impl AsRef<str> for String<Utf8> {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_std()
    }
}

impl PartialEq<str> for Str<Utf8> {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_code_units() == other.as_bytes()
    }
}

impl PartialEq<&str> for String<Utf8> {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_code_units() == other.as_bytes()
    }
}

// === Registry registration ===

#[cfg(feature = "registry")]
inventory::submit! {
    crate::registry::EncodingEntry {
        name: "UTF-8",
        aliases: &["UTF8"],
        kind: EncodingKind::Utf8,
        from_utf8: |bytes| {
            decode::validate_utf8(bytes)?;
            Ok(bytes.to_vec())
        },
        from_utf8_lossy: |bytes| decode::transcode_from_utf8_lossy::<Utf8>(bytes).into_code_units(),
    }
}
