//! Encoding traits for the four text encodings of this crate.
//!
//! - [`Encoding`]: Base trait for all encodings
//! - [`UnicodeEncoding`]: Marker for encodings that can represent every scalar value
//! - [`EncodingKind`]: The runtime tag of an encoding, used where the encoding
//!   is only known at runtime (capacity estimation, the registry)
//!
//! # Example
//!
//! ```
//! use unitext::{Encoding, EncodingKind, UChar, Utf8, Utf16};
//!
//! assert_eq!(Utf8::NAME, "UTF-8");
//! assert!(Utf8::IS_VARIABLE_WIDTH);
//! assert_eq!(Utf16::KIND, EncodingKind::Utf16);
//!
//! // Validate code units
//! assert!(Utf8::validate(b"hello").is_ok());
//! assert!(Utf16::validate(&[0xDC00]).is_err());
//!
//! // Encode a character
//! let mut buf = [0u16; 2];
//! let len = Utf16::encode_char(UChar::from_char('\u{1F600}'), &mut buf);
//! assert_eq!(len, 2); // Surrogate pair
//! ```

use core::fmt;
use core::hash::Hash;

use crate::error::EncodingError;
use crate::uchar::UChar;

/// A fixed-width integer used as the storage unit of an encoding.
///
/// Implemented for `u8`, `u16` and `u32`. Every code unit type can hold a
/// byte, which is how ASCII and UTF-8 input is copied without decoding.
pub trait CodeUnit:
    Copy + Eq + Ord + Hash + Default + fmt::Debug + From<u8> + Send + Sync + 'static + sealed::Sealed
{
    /// Widens this code unit to a `u32`.
    fn to_u32(self) -> u32;
}

impl CodeUnit for u8 {
    #[inline]
    fn to_u32(self) -> u32 {
        self as u32
    }
}

impl CodeUnit for u16 {
    #[inline]
    fn to_u32(self) -> u32 {
        self as u32
    }
}

impl CodeUnit for u32 {
    #[inline]
    fn to_u32(self) -> u32 {
        self
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// The encodings supported by this crate, as a runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingKind {
    /// 7-bit ASCII, one byte per character.
    Ascii,
    /// UTF-8, one to four bytes per character.
    Utf8,
    /// UTF-16, one or two 16-bit code units per character.
    Utf16,
    /// UTF-32, one 32-bit code unit per character.
    Utf32,
}

impl EncodingKind {
    /// All encodings, in declaration order.
    pub const ALL: [EncodingKind; 4] = [
        EncodingKind::Ascii,
        EncodingKind::Utf8,
        EncodingKind::Utf16,
        EncodingKind::Utf32,
    ];

    /// The human-readable name of this encoding.
    pub const fn name(self) -> &'static str {
        match self {
            EncodingKind::Ascii => "ASCII",
            EncodingKind::Utf8 => "UTF-8",
            EncodingKind::Utf16 => "UTF-16",
            EncodingKind::Utf32 => "UTF-32",
        }
    }

    /// Whether characters occupy a varying number of code units.
    pub const fn is_variable_width(self) -> bool {
        matches!(self, EncodingKind::Utf8 | EncodingKind::Utf16)
    }

    /// Whether every Unicode scalar value can be represented.
    pub const fn is_unicode(self) -> bool {
        !matches!(self, EncodingKind::Ascii)
    }

    /// Size of one code unit in bytes.
    pub const fn code_unit_size(self) -> usize {
        match self {
            EncodingKind::Ascii | EncodingKind::Utf8 => 1,
            EncodingKind::Utf16 => 2,
            EncodingKind::Utf32 => 4,
        }
    }

    /// Looks up an encoding by name, ignoring ASCII case and the `-` separator.
    ///
    /// ```
    /// use unitext::EncodingKind;
    ///
    /// assert_eq!(EncodingKind::from_name("utf8"), Some(EncodingKind::Utf8));
    /// assert_eq!(EncodingKind::from_name("UTF-16"), Some(EncodingKind::Utf16));
    /// assert_eq!(EncodingKind::from_name("latin1"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim();
        Self::ALL.into_iter().find(|kind| {
            let canonical = kind.name();
            canonical.eq_ignore_ascii_case(normalized)
                || canonical
                    .bytes()
                    .filter(|&b| b != b'-')
                    .map(|b| b.to_ascii_lowercase())
                    .eq(normalized.bytes().map(|b| b.to_ascii_lowercase()))
        })
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A trait defining a text encoding.
///
/// Implementors are zero-sized types (ZSTs) that serve as type-level markers
/// for the encoding of a string. All encoding operations are static methods
/// over slices of [`CodeUnit`](Encoding::CodeUnit)s.
pub trait Encoding: Sized + Copy + Send + Sync + 'static {
    /// The storage unit of this encoding.
    type CodeUnit: CodeUnit;

    /// The character type of this encoding.
    type Char: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Into<UChar>;

    /// The runtime tag of this encoding.
    const KIND: EncodingKind;

    /// The human-readable name of this encoding (e.g., "UTF-8").
    const NAME: &'static str = Self::KIND.name();

    /// Whether characters occupy a varying number of code units.
    const IS_VARIABLE_WIDTH: bool = Self::KIND.is_variable_width();

    /// The maximum number of code units a single character can occupy.
    const MAX_UNITS_PER_CHAR: usize;

    /// Validates that the given code units are valid for this encoding.
    ///
    /// Returns `Ok(())` if the units are valid, or an `EncodingError` indicating
    /// where validation failed.
    fn validate(units: &[Self::CodeUnit]) -> Result<(), EncodingError>;

    /// Decodes a character starting at the given offset.
    ///
    /// Returns `Some((char, next_offset))` where `next_offset` is the index
    /// immediately after the decoded character, or `None` if no valid character
    /// starts at `offset`.
    fn decode_char_at(units: &[Self::CodeUnit], offset: usize) -> Option<(Self::Char, usize)>;

    /// Decodes the character ending just before the given offset.
    ///
    /// Returns `Some((char, start_offset))`, or `None` if no valid character
    /// ends at `offset`.
    fn decode_char_before(units: &[Self::CodeUnit], offset: usize)
    -> Option<(Self::Char, usize)>;

    /// Checks if the given index is a character boundary.
    fn is_char_boundary(units: &[Self::CodeUnit], index: usize) -> bool;

    /// Returns the number of code units needed to encode the given character.
    fn encoded_len(c: Self::Char) -> usize;

    /// Encodes a character into the given buffer and returns the number of
    /// code units written.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is shorter than [`encoded_len`](Self::encoded_len).
    fn encode_char(c: Self::Char, buf: &mut [Self::CodeUnit]) -> usize;

    /// Converts a scalar value to this encoding's character type, or `None`
    /// if the encoding cannot represent it.
    fn char_from_scalar(c: UChar) -> Option<Self::Char>;
}

/// Marker trait for encodings that can represent every Unicode scalar value.
///
/// Conversions between these encodings are infallible, and only these can be
/// built from UTF-8 with [`String::from_utf8`](crate::String::from_utf8).
pub trait UnicodeEncoding: Encoding<Char = UChar> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_properties() {
        assert!(!EncodingKind::Ascii.is_variable_width());
        assert!(EncodingKind::Utf8.is_variable_width());
        assert!(EncodingKind::Utf16.is_variable_width());
        assert!(!EncodingKind::Utf32.is_variable_width());

        assert!(!EncodingKind::Ascii.is_unicode());
        assert!(EncodingKind::Utf32.is_unicode());

        assert_eq!(EncodingKind::Utf16.code_unit_size(), 2);
        assert_eq!(EncodingKind::Utf32.to_string(), "UTF-32");
    }

    #[test]
    fn test_from_name() {
        for kind in EncodingKind::ALL {
            assert_eq!(EncodingKind::from_name(kind.name()), Some(kind));
            assert_eq!(
                EncodingKind::from_name(&kind.name().to_lowercase()),
                Some(kind)
            );
        }
        assert_eq!(EncodingKind::from_name("utf32"), Some(EncodingKind::Utf32));
        assert_eq!(EncodingKind::from_name(" ascii "), Some(EncodingKind::Ascii));
        assert_eq!(EncodingKind::from_name("utf-7"), None);
        assert_eq!(EncodingKind::from_name(""), None);
    }
}
