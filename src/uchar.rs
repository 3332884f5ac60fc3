//! The Unicode scalar value type.
//!
//! [`UChar`] is the character type of every Unicode string in this crate. It
//! is a `u32` that is guaranteed to hold a Unicode scalar value, i.e. any code
//! point outside the surrogate range `U+D800..=U+DFFF`.
//!
//! # Example
//!
//! ```
//! use unitext::UChar;
//!
//! let c = UChar::from_u32(0x1F600).unwrap();
//! assert_eq!(c.len_utf8(), 4);
//! assert_eq!(&*c.encode_utf16(), &[0xD83D, 0xDE00]);
//!
//! assert!(UChar::from_u32(0xD800).is_none());
//! assert_eq!(UChar::from_u32_lossy(0xD800), UChar::REPLACEMENT_CHARACTER);
//! ```

use core::fmt;
use core::ops::Deref;

use crate::achar::AsciiChar;
use crate::error::InvalidScalarValue;

/// Checks whether `value` is a Unicode scalar value.
///
/// "The set of Unicode scalar values consists of the ranges 0 to 0xD7FF and
/// 0xE000 to 0x10FFFF, inclusive."
#[inline]
pub const fn is_valid_usv(value: u32) -> bool {
    // Maps the surrogate block to the top of the u32 range and everything
    // above U+10FFFF past 0x10F800.
    (value ^ 0xD800).wrapping_sub(0x800) < 0x10F800
}

/// A Unicode scalar value.
///
/// Unlike `char`, the numeric value is the primary interface: construction
/// from a `u32` is checked with [`from_u32`](Self::from_u32) or replaced with
/// [`from_u32_lossy`](Self::from_u32_lossy).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct UChar(u32);

impl UChar {
    /// `U+FFFD REPLACEMENT CHARACTER`, substituted for invalid input.
    pub const REPLACEMENT_CHARACTER: UChar = UChar(0xFFFD);

    /// The smallest scalar value, `U+0000`.
    pub const MIN: UChar = UChar(0);

    /// The largest scalar value, `U+10FFFF`.
    pub const MAX: UChar = UChar(0x10FFFF);

    /// Creates a `UChar` if `value` is a Unicode scalar value.
    #[inline]
    pub const fn from_u32(value: u32) -> Option<Self> {
        if is_valid_usv(value) {
            Some(UChar(value))
        } else {
            None
        }
    }

    /// Creates a `UChar`, substituting [`REPLACEMENT_CHARACTER`](Self::REPLACEMENT_CHARACTER)
    /// if `value` is not a Unicode scalar value.
    #[inline]
    pub const fn from_u32_lossy(value: u32) -> Self {
        if is_valid_usv(value) {
            UChar(value)
        } else {
            Self::REPLACEMENT_CHARACTER
        }
    }

    /// Creates a `UChar` without checking `value`.
    ///
    /// # Safety
    ///
    /// `value` must be a Unicode scalar value.
    #[inline]
    pub const unsafe fn from_u32_unchecked(value: u32) -> Self {
        debug_assert!(is_valid_usv(value));
        UChar(value)
    }

    /// Converts a `char`. Every `char` is a scalar value.
    #[inline]
    pub const fn from_char(c: char) -> Self {
        UChar(c as u32)
    }

    /// Returns the numeric scalar value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Converts to a `char`.
    #[inline]
    pub const fn to_char(self) -> char {
        // SAFETY: `self.0` is a scalar value, which is exactly the domain of `char`.
        unsafe { char::from_u32_unchecked(self.0) }
    }

    /// Returns `true` for `U+0000..=U+007F`.
    #[inline]
    pub const fn is_ascii(self) -> bool {
        self.0 < 0x80
    }

    /// Returns the ASCII character, or `None` if this is not ASCII.
    #[inline]
    pub const fn as_ascii(self) -> Option<AsciiChar> {
        if self.is_ascii() {
            // SAFETY: checked above.
            Some(unsafe { AsciiChar::from_u8_unchecked(self.0 as u8) })
        } else {
            None
        }
    }

    /// Returns the ASCII character, or [`AsciiChar::SUBSTITUTE`] if this is not ASCII.
    #[inline]
    pub const fn as_ascii_lossy(self) -> AsciiChar {
        match self.as_ascii() {
            Some(c) => c,
            None => AsciiChar::SUBSTITUTE,
        }
    }

    /// Returns the number of bytes this scalar occupies in UTF-8.
    #[inline]
    pub const fn len_utf8(self) -> usize {
        if self.0 < 0x80 {
            1
        } else if self.0 < 0x800 {
            2
        } else if self.0 < 0x10000 {
            3
        } else {
            4
        }
    }

    /// Returns the number of 16-bit code units this scalar occupies in UTF-16.
    #[inline]
    pub const fn len_utf16(self) -> usize {
        if self.0 < 0x10000 { 1 } else { 2 }
    }

    /// Encodes this scalar as UTF-8.
    pub const fn encode_utf8(self) -> EncodeUtf8 {
        let v = self.0;
        let mut buf = [0u8; 4];
        let len = self.len_utf8();

        match len {
            1 => {
                buf[0] = v as u8;
            }
            2 => {
                buf[0] = ((v >> 6) | 0xC0) as u8;
                buf[1] = ((v & 0x3F) | 0x80) as u8;
            }
            3 => {
                buf[0] = ((v >> 12) | 0xE0) as u8;
                buf[1] = (((v >> 6) & 0x3F) | 0x80) as u8;
                buf[2] = ((v & 0x3F) | 0x80) as u8;
            }
            _ => {
                buf[0] = ((v >> 18) | 0xF0) as u8;
                buf[1] = (((v >> 12) & 0x3F) | 0x80) as u8;
                buf[2] = (((v >> 6) & 0x3F) | 0x80) as u8;
                buf[3] = ((v & 0x3F) | 0x80) as u8;
            }
        }

        EncodeUtf8 {
            buf,
            len: len as u8,
        }
    }

    /// Encodes this scalar as UTF-16.
    pub const fn encode_utf16(self) -> EncodeUtf16 {
        let mut buf = [0u16; 2];

        if self.0 < 0x10000 {
            buf[0] = self.0 as u16;
            EncodeUtf16 { buf, len: 1 }
        } else {
            let code = self.0 - 0x10000;
            buf[0] = (0xD800 | (code >> 10)) as u16;
            buf[1] = (0xDC00 | (code & 0x3FF)) as u16;
            EncodeUtf16 { buf, len: 2 }
        }
    }

    /// Returns the full lowercase mapping of this scalar (one to three scalars).
    pub fn to_lowercase(self) -> CaseMapping {
        CaseMapping::collect(self.to_char().to_lowercase())
    }

    /// Returns the full uppercase mapping of this scalar (one to three scalars).
    pub fn to_uppercase(self) -> CaseMapping {
        CaseMapping::collect(self.to_char().to_uppercase())
    }
}

impl From<char> for UChar {
    #[inline]
    fn from(c: char) -> Self {
        UChar::from_char(c)
    }
}

impl From<UChar> for char {
    #[inline]
    fn from(c: UChar) -> Self {
        c.to_char()
    }
}

impl From<UChar> for u32 {
    #[inline]
    fn from(c: UChar) -> Self {
        c.0
    }
}

impl From<AsciiChar> for UChar {
    #[inline]
    fn from(c: AsciiChar) -> Self {
        UChar(c.value() as u32)
    }
}

impl TryFrom<u32> for UChar {
    type Error = InvalidScalarValue;

    #[inline]
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        UChar::from_u32(value).ok_or(InvalidScalarValue(value))
    }
}

impl PartialEq<char> for UChar {
    #[inline]
    fn eq(&self, other: &char) -> bool {
        self.0 == *other as u32
    }
}

impl fmt::Display for UChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_char(), f)
    }
}

impl fmt::Debug for UChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.0)
    }
}

/// The UTF-8 encoding of one [`UChar`]: one to four bytes stored inline.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodeUtf8 {
    buf: [u8; 4],
    len: u8,
}

impl EncodeUtf8 {
    /// Returns the encoded bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl Deref for EncodeUtf8 {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Debug for EncodeUtf8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// The UTF-16 encoding of one [`UChar`]: one or two code units stored inline.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodeUtf16 {
    buf: [u16; 2],
    len: u8,
}

impl EncodeUtf16 {
    /// Returns the encoded code units.
    #[inline]
    pub fn as_slice(&self) -> &[u16] {
        &self.buf[..self.len as usize]
    }
}

impl Deref for EncodeUtf16 {
    type Target = [u16];

    #[inline]
    fn deref(&self) -> &[u16] {
        self.as_slice()
    }
}

impl fmt::Debug for EncodeUtf16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// The result of a case conversion: up to three scalars stored inline.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseMapping {
    chars: [UChar; 3],
    len: u8,
}

impl CaseMapping {
    fn collect(iter: impl Iterator<Item = char>) -> Self {
        let mut chars = [UChar::MIN; 3];
        let mut len = 0;
        for c in iter.take(3) {
            chars[len] = UChar::from_char(c);
            len += 1;
        }
        CaseMapping {
            chars,
            len: len as u8,
        }
    }

    /// Returns the mapped scalars.
    #[inline]
    pub fn as_slice(&self) -> &[UChar] {
        &self.chars[..self.len as usize]
    }
}

impl Deref for CaseMapping {
    type Target = [UChar];

    #[inline]
    fn deref(&self) -> &[UChar] {
        self.as_slice()
    }
}

impl fmt::Debug for CaseMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
