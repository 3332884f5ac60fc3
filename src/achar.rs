//! The ASCII scalar type.

use core::fmt;

use crate::error::NonAsciiValue;
use crate::uchar::UChar;

/// An ASCII character, `0x00..=0x7F`.
///
/// This is the character type of [`AsciiString`](crate::AsciiString).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct AsciiChar(u8);

impl AsciiChar {
    /// The ASCII `SUB` control character, substituted for invalid input.
    pub const SUBSTITUTE: AsciiChar = AsciiChar(0x1A);

    /// The ASCII `NUL` character.
    pub const NUL: AsciiChar = AsciiChar(0);

    /// Creates an `AsciiChar` if `value` is ASCII.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        if value < 0x80 {
            Some(AsciiChar(value))
        } else {
            None
        }
    }

    /// Creates an `AsciiChar`, substituting [`SUBSTITUTE`](Self::SUBSTITUTE)
    /// if `value` is not ASCII.
    #[inline]
    pub const fn from_u8_lossy(value: u8) -> Self {
        if value < 0x80 {
            AsciiChar(value)
        } else {
            Self::SUBSTITUTE
        }
    }

    /// Creates an `AsciiChar` without checking `value`.
    ///
    /// # Safety
    ///
    /// `value` must be less than `0x80`.
    #[inline]
    pub const unsafe fn from_u8_unchecked(value: u8) -> Self {
        debug_assert!(value < 0x80);
        AsciiChar(value)
    }

    /// Converts a `char` if it is ASCII.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        if c.is_ascii() {
            Some(AsciiChar(c as u8))
        } else {
            None
        }
    }

    /// Returns the byte value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Converts to a `char`.
    #[inline]
    pub const fn to_char(self) -> char {
        self.0 as char
    }

    /// Widens to a Unicode scalar value.
    #[inline]
    pub const fn to_uchar(self) -> UChar {
        UChar::from_char(self.to_char())
    }

    /// Maps `A..=Z` to `a..=z`, leaving everything else unchanged.
    #[inline]
    pub const fn to_lowercase(self) -> Self {
        AsciiChar(self.0.to_ascii_lowercase())
    }

    /// Maps `a..=z` to `A..=Z`, leaving everything else unchanged.
    #[inline]
    pub const fn to_uppercase(self) -> Self {
        AsciiChar(self.0.to_ascii_uppercase())
    }
}

impl From<AsciiChar> for u8 {
    #[inline]
    fn from(c: AsciiChar) -> Self {
        c.0
    }
}

impl From<AsciiChar> for char {
    #[inline]
    fn from(c: AsciiChar) -> Self {
        c.to_char()
    }
}

impl TryFrom<u8> for AsciiChar {
    type Error = NonAsciiValue;

    #[inline]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        AsciiChar::from_u8(value).ok_or(NonAsciiValue(value as u32))
    }
}

impl TryFrom<char> for AsciiChar {
    type Error = NonAsciiValue;

    #[inline]
    fn try_from(c: char) -> Result<Self, Self::Error> {
        AsciiChar::from_char(c).ok_or(NonAsciiValue(c as u32))
    }
}

impl TryFrom<UChar> for AsciiChar {
    type Error = NonAsciiValue;

    #[inline]
    fn try_from(c: UChar) -> Result<Self, Self::Error> {
        c.as_ascii().ok_or(NonAsciiValue(c.value()))
    }
}

impl fmt::Display for AsciiChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_char(), f)
    }
}

impl fmt::Debug for AsciiChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_char(), f)
    }
}
