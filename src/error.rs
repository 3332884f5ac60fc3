use alloc::vec::Vec;
use core::fmt;

use crate::encoding::Encoding;
use crate::uchar::UChar;

/// An error returned when a byte sequence is not valid UTF-8.
///
/// Matches the shape of `std::str::Utf8Error`, with the error length narrowed
/// to a `u8` since a maximal subpart is never longer than three bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Utf8Error {
    valid_up_to: usize,
    error_length: Option<u8>,
}

impl Utf8Error {
    /// Creates a new UTF-8 error.
    #[inline]
    pub const fn new(valid_up_to: usize, error_length: Option<u8>) -> Self {
        Self {
            valid_up_to,
            error_length,
        }
    }

    /// Returns the number of bytes that form complete, valid code points
    /// before the error.
    ///
    /// It is the maximum index such that `bytes[..index]` is valid UTF-8.
    #[inline]
    pub const fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Provides more information about the failure:
    ///
    /// * `None`: the end of the input was reached in the middle of a code point.
    /// * `Some(len)`: an unexpected byte was encountered. `len` bytes starting at
    ///   `valid_up_to()` form the maximal subpart to replace before decoding
    ///   resumes at `valid_up_to() + len`.
    #[inline]
    pub const fn error_length(&self) -> Option<u8> {
        self.error_length
    }

    /// Returns `true` if the input ended in the middle of a code point.
    #[inline]
    pub const fn is_truncated(&self) -> bool {
        self.error_length.is_none()
    }
}

impl fmt::Display for Utf8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error_length) = self.error_length {
            write!(
                f,
                "invalid utf-8 sequence of {} bytes from index {}",
                error_length, self.valid_up_to
            )
        } else {
            write!(
                f,
                "incomplete utf-8 byte sequence from index {}",
                self.valid_up_to
            )
        }
    }
}

impl core::error::Error for Utf8Error {}

/// An error indicating that a code unit slice is not valid for a given encoding.
///
/// Offsets and lengths are in code units of that encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodingError {
    valid_up_to: usize,
    error_len: Option<usize>,
}

impl EncodingError {
    /// Creates a new encoding error.
    #[inline]
    pub const fn new(valid_up_to: usize, error_len: Option<usize>) -> Self {
        Self {
            valid_up_to,
            error_len,
        }
    }

    /// Returns the index up to which valid encoded data was verified.
    ///
    /// It is the maximum index such that `units[..index]` is valid.
    #[inline]
    pub const fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Provides more information about the failure:
    ///
    /// * `None`: the end of the input was reached unexpectedly.
    /// * `Some(len)`: an unexpected code unit was encountered. The length
    ///   indicates how many code units starting at `valid_up_to()` are invalid.
    #[inline]
    pub const fn error_len(&self) -> Option<usize> {
        self.error_len
    }
}

impl From<Utf8Error> for EncodingError {
    #[inline]
    fn from(e: Utf8Error) -> Self {
        EncodingError::new(e.valid_up_to, e.error_length.map(usize::from))
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error_len) = self.error_len {
            write!(
                f,
                "invalid encoding sequence of {} code units from index {}",
                error_len, self.valid_up_to
            )
        } else {
            write!(
                f,
                "incomplete encoding sequence from index {}",
                self.valid_up_to
            )
        }
    }
}

impl core::error::Error for EncodingError {}

/// An error returned when an owned byte vector is not valid UTF-8.
///
/// Matches the shape of `std::string::FromUtf8Error`: the bytes are handed back.
pub struct FromUtf8Error {
    bytes: Vec<u8>,
    error: Utf8Error,
}

impl FromUtf8Error {
    #[inline]
    pub(crate) fn new(bytes: Vec<u8>, error: Utf8Error) -> Self {
        Self { bytes, error }
    }

    /// Returns a slice of the bytes that were attempted to be converted.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes this error, returning the bytes that were attempted to be converted.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the UTF-8 error that caused the conversion to fail.
    #[inline]
    pub fn utf8_error(&self) -> Utf8Error {
        self.error
    }
}

impl fmt::Debug for FromUtf8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromUtf8Error")
            .field("bytes", &self.bytes)
            .field("error", &self.error)
            .finish()
    }
}

impl fmt::Display for FromUtf8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl core::error::Error for FromUtf8Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl Clone for FromUtf8Error {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            error: self.error,
        }
    }
}

impl PartialEq for FromUtf8Error {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes && self.error == other.error
    }
}

impl Eq for FromUtf8Error {}

/// An error returned when conversion from a `Vec` of code units to `String<E>` fails.
pub struct FromCodeUnitsError<E: Encoding> {
    units: Vec<E::CodeUnit>,
    error: EncodingError,
}

impl<E: Encoding> FromCodeUnitsError<E> {
    #[inline]
    pub(crate) fn new(units: Vec<E::CodeUnit>, error: EncodingError) -> Self {
        Self { units, error }
    }

    /// Returns the code units that were attempted to be converted.
    #[inline]
    pub fn as_code_units(&self) -> &[E::CodeUnit] {
        &self.units
    }

    /// Consumes this error, returning the code units that were attempted to be converted.
    #[inline]
    pub fn into_code_units(self) -> Vec<E::CodeUnit> {
        self.units
    }

    /// Returns the encoding error that caused the conversion to fail.
    #[inline]
    pub fn encoding_error(&self) -> EncodingError {
        self.error
    }
}

impl<E: Encoding> fmt::Debug for FromCodeUnitsError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromCodeUnitsError")
            .field("encoding", &E::NAME)
            .field("units", &self.units)
            .field("error", &self.error)
            .finish()
    }
}

impl<E: Encoding> fmt::Display for FromCodeUnitsError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", E::NAME, self.error)
    }
}

impl<E: Encoding> core::error::Error for FromCodeUnitsError<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<E: Encoding> Clone for FromCodeUnitsError<E> {
    fn clone(&self) -> Self {
        Self {
            units: self.units.clone(),
            error: self.error,
        }
    }
}

impl<E: Encoding> PartialEq for FromCodeUnitsError<E> {
    fn eq(&self, other: &Self) -> bool {
        self.units == other.units && self.error == other.error
    }
}

impl<E: Encoding> Eq for FromCodeUnitsError<E> {}

/// An error when transcoding to an encoding that cannot represent all characters.
///
/// Only ASCII is such an encoding in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeError {
    /// The character that couldn't be encoded.
    pub character: UChar,
    /// The index (in characters) where the error occurred.
    pub index: usize,
}

impl TranscodeError {
    /// Creates a new transcode error.
    #[inline]
    pub const fn new(character: UChar, index: usize) -> Self {
        Self { character, index }
    }

    /// Returns the character that couldn't be encoded.
    #[inline]
    pub const fn character(&self) -> UChar {
        self.character
    }

    /// Returns the character index where the error occurred.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for TranscodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "character '{}' ({:?}) at index {} cannot be encoded in target encoding",
            self.character, self.character, self.index
        )
    }
}

impl core::error::Error for TranscodeError {}

/// Error returned when a `u32` is not a Unicode scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidScalarValue(pub u32);

impl fmt::Display for InvalidScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X} is not a unicode scalar value", self.0)
    }
}

impl core::error::Error for InvalidScalarValue {}

/// Error returned when a value is outside the ASCII range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonAsciiValue(pub u32);

impl fmt::Display for NonAsciiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X} is not an ascii character", self.0)
    }
}

impl core::error::Error for NonAsciiValue {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Utf16;

    #[test]
    fn test_utf8_error_display() {
        let e = Utf8Error::new(3, Some(2));
        assert_eq!(e.to_string(), "invalid utf-8 sequence of 2 bytes from index 3");
        assert!(!e.is_truncated());

        let e = Utf8Error::new(0, None);
        assert_eq!(e.to_string(), "incomplete utf-8 byte sequence from index 0");
        assert!(e.is_truncated());
    }

    #[test]
    fn test_utf8_error_widens() {
        let e: EncodingError = Utf8Error::new(5, Some(3)).into();
        assert_eq!(e, EncodingError::new(5, Some(3)));
        let e: EncodingError = Utf8Error::new(1, None).into();
        assert_eq!(e.error_len(), None);
    }

    #[test]
    fn test_from_code_units_error_source() {
        use core::error::Error;

        let err = FromCodeUnitsError::<Utf16>::new(alloc::vec![0xDC00], EncodingError::new(0, Some(1)));
        assert_eq!(err.to_string(), "UTF-16: invalid encoding sequence of 1 code units from index 0");
        assert!(err.source().is_some());
        assert_eq!(err.clone().into_code_units(), alloc::vec![0xDC00]);
    }
}
