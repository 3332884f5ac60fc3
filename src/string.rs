use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FromIterator;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Deref};
use std::collections::TryReserveError;

use log::debug;

use crate::Str;
use crate::decode;
use crate::encoding::{Encoding, EncodingKind, UnicodeEncoding};
use crate::error::{FromCodeUnitsError, TranscodeError, Utf8Error};
use crate::reserve::{self, ReserveBuffer};
use crate::uchar::UChar;

/// An owned string in encoding `E`.
///
/// This is the owned counterpart to [`Str<E>`], analogous to how
/// `std::string::String` relates to `str`. The code units are always valid
/// for `E`.
pub struct String<E: Encoding> {
    units: Vec<E::CodeUnit>,
    _marker: PhantomData<E>,
}

impl<E: Encoding> String<E> {
    // === Construction ===

    /// Creates a new empty `String`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            units: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Creates a new empty `String` with room for at least `capacity` code units.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            units: Vec::with_capacity(capacity),
            _marker: PhantomData,
        }
    }

    /// Tries to create a new empty `String` with room for at least `capacity`
    /// code units.
    #[inline]
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut units = Vec::new();
        units.try_reserve(capacity)?;
        Ok(Self {
            units,
            _marker: PhantomData,
        })
    }

    /// Converts a vector of code units to a `String` without copying.
    ///
    /// Returns an error holding the vector if the units are not valid for
    /// this encoding.
    #[inline]
    pub fn from_code_units(units: Vec<E::CodeUnit>) -> Result<Self, FromCodeUnitsError<E>> {
        match E::validate(&units) {
            Ok(()) => Ok(Self {
                units,
                _marker: PhantomData,
            }),
            Err(e) => Err(FromCodeUnitsError::new(units, e)),
        }
    }

    /// Converts a vector of code units to a `String` without checking validity.
    ///
    /// # Safety
    ///
    /// The units must be valid for this encoding.
    #[inline]
    pub unsafe fn from_code_units_unchecked(units: Vec<E::CodeUnit>) -> Self {
        Self {
            units,
            _marker: PhantomData,
        }
    }

    // === Capacity ===

    /// Returns this `String`'s capacity, in code units.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.units.capacity()
    }

    /// The largest number of code units a `String<E>` can hold.
    #[inline]
    pub const fn max_len() -> usize {
        reserve::max_len_of::<E::CodeUnit>()
    }

    /// Reserves capacity for at least `additional` more code units.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.units.reserve(additional);
    }

    /// Tries to reserve capacity for at least `additional` more code units.
    #[inline]
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.units.try_reserve(additional)
    }

    /// Reserves room for transcoding `len` code units of encoding `from`
    /// into this string.
    ///
    /// Reserves the worst-case output size if possible, and otherwise the
    /// best-case size. Contents are never changed.
    ///
    /// ```
    /// use unitext::{EncodingKind, Utf8String};
    ///
    /// let mut s = Utf8String::new();
    /// s.reserve_for_transcoding_from(EncodingKind::Utf16, 10);
    /// assert!(s.capacity() >= 30);
    /// ```
    #[inline]
    pub fn reserve_for_transcoding_from(&mut self, from: EncodingKind, len: usize) {
        reserve::reserve_for_transcoding(self, from, E::KIND, len);
    }

    /// Like [`reserve_for_transcoding_from`](Self::reserve_for_transcoding_from),
    /// but returns an error if not even the best-case size can be reserved.
    #[inline]
    pub fn try_reserve_for_transcoding_from(
        &mut self,
        from: EncodingKind,
        len: usize,
    ) -> Result<(), TryReserveError> {
        reserve::try_reserve_for_transcoding(self, from, E::KIND, len)
    }

    /// Shrinks the capacity of this `String` to match its length.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.units.shrink_to_fit();
    }

    // === Mutation ===

    /// Appends the given character to the end of this `String`.
    pub fn push(&mut self, c: E::Char) {
        let mut buf = [E::CodeUnit::default(); 4];
        let len = E::encode_char(c, &mut buf);
        self.units.extend_from_slice(&buf[..len]);
    }

    /// Appends a given string slice onto the end of this `String`.
    #[inline]
    pub fn push_str(&mut self, string: &Str<E>) {
        self.units.extend_from_slice(string.as_code_units());
    }

    /// Appends a single code unit.
    ///
    /// # Safety
    ///
    /// The string must be valid again, or discarded, before it is observed.
    #[inline]
    pub(crate) unsafe fn push_code_unit(&mut self, unit: E::CodeUnit) {
        self.units.push(unit);
    }

    /// Appends a run of code units.
    ///
    /// # Safety
    ///
    /// `units` must be valid for this encoding and start on a character boundary.
    #[inline]
    pub(crate) unsafe fn extend_from_code_units(&mut self, units: &[E::CodeUnit]) {
        self.units.extend_from_slice(units);
    }

    /// Appends bytes, widening each into one code unit.
    ///
    /// # Safety
    ///
    /// The widened bytes must be valid for this encoding.
    #[inline]
    pub(crate) unsafe fn extend_from_bytes(&mut self, bytes: &[u8]) {
        self.units.extend(bytes.iter().map(|&b| E::CodeUnit::from(b)));
    }

    /// Removes the last character from the string and returns it.
    pub fn pop(&mut self) -> Option<E::Char> {
        let (c, start) = E::decode_char_before(&self.units, self.units.len())?;
        self.units.truncate(start);
        Some(c)
    }

    /// Truncates this `String`, removing all contents.
    #[inline]
    pub fn clear(&mut self) {
        self.units.clear();
    }

    /// Shortens this `String` to `new_len` code units.
    ///
    /// Has no effect if `new_len` is greater than the current length.
    ///
    /// # Panics
    ///
    /// Panics if `new_len` does not lie on a character boundary.
    #[inline]
    pub fn truncate(&mut self, new_len: usize) {
        if new_len < self.len() {
            assert!(
                self.is_char_boundary(new_len),
                "new_len is not a char boundary"
            );
            self.units.truncate(new_len);
        }
    }

    // === Conversion ===

    /// Converts a `String` into its code units.
    #[inline]
    pub fn into_code_units(self) -> Vec<E::CodeUnit> {
        self.units
    }

    /// Extracts a string slice containing the entire `String`.
    #[inline]
    pub fn as_str(&self) -> &Str<E> {
        // SAFETY: self.units is always valid for encoding E
        unsafe { Str::from_code_units_unchecked(&self.units) }
    }
}

impl<E: UnicodeEncoding> String<E> {
    /// Decodes UTF-8 into this encoding.
    ///
    /// ```
    /// use unitext::{Utf16String, Utf8Error};
    ///
    /// let s = Utf16String::from_utf8("hé".as_bytes()).unwrap();
    /// assert_eq!(s.as_code_units(), &[0x68, 0xE9]);
    ///
    /// let err = Utf16String::from_utf8(&[0xC0, 0xB6]).unwrap_err();
    /// assert_eq!(err, Utf8Error::new(0, Some(1)));
    /// ```
    #[inline]
    pub fn from_utf8(bytes: &[u8]) -> Result<Self, Utf8Error> {
        decode::transcode_from_utf8_slice(bytes)
    }

    /// Decodes UTF-8 into this encoding without validating it.
    ///
    /// # Safety
    ///
    /// `bytes` must be valid UTF-8.
    #[inline]
    pub unsafe fn from_utf8_unchecked(bytes: &[u8]) -> Self {
        // SAFETY: forwarded from the caller.
        unsafe { decode::transcode_from_utf8_unchecked(bytes) }
    }

    /// Decodes UTF-8 into this encoding, replacing ill-formed sequences with
    /// `U+FFFD`.
    ///
    /// ```
    /// use unitext::Utf32String;
    ///
    /// let s = Utf32String::from_utf8_lossy(b"a\xF0\x9F\x98b");
    /// assert_eq!(s.as_code_units(), &[0x61, 0xFFFD, 0x62]);
    /// ```
    #[inline]
    pub fn from_utf8_lossy(bytes: &[u8]) -> Self {
        decode::transcode_from_utf8_lossy(bytes)
    }
}

impl<E: Encoding> ReserveBuffer for String<E> {
    #[inline]
    fn len(&self) -> usize {
        self.units.len()
    }

    #[inline]
    fn max_len(&self) -> usize {
        reserve::max_len_of::<E::CodeUnit>()
    }

    #[inline]
    fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.units.try_reserve(additional)
    }

    #[inline]
    fn reserve(&mut self, additional: usize) {
        self.units.reserve(additional)
    }
}

// === Trait implementations ===

impl<E: Encoding> Clone for String<E> {
    fn clone(&self) -> Self {
        Self {
            units: self.units.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E: Encoding> Default for String<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Encoding> Deref for String<E> {
    type Target = Str<E>;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl<E: Encoding> Borrow<Str<E>> for String<E> {
    fn borrow(&self) -> &Str<E> {
        self.as_str()
    }
}

impl<E: Encoding> fmt::Debug for String<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<E: Encoding> fmt::Display for String<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl<E: Encoding> Hash for String<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl<E: Encoding> PartialEq for String<E> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<E: Encoding> Eq for String<E> {}

impl<E: Encoding> PartialEq<Str<E>> for String<E> {
    fn eq(&self, other: &Str<E>) -> bool {
        self.as_str() == other
    }
}

impl<E: Encoding> PartialEq<&Str<E>> for String<E> {
    fn eq(&self, other: &&Str<E>) -> bool {
        self.as_str() == *other
    }
}

impl<E: Encoding> PartialEq<String<E>> for Str<E> {
    fn eq(&self, other: &String<E>) -> bool {
        self == other.as_str()
    }
}

impl<E: Encoding> PartialOrd for String<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: Encoding> Ord for String<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl<E: Encoding> FromIterator<E::Char> for String<E> {
    fn from_iter<I: IntoIterator<Item = E::Char>>(iter: I) -> Self {
        let mut s = String::new();
        s.extend(iter);
        s
    }
}

impl<E: Encoding> Extend<E::Char> for String<E> {
    fn extend<I: IntoIterator<Item = E::Char>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for c in iter {
            self.push(c);
        }
    }
}

impl<E: Encoding> AsRef<Str<E>> for String<E> {
    fn as_ref(&self) -> &Str<E> {
        self.as_str()
    }
}

impl<E: Encoding> AsRef<[E::CodeUnit]> for String<E> {
    fn as_ref(&self) -> &[E::CodeUnit] {
        self.as_code_units()
    }
}

impl<E: Encoding> From<&Str<E>> for String<E> {
    fn from(s: &Str<E>) -> Self {
        Self {
            units: s.as_code_units().to_vec(),
            _marker: PhantomData,
        }
    }
}

impl<E: UnicodeEncoding> From<&str> for String<E> {
    /// Transcodes a `&str`. For `String<Utf8>` this is a plain copy.
    #[inline]
    fn from(s: &str) -> Self {
        // SAFETY: &str is always valid UTF-8
        unsafe { decode::transcode_from_utf8_unchecked(s.as_bytes()) }
    }
}

impl<E: UnicodeEncoding> From<char> for String<E> {
    fn from(c: char) -> Self {
        let mut s = String::new();
        s.push(UChar::from_char(c));
        s
    }
}

impl<E: Encoding> fmt::Write for String<E> {
    /// Fails if `s` holds a character this encoding cannot represent; the
    /// characters before it are kept.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            self.write_char(c)?;
        }
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        let c = E::char_from_scalar(UChar::from_char(c)).ok_or(fmt::Error)?;
        self.push(c);
        Ok(())
    }
}

impl<'a, E: Encoding> Add<&'a Str<E>> for String<E> {
    type Output = String<E>;

    fn add(mut self, other: &'a Str<E>) -> String<E> {
        self.push_str(other);
        self
    }
}

impl<'a, E: Encoding> AddAssign<&'a Str<E>> for String<E> {
    fn add_assign(&mut self, other: &'a Str<E>) {
        self.push_str(other);
    }
}

impl<E: Encoding> core::str::FromStr for String<E> {
    type Err = TranscodeError;

    /// Parses a `&str` into a `String<E>` by transcoding from UTF-8.
    ///
    /// For Unicode encodings this always succeeds. For ASCII it fails at
    /// the first non-ASCII character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let result = Str::<crate::Utf8>::from_std(s).try_transcode();
        if let Err(e) = &result {
            debug!("cannot represent {:?} in {}", e.character(), E::NAME);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ascii, AsciiChar, Utf8, Utf16, Utf32};
    use core::fmt::Write;

    #[test]
    fn test_push_pop() {
        let mut s = String::<Utf16>::new();
        s.push(UChar::from('a'));
        s.push(UChar::from('😀'));
        assert_eq!(s.as_code_units(), &[0x61, 0xD83D, 0xDE00]);
        assert_eq!(s.pop(), Some(UChar::from('😀')));
        assert_eq!(s.pop(), Some(UChar::from('a')));
        assert_eq!(s.pop(), None);
    }

    #[test]
    fn test_from_code_units() {
        let s = String::<Utf32>::from_code_units(vec![0x61, 0x1F600]).unwrap();
        assert_eq!(s.char_count(), 2);

        let err = String::<Utf32>::from_code_units(vec![0x61, 0xD800]).unwrap_err();
        assert_eq!(err.encoding_error().valid_up_to(), 1);
        assert_eq!(err.into_code_units(), vec![0x61, 0xD800]);
    }

    #[test]
    fn test_truncate() {
        let mut s = String::<Utf8>::from("a€");
        s.truncate(10);
        assert_eq!(s.len(), 4);
        s.truncate(1);
        assert_eq!(s.as_std(), "a");
        s.clear();
        assert!(s.is_empty());
    }

    #[test]
    #[should_panic(expected = "new_len is not a char boundary")]
    fn test_truncate_inside_char() {
        let mut s = String::<Utf16>::from("😀");
        s.truncate(1);
    }

    #[test]
    fn test_from_str() {
        let s: String<Utf16> = "hé".parse().unwrap();
        assert_eq!(s.as_code_units(), &[0x68, 0xE9]);

        let err = "hé".parse::<String<Ascii>>().unwrap_err();
        assert_eq!(err.index(), 1);
    }

    #[test]
    fn test_fmt_write() {
        let mut s = String::<Utf32>::new();
        write!(s, "{}-{}", 1, 'ß').unwrap();
        assert_eq!(s.as_code_units(), &[0x31, 0x2D, 0xDF]);

        let mut ascii = String::<Ascii>::new();
        assert!(write!(ascii, "ok").is_ok());
        assert!(write!(ascii, "é").is_err());
        assert_eq!(ascii.as_code_units(), b"ok");
    }

    #[test]
    fn test_collect_and_extend() {
        let s: String<Ascii> = b"abc".iter().filter_map(|&b| AsciiChar::from_u8(b)).collect();
        assert_eq!(s.as_code_units(), b"abc");

        let mut wide = String::<Utf16>::from('x');
        wide.extend("yz".chars().map(UChar::from));
        assert_eq!(wide.to_string(), "xyz");
    }

    #[test]
    fn test_add() {
        let a = String::<Utf8>::from("foo");
        let b = String::<Utf8>::from("bar");
        let mut c = a + b.as_str();
        c += Str::from_std("!");
        assert_eq!(c.as_std(), "foobar!");
        assert!(String::<Utf8>::from("a") < String::<Utf8>::from("b"));
    }

    #[test]
    fn test_reserve_for_transcoding() {
        let mut s = String::<Utf16>::new();
        s.reserve_for_transcoding_from(EncodingKind::Utf32, 8);
        assert!(s.capacity() >= 16);

        let mut s = String::<Utf8>::from("keep");
        s.try_reserve_for_transcoding_from(EncodingKind::Utf32, 4).unwrap();
        assert!(s.capacity() >= 4 + 16);
        assert_eq!(s.as_std(), "keep");
    }

    #[test]
    fn test_try_reserve_beyond_max_len() {
        let mut s = String::<Utf32>::new();
        assert_eq!(String::<Utf32>::max_len(), isize::MAX as usize / 4);
        assert!(s.try_reserve(String::<Utf32>::max_len() + 1).is_err());
        assert!(s.is_empty());
    }
}
