use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Index, Range, RangeFrom, RangeFull, RangeTo};

use crate::String;
use crate::encoding::{Encoding, UnicodeEncoding};
use crate::error::{EncodingError, TranscodeError};
use crate::iter::{CharIndices, Chars};
use crate::uchar::UChar;

/// A borrowed string slice in encoding `E`.
///
/// This is the borrowed counterpart to [`String<E>`], analogous to how
/// `str` relates to `std::string::String`. Lengths and indices are in code
/// units of `E`.
#[repr(transparent)]
pub struct Str<E: Encoding> {
    _marker: PhantomData<E>,
    units: [E::CodeUnit],
}

impl<E: Encoding> Str<E> {
    // === Construction ===

    /// Converts a code unit slice to a string slice.
    ///
    /// Returns an error if the units are not valid for this encoding.
    ///
    /// ```
    /// use unitext::{Str, Utf16};
    ///
    /// assert!(Str::<Utf16>::from_code_units(&[0xD83D, 0xDE00]).is_ok());
    /// assert!(Str::<Utf16>::from_code_units(&[0xDE00]).is_err());
    /// ```
    #[inline]
    pub fn from_code_units(units: &[E::CodeUnit]) -> Result<&Self, EncodingError> {
        E::validate(units)?;
        // SAFETY: validated above.
        Ok(unsafe { Self::from_code_units_unchecked(units) })
    }

    /// Converts a code unit slice to a string slice without checking validity.
    ///
    /// # Safety
    ///
    /// The units must be valid for this encoding.
    #[inline]
    pub unsafe fn from_code_units_unchecked(units: &[E::CodeUnit]) -> &Self {
        // SAFETY: Str<E> is repr(transparent) over [E::CodeUnit], and the
        // caller guarantees the units are valid for encoding E.
        unsafe { &*(units as *const [E::CodeUnit] as *const Self) }
    }

    // === Length ===

    /// Returns the length of `self` in code units.
    #[inline]
    pub const fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if `self` has a length of zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns the number of characters. Linear for variable-width encodings.
    #[inline]
    pub fn char_count(&self) -> usize {
        if E::IS_VARIABLE_WIDTH {
            self.chars().count()
        } else {
            self.len()
        }
    }

    /// Checks that `index` is the first code unit of a character or the end
    /// of the string.
    #[inline]
    pub fn is_char_boundary(&self, index: usize) -> bool {
        if index == 0 || index == self.len() {
            true
        } else if index > self.len() {
            false
        } else {
            E::is_char_boundary(&self.units, index)
        }
    }

    // === Access ===

    /// Returns the underlying code units.
    #[inline]
    pub const fn as_code_units(&self) -> &[E::CodeUnit] {
        &self.units
    }

    /// Returns a subslice of `self`.
    ///
    /// Returns `None` if the range is out of bounds or not on character boundaries.
    #[inline]
    pub fn get(&self, range: Range<usize>) -> Option<&Self> {
        if range.start <= range.end
            && range.end <= self.len()
            && self.is_char_boundary(range.start)
            && self.is_char_boundary(range.end)
        {
            // SAFETY: both ends are character boundaries.
            Some(unsafe { Self::from_code_units_unchecked(&self.units[range]) })
        } else {
            None
        }
    }

    /// Divides the slice in two at a character boundary.
    ///
    /// # Panics
    ///
    /// Panics if `mid` is not on a character boundary.
    pub fn split_at(&self, mid: usize) -> (&Self, &Self) {
        assert!(self.is_char_boundary(mid), "mid is not a char boundary");
        let (head, tail) = self.units.split_at(mid);
        // SAFETY: `mid` is a character boundary.
        unsafe {
            (
                Self::from_code_units_unchecked(head),
                Self::from_code_units_unchecked(tail),
            )
        }
    }

    // === Iteration ===

    /// Returns an iterator over the characters of the string.
    #[inline]
    pub fn chars(&self) -> Chars<'_, E> {
        Chars::new(self)
    }

    /// Returns an iterator over the characters and their code unit offsets.
    #[inline]
    pub fn char_indices(&self) -> CharIndices<'_, E> {
        CharIndices::new(self)
    }

    // === Conversion ===

    /// Copies this slice into an owned string.
    #[inline]
    pub fn to_owned_string(&self) -> String<E> {
        String::from(self)
    }

    /// Converts to an encoding that can represent every character.
    ///
    /// ```
    /// use unitext::{Str, Utf8, Utf32};
    ///
    /// let s = Str::<Utf8>::from_std("añ😀");
    /// let wide = s.transcode::<Utf32>();
    /// assert_eq!(wide.as_code_units(), &[0x61, 0xF1, 0x1F600]);
    /// ```
    pub fn transcode<F: UnicodeEncoding>(&self) -> String<F> {
        let mut out = String::<F>::new();
        out.reserve_for_transcoding_from(E::KIND, self.len());
        for c in self.chars() {
            out.push(c.into());
        }
        out
    }

    /// Converts to any encoding, failing at the first character the target
    /// cannot represent.
    ///
    /// ```
    /// use unitext::{Ascii, Str, Utf8};
    ///
    /// assert!(Str::<Utf8>::from_std("plain").try_transcode::<Ascii>().is_ok());
    ///
    /// let err = Str::<Utf8>::from_std("café").try_transcode::<Ascii>().unwrap_err();
    /// assert_eq!(err.index(), 3);
    /// ```
    pub fn try_transcode<F: Encoding>(&self) -> Result<String<F>, TranscodeError> {
        let mut out = String::<F>::new();
        out.reserve_for_transcoding_from(E::KIND, self.len());
        for (index, c) in self.chars().enumerate() {
            let scalar: UChar = c.into();
            match F::char_from_scalar(scalar) {
                Some(c) => out.push(c),
                None => return Err(TranscodeError::new(scalar, index)),
            }
        }
        Ok(out)
    }
}

// === Trait implementations ===

impl<E: Encoding> ToOwned for Str<E> {
    type Owned = String<E>;

    fn to_owned(&self) -> String<E> {
        String::from(self)
    }
}

impl<E: Encoding> fmt::Debug for Str<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.chars() {
            let c: UChar = c.into();
            for c in c.to_char().escape_debug() {
                write!(f, "{}", c)?;
            }
        }
        write!(f, "\"")
    }
}

impl<E: Encoding> fmt::Display for Str<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl<E: Encoding> Hash for Str<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.units.hash(state)
    }
}

impl<E: Encoding> PartialEq for Str<E> {
    fn eq(&self, other: &Self) -> bool {
        self.units == other.units
    }
}

impl<E: Encoding> Eq for Str<E> {}

impl<E: Encoding> PartialOrd for Str<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: Encoding> Ord for Str<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // UTF-16 code unit order differs from scalar order above U+FFFF
        self.chars().cmp(other.chars())
    }
}

impl<E: Encoding> AsRef<[E::CodeUnit]> for Str<E> {
    fn as_ref(&self) -> &[E::CodeUnit] {
        &self.units
    }
}

impl<E: Encoding> AsRef<Str<E>> for Str<E> {
    fn as_ref(&self) -> &Str<E> {
        self
    }
}

impl<E: Encoding> Default for &Str<E> {
    fn default() -> Self {
        // SAFETY: the empty slice is valid in every encoding.
        unsafe { Str::from_code_units_unchecked(&[]) }
    }
}

// === Index implementations ===

impl<E: Encoding> Index<RangeFull> for Str<E> {
    type Output = Str<E>;

    fn index(&self, _: RangeFull) -> &Self::Output {
        self
    }
}

impl<E: Encoding> Index<Range<usize>> for Str<E> {
    type Output = Str<E>;

    fn index(&self, index: Range<usize>) -> &Self::Output {
        match self.get(index.clone()) {
            Some(s) => s,
            None => panic!(
                "range {}..{} is out of bounds or not on char boundaries of a {} string of length {}",
                index.start,
                index.end,
                E::NAME,
                self.len()
            ),
        }
    }
}

impl<E: Encoding> Index<RangeFrom<usize>> for Str<E> {
    type Output = Str<E>;

    fn index(&self, index: RangeFrom<usize>) -> &Self::Output {
        &self[index.start..self.len()]
    }
}

impl<E: Encoding> Index<RangeTo<usize>> for Str<E> {
    type Output = Str<E>;

    fn index(&self, index: RangeTo<usize>) -> &Self::Output {
        &self[0..index.end]
    }
}
