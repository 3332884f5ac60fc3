use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::Str;
use crate::encoding::Encoding;

/// An iterator over the characters of a string slice.
pub struct Chars<'a, E: Encoding> {
    units: &'a [E::CodeUnit],
    _marker: PhantomData<E>,
}

impl<E: Encoding> Clone for Chars<'_, E> {
    fn clone(&self) -> Self {
        Self {
            units: self.units,
            _marker: PhantomData,
        }
    }
}

impl<'a, E: Encoding> Chars<'a, E> {
    #[inline]
    pub(crate) fn new(s: &'a Str<E>) -> Self {
        Self {
            units: s.as_code_units(),
            _marker: PhantomData,
        }
    }

    /// Views the characters not yet yielded as a string slice.
    #[inline]
    pub fn as_str(&self) -> &'a Str<E> {
        // SAFETY: both ends only move across whole characters.
        unsafe { Str::from_code_units_unchecked(self.units) }
    }
}

impl<E: Encoding> Iterator for Chars<'_, E> {
    type Item = E::Char;

    #[inline]
    fn next(&mut self) -> Option<E::Char> {
        let (c, next) = E::decode_char_at(self.units, 0)?;
        self.units = &self.units[next..];
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.units.len();
        (remaining.div_ceil(E::MAX_UNITS_PER_CHAR), Some(remaining))
    }
}

impl<E: Encoding> DoubleEndedIterator for Chars<'_, E> {
    #[inline]
    fn next_back(&mut self) -> Option<E::Char> {
        let (c, start) = E::decode_char_before(self.units, self.units.len())?;
        self.units = &self.units[..start];
        Some(c)
    }
}

impl<E: Encoding> FusedIterator for Chars<'_, E> {}

impl<E: Encoding> fmt::Debug for Chars<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chars")
            .field("remaining", &self.as_str())
            .finish()
    }
}

/// An iterator over the characters of a string slice and their positions.
///
/// Positions are offsets in code units from the start of the original slice.
pub struct CharIndices<'a, E: Encoding> {
    front_offset: usize,
    chars: Chars<'a, E>,
}

impl<E: Encoding> Clone for CharIndices<'_, E> {
    fn clone(&self) -> Self {
        Self {
            front_offset: self.front_offset,
            chars: self.chars.clone(),
        }
    }
}

impl<'a, E: Encoding> CharIndices<'a, E> {
    #[inline]
    pub(crate) fn new(s: &'a Str<E>) -> Self {
        Self {
            front_offset: 0,
            chars: Chars::new(s),
        }
    }

    /// Views the characters not yet yielded as a string slice.
    #[inline]
    pub fn as_str(&self) -> &'a Str<E> {
        self.chars.as_str()
    }

    /// Returns the offset of the next character, or the length of the
    /// original slice if there are no more characters.
    #[inline]
    pub fn offset(&self) -> usize {
        self.front_offset
    }
}

impl<E: Encoding> Iterator for CharIndices<'_, E> {
    type Item = (usize, E::Char);

    #[inline]
    fn next(&mut self) -> Option<(usize, E::Char)> {
        let before = self.chars.units.len();
        let c = self.chars.next()?;
        let index = self.front_offset;
        self.front_offset += before - self.chars.units.len();
        Some((index, c))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chars.size_hint()
    }
}

impl<E: Encoding> DoubleEndedIterator for CharIndices<'_, E> {
    #[inline]
    fn next_back(&mut self) -> Option<(usize, E::Char)> {
        let c = self.chars.next_back()?;
        Some((self.front_offset + self.chars.units.len(), c))
    }
}

impl<E: Encoding> FusedIterator for CharIndices<'_, E> {}

impl<E: Encoding> fmt::Debug for CharIndices<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharIndices")
            .field("offset", &self.front_offset)
            .field("remaining", &self.as_str())
            .finish()
    }
}
