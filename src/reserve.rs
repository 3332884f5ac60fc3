//! Capacity pre-reservation for transcoding.
//!
//! Before transcoding `len` code units of one encoding into another, the
//! output buffer reserves the worst-case output size. If that allocation
//! fails, it falls back once to the best-case size, which is always safe to
//! under-reserve since the buffer still grows on demand.

use alloc::vec::Vec;
use std::collections::TryReserveError;

use log::debug;

use crate::encoding::EncodingKind;

/// Expansion bounds, in target code units per source code unit.
///
/// | from \ to | UTF-8 | UTF-16 | UTF-32 | ASCII |
/// |---|---|---|---|---|
/// | ASCII  | 1 / 1 | 1 / 1 | 1 / 1 | 1 / 1 |
/// | UTF-8  | 1 / 1 | 1 / 3 | 1 / 4 | 1 / 4 |
/// | UTF-16 | 3 / 1 | 1 / 1 | 1 / 2 | 1 / 2 |
/// | UTF-32 | 4 / 1 | 2 / 1 | 1 / 1 | 1 / 1 |
///
/// Each cell is `upper / lower_divisor`: at most `len * upper` and at least
/// `len / lower_divisor` target code units are produced from `len` source
/// code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeFactor {
    upper: usize,
    lower_divisor: usize,
}

impl TranscodeFactor {
    /// Returns the expansion bounds for transcoding from `from` to `to`.
    pub const fn between(from: EncodingKind, to: EncodingKind) -> Self {
        use EncodingKind::*;

        let (upper, lower_divisor) = match (from, to) {
            (Ascii, _) => (1, 1),
            (Utf8, Utf8) => (1, 1),
            (Utf8, Utf16) => (1, 3),
            (Utf8, Utf32 | Ascii) => (1, 4),
            (Utf16, Utf8) => (3, 1),
            (Utf16, Utf16) => (1, 1),
            (Utf16, Utf32 | Ascii) => (1, 2),
            (Utf32, Utf8) => (4, 1),
            (Utf32, Utf16) => (2, 1),
            (Utf32, Utf32 | Ascii) => (1, 1),
        };

        TranscodeFactor {
            upper,
            lower_divisor,
        }
    }

    /// Worst-case multiplier.
    pub const fn upper(&self) -> usize {
        self.upper
    }

    /// Best-case divisor.
    pub const fn lower_divisor(&self) -> usize {
        self.lower_divisor
    }

    /// Worst-case output length for `len` input units, saturating at `max_len`.
    #[inline]
    pub const fn upper_bound(&self, len: usize, max_len: usize) -> usize {
        let bound = len.saturating_mul(self.upper);
        if bound < max_len { bound } else { max_len }
    }

    /// Best-case output length for `len` input units, saturating at `max_len`.
    #[inline]
    pub const fn lower_bound(&self, len: usize, max_len: usize) -> usize {
        let bound = len / self.lower_divisor;
        if bound < max_len { bound } else { max_len }
    }
}

/// A growable output buffer of code units.
///
/// Implementations must leave their contents untouched when a reservation fails.
pub trait ReserveBuffer {
    /// Current length in code units.
    fn len(&self) -> usize;

    /// Largest length the buffer can ever hold.
    fn max_len(&self) -> usize;

    /// Reserves room for `additional` more code units, reporting failure.
    fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError>;

    /// Reserves room for `additional` more code units. Allocation failure is fatal.
    fn reserve(&mut self, additional: usize);
}

impl<T> ReserveBuffer for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn max_len(&self) -> usize {
        max_len_of::<T>()
    }

    #[inline]
    fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        Vec::try_reserve(self, additional)
    }

    #[inline]
    fn reserve(&mut self, additional: usize) {
        Vec::reserve(self, additional)
    }
}

/// The largest number of `T`s a `Vec<T>` can hold.
#[inline]
pub const fn max_len_of<T>() -> usize {
    let size = core::mem::size_of::<T>();
    if size == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / size
    }
}

fn bounds<B: ReserveBuffer + ?Sized>(
    buf: &B,
    from: EncodingKind,
    to: EncodingKind,
    len: usize,
) -> (usize, usize) {
    let factor = TranscodeFactor::between(from, to);
    let room = buf.max_len().saturating_sub(buf.len());
    (factor.upper_bound(len, room), factor.lower_bound(len, room))
}

/// Reserves room in `buf` for transcoding `len` code units of `from` into `to`.
///
/// Tries the worst-case size first and falls back to the best-case size. If
/// the fallback cannot be allocated either, the process aborts as with any
/// failed `Vec` allocation.
pub fn reserve_for_transcoding<B: ReserveBuffer + ?Sized>(
    buf: &mut B,
    from: EncodingKind,
    to: EncodingKind,
    len: usize,
) {
    let (upper, lower) = bounds(buf, from, to, len);
    if let Err(e) = buf.try_reserve(upper) {
        debug!(
            "reserving {} units for {} -> {} failed ({}), falling back to {}",
            upper, from, to, e, lower
        );
        buf.reserve(lower);
    }
}

/// Fallible counterpart of [`reserve_for_transcoding`].
///
/// Returns the error of the best-case reservation if both tiers fail.
pub fn try_reserve_for_transcoding<B: ReserveBuffer + ?Sized>(
    buf: &mut B,
    from: EncodingKind,
    to: EncodingKind,
    len: usize,
) -> Result<(), TryReserveError> {
    let (upper, lower) = bounds(buf, from, to, len);
    match buf.try_reserve(upper) {
        Ok(()) => Ok(()),
        Err(e) => {
            debug!(
                "reserving {} units for {} -> {} failed ({}), falling back to {}",
                upper, from, to, e, lower
            );
            buf.try_reserve(lower)
        }
    }
}
