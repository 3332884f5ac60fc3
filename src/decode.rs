//! Validating UTF-8 decoding into any Unicode encoding.
//!
//! Every entry point walks the input once through the automaton in
//! [`dfa`](crate::dfa). For UTF-8 targets the bytes are copied as they are
//! consumed; for UTF-16 and UTF-32 targets the scalar value is accumulated
//! alongside the automaton and encoded each time a code point completes.
//!
//! When the automaton rejects a byte, [`error_length`] classifies the bytes
//! of the failed attempt to produce the recovery hint of the returned
//! [`Utf8Error`]. That hint is what [`Utf8Chunks`] and the lossy decoder use
//! to skip over exactly one maximal subpart per replacement character.
//!
//! # Example
//!
//! ```
//! use unitext::decode;
//! use unitext::{Utf8Error, Utf16};
//!
//! let s = decode::transcode_from_utf8_slice::<Utf16>("añ€😀".as_bytes()).unwrap();
//! assert_eq!(s.as_code_units(), &[0x61, 0xF1, 0x20AC, 0xD83D, 0xDE00]);
//!
//! let err = decode::validate_utf8(&[b'9', 0xE1, 0x83, b' ']).unwrap_err();
//! assert_eq!(err, Utf8Error::new(1, Some(2)));
//!
//! let lossy = decode::transcode_from_utf8_lossy::<unitext::Utf8>(b"a\xFFb");
//! assert_eq!(lossy.to_string(), "a\u{FFFD}b");
//! ```

use core::fmt;
use core::iter::FusedIterator;

use log::{debug, trace};

use crate::dfa::{
    ACCEPT, REJECT, accumulate, char_width_from_leading_byte, class_of, is_leading_byte,
    transition,
};
use crate::encoding::{Encoding, EncodingKind, UnicodeEncoding};
use crate::error::Utf8Error;
use crate::str::Str;
use crate::string::String;
use crate::uchar::UChar;
use crate::utf8::Utf8;

/// Returns how many bytes of a rejected code point attempt form its maximal
/// subpart, i.e. how many bytes to replace and skip before resuming.
///
/// `units` must hold exactly one rejected attempt: it starts where the
/// automaton last left the accept state and ends with the byte that caused
/// the rejection. The result is always `1`, `2` or `3`.
///
/// ```
/// use unitext::decode::error_length;
///
/// assert_eq!(error_length(&[0x8F]), 1);
/// assert_eq!(error_length(&[0xE1, 0x83, b' ']), 2);
/// assert_eq!(error_length(&[0xF3, 0xA0, 0x86, b' ']), 3);
/// assert_eq!(error_length(&[0xED, 0xA1]), 1);
/// ```
pub fn error_length(units: &[u8]) -> u8 {
    debug_assert!(!units.is_empty(), "no rejected attempt to classify");
    debug_assert!(units.len() <= 4, "attempt spans more than one code point");

    let Some(&first) = units.first() else {
        return 1;
    };
    let second = units.get(1).copied();

    match char_width_from_leading_byte(first) {
        3 => {
            let second_ok = second.is_some_and(|b| match first {
                0xE0 => matches!(b, 0xA0..=0xBF),
                0xED => matches!(b, 0x80..=0x9F),
                _ => matches!(b, 0x80..=0xBF),
            });
            if second_ok { 2 } else { 1 }
        }
        4 => {
            let second_ok = second.is_some_and(|b| match first {
                0xF0 => matches!(b, 0x90..=0xBF),
                0xF4 => matches!(b, 0x80..=0x8F),
                _ => matches!(b, 0x80..=0xBF),
            });
            if !second_ok {
                return 1;
            }
            match units.get(2) {
                Some(&third) if !is_leading_byte(third) => 3,
                _ => 2,
            }
        }
        _ => 1,
    }
}

/// Automaton state plus the scalar value being accumulated.
#[derive(Clone, Copy)]
struct Decoder {
    state: u32,
    code_point: u32,
}

impl Decoder {
    #[inline(always)]
    const fn new() -> Self {
        Decoder {
            state: ACCEPT,
            code_point: 0,
        }
    }

    /// Feeds one byte and returns the new state. The scalar is only
    /// accumulated when `DECODE` is set.
    #[inline(always)]
    fn step<const DECODE: bool>(&mut self, byte: u8) -> u32 {
        let class = class_of(byte);
        if DECODE {
            self.code_point = accumulate(self.state, self.code_point, byte, class);
        }
        self.state = transition(self.state, class);
        self.state
    }

    /// The scalar completed by the last step.
    ///
    /// Only meaningful right after `step` returned [`ACCEPT`] with `DECODE` set.
    #[inline(always)]
    fn scalar(&self) -> UChar {
        debug_assert_eq!(self.state, ACCEPT);
        // SAFETY: the automaton only accepts well-formed sequences, which
        // never encode surrogates or values above U+10FFFF.
        unsafe { UChar::from_u32_unchecked(self.code_point) }
    }
}

/// The last three bytes consumed, most recent first.
///
/// Used to rebuild a rejected attempt when the input can only be read once.
#[derive(Clone, Copy, Default)]
struct Lookback {
    bytes: [u8; 3],
}

impl Lookback {
    #[inline(always)]
    fn push(&mut self, byte: u8) {
        self.bytes = [byte, self.bytes[0], self.bytes[1]];
    }

    /// Rebuilds the `len`-byte attempt ending with `current`, oldest byte first.
    fn window(&self, current: u8, len: usize) -> ([u8; 4], usize) {
        debug_assert!((1..=4).contains(&len));
        let len = len.clamp(1, 4);
        let mut window = [0u8; 4];
        window[len - 1] = current;
        for (i, &byte) in self.bytes.iter().take(len - 1).enumerate() {
            window[len - 2 - i] = byte;
        }
        (window, len)
    }
}

#[inline(always)]
fn is_utf8<E: Encoding>() -> bool {
    matches!(E::KIND, EncodingKind::Utf8)
}

fn rejected(valid_up_to: usize, window: &[u8]) -> Utf8Error {
    let len = error_length(window);
    debug!(
        "invalid utf-8 at byte {}: {:02X?}, skipping {} bytes",
        valid_up_to, window, len
    );
    Utf8Error::new(valid_up_to, Some(len))
}

fn truncated(valid_up_to: usize) -> Utf8Error {
    debug!("utf-8 input truncated after byte {}", valid_up_to);
    Utf8Error::new(valid_up_to, None)
}

/// Validates `bytes` without producing output or logging.
fn check(bytes: &[u8]) -> Result<(), Utf8Error> {
    let mut decoder = Decoder::new();
    let mut valid_up_to = 0;

    for (index, &byte) in bytes.iter().enumerate() {
        match decoder.step::<false>(byte) {
            ACCEPT => valid_up_to = index + 1,
            REJECT => {
                let len = error_length(&bytes[valid_up_to..=index]);
                return Err(Utf8Error::new(valid_up_to, Some(len)));
            }
            _ => {}
        }
    }

    if decoder.state == ACCEPT {
        Ok(())
    } else {
        Err(Utf8Error::new(valid_up_to, None))
    }
}

/// Checks that `bytes` is well-formed UTF-8.
pub fn validate_utf8(bytes: &[u8]) -> Result<(), Utf8Error> {
    check(bytes).inspect_err(|e| match e.error_length() {
        Some(len) => debug!(
            "invalid utf-8 at byte {}: {:02X?}, skipping {} bytes",
            e.valid_up_to(),
            &bytes[e.valid_up_to()..e.valid_up_to() + len as usize],
            len
        ),
        None => debug!("utf-8 input truncated after byte {}", e.valid_up_to()),
    })
}

/// Transcodes UTF-8 read once from `input` into encoding `E`.
///
/// The input is consumed a byte at a time and never revisited; when a
/// sequence is rejected, the bytes of the failed attempt are recovered from
/// a three-byte lookback buffer. On success the output is shrunk to fit.
///
/// Returns the same result as [`transcode_from_utf8_slice`] for the same bytes.
pub fn transcode_from_utf8<E, I>(input: I) -> Result<String<E>, Utf8Error>
where
    E: UnicodeEncoding,
    I: IntoIterator<Item = u8>,
{
    let input = input.into_iter();
    let mut out = String::<E>::new();
    out.reserve_for_transcoding_from(EncodingKind::Utf8, input.size_hint().0);

    let mut decoder = Decoder::new();
    let mut lookback = Lookback::default();
    let mut valid_up_to = 0;

    for (index, byte) in input.enumerate() {
        if is_utf8::<E>() {
            match decoder.step::<false>(byte) {
                REJECT => {}
                state => {
                    if state == ACCEPT {
                        valid_up_to = index + 1;
                    }
                    // SAFETY: `out` is discarded unless the whole input is accepted.
                    unsafe { out.push_code_unit(E::CodeUnit::from(byte)) };
                }
            }
        } else if decoder.step::<true>(byte) == ACCEPT {
            valid_up_to = index + 1;
            out.push(decoder.scalar());
        }

        if decoder.state == REJECT {
            let (window, len) = lookback.window(byte, index - valid_up_to + 1);
            return Err(rejected(valid_up_to, &window[..len]));
        }
        lookback.push(byte);
    }

    if decoder.state != ACCEPT {
        return Err(truncated(valid_up_to));
    }

    out.shrink_to_fit();
    Ok(out)
}

/// Transcodes the UTF-8 in `bytes` into encoding `E`.
///
/// Unlike [`transcode_from_utf8`], a rejected attempt is read back directly
/// from `bytes`. For UTF-8 targets the input is validated first and then
/// copied in one piece.
pub fn transcode_from_utf8_slice<E: UnicodeEncoding>(bytes: &[u8]) -> Result<String<E>, Utf8Error> {
    let mut out = String::<E>::new();

    if is_utf8::<E>() {
        validate_utf8(bytes)?;
        out.reserve_for_transcoding_from(EncodingKind::Utf8, bytes.len());
        // SAFETY: validated above.
        unsafe { out.extend_from_bytes(bytes) };
        return Ok(out);
    }

    out.reserve_for_transcoding_from(EncodingKind::Utf8, bytes.len());

    let mut decoder = Decoder::new();
    let mut valid_up_to = 0;

    for (index, &byte) in bytes.iter().enumerate() {
        match decoder.step::<true>(byte) {
            ACCEPT => {
                valid_up_to = index + 1;
                out.push(decoder.scalar());
            }
            REJECT => return Err(rejected(valid_up_to, &bytes[valid_up_to..=index])),
            _ => {}
        }
    }

    if decoder.state != ACCEPT {
        return Err(truncated(valid_up_to));
    }

    out.shrink_to_fit();
    Ok(out)
}

/// Appends already-validated UTF-8 to `out`.
///
/// # Safety
///
/// `bytes` must be valid UTF-8.
unsafe fn append_unchecked<E: UnicodeEncoding>(out: &mut String<E>, bytes: &[u8]) {
    if is_utf8::<E>() {
        // SAFETY: caller guarantees `bytes` is valid UTF-8.
        unsafe { out.extend_from_bytes(bytes) };
        return;
    }

    let mut decoder = Decoder::new();
    for &byte in bytes {
        if decoder.step::<true>(byte) == ACCEPT {
            out.push(decoder.scalar());
        }
    }
}

/// Transcodes `bytes` into encoding `E` without validating it.
///
/// # Safety
///
/// `bytes` must be valid UTF-8. Invalid input does not cause undefined
/// behavior in this function, but the returned string breaks the invariant
/// every other operation on it relies on.
pub unsafe fn transcode_from_utf8_unchecked<E: UnicodeEncoding>(bytes: &[u8]) -> String<E> {
    let mut out = String::<E>::new();
    out.reserve_for_transcoding_from(EncodingKind::Utf8, bytes.len());
    // SAFETY: forwarded from the caller.
    unsafe { append_unchecked(&mut out, bytes) };
    out.shrink_to_fit();
    out
}

/// Transcodes `bytes` into encoding `E`, replacing each maximal subpart of
/// an ill-formed sequence with `U+FFFD`.
///
/// A truncated sequence at the end of the input becomes a single
/// replacement character. Produces the same replacements as
/// `std::string::String::from_utf8_lossy`.
pub fn transcode_from_utf8_lossy<E: UnicodeEncoding>(bytes: &[u8]) -> String<E> {
    let mut out = String::<E>::new();
    out.reserve_for_transcoding_from(EncodingKind::Utf8, bytes.len());

    for chunk in Utf8Chunks::new(bytes) {
        // SAFETY: the valid part of a chunk is valid UTF-8.
        unsafe { append_unchecked(&mut out, chunk.valid().as_code_units()) };

        if !chunk.invalid().is_empty() {
            trace!(
                "replacing {:02X?} with U+FFFD",
                chunk.invalid()
            );
            out.push(UChar::REPLACEMENT_CHARACTER);
        }
    }

    out.shrink_to_fit();
    out
}

/// A run of valid UTF-8 followed by at most one maximal ill-formed subpart.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Utf8Chunk<'a> {
    valid: &'a Str<Utf8>,
    invalid: &'a [u8],
}

impl<'a> Utf8Chunk<'a> {
    /// The valid prefix of this chunk. May be empty.
    #[inline]
    pub fn valid(&self) -> &'a Str<Utf8> {
        self.valid
    }

    /// The ill-formed bytes ending this chunk: one to three bytes, or empty
    /// for the last chunk of input that ends cleanly.
    ///
    /// If the input ends in the middle of a code point, the last chunk holds
    /// all of the dangling bytes.
    #[inline]
    pub fn invalid(&self) -> &'a [u8] {
        self.invalid
    }
}

impl fmt::Debug for Utf8Chunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Utf8Chunk")
            .field("valid", &self.valid)
            .field("invalid", &self.invalid)
            .finish()
    }
}

/// An iterator partitioning bytes into valid UTF-8 and ill-formed subparts.
///
/// Concatenating `valid` and `invalid` of every chunk gives back the input.
///
/// ```
/// use unitext::decode::Utf8Chunks;
///
/// let chunks: Vec<_> = Utf8Chunks::new(b"ab\xE1\x83 c\xC4")
///     .map(|chunk| (chunk.valid().to_string(), chunk.invalid()))
///     .collect();
///
/// assert_eq!(
///     chunks,
///     [("ab".to_string(), &[0xE1, 0x83][..]), (" c".to_string(), &[0xC4][..])]
/// );
/// ```
#[derive(Clone)]
pub struct Utf8Chunks<'a> {
    source: &'a [u8],
}

impl<'a> Utf8Chunks<'a> {
    /// Creates an iterator over the chunks of `bytes`.
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Utf8Chunks { source: bytes }
    }
}

impl<'a> Iterator for Utf8Chunks<'a> {
    type Item = Utf8Chunk<'a>;

    fn next(&mut self) -> Option<Utf8Chunk<'a>> {
        if self.source.is_empty() {
            return None;
        }

        let (valid, invalid, rest) = match check(self.source) {
            Ok(()) => (self.source, &[][..], &[][..]),
            Err(e) => {
                let (valid, after) = self.source.split_at(e.valid_up_to());
                let len = e.error_length().map_or(after.len(), usize::from);
                let (invalid, rest) = after.split_at(len);
                (valid, invalid, rest)
            }
        };
        self.source = rest;

        Some(Utf8Chunk {
            // SAFETY: `check` accepted every byte before `valid_up_to`.
            valid: unsafe { Str::from_code_units_unchecked(valid) },
            invalid,
        })
    }
}

impl FusedIterator for Utf8Chunks<'_> {}

impl fmt::Debug for Utf8Chunks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Utf8Chunks")
            .field("source", &self.source)
            .finish()
    }
}
