//! Unicode text in UTF-8, UTF-16, UTF-32 and ASCII.
//!
//! This crate provides generic `String<E>` and `Str<E>` types parameterized by
//! encoding, a validating UTF-8 decoder built on a table-driven automaton, and
//! lossy decoding that replaces each maximal ill-formed subpart with U+FFFD.
//!
//! # Example
//!
//! ```
//! use unitext::{String, Str, Utf8, Utf16String};
//!
//! // Functions can be generic over encoding
//! fn shout<E: unitext::UnicodeEncoding>(s: &Str<E>) -> String<E> {
//!     s.chars().flat_map(|c| c.to_uppercase().as_slice().to_vec()).collect()
//! }
//!
//! let utf16 = Utf16String::from_utf8("grüße".as_bytes()).unwrap();
//! assert_eq!(shout(&utf16).to_string(), "GRÜSSE");
//!
//! // Transcoding via From
//! let utf8: String<Utf8> = String::from(utf16.as_str());
//! assert_eq!(utf8.as_std(), "grüße");
//! ```

#![deny(missing_docs)]
#![allow(clippy::new_without_default)]

extern crate alloc;

/// The ASCII scalar type.
pub mod achar;
/// ASCII encoding implementation.
pub mod ascii;
/// Validating UTF-8 decoding.
pub mod decode;
/// The UTF-8 automaton.
pub mod dfa;
/// Encoding trait and related types.
pub mod encoding;
/// Error types for encoding operations.
pub mod error;
/// Iterator types for strings.
pub mod iter;
/// Capacity reservation ahead of transcoding.
pub mod reserve;
/// The `Str<E>` borrowed string slice type.
pub mod str;
/// The `String<E>` owned string type.
pub mod string;
/// The Unicode scalar value type.
pub mod uchar;
/// UTF-16 encoding implementation.
pub mod utf16;
/// UTF-32 encoding implementation.
pub mod utf32;
/// UTF-8 encoding implementation.
pub mod utf8;

/// Runtime encoding registry for dynamic encoding selection.
#[cfg(feature = "registry")]
pub mod registry;

// Re-export main types
pub use achar::AsciiChar;
pub use ascii::Ascii;
pub use decode::{Utf8Chunk, Utf8Chunks};
pub use encoding::{CodeUnit, Encoding, EncodingKind, UnicodeEncoding};
pub use error::{
    EncodingError, FromCodeUnitsError, FromUtf8Error, InvalidScalarValue, NonAsciiValue,
    TranscodeError, Utf8Error,
};
pub use iter::{CharIndices, Chars};
pub use str::Str;
pub use string::String;
pub use uchar::UChar;
pub use utf8::Utf8;
pub use utf16::Utf16;
pub use utf32::Utf32;

/// A borrowed ASCII string slice.
pub type AsciiStr = Str<Ascii>;
/// An owned ASCII string.
pub type AsciiString = String<Ascii>;
/// A borrowed UTF-8 string slice.
pub type Utf8Str = Str<Utf8>;
/// An owned UTF-8 string.
pub type Utf8String = String<Utf8>;
/// A borrowed UTF-16 string slice.
pub type Utf16Str = Str<Utf16>;
/// An owned UTF-16 string.
pub type Utf16String = String<Utf16>;
/// A borrowed UTF-32 string slice.
pub type Utf32Str = Str<Utf32>;
/// An owned UTF-32 string.
pub type Utf32String = String<Utf32>;
/// The owned string for general use, stored as UTF-8.
pub type UString = String<Utf8>;

// =============================================================================
// Cross-encoding conversions
// =============================================================================

/// Generates infallible `From` conversions into encodings that can represent
/// every character of the source.
macro_rules! impl_universal_from {
    ($from:ty => $($to:ty),+ $(,)?) => {
        $(
            impl From<&Str<$from>> for String<$to> {
                fn from(s: &Str<$from>) -> Self {
                    s.transcode()
                }
            }

            impl From<String<$from>> for String<$to> {
                fn from(s: String<$from>) -> Self {
                    s.transcode()
                }
            }
        )+
    };
}

impl_universal_from!(Ascii => Utf8, Utf16, Utf32);
impl_universal_from!(Utf8 => Utf16, Utf32);
impl_universal_from!(Utf16 => Utf8, Utf32);
impl_universal_from!(Utf32 => Utf8, Utf16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_from() {
        let utf8 = Utf8String::from("a€😀");
        let utf16 = Utf16String::from(utf8.as_str());
        let utf32 = Utf32String::from(utf16.clone());
        assert_eq!(utf16.as_code_units(), &[0x61, 0x20AC, 0xD83D, 0xDE00]);
        assert_eq!(utf32.as_code_units(), &[0x61, 0x20AC, 0x1F600]);
        assert_eq!(Utf8String::from(utf32), utf8);

        let ascii = AsciiString::from_bytes_lossy(b"ok");
        assert_eq!(Utf16String::from(ascii).to_string(), "ok");
    }
}
