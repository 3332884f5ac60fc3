//! Runtime encoding registry for CLI tools.
//!
//! Discovers the Unicode encodings at runtime and converts UTF-8 input into
//! any of them by name, with an explicit byte order for the serialized form.
//!
//! # Example
//!
//! ```
//! use unitext::registry;
//!
//! // List available encodings
//! for enc in registry::encodings() {
//!     println!("{}", enc.name());
//! }
//!
//! let output = registry::transcode_from_utf8(b"hi", "utf-16le", false).unwrap();
//! assert_eq!(output, [b'h', 0, b'i', 0]);
//! ```

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use log::debug;

use crate::encoding::EncodingKind;
use crate::error::Utf8Error;

/// Error returned when an encoding is not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncodingError(pub alloc::string::String);

impl fmt::Display for UnknownEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown encoding: {}", self.0)
    }
}

impl core::error::Error for UnknownEncodingError {}

/// Error returned by [`transcode_from_utf8`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The target encoding is unknown.
    UnknownEncoding(UnknownEncodingError),
    /// The input is not valid UTF-8.
    InvalidInput(Utf8Error),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEncoding(e) => write!(f, "target {}", e),
            Self::InvalidInput(e) => write!(f, "invalid input: {}", e),
        }
    }
}

impl core::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::UnknownEncoding(e) => Some(e),
            Self::InvalidInput(e) => Some(e),
        }
    }
}

impl From<UnknownEncodingError> for ConvertError {
    fn from(e: UnknownEncodingError) -> Self {
        Self::UnknownEncoding(e)
    }
}

impl From<Utf8Error> for ConvertError {
    fn from(e: Utf8Error) -> Self {
        Self::InvalidInput(e)
    }
}

/// A registered encoding entry.
///
/// Each encoding registers one of these per byte order via `inventory::submit!`.
pub struct EncodingEntry {
    /// The canonical name of the encoding (e.g., "UTF-16LE").
    pub name: &'static str,
    /// Alternative names for the encoding (e.g., &["UTF16LE"]).
    pub aliases: &'static [&'static str],
    /// The encoding the code units are in.
    pub kind: EncodingKind,
    /// Converts UTF-8 to the serialized target encoding.
    pub from_utf8: fn(&[u8]) -> Result<Vec<u8>, Utf8Error>,
    /// Like `from_utf8`, substituting U+FFFD for ill-formed input.
    pub from_utf8_lossy: fn(&[u8]) -> Vec<u8>,
}

impl EncodingEntry {
    /// Returns the canonical name of this encoding.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the encoding the code units are in.
    pub fn kind(&self) -> EncodingKind {
        self.kind
    }

    /// Returns all names (canonical + aliases) for this encoding.
    pub fn all_names(&self) -> impl Iterator<Item = &'static str> {
        core::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// Check if this encoding matches the given name (case-insensitive).
    pub fn matches(&self, name: &str) -> bool {
        self.all_names().any(|n| n.eq_ignore_ascii_case(name))
    }
}

impl fmt::Debug for EncodingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingEntry")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

inventory::collect!(EncodingEntry);

/// Returns an iterator over all registered encodings.
pub fn encodings() -> impl Iterator<Item = &'static EncodingEntry> {
    inventory::iter::<EncodingEntry>()
}

/// Find an encoding by name (case-insensitive).
pub fn find_encoding(name: &str) -> Result<&'static EncodingEntry, UnknownEncodingError> {
    let name = name.trim();
    encodings()
        .find(|e| e.matches(name))
        .ok_or_else(|| UnknownEncodingError(name.to_string()))
}

/// Converts UTF-8 input to the encoding named `to`.
///
/// With `lossy`, ill-formed input is replaced rather than rejected.
pub fn transcode_from_utf8(input: &[u8], to: &str, lossy: bool) -> Result<Vec<u8>, ConvertError> {
    let entry = find_encoding(to)?;
    debug!("converting {} bytes of UTF-8 to {}", input.len(), entry.name);

    if lossy {
        Ok((entry.from_utf8_lossy)(input))
    } else {
        Ok((entry.from_utf8)(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_unicode_encoding_registered() {
        for name in ["UTF-8", "UTF-16LE", "UTF-16BE", "UTF-32LE", "UTF-32BE"] {
            let entry = find_encoding(name).unwrap();
            assert_eq!(entry.name(), name);
        }
        assert_eq!(encodings().count(), 5);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(find_encoding("utf8").unwrap().kind(), EncodingKind::Utf8);
        assert_eq!(find_encoding("UTF-16").unwrap().name(), "UTF-16BE");
        assert_eq!(find_encoding(" ucs-4le ").unwrap().name(), "UTF-32LE");
        assert_eq!(
            find_encoding("latin1").unwrap_err(),
            UnknownEncodingError("latin1".to_string())
        );
    }

    #[test]
    fn test_transcode() {
        let out = transcode_from_utf8("€".as_bytes(), "UTF-32BE", false).unwrap();
        assert_eq!(out, [0x00, 0x00, 0x20, 0xAC]);

        let out = transcode_from_utf8(b"a\xFFb", "UTF-8", true).unwrap();
        assert_eq!(out, "a\u{FFFD}b".as_bytes());

        let err = transcode_from_utf8(b"a\xFFb", "UTF-16LE", false).unwrap_err();
        assert_eq!(err, ConvertError::InvalidInput(Utf8Error::new(1, Some(1))));

        let err = transcode_from_utf8(b"", "EBCDIC", false).unwrap_err();
        assert!(matches!(err, ConvertError::UnknownEncoding(_)));
    }
}
