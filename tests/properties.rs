//! Property tests for the UTF-8 decoder against `core::str`.

use proptest::prelude::*;
use unitext::decode::{self, Utf8Chunks};
use unitext::{String, UChar, UnicodeEncoding, Utf8, Utf16, Utf32};

/// Byte strings weighted toward the interesting parts of the UTF-8 byte range.
fn mostly_utf8() -> impl Strategy<Value = Vec<u8>> {
    let byte = prop_oneof![
        4 => 0x00u8..0x80,
        3 => 0x80u8..0xC0,
        1 => 0xC0u8..0xE0,
        2 => 0xE0u8..0xF0,
        1 => 0xF0u8..=0xFF,
    ];
    prop::collection::vec(byte, 0..48)
}

/// Valid text with arbitrary bytes spliced in.
fn damaged_text() -> impl Strategy<Value = Vec<u8>> {
    (any::<std::string::String>(), any::<prop::sample::Index>(), mostly_utf8()).prop_map(
        |(text, at, noise)| {
            let mut bytes = text.into_bytes();
            let at = if bytes.is_empty() { 0 } else { at.index(bytes.len() + 1) };
            bytes.splice(at..at, noise);
            bytes
        },
    )
}

fn check_round_trip<E: UnicodeEncoding>(text: &str) -> Result<(), TestCaseError> {
    let expected: Vec<UChar> = text.chars().map(UChar::from).collect();

    let from_slice = decode::transcode_from_utf8_slice::<E>(text.as_bytes()).unwrap();
    prop_assert_eq!(from_slice.chars().collect::<Vec<_>>(), expected.clone());

    let from_iter = decode::transcode_from_utf8::<E, _>(text.bytes()).unwrap();
    prop_assert_eq!(from_iter, from_slice);
    Ok(())
}

fn check_drivers_agree<E: UnicodeEncoding>(bytes: &[u8]) -> Result<(), TestCaseError> {
    let from_slice = decode::transcode_from_utf8_slice::<E>(bytes);
    let from_iter = decode::transcode_from_utf8::<E, _>(bytes.iter().copied());
    prop_assert_eq!(from_iter, from_slice);
    Ok(())
}

proptest! {
    #[test]
    fn round_trip_utf8(text in any::<std::string::String>()) {
        check_round_trip::<Utf8>(&text)?;
        let s = String::<Utf8>::from_utf8(text.as_bytes()).unwrap();
        prop_assert_eq!(s.as_std(), text.as_str());
    }

    #[test]
    fn round_trip_utf16(text in any::<std::string::String>()) {
        check_round_trip::<Utf16>(&text)?;
        let s = String::<Utf16>::from_utf8(text.as_bytes()).unwrap();
        prop_assert_eq!(s.as_code_units(), text.encode_utf16().collect::<Vec<_>>());
    }

    #[test]
    fn round_trip_utf32(text in any::<std::string::String>()) {
        check_round_trip::<Utf32>(&text)?;
    }

    #[test]
    fn validity_matches_core(bytes in mostly_utf8()) {
        let ours = decode::validate_utf8(&bytes);
        match core::str::from_utf8(&bytes) {
            Ok(_) => prop_assert!(ours.is_ok()),
            Err(std_err) => {
                let ours = ours.unwrap_err();
                prop_assert_eq!(ours.valid_up_to(), std_err.valid_up_to());
                prop_assert_eq!(ours.error_length().map(usize::from), std_err.error_len());
            }
        }
    }

    #[test]
    fn validity_matches_core_on_damaged_text(bytes in damaged_text()) {
        let ours = decode::validate_utf8(&bytes).map_err(|e| (e.valid_up_to(), e.error_length().map(usize::from)));
        let theirs = core::str::from_utf8(&bytes).map(|_| ()).map_err(|e| (e.valid_up_to(), e.error_len()));
        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn error_is_local(bytes in damaged_text()) {
        if let Err(e) = decode::validate_utf8(&bytes) {
            let start = e.valid_up_to();
            // Everything before the error is valid on its own.
            prop_assert!(decode::validate_utf8(&bytes[..start]).is_ok());

            match e.error_length() {
                Some(len) => {
                    let len = usize::from(len);
                    prop_assert!((1..=3).contains(&len));
                    prop_assert!(start + len <= bytes.len());
                    let attempt = &bytes[start..bytes.len().min(start + 4)];
                    prop_assert_eq!(usize::from(decode::error_length(attempt)), len);
                }
                // Only a proper prefix of a well-formed sequence can be truncated.
                None => prop_assert!(bytes.len() - start < 4),
            }
        }
    }

    #[test]
    fn skip_and_resume_matches_core_lossy(bytes in damaged_text()) {
        let ours = decode::transcode_from_utf8_lossy::<Utf8>(&bytes);
        let theirs = std::string::String::from_utf8_lossy(&bytes);
        prop_assert_eq!(ours.as_std(), &*theirs);

        let wide = decode::transcode_from_utf8_lossy::<Utf32>(&bytes);
        prop_assert_eq!(wide.as_code_units(), theirs.chars().map(u32::from).collect::<Vec<_>>());
    }

    #[test]
    fn chunks_partition_input(bytes in damaged_text()) {
        let mut rebuilt = Vec::new();
        let mut chunks = 0;
        for chunk in Utf8Chunks::new(&bytes) {
            prop_assert!(chunk.invalid().len() <= 3);
            rebuilt.extend_from_slice(chunk.valid().as_std().as_bytes());
            rebuilt.extend_from_slice(chunk.invalid());
            chunks += 1;
        }
        prop_assert_eq!(rebuilt, bytes.clone());
        prop_assert!(chunks <= bytes.len());

        let std_chunks: Vec<_> = bytes.utf8_chunks().map(|c| (c.valid().len(), c.invalid().len())).collect();
        let our_chunks: Vec<_> = Utf8Chunks::new(&bytes).map(|c| (c.valid().len(), c.invalid().len())).collect();
        prop_assert_eq!(our_chunks, std_chunks);
    }

    #[test]
    fn drivers_agree(bytes in damaged_text()) {
        check_drivers_agree::<Utf8>(&bytes)?;
        check_drivers_agree::<Utf16>(&bytes)?;
        check_drivers_agree::<Utf32>(&bytes)?;
    }
}
