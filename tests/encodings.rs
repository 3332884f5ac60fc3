//! Tests for the `Encoding` implementation of every encoding marker.

use paste::paste;
use unitext::{Encoding, UChar};

fn uchar(c: char) -> UChar {
    UChar::from(c)
}

// =============================================================================
// Test macros for different encoding categories
// =============================================================================

/// Tests that apply to ALL encodings
macro_rules! test_encoding_basics {
    ($name:ident, $encoding:ty) => {
        mod $name {
            #[allow(unused_imports)]
            use super::*;
            use unitext::{CodeUnit, Encoding};

            type Unit = <$encoding as Encoding>::CodeUnit;

            fn encode_a() -> ([Unit; 4], usize) {
                let mut buf = [Unit::default(); 4];
                let c = <$encoding>::char_from_scalar(uchar('A')).unwrap();
                let len = <$encoding>::encode_char(c, &mut buf);
                (buf, len)
            }

            #[test]
            fn name_matches_kind() {
                assert!(!<$encoding>::NAME.is_empty());
                assert_eq!(<$encoding>::NAME, <$encoding>::KIND.name());
                assert_eq!(
                    <$encoding>::IS_VARIABLE_WIDTH,
                    <$encoding>::MAX_UNITS_PER_CHAR > 1
                );
                assert_eq!(
                    core::mem::size_of::<Unit>(),
                    <$encoding>::KIND.code_unit_size()
                );
            }

            #[test]
            fn empty_units_valid() {
                assert!(<$encoding>::validate(&[]).is_ok());
                assert_eq!(<$encoding>::decode_char_at(&[], 0), None);
                assert_eq!(<$encoding>::decode_char_before(&[], 0), None);
            }

            #[test]
            fn boundary_at_zero_and_len() {
                assert!(<$encoding>::is_char_boundary(&[], 0));
                let (buf, len) = encode_a();
                assert!(<$encoding>::is_char_boundary(&buf[..len], 0));
                assert!(<$encoding>::is_char_boundary(&buf[..len], len));
                assert!(!<$encoding>::is_char_boundary(&buf[..len], len + 1));
            }

            #[test]
            fn ascii_letter_roundtrip() {
                let (buf, len) = encode_a();
                assert_eq!(len, 1);
                assert_eq!(buf[0].to_u32(), 0x41);
                let (decoded, next) = <$encoding>::decode_char_at(&buf[..len], 0).unwrap();
                let decoded: UChar = decoded.into();
                assert_eq!(decoded, uchar('A'));
                assert_eq!(next, len);
            }

            #[test]
            fn decode_char_before_works() {
                let (buf, len) = encode_a();
                let (decoded, prev) = <$encoding>::decode_char_before(&buf[..len], len).unwrap();
                let decoded: UChar = decoded.into();
                assert_eq!(decoded, uchar('A'));
                assert_eq!(prev, 0);
            }

            #[test]
            fn all_ascii_roundtrip() {
                let mut buf = [Unit::default(); 4];
                for byte in 0u8..0x80 {
                    let c = <$encoding>::char_from_scalar(uchar(byte as char)).unwrap();
                    assert_eq!(<$encoding>::encoded_len(c), 1);
                    let len = <$encoding>::encode_char(c, &mut buf);
                    assert_eq!(buf[0], Unit::from(byte));
                    let (decoded, _) = <$encoding>::decode_char_at(&buf[..len], 0).unwrap();
                    assert_eq!(decoded, c, "Failed for ASCII {:02X}", byte);
                }
            }
        }
    };
}

/// Tests for encodings that represent every scalar value
macro_rules! test_unicode_encoding {
    ($name:ident, $encoding:ty) => {
        test_encoding_basics!($name, $encoding);

        paste! {
            mod [<$name _unicode>] {
                use super::*;

                type Unit = <$encoding as Encoding>::CodeUnit;

                fn roundtrip(c: char) -> usize {
                    let mut buf = [Unit::default(); 4];
                    let scalar = <$encoding>::char_from_scalar(uchar(c)).unwrap();
                    let len = <$encoding>::encode_char(scalar, &mut buf);
                    assert_eq!(len, <$encoding>::encoded_len(scalar));
                    assert!(<$encoding>::validate(&buf[..len]).is_ok());

                    let (decoded, next) = <$encoding>::decode_char_at(&buf[..len], 0).unwrap();
                    assert_eq!(decoded, scalar, "roundtrip failed for {:?}", c);
                    assert_eq!(next, len);

                    let (decoded, start) = <$encoding>::decode_char_before(&buf[..len], len).unwrap();
                    assert_eq!(decoded, scalar);
                    assert_eq!(start, 0);
                    len
                }

                #[test]
                fn can_encode_bmp() {
                    for c in ['é', 'ñ', 'ü', 'α', 'β', '中', '日', '한', '\u{FFFD}', '\u{FFFF}'] {
                        let len = roundtrip(c);
                        assert!(len <= <$encoding>::MAX_UNITS_PER_CHAR);
                    }
                }

                #[test]
                fn can_encode_supplementary() {
                    for c in ['😀', '🎉', '𠀀', '\u{10000}', '\u{10FFFF}'] {
                        let len = roundtrip(c);
                        assert_eq!(len, <$encoding>::MAX_UNITS_PER_CHAR);
                    }
                }
            }
        }
    };
}

// =============================================================================
// Apply test macros to encodings
// =============================================================================

test_unicode_encoding!(utf8, unitext::Utf8);
test_unicode_encoding!(utf16, unitext::Utf16);
test_unicode_encoding!(utf32, unitext::Utf32);

mod ascii {
    use super::*;
    use unitext::{Ascii, AsciiChar};

    test_encoding_basics!(basics, unitext::Ascii);

    #[test]
    fn is_fixed_width() {
        assert!(!Ascii::IS_VARIABLE_WIDTH);
        assert_eq!(Ascii::MAX_UNITS_PER_CHAR, 1);
    }

    #[test]
    fn high_bytes_invalid() {
        for byte in 0x80u8..=0xFF {
            assert!(Ascii::validate(&[b'a', byte]).is_err());
            assert_eq!(Ascii::decode_char_at(&[byte], 0), None);
        }
    }

    #[test]
    fn non_ascii_unrepresentable() {
        assert_eq!(Ascii::char_from_scalar(uchar('é')), None);
        assert_eq!(Ascii::char_from_scalar(uchar('~')), AsciiChar::from_u8(b'~'));
    }
}

mod utf8_specific {
    use super::*;
    use unitext::Utf8;

    #[test]
    fn boundaries_follow_leading_bytes() {
        let bytes = "a€😀".as_bytes();
        let boundaries: Vec<usize> = (0..=bytes.len())
            .filter(|&i| Utf8::is_char_boundary(bytes, i))
            .collect();
        assert_eq!(boundaries, [0, 1, 4, 8]);
    }

    #[test]
    fn encoded_len_thresholds() {
        for (c, len) in [('\u{7F}', 1), ('\u{80}', 2), ('\u{7FF}', 2), ('\u{800}', 3), ('\u{FFFF}', 3), ('\u{10000}', 4)] {
            assert_eq!(Utf8::encoded_len(uchar(c)), len, "U+{:04X}", c as u32);
        }
    }

    #[test]
    fn overlong_and_surrogates_invalid() {
        assert!(Utf8::validate(&[0xC0, 0x80]).is_err());
        assert!(Utf8::validate(&[0xE0, 0x80, 0x80]).is_err());
        assert!(Utf8::validate(&[0xED, 0xA0, 0x80]).is_err());
        assert!(Utf8::validate(&[0xF4, 0x90, 0x80, 0x80]).is_err());
        assert_eq!(Utf8::decode_char_at(&[0xED, 0xA0, 0x80], 0), None);
    }
}

mod utf16_specific {
    use super::*;
    use unitext::Utf16;

    #[test]
    fn lone_surrogates_invalid() {
        assert!(Utf16::validate(&[0xD800]).is_err());
        assert!(Utf16::validate(&[0xDC00]).is_err());
        assert!(Utf16::validate(&[0xDC00, 0xD800]).is_err());
        assert!(Utf16::validate(&[0xD800, 0xDC00]).is_ok());
    }
}

mod utf32_specific {
    use super::*;
    use unitext::Utf32;

    #[test]
    fn out_of_range_invalid() {
        for unit in [0xD800, 0xDFFF, 0x110000, u32::MAX] {
            assert!(Utf32::validate(&[unit]).is_err(), "{:#X}", unit);
        }
        assert!(Utf32::validate(&[0, 0xD7FF, 0xE000, 0x10FFFF]).is_ok());
    }
}
