//! Björn Höhrmann's deterministic finite automaton for UTF-8.
//!
//! Every input byte costs one lookup in [`CHARACTER_CLASSES`] and one in
//! [`TRANSITIONS`]; there is no branching on sequence length. States are
//! pre-multiplied by 12 so that `state + class` indexes the transition table
//! directly.
//!
//! See <http://bjoern.hoehrmann.de/utf-8/decoder/dfa/> for details.
//!
//! Copyright (c) 2008-2010 Bjoern Hoehrmann <bjoern@hoehrmann.de>
//!
//! Permission is hereby granted, free of charge, to any person obtaining a copy
//! of this software and associated documentation files (the "Software"), to deal
//! in the Software without restriction, including without limitation the rights
//! to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//! copies of the Software, and to permit persons to whom the Software is
//! furnished to do so, subject to the following conditions:
//!
//! The above copyright notice and this permission notice shall be included in
//! all copies or substantial portions of the Software.

/// The decoder is between code points: it just completed one, or has not started.
pub const ACCEPT: u32 = 0;

/// The current code point attempt is invalid. No transition leaves this state.
pub const REJECT: u32 = 12;

/// Maps each byte to its character class.
///
/// | class | bytes |
/// |---|---|
/// | 0 | `00..=7F` |
/// | 1 | `80..=8F` |
/// | 9 | `90..=9F` |
/// | 7 | `A0..=BF` |
/// | 8 | `C0..=C1`, `F5..=FF` |
/// | 2 | `C2..=DF` |
/// | 10 | `E0` |
/// | 3 | `E1..=EC`, `EE..=EF` |
/// | 4 | `ED` |
/// | 11 | `F0` |
/// | 6 | `F1..=F3` |
/// | 5 | `F4` |
#[rustfmt::skip]
pub static CHARACTER_CLASSES: [u8; 256] = [
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,  0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,  0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,  0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,  0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,  9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,
    7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,  7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,
    8,8,2,2,2,2,2,2,2,2,2,2,2,2,2,2,  2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,
    10,3,3,3,3,3,3,3,3,3,3,3,3,4,3,3, 11,6,6,6,5,8,8,8,8,8,8,8,8,8,8,8,
];

/// Maps `state + class` to the next state.
#[rustfmt::skip]
pub static TRANSITIONS: [u8; 108] = [
     0,12,24,36,60,96,84,12,12,12,48,72,
    12,12,12,12,12,12,12,12,12,12,12,12,
    12, 0,12,12,12,12,12, 0,12, 0,12,12,
    12,24,12,12,12,12,12,24,12,24,12,12,
    12,12,12,12,12,12,12,24,12,12,12,12,
    12,24,12,12,12,12,12,12,12,24,12,12,
    12,12,12,12,12,12,12,36,12,36,12,12,
    12,36,12,12,12,12,12,36,12,36,12,12,
    12,36,12,12,12,12,12,12,12,12,12,12,
];

/// Expected sequence length for each leading byte; 0 marks bytes that cannot
/// start a sequence (continuation bytes, `C0`, `C1`, `F5..=FF`).
#[rustfmt::skip]
static CHAR_WIDTHS: [u8; 256] = [
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,  1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,  1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,  1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,  1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,  0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,  0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,2,2,2,2,2,2,2,2,2,2,2,2,2,2,  2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,
    3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,  4,4,4,4,4,0,0,0,0,0,0,0,0,0,0,0,
];

/// Returns the character class of `byte`.
#[inline(always)]
pub fn class_of(byte: u8) -> u32 {
    CHARACTER_CLASSES[byte as usize] as u32
}

/// Returns the state following `state` on a byte of class `class`.
#[inline(always)]
pub fn transition(state: u32, class: u32) -> u32 {
    TRANSITIONS[(state + class) as usize] as u32
}

/// Folds `byte` into the scalar being accumulated.
///
/// On the first byte of a code point the header bits are masked off (the
/// class determines how many); continuation bytes contribute six bits each.
#[inline(always)]
pub const fn accumulate(state: u32, code_point: u32, byte: u8, class: u32) -> u32 {
    if state != ACCEPT {
        (code_point << 6) | (byte as u32 & 0x3F)
    } else {
        (0xFF >> class) & byte as u32
    }
}

/// Returns the byte length of a code point starting with `byte`, or `0` if
/// `byte` cannot start one.
#[inline]
pub fn char_width_from_leading_byte(byte: u8) -> u8 {
    CHAR_WIDTHS[byte as usize]
}

/// Checks whether `byte` starts a new code point, i.e. is not of the form `10xxxxxx`.
#[inline]
pub const fn is_leading_byte(byte: u8) -> bool {
    (byte as i8) >= -64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(bytes: &[u8]) -> u32 {
        let mut state = ACCEPT;
        for &b in bytes {
            state = transition(state, class_of(b));
            if state == REJECT {
                break;
            }
        }
        state
    }

    #[test]
    fn test_reject_is_sink() {
        for class in 0..12 {
            assert_eq!(transition(REJECT, class), REJECT);
        }
    }

    #[test]
    fn test_ascii_stays_in_accept() {
        for b in 0u8..0x80 {
            assert_eq!(transition(ACCEPT, class_of(b)), ACCEPT);
        }
    }

    #[test]
    fn test_single_scalars() {
        for c in ['a', 'é', '€', '\u{FFFF}', '\u{10000}', '\u{10FFFF}'] {
            let mut buf = [0u8; 4];
            assert_eq!(run(c.encode_utf8(&mut buf).as_bytes()), ACCEPT, "{:?}", c);
        }
    }

    #[test]
    fn test_forbidden_sequences() {
        assert_eq!(run(&[0xC0, 0xB6]), REJECT);
        assert_eq!(run(&[0xE0, 0x97]), REJECT);
        assert_eq!(run(&[0xED, 0xA0]), REJECT);
        assert_eq!(run(&[0xF0, 0x8F]), REJECT);
        assert_eq!(run(&[0xF4, 0x90]), REJECT);
        assert_eq!(run(&[0xF5]), REJECT);
        assert_eq!(run(&[0x80]), REJECT);
    }

    #[test]
    fn test_truncated_is_mid_sequence() {
        for bytes in [&[0xC4][..], &[0xE1, 0x83], &[0xF3, 0xA0, 0x86]] {
            let state = run(bytes);
            assert_ne!(state, ACCEPT);
            assert_ne!(state, REJECT);
        }
    }

    #[test]
    fn test_accumulate() {
        let bytes = "€".as_bytes();
        let mut state = ACCEPT;
        let mut cp = 0;
        for &b in bytes {
            let class = class_of(b);
            cp = accumulate(state, cp, b, class);
            state = transition(state, class);
        }
        assert_eq!(state, ACCEPT);
        assert_eq!(cp, 0x20AC);
    }

    #[test]
    fn test_widths_agree_with_classes() {
        for b in 0u8..=0xFF {
            let width = char_width_from_leading_byte(b);
            let expected = match b {
                0x00..=0x7F => 1,
                0xC2..=0xDF => 2,
                0xE0..=0xEF => 3,
                0xF0..=0xF4 => 4,
                _ => 0,
            };
            assert_eq!(width, expected, "0x{:02X}", b);
            assert_eq!(is_leading_byte(b), b & 0xC0 != 0x80, "0x{:02X}", b);
        }
    }
}
