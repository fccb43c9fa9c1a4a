//! Utilities for decoding four-digit Unicode escape sequences.
//!
//! The [`UnicodeEscapeBuffer`] type accumulates exactly four ASCII
//! hexadecimal digits (`0-9`, `A-F`, `a-f`) and yields the UTF-16 code unit
//! they spell. Code units are not interpreted on their own: the string
//! sub-parser collects consecutive units in a [`Utf16Units`] run and converts
//! the run to text once it ends, so an escaped surrogate pair yields the
//! character it encodes.

use alloc::{string::String, vec::Vec};

/// What happened after feeding one more character into the escape buffer?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// A hex digit was accepted; more are needed.
    NeedMore,
    /// The fourth hex digit was accepted; this is the code unit.
    Done(u16),
    /// The character is not a hex digit.
    Reject,
}

#[derive(Debug, Default)]
/// Buffer for accumulating four hexadecimal digits into a UTF-16 code unit.
pub(crate) struct UnicodeEscapeBuffer {
    value: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears any accumulated digits.
    pub fn reset(&mut self) {
        self.value = 0;
        self.len = 0;
    }

    /// Feeds one character of the escape. After `Done` the buffer is reset
    /// and ready for the next escape.
    pub fn feed(&mut self, c: char) -> Step {
        let Some(digit) = c.to_digit(16) else {
            return Step::Reject;
        };

        // `digit` < 16, and at most four digits are shifted in.
        self.value = (self.value << 4) | digit as u16;
        self.len += 1;

        if self.len == 4 {
            let unit = self.value;
            self.reset();
            Step::Done(unit)
        } else {
            Step::NeedMore
        }
    }
}

/// A run of UTF-16 code units produced by consecutive `\u` escapes.
#[derive(Debug, Default)]
pub(crate) struct Utf16Units(Vec<u16>);

impl Utf16Units {
    pub fn push(&mut self, unit: u16) {
        self.0.push(unit);
    }

    /// Appends the run to `out` and empties it. Unpaired surrogates cannot be
    /// held by a Rust string and become U+FFFD.
    pub fn flush_into(&mut self, out: &mut String) {
        if self.0.is_empty() {
            return;
        }
        out.extend(
            char::decode_utf16(self.0.drain(..))
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );
    }
}
