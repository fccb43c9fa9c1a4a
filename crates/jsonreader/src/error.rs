//! Errors reported while constructing a reader or reading a document.

use core::fmt;

use thiserror::Error;

use crate::sniff::Encoding;

/// Everything that can go wrong while constructing a reader or reading a
/// document. Every variant is final for the parse that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The buffer starts with the signature of an encoding this crate does not
    /// decode.
    #[error("Unsupported {0} encoding.")]
    UnsupportedEncoding(Encoding),
    /// The bytes at `offset` do not form a character in `encoding`.
    #[error("Invalid {encoding} data at position {offset}: {fault}.")]
    InvalidEncoding {
        /// Encoding selected for the buffer.
        encoding: Encoding,
        /// Byte offset of the offending sequence.
        offset: usize,
        /// What was wrong with it.
        fault: EncodingFault,
    },
    /// A character that is not allowed at this point of the grammar.
    #[error("Unexpected {found} at {location}.")]
    UnexpectedToken {
        /// Description of the offending character.
        found: Found,
        /// Where it was found.
        location: Location,
    },
    /// The input ended in the middle of a value.
    #[error("Unexpected end of JSON input.")]
    UnexpectedEndOfInput,
    /// A malformed numeric literal, such as a leading zero followed by
    /// another digit.
    #[error("Unexpected number at {location}.")]
    UnexpectedNumber {
        /// Position of the offending digit.
        location: Location,
    },
    /// A container opened beyond the configured
    /// [`max_nesting_depth`](crate::ReaderOptions::max_nesting_depth).
    #[error("Nesting exceeds the limit of {limit} at {location}.")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
        /// Position of the opening bracket that exceeded it.
        location: Location,
    },
}

impl ReadError {
    /// The line and column of a grammar error, if the error has one.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::UnexpectedToken { location, .. }
            | Self::UnexpectedNumber { location }
            | Self::NestingTooDeep { location, .. } => Some(*location),
            Self::UnsupportedEncoding(_)
            | Self::InvalidEncoding { .. }
            | Self::UnexpectedEndOfInput => None,
        }
    }
}

/// Why a byte sequence could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFault {
    /// The sequence starting with this byte is not valid.
    InvalidSequence(u8),
    /// The input ended inside a multi-byte or multi-unit sequence.
    Truncated,
    /// A UTF-16 surrogate without its partner.
    UnpairedSurrogate(u16),
}

impl fmt::Display for EncodingFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSequence(byte) => write!(f, "invalid sequence starting with byte 0x{byte:02X}"),
            Self::Truncated => f.write_str("truncated sequence at end of input"),
            Self::UnpairedSurrogate(unit) => write!(f, "unpaired surrogate 0x{unit:04X}"),
        }
    }
}

/// A 1-based position in the decoded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number, counting line feeds.
    pub line: usize,
    /// Character column within the line.
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// What the parser found where the grammar did not allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    /// The opening quote of a string.
    String,
    /// A digit or minus sign.
    Number,
    /// Any other character.
    Token(char),
}

impl From<char> for Found {
    fn from(c: char) -> Self {
        match c {
            '"' => Self::String,
            '0'..='9' | '-' => Self::Number,
            c => Self::Token(c),
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Number => f.write_str("number"),
            Self::Token(c) if *c < ' ' || *c > '\x7F' => match escape_name(*c) {
                Some(name) => write!(f, "token '\\{name}'"),
                None => write!(f, "token '\\u{:04x}'", u32::from(*c)),
            },
            Self::Token(c) => write!(f, "token '{c}'"),
        }
    }
}

/// The single-letter escape that produces `c` inside a JSON string.
fn escape_name(c: char) -> Option<char> {
    match c {
        '\u{0008}' => Some('b'),
        '\u{000C}' => Some('f'),
        '\n' => Some('n'),
        '\r' => Some('r'),
        '\t' => Some('t'),
        _ => None,
    }
}
