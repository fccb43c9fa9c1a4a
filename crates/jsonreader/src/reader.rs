//! The public entry point: a reader over bytes or text.

use crate::{
    ReaderOptions, Value,
    decoder::{Decoder, TextDecoder},
    error::ReadError,
    parser::Parser,
    sniff::{Encoding, sniff},
};

/// Input accepted by [`TextReader::create`].
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    /// Bytes in an encoding to be detected from their first bytes.
    Bytes(&'a [u8]),
    /// Text that is already decoded.
    Text(&'a str),
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

/// Reads one JSON document from a byte buffer of unknown encoding or from
/// text.
///
/// Construction selects a decoder; [`read`](TextReader::read) does all of the
/// parsing and consumes the reader.
///
/// # Examples
///
/// ```rust
/// use jsonreader::{Encoding, TextReader, Value};
///
/// // UTF-16 (big-endian) with a byte-order mark.
/// let bytes = [0xFE, 0xFF, 0x00, b'[', 0x00, b'1', 0x00, b']'];
/// let reader = TextReader::from_bytes(&bytes).unwrap();
/// assert_eq!(reader.encoding(), Encoding::Utf16Be);
/// assert_eq!(reader.read().unwrap(), Value::Array(vec![Value::Number(1.0)]));
/// ```
#[derive(Debug, Clone)]
pub struct TextReader<'a> {
    decoder: Decoder<'a>,
    options: ReaderOptions,
}

impl<'a> TextReader<'a> {
    /// Creates a reader for either kind of input with default options.
    ///
    /// # Errors
    ///
    /// [`ReadError::UnsupportedEncoding`] if a byte input starts with a UTF-32,
    /// UTF-7 or GB-18030 signature.
    pub fn create(input: impl Into<Input<'a>>) -> Result<Self, ReadError> {
        Self::with_options(input, ReaderOptions::default())
    }

    /// Creates a reader for either kind of input.
    ///
    /// # Errors
    ///
    /// See [`TextReader::create`].
    pub fn with_options(
        input: impl Into<Input<'a>>,
        options: ReaderOptions,
    ) -> Result<Self, ReadError> {
        let decoder = match input.into() {
            Input::Bytes(bytes) => sniff(bytes)?,
            Input::Text(text) => Decoder::Text(TextDecoder::new(text)),
        };
        Ok(Self { decoder, options })
    }

    /// Creates a reader over bytes, detecting the encoding from any
    /// byte-order mark and defaulting to UTF-8.
    ///
    /// # Errors
    ///
    /// See [`TextReader::create`].
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, ReadError> {
        Self::create(Input::Bytes(bytes))
    }

    /// Creates a reader over text. No encoding detection takes place.
    #[must_use]
    pub fn from_text(text: &'a str) -> Self {
        Self {
            decoder: Decoder::Text(TextDecoder::new(text)),
            options: ReaderOptions::default(),
        }
    }

    /// The encoding the reader decodes with.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.decoder.encoding()
    }

    /// Parses the whole input into a [`Value`].
    ///
    /// # Errors
    ///
    /// Any encoding or grammar error; see [`ReadError`]. There is no partial
    /// result.
    pub fn read(self) -> Result<Value, ReadError> {
        Parser::new(self.decoder, self.options).parse()
    }
}

/// Reads a JSON document from bytes of unknown encoding.
///
/// ```rust
/// let value = jsonreader::from_slice(b"\xEF\xBB\xBF{\"a\": NaN}").unwrap();
/// assert!(value.get("a").and_then(|v| v.as_f64()).unwrap().is_nan());
/// ```
///
/// # Errors
///
/// See [`ReadError`].
pub fn from_slice(bytes: &[u8]) -> Result<Value, ReadError> {
    TextReader::from_bytes(bytes)?.read()
}

/// Reads a JSON document from text.
///
/// # Errors
///
/// See [`ReadError`].
pub fn from_str(text: &str) -> Result<Value, ReadError> {
    TextReader::from_text(text).read()
}
