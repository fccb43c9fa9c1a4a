//! Character decoders over a borrowed input buffer.
//!
//! A [`Decoder`] is chosen once per input by the sniffer and yields one
//! `char` per call to [`Decoder::decode`], tracking the byte offset of the
//! next undecoded character. Decoders never copy the buffer.

use crate::{
    error::{EncodingFault, ReadError},
    sniff::Encoding,
};

/// The closed set of decoding strategies.
#[derive(Debug, Clone)]
pub(crate) enum Decoder<'a> {
    Text(TextDecoder<'a>),
    Utf8(Utf8Decoder<'a>),
    Utf16(Utf16Decoder<'a>),
}

impl<'a> Decoder<'a> {
    /// Consumes the next character; `Ok(None)` at end of input.
    #[inline]
    pub(crate) fn decode(&mut self) -> Result<Option<char>, ReadError> {
        match self {
            Decoder::Text(d) => Ok(d.decode()),
            Decoder::Utf8(d) => d.decode(),
            Decoder::Utf16(d) => d.decode(),
        }
    }

    /// Byte offset of the next character to decode.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        match self {
            Decoder::Text(d) => d.position,
            Decoder::Utf8(d) => d.position,
            Decoder::Utf16(d) => d.position,
        }
    }

    pub(crate) fn encoding(&self) -> Encoding {
        match self {
            Decoder::Text(_) => Encoding::Text,
            Decoder::Utf8(_) => Encoding::Utf8,
            Decoder::Utf16(d) if d.little_endian => Encoding::Utf16Le,
            Decoder::Utf16(_) => Encoding::Utf16Be,
        }
    }

    /// A fresh decoder of the same kind over the same buffer, positioned at
    /// the first character after any signature.
    pub(crate) fn restart(&self) -> Decoder<'a> {
        match self {
            Decoder::Text(d) => Decoder::Text(TextDecoder::new(d.text)),
            Decoder::Utf8(d) => Decoder::Utf8(Utf8Decoder::new(d.buffer, d.origin)),
            Decoder::Utf16(d) => Decoder::Utf16(Utf16Decoder {
                position: d.origin,
                ..d.clone()
            }),
        }
    }
}

/// Pass-through over text that is already decoded.
#[derive(Debug, Clone)]
pub(crate) struct TextDecoder<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> TextDecoder<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    fn decode(&mut self) -> Option<char> {
        let c = self.text.get(self.position..)?.chars().next()?;
        self.position += c.len_utf8();
        Some(c)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Utf8Decoder<'a> {
    buffer: &'a [u8],
    origin: usize,
    position: usize,
}

impl<'a> Utf8Decoder<'a> {
    pub(crate) fn new(buffer: &'a [u8], origin: usize) -> Self {
        Self {
            buffer,
            origin,
            position: origin,
        }
    }

    fn decode(&mut self) -> Result<Option<char>, ReadError> {
        let Some(rest) = self.buffer.get(self.position..) else {
            return Ok(None);
        };
        let Some(&lead) = rest.first() else {
            return Ok(None);
        };

        if lead.is_ascii() {
            self.position += 1;
            return Ok(Some(char::from(lead)));
        }

        match bstr::decode_utf8(rest) {
            (Some(c), len) => {
                self.position += len;
                Ok(Some(c))
            }
            (None, valid_prefix) => Err(self.invalid(lead, rest.len(), valid_prefix)),
        }
    }

    /// Classifies a failed decode at the current position. A valid prefix that
    /// runs into the end of the buffer is a truncated sequence; anything else
    /// is an invalid one.
    fn invalid(&self, lead: u8, remaining: usize, valid_prefix: usize) -> ReadError {
        let expected = match lead {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => 0,
        };
        let fault = if valid_prefix == remaining && valid_prefix < expected {
            EncodingFault::Truncated
        } else {
            EncodingFault::InvalidSequence(lead)
        };
        ReadError::InvalidEncoding {
            encoding: Encoding::Utf8,
            offset: self.position,
            fault,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Utf16Decoder<'a> {
    buffer: &'a [u8],
    origin: usize,
    position: usize,
    little_endian: bool,
}

impl<'a> Utf16Decoder<'a> {
    pub(crate) fn little_endian(buffer: &'a [u8], origin: usize) -> Self {
        Self {
            buffer,
            origin,
            position: origin,
            little_endian: true,
        }
    }

    pub(crate) fn big_endian(buffer: &'a [u8], origin: usize) -> Self {
        Self {
            little_endian: false,
            ..Self::little_endian(buffer, origin)
        }
    }

    /// Reads one 16-bit code unit. A single dangling byte is not a unit.
    fn read_unit(&mut self) -> Option<u16> {
        let &[a, b] = self.buffer.get(self.position..self.position + 2)? else {
            return None;
        };
        self.position += 2;
        Some(if self.little_endian {
            u16::from_le_bytes([a, b])
        } else {
            u16::from_be_bytes([a, b])
        })
    }

    fn decode(&mut self) -> Result<Option<char>, ReadError> {
        let start = self.position;
        let Some(unit) = self.read_unit() else {
            return Ok(None);
        };

        let code = match unit {
            0xD800..=0xDBFF => {
                let Some(low) = self.read_unit() else {
                    return Err(self.invalid(start, EncodingFault::Truncated));
                };
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.invalid(start, EncodingFault::UnpairedSurrogate(unit)));
                }
                0x10000 + ((u32::from(unit) & 0x3FF) << 10) + (u32::from(low) & 0x3FF)
            }
            0xDC00..=0xDFFF => {
                return Err(self.invalid(start, EncodingFault::UnpairedSurrogate(unit)));
            }
            _ => u32::from(unit),
        };

        char::from_u32(code)
            .map(Some)
            .ok_or_else(|| self.invalid(start, EncodingFault::UnpairedSurrogate(unit)))
    }

    fn invalid(&self, offset: usize, fault: EncodingFault) -> ReadError {
        ReadError::InvalidEncoding {
            encoding: if self.little_endian {
                Encoding::Utf16Le
            } else {
                Encoding::Utf16Be
            },
            offset,
            fault,
        }
    }
}
