//! The JSON grammar state machine.
//!
//! The parser pulls one character at a time from a [`Decoder`] and keeps open
//! arrays and objects on an explicit, heap-allocated [`FrameStack`] instead of
//! the call stack. Nesting depth is therefore bounded by memory, not by
//! recursion, and `[[[[…]]]]` a hundred thousand levels deep reads like any
//! other document.
//!
//! # Examples
//!
//! ```rust
//! use jsonreader::{TextReader, Value};
//!
//! let value = TextReader::from_text(r#"{"key": [null, true, 3.14]}"#).read().unwrap();
//! let items = value.get("key").and_then(Value::as_array).unwrap();
//! assert_eq!(items[2], Value::Number(3.14));
//! ```
#![allow(clippy::enum_glob_use)]

use alloc::{string::String, vec::Vec};

use crate::{
    ReaderOptions, Value,
    decoder::Decoder,
    error::{Location, ReadError},
    escape_buffer::{self, UnicodeEscapeBuffer, Utf16Units},
    literal_buffer::{self, ExpectedLiteralBuffer},
    location::locate,
    value::{Array, Map},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Awaiting the root value.
    Start,
    /// Just after `[`: a value or `]`.
    BeforeArrayValue,
    /// Just after `,` in an array: a value is required.
    ArrayValueAfterComma,
    /// After an array element: `,` or `]`.
    AfterArrayValue,
    /// Just after `{`: a key or `}`.
    BeforePropertyName,
    /// Just after `,` in an object: a key is required.
    PropertyNameAfterComma,
    /// After a key: `:`.
    AfterPropertyName,
    /// After `:`: a value is required.
    BeforePropertyValue,
    /// After a property value: `,` or `}`.
    AfterPropertyValue,
    /// The root value is complete; only whitespace may follow.
    End,
}

/// Stack entry – one per open container
#[derive(Debug)]
enum Frame {
    Array {
        items: Array,
    },
    Object {
        entries: Map,
        pending_key: Option<String>, // key waiting for its value
    },
}

impl Frame {
    fn new_array_frame() -> Self {
        Frame::Array { items: Vec::new() }
    }

    fn new_object_frame() -> Self {
        Frame::Object {
            entries: Map::new(),
            pending_key: None,
        }
    }

    fn opening_state(&self) -> ParseState {
        match self {
            Frame::Array { .. } => ParseState::BeforeArrayValue,
            Frame::Object { .. } => ParseState::BeforePropertyName,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Array { items } => Value::Array(items),
            Frame::Object { entries, .. } => Value::Object(entries),
        }
    }
}

/// Open containers, innermost last. Its length is the current nesting depth.
#[derive(Debug)]
struct FrameStack {
    stack: Vec<Frame>,
}

impl FrameStack {
    fn new() -> Self {
        Self {
            stack: Vec::with_capacity(16),
        }
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn last_mut(&mut self) -> Option<&mut Frame> {
        self.stack.last_mut()
    }

    fn push(&mut self, frame: Frame) {
        self.stack.push(frame);
    }

    fn pop(&mut self) -> Option<Frame> {
        self.stack.pop()
    }
}

/// Single-use parser over one decoder.
pub(crate) struct Parser<'a> {
    decoder: Decoder<'a>,
    options: ReaderOptions,

    /// Lookahead character, `None` at end of input.
    current: Option<char>,
    /// Byte offset at which `current` starts.
    position: usize,

    parse_state: ParseState,
    frames: FrameStack,
    root: Option<Value>,

    /// Lexer helpers
    buffer: String, // reused for number lexemes
    unicode_escape_buffer: UnicodeEscapeBuffer,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(decoder: Decoder<'a>, options: ReaderOptions) -> Self {
        Self {
            position: decoder.position(),
            decoder,
            options,
            current: None,
            parse_state: ParseState::Start,
            frames: FrameStack::new(),
            root: None,
            buffer: String::new(),
            unicode_escape_buffer: UnicodeEscapeBuffer::new(),
        }
    }

    /// Reads exactly one JSON value followed by optional whitespace.
    pub(crate) fn parse(mut self) -> Result<Value, ReadError> {
        match self.parse_document() {
            Ok(value) => Ok(value),
            Err(err) => {
                #[cfg(any(test, feature = "fuzzing"))]
                assert!(!self.options.panic_on_error, "{err}");
                log::debug!(
                    "{} read failed at byte {} with {} open containers: {err}",
                    self.decoder.encoding(),
                    self.position,
                    self.frames.len()
                );
                Err(err)
            }
        }
    }

    fn parse_document(&mut self) -> Result<Value, ReadError> {
        use ParseState::*;

        self.advance()?;
        loop {
            self.skip_whitespace()?;
            match self.parse_state {
                Start | ArrayValueAfterComma | BeforePropertyValue => self.parse_value()?,

                BeforeArrayValue => match self.current {
                    Some(']') => self.close()?,
                    _ => self.parse_value()?,
                },

                AfterArrayValue => match self.current {
                    Some(',') => {
                        self.advance()?;
                        self.parse_state = ArrayValueAfterComma;
                    }
                    Some(']') => self.close()?,
                    _ => return Err(self.unexpected()),
                },

                BeforePropertyName => match self.current {
                    Some('}') => self.close()?,
                    _ => self.parse_property_name()?,
                },

                PropertyNameAfterComma => self.parse_property_name()?,

                AfterPropertyName => match self.current {
                    Some(':') => {
                        self.advance()?;
                        self.parse_state = BeforePropertyValue;
                    }
                    _ => return Err(self.unexpected()),
                },

                AfterPropertyValue => match self.current {
                    Some(',') => {
                        self.advance()?;
                        self.parse_state = PropertyNameAfterComma;
                    }
                    Some('}') => self.close()?,
                    _ => return Err(self.unexpected()),
                },

                End => {
                    if self.current.is_some() {
                        return Err(self.unexpected());
                    }
                    return self.root.take().ok_or(ReadError::UnexpectedEndOfInput);
                }
            }
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Containers
    // ------------------------------------------------------------------------------------------------

    /// Dispatches on the lookahead to read one value, or to open a container
    /// whose contents the main loop reads.
    fn parse_value(&mut self) -> Result<(), ReadError> {
        match self.current {
            Some('{') => self.open(Frame::new_object_frame()),
            Some('[') => self.open(Frame::new_array_frame()),
            Some('"') => {
                let value = self.parse_string()?;
                self.complete(Value::String(value));
                Ok(())
            }
            Some('0'..='9' | '-') => {
                let value = self.parse_number()?;
                self.complete(value);
                Ok(())
            }
            Some(c) => match ExpectedLiteralBuffer::new(c) {
                Some(literal) => {
                    let value = self.parse_literal(literal, false)?;
                    self.complete(value);
                    Ok(())
                }
                None => Err(self.unexpected()),
            },
            None => Err(ReadError::UnexpectedEndOfInput),
        }
    }

    fn parse_property_name(&mut self) -> Result<(), ReadError> {
        if self.current != Some('"') {
            return Err(self.unexpected());
        }
        let key = self.parse_string()?;
        if let Some(Frame::Object { pending_key, .. }) = self.frames.last_mut() {
            *pending_key = Some(key);
        }
        self.parse_state = ParseState::AfterPropertyName;
        Ok(())
    }

    /// Consumes an opening bracket and makes `frame` the current container.
    fn open(&mut self, frame: Frame) -> Result<(), ReadError> {
        if let Some(limit) = self.options.max_nesting_depth {
            if self.frames.len() >= limit {
                return Err(ReadError::NestingTooDeep {
                    limit,
                    location: self.location(),
                });
            }
        }

        self.advance()?;
        self.parse_state = frame.opening_state();
        self.frames.push(frame);
        log::trace!("opened container, depth {}", self.frames.len());
        Ok(())
    }

    /// Consumes a closing bracket and hands the finished container to its
    /// parent.
    fn close(&mut self) -> Result<(), ReadError> {
        self.advance()?;
        if let Some(frame) = self.frames.pop() {
            log::trace!("closed container, depth {}", self.frames.len());
            self.complete(frame.into_value());
        }
        Ok(())
    }

    /// Attaches a finished value to the current container, or makes it the
    /// root when no container is open.
    fn complete(&mut self, value: Value) {
        match self.frames.last_mut() {
            None => {
                self.root = Some(value);
                self.parse_state = ParseState::End;
            }
            Some(Frame::Array { items }) => {
                items.push(value);
                self.parse_state = ParseState::AfterArrayValue;
            }
            Some(Frame::Object {
                entries,
                pending_key,
            }) => {
                if let Some(key) = pending_key.take() {
                    // Last occurrence of a duplicate key wins.
                    entries.insert(key, value);
                }
                self.parse_state = ParseState::AfterPropertyValue;
            }
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Scalars
    // ------------------------------------------------------------------------------------------------

    /// Matches the rest of a keyword whose first character is `current`.
    fn parse_literal(
        &mut self,
        mut literal: ExpectedLiteralBuffer,
        negative: bool,
    ) -> Result<Value, ReadError> {
        if self.options.reject_non_finite
            && literal
                .kind()
                .is_some_and(literal_buffer::ExpectedLiteralValue::is_non_finite)
        {
            return Err(self.unexpected());
        }

        self.advance()?;
        loop {
            let Some(c) = self.current else {
                return Err(ReadError::UnexpectedEndOfInput);
            };
            match literal.step(c) {
                literal_buffer::Step::NeedMore => self.advance()?,
                literal_buffer::Step::Done(kind) => {
                    self.advance()?;
                    return Ok(kind.into_value(negative));
                }
                literal_buffer::Step::Reject => return Err(self.unexpected()),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value, ReadError> {
        self.buffer.clear();

        if self.current == Some('-') {
            self.buffer.push('-');
            self.advance()?;
            if self.current == Some('I') {
                return self.parse_literal(ExpectedLiteralBuffer::infinity(), true);
            }
        }

        let Some(first @ '0'..='9') = self.current else {
            return Err(self.unexpected());
        };
        self.buffer.push(first);
        self.advance()?;
        if first == '0' && self.current.is_some_and(|c| c.is_ascii_digit()) {
            return Err(ReadError::UnexpectedNumber {
                location: self.location(),
            });
        }
        self.push_digits()?;

        if self.current == Some('.') {
            self.buffer.push('.');
            self.advance()?;
            self.require_digit()?;
            self.push_digits()?;
        }

        if let Some(e @ ('e' | 'E')) = self.current {
            self.buffer.push(e);
            self.advance()?;
            if let Some(sign @ ('+' | '-')) = self.current {
                self.buffer.push(sign);
                self.advance()?;
            }
            self.require_digit()?;
            self.push_digits()?;
        }

        match self.buffer.parse::<f64>() {
            Ok(n) => Ok(Value::Number(n)),
            Err(_) => Err(ReadError::UnexpectedNumber {
                location: self.location(),
            }),
        }
    }

    fn require_digit(&self) -> Result<(), ReadError> {
        if self.current.is_some_and(|c| c.is_ascii_digit()) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn push_digits(&mut self) -> Result<(), ReadError> {
        while let Some(c @ '0'..='9') = self.current {
            self.buffer.push(c);
            self.advance()?;
        }
        Ok(())
    }

    fn parse_string(&mut self) -> Result<String, ReadError> {
        let mut value = String::new();
        // Code units from consecutive `\u` escapes, joined when the run ends.
        let mut units = Utf16Units::default();

        self.advance()?; // opening quote
        loop {
            let unescaped = match self.current {
                Some('"') => break,
                Some('\\') => {
                    self.advance()?;
                    match self.current {
                        Some('u') => {
                            self.advance()?;
                            let unit = self.parse_unicode_escape()?;
                            units.push(unit);
                            continue;
                        }
                        Some(c @ ('"' | '\\' | '/')) => c,
                        Some('b') => '\u{0008}',
                        Some('f') => '\u{000C}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        _ => return Err(self.unexpected()),
                    }
                }
                // JSON allows 0x20 .. 0x10FFFF unescaped.
                Some(c) if c < ' ' => return Err(self.unexpected()),
                Some(c) => c,
                None => return Err(ReadError::UnexpectedEndOfInput),
            };
            units.flush_into(&mut value);
            value.push(unescaped);
            self.advance()?;
        }
        units.flush_into(&mut value);
        self.advance()?; // closing quote
        Ok(value)
    }

    /// Reads the four hex digits after `\u`.
    fn parse_unicode_escape(&mut self) -> Result<u16, ReadError> {
        self.unicode_escape_buffer.reset();
        loop {
            let Some(c) = self.current else {
                return Err(ReadError::UnexpectedEndOfInput);
            };
            match self.unicode_escape_buffer.feed(c) {
                escape_buffer::Step::NeedMore => self.advance()?,
                escape_buffer::Step::Done(unit) => {
                    self.advance()?;
                    return Ok(unit);
                }
                escape_buffer::Step::Reject => return Err(self.unexpected()),
            }
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------------------------------

    #[inline]
    fn advance(&mut self) -> Result<(), ReadError> {
        self.position = self.decoder.position();
        self.current = self.decoder.decode()?;
        Ok(())
    }

    fn skip_whitespace(&mut self) -> Result<(), ReadError> {
        while matches!(self.current, Some(' ' | '\t' | '\n' | '\r')) {
            self.advance()?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------------------------------------

    fn location(&self) -> Location {
        locate(&self.decoder, self.position)
    }

    /// The error for finding `current` where the grammar does not allow it.
    fn unexpected(&self) -> ReadError {
        match self.current {
            None => ReadError::UnexpectedEndOfInput,
            Some(c) => ReadError::UnexpectedToken {
                found: c.into(),
                location: self.location(),
            },
        }
    }
}
