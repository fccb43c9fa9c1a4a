//! A non-recursive JSON reader for byte buffers of unknown text encoding.
//!
//! [`TextReader`] sniffs the byte-order mark of its input (UTF-8, UTF-16 in
//! either byte order, or no mark at all for UTF-8), decodes one character at
//! a time and builds a [`Value`] tree with an explicit stack of open
//! containers, so arbitrarily deep documents never exhaust the call stack.
//!
//! Besides RFC 8259 JSON, the reader accepts the number literals `NaN`,
//! `Infinity` and `-Infinity`.
//!
//! ```rust
//! use jsonreader::{TextReader, Value};
//!
//! let value = TextReader::create(b"[1, 2.5, -Infinity]").unwrap().read().unwrap();
//! assert_eq!(
//!     value,
//!     Value::Array(vec![
//!         Value::Number(1.0),
//!         Value::Number(2.5),
//!         Value::Number(f64::NEG_INFINITY),
//!     ])
//! );
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decoder;
mod escape_buffer;
mod literal_buffer;
mod location;
mod value;

mod error;
mod options;
mod parser;
mod reader;
mod sniff;

#[cfg(test)]
mod tests;

pub use error::{EncodingFault, Found, Location, ReadError};
pub use options::ReaderOptions;
pub use reader::{Input, TextReader, from_slice, from_str};
pub use sniff::Encoding;
pub use value::{Array, Map, Value};
