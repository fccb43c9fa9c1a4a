use alloc::{string::String, vec::Vec};

use crate::{Map, ReadError, ReaderOptions, TextReader, Value};

/// Reads `text` with options that panic at the error site, so failures in
/// tests that expect success come with a backtrace.
pub fn read_ok(text: &str) -> Value {
    let options = ReaderOptions {
        panic_on_error: true,
        ..ReaderOptions::default()
    };
    TextReader::with_options(text, options).unwrap().read().unwrap()
}

pub fn read_err(text: &str) -> ReadError {
    TextReader::from_text(text).read().unwrap_err()
}

pub fn read_bytes(bytes: &[u8]) -> Result<Value, ReadError> {
    TextReader::from_bytes(bytes)?.read()
}

/// Byte renderings of the same text the sniffer must treat alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    Utf8,
    Utf8Bom,
    Utf16LeBom,
    Utf16BeBom,
}

impl Rendering {
    pub const ALL: [Rendering; 4] = [
        Rendering::Utf8,
        Rendering::Utf8Bom,
        Rendering::Utf16LeBom,
        Rendering::Utf16BeBom,
    ];

    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Rendering::Utf8 => text.as_bytes().to_vec(),
            Rendering::Utf8Bom => [0xEF, 0xBB, 0xBF]
                .into_iter()
                .chain(text.bytes())
                .collect(),
            Rendering::Utf16LeBom => [0xFF, 0xFE]
                .into_iter()
                .chain(text.encode_utf16().flat_map(u16::to_le_bytes))
                .collect(),
            Rendering::Utf16BeBom => [0xFE, 0xFF]
                .into_iter()
                .chain(text.encode_utf16().flat_map(u16::to_be_bytes))
                .collect(),
        }
    }
}

pub fn object<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(k, v)| (String::from(k), v))
            .collect::<Map>(),
    )
}
