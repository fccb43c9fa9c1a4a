#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonreader::{ReaderOptions, TextReader};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 1; // flag byte

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r", // JSON whitespace
    "\u{00A0}".as_bytes(),
    "\u{FEFF}".as_bytes(),
    "\u{2028}".as_bytes(),
];

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);

        let mut prefix = HEADER;
        let limit = max_size - prefix;
        prefix += append_whitespace(&mut data[prefix..], limit);
        let limit = max_size - prefix;
        prefix += append_value(&mut data[prefix..], size, limit);
        let limit = max_size - prefix;
        prefix += append_whitespace(&mut data[prefix..], limit);

        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append 0‒N whitespace code-points to `buf`, mostly from the JSON set,
/// but never exceed `limit`.  Returns the number of bytes written.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let n_codepoints = rng.random_range(0..=limit.min(4));
        let mut written = 0;

        for _ in 0..n_codepoints {
            // Non-JSON whitespace only one time in eight.
            let w = if rng.random_ratio(1, 8) {
                WS_TABLE[rng.random_range(4..WS_TABLE.len())]
            } else {
                WS_TABLE[rng.random_range(0..4)]
            };

            if written + w.len() > limit {
                break;
            }

            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2 + 1).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);

    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

/// Re-encodes UTF-8 `text` as selected by two flag bits.
fn render(text: &str, mode: u8) -> Vec<u8> {
    match mode & 3 {
        0 => text.as_bytes().to_vec(),
        1 => [0xEF, 0xBB, 0xBF]
            .into_iter()
            .chain(text.bytes())
            .collect(),
        2 => [0xFF, 0xFE]
            .into_iter()
            .chain(text.encode_utf16().flat_map(u16::to_le_bytes))
            .collect(),
        _ => [0xFE, 0xFF]
            .into_iter()
            .chain(text.encode_utf16().flat_map(u16::to_be_bytes))
            .collect(),
    }
}

fn same_number(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    a == b || diff <= f64::MIN_POSITIVE || diff <= f64::EPSILON * a.abs().max(b.abs())
}

fn same_value(ours: &jsonreader::Value, reference: &Value) -> bool {
    match (ours, reference) {
        (jsonreader::Value::Null, Value::Null) => true,
        (jsonreader::Value::Boolean(a), Value::Bool(b)) => a == b,
        (jsonreader::Value::Number(a), Value::Number(b)) => {
            b.as_f64().is_some_and(|b| same_number(*a, b))
        }
        (jsonreader::Value::String(a), Value::String(b)) => a == b,
        (jsonreader::Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same_value(a, b))
        }
        (jsonreader::Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).is_some_and(|b| same_value(v, b)))
        }
        _ => false,
    }
}

fn reader(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let data = &data[HEADER..];

    let options = ReaderOptions {
        reject_non_finite: flags & 1 != 0,
        max_nesting_depth: (flags & 2 != 0).then_some(usize::from(flags >> 4)),
        panic_on_error: false,
    };

    // Arbitrary bytes exercise the sniffer and decoders directly.
    if let Ok(reader) = TextReader::with_options(data, options) {
        let _ = reader.read();
    }

    // Valid UTF-8 is re-encoded and checked against serde_json.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let bytes = render(text, flags >> 2);
    let ours = TextReader::with_options(bytes.as_slice(), options).and_then(TextReader::read);

    if options.max_nesting_depth.is_some() {
        return;
    }
    if let Ok(reference) = serde_json::from_str::<Value>(text) {
        match ours {
            Ok(value) => assert!(
                same_value(&value, &reference),
                "mismatch for {text:?}: {value:?} vs {reference:?}"
            ),
            Err(err) => panic!("rejected valid JSON {text:?}: {err}"),
        }
    }
}

fuzz_target!(|data: &[u8]| reader(data));
