#![allow(missing_docs)]

use jsonreader::{ReaderOptions, TextReader};

fn render(input: &[u8]) -> String {
    match jsonreader::from_slice(input) {
        Ok(value) => format!("ok: {value:?}"),
        Err(err) => err.to_string(),
    }
}

fn render_strict(text: &str) -> String {
    let options = ReaderOptions {
        max_nesting_depth: Some(4),
        reject_non_finite: true,
        ..ReaderOptions::default()
    };
    match TextReader::with_options(text, options).and_then(TextReader::read) {
        Ok(value) => format!("ok: {value:?}"),
        Err(err) => err.to_string(),
    }
}

#[test]
fn snapshot_grammar_errors() {
    insta::assert_snapshot!(render(b""), @"Unexpected end of JSON input.");
    insta::assert_snapshot!(render(b"[1,]"), @"Unexpected token ']' at 1:4.");
    insta::assert_snapshot!(render(b"{\"a\" \"b\"}"), @"Unexpected string at 1:6.");
    insta::assert_snapshot!(render(b"[true false]"), @"Unexpected token 'f' at 1:7.");
    insta::assert_snapshot!(render(b"{\n  \"a\": 1\n  \"b\": 2\n}"), @"Unexpected string at 3:3.");
    insta::assert_snapshot!(render(b"01"), @"Unexpected number at 1:2.");
    insta::assert_snapshot!(render(b"[1] 2"), @"Unexpected number at 1:5.");
    insta::assert_snapshot!(render(b"\"tab\there\""), @r"Unexpected token '\t' at 1:5.");
    insta::assert_snapshot!(render(b"\"\\u00zz\""), @"Unexpected token 'z' at 1:6.");
}

#[test]
fn snapshot_encoding_errors() {
    insta::assert_snapshot!(render(b"[\xC0]"), @"Invalid UTF-8 data at position 1: invalid sequence starting with byte 0xC0.");
    insta::assert_snapshot!(render(b"\xEF\xBB\xBF\"\xE2\x82"), @"Invalid UTF-8 data at position 4: truncated sequence at end of input.");
    insta::assert_snapshot!(render(b"\xFE\xFF\xDC\x00"), @"Invalid UTF-16 (big-endian) data at position 2: unpaired surrogate 0xDC00.");
    insta::assert_snapshot!(render(b"\x00\x00\xFE\xFF"), @"Unsupported UTF-32 (big-endian) encoding.");
    insta::assert_snapshot!(render(b"+/v8-"), @"Unsupported UTF-7 encoding.");
    insta::assert_snapshot!(render(b"\x84\x31\x95\x33"), @"Unsupported GB-18030 encoding.");
}

#[test]
fn snapshot_option_errors() {
    insta::assert_snapshot!(render_strict("[[[[[]]]]]"), @"Nesting exceeds the limit of 4 at 1:5.");
    insta::assert_snapshot!(render_strict("{\"x\": NaN}"), @"Unexpected token 'N' at 1:7.");
    insta::assert_snapshot!(render_strict("[[[[-1.5]]]]"), @"ok: Array([Array([Array([Array([Number(-1.5)])])])])");
}
