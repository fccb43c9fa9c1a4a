//! Encoding detection from byte-order marks and encoding signatures.
//!
//! Only the first five bytes are ever inspected. Buffers without a known
//! signature are decoded as UTF-8 from offset 0.

use core::fmt;

use crate::{
    decoder::{Decoder, Utf8Decoder, Utf16Decoder},
    error::ReadError,
};

/// Text encodings the sniffer can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Input that was already text; no decoding takes place.
    Text,
    /// UTF-8, with or without a byte-order mark.
    Utf8,
    /// UTF-16, little-endian byte order.
    Utf16Le,
    /// UTF-16, big-endian byte order.
    Utf16Be,
    /// UTF-32, little-endian byte order. Recognized but unsupported.
    Utf32Le,
    /// UTF-32, big-endian byte order. Recognized but unsupported.
    Utf32Be,
    /// UTF-7. Recognized but unsupported.
    Utf7,
    /// GB-18030. Recognized but unsupported.
    Gb18030,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16 (little-endian)",
            Self::Utf16Be => "UTF-16 (big-endian)",
            Self::Utf32Le => "UTF-32 (little-endian)",
            Self::Utf32Be => "UTF-32 (big-endian)",
            Self::Utf7 => "UTF-7",
            Self::Gb18030 => "GB-18030",
        })
    }
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF32_BE_BOM: &[u8] = &[0x00, 0x00, 0xFE, 0xFF];
const UTF32_LE_BOM: &[u8] = &[0xFF, 0xFE, 0x00, 0x00];
const UTF7_BOM_PREFIX: &[u8] = &[0x2B, 0x2F, 0x76];
const GB18030_BOM: &[u8] = &[0x84, 0x31, 0x95, 0x33];

/// Selects a decoder for `buffer`, positioned after any signature.
///
/// Signatures are tested longest-first where they overlap, so `FF FE 00 00`
/// is reported as UTF-32 rather than decoded as UTF-16 with a leading NUL.
pub(crate) fn sniff(buffer: &[u8]) -> Result<Decoder<'_>, ReadError> {
    let decoder = if buffer.starts_with(UTF8_BOM) {
        Decoder::Utf8(Utf8Decoder::new(buffer, UTF8_BOM.len()))
    } else if buffer.starts_with(UTF32_BE_BOM) {
        return Err(unsupported(Encoding::Utf32Be));
    } else if buffer.starts_with(UTF32_LE_BOM) {
        return Err(unsupported(Encoding::Utf32Le));
    } else if buffer.starts_with(UTF16_BE_BOM) {
        Decoder::Utf16(Utf16Decoder::big_endian(buffer, UTF16_BE_BOM.len()))
    } else if buffer.starts_with(UTF16_LE_BOM) {
        Decoder::Utf16(Utf16Decoder::little_endian(buffer, UTF16_LE_BOM.len()))
    } else if is_utf7_signature(buffer) {
        return Err(unsupported(Encoding::Utf7));
    } else if buffer.starts_with(GB18030_BOM) {
        return Err(unsupported(Encoding::Gb18030));
    } else {
        Decoder::Utf8(Utf8Decoder::new(buffer, 0))
    };

    log::debug!(
        "sniffed {} encoding, decoding from offset {}",
        decoder.encoding(),
        decoder.position()
    );
    Ok(decoder)
}

/// `2B 2F 76` followed by `38 2D`, or by one of `38`, `39`, `2B`, `2F`.
fn is_utf7_signature(buffer: &[u8]) -> bool {
    matches!(
        buffer.strip_prefix(UTF7_BOM_PREFIX),
        Some([0x38 | 0x39 | 0x2B | 0x2F, ..])
    )
}

fn unsupported(encoding: Encoding) -> ReadError {
    log::debug!("rejecting input with {encoding} signature");
    ReadError::UnsupportedEncoding(encoding)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::utf8_bom(&[0xEF, 0xBB, 0xBF, b'{', b'}'], Encoding::Utf8, 3)]
    #[case::utf16_be_bom(&[0xFE, 0xFF, 0x00, b'['], Encoding::Utf16Be, 2)]
    #[case::utf16_le_bom(&[0xFF, 0xFE, b'[', 0x00], Encoding::Utf16Le, 2)]
    #[case::no_signature(b"{}", Encoding::Utf8, 0)]
    #[case::empty(b"", Encoding::Utf8, 0)]
    #[case::partial_utf8_bom(&[0xEF, 0xBB], Encoding::Utf8, 0)]
    #[case::utf7_prefix_only(&[0x2B, 0x2F, 0x76], Encoding::Utf8, 0)]
    fn selects_decoder(#[case] input: &[u8], #[case] encoding: Encoding, #[case] start: usize) {
        let decoder = sniff(input).unwrap();
        assert_eq!(decoder.encoding(), encoding);
        assert_eq!(decoder.position(), start);
    }

    #[rstest]
    #[case::utf32_be(&[0x00, 0x00, 0xFE, 0xFF, 0x00], Encoding::Utf32Be)]
    #[case::utf32_le(&[0xFF, 0xFE, 0x00, 0x00], Encoding::Utf32Le)]
    #[case::utf7_dash(&[0x2B, 0x2F, 0x76, 0x38, 0x2D], Encoding::Utf7)]
    #[case::utf7_38(&[0x2B, 0x2F, 0x76, 0x38], Encoding::Utf7)]
    #[case::utf7_39(&[0x2B, 0x2F, 0x76, 0x39], Encoding::Utf7)]
    #[case::utf7_2b(&[0x2B, 0x2F, 0x76, 0x2B], Encoding::Utf7)]
    #[case::utf7_2f(&[0x2B, 0x2F, 0x76, 0x2F, b'x'], Encoding::Utf7)]
    #[case::gb18030(&[0x84, 0x31, 0x95, 0x33, b'{'], Encoding::Gb18030)]
    fn rejects_unsupported_signature(#[case] input: &[u8], #[case] encoding: Encoding) {
        assert_eq!(
            sniff(input).unwrap_err(),
            ReadError::UnsupportedEncoding(encoding)
        );
    }
}
