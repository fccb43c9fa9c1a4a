//! Line and column lookup for error messages.

use crate::{decoder::Decoder, error::Location};

/// Re-decodes the input from its start with a fresh decoder until `offset` is
/// reached, counting line feeds.
///
/// `live` is only used as a template; its cursor is left untouched. If
/// `offset` is never hit exactly (it always is for offsets recorded by the
/// parser), the position at end of input is returned.
pub(crate) fn locate(live: &Decoder<'_>, offset: usize) -> Location {
    let mut decoder = live.restart();
    let mut location = Location { line: 1, column: 1 };

    while decoder.position() < offset {
        match decoder.decode() {
            Ok(Some('\n')) => {
                location.line += 1;
                location.column = 1;
            }
            Ok(Some(_)) => location.column += 1,
            Ok(None) | Err(_) => break,
        }
    }

    location
}
