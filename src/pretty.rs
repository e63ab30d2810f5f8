//! Pretty-printer for compact QDN buffers.
//!
//! Re-lays out an encoded buffer for reading in an editor: every `<` and `>`
//! on its own line, one field per line, nested records indented by one tab.
//!
//! ```rust
//! use serde_qdn::format;
//!
//! let pretty = format(b"Point<X=3,Y=-7,>").unwrap();
//! assert_eq!(pretty, b"Point\n<\n\tX=3,\n\tY=-7,\n>");
//! ```
//!
//! The transform is one-way. Formatted output cannot be decoded and cannot be
//! formatted again, so keep it off network and storage paths.

use crate::scan::{CLOSE, OPEN, SEPARATOR};
use crate::{Error, Result};
use memchr::memchr2;

const NEWLINE: u8 = b'\n';
const INDENT: u8 = b'\t';

/// Formats a compact buffer as indented multi-line text.
///
/// # Errors
///
/// Returns [`Error::AlreadyFormatted`] if the buffer already contains a newline
/// or a tab. Such bytes are legal inside string values, so a compact buffer
/// whose strings hold a newline or a tab is refused too: it still encodes and
/// decodes, it just cannot be laid out.
pub fn format(buffer: &[u8]) -> Result<Vec<u8>> {
    if memchr2(NEWLINE, INDENT, buffer).is_some() {
        return Err(Error::AlreadyFormatted);
    }

    let mut out = Vec::with_capacity(buffer.len() * 2);
    let mut indent = 0usize;

    for &byte in buffer {
        match byte {
            OPEN => {
                out.push(NEWLINE);
                push_indent(&mut out, indent);
                out.push(OPEN);
                out.push(NEWLINE);
                indent += 1;
                push_indent(&mut out, indent);
            }
            CLOSE => {
                if out.last() == Some(&INDENT) {
                    out.pop();
                }
                out.push(CLOSE);
                indent = indent.saturating_sub(1);
            }
            SEPARATOR => {
                out.push(SEPARATOR);
                out.push(NEWLINE);
                push_indent(&mut out, indent);
            }
            other => out.push(other),
        }
    }

    tracing::debug!(input = buffer.len(), output = out.len(), "formatted buffer");
    Ok(out)
}

fn push_indent(out: &mut Vec<u8>, depth: usize) {
    out.extend(std::iter::repeat(INDENT).take(depth));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_layout() {
        let pretty = format(b"Line<Point<X=1,>,Point<X=3,>,>").unwrap();
        let expected = "Line\n<\n\tPoint\n\t<\n\t\tX=1,\n\t>,\n\tPoint\n\t<\n\t\tX=3,\n\t>,\n>";
        assert_eq!(String::from_utf8(pretty).unwrap(), expected);
    }

    #[test]
    fn test_refuses_formatted_input() {
        let once = format(b"Point<X=3,Y=-7,>").unwrap();
        assert_eq!(format(&once), Err(Error::AlreadyFormatted));
        assert_eq!(format(b"a\tb"), Err(Error::AlreadyFormatted));
    }

    #[test]
    fn test_layout_bytes_inside_strings_are_refused() {
        let mut note = crate::Record::new("Note");
        note.insert("text", "a\tb");
        let buffer = crate::encode_record(&note).unwrap();
        assert_eq!(buffer, b"Note<text=a\tb,>");
        assert_eq!(format(&buffer), Err(Error::AlreadyFormatted));
    }

    #[test]
    fn test_plain_bytes_pass_through() {
        assert_eq!(format(b"no structure").unwrap(), b"no structure");
        assert_eq!(format(b"").unwrap(), b"");
    }
}
