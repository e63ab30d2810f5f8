//! Delimiter scanning and nested-record boundary resolution.
//!
//! QDN is a flat byte stream: a nested record is just another `NAME<...>` span
//! inside its parent's field list. To carve that span out, the decoder needs the
//! offset of the `>` that matches a given `<`. [`resolve_end`] finds it with a
//! single nesting counter over the merged positions of both markers, so sibling
//! records and trailing scalar fields after a nested record resolve correctly.

use memchr::memchr_iter;

/// Opens a record's field list.
pub const OPEN: u8 = b'<';
/// Closes a record's field list.
pub const CLOSE: u8 = b'>';
/// Separates fields.
pub const SEPARATOR: u8 = b',';
/// Separates a scalar field's name from its value.
pub const ASSIGN: u8 = b'=';
/// Optional string quote.
pub const QUOTE: u8 = b'"';

/// Returns every offset where `buffer[offset] == marker`, in increasing order.
///
/// # Examples
///
/// ```rust
/// use serde_qdn::scan::all_positions;
///
/// assert_eq!(all_positions(b"a<b<c>>", b'>'), vec![5, 6]);
/// assert!(all_positions(b"abc", b'>').is_empty());
/// ```
#[must_use]
pub fn all_positions(buffer: &[u8], marker: u8) -> Vec<usize> {
    memchr_iter(marker, buffer).collect()
}

/// Returns the absolute offset of the `>` matching the `<` at `after_open - 1`.
///
/// The counter starts at one for the already consumed opening marker, goes up
/// on every `<` and down on every `>`; the answer is the `>` that brings it
/// back to zero. Returns `None` if the buffer ends first.
///
/// # Examples
///
/// ```rust
/// use serde_qdn::scan::resolve_end;
///
/// let buf = b"Line<Point<X=1,>,Point<X=3,>,>";
/// assert_eq!(resolve_end(buf, 11), Some(15));
/// assert_eq!(resolve_end(buf, 23), Some(27));
/// assert_eq!(resolve_end(buf, 5), Some(29));
/// ```
#[must_use]
pub fn resolve_end(buffer: &[u8], after_open: usize) -> Option<usize> {
    let remainder = buffer.get(after_open..)?;
    let opens = all_positions(remainder, OPEN);
    let closes = all_positions(remainder, CLOSE);

    let mut depth = 1usize;
    let mut next_open = opens.iter().peekable();
    for &close in &closes {
        while next_open.next_if(|&&open| open < close).is_some() {
            depth += 1;
        }
        depth -= 1;
        if depth == 0 {
            return Some(after_open + close);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_positions_in_order() {
        let buf = b"Point<X=3,Y=-7,>";
        assert_eq!(all_positions(buf, SEPARATOR), vec![9, 14]);
        assert_eq!(all_positions(buf, OPEN), vec![5]);
        assert_eq!(all_positions(b"", OPEN), Vec::<usize>::new());
    }

    #[test]
    fn test_resolve_single_record() {
        let buf = b"Point<X=3,Y=-7,>";
        assert_eq!(resolve_end(buf, 6), Some(15));
    }

    #[test]
    fn test_resolve_sibling_records() {
        let buf = b"Line<Point<X=1,Y=2,>,Point<X=3,Y=4,>,>";
        // First sibling must stop at its own `>`, not at a later one.
        assert_eq!(resolve_end(buf, 11), Some(19));
        assert_eq!(resolve_end(buf, 27), Some(35));
        assert_eq!(resolve_end(buf, 5), Some(37));
    }

    #[test]
    fn test_resolve_nested_followed_by_scalars() {
        let buf = b"A<B<C<x=1,>,>,y=2,z=3,>";
        assert_eq!(resolve_end(buf, 4), Some(12));
        assert_eq!(resolve_end(buf, 6), Some(10));
    }

    #[test]
    fn test_resolve_unbalanced() {
        assert_eq!(resolve_end(b"A<B<x=1,>", 4), Some(8));
        assert_eq!(resolve_end(b"A<B<x=1,>", 2), None);
        assert_eq!(resolve_end(b"A<", 10), None);
    }
}
