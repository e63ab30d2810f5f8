//! Positional cursor over one record's field list.
//!
//! Shared by the Serde [`Deserializer`](crate::Deserializer) and the dynamic
//! [`decode_record`](crate::decode_record). Fields are consumed strictly in
//! declaration order; the names written in the buffer are never consulted.

use crate::scan::{self, ASSIGN, CLOSE, OPEN, SEPARATOR};
use crate::{Error, QdnOptions, Result};
use memchr::{memchr, memchr2, memchr3, memmem};

/// A nested record carved out of its parent's buffer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Span<'a> {
    pub text: &'a str,
    /// Offset of `text` within the top-level buffer.
    pub base: usize,
}

/// What the next field in the buffer looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldKindHint {
    Scalar,
    Record,
}

pub(crate) struct RecordReader<'a> {
    input: &'a str,
    base: usize,
    pos: usize,
    depth: usize,
    options: QdnOptions,
}

impl<'a> RecordReader<'a> {
    /// Validates the record header and positions the cursor on the first field.
    pub fn open(
        span: Span<'a>,
        name: &str,
        field_count: usize,
        depth: usize,
        options: &QdnOptions,
    ) -> Result<Self> {
        if field_count == 0 {
            return Err(Error::empty_shape(name));
        }
        options.check_depth(depth)?;

        let bytes = span.text.as_bytes();
        if memmem::find(bytes, name.as_bytes()).is_none() {
            return Err(Error::name_mismatch(name));
        }
        let open = memchr(OPEN, bytes).ok_or_else(|| Error::malformed(span.base, '<'))?;

        tracing::trace!(record = name, offset = span.base, depth, "entering record");
        Ok(RecordReader {
            input: span.text,
            base: span.base,
            pos: open + 1,
            depth,
            options: options.clone(),
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn options(&self) -> &QdnOptions {
        &self.options
    }

    /// Offset of the next structural byte (`=`, `<` or `>`) at or after the cursor.
    fn next_structural(&self) -> Option<(usize, u8)> {
        let bytes = self.input.as_bytes();
        let rest = bytes.get(self.pos..)?;
        memchr3(ASSIGN, OPEN, CLOSE, rest).map(|i| (self.pos + i, rest[i]))
    }

    /// Classifies the next field without consuming it.
    pub fn peek_kind(&self) -> Result<FieldKindHint> {
        match self.next_structural() {
            Some((_, ASSIGN)) => Ok(FieldKindHint::Scalar),
            Some((_, OPEN)) => Ok(FieldKindHint::Record),
            _ => Err(self.malformed_here('=')),
        }
    }

    /// Consumes a scalar field and returns its raw value text.
    pub fn next_scalar(&mut self) -> Result<&'a str> {
        let eq = match self.next_structural() {
            Some((at, ASSIGN)) => at,
            _ => return Err(self.malformed_here('=')),
        };

        let bytes = self.input.as_bytes();
        let start = eq + 1;
        let end = memchr2(SEPARATOR, CLOSE, &bytes[start..])
            .map(|i| start + i)
            .ok_or_else(|| Error::malformed(self.base + start, ','))?;

        self.pos = if bytes[end] == SEPARATOR { end + 1 } else { end };
        Ok(&self.input[start..end])
    }

    /// Consumes a nested record field and returns its span, from its name
    /// through its matching `>`.
    pub fn next_record(&mut self) -> Result<Span<'a>> {
        let open = match self.next_structural() {
            Some((at, OPEN)) => at,
            _ => return Err(self.malformed_here('<')),
        };

        let bytes = self.input.as_bytes();
        let close = scan::resolve_end(bytes, open + 1)
            .ok_or_else(|| Error::malformed(self.base + open, '>'))?;
        tracing::trace!(
            open = self.base + open,
            close = self.base + close,
            "resolved nested record"
        );

        let span = Span {
            text: &self.input[self.pos..=close],
            base: self.base + self.pos,
        };
        self.pos = close + 1;
        if bytes.get(self.pos) == Some(&SEPARATOR) {
            self.pos += 1;
        }
        Ok(span)
    }

    /// Consumes the next field, whatever its kind.
    pub fn skip_field(&mut self) -> Result<()> {
        match self.peek_kind()? {
            FieldKindHint::Scalar => self.next_scalar().map(|_| ()),
            FieldKindHint::Record => self.next_record().map(|_| ()),
        }
    }

    fn malformed_here(&self, expected: char) -> Error {
        Error::malformed(self.base + self.pos, expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top(text: &str) -> Span<'_> {
        Span { text, base: 0 }
    }

    #[test]
    fn test_reads_scalars_positionally() {
        let options = QdnOptions::default();
        let mut reader = RecordReader::open(top("Point<X=3,Y=-7,>"), "Point", 2, 0, &options).unwrap();
        assert_eq!(reader.next_scalar().unwrap(), "3");
        assert_eq!(reader.next_scalar().unwrap(), "-7");
    }

    #[test]
    fn test_tolerates_missing_trailing_separator() {
        let options = QdnOptions::default();
        let mut reader = RecordReader::open(top("Point<X=3,Y=-7>"), "Point", 2, 0, &options).unwrap();
        assert_eq!(reader.next_scalar().unwrap(), "3");
        assert_eq!(reader.next_scalar().unwrap(), "-7");
    }

    #[test]
    fn test_carves_sibling_records() {
        let options = QdnOptions::default();
        let buf = "Line<Point<X=1,Y=2,>,Point<X=3,Y=4,>,w=9,>";
        let mut reader = RecordReader::open(top(buf), "Line", 3, 0, &options).unwrap();

        let first = reader.next_record().unwrap();
        assert_eq!(first.text, "Point<X=1,Y=2,>");
        assert_eq!(first.base, 5);

        let second = reader.next_record().unwrap();
        assert_eq!(second.text, "Point<X=3,Y=4,>");
        assert_eq!(second.base, 21);

        assert_eq!(reader.next_scalar().unwrap(), "9");
    }

    #[test]
    fn test_kind_mismatch_is_malformed() {
        let options = QdnOptions::default();
        let mut reader = RecordReader::open(top("Line<Point<X=1,>,>"), "Line", 1, 0, &options).unwrap();
        assert_eq!(
            reader.next_scalar(),
            Err(Error::MalformedBuffer { offset: 5, expected: '=' })
        );

        let mut reader = RecordReader::open(top("Point<X=1,>"), "Point", 1, 0, &options).unwrap();
        assert!(matches!(
            reader.next_record(),
            Err(Error::MalformedBuffer { expected: '<', .. })
        ));
    }

    #[test]
    fn test_too_few_fields_is_malformed() {
        let options = QdnOptions::default();
        let mut reader = RecordReader::open(top("Point<X=1,>"), "Point", 2, 0, &options).unwrap();
        reader.next_scalar().unwrap();
        assert!(matches!(
            reader.next_scalar(),
            Err(Error::MalformedBuffer { expected: '=', .. })
        ));
    }

    #[test]
    fn test_open_checks() {
        let options = QdnOptions::default();
        assert!(matches!(
            RecordReader::open(top("Point<X=1,>"), "Point", 0, 0, &options),
            Err(Error::EmptyShape(_))
        ));
        assert!(matches!(
            RecordReader::open(top("Point<X=1,>"), "Vector", 1, 0, &options),
            Err(Error::NameMismatch { .. })
        ));
        assert!(matches!(
            RecordReader::open(top("Point"), "Point", 1, 0, &options),
            Err(Error::MalformedBuffer { expected: '<', .. })
        ));
        let shallow = QdnOptions::new().with_max_depth(1);
        assert!(matches!(
            RecordReader::open(top("Point<X=1,>"), "Point", 1, 1, &shallow),
            Err(Error::DepthLimitExceeded { limit: 1 })
        ));
    }

    #[test]
    fn test_skip_field() {
        let options = QdnOptions::default();
        let mut reader =
            RecordReader::open(top("R<P<a=1,>,b=2,c=3,>"), "R", 3, 0, &options).unwrap();
        assert_eq!(reader.peek_kind().unwrap(), FieldKindHint::Record);
        reader.skip_field().unwrap();
        reader.skip_field().unwrap();
        assert_eq!(reader.next_scalar().unwrap(), "3");
    }
}
