//! Output helpers shared by the Serde [`Serializer`](crate::Serializer) and the
//! dynamic [`encode_record`](crate::encode_record).
//!
//! Every field is followed by a separator, including the last one, so a
//! record always ends in `,>`.

use crate::scalar::find_reserved;
use crate::scan::{ASSIGN, CLOSE, OPEN, SEPARATOR};
use crate::{Error, Result};

/// Rejects names that contain a structural byte.
fn check_name(name: &str, what: &str) -> Result<()> {
    match find_reserved(name) {
        Some(byte) => Err(Error::reserved_byte(&format!("{} `{}`", what, name), byte)),
        None => Ok(()),
    }
}

/// Writes `NAME<`.
pub(crate) fn begin_record(out: &mut String, name: &str) -> Result<()> {
    check_name(name, "record name")?;
    out.push_str(name);
    out.push(char::from(OPEN));
    Ok(())
}

/// Writes `NAME=text,`. The text must already be encoded.
pub(crate) fn write_scalar(out: &mut String, name: &str, text: &str) -> Result<()> {
    check_name(name, "field name")?;
    if let Some(byte) = find_reserved(text) {
        return Err(Error::reserved_byte(
            &format!("value of field `{}`", name),
            byte,
        ));
    }
    out.push_str(name);
    out.push(char::from(ASSIGN));
    out.push_str(text);
    out.push(char::from(SEPARATOR));
    Ok(())
}

/// Writes `>`, plus the separator that follows a nested record in its parent.
pub(crate) fn end_record(out: &mut String, nested: bool) {
    out.push(char::from(CLOSE));
    if nested {
        out.push(char::from(SEPARATOR));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_trailing_separators() {
        let mut out = String::new();
        begin_record(&mut out, "Line").unwrap();
        begin_record(&mut out, "Point").unwrap();
        write_scalar(&mut out, "X", "1").unwrap();
        end_record(&mut out, true);
        write_scalar(&mut out, "w", "2").unwrap();
        end_record(&mut out, false);
        assert_eq!(out, "Line<Point<X=1,>,w=2,>");
    }

    #[test]
    fn test_rejects_reserved_names() {
        let mut out = String::new();
        assert!(matches!(
            begin_record(&mut out, "Bad<Name"),
            Err(Error::ReservedByte { byte: '<', .. })
        ));
        assert!(matches!(
            write_scalar(&mut out, "a=b", "1"),
            Err(Error::ReservedByte { byte: '=', .. })
        ));
        assert!(matches!(
            write_scalar(&mut out, "a", "1,2"),
            Err(Error::ReservedByte { byte: ',', .. })
        ));
    }
}
