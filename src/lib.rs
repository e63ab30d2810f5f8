//! # serde_qdn
//!
//! A Serde-compatible codec for QDN, a compact delimited text notation for
//! records and records nested inside records.
//!
//! ## What is QDN?
//!
//! QDN writes a record as its name followed by its fields between `<` and `>`:
//!
//! ```text
//! Point<X=3,Y=-7,>
//! Line<Point<X=1,Y=2,>,Point<X=3,Y=4,>,>
//! ```
//!
//! It is meant for small configuration-like or message-like records where a
//! human should be able to read the bytes, without the weight of a schema.
//!
//! ## Key Features
//!
//! - **Serde Compatible**: works with `#[derive(Serialize, Deserialize)]` structs
//! - **Positional**: fields are matched by declaration order; names in the
//!   buffer are documentation
//! - **Exact floats**: floats are written with the fewest digits that read back
//!   to the same bits
//! - **Dynamic records**: [`Record`] and [`Shape`] for data without a Rust type
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_qdn::{from_str, to_string};
//!
//! #[allow(non_snake_case)]
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Point {
//!     X: i32,
//!     Y: i32,
//! }
//!
//! let point = Point { X: 3, Y: -7 };
//!
//! let qdn = to_string(&point).unwrap();
//! assert_eq!(qdn, "Point<X=3,Y=-7,>");
//!
//! let point_back: Point = from_str(&qdn).unwrap();
//! assert_eq!(point, point_back);
//! ```
//!
//! ### Dynamic Records
//!
//! ```rust
//! use serde_qdn::{decode_record, encode_record, shape, Record};
//!
//! let mut point = Record::new("Point");
//! point.insert("X", 1i32).insert("Y", 2i32);
//!
//! let buffer = encode_record(&point).unwrap();
//! let back = decode_record(&buffer, &shape!(Point { X: I32, Y: I32 })).unwrap();
//! assert_eq!(back, point);
//! ```
//!
//! ## Limits
//!
//! QDN has no escaping. Names and string values containing `<`, `>`, `,`, `=`
//! (or `"` in strings) are rejected at encode time. Options, sequences and maps
//! have no QDN form. See [`grammar`] for the full notation.

pub mod complex;
pub mod de;
pub mod error;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod options;
pub mod pretty;
mod read;
pub mod scalar;
pub mod scan;
pub mod ser;
pub mod shape;
pub mod value;
mod write;

pub use complex::Complex;
pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::FieldMap;
pub use options::QdnOptions;
pub use pretty::format;
pub use scalar::{Scalar, ScalarKind};
pub use ser::Serializer;
pub use shape::{FieldKind, FieldShape, Shape};
pub use value::{
    decode_record, decode_record_with_options, encode_record, encode_record_with_options,
    Record, Value,
};

use serde::{Deserialize, Serialize};
use std::io;

/// Serialize a struct to a QDN string.
///
/// # Examples
///
/// ```rust
/// use serde_qdn::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Flags { verbose: bool, level: u8 }
///
/// let qdn = to_string(&Flags { verbose: true, level: 3 }).unwrap();
/// assert_eq!(qdn, "Flags<verbose=true,level=3,>");
/// ```
///
/// # Errors
///
/// Returns an error if the value is not a struct, has no fields, holds a type
/// QDN cannot represent, or contains reserved bytes.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, QdnOptions::default())
}

/// Serialize a struct to QDN bytes.
///
/// # Errors
///
/// Same as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

/// Serialize a struct and lay it out for reading with [`format`].
///
/// The result is for humans only: it cannot be decoded.
///
/// # Examples
///
/// ```rust
/// use serde_qdn::to_string_pretty;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let pretty = to_string_pretty(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(pretty, "Point\n<\n\tx=1,\n\ty=2,\n>");
/// ```
///
/// # Errors
///
/// Same as [`to_string`], plus [`Error::AlreadyFormatted`] if a string value
/// contains a newline or a tab.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let compact = to_string(value)?;
    let pretty = format(compact.as_bytes())?;
    String::from_utf8(pretty).map_err(Error::custom)
}

/// Serialize a struct to a QDN string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_qdn::{to_string_with_options, QdnOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let options = QdnOptions::new().with_quoted_strings(true);
/// let qdn = to_string_with_options(&User { name: "Ada".into() }, options).unwrap();
/// assert_eq!(qdn, r#"User<name="Ada",>"#);
/// ```
///
/// # Errors
///
/// Same as [`to_string`], plus [`Error::DepthLimitExceeded`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: QdnOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serialize a struct to a writer in QDN format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let qdn = to_string(value)?;
    writer
        .write_all(qdn.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize a struct from a string of QDN text.
///
/// # Examples
///
/// ```rust
/// use serde_qdn::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("Point<x=1,y=2,>").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the target is not a struct, the struct's name is not in
/// the buffer, a delimiter is missing, or a value does not parse as its field type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    from_str_with_options(s, QdnOptions::default())
}

/// Deserialize a struct from QDN text with custom options.
///
/// # Errors
///
/// Same as [`from_str`], plus [`Error::DepthLimitExceeded`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<'a, T>(s: &'a str, options: QdnOptions) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::with_options(s, options);
    T::deserialize(&mut deserializer)
}

/// Deserialize a struct from an I/O stream of QDN.
///
/// # Errors
///
/// Returns an error if reading fails or the data cannot be decoded as `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize a struct from QDN bytes.
///
/// # Examples
///
/// ```rust
/// use serde_qdn::from_slice;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_slice(b"Point<x=1,y=2,>").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or cannot be decoded as `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
