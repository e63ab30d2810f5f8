//! The QDN notation, as implemented by this library.
//!
//! # Overview
//!
//! A QDN buffer holds exactly one record. Structure is carried by four
//! single-byte delimiters and nothing else: there is no whitespace handling,
//! no escaping and no type information in the text.
//!
//! | Byte | Role |
//! |------|------|
//! | `<` | opens a record's field list |
//! | `>` | closes a record's field list |
//! | `,` | ends a field |
//! | `=` | separates a scalar field's name from its value |
//!
//! # Grammar
//!
//! ```text
//! record       := NAME "<" field-list ">"
//! field-list   := field ("," field)* [","]
//! field        := scalar-field | nested-field
//! scalar-field := NAME "=" scalar-value
//! nested-field := record
//! scalar-value := string | number | bool | complex
//! complex      := float ";" float
//! ```
//!
//! The encoder always writes a `,` after every field, the last one included,
//! so records end in `,>`. The decoder accepts the separator or its absence.
//!
//! A nested field carries no `NAME=` prefix: it is written as the nested
//! record itself, named after its type. In
//!
//! ```text
//! Line<Point<X=1,Y=2,>,Point<X=3,Y=4,>,>
//! ```
//!
//! the `start` and `end` field names of `Line` do not appear at all.
//!
//! # Matching Fields
//!
//! Fields are matched by position. The decoder reads the n-th field of the
//! buffer into the n-th declared field of the target and never looks at the
//! names in between, so a buffer and a target must agree on field count, order
//! and kind (scalar or nested):
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_qdn::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Size { width: u32, height: u32 }
//!
//! let size: Size = from_str("Size<w=640,h=480,>").unwrap();
//! assert_eq!(size, Size { width: 640, height: 480 });
//! ```
//!
//! The one name that is checked is the target record's own: it must occur
//! somewhere in the buffer.
//!
//! # Nested Boundaries
//!
//! A nested record ends at the `>` that returns the nesting count, started at
//! one on its `<`, to zero. See [`scan::resolve_end`](crate::scan::resolve_end).
//!
//! # Scalars
//!
//! | Type | Text | Example |
//! |------|------|---------|
//! | String | raw, or wrapped in `"` | `name=Alice`, `name="Alice"` |
//! | Integers | base 10 | `n=-42` |
//! | Floats | shortest exact decimal, no exponent | `f=0.1` |
//! | Bool | `true` / `false` (also `1 t T TRUE True` and `0 f F FALSE False` on read) | `on=true` |
//! | Complex | real and imaginary part separated by `;` | `z=1.5;-2.25` |
//!
//! # Reserved Bytes
//!
//! Names and values must not contain `<`, `>`, `,` or `=`. String values must
//! also not contain `"`. The encoder rejects such input with
//! [`Error::ReservedByte`](crate::Error::ReservedByte) instead of writing a
//! buffer that would decode differently.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_qdn::{to_string, Error};
//!
//! #[derive(Serialize)]
//! struct Note { text: String }
//!
//! let result = to_string(&Note { text: "a,b".to_string() });
//! assert!(matches!(result, Err(Error::ReservedByte { .. })));
//! ```
//!
//! # Layout
//!
//! [`format`](crate::format) re-lays out a buffer with newlines and tabs for
//! reading. That output is not QDN: it cannot be decoded or formatted again.
