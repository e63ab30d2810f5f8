//! Primitive value codec.
//!
//! Converts a single scalar to its QDN text and back, driven by a [`ScalarKind`]
//! type tag. This is the leaf of the codec: it knows nothing about records or
//! delimiters other than the bytes a value may not contain.
//!
//! | Kind | Text | Example |
//! |------|------|---------|
//! | String | raw characters, optionally `"quoted"` | `name=Alice` |
//! | Signed integers | base 10 | `x=-7` |
//! | Unsigned integers | base 10, no sign | `port=8080` |
//! | Floats | shortest text that reads back to the same bits | `ratio=0.1` |
//! | Bool | `true` / `false` | `on=true` |
//! | Complex | `<real>;<imag>` | `z=1.5;-2.25` |
//!
//! ```rust
//! use serde_qdn::{Scalar, ScalarKind};
//!
//! let text = Scalar::F64(0.1).encode(false).unwrap();
//! assert_eq!(text, "0.1");
//! assert_eq!(Scalar::decode(&text, ScalarKind::F64).unwrap(), Scalar::F64(0.1));
//! ```

use crate::complex::Complex;
use crate::scan::{ASSIGN, CLOSE, OPEN, QUOTE, SEPARATOR};
use crate::{Error, Result};
use std::fmt;

/// Type tag of a scalar field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Complex,
}

impl ScalarKind {
    /// Human readable name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "int8",
            ScalarKind::I16 => "int16",
            ScalarKind::I32 => "int32",
            ScalarKind::I64 => "int64",
            ScalarKind::U8 => "uint8",
            ScalarKind::U16 => "uint16",
            ScalarKind::U32 => "uint32",
            ScalarKind::U64 => "uint64",
            ScalarKind::F32 => "float32",
            ScalarKind::F64 => "float64",
            ScalarKind::Complex => "complex",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single typed scalar value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    String(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Complex(Complex),
}

impl Scalar {
    /// Returns the type tag of this value.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::I8(_) => ScalarKind::I8,
            Scalar::I16(_) => ScalarKind::I16,
            Scalar::I32(_) => ScalarKind::I32,
            Scalar::I64(_) => ScalarKind::I64,
            Scalar::U8(_) => ScalarKind::U8,
            Scalar::U16(_) => ScalarKind::U16,
            Scalar::U32(_) => ScalarKind::U32,
            Scalar::U64(_) => ScalarKind::U64,
            Scalar::F32(_) => ScalarKind::F32,
            Scalar::F64(_) => ScalarKind::F64,
            Scalar::Complex(_) => ScalarKind::Complex,
        }
    }

    /// Encodes this value as QDN text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedByte`] if a string contains a delimiter or a quote.
    pub fn encode(&self, quote_strings: bool) -> Result<String> {
        Ok(match self {
            Scalar::String(s) => encode_string(s, quote_strings)?,
            Scalar::Bool(b) => format_bool(*b).to_string(),
            Scalar::I8(n) => n.to_string(),
            Scalar::I16(n) => n.to_string(),
            Scalar::I32(n) => n.to_string(),
            Scalar::I64(n) => n.to_string(),
            Scalar::U8(n) => n.to_string(),
            Scalar::U16(n) => n.to_string(),
            Scalar::U32(n) => n.to_string(),
            Scalar::U64(n) => n.to_string(),
            Scalar::F32(n) => format_f32(*n),
            Scalar::F64(n) => format_f64(*n),
            Scalar::Complex(c) => c.to_string(),
        })
    }

    /// Decodes QDN text as a value of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] if the text does not parse as `kind`.
    pub fn decode(text: &str, kind: ScalarKind) -> Result<Scalar> {
        Ok(match kind {
            ScalarKind::String => Scalar::String(decode_string(text).to_string()),
            ScalarKind::Bool => Scalar::Bool(parse_bool(text)?),
            ScalarKind::I8 => Scalar::I8(parse_signed(text, kind)?),
            ScalarKind::I16 => Scalar::I16(parse_signed(text, kind)?),
            ScalarKind::I32 => Scalar::I32(parse_signed(text, kind)?),
            ScalarKind::I64 => Scalar::I64(parse_signed(text, kind)?),
            ScalarKind::U8 => Scalar::U8(parse_unsigned(text, kind)?),
            ScalarKind::U16 => Scalar::U16(parse_unsigned(text, kind)?),
            ScalarKind::U32 => Scalar::U32(parse_unsigned(text, kind)?),
            ScalarKind::U64 => Scalar::U64(parse_unsigned(text, kind)?),
            ScalarKind::F32 => Scalar::F32(parse_f32(text)?),
            ScalarKind::F64 => Scalar::F64(parse_f64(text)?),
            ScalarKind::Complex => Scalar::Complex(parse_complex(text)?),
        })
    }
}

/// Returns the first byte of `text` that QDN reserves for structure.
#[inline]
pub(crate) fn find_reserved(text: &str) -> Option<char> {
    text.bytes()
        .find(|b| matches!(*b, OPEN | CLOSE | SEPARATOR | ASSIGN))
        .map(char::from)
}

/// Encodes a string value, optionally wrapped in double quotes.
///
/// There is no escaping: strings holding `<`, `>`, `,`, `=` or `"` are rejected.
pub fn encode_string(s: &str, quote: bool) -> Result<String> {
    if let Some(byte) = find_reserved(s) {
        return Err(Error::reserved_byte(&format!("string {:?}", s), byte));
    }
    if s.as_bytes().contains(&QUOTE) {
        return Err(Error::reserved_byte(&format!("string {:?}", s), '"'));
    }

    if quote {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('"');
        out.push_str(s);
        out.push('"');
        Ok(out)
    } else {
        Ok(s.to_string())
    }
}

/// Strips one pair of surrounding double quotes, if present.
#[inline]
pub fn decode_string(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
}

#[inline]
pub const fn format_bool(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

/// Parses the boolean literals `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(text: &str) -> Result<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(Error::conversion(
            text,
            ScalarKind::Bool,
            "not a boolean literal",
        )),
    }
}

/// Parses a base 10 signed integer and narrows it to the declared width.
pub fn parse_signed<T>(text: &str, kind: ScalarKind) -> Result<T>
where
    T: TryFrom<i64>,
{
    let wide: i64 = text
        .parse()
        .map_err(|e| Error::conversion(text, kind, e))?;
    T::try_from(wide).map_err(|_| Error::conversion(text, kind, "out of range"))
}

/// Parses a base 10 unsigned integer and narrows it to the declared width.
pub fn parse_unsigned<T>(text: &str, kind: ScalarKind) -> Result<T>
where
    T: TryFrom<u64>,
{
    let wide: u64 = text
        .parse()
        .map_err(|e| Error::conversion(text, kind, e))?;
    T::try_from(wide).map_err(|_| Error::conversion(text, kind, "out of range"))
}

// `Display` for floats prints the shortest digits that read back to the same
// bits and never switches to exponent form.
#[inline]
pub fn format_f32(v: f32) -> String {
    v.to_string()
}

#[inline]
pub fn format_f64(v: f64) -> String {
    v.to_string()
}

pub fn parse_f32(text: &str) -> Result<f32> {
    text.parse()
        .map_err(|e| Error::conversion(text, ScalarKind::F32, e))
}

pub fn parse_f64(text: &str) -> Result<f64> {
    text.parse()
        .map_err(|e| Error::conversion(text, ScalarKind::F64, e))
}

/// Parses `<real>;<imag>`, splitting on the first `;`.
pub fn parse_complex(text: &str) -> Result<Complex> {
    let (re, im) = text.split_once(';').ok_or_else(|| {
        Error::conversion(text, ScalarKind::Complex, "missing `;` between parts")
    })?;
    let re: f64 = re
        .parse()
        .map_err(|e| Error::conversion(text, ScalarKind::Complex, e))?;
    let im: f64 = im
        .parse()
        .map_err(|e| Error::conversion(text, ScalarKind::Complex, e))?;
    Ok(Complex::new(re, im))
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value)
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Complex => Complex,
    String => String,
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}
