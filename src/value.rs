//! Dynamic records.
//!
//! [`Record`] and [`Value`] represent QDN data without a Rust struct behind it.
//! Encoding needs only the value; decoding needs a [`Shape`] because QDN text
//! does not say which type a scalar has.
//!
//! ## Usage Patterns
//!
//! ```rust
//! use serde_qdn::{decode_record, encode_record, Record, Value};
//!
//! let mut point = Record::new("Point");
//! point.insert("X", 3i32);
//! point.insert("Y", -7i32);
//!
//! let buffer = encode_record(&point).unwrap();
//! assert_eq!(buffer, b"Point<X=3,Y=-7,>");
//!
//! let back = decode_record(&buffer, &point.shape()).unwrap();
//! assert_eq!(back, point);
//! assert_eq!(back.get("Y").and_then(Value::as_i64), Some(-7));
//! ```

use crate::read::{RecordReader, Span};
use crate::shape::{FieldKind, Shape};
use crate::{write, Complex, FieldMap, QdnOptions, Result, Scalar};

/// A named, ordered collection of fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub name: String,
    pub fields: FieldMap,
}

/// A field value: a scalar or a nested record.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Record(Record),
}

impl Record {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: name.into(),
            fields: FieldMap::new(),
        }
    }

    /// Appends a field, or replaces an existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Builds the shape this record encodes with.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.fields
            .iter()
            .fold(Shape::new(self.name.as_str()), |shape, (name, value)| match value {
                Value::Scalar(scalar) => shape.with_scalar(name.as_str(), scalar.kind()),
                Value::Record(record) => shape.with_record(name.as_str(), record.shape()),
            })
    }
}

impl Value {
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            Value::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            Value::Scalar(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns any signed or unsigned integer that fits in an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Scalar(Scalar::I8(n)) => Some(i64::from(*n)),
            Value::Scalar(Scalar::I16(n)) => Some(i64::from(*n)),
            Value::Scalar(Scalar::I32(n)) => Some(i64::from(*n)),
            Value::Scalar(Scalar::I64(n)) => Some(*n),
            Value::Scalar(Scalar::U8(n)) => Some(i64::from(*n)),
            Value::Scalar(Scalar::U16(n)) => Some(i64::from(*n)),
            Value::Scalar(Scalar::U32(n)) => Some(i64::from(*n)),
            Value::Scalar(Scalar::U64(n)) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Scalar(Scalar::F32(n)) => Some(f64::from(*n)),
            Value::Scalar(Scalar::F64(n)) => Some(*n),
            _ => None,
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Complex, String, &str);

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

/// Encodes a dynamic record with default options.
///
/// # Errors
///
/// Fails on records without fields, reserved bytes in names or strings, and
/// nesting beyond the default depth limit.
pub fn encode_record(record: &Record) -> Result<Vec<u8>> {
    encode_record_with_options(record, &QdnOptions::default())
}

/// Encodes a dynamic record with custom options.
pub fn encode_record_with_options(record: &Record, options: &QdnOptions) -> Result<Vec<u8>> {
    let mut out = String::with_capacity(128);
    write_record(&mut out, record, false, 0, options)?;
    Ok(out.into_bytes())
}

fn write_record(
    out: &mut String,
    record: &Record,
    nested: bool,
    depth: usize,
    options: &QdnOptions,
) -> Result<()> {
    if record.fields.is_empty() {
        return Err(crate::Error::empty_shape(&record.name));
    }
    options.check_depth(depth)?;

    write::begin_record(out, &record.name)?;
    for (name, value) in &record.fields {
        match value {
            Value::Scalar(scalar) => {
                write::write_scalar(out, name, &scalar.encode(options.quote_strings)?)?
            }
            Value::Record(inner) => write_record(out, inner, true, depth + 1, options)?,
        }
    }
    write::end_record(out, nested);
    Ok(())
}

/// Decodes a buffer against a shape with default options.
///
/// Returns a new record only if every field decoded; nothing partial is exposed.
///
/// # Errors
///
/// Fails if the shape has no fields or declares a field name twice, the
/// shape's name is not in the buffer, a delimiter is missing, or a scalar does
/// not parse as its declared kind.
pub fn decode_record(input: &[u8], shape: &Shape) -> Result<Record> {
    decode_record_with_options(input, shape, &QdnOptions::default())
}

/// Decodes a buffer against a shape with custom options.
pub fn decode_record_with_options(
    input: &[u8],
    shape: &Shape,
    options: &QdnOptions,
) -> Result<Record> {
    let text = std::str::from_utf8(input).map_err(crate::Error::custom)?;
    read_record(Span { text, base: 0 }, shape, 0, options)
}

fn read_record(span: Span<'_>, shape: &Shape, depth: usize, options: &QdnOptions) -> Result<Record> {
    if let Some(field) = shape.duplicate_field() {
        return Err(crate::Error::duplicate_field(shape.name(), field));
    }
    let mut reader = RecordReader::open(span, shape.name(), shape.fields().len(), depth, options)?;
    let mut record = Record {
        name: shape.name().to_string(),
        fields: FieldMap::with_capacity(shape.fields().len()),
    };

    for field in shape.fields() {
        let value = match &field.kind {
            FieldKind::Scalar(kind) => Value::Scalar(Scalar::decode(reader.next_scalar()?, *kind)?),
            FieldKind::Record(inner) => {
                Value::Record(read_record(reader.next_record()?, inner, depth + 1, options)?)
            }
        };
        record.fields.insert(field.name.clone(), value);
    }
    Ok(record)
}
