//! QDN serialization.
//!
//! This module provides the [`Serializer`] implementation that converts Rust
//! structs into QDN buffers.
//!
//! ## Overview
//!
//! The serializer walks a struct's fields in declaration order:
//!
//! - **Scalar fields** are written as `name=value,`
//! - **Struct fields** are written as a nested record, `TypeName<...>,`, with no
//!   `name=` prefix: the field name does not appear in the buffer
//! - **Newtype structs** are transparent
//!
//! Only structs can be the top-level value. Options, sequences, maps and tuples
//! have no QDN form and are rejected with [`Error::UnsupportedType`].
//!
//! ## Usage
//!
//! ```rust
//! use serde_qdn::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { X: i32, Y: i32 }
//!
//! #[derive(Serialize)]
//! struct Line { start: Point, end: Point }
//!
//! let line = Line { start: Point { X: 1, Y: 2 }, end: Point { X: 3, Y: 4 } };
//! assert_eq!(to_string(&line).unwrap(), "Line<Point<X=1,Y=2,>,Point<X=3,Y=4,>,>");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_qdn::{QdnOptions, Serializer};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Tag { label: String }
//!
//! let mut serializer = Serializer::new(QdnOptions::new().with_quoted_strings(true));
//! Tag { label: "blue".to_string() }.serialize(&mut serializer).unwrap();
//! assert_eq!(serializer.into_inner(), r#"Tag<label="blue",>"#);
//! ```

use crate::complex::COMPLEX_TOKEN;
use crate::scalar::{encode_string, format_bool, format_f32, format_f64};
use crate::{write, Error, QdnOptions, Result};
use serde::ser::{self, Impossible, Serialize};

/// The QDN serializer.
///
/// Accepts a struct at the top level and writes it, and any nested structs, as
/// QDN records. Created via [`Serializer::new`].
pub struct Serializer {
    output: String,
    options: QdnOptions,
    depth: usize,
}

impl Serializer {
    pub fn new(options: QdnOptions) -> Self {
        Serializer {
            output: String::with_capacity(128),
            options,
            depth: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn begin_record(
        &mut self,
        name: &'static str,
        len: usize,
        nested: bool,
    ) -> Result<RecordSerializer<'_>> {
        if len == 0 {
            return Err(Error::empty_shape(name));
        }
        self.options.check_depth(self.depth)?;
        let start = self.output.len();
        let outer_depth = self.depth;
        write::begin_record(&mut self.output, name)?;
        self.depth += 1;
        tracing::trace!(record = name, depth = self.depth, "writing record");
        Ok(RecordSerializer {
            ser: self,
            nested,
            start,
            outer_depth,
        })
    }
}

// Every non-struct entry point of the top-level serializer is rejected the same way.
macro_rules! reject_top_level {
    ($($method:ident($ty:ty) => $what:literal,)*) => {
        $(
            fn $method(self, _v: $ty) -> Result<()> {
                Err(Error::not_a_record($what))
            }
        )*
    };
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = RecordSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    reject_top_level! {
        serialize_bool(bool) => "bool",
        serialize_i8(i8) => "i8",
        serialize_i16(i16) => "i16",
        serialize_i32(i32) => "i32",
        serialize_i64(i64) => "i64",
        serialize_u8(u8) => "u8",
        serialize_u16(u16) => "u16",
        serialize_u32(u32) => "u32",
        serialize_u64(u64) => "u64",
        serialize_f32(f32) => "f32",
        serialize_f64(f64) => "f64",
        serialize_char(char) => "char",
        serialize_str(&str) => "string",
        serialize_bytes(&[u8]) => "bytes",
        serialize_i128(i128) => "i128",
        serialize_u128(u128) => "u128",
    }

    fn serialize_none(self) -> Result<()> {
        Err(Error::not_a_record("option"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::not_a_record("option"))
    }

    fn serialize_unit(self) -> Result<()> {
        Err(Error::not_a_record("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<()> {
        Err(Error::empty_shape(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Err(Error::not_a_record("enum"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::not_a_record("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::not_a_record("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::not_a_record("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::not_a_record("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::not_a_record("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::not_a_record("map"))
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.begin_record(name, len, false)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::not_a_record("enum"))
    }
}

/// Writes the fields of one record.
///
/// If a field fails, the record's partial output is removed and the
/// serializer's depth is restored, so the [`Serializer`] is left as it was
/// before the record began.
pub struct RecordSerializer<'a> {
    ser: &'a mut Serializer,
    nested: bool,
    /// Length of the output before `NAME<` was written.
    start: usize,
    outer_depth: usize,
}

impl<'a> ser::SerializeStruct for RecordSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let result = value.serialize(FieldSerializer {
            ser: &mut *self.ser,
            key,
            raw: false,
        });
        if result.is_err() {
            self.ser.output.truncate(self.start);
            self.ser.depth = self.outer_depth;
        }
        result
    }

    fn end(self) -> Result<()> {
        write::end_record(&mut self.ser.output, self.nested);
        self.ser.depth = self.outer_depth;
        tracing::trace!(depth = self.ser.depth, "closed record");
        Ok(())
    }
}

/// Writes a single field value.
///
/// `raw` is set while writing the text of a [`Complex`](crate::Complex), which
/// must not be quoted like a string.
struct FieldSerializer<'a> {
    ser: &'a mut Serializer,
    key: &'static str,
    raw: bool,
}

impl<'a> FieldSerializer<'a> {
    fn emit(self, text: &str) -> Result<()> {
        write::write_scalar(&mut self.ser.output, self.key, text)
    }

    fn unsupported(&self, what: &str) -> Error {
        Error::unsupported_type(&format!("field `{}` is a {}", self.key, what))
    }
}

impl<'a> ser::Serializer for FieldSerializer<'a> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = RecordSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.emit(format_bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.emit(&v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.emit(&v.to_string())
    }

    fn serialize_i128(self, _v: i128) -> Result<()> {
        Err(self.unsupported("128-bit integer"))
    }

    fn serialize_u128(self, _v: u128) -> Result<()> {
        Err(self.unsupported("128-bit integer"))
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.emit(&format_f32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.emit(&format_f64(v))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.serialize_str(v.encode_utf8(&mut [0u8; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        if self.raw {
            return self.emit(v);
        }
        let text = encode_string(v, self.ser.options.quote_strings)?;
        self.emit(&text)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(self.unsupported("byte array"))
    }

    fn serialize_none(self) -> Result<()> {
        Err(self.unsupported("option"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(self.unsupported("option"))
    }

    fn serialize_unit(self) -> Result<()> {
        Err(self.unsupported("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<()> {
        Err(Error::empty_shape(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if name == COMPLEX_TOKEN {
            return value.serialize(FieldSerializer { raw: true, ..self });
        }
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(self.unsupported("data-carrying enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(self.unsupported("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(self.unsupported("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(self.unsupported("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(self.unsupported("data-carrying enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(self.unsupported("map"))
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.ser.begin_record(name, len, true)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(self.unsupported("data-carrying enum variant"))
    }
}
