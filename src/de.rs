//! QDN deserialization.
//!
//! This module provides the [`Deserializer`] implementation that reads QDN
//! buffers into Rust structs.
//!
//! ## Overview
//!
//! - **Positional matching**: fields are read in the target struct's
//!   declaration order; the names in the buffer are not looked up
//! - **Sub-buffers for nesting**: a struct field is carved out of the parent
//!   buffer at its matching `>` and decoded recursively
//! - **Trailing bytes are ignored**: decoding stops after the last declared field
//!
//! ## Usage
//!
//! ```rust
//! use serde_qdn::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! // Field names in the buffer are documentation only.
//! let point: Point = from_str("Point<a=3,b=-7,>").unwrap();
//! assert_eq!(point, Point { x: 3, y: -7 });
//! ```

use crate::complex::COMPLEX_TOKEN;
use crate::read::{FieldKindHint, RecordReader, Span};
use crate::scalar::{self, ScalarKind};
use crate::{Error, QdnOptions, Result};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// The QDN deserializer.
///
/// Reads one record from a buffer into a Rust struct. Created via
/// [`Deserializer::from_str`] or [`Deserializer::with_options`].
pub struct Deserializer<'de> {
    span: Span<'de>,
    depth: usize,
    options: QdnOptions,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, QdnOptions::default())
    }

    pub fn with_options(input: &'de str, options: QdnOptions) -> Self {
        Deserializer {
            span: Span {
                text: input,
                base: 0,
            },
            depth: 0,
            options,
        }
    }

    fn nested(span: Span<'de>, depth: usize, options: QdnOptions) -> Self {
        Deserializer {
            span,
            depth,
            options,
        }
    }
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::not_a_record(
            "decode target must be a struct with named fields",
        ))
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::empty_shape(name))
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let reader = RecordReader::open(self.span, name, fields.len(), self.depth, &self.options)?;
        visitor.visit_seq(RecordAccess {
            reader,
            remaining: fields.len(),
        })
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit seq tuple tuple_struct map enum
        identifier ignored_any
    }
}

/// Hands out the fields of one record, in order, as a sequence.
struct RecordAccess<'de> {
    reader: RecordReader<'de>,
    remaining: usize,
}

impl<'de> de::SeqAccess<'de> for RecordAccess<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(FieldDeserializer {
            reader: &mut self.reader,
        })
        .map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

/// Reads a single field value at the reader's cursor.
struct FieldDeserializer<'a, 'de> {
    reader: &'a mut RecordReader<'de>,
}

impl<'a, 'de> FieldDeserializer<'a, 'de> {
    fn unsupported(what: &str) -> Error {
        Error::unsupported_type(&format!("cannot decode a {} field", what))
    }
}

macro_rules! deserialize_signed {
    ($($method:ident => $visit:ident, $ty:ty, $kind:ident;)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let text = self.reader.next_scalar()?;
                visitor.$visit(scalar::parse_signed::<$ty>(text, ScalarKind::$kind)?)
            }
        )*
    };
}

macro_rules! deserialize_unsigned {
    ($($method:ident => $visit:ident, $ty:ty, $kind:ident;)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let text = self.reader.next_scalar()?;
                visitor.$visit(scalar::parse_unsigned::<$ty>(text, ScalarKind::$kind)?)
            }
        )*
    };
}

impl<'a, 'de> de::Deserializer<'de> for FieldDeserializer<'a, 'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // Without a declared type, a scalar can only be handed over as text.
        match self.reader.peek_kind()? {
            FieldKindHint::Scalar => self.deserialize_str(visitor),
            FieldKindHint::Record => Err(Self::unsupported("self-describing record")),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(scalar::parse_bool(self.reader.next_scalar()?)?)
    }

    deserialize_signed! {
        deserialize_i8 => visit_i8, i8, I8;
        deserialize_i16 => visit_i16, i16, I16;
        deserialize_i32 => visit_i32, i32, I32;
        deserialize_i64 => visit_i64, i64, I64;
    }

    deserialize_unsigned! {
        deserialize_u8 => visit_u8, u8, U8;
        deserialize_u16 => visit_u16, u16, U16;
        deserialize_u32 => visit_u32, u32, U32;
        deserialize_u64 => visit_u64, u64, U64;
    }

    fn deserialize_i128<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Self::unsupported("128-bit integer"))
    }

    fn deserialize_u128<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Self::unsupported("128-bit integer"))
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f32(scalar::parse_f32(self.reader.next_scalar()?)?)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f64(scalar::parse_f64(self.reader.next_scalar()?)?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = scalar::decode_string(self.reader.next_scalar()?);
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => visitor.visit_char(ch),
            _ => Err(Error::conversion(
                text,
                ScalarKind::String,
                "expected a single character",
            )),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(scalar::decode_string(self.reader.next_scalar()?))
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Self::unsupported("byte array"))
    }

    fn deserialize_byte_buf<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Self::unsupported("byte array"))
    }

    fn deserialize_option<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Self::unsupported("option"))
    }

    fn deserialize_unit<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Self::unsupported("unit"))
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::empty_shape(name))
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if name == COMPLEX_TOKEN {
            // Validate here so a bad value surfaces as a conversion error.
            let complex = scalar::parse_complex(self.reader.next_scalar()?)?;
            let text: de::value::StringDeserializer<Error> =
                complex.to_string().into_deserializer();
            return visitor.visit_newtype_struct(text);
        }
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Self::unsupported("sequence"))
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Self::unsupported("tuple"))
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Self::unsupported("tuple struct"))
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Self::unsupported("map"))
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let span = self.reader.next_record()?;
        let mut nested = Deserializer::nested(
            span,
            self.reader.depth() + 1,
            self.reader.options().clone(),
        );
        de::Deserializer::deserialize_struct(&mut nested, name, fields, visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let variant = scalar::decode_string(self.reader.next_scalar()?);
        let access: de::value::BorrowedStrDeserializer<'de, Error> =
            de::value::BorrowedStrDeserializer::new(variant);
        visitor.visit_enum(access)
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.reader.skip_field()?;
        visitor.visit_unit()
    }
}
