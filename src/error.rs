//! Error types for QDN encoding and decoding.
//!
//! Every failure is reported at the point where it is detected and returned to
//! the direct caller. Nothing is retried and nothing is recovered: a failure in
//! a nested record surfaces unchanged at the top-level call.
//!
//! ## Error Categories
//!
//! - **Shape errors**: the value or target is not a record, or has no fields
//! - **Buffer errors**: a delimiter is missing, or the record name is absent
//! - **Conversion errors**: scalar text does not parse as its declared type
//! - **Input validation**: names or values contain reserved delimiter bytes
//! - **Limits**: nesting deeper than [`QdnOptions::max_depth`](crate::QdnOptions)
//!
//! ## Examples
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_qdn::{from_str, Error};
//!
//! #[derive(Deserialize, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let result: Result<Point, Error> = from_str("Point<x=3,y=seven,>");
//! assert!(matches!(result, Err(Error::Conversion { .. })));
//! ```

use crate::scalar::ScalarKind;
use std::fmt;
use thiserror::Error;

/// All errors that can occur while encoding, decoding or formatting QDN.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The value handed to the encoder, or the decode target, is not a record.
    #[error("Not a record: {0}")]
    NotARecord(String),

    /// A record shape declares zero fields.
    #[error("Record `{0}` does not declare any fields")]
    EmptyShape(String),

    /// The decode target's record name does not occur in the buffer.
    #[error("Name mismatch: buffer does not contain record name `{name}`")]
    NameMismatch { name: String },

    /// Scalar text does not parse into the declared primitive type.
    #[error("Conversion error: cannot read {text:?} as {kind}: {reason}")]
    Conversion {
        text: String,
        kind: ScalarKind,
        reason: String,
    },

    /// An expected delimiter was not found.
    #[error("Malformed buffer at byte {offset}: expected `{expected}`")]
    MalformedBuffer { offset: usize, expected: char },

    /// The pretty-printer was given a buffer that already contains layout bytes.
    #[error("Buffer is already formatted")]
    AlreadyFormatted,

    /// A name or value contains a byte the format reserves for structure.
    #[error("Reserved byte {byte:?} in {context}")]
    ReservedByte { context: String, byte: char },

    /// Records are nested deeper than the configured limit.
    #[error("Record nesting exceeds the limit of {limit} levels")]
    DepthLimitExceeded { limit: usize },

    /// A shape declares two fields with the same name.
    #[error("Record `{record}` declares field `{field}` more than once")]
    DuplicateField { record: String, field: String },

    /// A field type that has no QDN representation.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a not-a-record error naming what was found instead.
    pub fn not_a_record(found: &str) -> Self {
        Error::NotARecord(found.to_string())
    }

    /// Creates an empty-shape error for the record `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_qdn::Error;
    ///
    /// let err = Error::empty_shape("Unit");
    /// assert!(err.to_string().contains("`Unit`"));
    /// ```
    pub fn empty_shape(name: &str) -> Self {
        Error::EmptyShape(name.to_string())
    }

    pub fn name_mismatch(name: &str) -> Self {
        Error::NameMismatch {
            name: name.to_string(),
        }
    }

    /// Creates a conversion error carrying the offending text and its type tag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_qdn::{Error, ScalarKind};
    ///
    /// let err = Error::conversion("abc", ScalarKind::I32, "invalid digit found in string");
    /// assert!(err.to_string().contains("int32"));
    /// ```
    pub fn conversion<R: fmt::Display>(text: &str, kind: ScalarKind, reason: R) -> Self {
        Error::Conversion {
            text: text.to_string(),
            kind,
            reason: reason.to_string(),
        }
    }

    /// Creates a malformed-buffer error at an absolute byte offset.
    pub fn malformed(offset: usize, expected: char) -> Self {
        Error::MalformedBuffer { offset, expected }
    }

    pub fn reserved_byte(context: &str, byte: char) -> Self {
        Error::ReservedByte {
            context: context.to_string(),
            byte,
        }
    }

    pub fn depth_limit(limit: usize) -> Self {
        Error::DepthLimitExceeded { limit }
    }

    pub fn duplicate_field(record: &str, field: &str) -> Self {
        Error::DuplicateField {
            record: record.to_string(),
            field: field.to_string(),
        }
    }

    /// Creates an unsupported type error for types that cannot be written as QDN.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
