//! Complex number scalar.
//!
//! QDN writes a complex number as a single scalar, `<real>;<imag>`, with both
//! halves formatted as 64-bit floats:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_qdn::{from_str, to_string, Complex};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Phasor { z: Complex }
//!
//! let phasor = Phasor { z: Complex::new(1.5, -2.25) };
//! let qdn = to_string(&phasor).unwrap();
//! assert_eq!(qdn, "Phasor<z=1.5;-2.25,>");
//! assert_eq!(from_str::<Phasor>(&qdn).unwrap(), phasor);
//! ```
//!
//! Through Serde the value travels as a newtype struct with a private marker
//! name wrapping its text form. The QDN serializer writes that text verbatim;
//! any other Serde format sees a plain string such as `"1.5;-2.25"`.

use crate::scalar::{format_f64, parse_complex};
use crate::Error;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Newtype name that marks a complex scalar inside the Serde data model.
pub(crate) const COMPLEX_TOKEN: &str = "$serde_qdn::private::Complex";

/// A complex number with 64-bit real and imaginary parts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", format_f64(self.re), format_f64(self.im))
    }
}

impl FromStr for Complex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complex(s)
    }
}

impl From<(f64, f64)> for Complex {
    fn from((re, im): (f64, f64)) -> Self {
        Complex::new(re, im)
    }
}

impl Serialize for Complex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_newtype_struct(COMPLEX_TOKEN, &self.to_string())
    }
}

impl<'de> Deserialize<'de> for Complex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ComplexVisitor;

        impl<'de> Visitor<'de> for ComplexVisitor {
            type Value = Complex;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a complex number written as `<real>;<imag>`")
            }

            fn visit_str<E>(self, value: &str) -> Result<Complex, E>
            where
                E: de::Error,
            {
                value.parse().map_err(E::custom)
            }

            fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Complex, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_str(self)
            }
        }

        deserializer.deserialize_newtype_struct(COMPLEX_TOKEN, ComplexVisitor)
    }
}
