//! Typed extraction from a single slot.
//!
//! Numeric coercion mirrors a narrowing cast: floating-point sources are
//! truncated toward zero into a 64-bit integer, which is then wrapped into the
//! target width. Integer sources wrap directly.

#![allow(missing_docs)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use crate::args::value::{ErrorValue, Value, ValueKind};
use crate::core::errors::{Result, UnderstudyError};

/// Handle to one slot of a container; may be absent.
#[derive(Debug, Clone, Copy)]
pub struct Arg<'a> {
    value: Option<&'a Value>,
}

/// Intermediate numeric form shared by every width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Numeric {
    Int(i64),
    Uint(u64),
    Float(f64),
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

impl Numeric {
    pub(crate) fn from_value(value: Option<&Value>) -> Result<Self> {
        let Some(value) = value else {
            return Err(UnderstudyError::NotNumeric {
                found: ValueKind::Absent,
            });
        };
        Ok(match value {
            Value::Bool(v) => Self::Int(i64::from(*v)),
            Value::I8(v) => Self::Int(i64::from(*v)),
            Value::I16(v) => Self::Int(i64::from(*v)),
            Value::I32(v) => Self::Int(i64::from(*v)),
            Value::I64(v) => Self::Int(*v),
            Value::Isize(v) => Self::Int(*v as i64),
            Value::U8(v) => Self::Uint(u64::from(*v)),
            Value::U16(v) => Self::Uint(u64::from(*v)),
            Value::U32(v) => Self::Uint(u64::from(*v)),
            Value::U64(v) => Self::Uint(*v),
            Value::Usize(v) => Self::Uint(*v as u64),
            Value::F32(v) => Self::Float(f64::from(*v)),
            Value::F64(v) => Self::Float(*v),
            Value::Str(text) => parse_numeric(text).ok_or(UnderstudyError::NotNumeric {
                found: ValueKind::Str,
            })?,
            other => {
                return Err(UnderstudyError::NotNumeric {
                    found: other.kind(),
                });
            }
        })
    }

    /// Bit pattern of the value as a 64-bit two's-complement integer.
    pub(crate) fn to_bits(self) -> u64 {
        match self {
            Self::Int(v) => v as u64,
            Self::Uint(v) => v,
            Self::Float(v) if v >= TWO_POW_63 => v as u64,
            Self::Float(v) => (v as i64) as u64,
        }
    }

    pub(crate) fn to_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Uint(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

fn parse_numeric(text: &str) -> Option<Numeric> {
    let text = text.trim();
    if let Ok(v) = text.parse::<i64>() {
        return Some(Numeric::Int(v));
    }
    if let Ok(v) = text.parse::<u64>() {
        return Some(Numeric::Uint(v));
    }
    text.parse::<f64>().ok().map(Numeric::Float)
}

macro_rules! wrapping_accessor {
    ($($name:ident => $ty:ty),+ $(,)?) => {
        $(
            #[doc = concat!("Coerce to `", stringify!($ty), "`, wrapping out-of-range values.")]
            pub fn $name(&self) -> Result<$ty> {
                Ok(Numeric::from_value(self.value)?.to_bits() as $ty)
            }
        )+
    };
}

impl<'a> Arg<'a> {
    pub(crate) const fn new(value: Option<&'a Value>) -> Self {
        Self { value }
    }

    /// Handle that refers to no slot.
    #[must_use]
    pub const fn absent() -> Self {
        Self { value: None }
    }

    /// Underlying value, or `None` for an absent slot.
    #[must_use]
    pub const fn elem(&self) -> Option<&'a Value> {
        self.value
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.value.map_or(ValueKind::Absent, Value::kind)
    }

    /// Owned copy of the slot; absent slots read as `Nil`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        self.value.cloned().unwrap_or_default()
    }

    /// Absent slots fail instead of reading as `false`.
    pub fn as_bool(&self) -> Result<bool> {
        match self.value {
            Some(Value::Bool(v)) => Ok(*v),
            _ => Err(UnderstudyError::NotABoolean { found: self.kind() }),
        }
    }

    /// Textual form of any value; absent slots render as `<nil>`.
    #[must_use]
    pub fn as_string(&self) -> String {
        self.value.map_or_else(|| Value::Nil.to_string(), ToString::to_string)
    }

    /// Nil and absent slots yield an empty slice.
    pub fn as_bytes(&self) -> Result<&'a [u8]> {
        match self.value {
            None | Some(Value::Nil) => Ok(&[]),
            Some(Value::Bytes(bytes)) => Ok(bytes),
            Some(other) => Err(UnderstudyError::NotByteSequence {
                found: other.kind(),
            }),
        }
    }

    /// Nil and absent slots yield an empty slice.
    pub fn as_strings(&self) -> Result<&'a [String]> {
        match self.value {
            None | Some(Value::Nil) => Ok(&[]),
            Some(Value::Strings(strings)) => Ok(strings),
            Some(other) => Err(UnderstudyError::NotStringSequence {
                found: other.kind(),
            }),
        }
    }

    /// Nil and absent slots yield `None`.
    pub fn as_error(&self) -> Result<Option<&'a ErrorValue>> {
        match self.value {
            None | Some(Value::Nil) => Ok(None),
            Some(Value::Error(err)) => Ok(Some(err)),
            Some(other) => Err(UnderstudyError::NotAnError {
                found: other.kind(),
            }),
        }
    }

    wrapping_accessor! {
        as_i8 => i8,
        as_i16 => i16,
        as_i32 => i32,
        as_i64 => i64,
        as_isize => isize,
        as_u8 => u8,
        as_u16 => u16,
        as_u32 => u32,
        as_u64 => u64,
        as_usize => usize,
    }

    pub fn as_f32(&self) -> Result<f32> {
        match self.value {
            Some(Value::F32(v)) => Ok(*v),
            _ => Ok(Numeric::from_value(self.value)?.to_f64() as f32),
        }
    }

    pub fn as_f64(&self) -> Result<f64> {
        Ok(Numeric::from_value(self.value)?.to_f64())
    }
}
