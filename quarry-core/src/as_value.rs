use crate::{Error, Parse, Result, Value, truncate_long};
use anyhow::Context;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use std::{any, str::FromStr};
use time::{Date, PrimitiveDateTime, Time};

/// Conversion between native Rust values and the dynamically typed [`Value`].
///
/// `try_from_value` accepts the canonical variant of the type and, where it is
/// lossless or range checked, neighbouring variants (other integer widths,
/// textual representations). It is what the decode functions lean on to bring
/// whatever the driver produced into the shape the entity expects.
///
/// ```rust
/// use quarry_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(Some(42))));
/// let n: i16 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The typed NULL for this type.
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

fn mismatch<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {:?} to {}",
        value,
        any::type_name::<T>()
    ))
}

fn parse_text<T: FromStr>(value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse::<T>().with_context(|| {
        format!(
            "Cannot parse `{}` as {}",
            truncate_long!(value),
            any::type_name::<T>()
        )
    })
}

macro_rules! impl_as_value_integer {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                let narrow = |v: i64| {
                    <$source>::try_from(v).map_err(|_| {
                        Error::msg(format!(
                            "Value {v} is out of range for {}",
                            any::type_name::<Self>()
                        ))
                    })
                };
                match value {
                    $destination(Some(v)) => Ok(v),
                    #[allow(unreachable_patterns)]
                    Value::Int8(Some(v)) => narrow(v as i64),
                    #[allow(unreachable_patterns)]
                    Value::Int16(Some(v)) => narrow(v as i64),
                    #[allow(unreachable_patterns)]
                    Value::Int32(Some(v)) => narrow(v as i64),
                    #[allow(unreachable_patterns)]
                    Value::Int64(Some(v)) => narrow(v),
                    Value::Varchar(Some(ref v)) => parse_text(v),
                    _ => Err(mismatch::<Self>(&value)),
                }
            }
        }
    };
}

impl_as_value_integer!(i8, Value::Int8);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);

impl AsValue for bool {
    fn as_empty_value() -> Value {
        Value::Boolean(None)
    }
    fn as_value(self) -> Value {
        Value::Boolean(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(Some(v)) => Ok(v),
            Value::Int8(Some(v)) => Ok(v != 0),
            Value::Int16(Some(v)) => Ok(v != 0),
            Value::Int32(Some(v)) => Ok(v != 0),
            Value::Int64(Some(v)) => Ok(v != 0),
            Value::Varchar(Some(ref v)) => match v.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => Ok(true),
                "false" | "f" | "0" => Ok(false),
                _ => Err(mismatch::<Self>(&value)),
            },
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for f32 {
    fn as_empty_value() -> Value {
        Value::Float32(None)
    }
    fn as_value(self) -> Value {
        Value::Float32(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float32(Some(v)) => Ok(v),
            Value::Float64(Some(v)) => {
                if v.is_finite() && (v < f32::MIN as f64 || v > f32::MAX as f64) {
                    return Err(Error::msg(format!("Value {v} is out of range for f32")));
                }
                Ok(v as f32)
            }
            Value::Int8(Some(v)) => Ok(v as f32),
            Value::Int16(Some(v)) => Ok(v as f32),
            Value::Int32(Some(v)) => Ok(v as f32),
            Value::Int64(Some(v)) => Ok(v as f32),
            Value::Decimal(Some(v)) => v.to_f32().ok_or_else(|| mismatch::<Self>(&value)),
            Value::Varchar(Some(ref v)) => parse_text(v),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for f64 {
    fn as_empty_value() -> Value {
        Value::Float64(None)
    }
    fn as_value(self) -> Value {
        Value::Float64(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float64(Some(v)) => Ok(v),
            Value::Float32(Some(v)) => Ok(v as f64),
            Value::Int8(Some(v)) => Ok(v as f64),
            Value::Int16(Some(v)) => Ok(v as f64),
            Value::Int32(Some(v)) => Ok(v as f64),
            Value::Int64(Some(v)) => Ok(v as f64),
            Value::Decimal(Some(v)) => v.to_f64().ok_or_else(|| mismatch::<Self>(&value)),
            Value::Varchar(Some(ref v)) => parse_text(v),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for Decimal {
    fn as_empty_value() -> Value {
        Value::Decimal(None)
    }
    fn as_value(self) -> Value {
        Value::Decimal(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(Some(v)) => Ok(v),
            Value::Int8(Some(v)) => Ok(v.into()),
            Value::Int16(Some(v)) => Ok(v.into()),
            Value::Int32(Some(v)) => Ok(v.into()),
            Value::Int64(Some(v)) => Ok(v.into()),
            Value::Float32(Some(v)) => {
                Decimal::from_f32(v).ok_or_else(|| mismatch::<Self>(&value))
            }
            Value::Float64(Some(v)) => {
                Decimal::from_f64(v).ok_or_else(|| mismatch::<Self>(&value))
            }
            Value::Varchar(Some(ref v)) => parse_text(v),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for String {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(Some(v)) => Ok(v),
            // JSON and TEXT columns are handed over as bytes by some drivers
            Value::Blob(Some(v)) => {
                String::from_utf8(v.into_vec()).context("Blob is not valid UTF-8 text")
            }
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for Box<[u8]> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(Some(v)) => Ok(v),
            Value::Varchar(Some(v)) => Ok(v.into_bytes().into_boxed_slice()),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for Date {
    fn as_empty_value() -> Value {
        Value::Date(None)
    }
    fn as_value(self) -> Value {
        Value::Date(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Date(Some(v)) => Ok(v),
            Value::Timestamp(Some(v)) => Ok(v.date()),
            Value::Varchar(Some(ref v)) => <Date as Parse>::parse(v),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for Time {
    fn as_empty_value() -> Value {
        Value::Time(None)
    }
    fn as_value(self) -> Value {
        Value::Time(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Time(Some(v)) => Ok(v),
            Value::Varchar(Some(ref v)) => <Time as Parse>::parse(v),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for PrimitiveDateTime {
    fn as_empty_value() -> Value {
        Value::Timestamp(None)
    }
    fn as_value(self) -> Value {
        Value::Timestamp(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Timestamp(Some(v)) => Ok(v),
            Value::Date(Some(v)) => Ok(v.midnight()),
            Value::Varchar(Some(ref v)) => <PrimitiveDateTime as Parse>::parse(v),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}
