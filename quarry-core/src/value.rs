use rust_decimal::Decimal;
use std::mem::discriminant;
use time::{Date, PrimitiveDateTime, Time};

/// Dynamically typed SQL value.
///
/// Typed variants carry an `Option` so that a NULL still knows its column type,
/// `Null` is the untyped NULL.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Boolean(None)
                | Value::Int8(None)
                | Value::Int16(None)
                | Value::Int32(None)
                | Value::Int64(None)
                | Value::Float32(None)
                | Value::Float64(None)
                | Value::Decimal(None)
                | Value::Varchar(None)
                | Value::Blob(None)
                | Value::Date(None)
                | Value::Time(None)
                | Value::Timestamp(None)
        )
    }

    pub fn same_type(&self, other: &Self) -> bool {
        discriminant(self) == discriminant(other)
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Boolean(..) => "boolean",
            Value::Int8(..) => "int8",
            Value::Int16(..) => "int16",
            Value::Int32(..) => "int32",
            Value::Int64(..) => "int64",
            Value::Float32(..) => "float32",
            Value::Float64(..) => "float64",
            Value::Decimal(..) => "decimal",
            Value::Varchar(..) => "varchar",
            Value::Blob(..) => "blob",
            Value::Date(..) => "date",
            Value::Time(..) => "time",
            Value::Timestamp(..) => "timestamp",
        }
    }
}
