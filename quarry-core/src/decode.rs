use crate::{
    AsValue, ConfigError, FieldDescriptor, Result, Row, RowLabeled, Value, base_sql_type,
};
use anyhow::Context;
use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, quote};
use std::fmt::{self, Display};
use time::PrimitiveDateTime;

/// Conversion applied to one result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeFn {
    Integer,
    Text,
    Boolean,
    Float,
    Long,
    Double,
    Short,
    Timestamp,
    /// No typed conversion known, the driver value is passed through.
    Opaque,
}

/// Fallback used when the host type does not select a decode function.
static SQL_DECODE: &[(&str, DecodeFn)] = &[
    ("INT", DecodeFn::Integer),
    ("INTEGER", DecodeFn::Integer),
    ("VARCHAR", DecodeFn::Text),
    ("CHAR", DecodeFn::Text),
    ("TEXT", DecodeFn::Text),
    ("JSON", DecodeFn::Text),
    ("BOOLEAN", DecodeFn::Boolean),
    ("TINYINT", DecodeFn::Boolean),
    ("FLOAT", DecodeFn::Float),
    ("BIGINT", DecodeFn::Long),
    ("SMALLINT", DecodeFn::Short),
    ("DOUBLE", DecodeFn::Double),
    ("DECIMAL", DecodeFn::Double),
    ("TIMESTAMP", DecodeFn::Timestamp),
];

impl DecodeFn {
    /// Stable identifier, e.g. `integer`.
    pub fn identifier(&self) -> &'static str {
        match self {
            DecodeFn::Integer => "integer",
            DecodeFn::Text => "text",
            DecodeFn::Boolean => "boolean",
            DecodeFn::Float => "float",
            DecodeFn::Long => "long",
            DecodeFn::Double => "double",
            DecodeFn::Short => "short",
            DecodeFn::Timestamp => "timestamp",
            DecodeFn::Opaque => "opaque",
        }
    }

    /// Decode function for a SQL type name, `(..)` suffix allowed.
    pub fn for_sql_type(sql_type: &str) -> Option<DecodeFn> {
        let base = base_sql_type(sql_type);
        SQL_DECODE
            .iter()
            .find(|(name, _)| *name == base)
            .map(|(_, decode)| *decode)
    }

    /// Decode function of a field: host type first, SQL type otherwise.
    pub fn for_field(field: &FieldDescriptor) -> Option<DecodeFn> {
        field
            .host_type
            .decode_fn()
            .or_else(|| Self::for_sql_type(&field.sql_type()))
    }

    /// Bring a driver value into the canonical variant of this function.
    pub fn decode(&self, value: Value) -> Result<Value> {
        match self {
            DecodeFn::Integer => Option::<i32>::try_from_value(value).map(Value::Int32),
            DecodeFn::Text => Option::<String>::try_from_value(value).map(Value::Varchar),
            DecodeFn::Boolean => Option::<bool>::try_from_value(value).map(Value::Boolean),
            DecodeFn::Float => Option::<f32>::try_from_value(value).map(Value::Float32),
            DecodeFn::Long => Option::<i64>::try_from_value(value).map(Value::Int64),
            DecodeFn::Double => Option::<f64>::try_from_value(value).map(Value::Float64),
            DecodeFn::Short => Option::<i16>::try_from_value(value).map(Value::Int16),
            DecodeFn::Timestamp => {
                Option::<PrimitiveDateTime>::try_from_value(value).map(Value::Timestamp)
            }
            DecodeFn::Opaque => Ok(value),
        }
    }
}

impl Display for DecodeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl ToTokens for DecodeFn {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.append_all(match self {
            DecodeFn::Integer => quote! { ::quarry::DecodeFn::Integer },
            DecodeFn::Text => quote! { ::quarry::DecodeFn::Text },
            DecodeFn::Boolean => quote! { ::quarry::DecodeFn::Boolean },
            DecodeFn::Float => quote! { ::quarry::DecodeFn::Float },
            DecodeFn::Long => quote! { ::quarry::DecodeFn::Long },
            DecodeFn::Double => quote! { ::quarry::DecodeFn::Double },
            DecodeFn::Short => quote! { ::quarry::DecodeFn::Short },
            DecodeFn::Timestamp => quote! { ::quarry::DecodeFn::Timestamp },
            DecodeFn::Opaque => quote! { ::quarry::DecodeFn::Opaque },
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeStep {
    pub column: String,
    pub decode: DecodeFn,
}

/// Ordered decode functions, one per column of the full select list.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct DecodePlan {
    pub steps: Vec<DecodeStep>,
}

impl DecodePlan {
    /// Plan the decoding of `fields`, falling back to [`DecodeFn::Opaque`].
    pub fn plan(fields: &[FieldDescriptor]) -> DecodePlan {
        DecodePlan {
            steps: fields
                .iter()
                .map(|field| {
                    let decode = DecodeFn::for_field(field).unwrap_or_else(|| {
                        log::warn!(
                            "No typed decoder for field `{}` ({}, {}), values are passed through as is",
                            field.name,
                            field.host_type,
                            field.sql_type(),
                        );
                        DecodeFn::Opaque
                    });
                    DecodeStep {
                        column: field.column.clone(),
                        decode,
                    }
                })
                .collect(),
        }
    }

    /// Plan the decoding of `fields`, rejecting the ones without a typed decoder.
    pub fn plan_strict(
        fields: &[FieldDescriptor],
    ) -> std::result::Result<DecodePlan, ConfigError> {
        Ok(DecodePlan {
            steps: fields
                .iter()
                .map(|field| {
                    DecodeFn::for_field(field)
                        .map(|decode| DecodeStep {
                            column: field.column.clone(),
                            decode,
                        })
                        .ok_or_else(|| {
                            ConfigError::UntypedColumn(field.name.clone(), field.sql_type())
                        })
                })
                .collect::<std::result::Result<_, _>>()?,
        })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, DecodeFn)> {
        self.steps.iter().map(|s| (s.column.as_str(), s.decode))
    }

    /// Decode a result row positionally.
    pub fn decode(&self, row: RowLabeled) -> Result<Row> {
        if row.values.len() != self.steps.len() {
            return Err(anyhow::anyhow!(
                "Expected {} columns ({}) but the row has {}",
                self.steps.len(),
                self.steps
                    .iter()
                    .map(|s| s.column.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                row.values.len()
            ));
        }
        row.values
            .into_vec()
            .into_iter()
            .zip(&self.steps)
            .map(|(value, step)| {
                step.decode
                    .decode(value)
                    .with_context(|| format!("While decoding column `{}`", step.column))
            })
            .collect()
    }
}
