use crate::{ConfigError, Value};
use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, quote};
use std::{fmt, str::FromStr};

/// The closed SQL type vocabulary a column can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Int,
    BigInt,
    SmallInt,
    TinyInt,
    Float,
    Double,
    Decimal,
    Boolean,
    Char,
    Varchar,
    Text,
    Json,
    Date,
    Time,
    Timestamp,
    Blob,
}

/// Catalog entry: how a column type is spelled and sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTypeInfo {
    pub column_type: ColumnType,
    pub sql_name: &'static str,
    pub default_size: Option<u32>,
    pub max_size: Option<u32>,
}

const fn fixed(column_type: ColumnType, sql_name: &'static str) -> ColumnTypeInfo {
    ColumnTypeInfo {
        column_type,
        sql_name,
        default_size: None,
        max_size: None,
    }
}

const fn sized(
    column_type: ColumnType,
    sql_name: &'static str,
    default_size: u32,
    max_size: u32,
) -> ColumnTypeInfo {
    ColumnTypeInfo {
        column_type,
        sql_name,
        default_size: Some(default_size),
        max_size: Some(max_size),
    }
}

/// Ordered like the `ColumnType` variants, `ColumnType::info` indexes into it.
static CATALOG: [ColumnTypeInfo; 16] = [
    fixed(ColumnType::Int, "INT"),
    fixed(ColumnType::BigInt, "BIGINT"),
    fixed(ColumnType::SmallInt, "SMALLINT"),
    fixed(ColumnType::TinyInt, "TINYINT"),
    fixed(ColumnType::Float, "FLOAT"),
    fixed(ColumnType::Double, "DOUBLE"),
    sized(ColumnType::Decimal, "DECIMAL", 10, 65),
    fixed(ColumnType::Boolean, "BOOLEAN"),
    sized(ColumnType::Char, "CHAR", 1, 255),
    sized(ColumnType::Varchar, "VARCHAR", 255, 65_535),
    fixed(ColumnType::Text, "TEXT"),
    fixed(ColumnType::Json, "JSON"),
    fixed(ColumnType::Date, "DATE"),
    fixed(ColumnType::Time, "TIME"),
    fixed(ColumnType::Timestamp, "TIMESTAMP"),
    fixed(ColumnType::Blob, "BLOB"),
];

impl ColumnType {
    pub const ALL: [ColumnType; 16] = [
        ColumnType::Int,
        ColumnType::BigInt,
        ColumnType::SmallInt,
        ColumnType::TinyInt,
        ColumnType::Float,
        ColumnType::Double,
        ColumnType::Decimal,
        ColumnType::Boolean,
        ColumnType::Char,
        ColumnType::Varchar,
        ColumnType::Text,
        ColumnType::Json,
        ColumnType::Date,
        ColumnType::Time,
        ColumnType::Timestamp,
        ColumnType::Blob,
    ];

    pub fn info(self) -> &'static ColumnTypeInfo {
        &CATALOG[self as usize]
    }

    pub fn sql_name(self) -> &'static str {
        self.info().sql_name
    }

    pub fn is_sizeable(self) -> bool {
        self.info().max_size.is_some()
    }

    pub fn max_size(self) -> Option<u32> {
        self.info().max_size
    }

    pub fn default_size(self) -> Option<u32> {
        self.info().default_size
    }

    /// Declared size if any, otherwise the catalog default. Always `None` for
    /// types that do not take a size.
    pub fn effective_size(self, declared: Option<u32>) -> Option<u32> {
        if self.is_sizeable() {
            declared.or(self.default_size())
        } else {
            None
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ColumnType::Int
                | ColumnType::BigInt
                | ColumnType::SmallInt
                | ColumnType::TinyInt
                | ColumnType::Float
                | ColumnType::Double
                | ColumnType::Decimal
        )
    }

    pub fn is_textual(self) -> bool {
        matches!(
            self,
            ColumnType::Char | ColumnType::Varchar | ColumnType::Text | ColumnType::Json
        )
    }

    /// Typed NULL of the value a column of this type holds once decoded.
    pub fn empty_value(self) -> Value {
        match self {
            ColumnType::Int => Value::Int32(None),
            ColumnType::BigInt => Value::Int64(None),
            ColumnType::SmallInt => Value::Int16(None),
            ColumnType::TinyInt => Value::Int8(None),
            ColumnType::Float => Value::Float32(None),
            ColumnType::Double => Value::Float64(None),
            ColumnType::Decimal => Value::Decimal(None),
            ColumnType::Boolean => Value::Boolean(None),
            ColumnType::Char | ColumnType::Varchar | ColumnType::Text | ColumnType::Json => {
                Value::Varchar(None)
            }
            ColumnType::Date => Value::Date(None),
            ColumnType::Time => Value::Time(None),
            ColumnType::Timestamp => Value::Timestamp(None),
            ColumnType::Blob => Value::Blob(None),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

/// Strip a trailing `(..)` size suffix and normalize the case of a SQL type name.
pub fn base_sql_type(sql_type: &str) -> String {
    sql_type
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_uppercase()
}

impl FromStr for ColumnType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let base = base_sql_type(s);
        let alias = match base.as_str() {
            "INTEGER" => "INT",
            "BOOL" => "BOOLEAN",
            other => other,
        };
        CATALOG
            .iter()
            .find(|v| v.sql_name == alias)
            .map(|v| v.column_type)
            .ok_or_else(|| ConfigError::UnknownColumnType(s.to_string()))
    }
}

impl ToTokens for ColumnType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        use ColumnType::*;
        tokens.append_all(match self {
            Int => quote!(::quarry::ColumnType::Int),
            BigInt => quote!(::quarry::ColumnType::BigInt),
            SmallInt => quote!(::quarry::ColumnType::SmallInt),
            TinyInt => quote!(::quarry::ColumnType::TinyInt),
            Float => quote!(::quarry::ColumnType::Float),
            Double => quote!(::quarry::ColumnType::Double),
            Decimal => quote!(::quarry::ColumnType::Decimal),
            Boolean => quote!(::quarry::ColumnType::Boolean),
            Char => quote!(::quarry::ColumnType::Char),
            Varchar => quote!(::quarry::ColumnType::Varchar),
            Text => quote!(::quarry::ColumnType::Text),
            Json => quote!(::quarry::ColumnType::Json),
            Date => quote!(::quarry::ColumnType::Date),
            Time => quote!(::quarry::ColumnType::Time),
            Timestamp => quote!(::quarry::ColumnType::Timestamp),
            Blob => quote!(::quarry::ColumnType::Blob),
        });
    }
}
