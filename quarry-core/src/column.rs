use crate::{ColumnType, HostType, Parse, Value};
use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, quote};
use time::{Date, PrimitiveDateTime, Time};

/// Referential action for foreign key updates / deletes.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No special action, nothing is rendered.
    #[default]
    NoAction,
    /// Reject the operation.
    Restrict,
    /// Propagate delete/update.
    Cascade,
    /// Set referencing columns to NULL.
    SetNull,
    /// Apply column DEFAULT.
    SetDefault,
}

impl Action {
    /// SQL keyword, `None` for `NoAction` which is left implicit.
    pub fn sql(&self) -> Option<&'static str> {
        match self {
            Action::NoAction => None,
            Action::Restrict => Some("RESTRICT"),
            Action::Cascade => Some("CASCADE"),
            Action::SetNull => Some("SET NULL"),
            Action::SetDefault => Some("SET DEFAULT"),
        }
    }
}

impl ToTokens for Action {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.append_all(match self {
            Action::NoAction => quote! { ::quarry::Action::NoAction },
            Action::Restrict => quote! { ::quarry::Action::Restrict },
            Action::Cascade => quote! { ::quarry::Action::Cascade },
            Action::SetNull => quote! { ::quarry::Action::SetNull },
            Action::SetDefault => quote! { ::quarry::Action::SetDefault },
        });
    }
}

/// Target of a foreign key column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    pub table: String,
    pub column: String,
    pub on_delete: Action,
    pub on_update: Action,
}

impl ForeignKeyRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            on_delete: Action::NoAction,
            on_update: Action::NoAction,
        }
    }
    pub fn on_delete(mut self, action: Action) -> Self {
        self.on_delete = action;
        self
    }
    pub fn on_update(mut self, action: Action) -> Self {
        self.on_update = action;
        self
    }
}

/// Declared column default.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Int(i32),
    Long(i64),
    Short(i16),
    Float(f32),
    Double(f64),
    Bool(bool),
    String(String),
}

impl DefaultValue {
    /// Whether the literal can be stored in a column of `column_type`.
    pub fn fits(&self, column_type: ColumnType) -> bool {
        match self {
            DefaultValue::Int(..) | DefaultValue::Long(..) | DefaultValue::Short(..) => {
                column_type.is_numeric() || column_type == ColumnType::Boolean
            }
            DefaultValue::Float(v) if !v.is_finite() => false,
            DefaultValue::Double(v) if !v.is_finite() => false,
            DefaultValue::Float(..) | DefaultValue::Double(..) => matches!(
                column_type,
                ColumnType::Float | ColumnType::Double | ColumnType::Decimal
            ),
            DefaultValue::Bool(..) => {
                matches!(column_type, ColumnType::Boolean | ColumnType::TinyInt)
            }
            DefaultValue::String(v) => match column_type {
                ColumnType::Date => <Date as Parse>::parse(v).is_ok(),
                ColumnType::Time => <Time as Parse>::parse(v).is_ok(),
                ColumnType::Timestamp => <PrimitiveDateTime as Parse>::parse(v).is_ok(),
                _ => !column_type.is_numeric() && column_type != ColumnType::Boolean,
            },
        }
    }

    pub fn as_value(&self) -> Value {
        match self {
            DefaultValue::Int(v) => Value::Int32(Some(*v)),
            DefaultValue::Long(v) => Value::Int64(Some(*v)),
            DefaultValue::Short(v) => Value::Int16(Some(*v)),
            DefaultValue::Float(v) => Value::Float32(Some(*v)),
            DefaultValue::Double(v) => Value::Float64(Some(*v)),
            DefaultValue::Bool(v) => Value::Boolean(Some(*v)),
            DefaultValue::String(v) => Value::Varchar(Some(v.clone())),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::String(value.into())
    }
}

macro_rules! impl_default_from {
    ($source:ty, $variant:path) => {
        impl From<$source> for DefaultValue {
            fn from(value: $source) -> Self {
                $variant(value)
            }
        }
    };
}
impl_default_from!(i32, DefaultValue::Int);
impl_default_from!(i64, DefaultValue::Long);
impl_default_from!(i16, DefaultValue::Short);
impl_default_from!(f32, DefaultValue::Float);
impl_default_from!(f64, DefaultValue::Double);
impl_default_from!(bool, DefaultValue::Bool);
impl_default_from!(String, DefaultValue::String);

/// A field as handed over by entity discovery, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFieldDecl {
    pub name: String,
    pub host_type: HostType,
    pub column_name: Option<String>,
    pub column_type: Option<ColumnType>,
    pub size: Option<u32>,
    pub primary_key: bool,
    pub unique: bool,
    pub not_null: bool,
    pub default: Option<DefaultValue>,
    pub foreign_key: Option<ForeignKeyRef>,
}

impl RawFieldDecl {
    pub fn new(name: impl Into<String>, host_type: impl Into<HostType>) -> Self {
        Self {
            name: name.into(),
            host_type: host_type.into(),
            column_name: None,
            column_type: None,
            size: None,
            primary_key: false,
            unique: false,
            not_null: false,
            default: None,
            foreign_key: None,
        }
    }
    pub fn column_name(mut self, name: impl Into<String>) -> Self {
        self.column_name = Some(name.into());
        self
    }
    pub fn column_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }
    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }
    pub fn foreign_key(mut self, reference: ForeignKeyRef) -> Self {
        self.foreign_key = Some(reference);
        self
    }
}

/// A validated field of an [`EntitySchema`](crate::EntitySchema).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name in the host entity.
    pub name: String,
    /// Column name in the table.
    pub column: String,
    pub host_type: HostType,
    pub column_type: ColumnType,
    /// Effective size, only for sizeable column types.
    pub size: Option<u32>,
    pub primary_key: bool,
    pub unique: bool,
    pub not_null: bool,
    pub default: Option<DefaultValue>,
    pub foreign_key: Option<ForeignKeyRef>,
}

impl FieldDescriptor {
    /// SQL type including the size suffix, e.g. `VARCHAR(50)`.
    pub fn sql_type(&self) -> String {
        match self.size {
            Some(size) => format!("{}({})", self.column_type.sql_name(), size),
            None => self.column_type.sql_name().to_string(),
        }
    }
}
