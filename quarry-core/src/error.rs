use crate::ColumnType;
use thiserror::Error as ThisError;

///
/// ConfigError
///
/// Schema configuration mistakes. Raised while resolving or generating a single
/// entity and never affects the processing of other entities.
///

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ConfigError {
    #[error("entity name must not be empty")]
    EmptyEntityName,

    #[error("entity `{0}` declares a field without a name")]
    EmptyFieldName(String),

    #[error("field `{0}` does not declare a column type")]
    MissingColumnType(String),

    #[error("unknown column type `{0}`")]
    UnknownColumnType(String),

    #[error("field `{0}` requests size {1} but its column type allows at most {2}")]
    SizeExceeded(String, u32, u32),

    #[error("field `{0}` requests size 0")]
    ZeroSize(String),

    #[error("entity `{0}` does not declare a primary key")]
    NoPrimaryKey(String),

    #[error("entity `{0}` declares more than one primary key: {fields}", fields = .1.join(", "))]
    MultiplePrimaryKeys(String, Vec<String>),

    #[error("entity `{0}` maps more than one field to column `{1}`")]
    DuplicateColumn(String, String),

    #[error("default value of field `{0}` does not fit column type {1}")]
    DefaultTypeMismatch(String, ColumnType),

    #[error("field `{0}` has column type `{1}` which has no typed decoder")]
    UntypedColumn(String, String),

    #[error("cannot parse host type `{0}`: {1}")]
    InvalidHostType(String, String),
}
