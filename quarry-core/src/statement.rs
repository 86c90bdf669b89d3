use crate::{Error, Result, Row, Value};
use std::fmt::{self, Display};

/// Data-access operation a [`Statement`] implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Insert,
    /// Select the row whose key is supplied by the caller.
    SelectByKey,
    /// Select the row of an entity instance, keyed by its own primary key.
    SelectSelf,
    SelectAll,
    Update,
    DeleteByKey,
    DeleteSelf,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Insert,
        Operation::SelectByKey,
        Operation::SelectSelf,
        Operation::SelectAll,
        Operation::Update,
        Operation::DeleteByKey,
        Operation::DeleteSelf,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::SelectByKey => "select_by_key",
            Operation::SelectSelf => "select_self",
            Operation::SelectAll => "select_all",
            Operation::Update => "update",
            Operation::DeleteByKey => "delete_by_key",
            Operation::DeleteSelf => "delete_self",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the value of a placeholder comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// The entity field at this position.
    Field(usize),
    /// The key supplied by the caller.
    Key,
}

/// One `?` placeholder of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub column: String,
    pub source: ParamSource,
}

/// Parameterized statement text plus the order its placeholders are bound in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub operation: Operation,
    pub sql: String,
    pub bindings: Vec<Binding>,
}

impl Statement {
    pub fn placeholders(&self) -> usize {
        self.bindings.len()
    }

    pub fn uses_key(&self) -> bool {
        self.bindings.iter().any(|b| b.source == ParamSource::Key)
    }

    /// Resolve the bindings into positional parameter values.
    ///
    /// `row` holds the entity values in declared field order, `key` is the
    /// caller supplied key for the `*ByKey` operations.
    pub fn bind(&self, row: &[Value], key: Option<&Value>) -> Result<Row> {
        self.bindings
            .iter()
            .map(|binding| match binding.source {
                ParamSource::Field(i) => row.get(i).cloned().ok_or_else(|| {
                    Error::msg(format!(
                        "Statement `{}` binds field {} (column `{}`) but the row has {} values",
                        self.operation,
                        i,
                        binding.column,
                        row.len()
                    ))
                }),
                ParamSource::Key => key.cloned().ok_or_else(|| {
                    Error::msg(format!(
                        "Statement `{}` requires a key for column `{}`",
                        self.operation, binding.column
                    ))
                }),
            })
            .collect()
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
