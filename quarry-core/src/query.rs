use crate::{
    ConnectionProvider, HostType, Result, ScopedConnection, Value, stream::TryStreamExt,
    truncate_long,
};
use anyhow::Context;
use std::sync::Arc;

/// Positional values, in declared field or select list order.
pub type Row = Box<[Value]>;
pub type RowNames = Arc<[String]>;

/// A result row together with the names of its columns.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RowLabeled {
    pub labels: RowNames,
    pub values: Row,
}

impl RowLabeled {
    pub fn new(names: RowNames, values: Row) -> Self {
        Self {
            labels: names,
            values,
        }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .and_then(|i| self.values.get(i))
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Item produced by [`ScopedConnection::run`]: a row or a modification count.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    RowLabeled(RowLabeled),
    Affected(RowsAffected),
}

/// Outcome of a statement that modifies data.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    pub rows_affected: u64,
    pub last_insert_id: Option<u64>,
}

impl RowsAffected {
    pub fn new(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            last_insert_id: None,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.rows_affected == 0
    }
}

impl Extend<RowsAffected> for RowsAffected {
    fn extend<T: IntoIterator<Item = RowsAffected>>(&mut self, iter: T) {
        for elem in iter {
            self.rows_affected += elem.rows_affected;
            if elem.last_insert_id.is_some() {
                self.last_insert_id = elem.last_insert_id;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub name: String,
    pub host_type: HostType,
}

/// Named raw SQL text with its ordered bind parameters.
///
/// Results are handed over as labeled rows, no decode plan is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub name: String,
    pub sql: String,
    pub params: Vec<QueryParam>,
}

impl QuerySpec {
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, host_type: impl Into<HostType>) -> Self {
        self.params.push(QueryParam {
            name: name.into(),
            host_type: host_type.into(),
        });
        self
    }

    /// Check the arity and coerce every value through its parameter host type.
    pub fn bind(&self, values: Vec<Value>) -> Result<Row> {
        if values.len() != self.params.len() {
            return Err(anyhow::anyhow!(
                "Query `{}` expects {} parameters but {} were supplied",
                self.name,
                self.params.len(),
                values.len()
            ));
        }
        values
            .into_iter()
            .zip(&self.params)
            .map(|(value, param)| match param.host_type.decode_fn() {
                Some(decode) => decode.decode(value).with_context(|| {
                    format!(
                        "Query `{}` parameter `{}` expects {}",
                        self.name, param.name, param.host_type
                    )
                }),
                None => Ok(value),
            })
            .collect()
    }

    /// Bind `values`, fetch every row and hand them to `then`.
    pub async fn run<P, F, R>(&self, provider: &P, values: Vec<Value>, then: F) -> Result<R>
    where
        P: ConnectionProvider,
        F: FnOnce(Vec<RowLabeled>) -> R,
    {
        let params = self.bind(values)?;
        let mut connection = provider.acquire().await?;
        log::debug!("Query `{}`: {}", self.name, truncate_long!(self.sql));
        let rows = connection
            .fetch(&self.sql, params)
            .try_collect::<Vec<_>>()
            .await
            .with_context(|| format!("While running query `{}`", self.name))
            .inspect_err(|e| log::error!("{:#}", e))?;
        Ok(then(rows))
    }
}
