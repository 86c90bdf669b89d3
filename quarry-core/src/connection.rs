use crate::{
    QueryResult, Result, Row, RowLabeled, RowsAffected,
    stream::{Stream, StreamExt, TryStreamExt},
};
use std::future::Future;

/// Hands out scoped connections to the relational store.
///
/// Pooling, timeouts and cancellation belong to the implementor.
pub trait ConnectionProvider: Send + Sync {
    type Connection: ScopedConnection;

    fn acquire(&self) -> impl Future<Output = Result<Self::Connection>> + Send;
}

/// A connection acquired from a [`ConnectionProvider`], released when dropped.
pub trait ScopedConnection: Send {
    /// Send a parameterized statement and stream back whatever it produces (rows or counts).
    fn run(&mut self, sql: &str, params: Row) -> impl Stream<Item = Result<QueryResult>> + Send;

    /// Execute the statement and return the rows.
    fn fetch(&mut self, sql: &str, params: Row) -> impl Stream<Item = Result<RowLabeled>> + Send {
        self.run(sql, params).filter_map(|v| async move {
            match v {
                Ok(QueryResult::RowLabeled(v)) => Some(Ok(v)),
                Err(e) => Some(Err(e)),
                _ => None,
            }
        })
    }

    /// Execute the statement and return the total number of rows affected.
    fn execute(
        &mut self,
        sql: &str,
        params: Row,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        self.run(sql, params)
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
    }

    fn table_exists(&mut self, table: &str) -> impl Future<Output = Result<bool>> + Send;
}
