use quarry::{
    ConnectionProvider, Error, QueryResult, Result, Row, RowLabeled, RowNames, RowsAffected,
    ScopedConnection, Value, future::TryFutureExt, stream,
};
use std::{
    collections::{HashSet, VecDeque},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::sync::Mutex;

/// A statement received by a [`RecordingConnection`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Scripted outcome of the next statement.
#[derive(Debug, Clone)]
pub enum Response {
    Affected(u64),
    Rows(Vec<RowLabeled>),
    Fail(String),
}

#[derive(Default)]
struct State {
    recorded: Vec<Recorded>,
    responses: VecDeque<Response>,
    tables: HashSet<String>,
    fail_acquire: bool,
}

/// In-memory connector recording every statement it receives.
///
/// Responses are consumed in order, one per statement. Without a scripted
/// response a statement affects zero rows and returns no row.
#[derive(Clone, Default)]
pub struct RecordingProvider {
    state: Arc<Mutex<State>>,
    acquired: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Default::default()
    }

    pub async fn respond(&self, response: Response) {
        self.state.lock().await.responses.push_back(response);
    }

    pub async fn add_table(&self, table: &str) {
        self.state.lock().await.tables.insert(table.to_string());
    }

    pub async fn fail_acquire(&self, fail: bool) {
        self.state.lock().await.fail_acquire = fail;
    }

    pub async fn recorded(&self) -> Vec<Recorded> {
        self.state.lock().await.recorded.clone()
    }

    pub async fn last(&self) -> Option<Recorded> {
        self.state.lock().await.recorded.last().cloned()
    }

    /// Scripted responses not consumed yet.
    pub async fn pending(&self) -> usize {
        self.state.lock().await.responses.len()
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl ConnectionProvider for RecordingProvider {
    type Connection = RecordingConnection;

    async fn acquire(&self) -> Result<RecordingConnection> {
        if self.state.lock().await.fail_acquire {
            return Err(Error::msg("Connection refused"));
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(RecordingConnection {
            state: self.state.clone(),
            released: self.released.clone(),
        })
    }
}

pub struct RecordingConnection {
    state: Arc<Mutex<State>>,
    released: Arc<AtomicUsize>,
}

impl ScopedConnection for RecordingConnection {
    fn run(
        &mut self,
        sql: &str,
        params: Row,
    ) -> impl stream::Stream<Item = Result<QueryResult>> + Send {
        let state = self.state.clone();
        let sql = sql.to_string();
        async move {
            let mut state = state.lock().await;
            state.recorded.push(Recorded {
                sql,
                params: params.into_vec(),
            });
            let results: Vec<Result<QueryResult>> = match state.responses.pop_front() {
                Some(Response::Affected(n)) => vec![Ok(QueryResult::Affected(RowsAffected::new(n)))],
                Some(Response::Rows(rows)) => rows
                    .into_iter()
                    .map(|v| Ok(QueryResult::RowLabeled(v)))
                    .collect(),
                Some(Response::Fail(message)) => vec![Err(Error::msg(message))],
                None => vec![Ok(QueryResult::Affected(RowsAffected::default()))],
            };
            Ok::<_, Error>(stream::iter(results))
        }
        .try_flatten_stream()
    }

    async fn table_exists(&mut self, table: &str) -> Result<bool> {
        Ok(self.state.lock().await.tables.contains(table))
    }
}

impl Drop for RecordingConnection {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Build a labeled result row.
pub fn labeled(labels: &[&str], values: impl IntoIterator<Item = Value>) -> RowLabeled {
    let labels: RowNames = labels.iter().map(|v| v.to_string()).collect();
    RowLabeled::new(labels, values.into_iter().collect())
}
