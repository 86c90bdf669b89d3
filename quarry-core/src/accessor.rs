use crate::{
    ConnectionProvider, Entity, GeneratedUnit, Result, Row, RowsAffected, ScopedConnection,
    Statement, Value,
    stream::{StreamExt, TryStreamExt},
    truncate_long,
};
use anyhow::Context;
use std::{marker::PhantomData, pin::pin};

/// Executes the statements of a [`GeneratedUnit`] for the entity `E`.
///
/// Each call acquires one connection from the provider and releases it (drop)
/// before returning, whether the call succeeded or not.
pub struct Accessor<E: Entity> {
    unit: GeneratedUnit,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Accessor<E> {
    pub fn new(unit: GeneratedUnit) -> Self {
        Self {
            unit,
            _entity: PhantomData,
        }
    }

    pub fn unit(&self) -> &GeneratedUnit {
        &self.unit
    }

    /// Create the table unless it exists already, returns `true` when it did.
    pub async fn create_table<P: ConnectionProvider>(&self, provider: &P) -> Result<bool> {
        let mut connection = provider.acquire().await?;
        let exists = connection
            .table_exists(&self.unit.table)
            .await
            .with_context(|| format!("While checking whether `{}` exists", self.unit.table))
            .inspect_err(|e| log::error!("{:#}", e))?;
        if exists {
            log::debug!("Table `{}` already exists", self.unit.table);
            return Ok(true);
        }
        log::debug!("{}", truncate_long!(self.unit.create_table));
        connection
            .execute(&self.unit.create_table, Row::default())
            .await
            .with_context(|| format!("While creating table `{}`", self.unit.table))
            .inspect_err(|e| log::error!("{:#}", e))?;
        Ok(false)
    }

    pub async fn drop_table<P: ConnectionProvider>(&self, provider: &P) -> Result<()> {
        let mut connection = provider.acquire().await?;
        log::debug!("{}", truncate_long!(self.unit.drop_table));
        connection
            .execute(&self.unit.drop_table, Row::default())
            .await
            .with_context(|| format!("While dropping table `{}`", self.unit.table))
            .inspect_err(|e| log::error!("{:#}", e))?;
        Ok(())
    }

    pub async fn insert<P: ConnectionProvider>(
        &self,
        provider: &P,
        entity: &E,
    ) -> Result<RowsAffected> {
        let params = self.unit.insert.bind(&entity.row(), None)?;
        self.execute(provider, &self.unit.insert, params).await
    }

    pub async fn update<P: ConnectionProvider>(
        &self,
        provider: &P,
        entity: &E,
    ) -> Result<RowsAffected> {
        let params = self.unit.update.bind(&entity.row(), None)?;
        self.execute(provider, &self.unit.update, params).await
    }

    /// Find the entity whose primary key equals `key`.
    pub async fn find_by_key<P: ConnectionProvider>(
        &self,
        provider: &P,
        key: impl Into<Value>,
    ) -> Result<Option<E>> {
        let key = self.coerce_key(key.into())?;
        let params = self.unit.select_by_key.bind(&[], Some(&key))?;
        self.fetch_one(provider, &self.unit.select_by_key, params)
            .await
    }

    /// Load the stored state of `entity`, looked up by its own primary key.
    pub async fn refresh<P: ConnectionProvider>(
        &self,
        provider: &P,
        entity: &E,
    ) -> Result<Option<E>> {
        let params = self.unit.select_self.bind(&entity.row(), None)?;
        self.fetch_one(provider, &self.unit.select_self, params)
            .await
    }

    pub async fn find_all<P: ConnectionProvider>(&self, provider: &P) -> Result<Vec<E>> {
        let statement = &self.unit.select_all;
        let mut connection = provider.acquire().await?;
        log::debug!("{}: {}", statement.operation, truncate_long!(statement.sql));
        let rows = connection
            .fetch(&statement.sql, Row::default())
            .try_collect::<Vec<_>>()
            .await
            .with_context(|| context(&self.unit, statement))
            .inspect_err(|e| log::error!("{:#}", e))?;
        rows.into_iter()
            .map(|row| self.unit.decode_plan.decode(row).and_then(E::from_row))
            .collect::<Result<_>>()
            .with_context(|| context(&self.unit, statement))
    }

    /// Delete the row whose primary key equals `key`, the count goes to `then`.
    pub async fn delete_by_key<P, F, R>(
        &self,
        provider: &P,
        key: impl Into<Value>,
        then: F,
    ) -> Result<R>
    where
        P: ConnectionProvider,
        F: FnOnce(RowsAffected) -> R,
    {
        let key = self.coerce_key(key.into())?;
        let params = self.unit.delete_by_key.bind(&[], Some(&key))?;
        let affected = self
            .execute(provider, &self.unit.delete_by_key, params)
            .await?;
        if affected.is_empty() {
            log::info!("No row of `{}` has key {:?}", self.unit.table, key);
        }
        Ok(then(affected))
    }

    /// Delete the row of `entity`, the count goes to `then`.
    pub async fn delete<P, F, R>(&self, provider: &P, entity: &E, then: F) -> Result<R>
    where
        P: ConnectionProvider,
        F: FnOnce(RowsAffected) -> R,
    {
        let params = self.unit.delete_self.bind(&entity.row(), None)?;
        let affected = self
            .execute(provider, &self.unit.delete_self, params)
            .await?;
        if affected.is_empty() {
            log::info!("Nothing deleted from `{}`", self.unit.table);
        }
        Ok(then(affected))
    }

    fn coerce_key(&self, key: Value) -> Result<Value> {
        let Some(binding) = self.unit.select_by_key.bindings.first() else {
            return Ok(key);
        };
        match self.unit.decode_plan.steps.iter().find(|s| s.column == binding.column) {
            Some(step) => step
                .decode
                .decode(key)
                .with_context(|| format!("Invalid key for `{}`", self.unit.table)),
            None => Ok(key),
        }
    }

    async fn execute<P: ConnectionProvider>(
        &self,
        provider: &P,
        statement: &Statement,
        params: Row,
    ) -> Result<RowsAffected> {
        let mut connection = provider.acquire().await?;
        log::debug!("{}: {}", statement.operation, truncate_long!(statement.sql));
        connection
            .execute(&statement.sql, params)
            .await
            .with_context(|| context(&self.unit, statement))
            .inspect_err(|e| log::error!("{:#}", e))
    }

    async fn fetch_one<P: ConnectionProvider>(
        &self,
        provider: &P,
        statement: &Statement,
        params: Row,
    ) -> Result<Option<E>> {
        let mut connection = provider.acquire().await?;
        log::debug!("{}: {}", statement.operation, truncate_long!(statement.sql));
        let mut stream = pin!(connection.fetch(&statement.sql, params));
        let row = stream
            .next()
            .await
            .transpose()
            .with_context(|| context(&self.unit, statement))
            .inspect_err(|e| log::error!("{:#}", e))?;
        match row {
            Some(row) => self
                .unit
                .decode_plan
                .decode(row)
                .and_then(E::from_row)
                .map(Some)
                .with_context(|| context(&self.unit, statement)),
            None => Ok(None),
        }
    }
}

fn context(unit: &GeneratedUnit, statement: &Statement) -> String {
    format!(
        "While executing `{}` of `{}`: {}",
        statement.operation,
        unit.entity,
        truncate_long!(statement.sql)
    )
}
