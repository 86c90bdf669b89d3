use crate::{
    Config, ConfigError, DecodePlan, EntityDecl, EntitySchema, GenericSqlWriter, Operation,
    RawFieldDecl, SqlWriter, Statement, truncate_long,
};

/// Everything synthesized for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedUnit {
    pub entity: String,
    pub table: String,
    pub create_table: String,
    pub drop_table: String,
    pub insert: Statement,
    pub select_by_key: Statement,
    pub select_self: Statement,
    pub select_all: Statement,
    pub update: Statement,
    pub delete_by_key: Statement,
    pub delete_self: Statement,
    pub decode_plan: DecodePlan,
}

impl GeneratedUnit {
    pub fn statement(&self, operation: Operation) -> &Statement {
        match operation {
            Operation::Insert => &self.insert,
            Operation::SelectByKey => &self.select_by_key,
            Operation::SelectSelf => &self.select_self,
            Operation::SelectAll => &self.select_all,
            Operation::Update => &self.update,
            Operation::DeleteByKey => &self.delete_by_key,
            Operation::DeleteSelf => &self.delete_self,
        }
    }

    /// Statements in [`Operation::ALL`] order.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        Operation::ALL.into_iter().map(|op| self.statement(op))
    }
}

/// Turns entity schemas into [`GeneratedUnit`]s.
///
/// Holds no mutable state, a single generator can serve any number of
/// entities from any number of threads.
#[derive(Debug, Clone)]
pub struct Generator<W: SqlWriter = GenericSqlWriter> {
    config: Config,
    writer: W,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            writer: GenericSqlWriter::new(),
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<W: SqlWriter> Generator<W> {
    pub fn with_writer(config: Config, writer: W) -> Self {
        Self { config, writer }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn generate(&self, schema: &EntitySchema) -> Result<GeneratedUnit, ConfigError> {
        let decode_plan = if self.config.strict_decode {
            DecodePlan::plan_strict(schema.fields())?
        } else {
            DecodePlan::plan(schema.fields())
        };
        let mut create_table = String::new();
        self.writer
            .write_create_table(&mut create_table, schema, self.config.create_if_not_exists);
        let mut drop_table = String::new();
        self.writer
            .write_drop_table(&mut drop_table, schema, self.config.drop_if_exists);
        log::debug!("{}: {}", schema.entity(), truncate_long!(create_table));
        let statement = |operation| {
            let statement = self.writer.statement(schema, operation);
            log::debug!(
                "{}::{}: {}",
                schema.entity(),
                operation,
                truncate_long!(statement.sql)
            );
            statement
        };
        Ok(GeneratedUnit {
            entity: schema.entity().to_string(),
            table: schema.table().to_string(),
            create_table,
            drop_table,
            insert: statement(Operation::Insert),
            select_by_key: statement(Operation::SelectByKey),
            select_self: statement(Operation::SelectSelf),
            select_all: statement(Operation::SelectAll),
            update: statement(Operation::Update),
            delete_by_key: statement(Operation::DeleteByKey),
            delete_self: statement(Operation::DeleteSelf),
            decode_plan,
        })
    }

    /// Resolve the declarations and generate in one go.
    pub fn generate_entity(
        &self,
        entity_name: &str,
        table_name: Option<&str>,
        fields: impl IntoIterator<Item = RawFieldDecl>,
    ) -> Result<GeneratedUnit, ConfigError> {
        let schema = EntitySchema::resolve(entity_name, table_name, fields)?;
        self.generate(&schema)
    }

    /// Generate several entities, a failing entity does not affect the others.
    pub fn generate_all(
        &self,
        entities: impl IntoIterator<Item = EntityDecl>,
    ) -> Vec<(String, Result<GeneratedUnit, ConfigError>)> {
        entities
            .into_iter()
            .map(|decl| {
                let result =
                    self.generate_entity(&decl.name, decl.table.as_deref(), decl.fields);
                if let Err(e) = &result {
                    log::error!("Entity `{}`: {}", decl.name, e);
                }
                (decl.name, result)
            })
            .collect()
    }
}
