use crate::{ConfigError, FieldDescriptor, RawFieldDecl};
use std::collections::HashSet;

/// An entity as handed over by discovery: name, optional table name and
/// fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDecl {
    pub name: String,
    pub table: Option<String>,
    pub fields: Vec<RawFieldDecl>,
}

impl EntityDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            fields: Vec::new(),
        }
    }
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }
    pub fn field(mut self, field: RawFieldDecl) -> Self {
        self.fields.push(field);
        self
    }
}

/// Normalized, validated description of one entity and its table.
///
/// Built by [`EntitySchema::resolve`] only, exactly one field is the primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    entity: String,
    table: String,
    fields: Vec<FieldDescriptor>,
    primary_key: usize,
}

impl EntitySchema {
    /// Validate the raw field declarations of an entity.
    ///
    /// The table name is `table_name` when not empty, the lower-cased entity
    /// name otherwise. Field order is preserved, it drives the column order in
    /// the DDL as well as every positional binding.
    pub fn resolve(
        entity_name: &str,
        table_name: Option<&str>,
        fields: impl IntoIterator<Item = RawFieldDecl>,
    ) -> Result<Self, ConfigError> {
        let entity = entity_name.trim();
        if entity.is_empty() {
            return Err(ConfigError::EmptyEntityName);
        }
        let table = match table_name.map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => entity.to_lowercase(),
        };
        let fields = fields
            .into_iter()
            .map(|raw| resolve_field(entity, raw))
            .collect::<Result<Vec<_>, _>>()?;
        // Quoted identifiers still compare case insensitively in the store.
        let mut columns = HashSet::with_capacity(fields.len());
        if let Some(duplicate) = fields
            .iter()
            .find(|f| !columns.insert(f.column.to_ascii_lowercase()))
        {
            return Err(ConfigError::DuplicateColumn(
                entity.to_string(),
                duplicate.column.clone(),
            ));
        }
        let mut keys = fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.primary_key)
            .map(|(i, _)| i);
        let primary_key = match (keys.next(), keys.next()) {
            (None, _) => return Err(ConfigError::NoPrimaryKey(entity.to_string())),
            (Some(i), None) => i,
            (Some(..), Some(..)) => {
                return Err(ConfigError::MultiplePrimaryKeys(
                    entity.to_string(),
                    fields
                        .iter()
                        .filter(|f| f.primary_key)
                        .map(|f| f.name.clone())
                        .collect(),
                ));
            }
        };
        log::debug!(
            "Resolved entity `{}` into table `{}` with {} columns",
            entity,
            table,
            fields.len()
        );
        Ok(Self {
            entity: entity.to_string(),
            table,
            fields,
            primary_key,
        })
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn primary_key(&self) -> &FieldDescriptor {
        &self.fields[self.primary_key]
    }

    pub fn primary_key_index(&self) -> usize {
        self.primary_key
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.foreign_key.is_some())
    }
}

fn resolve_field(entity: &str, raw: RawFieldDecl) -> Result<FieldDescriptor, ConfigError> {
    if raw.name.trim().is_empty() {
        return Err(ConfigError::EmptyFieldName(entity.to_string()));
    }
    let Some(column_type) = raw.column_type else {
        return Err(ConfigError::MissingColumnType(raw.name));
    };
    let column = match raw.column_name {
        Some(v) if !v.is_empty() => v,
        _ => raw.name.strip_prefix('_').unwrap_or(&raw.name).to_string(),
    };
    if column.is_empty() {
        return Err(ConfigError::EmptyFieldName(entity.to_string()));
    }
    let size = column_type.effective_size(raw.size);
    if size == Some(0) {
        return Err(ConfigError::ZeroSize(raw.name));
    }
    if let (Some(size), Some(max)) = (size, column_type.max_size()) {
        if size > max {
            return Err(ConfigError::SizeExceeded(raw.name, size, max));
        }
    }
    if size.is_none() && raw.size.is_some() {
        log::warn!(
            "Field `{}` declares a size but {} does not take one, the size is ignored",
            raw.name,
            column_type
        );
    }
    if let Some(default) = &raw.default {
        if !default.fits(column_type) {
            return Err(ConfigError::DefaultTypeMismatch(raw.name, column_type));
        }
    }
    Ok(FieldDescriptor {
        name: raw.name,
        column,
        host_type: raw.host_type,
        column_type,
        size,
        primary_key: raw.primary_key,
        unique: raw.unique,
        not_null: raw.not_null,
        default: raw.default,
        foreign_key: raw.foreign_key,
    })
}
