use crate::{
    Action, Binding, DefaultValue, EntitySchema, FieldDescriptor, ForeignKeyRef, Operation,
    ParamSource, Statement, separated_by,
};

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($out:ident, $value:expr) => {{
        let mut buffer = ryu::Buffer::new();
        $out.push_str(buffer.format_finite($value));
    }};
}

/// Renders the SQL text of DDL and CRUD statements for an [`EntitySchema`].
///
/// Every method has a default implementation producing the fixed dialect
/// (backtick quoted identifiers, `?` placeholders), implementors override
/// single fragments to adjust it. Statement methods append to `out` and push
/// one [`Binding`] per placeholder written, so the binding order is by
/// construction the placeholder order.
pub trait SqlWriter {
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('`');
        self.write_escaped(out, value, '`', "``");
        out.push('`');
    }

    fn write_value_string(&self, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(out, value, '\'', "''");
        out.push('\'');
    }

    fn write_placeholder(&self, out: &mut String, bindings: &mut Vec<Binding>, binding: Binding) {
        out.push('?');
        bindings.push(binding);
    }

    fn write_column_type(&self, out: &mut String, field: &FieldDescriptor) {
        out.push_str(field.column_type.sql_name());
        if let Some(size) = field.size {
            out.push('(');
            write_integer!(out, size);
            out.push(')');
        }
    }

    fn write_default_value(&self, out: &mut String, value: &DefaultValue) {
        match value {
            DefaultValue::Int(v) => write_integer!(out, *v),
            DefaultValue::Long(v) => write_integer!(out, *v),
            DefaultValue::Short(v) => write_integer!(out, *v),
            DefaultValue::Float(v) => write_float!(out, *v),
            DefaultValue::Double(v) => write_float!(out, *v),
            DefaultValue::Bool(v) => out.push_str(if *v { "TRUE" } else { "FALSE" }),
            DefaultValue::String(v) => self.write_value_string(out, v),
        }
    }

    fn write_references_action(&self, out: &mut String, keyword: &str, action: Action) {
        if let Some(action) = action.sql() {
            out.push(' ');
            out.push_str(keyword);
            out.push(' ');
            out.push_str(action);
        }
    }

    /// Emit CREATE TABLE statement.
    fn write_create_table(&self, out: &mut String, schema: &EntitySchema, if_not_exists: bool) {
        out.reserve(32 + schema.fields().len() * 48);
        out.push_str("CREATE TABLE ");
        if if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        self.write_identifier_quoted(out, schema.table());
        out.push_str(" (");
        let foreign_keys = schema
            .foreign_keys()
            .filter_map(|f| f.foreign_key.as_ref().map(|r| (f, r)));
        separated_by(
            out,
            schema
                .fields()
                .iter()
                .map(Clause::Column)
                .chain(foreign_keys.map(|(f, r)| Clause::ForeignKey(f, r))),
            |out, clause| {
                match clause {
                    Clause::Column(field) => self.write_create_table_column_fragment(out, field),
                    Clause::ForeignKey(field, reference) => {
                        self.write_create_table_foreign_key_fragment(out, field, reference)
                    }
                }
                out.push(' ');
            },
            ", ",
        );
        out.push(')');
    }

    /// Emit single column definition, constraints in the order PRIMARY KEY, UNIQUE, NOT NULL, DEFAULT.
    fn write_create_table_column_fragment(&self, out: &mut String, field: &FieldDescriptor) {
        self.write_identifier_quoted(out, &field.column);
        out.push(' ');
        self.write_column_type(out, field);
        if field.primary_key {
            out.push_str(" PRIMARY KEY");
        }
        if field.unique {
            out.push_str(" UNIQUE");
        }
        if field.not_null {
            out.push_str(" NOT NULL");
        }
        if let Some(default) = &field.default {
            out.push_str(" DEFAULT ");
            self.write_default_value(out, default);
        }
    }

    fn write_create_table_foreign_key_fragment(
        &self,
        out: &mut String,
        field: &FieldDescriptor,
        reference: &ForeignKeyRef,
    ) {
        out.push_str("FOREIGN KEY (");
        self.write_identifier_quoted(out, &field.column);
        out.push_str(") REFERENCES ");
        self.write_identifier_quoted(out, &reference.table);
        out.push('(');
        self.write_identifier_quoted(out, &reference.column);
        out.push(')');
        self.write_references_action(out, "ON DELETE", reference.on_delete);
        self.write_references_action(out, "ON UPDATE", reference.on_update);
    }

    /// Emit DROP TABLE statement.
    fn write_drop_table(&self, out: &mut String, schema: &EntitySchema, if_exists: bool) {
        out.push_str("DROP TABLE ");
        if if_exists {
            out.push_str("IF EXISTS ");
        }
        self.write_identifier_quoted(out, schema.table());
    }

    /// Emit INSERT statement, the primary key is left to the store.
    fn write_insert(&self, out: &mut String, bindings: &mut Vec<Binding>, schema: &EntitySchema) {
        let columns = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.primary_key);
        out.push_str("INSERT INTO ");
        self.write_identifier_quoted(out, schema.table());
        out.push_str(" (");
        separated_by(
            out,
            columns.clone(),
            |out, (_, f)| self.write_identifier_quoted(out, &f.column),
            ", ",
        );
        out.push_str(") VALUES (");
        separated_by(
            out,
            columns,
            |out, (i, f)| {
                self.write_placeholder(
                    out,
                    bindings,
                    Binding {
                        column: f.column.clone(),
                        source: ParamSource::Field(i),
                    },
                )
            },
            ", ",
        );
        out.push(')');
    }

    /// Emit SELECT statement, filtered by primary key when `key` is given.
    fn write_select(
        &self,
        out: &mut String,
        bindings: &mut Vec<Binding>,
        schema: &EntitySchema,
        key: Option<ParamSource>,
    ) {
        out.push_str("SELECT ");
        separated_by(
            out,
            schema.fields(),
            |out, f| self.write_identifier_quoted(out, &f.column),
            ", ",
        );
        out.push_str(" FROM ");
        self.write_identifier_quoted(out, schema.table());
        if let Some(source) = key {
            self.write_where_primary_key(out, bindings, schema, source);
        }
    }

    /// Emit UPDATE statement assigning every column, primary key included.
    fn write_update(&self, out: &mut String, bindings: &mut Vec<Binding>, schema: &EntitySchema) {
        out.push_str("UPDATE ");
        self.write_identifier_quoted(out, schema.table());
        out.push_str(" SET ");
        separated_by(
            out,
            schema.fields().iter().enumerate(),
            |out, (i, f)| {
                self.write_identifier_quoted(out, &f.column);
                out.push_str(" = ");
                self.write_placeholder(
                    out,
                    bindings,
                    Binding {
                        column: f.column.clone(),
                        source: ParamSource::Field(i),
                    },
                );
            },
            ", ",
        );
        self.write_where_primary_key(
            out,
            bindings,
            schema,
            ParamSource::Field(schema.primary_key_index()),
        );
    }

    /// Emit DELETE statement.
    fn write_delete(
        &self,
        out: &mut String,
        bindings: &mut Vec<Binding>,
        schema: &EntitySchema,
        key: ParamSource,
    ) {
        out.push_str("DELETE FROM ");
        self.write_identifier_quoted(out, schema.table());
        self.write_where_primary_key(out, bindings, schema, key);
    }

    fn write_where_primary_key(
        &self,
        out: &mut String,
        bindings: &mut Vec<Binding>,
        schema: &EntitySchema,
        source: ParamSource,
    ) {
        let primary_key = schema.primary_key();
        out.push_str(" WHERE ");
        self.write_identifier_quoted(out, &primary_key.column);
        out.push_str(" = ");
        self.write_placeholder(
            out,
            bindings,
            Binding {
                column: primary_key.column.clone(),
                source,
            },
        );
    }

    /// Build the statement implementing `operation`.
    fn statement(&self, schema: &EntitySchema, operation: Operation) -> Statement {
        let mut sql = String::with_capacity(64 + schema.fields().len() * 24);
        let mut bindings = Vec::with_capacity(schema.fields().len() + 1);
        let self_key = ParamSource::Field(schema.primary_key_index());
        match operation {
            Operation::Insert => self.write_insert(&mut sql, &mut bindings, schema),
            Operation::SelectByKey => {
                self.write_select(&mut sql, &mut bindings, schema, Some(ParamSource::Key))
            }
            Operation::SelectSelf => {
                self.write_select(&mut sql, &mut bindings, schema, Some(self_key))
            }
            Operation::SelectAll => self.write_select(&mut sql, &mut bindings, schema, None),
            Operation::Update => self.write_update(&mut sql, &mut bindings, schema),
            Operation::DeleteByKey => {
                self.write_delete(&mut sql, &mut bindings, schema, ParamSource::Key)
            }
            Operation::DeleteSelf => self.write_delete(&mut sql, &mut bindings, schema, self_key),
        }
        Statement {
            operation,
            sql,
            bindings,
        }
    }
}

enum Clause<'a> {
    Column(&'a FieldDescriptor),
    ForeignKey(&'a FieldDescriptor, &'a ForeignKeyRef),
}

/// The fixed SQL vocabulary: backtick quoted identifiers and `?` placeholders.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {}
