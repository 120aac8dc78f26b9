//! Registered record types and their instances.

use rusqlite::params_from_iter;

use crate::error::{OrmError, Result};
use crate::field::Field;
use crate::schema::TableDefinition;
use crate::sqlite::{Row, SqliteConfig, Value};

/// Collects field declarations for a record type until it is registered.
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    fields: Vec<Field>,
}

impl ModelBuilder {
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Derive the table and create it in `config`'s database if missing.
    ///
    /// # Errors
    ///
    /// `InvalidIdentifier` for names that are not bare SQL identifiers,
    /// `Sqlite` if the table cannot be created.
    pub fn register(self, config: &SqliteConfig) -> Result<Model> {
        let table = TableDefinition::derive(&self.name, &self.fields)?;
        table.create(config)?;
        Ok(Model {
            name: self.name,
            fields: self.fields,
            table,
            config: config.clone(),
        })
    }
}

/// A registered record type bound to its table.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    fields: Vec<Field>,
    table: TableDefinition,
    config: SqliteConfig,
}

impl Model {
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Type name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_name(&self) -> &str {
        &self.table.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Whether one of the declared fields is the primary key.
    pub fn has_primary_key(&self) -> bool {
        self.fields.iter().any(Field::is_primary_key)
    }

    /// Primary key column, the synthesized `id` included.
    pub fn primary_key(&self) -> Option<&str> {
        self.table.primary_key().map(|c| c.name.as_str())
    }

    /// All table columns in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.table.columns.iter().map(|c| c.name.as_str())
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    pub fn create_table_sql(&self) -> String {
        self.table.create_sql()
    }

    /// A new in-memory instance with every field set to `Null`.
    pub fn record(&self) -> Record<'_> {
        Record {
            model: self,
            values: vec![Value::Null; self.fields.len()],
        }
    }

    /// Every row in the table, in the database's natural order.
    pub fn all(&self) -> Result<Vec<Row>> {
        let sql = format!("SELECT * FROM {}", self.table.name);
        self.query(&sql, &[])
    }

    /// Rows matching every criterion in `query`.
    ///
    /// # Errors
    ///
    /// `EmptyFilter` if `query` has no criteria and `UnknownField` if one
    /// names a column the table does not have. Neither touches the database.
    pub fn filter(&self, query: &Query) -> Result<Vec<Row>> {
        if query.is_empty() {
            return Err(OrmError::EmptyFilter {
                table: self.table.name.clone(),
            });
        }
        for (column, _) in &query.conditions {
            if self.table.column(column).is_none() {
                return Err(self.unknown_field(column));
            }
        }

        let conditions: Vec<String> = query
            .conditions
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect();
        let sql = format!(
            "SELECT * FROM {} WHERE {}",
            self.table.name,
            conditions.join(" AND ")
        );
        let params: Vec<&Value> = query.conditions.iter().map(|(_, value)| value).collect();
        self.query(&sql, &params)
    }

    fn query(&self, sql: &str, params: &[&Value]) -> Result<Vec<Row>> {
        tracing::debug!(table = %self.table.name, sql = %sql, "querying");
        let conn = self.config.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let width = stmt.column_count();
        let mut rows = stmt.query(params_from_iter(params.iter()))?;

        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let values = (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Row>>()?;
            result.push(values);
        }
        tracing::debug!(table = %self.table.name, rows = result.len(), "query finished");
        Ok(result)
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == field)
    }

    fn unknown_field(&self, field: &str) -> OrmError {
        OrmError::UnknownField {
            table: self.table.name.clone(),
            field: field.to_string(),
        }
    }
}

/// A transient instance of a model holding one value per declared field.
#[derive(Debug, Clone)]
pub struct Record<'m> {
    model: &'m Model,
    values: Vec<Value>,
}

impl Record<'_> {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.model.position(field).map(|i| &self.values[i])
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<&mut Self> {
        let index = self
            .model
            .position(field)
            .ok_or_else(|| self.model.unknown_field(field))?;
        self.values[index] = value.into();
        Ok(self)
    }

    /// Chaining form of [`Record::set`].
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    /// Check every non-primary-key value against its declared type.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.model.fields.iter().zip(&self.values) {
            if !field.is_primary_key() && !field.data_type().accepts(value) {
                return Err(OrmError::TypeMismatch {
                    field: field.name().to_string(),
                    expected: field.data_type(),
                    actual: value.type_name(),
                });
            }
        }
        Ok(())
    }

    /// Validate, then insert this record as one new row.
    ///
    /// A `Null` primary key is passed through so SQLite assigns it.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let table = &self.model.table.name;
        let columns: Vec<&str> = self.model.fields.iter().map(Field::name).collect();
        let sql = if columns.is_empty() {
            // only the synthesized id
            format!("INSERT INTO {table} DEFAULT VALUES")
        } else {
            let placeholders = vec!["?"; columns.len()].join(", ");
            format!(
                "INSERT INTO {table} ({}) VALUES ({placeholders})",
                columns.join(", ")
            )
        };
        tracing::debug!(table = %table, sql = %sql, "inserting record");

        let conn = self.model.config.connect()?;
        conn.execute(&sql, params_from_iter(self.values.iter()))?;
        Ok(())
    }
}

/// Equality criteria for [`Model::filter`], joined with `AND`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    conditions: Vec<(String, Value)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_condition(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push((field.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
