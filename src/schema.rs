//! Table definitions derived from declared fields, and the registration step
//! that provisions them.

use crate::error::{OrmError, Result};
use crate::field::{DataType, Field};
use crate::sqlite::SqliteConfig;

/// Name of the key column added when no field is declared primary key.
pub const SYNTHESIZED_ID: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey,
    AutoIncrement,
}

impl ColumnConstraint {
    fn sql(self) -> &'static str {
        match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::AutoIncrement => "AUTOINCREMENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn is_primary_key(&self) -> bool {
        self.constraints.contains(&ColumnConstraint::PrimaryKey)
    }

    /// Column clause as it appears inside `CREATE TABLE`.
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type);
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.sql());
        }
        sql
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// Derive the table for a record type.
    ///
    /// The table name is the lowercased type name. Fields keep their
    /// declaration order; an auto-incrementing `id` column goes first when
    /// none of them is a primary key.
    pub fn derive(type_name: &str, fields: &[Field]) -> Result<Self> {
        validate_identifier(type_name)?;
        for field in fields {
            validate_identifier(field.name())?;
        }

        let mut columns: Vec<ColumnDefinition> =
            fields.iter().map(Field::column_definition).collect();
        if !fields.iter().any(Field::is_primary_key) {
            columns.insert(
                0,
                ColumnDefinition {
                    name: SYNTHESIZED_ID.to_string(),
                    data_type: DataType::Integer,
                    constraints: vec![ColumnConstraint::PrimaryKey, ColumnConstraint::AutoIncrement],
                },
            );
        }

        Ok(Self {
            name: type_name.to_lowercase(),
            columns,
        })
    }

    /// Look up a column the way SQLite resolves names, ignoring ASCII case.
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn primary_key(&self) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.is_primary_key())
    }

    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ColumnDefinition::to_sql).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            columns.join(", ")
        )
    }

    /// Issue the `CREATE TABLE IF NOT EXISTS` statement on a fresh connection.
    pub fn create(&self, config: &SqliteConfig) -> Result<()> {
        let sql = self.create_sql();
        tracing::debug!(table = %self.name, sql = %sql, "creating table");
        let conn = config.connect()?;
        conn.execute(&sql, [])?;
        tracing::info!(table = %self.name, columns = self.columns.len(), "table registered");
        Ok(())
    }
}

/// Accept bare SQL identifiers only: `[A-Za-z_][A-Za-z0-9_]*`.
///
/// Reserved words such as `order` pass this check; SQLite rejects them when
/// the statement is prepared.
pub fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(OrmError::InvalidIdentifier(name.to_string()))
    }
}
