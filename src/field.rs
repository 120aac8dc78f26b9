//! Field descriptors: one declared column of a record type.

use std::fmt;

use crate::schema::{ColumnConstraint, ColumnDefinition};
use crate::sqlite::Value;

/// SQL scalar types a field can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Integer,
    Text,
    Real,
}

impl DataType {
    pub fn sql_type(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
            DataType::Real => "REAL",
        }
    }

    /// Whether `value` is an instance of this type. `Null` never is.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (DataType::Integer, Value::Integer(_))
                | (DataType::Text, Value::Text(_))
                | (DataType::Real, Value::Real(_))
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_type())
    }
}

/// An immutable column declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    data_type: DataType,
    primary_key: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType, primary_key: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            primary_key,
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Integer, false)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Text, false)
    }

    pub fn real(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Real, false)
    }

    /// Mark this field as the table's primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Integer primary keys auto-increment; other primary keys are plain.
    pub fn column_definition(&self) -> ColumnDefinition {
        let constraints = match (self.primary_key, self.data_type) {
            (false, _) => Vec::new(),
            (true, DataType::Integer) => {
                vec![ColumnConstraint::PrimaryKey, ColumnConstraint::AutoIncrement]
            }
            (true, _) => vec![ColumnConstraint::PrimaryKey],
        };
        ColumnDefinition {
            name: self.name.clone(),
            data_type: self.data_type,
            constraints,
        }
    }
}
