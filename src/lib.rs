//! Declarative record schemas over SQLite.
//!
//! # Intention
//!
//! - Declare a record type as a list of typed fields and let the crate
//!   provision its table.
//! - Insert records and read rows back with plain `SELECT *` queries.
//!
//! # Architectural Boundaries
//!
//! - Every operation opens its own connection and runs one auto-committed
//!   statement. No pooling, no multi-statement transactions.
//! - No migrations, joins, updates or deletes.
//!
//! ```rust,no_run
//! use rust_sqlite_orm::{Field, Model, Query, SqliteConfig};
//!
//! # fn main() -> rust_sqlite_orm::Result<()> {
//! let config = SqliteConfig::new("people.db");
//! let person = Model::builder("Person")
//!     .field(Field::text("name"))
//!     .field(Field::integer("age"))
//!     .field(Field::real("score"))
//!     .register(&config)?;
//!
//! person
//!     .record()
//!     .with("name", "Ann")?
//!     .with("age", 30)?
//!     .with("score", 4.5)?
//!     .save()?;
//!
//! let rows = person.filter(&Query::new().with_condition("name", "Ann"))?;
//! # let _ = rows;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod field;
pub mod model;
pub mod schema;
pub mod sqlite;

pub use error::{OrmError, Result};
pub use field::{DataType, Field};
pub use model::{Model, ModelBuilder, Query, Record};
pub use schema::{ColumnConstraint, ColumnDefinition, TableDefinition};
pub use sqlite::{Row, SqliteConfig, Value, DEFAULT_DB_PATH};
