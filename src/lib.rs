//! Parse QuickBooks Desktop exports (CSV and IIF), check them, and size up
//! the migration to a new ledger.
//!
//! ```no_run
//! use qbmigrate::{MigrationParser, RecordKind};
//!
//! let mut parser = MigrationParser::new();
//! parser.parse_iif(&std::fs::read_to_string("lists.iif")?)?;
//! parser.load_csv(&std::fs::read_to_string("customers.csv")?, RecordKind::Customers)?;
//! let report = parser.generate_migration_report();
//! println!("{} ({})", report.summary.estimated_migration_time, report.summary.complexity);
//! # Ok::<(), qbmigrate::MigrateError>(())
//! ```

pub mod cleanup;
pub mod error;
pub mod fmt;
pub mod importer;
pub mod models;
pub mod parser;
pub mod reports;
pub mod schema;
pub mod settings;
pub mod taxonomy;
pub mod validator;

pub use error::{MigrateError, Result};
pub use importer::{CsvSplitting, FileFormat};
pub use models::{Account, Customer, Item, ParsedData, Record, RecordKind, Transaction, Vendor};
pub use parser::{parse, MigrationParser, ParseOptions};
pub use reports::{Complexity, MigrationReport};
pub use schema::{FieldValue, RawRow};
pub use validator::ValidationResult;
