use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{MigrateError, Result};
use crate::importer::{self, CsvSplitting, FileFormat};
use crate::models::{ParsedData, RecordKind};
use crate::reports::{generate_report, MigrationReport};
use crate::schema::{validate_rows, RawRow};
use crate::validator::{validate, ValidationResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub csv_splitting: CsvSplitting,
    pub company_name: String,
    pub fiscal_year_start: String,
}

fn checksum(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

fn resolve_kind(text: &str, kind: Option<RecordKind>) -> Result<RecordKind> {
    kind.or_else(|| importer::guess_csv_kind(text)).ok_or_else(|| {
        MigrateError::UnknownKind("could not infer record kind from CSV headers".to_string())
    })
}

fn parse_csv_records(text: &str, kind: RecordKind, options: &ParseOptions) -> Result<ParsedData> {
    let rows = importer::parse_csv(text, kind, options.csv_splitting)?;
    let mut data = ParsedData::default();
    for record in validate_rows(kind, &rows)? {
        data.push(record);
    }
    Ok(data)
}

/// One-shot parse of a whole export.
///
/// `kind` only matters for CSV, where a file holds a single record kind; when
/// omitted it is inferred from the header line.
pub fn parse(
    text: &str,
    format: FileFormat,
    kind: Option<RecordKind>,
    options: &ParseOptions,
) -> Result<ParsedData> {
    let mut data = match format {
        FileFormat::Csv => parse_csv_records(text, resolve_kind(text, kind)?, options)?,
        FileFormat::Iif => importer::parse_iif(text)?,
    };
    data.metadata.company_name = options.company_name.clone();
    data.metadata.fiscal_year_start = options.fiscal_year_start.clone();
    data.metadata.data_size = text.len();
    data.metadata.checksum = Some(checksum(text));
    debug!(
        format = format.key(),
        bytes = text.len(),
        records = data.total_records(),
        "parsed export"
    );
    Ok(data)
}

/// Accumulates records from several exports (for instance one CSV per list)
/// and reports over all of them.
///
/// A failed load leaves previously accumulated data untouched.
#[derive(Debug, Default)]
pub struct MigrationParser {
    options: ParseOptions,
    data: ParsedData,
}

impl MigrationParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        let mut parser = Self {
            options,
            data: ParsedData::default(),
        };
        parser.reset();
        parser
    }

    /// Rows keyed by header, cleaned but not schema-checked. Does not touch
    /// accumulated data.
    pub fn parse_csv(&self, text: &str, kind: RecordKind) -> Result<Vec<RawRow>> {
        importer::parse_csv(text, kind, self.options.csv_splitting)
    }

    /// Parse, schema-check and accumulate a CSV export. Returns the number of
    /// records added.
    pub fn load_csv(&mut self, text: &str, kind: RecordKind) -> Result<usize> {
        let parsed = parse(text, FileFormat::Csv, Some(kind), &self.options)?;
        let added = parsed.total_records();
        self.absorb(parsed);
        Ok(added)
    }

    pub fn parse_iif(&mut self, text: &str) -> Result<&ParsedData> {
        let parsed = parse(text, FileFormat::Iif, None, &self.options)?;
        self.absorb(parsed);
        Ok(&self.data)
    }

    fn absorb(&mut self, parsed: ParsedData) {
        self.data.metadata.data_size += parsed.metadata.data_size;
        self.data.metadata.checksum = parsed.metadata.checksum.clone();
        self.data.append(parsed);
    }

    pub fn validate_data(&self) -> ValidationResult {
        validate(&self.data)
    }

    pub fn generate_migration_report(&self) -> MigrationReport {
        generate_report(&self.data)
    }

    pub fn data(&self) -> &ParsedData {
        &self.data
    }

    pub fn reset(&mut self) {
        let mut data = ParsedData::default();
        data.metadata.company_name = self.options.company_name.clone();
        data.metadata.fiscal_year_start = self.options.fiscal_year_start.clone();
        self.data = data;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::Complexity;

    #[test]
    fn test_csv_scenario_feeds_report() {
        let mut parser = MigrationParser::new();
        let rows = parser.parse_csv("Account,AccountType\nCash,Bank\n", RecordKind::Accounts).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(parser.data().is_empty());

        let added = parser.load_csv("Account,AccountType\nCash,Bank\n", RecordKind::Accounts).unwrap();
        assert_eq!(added, 1);
        assert_eq!(parser.data().accounts[0].name, "Cash");
        assert_eq!(parser.data().accounts[0].account_type, "Bank");

        let report = parser.generate_migration_report();
        assert_eq!(report.summary.total_records.accounts, 1);
        assert_eq!(report.summary.complexity, Complexity::Low);
    }

    #[test]
    fn test_iif_then_validate() {
        let mut parser = MigrationParser::new();
        parser
            .parse_iif("!ACCNT\nCash\tBank\nCash\tOther Current Asset\n")
            .unwrap();
        let result = parser.validate_data();
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("Cash")));
    }

    #[test]
    fn test_loads_accumulate_until_reset() {
        let mut parser = MigrationParser::with_options(ParseOptions {
            company_name: "Acme".to_string(),
            ..Default::default()
        });
        parser.parse_iif("!ACCNT\nCash\tBank\n").unwrap();
        parser.load_csv("Customer,Email\nJane,jane@x.com\n", RecordKind::Customers).unwrap();
        assert_eq!(parser.data().total_records(), 2);
        assert_eq!(parser.data().metadata.record_counts.customers, 1);
        assert!(parser.data().metadata.data_size > 0);
        assert_eq!(parser.data().metadata.company_name, "Acme");

        parser.reset();
        assert!(parser.data().is_empty());
        assert_eq!(parser.data().metadata.data_size, 0);
        assert_eq!(parser.data().metadata.checksum, None);
        assert_eq!(parser.data().metadata.company_name, "Acme");
    }

    #[test]
    fn test_failed_load_keeps_existing_data() {
        let mut parser = MigrationParser::new();
        parser.parse_iif("!ACCNT\nCash\tBank\n").unwrap();
        assert!(parser.parse_iif("!INVITEM\nWidget\n").is_err());
        assert_eq!(parser.data().total_records(), 1);
    }

    #[test]
    fn test_parse_infers_csv_kind() {
        let data = parse(
            "Vendor,Phone\nAcme,5551234567\n",
            FileFormat::Csv,
            None,
            &ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(data.vendors.len(), 1);
        assert_eq!(data.vendors[0].contact.phone.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_parse_unknown_csv_kind() {
        let err = parse("Foo,Bar\n1,2\n", FileFormat::Csv, None, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, MigrateError::UnknownKind(_)));
    }

    #[test]
    fn test_parse_records_checksum() {
        let text = "!ACCNT\nCash\tBank\n";
        let a = parse(text, FileFormat::Iif, None, &ParseOptions::default()).unwrap();
        let b = parse(text, FileFormat::Iif, None, &ParseOptions::default()).unwrap();
        assert_eq!(a.metadata.checksum, b.metadata.checksum);
        assert_eq!(a.metadata.checksum.as_ref().map(String::len), Some(64));
        assert_eq!(a.metadata.data_size, text.len());
    }

    #[test]
    fn test_csv_schema_failure_is_strict() {
        let mut parser = MigrationParser::new();
        let err = parser
            .load_csv("Date,Type,Amount\n01/02/2025,,\n", RecordKind::Accounts)
            .unwrap_err();
        assert!(matches!(err, MigrateError::Schema { .. }));
        assert!(parser.data().is_empty());
    }
}
