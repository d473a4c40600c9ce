use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Invalid {kind} row {row}: field '{field}' {reason}")]
    Schema {
        kind: &'static str,
        row: usize,
        field: &'static str,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown record kind: {0}")]
    UnknownKind(String),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl MigrateError {
    pub fn schema(kind: &'static str, row: usize, field: &'static str, reason: impl Into<String>) -> Self {
        Self::Schema {
            kind,
            row,
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_names_field_and_row() {
        let err = MigrateError::schema("account", 3, "AccountType", "is required");
        assert_eq!(err.to_string(), "Invalid account row 3: field 'AccountType' is required");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.iif");
        let err: MigrateError = io.into();
        assert!(matches!(err, MigrateError::Io(_)));
        assert!(err.to_string().contains("missing.iif"));
    }

    #[test]
    fn test_json_error_converts() {
        fn decode(raw: &str) -> Result<serde_json::Value> {
            Ok(serde_json::from_str(raw)?)
        }
        let err = decode("{not json").unwrap_err();
        assert!(matches!(err, MigrateError::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
