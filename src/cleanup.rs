//! Single-field normalizers applied while rows are read from an export.
//!
//! Every function here is total: bad input falls back to a neutral value
//! (unchanged text, `None`, or `0.0`) instead of failing the parse.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::FieldValue;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("valid number pattern")
});

/// Which normalizer a column goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleanup {
    AccountNumber,
    Phone,
    Email,
    Currency,
    CompanyName,
}

impl Cleanup {
    /// Header dispatch used by the CSV reader.
    pub fn for_header(header: &str) -> Option<Cleanup> {
        match header.to_lowercase().as_str() {
            "account" | "accountnumber" => Some(Self::AccountNumber),
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            "balance" | "rate" | "cost" | "amount" | "debit" | "credit" => Some(Self::Currency),
            "companyname" => Some(Self::CompanyName),
            _ => None,
        }
    }

    pub fn apply(&self, raw: &str) -> FieldValue {
        match self {
            Self::AccountNumber => FieldValue::Text(account_number(raw)),
            Self::Phone => FieldValue::Text(phone(raw)),
            Self::Email => email(raw).map_or(FieldValue::Null, FieldValue::Text),
            Self::Currency => FieldValue::Number(currency(raw)),
            Self::CompanyName => FieldValue::Text(company_name(raw)),
        }
    }
}

/// Keep letters, digits, hyphens and underscores.
pub fn account_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Ten-digit numbers become `(XXX) XXX-XXXX`; anything else is returned as-is.
pub fn phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        raw.to_string()
    }
}

pub fn email(raw: &str) -> Option<String> {
    EMAIL_RE.is_match(raw).then(|| raw.to_string())
}

/// Parse a money string such as `$1,234.56`. Unparseable input yields `0.0`.
pub fn currency(raw: &str) -> f64 {
    let stripped = raw.replace(['$', ','], "");
    let Some(m) = LEADING_NUMBER_RE.find(stripped.trim_start()) else {
        return 0.0;
    };
    match m.as_str().parse::<f64>() {
        Ok(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}

/// Currency cleanup over an already-read cell; numbers pass through untouched.
pub fn currency_value(value: &FieldValue) -> f64 {
    match value {
        FieldValue::Number(n) => *n,
        FieldValue::Text(s) => currency(s),
        FieldValue::Bool(_) | FieldValue::Null => 0.0,
    }
}

pub fn company_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
