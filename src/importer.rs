use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cleanup::Cleanup;
use crate::error::{MigrateError, Result};
use crate::models::{ParsedData, RecordKind};
use crate::schema::{validate_rows, FieldValue, RawRow};

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Iif,
}

impl FileFormat {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Iif => "iif",
        }
    }

    pub fn from_key(key: &str) -> Result<FileFormat> {
        match key.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "iif" => Ok(Self::Iif),
            _ => Err(MigrateError::UnknownFormat(key.to_string())),
        }
    }

    /// Extension first (`.csv` / `.iif`), then the first non-blank line:
    /// a `!` tag means IIF, a comma means CSV.
    pub fn detect(path: Option<&Path>, text: &str) -> Option<FileFormat> {
        let ext = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("iif") => return Some(Self::Iif),
            Some("csv") => return Some(Self::Csv),
            _ => {}
        }
        let first = text.lines().find(|l| !l.trim().is_empty())?;
        if first.starts_with('!') {
            Some(Self::Iif)
        } else if first.contains(',') {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

/// How CSV lines are split into fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvSplitting {
    /// RFC 4180: commas inside quoted fields stay in the field.
    #[default]
    Quoted,
    /// Plain comma split, then one layer of surrounding quotes removed.
    Naive,
}

impl CsvSplitting {
    pub fn from_key(key: &str) -> Option<CsvSplitting> {
        match key.trim().to_lowercase().as_str() {
            "quoted" => Some(Self::Quoted),
            "naive" => Some(Self::Naive),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else if value == "\"" {
        ""
    } else {
        value
    }
}

fn split_naive(text: &str) -> Vec<Vec<String>> {
    let mut lines = text.split('\n').filter(|l| !l.trim().is_empty());
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let mut out = vec![header.split(',').map(|h| h.trim().to_string()).collect()];
    for line in lines {
        out.push(
            line.split(',')
                .map(|v| strip_quotes(v.trim()).to_string())
                .collect(),
        );
    }
    out
}

fn split_quoted(text: &str) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut out = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.position().is_some_and(|pos| is_blank_line(text, pos.byte())) {
            continue;
        }
        // A quote after leading whitespace is literal to the tokenizer.
        out.push(record.iter().map(|v| strip_quotes(v).to_string()).collect());
    }
    Ok(out)
}

/// Whether the source line starting at byte `start` is whitespace only.
fn is_blank_line(text: &str, start: u64) -> bool {
    let rest = usize::try_from(start)
        .ok()
        .and_then(|start| text.get(start..))
        .unwrap_or("");
    rest.split('\n').next().unwrap_or("").trim().is_empty()
}

/// Read a CSV export into rows keyed by the header line.
///
/// Every row carries every header; short lines are padded with empty
/// strings and surplus values are dropped. Columns are cleaned according to
/// [`Cleanup::for_header`]. Rows are not schema-checked here.
pub fn parse_csv(text: &str, kind: RecordKind, splitting: CsvSplitting) -> Result<Vec<RawRow>> {
    let lines = match splitting {
        CsvSplitting::Quoted => split_quoted(text)?,
        CsvSplitting::Naive => split_naive(text),
    };
    let mut lines = lines.into_iter();
    let Some(headers) = lines.next() else {
        debug!(kind = kind.key(), "empty CSV input");
        return Ok(Vec::new());
    };
    let cleanups: Vec<Option<Cleanup>> = headers.iter().map(|h| Cleanup::for_header(h)).collect();

    let rows: Vec<RawRow> = lines
        .map(|values| {
            headers
                .iter()
                .zip(&cleanups)
                .enumerate()
                .map(|(i, (header, cleanup))| {
                    let raw = values.get(i).map(String::as_str).unwrap_or("");
                    let value = match cleanup {
                        Some(c) => c.apply(raw),
                        None => FieldValue::Text(raw.to_string()),
                    };
                    (header.clone(), value)
                })
                .collect()
        })
        .collect();

    debug!(
        kind = kind.key(),
        columns = headers.len(),
        rows = rows.len(),
        "parsed CSV"
    );
    Ok(rows)
}

/// Best guess of the record kind from a CSV header line.
pub fn guess_csv_kind(text: &str) -> Option<RecordKind> {
    let header = text.lines().find(|l| !l.trim().is_empty())?;
    let cols: Vec<String> = header
        .split(',')
        .map(|h| strip_quotes(h.trim()).to_lowercase())
        .collect();
    let has = |name: &str| cols.iter().any(|c| c == name);

    if has("date") && has("type") && has("amount") {
        Some(RecordKind::Transactions)
    } else if has("itemtype") || has("item") {
        Some(RecordKind::Items)
    } else if has("accounttype") {
        Some(RecordKind::Accounts)
    } else if has("customer") {
        Some(RecordKind::Customers)
    } else if has("vendor") {
        Some(RecordKind::Vendors)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// IIF reader
// ---------------------------------------------------------------------------

/// Positional layout of one IIF section: (tab index, field name, cleanup).
pub struct SectionLayout {
    pub tag: &'static str,
    pub kind: RecordKind,
    pub columns: &'static [(usize, &'static str, Option<Cleanup>)],
}

pub const IIF_SECTIONS: &[SectionLayout] = &[
    SectionLayout {
        tag: "ACCNT",
        kind: RecordKind::Accounts,
        columns: &[
            (0, "Account", None),
            (1, "AccountType", None),
            (2, "Description", None),
            (3, "Balance", Some(Cleanup::Currency)),
        ],
    },
    SectionLayout {
        tag: "CUST",
        kind: RecordKind::Customers,
        columns: &[
            (0, "Customer", None),
            (1, "CompanyName", None),
            (2, "FirstName", None),
            (3, "LastName", None),
            (4, "Phone", Some(Cleanup::Phone)),
            (5, "Email", Some(Cleanup::Email)),
            (6, "Balance", Some(Cleanup::Currency)),
        ],
    },
    SectionLayout {
        tag: "VEND",
        kind: RecordKind::Vendors,
        columns: &[
            (0, "Vendor", None),
            (1, "CompanyName", None),
            (2, "FirstName", None),
            (3, "LastName", None),
            (4, "Phone", Some(Cleanup::Phone)),
            (5, "Email", Some(Cleanup::Email)),
            (6, "Balance", Some(Cleanup::Currency)),
        ],
    },
    SectionLayout {
        tag: "INVITEM",
        kind: RecordKind::Items,
        columns: &[
            (0, "Item", None),
            (1, "ItemType", None),
            (2, "Description", None),
            (3, "Rate", Some(Cleanup::Currency)),
            (4, "Cost", Some(Cleanup::Currency)),
            (5, "Account", None),
        ],
    },
    SectionLayout {
        tag: "TRNS",
        kind: RecordKind::Transactions,
        columns: &[
            (0, "Date", None),
            (1, "Type", None),
            (2, "Num", None),
            (3, "Customer", None),
            (4, "Vendor", None),
            (5, "Account", None),
            (6, "Memo", None),
            (7, "Amount", Some(Cleanup::Currency)),
        ],
    },
];

pub fn section_layout(tag: &str) -> Option<&'static SectionLayout> {
    IIF_SECTIONS.iter().find(|s| s.tag == tag)
}

fn map_iif_row(layout: &SectionLayout, line: &str) -> RawRow {
    let values: Vec<&str> = line.split('\t').collect();
    let mut row = RawRow::new();
    for &(index, field, cleanup) in layout.columns {
        let raw = values.get(index).copied();
        let value = match cleanup {
            // An empty or missing amount reads as zero.
            Some(Cleanup::Currency) => {
                Cleanup::Currency.apply(raw.filter(|v| !v.is_empty()).unwrap_or("0"))
            }
            Some(c) => c.apply(raw.unwrap_or("")),
            None => match raw {
                Some(v) => FieldValue::Text(v.to_string()),
                None => continue,
            },
        };
        row.insert(field.to_string(), value);
    }
    row
}

fn flush_section(tag: &str, pending: &mut Vec<RawRow>, data: &mut ParsedData) -> Result<()> {
    if pending.is_empty() {
        return Ok(());
    }
    let Some(layout) = section_layout(tag) else {
        pending.clear();
        return Ok(());
    };
    let records = validate_rows(layout.kind, pending)?;
    debug!(section = tag, rows = records.len(), "flushed IIF section");
    for record in records {
        data.push(record);
    }
    pending.clear();
    Ok(())
}

/// Read an IIF export into typed collections.
///
/// A `!TAG` line opens a section (anything after the first tab is column
/// headings and is ignored). Data lines are mapped positionally through
/// [`IIF_SECTIONS`]; sections without a layout are skipped. Any row that
/// fails its schema aborts the whole parse.
pub fn parse_iif(text: &str) -> Result<ParsedData> {
    let mut data = ParsedData::default();
    let mut section: Option<&str> = None;
    let mut pending: Vec<RawRow> = Vec::new();

    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('!') {
            if let Some(prev) = section {
                flush_section(prev, &mut pending, &mut data)?;
            }
            let tag = header.split('\t').next().unwrap_or("").trim();
            if section_layout(tag).is_none() {
                warn!(section = tag, "skipping unrecognized IIF section");
            }
            section = Some(tag);
            continue;
        }
        let Some(layout) = section.and_then(section_layout) else {
            continue;
        };
        pending.push(map_iif_row(layout, line));
    }
    if let Some(prev) = section {
        flush_section(prev, &mut pending, &mut data)?;
    }

    debug!(records = data.total_records(), "parsed IIF");
    Ok(data)
}
