use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::models::{ContactInfo, ParsedData, RecordCounts};
use crate::taxonomy::{self, UNMAPPED};
use crate::validator::{validate, ValidationResult};

// ---------------------------------------------------------------------------
// Banding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(s)
    }
}

pub fn estimate_migration_time(total_records: usize) -> &'static str {
    match total_records {
        0..=999 => "30-60 minutes",
        1000..=4999 => "1-2 hours",
        5000..=9999 => "2-4 hours",
        _ => "4+ hours",
    }
}

pub fn assess_complexity(total_records: usize) -> Complexity {
    match total_records {
        0..=499 => Complexity::Low,
        500..=1999 => Complexity::Medium,
        _ => Complexity::High,
    }
}

// ---------------------------------------------------------------------------
// Report shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataIntegrity {
    pub is_valid: bool,
    pub error_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_records: RecordCounts,
    pub data_integrity: DataIntegrity,
    pub estimated_migration_time: &'static str,
    pub complexity: Complexity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeMapping {
    pub original: String,
    pub mapped: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDetail {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub mapped_types: Vec<TypeMapping>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetail {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub with_email: usize,
    pub with_phone: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Details {
    pub accounts: TypedDetail,
    pub customers: ContactDetail,
    pub vendors: ContactDetail,
    pub items: TypedDetail,
    pub transactions: TransactionDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub summary: Summary,
    pub details: Details,
    pub errors: Vec<String>,
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Count by group key; missing or empty keys land under "Unknown".
fn group_by<'a>(keys: impl Iterator<Item = Option<&'a str>>) -> BTreeMap<String, usize> {
    let mut groups = BTreeMap::new();
    for key in keys {
        let key = key.filter(|k| !k.is_empty()).unwrap_or("Unknown");
        *groups.entry(key.to_string()).or_insert(0) += 1;
    }
    groups
}

fn typed_detail<'a>(
    types: impl Iterator<Item = &'a str> + Clone,
    map: fn(&str) -> Option<&'static str>,
) -> TypedDetail {
    TypedDetail {
        total: types.clone().count(),
        by_type: group_by(types.clone().map(Some)),
        mapped_types: types
            .map(|t| TypeMapping {
                original: t.to_string(),
                mapped: map(t).unwrap_or(UNMAPPED).to_string(),
            })
            .collect(),
    }
}

fn contact_detail<'a>(records: impl Iterator<Item = (Option<&'a str>, &'a ContactInfo)> + Clone) -> ContactDetail {
    ContactDetail {
        total: records.clone().count(),
        by_type: group_by(records.clone().map(|(t, _)| t)),
        with_email: records.clone().filter(|(_, c)| c.has_email()).count(),
        with_phone: records.filter(|(_, c)| c.has_phone()).count(),
    }
}

/// QuickBooks writes `MM/DD/YYYY`; some exports use ISO dates.
pub fn parse_export_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    ["%m/%d/%Y", "%Y-%m-%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn transaction_detail(data: &ParsedData) -> TransactionDetail {
    let txns = &data.transactions;
    let dates: Vec<NaiveDate> = txns.iter().filter_map(|t| parse_export_date(&t.date)).collect();
    let date_range = match (dates.iter().min(), dates.iter().max()) {
        (Some(start), Some(end)) => Some(DateRange {
            start: start.format("%Y-%m-%d").to_string(),
            end: end.format("%Y-%m-%d").to_string(),
        }),
        _ => None,
    };
    TransactionDetail {
        total: txns.len(),
        by_type: group_by(txns.iter().map(|t| Some(t.txn_type.as_str()))),
        total_amount: txns.iter().map(|t| t.amount).sum(),
        date_range,
    }
}

fn recommendations(data: &ParsedData) -> Vec<String> {
    let mut out = Vec::new();

    let customers_without_email = data.customers.iter().filter(|c| !c.contact.has_email()).count();
    if customers_without_email > 0 {
        out.push(format!(
            "Consider adding email addresses for {customers_without_email} customers for better communication"
        ));
    }
    let vendors_without_email = data.vendors.iter().filter(|v| !v.contact.has_email()).count();
    if vendors_without_email > 0 {
        out.push(format!(
            "Consider adding email addresses for {vendors_without_email} vendors for better communication"
        ));
    }

    let unmapped_accounts = taxonomy::unmapped(
        data.accounts.iter().map(|a| a.account_type.as_str()),
        taxonomy::map_account_type,
    );
    if !unmapped_accounts.is_empty() {
        out.push(format!(
            "Review account type mapping for: {}",
            unmapped_accounts.join(", ")
        ));
    }
    let unmapped_items = taxonomy::unmapped(
        data.items.iter().map(|i| i.item_type.as_str()),
        taxonomy::map_item_type,
    );
    if !unmapped_items.is_empty() {
        out.push(format!("Review item type mapping for: {}", unmapped_items.join(", ")));
    }

    out
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

pub fn generate_report(data: &ParsedData) -> MigrationReport {
    let ValidationResult { is_valid, errors } = validate(data);
    let counts = data.record_counts();
    let total = counts.total();

    let report = MigrationReport {
        summary: Summary {
            total_records: counts,
            data_integrity: DataIntegrity {
                is_valid,
                error_count: errors.len(),
            },
            estimated_migration_time: estimate_migration_time(total),
            complexity: assess_complexity(total),
        },
        details: Details {
            accounts: typed_detail(
                data.accounts.iter().map(|a| a.account_type.as_str()),
                taxonomy::map_account_type,
            ),
            customers: contact_detail(
                data.customers
                    .iter()
                    .map(|c| (c.customer_type.as_deref(), &c.contact)),
            ),
            vendors: contact_detail(
                data.vendors
                    .iter()
                    .map(|v| (v.vendor_type.as_deref(), &v.contact)),
            ),
            items: typed_detail(
                data.items.iter().map(|i| i.item_type.as_str()),
                taxonomy::map_item_type,
            ),
            transactions: transaction_detail(data),
        },
        errors,
        recommendations: recommendations(data),
    };

    info!(
        total_records = total,
        complexity = %report.summary.complexity,
        errors = report.summary.data_integrity.error_count,
        "generated migration report"
    );
    report
}
