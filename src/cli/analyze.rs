use colored::Colorize;
use comfy_table::{Cell, Table};
use serde::Serialize;

use qbmigrate::fmt::{bullet, money};
use qbmigrate::models::{Metadata, ALL_KINDS};
use qbmigrate::reports::{generate_report, Complexity, MigrationReport, TypedDetail};
use qbmigrate::settings::{load_settings, OutputMode};
use qbmigrate::taxonomy::UNMAPPED;

use super::{load_input, InputArgs};

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    metadata: &'a Metadata,
    #[serde(flatten)]
    report: &'a MigrationReport,
}

fn mapped_label<'a>(detail: &'a TypedDetail, legacy: &str) -> &'a str {
    detail
        .mapped_types
        .iter()
        .find(|m| m.original == legacy)
        .map_or(UNMAPPED, |m| m.mapped.as_str())
}

fn type_table(title: &str, detail: &TypedDetail) -> Option<String> {
    if detail.total == 0 {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec!["Legacy Type", "Count", "Maps To"]);
    for (legacy, count) in &detail.by_type {
        let mapped = mapped_label(detail, legacy);
        let mapped_cell = if mapped == UNMAPPED {
            Cell::new(mapped.yellow())
        } else {
            Cell::new(mapped)
        };
        table.add_row(vec![Cell::new(legacy), Cell::new(count), mapped_cell]);
    }
    Some(format!("{title}\n{table}"))
}

pub fn run(input: &InputArgs, json: bool) -> anyhow::Result<()> {
    let settings = load_settings();
    let data = load_input(input, &settings)?;
    let report = generate_report(&data);

    if json || settings.output == OutputMode::Json {
        let out = AnalyzeOutput {
            metadata: &data.metadata,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let summary = &report.summary;
    let mut table = Table::new();
    table.set_header(vec!["Records", "Count"]);
    for kind in ALL_KINDS {
        table.add_row(vec![Cell::new(kind.key()), Cell::new(summary.total_records.get(*kind))]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(summary.total_records.total()),
    ]);
    let title = if data.metadata.company_name.is_empty() {
        "Migration Summary".to_string()
    } else {
        format!("Migration Summary: {}", data.metadata.company_name)
    };
    println!("{title}\n{table}");

    let complexity = match summary.complexity {
        Complexity::Low => "Low".green().bold(),
        Complexity::Medium => "Medium".yellow().bold(),
        Complexity::High => "High".red().bold(),
    };
    println!("Estimated time: {}", summary.estimated_migration_time);
    println!("Complexity:     {complexity}");
    if summary.data_integrity.is_valid {
        println!("Integrity:      {}", "OK".green());
    } else {
        println!(
            "Integrity:      {}",
            format!("{} problems", summary.data_integrity.error_count).red()
        );
    }

    if let Some(t) = type_table("\nAccount Types", &report.details.accounts) {
        println!("{t}");
    }
    if let Some(t) = type_table("\nItem Types", &report.details.items) {
        println!("{t}");
    }

    let contacts = [
        ("customers", &report.details.customers),
        ("vendors", &report.details.vendors),
    ];
    if contacts.iter().any(|(_, d)| d.total > 0) {
        let mut ct = Table::new();
        ct.set_header(vec!["List", "Total", "With Email", "With Phone"]);
        for (name, d) in contacts {
            ct.add_row(vec![
                Cell::new(name),
                Cell::new(d.total),
                Cell::new(d.with_email),
                Cell::new(d.with_phone),
            ]);
        }
        println!("\nContacts\n{ct}");
    }

    let txns = &report.details.transactions;
    if txns.total > 0 {
        let mut tt = Table::new();
        tt.set_header(vec!["Type", "Count"]);
        for (t, count) in &txns.by_type {
            tt.add_row(vec![Cell::new(t), Cell::new(count)]);
        }
        tt.add_row(vec![Cell::new("Net amount".bold()), Cell::new(money(txns.total_amount))]);
        println!("\nTransactions\n{tt}");
        if let Some(range) = &txns.date_range {
            println!("Dated {} to {}", range.start, range.end);
        }
    }

    if !report.errors.is_empty() {
        println!("\n{}", "Errors".red().bold());
        for e in &report.errors {
            println!("{}", bullet(e, 78));
        }
    }
    if !report.recommendations.is_empty() {
        println!("\n{}", "Recommendations".bold());
        for r in &report.recommendations {
            println!("{}", bullet(r, 78));
        }
    }
    Ok(())
}
