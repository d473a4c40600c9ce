use comfy_table::{Cell, Table};

use qbmigrate::fmt::{money, opt_money};
use qbmigrate::models::{ContactInfo, ParsedData};
use qbmigrate::settings::load_settings;

use super::{load_input, InputArgs};

fn opt(val: &Option<String>) -> Cell {
    Cell::new(val.as_deref().unwrap_or(""))
}

fn print_section(title: &str, total: usize, limit: usize, table: Table) {
    if total == 0 {
        return;
    }
    println!("{title} ({total})\n{table}");
    if total > limit {
        println!("... {} more not shown", total - limit);
    }
}

fn contact_cells(name: &str, kind: &Option<String>, c: &ContactInfo) -> Vec<Cell> {
    vec![
        Cell::new(name),
        opt(kind),
        opt(&c.company_name),
        opt(&c.phone),
        opt(&c.email),
        Cell::new(opt_money(c.balance)),
    ]
}

fn print_data(data: &ParsedData, limit: usize) {
    let mut t = Table::new();
    t.set_header(vec!["Account", "Type", "Description", "Balance"]);
    for a in data.accounts.iter().take(limit) {
        t.add_row(vec![
            Cell::new(&a.name),
            Cell::new(&a.account_type),
            opt(&a.description),
            Cell::new(opt_money(a.balance)),
        ]);
    }
    print_section("Accounts", data.accounts.len(), limit, t);

    let mut t = Table::new();
    t.set_header(vec!["Customer", "Type", "Company", "Phone", "Email", "Balance"]);
    for c in data.customers.iter().take(limit) {
        t.add_row(contact_cells(&c.name, &c.customer_type, &c.contact));
    }
    print_section("Customers", data.customers.len(), limit, t);

    let mut t = Table::new();
    t.set_header(vec!["Vendor", "Type", "Company", "Phone", "Email", "Balance"]);
    for v in data.vendors.iter().take(limit) {
        t.add_row(contact_cells(&v.name, &v.vendor_type, &v.contact));
    }
    print_section("Vendors", data.vendors.len(), limit, t);

    let mut t = Table::new();
    t.set_header(vec!["Item", "Type", "Rate", "Cost", "Account"]);
    for i in data.items.iter().take(limit) {
        t.add_row(vec![
            Cell::new(&i.name),
            Cell::new(&i.item_type),
            Cell::new(opt_money(i.rate)),
            Cell::new(opt_money(i.cost)),
            opt(&i.account),
        ]);
    }
    print_section("Items", data.items.len(), limit, t);

    let mut t = Table::new();
    t.set_header(vec!["Date", "Type", "Num", "Name", "Account", "Amount"]);
    for txn in data.transactions.iter().take(limit) {
        let name = txn
            .customer
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(txn.vendor.as_deref())
            .unwrap_or("");
        t.add_row(vec![
            Cell::new(&txn.date),
            Cell::new(&txn.txn_type),
            opt(&txn.num),
            Cell::new(name),
            opt(&txn.account),
            Cell::new(money(txn.amount)),
        ]);
    }
    print_section("Transactions", data.transactions.len(), limit, t);
}

pub fn run(input: &InputArgs, limit: usize) -> anyhow::Result<()> {
    let data = load_input(input, &load_settings())?;
    if data.is_empty() {
        println!("No records found in {}", input.file.display());
        return Ok(());
    }
    print_data(&data, limit);
    Ok(())
}
