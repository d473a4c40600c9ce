use comfy_table::{Cell, Table};

use qbmigrate::taxonomy::{ACCOUNT_TYPE_MAP, ITEM_TYPE_MAP, UNMAPPED};

fn mapping_table(rows: &[(&str, &str)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["QuickBooks Desktop", "Target"]);
    for (from, to) in rows {
        table.add_row(vec![Cell::new(from), Cell::new(to)]);
    }
    table
}

pub fn run() -> anyhow::Result<()> {
    println!("Account Types\n{}", mapping_table(ACCOUNT_TYPE_MAP));
    println!("\nItem Types\n{}", mapping_table(ITEM_TYPE_MAP));
    println!("\nAnything else is reported as '{UNMAPPED}' and listed for review.");
    Ok(())
}
