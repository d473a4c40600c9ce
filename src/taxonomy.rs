//! QuickBooks Desktop → QuickBooks Online type vocabularies.

/// Label reported for a legacy type with no mapping.
pub const UNMAPPED: &str = "Other";

pub const ACCOUNT_TYPE_MAP: &[(&str, &str)] = &[
    ("Bank", "Bank"),
    ("Accounts Receivable", "Accounts Receivable"),
    ("Other Current Asset", "Other Current Asset"),
    ("Fixed Asset", "Fixed Asset"),
    ("Other Asset", "Other Asset"),
    ("Accounts Payable", "Accounts Payable"),
    ("Credit Card", "Credit Card"),
    ("Other Current Liability", "Other Current Liability"),
    ("Long Term Liability", "Long Term Liability"),
    ("Equity", "Equity"),
    ("Income", "Income"),
    ("Other Income", "Other Income"),
    ("Cost of Goods Sold", "Cost of Goods Sold"),
    ("Expense", "Expense"),
    ("Other Expense", "Other Expense"),
];

pub const ITEM_TYPE_MAP: &[(&str, &str)] = &[
    ("Service", "Service"),
    ("Inventory Part", "Inventory"),
    ("Non-inventory Part", "Non-inventory"),
    ("Other Charge", "Other Charge"),
    ("Subtotal", "Subtotal"),
    ("Group", "Group"),
    ("Discount", "Discount"),
    ("Payment", "Payment"),
    ("Sales Tax Item", "Sales Tax Item"),
    ("Sales Tax Group", "Sales Tax Group"),
];

fn lookup(table: &'static [(&'static str, &'static str)], legacy: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == legacy)
        .map(|(_, to)| *to)
}

/// Exact, case-sensitive lookup.
pub fn map_account_type(legacy: &str) -> Option<&'static str> {
    lookup(ACCOUNT_TYPE_MAP, legacy)
}

pub fn map_item_type(legacy: &str) -> Option<&'static str> {
    lookup(ITEM_TYPE_MAP, legacy)
}

/// Distinct unmapped values in first-seen order.
pub fn unmapped<'a, I>(types: I, map: fn(&str) -> Option<&'static str>) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<&str> = Vec::new();
    for t in types {
        if map(t).is_none() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
