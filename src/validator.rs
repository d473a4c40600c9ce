use std::collections::HashSet;

use serde::Serialize;

use crate::models::ParsedData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Every occurrence of a name after its first, in encounter order.
fn repeated_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut repeats = Vec::new();
    for name in names {
        if !seen.insert(name) {
            repeats.push(name);
        }
    }
    repeats
}

fn push_duplicates<'a>(errors: &mut Vec<String>, label: &str, names: impl Iterator<Item = &'a str>) {
    let repeats = repeated_names(names);
    if !repeats.is_empty() {
        errors.push(format!("Duplicate {label} names: {}", repeats.join(", ")));
    }
}

/// Integrity pass over already schema-checked collections. Never fails;
/// problems are collected as messages.
pub fn validate(data: &ParsedData) -> ValidationResult {
    let mut errors = Vec::new();

    for (i, account) in data.accounts.iter().enumerate() {
        if account.name.is_empty() {
            errors.push(format!("Account {}: Missing account name", i + 1));
        }
        if account.account_type.is_empty() {
            errors.push(format!("Account {}: Missing account type", i + 1));
        }
    }
    for (i, customer) in data.customers.iter().enumerate() {
        if customer.name.is_empty() {
            errors.push(format!("Customer {}: Missing customer name", i + 1));
        }
    }
    for (i, vendor) in data.vendors.iter().enumerate() {
        if vendor.name.is_empty() {
            errors.push(format!("Vendor {}: Missing vendor name", i + 1));
        }
    }
    for (i, item) in data.items.iter().enumerate() {
        if item.name.is_empty() {
            errors.push(format!("Item {}: Missing item name", i + 1));
        }
        if item.item_type.is_empty() {
            errors.push(format!("Item {}: Missing item type", i + 1));
        }
    }

    push_duplicates(&mut errors, "account", data.accounts.iter().map(|a| a.name.as_str()));
    push_duplicates(&mut errors, "customer", data.customers.iter().map(|c| c.name.as_str()));
    push_duplicates(&mut errors, "vendor", data.vendors.iter().map(|v| v.name.as_str()));

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, ContactInfo, Customer, Item, Vendor};

    fn account(name: &str, account_type: &str) -> Account {
        Account {
            name: name.to_string(),
            account_type: account_type.to_string(),
            description: None,
            balance: None,
            account_number: None,
            tax_line: None,
            active: None,
        }
    }

    fn customer(name: &str) -> Customer {
        Customer {
            name: name.to_string(),
            customer_type: None,
            contact: ContactInfo::default(),
        }
    }

    fn vendor(name: &str) -> Vendor {
        Vendor {
            name: name.to_string(),
            vendor_type: None,
            contact: ContactInfo::default(),
        }
    }

    #[test]
    fn test_clean_data_is_valid() {
        let data = ParsedData {
            accounts: vec![account("Cash", "Bank"), account("Sales", "Income")],
            customers: vec![customer("Jane")],
            ..Default::default()
        };
        let result = validate(&data);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_empty_data_is_valid() {
        assert!(validate(&ParsedData::default()).is_valid);
    }

    #[test]
    fn test_duplicate_account_names() {
        let data = ParsedData {
            accounts: vec![account("Cash", "Bank"), account("Cash", "Other Current Asset")],
            ..Default::default()
        };
        let result = validate(&data);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Duplicate account names: Cash".to_string()]);
    }

    #[test]
    fn test_duplicates_listed_per_extra_occurrence() {
        let data = ParsedData {
            customers: vec![customer("A"), customer("B"), customer("A"), customer("A"), customer("B")],
            ..Default::default()
        };
        let result = validate(&data);
        assert_eq!(result.errors, vec!["Duplicate customer names: A, A, B".to_string()]);
    }

    #[test]
    fn test_repeated_names_keep_encounter_order() {
        let mut names: Vec<String> = (0..5000).map(|i| format!("Customer {i}")).collect();
        names.push("Customer 42".to_string());
        names.push("Customer 7".to_string());
        names.push("Customer 42".to_string());
        let repeats = repeated_names(names.iter().map(String::as_str));
        assert_eq!(repeats, vec!["Customer 42", "Customer 7", "Customer 42"]);
    }

    #[test]
    fn test_vendor_duplicates_checked_independently() {
        let data = ParsedData {
            customers: vec![customer("Acme")],
            vendors: vec![vendor("Acme"), vendor("Acme")],
            ..Default::default()
        };
        let result = validate(&data);
        assert_eq!(result.errors, vec!["Duplicate vendor names: Acme".to_string()]);
    }

    #[test]
    fn test_customer_vendor_overlap_is_allowed() {
        let data = ParsedData {
            customers: vec![customer("Acme")],
            vendors: vec![vendor("Acme")],
            ..Default::default()
        };
        assert!(validate(&data).is_valid);
    }

    #[test]
    fn test_missing_required_values() {
        let data = ParsedData {
            accounts: vec![account("", "")],
            customers: vec![customer("")],
            vendors: vec![vendor("")],
            items: vec![Item {
                name: String::new(),
                item_type: String::new(),
                description: None,
                rate: None,
                cost: None,
                quantity_on_hand: None,
                account: None,
                tax_code: None,
                active: None,
            }],
            ..Default::default()
        };
        let result = validate(&data);
        assert_eq!(
            result.errors,
            vec![
                "Account 1: Missing account name".to_string(),
                "Account 1: Missing account type".to_string(),
                "Customer 1: Missing customer name".to_string(),
                "Vendor 1: Missing vendor name".to_string(),
                "Item 1: Missing item name".to_string(),
                "Item 1: Missing item type".to_string(),
            ]
        );
    }
}
