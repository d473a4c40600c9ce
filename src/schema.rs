//! Loosely typed rows and the structural validators that turn them into
//! typed records.
//!
//! Readers produce [`RawRow`]s; nothing past [`Record::from_row`] ever sees
//! one. Validation is a shape check only: required keys present, values of
//! the expected type. Business rules (empty names, duplicates) belong to the
//! validator.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{MigrateError, Result};
use crate::models::{Account, ContactInfo, Customer, Item, Record, RecordKind, Transaction, Vendor};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl FieldValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Column name → cell value, as read from a CSV line or IIF data row.
pub type RawRow = BTreeMap<String, FieldValue>;

// ---------------------------------------------------------------------------
// Field readers
// ---------------------------------------------------------------------------

struct RowReader<'a> {
    row: &'a RawRow,
    kind: &'static str,
    index: usize,
}

impl<'a> RowReader<'a> {
    fn new(row: &'a RawRow, kind: RecordKind, index: usize) -> Self {
        Self {
            row,
            kind: kind.label(),
            index,
        }
    }

    fn present(&self, field: &str) -> Option<&'a FieldValue> {
        self.row.get(field).filter(|v| **v != FieldValue::Null)
    }

    fn wrong_type(&self, field: &'static str, expected: &str, got: &FieldValue) -> MigrateError {
        MigrateError::schema(
            self.kind,
            self.index,
            field,
            format!("expected {expected}, got {}", got.type_name()),
        )
    }

    fn required_text(&self, field: &'static str) -> Result<String> {
        match self.present(field) {
            Some(FieldValue::Text(s)) => Ok(s.clone()),
            Some(other) => Err(self.wrong_type(field, "string", other)),
            None => Err(MigrateError::schema(self.kind, self.index, field, "is required")),
        }
    }

    fn required_number(&self, field: &'static str) -> Result<f64> {
        match self.present(field) {
            Some(FieldValue::Number(n)) => Ok(*n),
            Some(other) => Err(self.wrong_type(field, "number", other)),
            None => Err(MigrateError::schema(self.kind, self.index, field, "is required")),
        }
    }

    fn text(&self, field: &'static str) -> Result<Option<String>> {
        match self.present(field) {
            Some(FieldValue::Text(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.wrong_type(field, "string", other)),
            None => Ok(None),
        }
    }

    fn number(&self, field: &'static str) -> Result<Option<f64>> {
        match self.present(field) {
            Some(FieldValue::Number(n)) => Ok(Some(*n)),
            Some(other) => Err(self.wrong_type(field, "number", other)),
            None => Ok(None),
        }
    }

    fn boolean(&self, field: &'static str) -> Result<Option<bool>> {
        match self.present(field) {
            Some(FieldValue::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.wrong_type(field, "boolean", other)),
            None => Ok(None),
        }
    }

    fn contact(&self) -> Result<ContactInfo> {
        Ok(ContactInfo {
            company_name: self.text("CompanyName")?,
            first_name: self.text("FirstName")?,
            last_name: self.text("LastName")?,
            phone: self.text("Phone")?,
            email: self.text("Email")?,
            balance: self.number("Balance")?,
            address1: self.text("Address1")?,
            address2: self.text("Address2")?,
            city: self.text("City")?,
            state: self.text("State")?,
            zip: self.text("Zip")?,
            country: self.text("Country")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Per-kind validators
// ---------------------------------------------------------------------------

impl Account {
    pub fn from_row(row: &RawRow, index: usize) -> Result<Account> {
        let r = RowReader::new(row, RecordKind::Accounts, index);
        Ok(Account {
            name: r.required_text("Account")?,
            account_type: r.required_text("AccountType")?,
            description: r.text("Description")?,
            balance: r.number("Balance")?,
            account_number: r.text("AccountNumber")?,
            tax_line: r.text("TaxLine")?,
            active: r.boolean("Active")?,
        })
    }
}

impl Customer {
    pub fn from_row(row: &RawRow, index: usize) -> Result<Customer> {
        let r = RowReader::new(row, RecordKind::Customers, index);
        Ok(Customer {
            name: r.required_text("Customer")?,
            customer_type: r.text("CustomerType")?,
            contact: r.contact()?,
        })
    }
}

impl Vendor {
    pub fn from_row(row: &RawRow, index: usize) -> Result<Vendor> {
        let r = RowReader::new(row, RecordKind::Vendors, index);
        Ok(Vendor {
            name: r.required_text("Vendor")?,
            vendor_type: r.text("VendorType")?,
            contact: r.contact()?,
        })
    }
}

impl Item {
    pub fn from_row(row: &RawRow, index: usize) -> Result<Item> {
        let r = RowReader::new(row, RecordKind::Items, index);
        Ok(Item {
            name: r.required_text("Item")?,
            item_type: r.required_text("ItemType")?,
            description: r.text("Description")?,
            rate: r.number("Rate")?,
            cost: r.number("Cost")?,
            quantity_on_hand: r.number("QuantityOnHand")?,
            account: r.text("Account")?,
            tax_code: r.text("TaxCode")?,
            active: r.boolean("Active")?,
        })
    }
}

impl Transaction {
    pub fn from_row(row: &RawRow, index: usize) -> Result<Transaction> {
        let r = RowReader::new(row, RecordKind::Transactions, index);
        Ok(Transaction {
            date: r.required_text("Date")?,
            txn_type: r.required_text("Type")?,
            num: r.text("Num")?,
            customer: r.text("Customer")?,
            vendor: r.text("Vendor")?,
            account: r.text("Account")?,
            memo: r.text("Memo")?,
            amount: r.required_number("Amount")?,
            debit: r.number("Debit")?,
            credit: r.number("Credit")?,
        })
    }
}

impl Record {
    /// Validate `row` as a record of `kind`. `index` is the 1-based data row
    /// position reported in errors.
    pub fn from_row(kind: RecordKind, row: &RawRow, index: usize) -> Result<Record> {
        Ok(match kind {
            RecordKind::Accounts => Record::Account(Account::from_row(row, index)?),
            RecordKind::Customers => Record::Customer(Customer::from_row(row, index)?),
            RecordKind::Vendors => Record::Vendor(Vendor::from_row(row, index)?),
            RecordKind::Items => Record::Item(Item::from_row(row, index)?),
            RecordKind::Transactions => Record::Transaction(Transaction::from_row(row, index)?),
        })
    }
}

/// Validate a batch of rows, failing on the first malformed one.
pub fn validate_rows(kind: RecordKind, rows: &[RawRow]) -> Result<Vec<Record>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| Record::from_row(kind, row, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, FieldValue)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_account_minimal_row() {
        let r = row(&[("Account", "Cash".into()), ("AccountType", "Bank".into())]);
        let acct = Account::from_row(&r, 1).unwrap();
        assert_eq!(acct.name, "Cash");
        assert_eq!(acct.account_type, "Bank");
        assert_eq!(acct.balance, None);
    }

    #[test]
    fn test_account_missing_type_is_rejected() {
        let r = row(&[("Account", "Cash".into())]);
        let err = Account::from_row(&r, 4).unwrap_err();
        match err {
            MigrateError::Schema { kind, row, field, .. } => {
                assert_eq!(kind, "account");
                assert_eq!(row, 4);
                assert_eq!(field, "AccountType");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_name_is_structurally_valid() {
        let r = row(&[("Customer", "".into())]);
        let cust = Customer::from_row(&r, 1).unwrap();
        assert_eq!(cust.name, "");
    }

    #[test]
    fn test_wrong_type_is_rejected_without_coercion() {
        let r = row(&[
            ("Account", "Cash".into()),
            ("AccountType", "Bank".into()),
            ("Balance", "100".into()),
        ]);
        let err = Account::from_row(&r, 1).unwrap_err();
        assert!(err.to_string().contains("Balance"));
        assert!(err.to_string().contains("expected number"));
    }

    #[test]
    fn test_null_optional_becomes_none() {
        let r = row(&[("Vendor", "Acme".into()), ("Email", FieldValue::Null)]);
        let vend = Vendor::from_row(&r, 1).unwrap();
        assert_eq!(vend.contact.email, None);
    }

    #[test]
    fn test_transaction_requires_amount() {
        let r = row(&[("Date", "01/15/2025".into()), ("Type", "INVOICE".into())]);
        let err = Transaction::from_row(&r, 2).unwrap_err();
        assert!(err.to_string().contains("'Amount' is required"));
    }

    #[test]
    fn test_item_with_numbers_and_flag() {
        let r = row(&[
            ("Item", "Consulting".into()),
            ("ItemType", "Service".into()),
            ("Rate", 150.0.into()),
            ("Active", true.into()),
            ("Unrelated", "ignored".into()),
        ]);
        let item = Item::from_row(&r, 1).unwrap();
        assert_eq!(item.rate, Some(150.0));
        assert_eq!(item.active, Some(true));
    }

    #[test]
    fn test_validate_rows_reports_first_bad_row() {
        let good = row(&[("Item", "A".into()), ("ItemType", "Service".into())]);
        let bad = row(&[("Item", "B".into())]);
        let err = validate_rows(RecordKind::Items, &[good.clone(), bad]).unwrap_err();
        assert!(err.to_string().contains("row 2"));
        let ok = validate_rows(RecordKind::Items, &[good]).unwrap();
        assert_eq!(ok.len(), 1);
        assert_eq!(ok[0].kind(), RecordKind::Items);
    }
}
