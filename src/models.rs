use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Accounts,
    Customers,
    Vendors,
    Items,
    Transactions,
}

pub const ALL_KINDS: &[RecordKind] = &[
    RecordKind::Accounts,
    RecordKind::Customers,
    RecordKind::Vendors,
    RecordKind::Items,
    RecordKind::Transactions,
];

impl RecordKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Customers => "customers",
            Self::Vendors => "vendors",
            Self::Items => "items",
            Self::Transactions => "transactions",
        }
    }

    /// Singular label used in row-level messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accounts => "account",
            Self::Customers => "customer",
            Self::Vendors => "vendor",
            Self::Items => "item",
            Self::Transactions => "transaction",
        }
    }

    /// Accepts plural keys and singular labels, case-insensitively.
    pub fn from_key(key: &str) -> Option<RecordKind> {
        let key = key.trim().to_lowercase();
        ALL_KINDS
            .iter()
            .find(|k| k.key() == key || k.label() == key)
            .copied()
    }
}

// ---------------------------------------------------------------------------
// Typed records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    #[serde(rename = "Account")]
    pub name: String,
    pub account_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Contact and address block shared by customers and vendors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ContactInfo {
    pub fn has_email(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.is_empty())
    }

    pub fn has_phone(&self) -> bool {
        self.phone.as_deref().is_some_and(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "Customer")]
    pub name: String,
    #[serde(rename = "CustomerType", skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<String>,
    #[serde(flatten)]
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(rename = "Vendor")]
    pub name: String,
    #[serde(rename = "VendorType", skip_serializing_if = "Option::is_none")]
    pub vendor_type: Option<String>,
    #[serde(flatten)]
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(rename = "Item")]
    pub name: String,
    pub item_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_on_hand: Option<f64>,
    /// Income/expense account name; not checked against the account list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    pub date: String,
    #[serde(rename = "Type")]
    pub txn_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Account(Account),
    Customer(Customer),
    Vendor(Vendor),
    Item(Item),
    Transaction(Transaction),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Account(_) => RecordKind::Accounts,
            Self::Customer(_) => RecordKind::Customers,
            Self::Vendor(_) => RecordKind::Vendors,
            Self::Item(_) => RecordKind::Items,
            Self::Transaction(_) => RecordKind::Transactions,
        }
    }
}

// ---------------------------------------------------------------------------
// Parsed collections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCounts {
    pub accounts: usize,
    pub customers: usize,
    pub vendors: usize,
    pub items: usize,
    pub transactions: usize,
}

impl RecordCounts {
    pub fn total(&self) -> usize {
        self.accounts + self.customers + self.vendors + self.items + self.transactions
    }

    pub fn get(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Accounts => self.accounts,
            RecordKind::Customers => self.customers,
            RecordKind::Vendors => self.vendors,
            RecordKind::Items => self.items,
            RecordKind::Transactions => self.transactions,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub company_name: String,
    pub fiscal_year_start: String,
    /// Bytes of source text consumed so far.
    pub data_size: usize,
    /// SHA-256 of the most recently parsed source text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    pub record_counts: RecordCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedData {
    pub accounts: Vec<Account>,
    pub customers: Vec<Customer>,
    pub vendors: Vec<Vendor>,
    pub items: Vec<Item>,
    pub transactions: Vec<Transaction>,
    pub metadata: Metadata,
}

impl ParsedData {
    pub fn push(&mut self, record: Record) {
        match record {
            Record::Account(a) => self.accounts.push(a),
            Record::Customer(c) => self.customers.push(c),
            Record::Vendor(v) => self.vendors.push(v),
            Record::Item(i) => self.items.push(i),
            Record::Transaction(t) => self.transactions.push(t),
        }
        self.metadata.record_counts = self.record_counts();
    }

    /// Appends every collection of `other`; metadata of `self` is kept.
    pub fn append(&mut self, mut other: ParsedData) {
        self.accounts.append(&mut other.accounts);
        self.customers.append(&mut other.customers);
        self.vendors.append(&mut other.vendors);
        self.items.append(&mut other.items);
        self.transactions.append(&mut other.transactions);
        self.metadata.record_counts = self.record_counts();
    }

    pub fn record_counts(&self) -> RecordCounts {
        RecordCounts {
            accounts: self.accounts.len(),
            customers: self.customers.len(),
            vendors: self.vendors.len(),
            items: self.items.len(),
            transactions: self.transactions.len(),
        }
    }

    pub fn total_records(&self) -> usize {
        self.record_counts().total()
    }

    pub fn is_empty(&self) -> bool {
        self.total_records() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_record_kind_from_key() {
        assert_eq!(RecordKind::from_key("accounts"), Some(RecordKind::Accounts));
        assert_eq!(RecordKind::from_key("Vendor"), Some(RecordKind::Vendors));
        assert_eq!(RecordKind::from_key(" ITEMS "), Some(RecordKind::Items));
        assert_eq!(RecordKind::from_key("invoices"), None);
    }

    #[test]
    fn test_push_keeps_counts_in_sync() {
        let mut data = ParsedData::default();
        data.push(Record::Account(account("Cash", "Bank")));
        data.push(Record::Account(account("Savings", "Bank")));
        assert_eq!(data.metadata.record_counts.accounts, 2);
        assert_eq!(data.total_records(), 2);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_append_merges_collections() {
        let mut a = ParsedData::default();
        a.push(Record::Account(account("Cash", "Bank")));
        let mut b = ParsedData::default();
        b.push(Record::Account(account("Sales", "Income")));
        a.append(b);
        assert_eq!(a.accounts.len(), 2);
        assert_eq!(a.metadata.record_counts.accounts, 2);
    }

    #[test]
    fn test_account_serializes_with_export_field_names() {
        let json = serde_json::to_value(account("Cash", "Bank")).unwrap();
        assert_eq!(json["Account"], "Cash");
        assert_eq!(json["AccountType"], "Bank");
        assert!(json.get("Description").is_none());
    }

    #[test]
    fn test_contact_presence_ignores_empty_strings() {
        let contact = ContactInfo {
            phone: Some(String::new()),
            email: Some("a@b.co".to_string()),
            ..Default::default()
        };
        assert!(!contact.has_phone());
        assert!(contact.has_email());
    }
}
