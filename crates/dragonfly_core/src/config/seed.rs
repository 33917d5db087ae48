//! Initial collections for dashboard screens.

use crate::model::account::{default_accounts, Account};
use crate::model::contact::{Category, Contact, ContactKind, Tagged};
use crate::model::customer::{
    promote_to_customer_on, ContactMethod, Customer, CustomerExtensionPatch, CustomerStatus,
};
use crate::model::invoice::Invoice;
use crate::model::transaction::Transaction;
use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use log::info;
use serde::Deserialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use uuid::Uuid;

/// Failure to load or accept a seed.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    /// A record id is nil.
    NilId { collection: &'static str },
    /// Two records in one collection share an id.
    DuplicateId {
        collection: &'static str,
        id: Uuid,
    },
    /// A contact or customer breaks a record rule.
    InvalidRecord {
        collection: &'static str,
        id: Uuid,
        source: ValidationError,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read seed `{path}`: {source}"),
            Self::Parse(err) => write!(f, "invalid seed JSON: {err}"),
            Self::NilId { collection } => write!(f, "nil id in seed collection `{collection}`"),
            Self::DuplicateId { collection, id } => {
                write!(f, "duplicate id {id} in seed collection `{collection}`")
            }
            Self::InvalidRecord {
                collection,
                id,
                source,
            } => write!(f, "invalid record {id} in seed collection `{collection}`: {source}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidRecord { source, .. } => Some(source),
            Self::NilId { .. } | Self::DuplicateId { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Initial state for every screen.
///
/// Missing collections default to empty; missing `accounts` default to the
/// four standard accounts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardSeed {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default = "default_accounts")]
    pub accounts: Vec<Account>,
}

impl Default for DashboardSeed {
    fn default() -> Self {
        Self {
            contacts: Vec::new(),
            customers: Vec::new(),
            invoices: Vec::new(),
            transactions: Vec::new(),
            accounts: default_accounts(),
        }
    }
}

impl DashboardSeed {
    /// Parses and checks a JSON seed.
    ///
    /// Contact and customer tags are trimmed and deduplicated; records that
    /// would be refused by their screen are rejected.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let mut seed: Self = serde_json::from_str(raw)?;
        seed.check_ids()?;
        seed.contacts.iter_mut().for_each(|c| c.normalize_tags());
        seed.customers.iter_mut().for_each(|c| c.normalize_tags());
        seed.check_records()?;
        Ok(seed)
    }

    /// Reads a JSON seed file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let seed = Self::from_json_str(&raw)?;
        info!(
            "event=seed_load module=config status=ok contacts={} customers={} invoices={} transactions={} accounts={}",
            seed.contacts.len(),
            seed.customers.len(),
            seed.invoices.len(),
            seed.transactions.len(),
            seed.accounts.len()
        );
        Ok(seed)
    }

    /// Demo records shown on a fresh dashboard.
    pub fn sample() -> Self {
        Self {
            customers: sample_customers(),
            ..Self::default()
        }
    }

    /// Rejects nil and repeated ids per collection.
    pub fn check_ids(&self) -> Result<(), ConfigError> {
        check_unique("contacts", self.contacts.iter().map(|c| c.id))?;
        check_unique("customers", self.customers.iter().map(Customer::id))?;
        check_unique("invoices", self.invoices.iter().map(|i| i.id))?;
        check_unique("transactions", self.transactions.iter().map(|t| t.id))?;
        check_unique("accounts", self.accounts.iter().map(|a| a.id))
    }

    /// Applies the contact rules (non-blank name, well-formed email) to
    /// seeded contacts and customers.
    pub fn check_records(&self) -> Result<(), ConfigError> {
        for contact in &self.contacts {
            contact.validate().map_err(|source| ConfigError::InvalidRecord {
                collection: "contacts",
                id: contact.id,
                source,
            })?;
        }
        for customer in &self.customers {
            customer.validate().map_err(|source| ConfigError::InvalidRecord {
                collection: "customers",
                id: customer.id(),
                source,
            })?;
        }
        Ok(())
    }
}

fn check_unique(
    collection: &'static str,
    ids: impl Iterator<Item = Uuid>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_nil() {
            return Err(ConfigError::NilId { collection });
        }
        if !seen.insert(id) {
            return Err(ConfigError::DuplicateId { collection, id });
        }
    }
    Ok(())
}

struct SampleCustomer {
    id: u128,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    address: &'static str,
    company: &'static str,
    title: &'static str,
    category: Category,
    notes: &'static str,
    tags: [&'static str; 2],
    since: (i32, u32, u32),
    status: CustomerStatus,
    value: f64,
    method: ContactMethod,
}

const SAMPLE_CUSTOMERS: [SampleCustomer; 3] = [
    SampleCustomer {
        id: 0x0d4a_0001,
        name: "Jane Smith",
        email: "jane.smith@example.com",
        phone: "555-1234",
        address: "123 Main St, Springfield",
        company: "Acme Corp",
        title: "CEO",
        category: Category::Business,
        notes: "Important client",
        tags: ["premium", "longterm"],
        since: (2023, 1, 15),
        status: CustomerStatus::Active,
        value: 12_500.0,
        method: ContactMethod::Email,
    },
    SampleCustomer {
        id: 0x0d4a_0002,
        name: "John Doe",
        email: "john.doe@example.com",
        phone: "555-5678",
        address: "456 Oak Ave, Riverside",
        company: "XYZ Industries",
        title: "CTO",
        category: Category::Business,
        notes: "Technical contact",
        tags: ["technology", "new"],
        since: (2023, 3, 22),
        status: CustomerStatus::Lead,
        value: 0.0,
        method: ContactMethod::Phone,
    },
    SampleCustomer {
        id: 0x0d4a_0003,
        name: "Sarah Williams",
        email: "sarah@personal.com",
        phone: "555-9012",
        address: "789 Pine St, Meadowville",
        company: "",
        title: "",
        category: Category::Personal,
        notes: "Referred by Jane Smith",
        tags: ["personal", "referral"],
        since: (2023, 5, 10),
        status: CustomerStatus::Active,
        value: 3_200.0,
        method: ContactMethod::Email,
    },
];

fn sample_customers() -> Vec<Customer> {
    SAMPLE_CUSTOMERS
        .iter()
        .filter_map(|sample| {
            let (year, month, day) = sample.since;
            let since = NaiveDate::from_ymd_opt(year, month, day)?;
            let mut contact = Contact::with_id(Uuid::from_u128(sample.id), sample.name);
            contact.email = sample.email.to_string();
            contact.phone = sample.phone.to_string();
            contact.address = sample.address.to_string();
            contact.category = sample.category;
            contact.notes = sample.notes.to_string();
            contact.tags = sample.tags.iter().map(|tag| tag.to_string()).collect();
            contact.kind = ContactKind::individual(sample.company, sample.title);

            let patch = CustomerExtensionPatch {
                customer_since: Some(since),
                status: Some(sample.status),
                value: Some(sample.value),
                last_purchase: None,
                preferred_contact_method: Some(sample.method),
            };
            Some(promote_to_customer_on(&contact, Some(patch), since))
        })
        .collect()
}
