//! Core domain logic for the DragonFly dashboard.
//! This crate is the single source of truth for contact, customer and
//! accounting invariants.

pub mod config;
pub mod export;
pub mod launcher;
pub mod logging;
pub mod model;
pub mod notify;
pub mod search;
pub mod service;

pub use config::{ConfigError, DashboardSeed};
pub use export::csv::{export_customers_csv, export_filename, CUSTOMER_CSV_HEADERS};
pub use launcher::{find_module, modules, Module};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::account::{default_accounts, Account, AccountId};
pub use model::auth::{LoginForm, RegisterForm};
pub use model::contact::{
    create_contact, Category, Contact, ContactDraft, ContactId, ContactKind, ContactType, Tagged,
};
pub use model::customer::{
    demote_to_contact, promote_to_customer, promote_to_customer_on, set_status, update_value,
    update_value_on, ContactMethod, Customer, CustomerDetails, CustomerExtension,
    CustomerExtensionPatch, CustomerStatus,
};
pub use model::invoice::{Invoice, InvoiceDraft, InvoiceId, InvoiceItem, InvoiceStatus};
pub use model::transaction::{Transaction, TransactionDraft, TransactionId, TransactionKind};
pub use model::validation::ValidationError;
pub use notify::{LogSink, Notification, NotificationLevel, NotificationSink, RecordingSink};
pub use search::filter::{filter_by_fields, filter_collection, SearchField, Searchable};
pub use service::contact_service::ContactService;
pub use service::customer_service::{CsvExport, CustomerService};
pub use service::dashboard::Dashboard;
pub use service::error::{ServiceError, ServiceResult};
pub use service::invoice_service::InvoiceService;
pub use service::transaction_service::{LedgerTotals, TransactionService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
