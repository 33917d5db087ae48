//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose dashboard screens to Dart through sync FRB functions.
//! - Translate flat string inputs into core drafts and back.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures come back as `ok = false` envelopes, never as errors.
//! - One dashboard session per process, seeded on first use.

use chrono::NaiveDate;
use dragonfly_core::model::today;
use dragonfly_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, modules,
    ping as ping_inner, Category, Contact, ContactDraft, ContactKind, ContactMethod, Customer,
    CustomerDetails, CustomerStatus, Dashboard, DashboardSeed, Invoice, InvoiceDraft,
    InvoiceItem, InvoiceStatus, RecordingSink, ServiceResult, Transaction, TransactionDraft,
    TransactionKind,
};
use log::warn;
use std::sync::{Mutex, MutexGuard, OnceLock};
use uuid::Uuid;

const SEED_PATH_ENV: &str = "DRAGONFLY_SEED_PATH";
const DATE_FORMAT: &str = "%Y-%m-%d";
static SESSION: OnceLock<Mutex<Session>> = OnceLock::new();

struct Session {
    dashboard: Dashboard<RecordingSink>,
    sink: RecordingSink,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Contact form fields as entered. Enum fields use their lowercase names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// `individual|company`.
    pub contact_type: String,
    /// Ignored for companies.
    pub company: String,
    /// Ignored for companies.
    pub title: String,
    /// `personal|business|other`.
    pub category: String,
    pub notes: String,
    pub tags: Vec<String>,
}

/// Customer form fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerInput {
    pub contact: ContactInput,
    /// `YYYY-MM-DD`; today when absent.
    pub customer_since: Option<String>,
    /// `lead|active|inactive`; `lead` when blank.
    pub status: String,
    /// `email|phone|mail`.
    pub preferred_contact_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactItem {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub contact_type: String,
    pub company: String,
    pub title: String,
    pub category: String,
    pub notes: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerItem {
    pub contact: ContactItem,
    pub customer_since: String,
    pub status: String,
    pub value: f64,
    pub last_purchase: Option<String>,
    pub preferred_contact_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLineInput {
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceInput {
    pub invoice_number: Option<String>,
    pub date: Option<String>,
    pub due_date: Option<String>,
    pub client_name: String,
    pub client_email: String,
    pub customer_id: Option<String>,
    pub items: Vec<InvoiceLineInput>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLineItem {
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceListItem {
    pub id: String,
    pub invoice_number: String,
    pub date: String,
    pub due_date: String,
    pub client_name: String,
    pub client_email: String,
    /// May point at a customer that no longer exists.
    pub customer_id: Option<String>,
    pub items: Vec<InvoiceLineItem>,
    pub notes: String,
    pub total: f64,
    /// `draft|sent|paid`.
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionInput {
    pub date: Option<String>,
    pub description: String,
    pub amount: f64,
    /// `income|expense`.
    pub kind: String,
    pub category: String,
    pub account: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionItem {
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub kind: String,
    pub category: String,
    pub account: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountItem {
    pub id: String,
    pub name: String,
    pub balance: f64,
}

/// Toast payload for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    pub title: String,
    pub description: String,
    /// `success|destructive|error`.
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleItem {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected entity ID on success.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Uuid) -> Self {
        Self {
            ok: true,
            id: Some(id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// CSV export envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub filename: String,
    pub content: String,
    pub rows: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    /// Sum of totals of invoices not yet paid.
    pub outstanding: f64,
}

/// Static module catalog for the home screen.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_modules() -> Vec<ModuleItem> {
    modules()
        .iter()
        .map(|module| ModuleItem {
            id: module.id.to_string(),
            title: module.title.to_string(),
            description: module.description.to_string(),
        })
        .collect()
}

/// Drains notifications raised since the previous call, oldest first.
#[flutter_rust_bridge::frb(sync)]
pub fn take_notifications() -> Vec<NotificationItem> {
    session()
        .sink
        .drain()
        .into_iter()
        .map(|notification| NotificationItem {
            title: notification.title,
            description: notification.description,
            level: notification.level.as_str().to_string(),
        })
        .collect()
}

/// Customers matching `query`; a blank query lists all.
#[flutter_rust_bridge::frb(sync)]
pub fn customer_list(query: String) -> Vec<CustomerItem> {
    session()
        .dashboard
        .customers()
        .search(&query)
        .iter()
        .map(to_customer_item)
        .collect()
}

#[flutter_rust_bridge::frb(sync)]
pub fn customer_add(input: CustomerInput) -> ActionResponse {
    finish("customer_add", "Customer added.", customer_add_inner(input))
}

#[flutter_rust_bridge::frb(sync)]
pub fn customer_update(id: String, input: CustomerInput) -> ActionResponse {
    finish(
        "customer_update",
        "Customer updated.",
        customer_update_inner(&id, input),
    )
}

/// Adds `delta` (may be negative) to a customer's value.
#[flutter_rust_bridge::frb(sync)]
pub fn customer_record_value(id: String, delta: f64) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let mut session = session();
        service(session.dashboard.customers_mut().record_value(id, delta, today()))
            .map(|customer| customer.id())
    });
    finish("customer_record_value", "Customer value updated.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn customer_set_status(id: String, status: String) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let status = parse_customer_status(&status)?;
        let mut session = session();
        service(session.dashboard.customers_mut().set_status(id, status)).map(|c| c.id())
    });
    finish("customer_set_status", "Customer status updated.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn customer_add_tag(id: String, tag: String) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let mut session = session();
        service(session.dashboard.customers_mut().add_tag(id, &tag)).map(|c| c.id())
    });
    finish("customer_add_tag", "Tag added.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn customer_remove_tag(id: String, tag: String) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let mut session = session();
        service(session.dashboard.customers_mut().remove_tag(id, &tag)).map(|c| c.id())
    });
    finish("customer_remove_tag", "Tag removed.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn customer_delete(id: String) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let mut session = session();
        service(session.dashboard.customers_mut().delete(id)).map(|c| c.id())
    });
    finish("customer_delete", "Customer deleted.", result)
}

/// Renders all customers as CSV for the download collaborator.
#[flutter_rust_bridge::frb(sync)]
pub fn customer_export_csv() -> ExportResponse {
    let export = session().dashboard.customers().export_csv(today());
    ExportResponse {
        filename: export.filename,
        content: export.content,
        rows: u32::try_from(export.rows).unwrap_or(u32::MAX),
    }
}

/// Contacts matching `query`; a blank query lists all.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_list(query: String) -> Vec<ContactItem> {
    session()
        .dashboard
        .contacts()
        .search(&query)
        .iter()
        .map(to_contact_item)
        .collect()
}

#[flutter_rust_bridge::frb(sync)]
pub fn contact_add(input: ContactInput) -> ActionResponse {
    let result = contact_draft(input).and_then(|draft| {
        let mut session = session();
        service(session.dashboard.contacts_mut().add(draft)).map(|contact| contact.id)
    });
    finish("contact_add", "Contact added.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn contact_update(id: String, input: ContactInput) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let draft = contact_draft(input)?;
        let mut session = session();
        service(session.dashboard.contacts_mut().update(id, draft)).map(|contact| contact.id)
    });
    finish("contact_update", "Contact updated.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn contact_delete(id: String) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let mut session = session();
        service(session.dashboard.contacts_mut().delete(id)).map(|contact| contact.id)
    });
    finish("contact_delete", "Contact deleted.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn contact_add_tag(id: String, tag: String) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let mut session = session();
        service(session.dashboard.contacts_mut().add_tag(id, &tag)).map(|c| c.id)
    });
    finish("contact_add_tag", "Tag added.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn contact_remove_tag(id: String, tag: String) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let mut session = session();
        service(session.dashboard.contacts_mut().remove_tag(id, &tag)).map(|c| c.id)
    });
    finish("contact_remove_tag", "Tag removed.", result)
}

/// Copies a contact into the customer list with promotion defaults.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_promote(id: String) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let mut session = session();
        service(session.dashboard.promote_contact(id, None, today())).map(|c| c.id())
    });
    finish("contact_promote", "Contact promoted.", result)
}

/// All invoices in creation order.
#[flutter_rust_bridge::frb(sync)]
pub fn invoice_list() -> Vec<InvoiceListItem> {
    session()
        .dashboard
        .invoices()
        .list()
        .iter()
        .map(to_invoice_item)
        .collect()
}

#[flutter_rust_bridge::frb(sync)]
pub fn invoice_create(input: InvoiceInput) -> ActionResponse {
    let result = invoice_draft(input).and_then(|draft| {
        let mut session = session();
        service(session.dashboard.create_invoice(draft, today())).map(|invoice| invoice.id)
    });
    finish("invoice_create", "Invoice created.", result)
}

/// Replaces an invoice's editable fields; id, status and blank
/// number/date fields are kept.
#[flutter_rust_bridge::frb(sync)]
pub fn invoice_update(id: String, input: InvoiceInput) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let draft = invoice_draft(input)?;
        let mut session = session();
        service(session.dashboard.update_invoice(id, draft)).map(|invoice| invoice.id)
    });
    finish("invoice_update", "Invoice updated.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn invoice_set_status(id: String, status: String) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let status = parse_invoice_status(&status)?;
        let mut session = session();
        service(session.dashboard.invoices_mut().set_status(id, status)).map(|i| i.id)
    });
    finish("invoice_set_status", "Invoice status updated.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn invoice_delete(id: String) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let mut session = session();
        service(session.dashboard.invoices_mut().delete(id)).map(|invoice| invoice.id)
    });
    finish("invoice_delete", "Invoice deleted.", result)
}

/// All transactions in recording order.
#[flutter_rust_bridge::frb(sync)]
pub fn transaction_list() -> Vec<TransactionItem> {
    session()
        .dashboard
        .transactions()
        .list()
        .iter()
        .map(to_transaction_item)
        .collect()
}

/// Accounts with their running balances.
#[flutter_rust_bridge::frb(sync)]
pub fn account_list() -> Vec<AccountItem> {
    session()
        .dashboard
        .transactions()
        .accounts()
        .iter()
        .map(|account| AccountItem {
            id: account.id.to_string(),
            name: account.name.clone(),
            balance: account.balance,
        })
        .collect()
}

#[flutter_rust_bridge::frb(sync)]
pub fn transaction_record(input: TransactionInput) -> ActionResponse {
    let result = transaction_draft(input).and_then(|draft| {
        let mut session = session();
        service(session.dashboard.transactions_mut().record(draft, today())).map(|t| t.id)
    });
    finish("transaction_record", "Transaction recorded.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn transaction_delete(id: String) -> ActionResponse {
    let result = parse_id(&id).and_then(|id| {
        let mut session = session();
        service(session.dashboard.transactions_mut().delete(id)).map(|t| t.id)
    });
    finish("transaction_delete", "Transaction deleted.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn ledger_summary() -> LedgerSummary {
    let session = session();
    let totals = session.dashboard.transactions().totals();
    LedgerSummary {
        income: totals.income,
        expense: totals.expense,
        net: totals.net,
        outstanding: session.dashboard.invoices().total_outstanding(),
    }
}

fn customer_add_inner(input: CustomerInput) -> Result<Uuid, String> {
    let (draft, details) = customer_form(input)?;
    let mut session = session();
    service(session.dashboard.customers_mut().add(draft, details, today())).map(|c| c.id())
}

fn customer_update_inner(id: &str, input: CustomerInput) -> Result<Uuid, String> {
    let id = parse_id(id)?;
    let (draft, details) = customer_form(input)?;
    let mut session = session();
    service(session.dashboard.customers_mut().update(id, draft, details)).map(|c| c.id())
}

fn session() -> MutexGuard<'static, Session> {
    SESSION
        .get_or_init(|| {
            let sink = RecordingSink::new();
            Mutex::new(Session {
                dashboard: Dashboard::from_seed(load_seed(), sink.clone()),
                sink,
            })
        })
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn load_seed() -> DashboardSeed {
    let Ok(raw) = std::env::var(SEED_PATH_ENV) else {
        return DashboardSeed::sample();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DashboardSeed::sample();
    }
    match DashboardSeed::from_path(trimmed) {
        Ok(seed) => seed,
        Err(err) => {
            warn!("event=seed_load module=ffi status=error fallback=sample error={err}");
            DashboardSeed::sample()
        }
    }
}

fn finish(op: &str, message: &str, result: Result<Uuid, String>) -> ActionResponse {
    match result {
        Ok(id) => ActionResponse::success(message, id),
        Err(err) => ActionResponse::failure(format!("{op} failed: {err}")),
    }
}

fn service<T>(result: ServiceResult<T>) -> Result<T, String> {
    result.map_err(|err| err.to_string())
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid id `{}`", raw.trim()))
}

fn parse_date(raw: Option<String>) -> Result<Option<NaiveDate>, String> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(|_| format!("invalid date `{value}`; expected YYYY-MM-DD")),
    }
}

fn parse_category(raw: &str) -> Result<Category, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "personal" => Ok(Category::Personal),
        "business" => Ok(Category::Business),
        "other" => Ok(Category::Other),
        other => Err(format!("unknown category `{other}`")),
    }
}

fn parse_customer_status(raw: &str) -> Result<CustomerStatus, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "lead" => Ok(CustomerStatus::Lead),
        "active" => Ok(CustomerStatus::Active),
        "inactive" => Ok(CustomerStatus::Inactive),
        other => Err(format!("unknown customer status `{other}`")),
    }
}

fn parse_contact_method(raw: Option<String>) -> Result<Option<ContactMethod>, String> {
    match raw.as_deref().map(|value| value.trim().to_ascii_lowercase()) {
        None => Ok(None),
        Some(value) => match value.as_str() {
            "" => Ok(None),
            "email" => Ok(Some(ContactMethod::Email)),
            "phone" => Ok(Some(ContactMethod::Phone)),
            "mail" => Ok(Some(ContactMethod::Mail)),
            other => Err(format!("unknown contact method `{other}`")),
        },
    }
}

fn parse_invoice_status(raw: &str) -> Result<InvoiceStatus, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "draft" => Ok(InvoiceStatus::Draft),
        "sent" => Ok(InvoiceStatus::Sent),
        "paid" => Ok(InvoiceStatus::Paid),
        other => Err(format!("unknown invoice status `{other}`")),
    }
}

fn parse_transaction_kind(raw: &str) -> Result<TransactionKind, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "income" => Ok(TransactionKind::Income),
        "" | "expense" => Ok(TransactionKind::Expense),
        other => Err(format!("unknown transaction kind `{other}`")),
    }
}

fn contact_draft(input: ContactInput) -> Result<ContactDraft, String> {
    let kind = match input.contact_type.trim().to_ascii_lowercase().as_str() {
        "" | "individual" => ContactKind::individual(input.company, input.title),
        "company" => ContactKind::Company,
        other => return Err(format!("unknown contact type `{other}`")),
    };
    Ok(ContactDraft {
        name: input.name,
        email: input.email,
        phone: input.phone,
        address: input.address,
        category: parse_category(&input.category)?,
        notes: input.notes,
        tags: input.tags,
        kind,
    })
}

fn customer_form(input: CustomerInput) -> Result<(ContactDraft, CustomerDetails), String> {
    let draft = contact_draft(input.contact)?;
    let details = CustomerDetails {
        customer_since: parse_date(input.customer_since)?.unwrap_or_else(today),
        status: parse_customer_status(&input.status)?,
        preferred_contact_method: parse_contact_method(input.preferred_contact_method)?,
    };
    Ok((draft, details))
}

fn invoice_draft(input: InvoiceInput) -> Result<InvoiceDraft, String> {
    let customer = match input.customer_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_id(raw)?),
    };
    Ok(InvoiceDraft {
        invoice_number: input.invoice_number,
        date: parse_date(input.date)?,
        due_date: parse_date(input.due_date)?,
        client_name: input.client_name,
        client_email: input.client_email,
        customer,
        items: input
            .items
            .into_iter()
            .map(|line| InvoiceItem::new(line.description, line.quantity, line.rate))
            .collect(),
        notes: input.notes,
    })
}

fn transaction_draft(input: TransactionInput) -> Result<TransactionDraft, String> {
    Ok(TransactionDraft {
        date: parse_date(input.date)?,
        description: input.description,
        amount: input.amount,
        kind: parse_transaction_kind(&input.kind)?,
        category: input.category,
        account: input.account,
    })
}

fn to_contact_item(contact: &Contact) -> ContactItem {
    ContactItem {
        id: contact.id.to_string(),
        name: contact.name.clone(),
        email: contact.email.clone(),
        phone: contact.phone.clone(),
        address: contact.address.clone(),
        contact_type: contact.contact_type().as_str().to_string(),
        company: contact.company().to_string(),
        title: contact.title().to_string(),
        category: contact.category.as_str().to_string(),
        notes: contact.notes.clone(),
        tags: contact.tags.clone(),
    }
}

fn to_customer_item(customer: &Customer) -> CustomerItem {
    let extension = customer.extension();
    CustomerItem {
        contact: to_contact_item(customer.contact()),
        customer_since: extension.customer_since.format(DATE_FORMAT).to_string(),
        status: extension.status.as_str().to_string(),
        value: extension.value,
        last_purchase: extension
            .last_purchase
            .map(|date| date.format(DATE_FORMAT).to_string()),
        preferred_contact_method: extension
            .preferred_contact_method
            .map(|method| method.as_str().to_string()),
    }
}

fn to_invoice_item(invoice: &Invoice) -> InvoiceListItem {
    InvoiceListItem {
        id: invoice.id.to_string(),
        invoice_number: invoice.invoice_number.clone(),
        date: invoice.date.format(DATE_FORMAT).to_string(),
        due_date: invoice.due_date.format(DATE_FORMAT).to_string(),
        client_name: invoice.client_name.clone(),
        client_email: invoice.client_email.clone(),
        customer_id: invoice.customer.map(|id| id.to_string()),
        items: invoice
            .items
            .iter()
            .map(|item| InvoiceLineItem {
                description: item.description.clone(),
                quantity: item.quantity,
                rate: item.rate,
                amount: item.amount,
            })
            .collect(),
        notes: invoice.notes.clone(),
        total: invoice.total,
        status: invoice.status.as_str().to_string(),
    }
}

fn to_transaction_item(transaction: &Transaction) -> TransactionItem {
    TransactionItem {
        id: transaction.id.to_string(),
        date: transaction.date.format(DATE_FORMAT).to_string(),
        description: transaction.description.clone(),
        amount: transaction.amount,
        kind: transaction.kind.as_str().to_string(),
        category: transaction.category.clone(),
        account: transaction.account.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        account_list, contact_add, contact_add_tag, contact_list, contact_promote,
        contact_remove_tag, core_version, customer_add, customer_delete, customer_export_csv,
        customer_list, customer_record_value, customer_set_status, dashboard_modules,
        init_logging, invoice_create, invoice_list, invoice_update, ledger_summary, parse_date,
        ping, take_notifications, transaction_list, transaction_record, ContactInput,
        CustomerInput, InvoiceInput, InvoiceLineInput, TransactionInput,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    fn customer_input(name: &str) -> CustomerInput {
        CustomerInput {
            contact: ContactInput {
                name: name.to_string(),
                email: "owner@example.com".to_string(),
                company: "Token Works".to_string(),
                ..ContactInput::default()
            },
            ..CustomerInput::default()
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn modules_cover_catalog() {
        let modules = dashboard_modules();
        assert_eq!(modules.len(), 8);
        assert!(modules.iter().any(|module| module.id == "developer"));
    }

    #[test]
    fn customer_add_is_searchable_and_deletable() {
        let name = unique_token("ffi-customer");
        let created = customer_add(customer_input(&name));
        assert!(created.ok, "{}", created.message);
        let id = created.id.expect("created customer should return id");

        let found = customer_list(name.clone());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].status, "lead");
        assert_eq!(found[0].value, 0.0);

        let valued = customer_record_value(id.clone(), 250.0);
        assert!(valued.ok, "{}", valued.message);
        let found = customer_list(name.clone());
        assert_eq!(found[0].value, 250.0);
        assert!(found[0].last_purchase.is_some());

        assert!(customer_set_status(id.clone(), "active".to_string()).ok);
        assert!(customer_delete(id.clone()).ok);
        assert!(customer_list(name).is_empty());
        assert!(!customer_delete(id).ok);
    }

    #[test]
    fn customer_add_without_name_fails_with_notification() {
        let response = customer_add(customer_input("  "));
        assert!(!response.ok);
        assert!(response.message.contains("customer_add failed"));
        assert!(take_notifications()
            .iter()
            .any(|item| item.title == "Customer not saved" && item.level == "error"));
    }

    #[test]
    fn bad_enum_and_id_inputs_fail_before_touching_state() {
        let mut input = customer_input("Enum Check");
        input.status = "vip".to_string();
        let response = customer_add(input);
        assert!(!response.ok);
        assert!(response.message.contains("vip"));

        let response = customer_set_status("not-a-uuid".to_string(), "active".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid id"));
    }

    #[test]
    fn contact_promotion_keeps_id() {
        let name = unique_token("ffi-contact");
        let created = contact_add(ContactInput {
            name: name.clone(),
            ..ContactInput::default()
        });
        assert!(created.ok, "{}", created.message);
        let id = created.id.expect("created contact should return id");

        let promoted = contact_promote(id.clone());
        assert!(promoted.ok, "{}", promoted.message);
        assert_eq!(promoted.id.as_deref(), Some(id.as_str()));
        assert_eq!(contact_list(name.clone()).len(), 1);
        assert_eq!(customer_list(name)[0].contact.id, id);
    }

    #[test]
    fn invoice_with_blank_line_is_rejected() {
        let response = invoice_create(InvoiceInput {
            client_name: "Blank Line Ltd".to_string(),
            items: vec![InvoiceLineInput {
                description: String::new(),
                quantity: 1.0,
                rate: 10.0,
            }],
            ..InvoiceInput::default()
        });
        assert!(!response.ok);
        assert!(response.message.contains("item 1"));
    }

    #[test]
    fn income_shows_up_in_ledger_summary() {
        let before = ledger_summary();
        let response = transaction_record(TransactionInput {
            description: "Consulting".to_string(),
            amount: 125.0,
            kind: "income".to_string(),
            category: "Services".to_string(),
            account: "Checking Account".to_string(),
            ..TransactionInput::default()
        });
        assert!(response.ok, "{}", response.message);
        assert!(ledger_summary().income >= before.income + 125.0);
    }

    #[test]
    fn export_names_file_by_date() {
        let export = customer_export_csv();
        assert!(export.filename.starts_with("customers-"));
        assert!(export.filename.ends_with(".csv"));
        assert!(export.content.starts_with("id,name,email"));
    }

    #[test]
    fn parse_date_accepts_blank_and_iso() {
        assert_eq!(parse_date(Some("  ".to_string())), Ok(None));
        assert!(parse_date(Some("2024-02-30".to_string())).is_err());
        assert!(parse_date(Some("2024-02-29".to_string()))
            .expect("leap day")
            .is_some());
    }

    fn invoice_input(client: &str, lines: &[(&str, f64, f64)]) -> InvoiceInput {
        InvoiceInput {
            client_name: client.to_string(),
            items: lines
                .iter()
                .map(|(description, quantity, rate)| InvoiceLineInput {
                    description: description.to_string(),
                    quantity: *quantity,
                    rate: *rate,
                })
                .collect(),
            ..InvoiceInput::default()
        }
    }

    #[test]
    fn invoice_update_is_visible_in_invoice_list() {
        let client = unique_token("ffi-invoice");
        let created = invoice_create(invoice_input(&client, &[("Audit", 1.0, 100.0)]));
        assert!(created.ok, "{}", created.message);
        let id = created.id.expect("created invoice should return id");

        let mut input = invoice_input(&client, &[("Audit", 1.0, 100.0), ("Travel", 2.0, 25.0)]);
        input.notes = "Revised".to_string();
        let updated = invoice_update(id.clone(), input);
        assert!(updated.ok, "{}", updated.message);

        let listed = invoice_list();
        let invoice = listed
            .iter()
            .find(|invoice| invoice.id == id)
            .expect("updated invoice should be listed");
        assert_eq!(invoice.total, 150.0);
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.items[1].amount, 50.0);
        assert_eq!(invoice.notes, "Revised");
        assert_eq!(invoice.status, "draft");

        let missing = invoice_update(
            "00000000-0000-4000-8000-000000000000".to_string(),
            invoice_input(&client, &[("Audit", 1.0, 100.0)]),
        );
        assert!(!missing.ok);
    }

    #[test]
    fn invoice_dated_at_calendar_end_fails_without_panicking() {
        let mut input = invoice_input("Far Future Ltd", &[("Audit", 1.0, 100.0)]);
        input.date = Some("+262142-12-15".to_string());
        let response = invoice_create(input);
        assert!(!response.ok);
        assert!(response.message.contains("out of range"), "{}", response.message);
    }

    #[test]
    fn non_finite_value_change_is_refused() {
        let created = customer_add(customer_input(&unique_token("ffi-nan")));
        let id = created.id.expect("created customer should return id");
        let response = customer_record_value(id, f64::NAN);
        assert!(!response.ok);
        assert!(response.message.contains("finite"), "{}", response.message);
    }

    #[test]
    fn recorded_transaction_is_listed_and_moves_its_account() {
        let description = unique_token("ffi-expense");
        let cash_before = account_list()
            .into_iter()
            .find(|account| account.name == "Cash")
            .expect("default accounts include Cash")
            .balance;
        let response = transaction_record(TransactionInput {
            description: description.clone(),
            amount: 12.5,
            kind: "expense".to_string(),
            category: "Office Supplies".to_string(),
            account: "Cash".to_string(),
            ..TransactionInput::default()
        });
        assert!(response.ok, "{}", response.message);

        let listed = transaction_list();
        let transaction = listed
            .iter()
            .find(|transaction| transaction.description == description)
            .expect("recorded transaction should be listed");
        assert_eq!(transaction.kind, "expense");
        assert_eq!(transaction.account, "Cash");
        let cash_after = account_list()
            .into_iter()
            .find(|account| account.name == "Cash")
            .expect("default accounts include Cash")
            .balance;
        assert_eq!(cash_after, cash_before - 12.5);
    }

    #[test]
    fn contact_tags_can_be_added_and_removed() {
        let name = unique_token("ffi-tagged");
        let created = contact_add(ContactInput {
            name: name.clone(),
            ..ContactInput::default()
        });
        let id = created.id.expect("created contact should return id");

        assert!(contact_add_tag(id.clone(), " vip ".to_string()).ok);
        assert!(contact_add_tag(id.clone(), "vip".to_string()).ok);
        assert_eq!(contact_list(name.clone())[0].tags, vec!["vip".to_string()]);

        assert!(contact_remove_tag(id.clone(), "vip".to_string()).ok);
        assert!(contact_list(name)[0].tags.is_empty());
        assert!(!contact_add_tag("not-a-uuid".to_string(), "vip".to_string()).ok);
    }
}
