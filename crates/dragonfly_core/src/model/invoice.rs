//! Invoice model.
//!
//! # Responsibility
//! - Define invoice and line-item records for the accounting screen.
//! - Validate a submitted invoice draft as one atomic unit.
//!
//! # Invariants
//! - `amount == quantity * rate` whenever quantity or rate is edited.
//! - `total` is the sum of item amounts at submission time.
//! - A `customer` reference resolves to a live customer when the invoice is
//!   created; later removal of that customer leaves the reference dangling.

use crate::model::contact::ContactId;
use crate::model::customer::Customer;
use crate::model::validation::{check_optional_email, require, ValidationError};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type InvoiceId = Uuid;

/// Days between invoice date and default due date.
pub const DEFAULT_PAYMENT_TERM_DAYS: i64 = 30;

/// Invoice lifecycle label. Transitions are unrestricted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
        }
    }
}

/// One billable line on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: Uuid,
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64,
}

impl InvoiceItem {
    /// Creates a line with `amount = quantity * rate`.
    pub fn new(description: impl Into<String>, quantity: f64, rate: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            quantity,
            rate,
            amount: quantity * rate,
        }
    }

    /// Blank line offered by a fresh invoice form.
    pub fn blank() -> Self {
        Self::new("", 1.0, 0.0)
    }

    pub fn with_quantity(&self, quantity: f64) -> Self {
        Self {
            quantity,
            amount: quantity * self.rate,
            ..self.clone()
        }
    }

    pub fn with_rate(&self, rate: f64) -> Self {
        Self {
            rate,
            amount: self.quantity * rate,
            ..self.clone()
        }
    }

    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self.clone()
        }
    }
}

/// Submitted invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub client_name: String,
    pub client_email: String,
    /// Customer this invoice bills, when picked from the customer list.
    pub customer: Option<ContactId>,
    pub items: Vec<InvoiceItem>,
    pub notes: String,
    pub total: f64,
    pub status: InvoiceStatus,
}

/// Invoice form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Generated as `INV-<year>-<nnnn>` when absent.
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub customer: Option<ContactId>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub notes: String,
}

impl Invoice {
    /// Validates a draft and builds a new `draft`-status invoice.
    ///
    /// When `customer` is set it must match one of `customers`; blank client
    /// name/email are then filled from that customer.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`]; nothing is built then.
    pub fn submit(
        draft: InvoiceDraft,
        customers: &[Customer],
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let draft = resolve_customer(draft, customers)?;
        validate_draft(&draft)?;

        let date = draft.date.unwrap_or(today);
        let due_date = match draft.due_date {
            Some(due_date) => due_date,
            None => date
                .checked_add_signed(Duration::days(DEFAULT_PAYMENT_TERM_DAYS))
                .ok_or(ValidationError::DateOutOfRange("due date"))?,
        };
        let invoice_number = match draft.invoice_number {
            Some(number) if !number.trim().is_empty() => number.trim().to_string(),
            _ => generate_invoice_number(date),
        };
        let total = items_total(&draft.items);

        Ok(Self {
            id: Uuid::new_v4(),
            invoice_number,
            date,
            due_date,
            client_name: draft.client_name.trim().to_string(),
            client_email: draft.client_email.trim().to_string(),
            customer: draft.customer,
            items: draft.items,
            notes: draft.notes,
            total,
            status: InvoiceStatus::Draft,
        })
    }

    /// Validates a draft as an edit of this invoice.
    ///
    /// Keeps id and status. A customer reference that did not change is not
    /// re-resolved, so edits of orphaned invoices still go through.
    pub fn revise(
        &self,
        draft: InvoiceDraft,
        customers: &[Customer],
    ) -> Result<Self, ValidationError> {
        let draft = if draft.customer.is_some() && draft.customer != self.customer {
            resolve_customer(draft, customers)?
        } else {
            draft
        };
        validate_draft(&draft)?;

        let date = draft.date.unwrap_or(self.date);
        let due_date = draft.due_date.unwrap_or(self.due_date);
        let invoice_number = match draft.invoice_number {
            Some(number) if !number.trim().is_empty() => number.trim().to_string(),
            _ => self.invoice_number.clone(),
        };
        let total = items_total(&draft.items);

        Ok(Self {
            id: self.id,
            invoice_number,
            date,
            due_date,
            client_name: draft.client_name.trim().to_string(),
            client_email: draft.client_email.trim().to_string(),
            customer: draft.customer,
            items: draft.items,
            notes: draft.notes,
            total,
            status: self.status,
        })
    }

    /// Returns a copy in `status`.
    pub fn with_status(&self, status: InvoiceStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }
}

/// Sum of line amounts.
pub fn items_total(items: &[InvoiceItem]) -> f64 {
    items.iter().map(|item| item.amount).sum()
}

fn resolve_customer(
    mut draft: InvoiceDraft,
    customers: &[Customer],
) -> Result<InvoiceDraft, ValidationError> {
    let Some(customer_id) = draft.customer else {
        return Ok(draft);
    };
    let customer = customers
        .iter()
        .find(|customer| customer.id() == customer_id)
        .ok_or(ValidationError::UnknownCustomer(customer_id))?;

    if draft.client_name.trim().is_empty() {
        draft.client_name = customer.name().to_string();
    }
    if draft.client_email.trim().is_empty() {
        draft.client_email = customer.contact().email.clone();
    }
    Ok(draft)
}

fn validate_draft(draft: &InvoiceDraft) -> Result<(), ValidationError> {
    require("client name", &draft.client_name)?;
    check_optional_email(&draft.client_email)?;

    if draft.items.is_empty() {
        return Err(ValidationError::NoInvoiceItems);
    }
    for (index, item) in draft.items.iter().enumerate() {
        if item.description.trim().is_empty() {
            return Err(ValidationError::EmptyItemDescription { index });
        }
        if !item.amount.is_finite() || item.amount <= 0.0 {
            return Err(ValidationError::NonPositiveItemAmount {
                index,
                amount: item.amount,
            });
        }
    }
    Ok(())
}

fn generate_invoice_number(date: NaiveDate) -> String {
    let suffix = Uuid::new_v4().as_u128() % 10_000;
    format!("INV-{}-{suffix:04}", date.year())
}

#[cfg(test)]
mod tests {
    use super::{generate_invoice_number, Invoice, InvoiceDraft, InvoiceItem};
    use crate::model::validation::ValidationError;
    use chrono::NaiveDate;

    fn one_line(item: InvoiceItem) -> InvoiceDraft {
        InvoiceDraft {
            client_name: "Acme Corp".to_string(),
            items: vec![item],
            ..InvoiceDraft::default()
        }
    }

    #[test]
    fn item_amount_follows_quantity_and_rate() {
        let item = InvoiceItem::new("Consulting", 2.0, 150.0);
        assert_eq!(item.amount, 300.0);
        assert_eq!(item.with_quantity(3.0).amount, 450.0);
        assert_eq!(item.with_rate(100.0).amount, 200.0);
    }

    #[test]
    fn description_edit_keeps_amount() {
        let item = InvoiceItem::new("", 1.0, 10.0).with_description("Hosting");
        assert_eq!(item.amount, 10.0);
        assert_eq!(item.description, "Hosting");
    }

    #[test]
    fn generated_number_uses_year_and_four_digits() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let number = generate_invoice_number(date);
        assert!(number.starts_with("INV-2026-"), "{number}");
        assert_eq!(number.len(), "INV-2026-0000".len());
    }

    #[test]
    fn due_date_past_calendar_end_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let draft = InvoiceDraft {
            date: Some(NaiveDate::MAX),
            ..one_line(InvoiceItem::new("Audit", 1.0, 10.0))
        };
        assert_eq!(
            Invoice::submit(draft, &[], today).unwrap_err(),
            ValidationError::DateOutOfRange("due date")
        );

        let explicit = InvoiceDraft {
            date: Some(NaiveDate::MAX),
            due_date: Some(NaiveDate::MAX),
            ..one_line(InvoiceItem::new("Audit", 1.0, 10.0))
        };
        assert_eq!(Invoice::submit(explicit, &[], today).unwrap().due_date, NaiveDate::MAX);
    }

    #[test]
    fn infinite_or_nan_item_amounts_are_rejected() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        for rate in [f64::INFINITY, f64::NAN] {
            let err = Invoice::submit(one_line(InvoiceItem::new("Audit", 1.0, rate)), &[], today)
                .unwrap_err();
            assert!(
                matches!(err, ValidationError::NonPositiveItemAmount { index: 0, .. }),
                "{err:?}"
            );
        }
    }
}
