//! Submit-time validation errors.
//!
//! `ValidationError` is the only recoverable failure in the domain. Every
//! variant renders a sentence suitable for a notification description.

use crate::model::contact::ContactId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Reason a submitted entity was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Entity id is nil.
    NilId,
    /// Another entity in the same collection already uses this id.
    DuplicateId(Uuid),
    /// Required text field is blank after trim.
    MissingField(&'static str),
    /// Email is present but not shaped like `local@domain.tld`.
    InvalidEmail(String),
    /// Invoice was submitted without line items.
    NoInvoiceItems,
    /// Invoice line item at `index` (zero-based) has a blank description.
    EmptyItemDescription { index: usize },
    /// Invoice line item at `index` (zero-based) has a non-positive or
    /// non-finite amount.
    NonPositiveItemAmount { index: usize, amount: f64 },
    /// A derived date would fall outside the supported calendar.
    DateOutOfRange(&'static str),
    /// Referenced customer is not present in the live collection.
    UnknownCustomer(ContactId),
    /// Transaction amount is zero, negative, or not finite.
    InvalidAmount(f64),
    /// Value change is NaN or infinite.
    NonFiniteAmount(f64),
    /// Transaction category does not belong to the selected kind.
    UnknownCategory { kind: &'static str, category: String },
    /// Transaction account is not one of the configured accounts.
    UnknownAccount(String),
    /// Registration password and confirmation differ.
    PasswordMismatch,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "id must not be empty"),
            Self::DuplicateId(id) => write!(f, "an entry with id {id} already exists"),
            Self::MissingField(field) => write!(f, "please enter a {field}"),
            Self::InvalidEmail(value) => write!(f, "`{value}` is not a valid email address"),
            Self::NoInvoiceItems => write!(f, "please add at least one item to the invoice"),
            Self::EmptyItemDescription { index } => {
                write!(f, "item {} is missing a description", index + 1)
            }
            Self::NonPositiveItemAmount { index, amount } => write!(
                f,
                "item {} must have a finite amount greater than zero (got {amount})",
                index + 1
            ),
            Self::DateOutOfRange(field) => write!(f, "{field} is out of range"),
            Self::UnknownCustomer(id) => write!(f, "customer not found: {id}"),
            Self::InvalidAmount(amount) => {
                write!(f, "amount must be greater than zero (got {amount})")
            }
            Self::NonFiniteAmount(amount) => {
                write!(f, "amount must be a finite number (got {amount})")
            }
            Self::UnknownCategory { kind, category } => {
                write!(f, "`{category}` is not a valid {kind} category")
            }
            Self::UnknownAccount(account) => write!(f, "unknown account `{account}`"),
            Self::PasswordMismatch => write!(f, "passwords do not match"),
        }
    }
}

impl Error for ValidationError {}

impl ValidationError {
    /// Stable machine-readable code, safe to log.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NilId => "nil_id",
            Self::DuplicateId(_) => "duplicate_id",
            Self::MissingField(_) => "missing_field",
            Self::InvalidEmail(_) => "invalid_email",
            Self::NoInvoiceItems => "no_invoice_items",
            Self::EmptyItemDescription { .. } => "empty_item_description",
            Self::NonPositiveItemAmount { .. } => "non_positive_item_amount",
            Self::DateOutOfRange(_) => "date_out_of_range",
            Self::UnknownCustomer(_) => "unknown_customer",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::NonFiniteAmount(_) => "non_finite_amount",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::UnknownAccount(_) => "unknown_account",
            Self::PasswordMismatch => "password_mismatch",
        }
    }
}

/// Rejects blank values for a required field.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Accepts blank emails; rejects non-blank values that do not look like one.
pub(crate) fn check_optional_email(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || EMAIL_RE.is_match(trimmed) {
        return Ok(());
    }
    Err(ValidationError::InvalidEmail(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{check_optional_email, require, ValidationError};

    #[test]
    fn require_rejects_whitespace_only() {
        assert_eq!(
            require("name", "   ").unwrap_err(),
            ValidationError::MissingField("name")
        );
        assert!(require("name", "Jane").is_ok());
    }

    #[test]
    fn optional_email_allows_blank_and_rejects_garbage() {
        assert!(check_optional_email("").is_ok());
        assert!(check_optional_email("jane@x.com").is_ok());
        assert!(matches!(
            check_optional_email("not-an-email"),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn item_errors_use_one_based_positions() {
        let message = ValidationError::EmptyItemDescription { index: 0 }.to_string();
        assert_eq!(message, "item 1 is missing a description");
    }
}
