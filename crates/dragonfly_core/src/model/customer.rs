//! Customer domain model.
//!
//! # Responsibility
//! - Compose a [`Contact`] with business-relationship fields.
//! - Provide the promotion (Contact -> Customer) and demotion
//!   (Customer -> Contact) transforms.
//! - Own the value-update path, the only writer of `value`/`last_purchase`.
//!
//! # Invariants
//! - `demote_to_contact(&promote_to_customer(&c, ext)) == c` for every `c`.
//! - The general edit path never changes `value` or `last_purchase`.
//! - Status transitions are unrestricted.

use crate::model::contact::{Contact, ContactDraft, ContactId, Tagged};
use crate::model::today;
use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Relationship stage of a customer.
///
/// `lead -> active -> inactive` is the usual path; any jump is allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    Lead,
    Active,
    Inactive,
}

impl CustomerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Channel the customer prefers to be reached on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    Email,
    Phone,
    Mail,
}

impl ContactMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Mail => "mail",
        }
    }
}

/// Business-relationship fields layered on top of a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerExtension {
    pub customer_since: NaiveDate,
    pub status: CustomerStatus,
    /// Accumulated lifetime value. Not floored at zero.
    pub value: f64,
    pub last_purchase: Option<NaiveDate>,
    pub preferred_contact_method: Option<ContactMethod>,
}

/// Caller-supplied subset of extension fields used at promotion time.
///
/// Absent fields fall back to the promotion defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerExtensionPatch {
    #[serde(default)]
    pub customer_since: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<CustomerStatus>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub last_purchase: Option<NaiveDate>,
    #[serde(default)]
    pub preferred_contact_method: Option<ContactMethod>,
}

/// Extension fields editable through the customer form.
///
/// Deliberately excludes `value` and `last_purchase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub customer_since: NaiveDate,
    #[serde(default)]
    pub status: CustomerStatus,
    #[serde(default)]
    pub preferred_contact_method: Option<ContactMethod>,
}

impl CustomerDetails {
    /// Form defaults for a new customer: since today, status `lead`.
    pub fn new_on(today: NaiveDate) -> Self {
        Self {
            customer_since: today,
            status: CustomerStatus::Lead,
            preferred_contact_method: None,
        }
    }
}

impl From<CustomerDetails> for CustomerExtensionPatch {
    fn from(value: CustomerDetails) -> Self {
        Self {
            customer_since: Some(value.customer_since),
            status: Some(value.status),
            value: None,
            last_purchase: None,
            preferred_contact_method: value.preferred_contact_method,
        }
    }
}

/// A contact in a business relationship.
///
/// Fields are private so `value` can only move through [`update_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(flatten)]
    contact: Contact,
    #[serde(flatten)]
    extension: CustomerExtension,
}

impl Customer {
    pub fn id(&self) -> ContactId {
        self.contact.id
    }

    pub fn name(&self) -> &str {
        &self.contact.name
    }

    /// Embedded contact-shaped record.
    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn extension(&self) -> &CustomerExtension {
        &self.extension
    }

    pub fn status(&self) -> CustomerStatus {
        self.extension.status
    }

    pub fn value(&self) -> f64 {
        self.extension.value
    }

    pub fn is_active(&self) -> bool {
        self.extension.status == CustomerStatus::Active
    }

    /// Returns `CustomerStatus::Active` copy.
    pub fn activate(&self) -> Self {
        set_status(self, CustomerStatus::Active)
    }

    /// Returns `CustomerStatus::Inactive` copy.
    pub fn deactivate(&self) -> Self {
        set_status(self, CustomerStatus::Inactive)
    }

    /// Applies a form edit: contact fields and editable details are replaced,
    /// id, `value` and `last_purchase` are kept.
    pub fn edit(&self, draft: ContactDraft, details: CustomerDetails) -> Self {
        Self {
            contact: self.contact.with_draft(draft),
            extension: CustomerExtension {
                customer_since: details.customer_since,
                status: details.status,
                value: self.extension.value,
                last_purchase: self.extension.last_purchase,
                preferred_contact_method: details.preferred_contact_method,
            },
        }
    }

    /// Checks submit-time rules of the embedded contact.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.contact.validate()
    }
}

impl Tagged for Customer {
    fn tags(&self) -> &[String] {
        &self.contact.tags
    }

    fn tags_mut(&mut self) -> &mut Vec<String> {
        &mut self.contact.tags
    }
}

/// Promotes a contact using today's date for a missing `customer_since`.
pub fn promote_to_customer(contact: &Contact, patch: Option<CustomerExtensionPatch>) -> Customer {
    promote_to_customer_on(contact, patch, today())
}

/// Promotes a contact; `today` fills a missing `customer_since`.
///
/// The input contact is copied unchanged. Calling this twice with the same
/// inputs yields structurally equal customers.
pub fn promote_to_customer_on(
    contact: &Contact,
    patch: Option<CustomerExtensionPatch>,
    today: NaiveDate,
) -> Customer {
    let patch = patch.unwrap_or_default();
    Customer {
        contact: contact.clone(),
        extension: CustomerExtension {
            customer_since: patch.customer_since.unwrap_or(today),
            status: patch.status.unwrap_or_default(),
            value: patch.value.unwrap_or(0.0),
            last_purchase: patch.last_purchase,
            preferred_contact_method: patch.preferred_contact_method,
        },
    }
}

/// Projects a customer back to exactly its contact fields.
pub fn demote_to_contact(customer: &Customer) -> Contact {
    customer.contact.clone()
}

/// Adds `delta` to the customer's value, stamping today as last purchase
/// when `delta > 0`.
pub fn update_value(customer: &Customer, delta: f64) -> Customer {
    update_value_on(customer, delta, today())
}

/// Clock-injected form of [`update_value`].
///
/// Negative deltas are applied as-is, even when the result drops below zero.
pub fn update_value_on(customer: &Customer, delta: f64, today: NaiveDate) -> Customer {
    let mut next = customer.clone();
    next.extension.value += delta;
    if delta > 0.0 {
        next.extension.last_purchase = Some(today);
    }
    next
}

/// Returns a copy in `status`; any transition is permitted.
pub fn set_status(customer: &Customer, status: CustomerStatus) -> Customer {
    let mut next = customer.clone();
    next.extension.status = status;
    next
}

#[cfg(test)]
mod tests {
    use super::{
        promote_to_customer_on, set_status, update_value_on, CustomerDetails,
        CustomerExtensionPatch, CustomerStatus,
    };
    use crate::model::contact::Contact;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn promotion_applies_patch_over_defaults() {
        let contact = Contact::new("Jane");
        let patch = CustomerExtensionPatch {
            status: Some(CustomerStatus::Active),
            value: Some(12_500.0),
            ..Default::default()
        };
        let customer = promote_to_customer_on(&contact, Some(patch), day(2026, 1, 2));
        assert_eq!(customer.status(), CustomerStatus::Active);
        assert_eq!(customer.value(), 12_500.0);
        assert_eq!(customer.extension().customer_since, day(2026, 1, 2));
        assert_eq!(customer.extension().last_purchase, None);
    }

    #[test]
    fn edit_keeps_value_and_last_purchase() {
        let contact = Contact::new("Jane");
        let customer = promote_to_customer_on(&contact, None, day(2026, 1, 2));
        let customer = update_value_on(&customer, 300.0, day(2026, 2, 3));

        let mut draft = customer.contact().to_draft();
        draft.name = "Jane Doe".to_string();
        let mut details = CustomerDetails::new_on(day(2025, 12, 1));
        details.status = CustomerStatus::Inactive;
        let edited = customer.edit(draft, details);

        assert_eq!(edited.id(), customer.id());
        assert_eq!(edited.name(), "Jane Doe");
        assert_eq!(edited.value(), 300.0);
        assert_eq!(edited.extension().last_purchase, Some(day(2026, 2, 3)));
        assert_eq!(edited.status(), CustomerStatus::Inactive);
        assert_eq!(edited.extension().customer_since, day(2025, 12, 1));
    }

    #[test]
    fn status_can_move_backwards() {
        let customer = promote_to_customer_on(&Contact::new("Jane"), None, day(2026, 1, 2));
        let active = customer.activate();
        assert!(active.is_active());
        let lead = set_status(&active, CustomerStatus::Lead);
        assert_eq!(lead.status(), CustomerStatus::Lead);
    }

    #[test]
    fn value_can_go_negative() {
        let customer = promote_to_customer_on(&Contact::new("Jane"), None, day(2026, 1, 2));
        let next = update_value_on(&customer, -25.0, day(2026, 1, 3));
        assert_eq!(next.value(), -25.0);
        assert_eq!(next.extension().last_purchase, None);
    }

    #[test]
    fn details_convert_to_patch_without_value() {
        let patch = CustomerExtensionPatch::from(CustomerDetails::new_on(day(2026, 1, 2)));
        assert_eq!(patch.value, None);
        assert_eq!(patch.status, Some(CustomerStatus::Lead));
    }
}
