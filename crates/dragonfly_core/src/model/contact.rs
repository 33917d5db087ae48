//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical person/organization record shared by the contact
//!   and customer screens.
//! - Provide tag mutation helpers with duplicate-free semantics.
//!
//! # Invariants
//! - `id` is stable, never nil, and never reassigned after creation.
//! - `tags` holds no duplicate entries; insertion order is kept for display.
//! - Company/title only exist on the `Individual` variant.

use crate::model::validation::{check_optional_email, require, ValidationError};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable identifier for contacts and the customers promoted from them.
pub type ContactId = Uuid;

/// Relationship category shown as a badge on contact lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Personal,
    Business,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Business => "business",
            Self::Other => "other",
        }
    }
}

/// Flat label for [`ContactKind`], used by exports and UI toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    #[default]
    Individual,
    Company,
}

impl ContactType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Company => "company",
        }
    }
}

/// Variant-specific contact fields.
///
/// An individual may work somewhere under some title; a company contact is
/// the organization itself, so it carries neither. Records without a
/// `contact_type` field read as individuals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "contact_type", rename_all = "snake_case")]
pub enum ContactKind {
    Individual { company: String, title: String },
    Company,
}

/// Loose wire shape accepted when reading a [`ContactKind`].
#[derive(Deserialize)]
struct ContactKindRecord {
    #[serde(default)]
    contact_type: ContactType,
    #[serde(default)]
    company: String,
    #[serde(default)]
    title: String,
}

impl<'de> Deserialize<'de> for ContactKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = ContactKindRecord::deserialize(deserializer)?;
        Ok(match record.contact_type {
            ContactType::Individual => Self::Individual {
                company: record.company,
                title: record.title,
            },
            ContactType::Company => Self::Company,
        })
    }
}

impl Default for ContactKind {
    fn default() -> Self {
        Self::Individual {
            company: String::new(),
            title: String::new(),
        }
    }
}

impl ContactKind {
    /// Builds an individual kind from employer and job title.
    pub fn individual(company: impl Into<String>, title: impl Into<String>) -> Self {
        Self::Individual {
            company: company.into(),
            title: title.into(),
        }
    }

    pub fn contact_type(&self) -> ContactType {
        match self {
            Self::Individual { .. } => ContactType::Individual,
            Self::Company => ContactType::Company,
        }
    }
}

/// Canonical contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Flattened so the wire shape carries a plain `contact_type` field.
    #[serde(flatten)]
    pub kind: ContactKind,
}

/// Form input for creating or editing a contact.
///
/// Drafts may be partially filled while a form is open; validation only
/// happens when they are submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub kind: ContactKind,
}

impl Contact {
    /// Creates an empty contact with a generated stable ID.
    ///
    /// Never validates: blank contacts are valid transient form state.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates an empty contact with a caller-provided ID.
    ///
    /// Used by seed fixtures whose identity already exists.
    pub fn with_id(id: ContactId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            category: Category::default(),
            notes: String::new(),
            tags: Vec::new(),
            kind: ContactKind::default(),
        }
    }

    /// Builds a contact from form input under a fresh ID.
    pub fn from_draft(draft: ContactDraft) -> Self {
        Self::from_draft_with_id(Uuid::new_v4(), draft)
    }

    pub(crate) fn from_draft_with_id(id: ContactId, draft: ContactDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            category: draft.category,
            notes: draft.notes,
            tags: dedupe_tags(draft.tags),
            kind: draft.kind,
        }
    }

    /// Returns a copy carrying the draft's fields under this contact's ID.
    pub fn with_draft(&self, draft: ContactDraft) -> Self {
        Self::from_draft_with_id(self.id, draft)
    }

    /// Returns the editable fields of this contact as form input.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            category: self.category,
            notes: self.notes.clone(),
            tags: self.tags.clone(),
            kind: self.kind.clone(),
        }
    }

    /// Employer for individuals; empty for company contacts.
    pub fn company(&self) -> &str {
        match &self.kind {
            ContactKind::Individual { company, .. } => company,
            ContactKind::Company => "",
        }
    }

    /// Job title for individuals; empty for company contacts.
    pub fn title(&self) -> &str {
        match &self.kind {
            ContactKind::Individual { title, .. } => title,
            ContactKind::Company => "",
        }
    }

    pub fn contact_type(&self) -> ContactType {
        self.kind.contact_type()
    }

    /// Checks submit-time rules.
    ///
    /// # Errors
    /// - `NilId` when the id is nil.
    /// - `MissingField("name")` when the name is blank.
    /// - `InvalidEmail` when a non-blank email is malformed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        require("name", &self.name)?;
        check_optional_email(&self.email)
    }
}

/// Constructs and submits a contact in one step.
///
/// # Errors
/// Returns the first [`ValidationError`] found; nothing is constructed then.
pub fn create_contact(draft: ContactDraft) -> Result<Contact, ValidationError> {
    let contact = Contact::from_draft(draft);
    contact.validate()?;
    Ok(contact)
}

/// Entities carrying a duplicate-free, display-ordered tag list.
pub trait Tagged: Clone {
    fn tags(&self) -> &[String];
    fn tags_mut(&mut self) -> &mut Vec<String>;

    /// Returns a copy with `tag` appended.
    ///
    /// Unchanged when the trimmed tag is blank or already present
    /// (case-sensitive exact match).
    fn add_tag(&self, tag: &str) -> Self {
        let mut next = self.clone();
        let trimmed = tag.trim();
        if trimmed.is_empty() || next.tags().iter().any(|existing| existing == trimmed) {
            return next;
        }
        next.tags_mut().push(trimmed.to_string());
        next
    }

    /// Returns a copy with every exact occurrence of `tag` removed.
    fn remove_tag(&self, tag: &str) -> Self {
        let mut next = self.clone();
        next.tags_mut().retain(|existing| existing != tag);
        next
    }

    /// Trims tags in place, dropping blanks and repeats.
    fn normalize_tags(&mut self) {
        let tags = std::mem::take(self.tags_mut());
        *self.tags_mut() = dedupe_tags(tags);
    }
}

impl Tagged for Contact {
    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn tags_mut(&mut self) -> &mut Vec<String> {
        &mut self.tags
    }
}

/// Trims tags, drops blanks and duplicates, keeps first-seen order.
pub fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() || unique.iter().any(|existing| existing == trimmed) {
            continue;
        }
        unique.push(trimmed.to_string());
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::{dedupe_tags, Contact, ContactKind, ContactType, Tagged};

    #[test]
    fn add_tag_trims_and_appends() {
        let contact = Contact::new("Jane").add_tag("  vip ");
        assert_eq!(contact.tags, vec!["vip".to_string()]);
    }

    #[test]
    fn add_tag_is_case_sensitive() {
        let contact = Contact::new("Jane").add_tag("vip").add_tag("VIP");
        assert_eq!(contact.tags, vec!["vip".to_string(), "VIP".to_string()]);
    }

    #[test]
    fn dedupe_keeps_first_seen_order() {
        let tags = dedupe_tags(vec![
            "b".to_string(),
            "a".to_string(),
            " b".to_string(),
            String::new(),
        ]);
        assert_eq!(tags, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn company_kind_has_no_employer_fields() {
        let mut contact = Contact::new("Acme Corp");
        contact.kind = ContactKind::Company;
        assert_eq!(contact.company(), "");
        assert_eq!(contact.title(), "");
        assert_eq!(contact.contact_type(), ContactType::Company);
    }

    #[test]
    fn missing_contact_type_reads_as_individual() {
        let raw = r#"{
            "id": "0b6f0d4e-55a1-4c3e-9a52-0f7a0a1d2b3c",
            "name": "Ann Lee",
            "company": "Northwind"
        }"#;
        let contact: Contact = serde_json::from_str(raw).unwrap();
        assert_eq!(contact.contact_type(), ContactType::Individual);
        assert_eq!(contact.company(), "Northwind");

        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["contact_type"], "individual");
        assert_eq!(json["title"], "");
    }

    #[test]
    fn company_record_ignores_employer_fields() {
        let raw = r#"{
            "id": "0b6f0d4e-55a1-4c3e-9a52-0f7a0a1d2b3d",
            "name": "Acme Corp",
            "contact_type": "company",
            "company": "stray"
        }"#;
        let contact: Contact = serde_json::from_str(raw).unwrap();
        assert_eq!(contact.kind, ContactKind::Company);

        let unknown = raw.replace("\"contact_type\": \"company\"", "\"contact_type\": \"robot\"");
        assert!(serde_json::from_str::<Contact>(&unknown).is_err());
    }

    #[test]
    fn normalize_tags_trims_and_dedupes_in_place() {
        let mut contact = Contact::new("Jane");
        contact.tags = vec!["vip".to_string(), " vip".to_string(), "  ".to_string()];
        contact.normalize_tags();
        assert_eq!(contact.tags, vec!["vip".to_string()]);
    }
}
