//! Case-insensitive substring filtering.
//!
//! # Invariants
//! - Filtering is stable: matches keep their original relative order.
//! - A blank query is the identity filter.
//! - Source collections are never mutated.

use crate::model::contact::Contact;
use crate::model::customer::Customer;

/// Text fields that free-text search may look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Name,
    Email,
    Phone,
    Company,
}

/// Fields used by the contact and customer search boxes.
pub const DEFAULT_SEARCH_FIELDS: &[SearchField] = &[
    SearchField::Name,
    SearchField::Email,
    SearchField::Phone,
    SearchField::Company,
];

/// Entities that expose text for free-text search.
pub trait Searchable {
    fn search_field(&self, field: SearchField) -> &str;
}

impl Searchable for Contact {
    fn search_field(&self, field: SearchField) -> &str {
        match field {
            SearchField::Name => &self.name,
            SearchField::Email => &self.email,
            SearchField::Phone => &self.phone,
            SearchField::Company => self.company(),
        }
    }
}

impl Searchable for Customer {
    fn search_field(&self, field: SearchField) -> &str {
        self.contact().search_field(field)
    }
}

/// Filters on [`DEFAULT_SEARCH_FIELDS`].
pub fn filter_collection<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    filter_by_fields(items, DEFAULT_SEARCH_FIELDS, query)
}

/// Keeps items where any of `fields` contains `query`, ignoring case.
///
/// The query is trimmed first; a blank query returns every item in order.
pub fn filter_by_fields<T: Searchable + Clone>(
    items: &[T],
    fields: &[SearchField],
    query: &str,
) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| matches_any(*item, fields, &needle))
        .cloned()
        .collect()
}

fn matches_any<T: Searchable>(item: &T, fields: &[SearchField], needle: &str) -> bool {
    fields
        .iter()
        .any(|field| item.search_field(*field).to_lowercase().contains(needle))
}
