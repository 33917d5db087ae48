//! Customer CSV export.
//!
//! # Invariants
//! - Column order is fixed by [`CUSTOMER_CSV_HEADERS`].
//! - Header row first, then one row per customer, joined by `\n`.
//! - Cells containing a comma, double quote or line break are wrapped in
//!   double quotes with inner quotes doubled.
//! - Dates render as `YYYY-MM-DD`; absent optional values render empty.

use crate::model::customer::Customer;
use chrono::NaiveDate;

pub const CUSTOMER_CSV_HEADERS: [&str; 16] = [
    "id",
    "name",
    "email",
    "phone",
    "address",
    "company",
    "title",
    "category",
    "notes",
    "tags",
    "contactType",
    "customerSince",
    "status",
    "value",
    "lastPurchase",
    "preferredContactMethod",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Renders customers as CSV text.
pub fn export_customers_csv(customers: &[Customer]) -> String {
    let mut lines = Vec::with_capacity(customers.len() + 1);
    lines.push(CUSTOMER_CSV_HEADERS.join(","));
    for customer in customers {
        let row = customer_row(customer)
            .iter()
            .map(|cell| escape_cell(cell))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }
    lines.join("\n")
}

/// Download name for an export taken on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("customers-{}.csv", date.format(DATE_FORMAT))
}

fn customer_row(customer: &Customer) -> [String; 16] {
    let contact = customer.contact();
    let extension = customer.extension();
    [
        contact.id.to_string(),
        contact.name.clone(),
        contact.email.clone(),
        contact.phone.clone(),
        contact.address.clone(),
        contact.company().to_string(),
        contact.title().to_string(),
        contact.category.as_str().to_string(),
        contact.notes.clone(),
        contact.tags.join(", "),
        contact.contact_type().as_str().to_string(),
        extension.customer_since.format(DATE_FORMAT).to_string(),
        extension.status.as_str().to_string(),
        extension.value.to_string(),
        extension
            .last_purchase
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        extension
            .preferred_contact_method
            .map(|method| method.as_str().to_string())
            .unwrap_or_default(),
    ]
}

fn escape_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
