//! Dashboard domain model.
//!
//! # Responsibility
//! - Define canonical entity shapes used by every screen.
//! - Own the Contact <-> Customer promotion/demotion transforms.
//! - Keep submit-time validation rules next to the data they guard.
//!
//! # Invariants
//! - Every entity is identified by a stable, non-nil id.
//! - Mutation helpers are pure: they return a new value and never touch the
//!   caller's collection.

pub mod account;
pub mod auth;
pub mod contact;
pub mod customer;
pub mod invoice;
pub mod transaction;
pub mod validation;

use chrono::{NaiveDate, Utc};

/// Current calendar date in UTC, the default for date fields.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
