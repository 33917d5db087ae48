//! Screen services.
//!
//! # Responsibility
//! - Own one collection per screen, injected at construction.
//! - Turn model results into notifications for the UI.
//!
//! # Invariants
//! - A rejected operation leaves its collection unchanged.
//! - Every completed or rejected operation emits exactly one notification,
//!   except tag edits that change nothing.

pub mod contact_service;
pub mod customer_service;
pub mod dashboard;
pub mod error;
pub mod invoice_service;
pub mod transaction_service;
