//! Search projections over in-memory collections.
//!
//! # Responsibility
//! - Derive filtered views from screen-owned collections.
//! - Keep matching rules identical across contact and customer screens.

pub mod filter;
