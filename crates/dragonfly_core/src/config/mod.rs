//! Screen configuration.
//!
//! # Responsibility
//! - Carry the initial collections each screen is constructed from.
//! - Load those collections from JSON fixtures.
//!
//! # Invariants
//! - Seeds are explicit values handed to screens; nothing here is global.
//! - A loaded seed never contains nil or repeated ids within a collection.

pub mod seed;

pub use seed::{ConfigError, DashboardSeed};
