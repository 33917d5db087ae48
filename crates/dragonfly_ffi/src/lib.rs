//! Flutter-facing bindings for the DragonFly core.

pub mod api;
