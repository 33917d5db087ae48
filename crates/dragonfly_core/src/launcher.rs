//! Module catalog shown on the dashboard home.
//!
//! The catalog is static; selecting a module only previews it.

use serde::Serialize;

/// One launchable dashboard module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Stable lowercase identifier, e.g. `analytics`.
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const MODULES: &[Module] = &[
    Module {
        id: "dashboard",
        title: "Dashboard",
        description: "Overview of your system performance and metrics.",
    },
    Module {
        id: "layers",
        title: "Layers",
        description: "Manage and organize your content layers.",
    },
    Module {
        id: "settings",
        title: "Settings",
        description: "Configure system preferences and options.",
    },
    Module {
        id: "documents",
        title: "Documents",
        description: "Access and manage your files and documents.",
    },
    Module {
        id: "analytics",
        title: "Analytics",
        description: "Review data insights and performance metrics.",
    },
    Module {
        id: "database",
        title: "Database",
        description: "Manage your database connections and data.",
    },
    Module {
        id: "users",
        title: "Users",
        description: "Manage user accounts and permissions.",
    },
    Module {
        id: "developer",
        title: "Developer",
        description: "Access developer tools and APIs.",
    },
];

/// Catalog in display order.
pub fn modules() -> &'static [Module] {
    MODULES
}

/// Looks up a module by id, ignoring surrounding whitespace and case.
pub fn find_module(id: &str) -> Option<&'static Module> {
    let normalized = id.trim();
    MODULES
        .iter()
        .find(|module| module.id.eq_ignore_ascii_case(normalized))
}

#[cfg(test)]
mod tests {
    use super::{find_module, modules};
    use std::collections::HashSet;

    #[test]
    fn catalog_has_eight_unique_modules() {
        let ids: HashSet<_> = modules().iter().map(|module| module.id).collect();
        assert_eq!(modules().len(), 8);
        assert_eq!(ids.len(), 8);
        assert_eq!(modules()[0].id, "dashboard");
    }

    #[test]
    fn find_module_normalizes_id() {
        let module = find_module(" Analytics ").expect("analytics should exist");
        assert_eq!(module.title, "Analytics");
        assert!(find_module("billing").is_none());
    }
}
