//! Catalog probe result.

use std::collections::BTreeSet;

/// Base-table names discovered in the connection's own catalog.
///
/// A probe reflects the catalog at the moment it was taken and is never
/// cached; each bootstrap run takes a fresh one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaProbe {
    tables: BTreeSet<String>,
}

impl SchemaProbe {
    /// Creates a probe from discovered table names.
    #[must_use]
    pub fn new(tables: impl IntoIterator<Item = String>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    /// Returns the discovered table names in sorted order.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(String::as_str)
    }

    /// Returns whether the catalog holds no base tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns whether a table with this name exists, ignoring ASCII case.
    #[must_use]
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.tables.iter().any(|table| table.eq_ignore_ascii_case(name))
    }
}
