//! Signature tables marking an initialized database.

use crate::provider::domain::SchemaProbe;

/// Tables whose presence means the baseline schema has been created.
pub const DEFAULT_SIGNATURE_TABLES: [&str; 5] =
    ["Customer", "Discount", "Order", "Product", "ShoppingCartItem"];

/// Canonical table names checked by the bootstrap probe.
///
/// If any of them exists in the catalog, ignoring ASCII case, the database
/// counts as initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureTables {
    names: Vec<String>,
}

impl SignatureTables {
    /// Creates a custom signature list.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the signature names in declaration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the signature names present in `probe`, in declaration order.
    #[must_use]
    pub fn matched_in(&self, probe: &SchemaProbe) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| probe.contains_ignore_case(name))
            .cloned()
            .collect()
    }
}

impl Default for SignatureTables {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNATURE_TABLES)
    }
}
