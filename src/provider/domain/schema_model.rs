//! Host-supplied schema model rendered into create scripts.
//!
//! The model is backend-neutral: column types are logical and each provider
//! maps them to its own SQL dialect when generating the create script.

use super::ProviderDomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Logical column type, mapped to a concrete SQL type per dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnType {
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Boolean flag.
    Boolean,
    /// Fixed-point decimal.
    Decimal {
        /// Total number of digits.
        precision: u8,
        /// Digits after the decimal point.
        scale: u8,
    },
    /// Character data, unbounded when `max_length` is `None`.
    Text {
        /// Maximum length in characters.
        #[serde(default)]
        max_length: Option<u32>,
    },
    /// Timestamp without time zone, stored in UTC by convention.
    DateTime,
    /// 128-bit unique identifier.
    Guid,
    /// Unbounded binary data.
    Binary,
}

/// Column of a table definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    name: String,
    column_type: ColumnType,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    identity: bool,
}

impl ColumnDefinition {
    /// Creates a non-nullable column.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            identity: false,
        }
    }

    /// Marks the column as nullable.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as a database-generated identity.
    #[must_use]
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the logical column type.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Returns whether the column accepts `NULL`.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns whether the column is database-generated.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.identity
    }
}

/// Single-column foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    column: String,
    references_table: String,
    references_column: String,
    #[serde(default)]
    cascade_on_delete: bool,
}

impl ForeignKey {
    /// Creates a foreign key from `column` to `references_table.references_column`.
    #[must_use]
    pub fn new(
        column: impl Into<String>,
        references_table: impl Into<String>,
        references_column: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            references_table: references_table.into(),
            references_column: references_column.into(),
            cascade_on_delete: false,
        }
    }

    /// Deletes dependent rows when the referenced row is deleted.
    #[must_use]
    pub const fn cascade_on_delete(mut self) -> Self {
        self.cascade_on_delete = true;
        self
    }

    /// Returns the referencing column.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the referenced table.
    #[must_use]
    pub fn references_table(&self) -> &str {
        &self.references_table
    }

    /// Returns the referenced column.
    #[must_use]
    pub fn references_column(&self) -> &str {
        &self.references_column
    }

    /// Returns whether deletes cascade.
    #[must_use]
    pub const fn cascades_on_delete(&self) -> bool {
        self.cascade_on_delete
    }
}

/// Table of the schema model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    name: String,
    columns: Vec<ColumnDefinition>,
    #[serde(default)]
    primary_key: Vec<String>,
    #[serde(default)]
    foreign_keys: Vec<ForeignKey>,
}

impl TableDefinition {
    /// Creates a table without columns or keys.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the primary key columns.
    #[must_use]
    pub fn with_primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a foreign key.
    #[must_use]
    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Returns the primary key column names.
    #[must_use]
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    /// Returns the foreign keys in declaration order.
    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name == name)
    }
}

/// Validated set of tables making up the application's baseline schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemaModelData")]
pub struct SchemaModel {
    tables: Vec<TableDefinition>,
}

#[derive(Deserialize)]
struct SchemaModelData {
    tables: Vec<TableDefinition>,
}

impl TryFrom<SchemaModelData> for SchemaModel {
    type Error = ProviderDomainError;

    fn try_from(value: SchemaModelData) -> Result<Self, Self::Error> {
        Self::new(value.tables)
    }
}

impl SchemaModel {
    /// Creates a validated schema model.
    ///
    /// Table order is preserved; create scripts emit tables in this order and
    /// add foreign keys only after every table exists.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDomainError`] when a table name repeats (ignoring
    /// ASCII case), a table has no columns, a key names a missing column, or
    /// a foreign key references a table outside the model.
    pub fn new(tables: Vec<TableDefinition>) -> Result<Self, ProviderDomainError> {
        let mut seen = HashSet::new();
        for table in &tables {
            if !seen.insert(table.name.to_ascii_lowercase()) {
                return Err(ProviderDomainError::DuplicateTable(table.name.clone()));
            }
            if table.columns.is_empty() {
                return Err(ProviderDomainError::EmptyTable(table.name.clone()));
            }
        }

        for table in &tables {
            validate_keys(table, &tables)?;
        }

        Ok(Self { tables })
    }

    /// Returns the tables in declaration order.
    #[must_use]
    pub fn tables(&self) -> &[TableDefinition] {
        &self.tables
    }
}

fn validate_keys(
    table: &TableDefinition,
    tables: &[TableDefinition],
) -> Result<(), ProviderDomainError> {
    let unknown_column = |column: &str| ProviderDomainError::UnknownColumn {
        table: table.name.clone(),
        column: column.to_owned(),
    };

    if let Some(missing) = table.primary_key.iter().find(|c| !table.has_column(c)) {
        return Err(unknown_column(missing));
    }

    for foreign_key in &table.foreign_keys {
        if !table.has_column(&foreign_key.column) {
            return Err(unknown_column(&foreign_key.column));
        }
        let referenced = tables
            .iter()
            .find(|candidate| candidate.name == foreign_key.references_table)
            .ok_or_else(|| ProviderDomainError::UnknownReferencedTable {
                table: table.name.clone(),
                referenced: foreign_key.references_table.clone(),
            })?;
        if !referenced.has_column(&foreign_key.references_column) {
            return Err(ProviderDomainError::UnknownColumn {
                table: referenced.name.clone(),
                column: foreign_key.references_column.clone(),
            });
        }
    }

    Ok(())
}
