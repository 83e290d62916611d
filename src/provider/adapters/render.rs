//! Create-script rendering shared by the dialect adapters.

use crate::provider::{
    domain::{ColumnDefinition, ProviderId, SchemaModel, TableDefinition},
    ports::ScriptGenerationError,
};
use crate::script::BATCH_DELIMITER;
use minijinja::Environment;
use serde::Serialize;

const CREATE_TABLE_TEMPLATE: &str =
    "CREATE TABLE {{ name }} (\n{{ definitions | join(separator) }}\n)";

const ADD_FOREIGN_KEY_TEMPLATE: &str = concat!(
    "ALTER TABLE {{ table }} ADD CONSTRAINT {{ constraint }} ",
    "FOREIGN KEY ({{ column }}) REFERENCES {{ references_table }} ({{ references_column }})",
    "{% if cascade %} ON DELETE CASCADE{% endif %}",
);

const DEFINITION_SEPARATOR: &str = ",\n";
const INDENT: &str = "    ";

/// SQL dialect details needed to render a create script.
pub(super) trait Dialect {
    /// Quotes an identifier for this dialect.
    fn quote(&self, identifier: &str) -> String;

    /// Returns the column type clause, including identity generation.
    fn column_type(&self, column: &ColumnDefinition) -> String;
}

#[derive(Serialize)]
struct CreateTableContext {
    name: String,
    definitions: Vec<String>,
    separator: &'static str,
}

#[derive(Serialize)]
struct AddForeignKeyContext {
    table: String,
    constraint: String,
    column: String,
    references_table: String,
    references_column: String,
    cascade: bool,
}

/// Renders the model as batch-delimited statements: every table first, then
/// every foreign key, each in its own batch.
pub(super) fn render_create_script(
    dialect: &impl Dialect,
    provider: &ProviderId,
    model: &SchemaModel,
) -> Result<String, ScriptGenerationError> {
    if model.tables().is_empty() {
        return Err(ScriptGenerationError::EmptyModel(provider.to_string()));
    }

    let environment = Environment::new();
    let mut batches = Vec::new();
    for table in model.tables() {
        let context = create_table_context(dialect, table);
        batches.push(render(&environment, provider, CREATE_TABLE_TEMPLATE, &context)?);
    }
    for table in model.tables() {
        for context in foreign_key_contexts(dialect, table) {
            batches.push(render(&environment, provider, ADD_FOREIGN_KEY_TEMPLATE, &context)?);
        }
    }

    Ok(batches.join(&format!("\n{BATCH_DELIMITER}\n")))
}

fn create_table_context(dialect: &impl Dialect, table: &TableDefinition) -> CreateTableContext {
    let mut definitions: Vec<String> = table
        .columns()
        .iter()
        .map(|column| {
            let null_clause = if column.is_nullable() { "" } else { " NOT NULL" };
            format!(
                "{INDENT}{} {}{null_clause}",
                dialect.quote(column.name()),
                dialect.column_type(column),
            )
        })
        .collect();

    if !table.primary_key().is_empty() {
        let key_columns: Vec<String> = table
            .primary_key()
            .iter()
            .map(|column| dialect.quote(column))
            .collect();
        definitions.push(format!(
            "{INDENT}CONSTRAINT {} PRIMARY KEY ({})",
            dialect.quote(&format!("PK_{}", table.name())),
            key_columns.join(", "),
        ));
    }

    CreateTableContext {
        name: dialect.quote(table.name()),
        definitions,
        separator: DEFINITION_SEPARATOR,
    }
}

fn foreign_key_contexts(
    dialect: &impl Dialect,
    table: &TableDefinition,
) -> Vec<AddForeignKeyContext> {
    table
        .foreign_keys()
        .iter()
        .map(|foreign_key| AddForeignKeyContext {
            table: dialect.quote(table.name()),
            constraint: dialect.quote(&format!(
                "FK_{}_{}_{}",
                table.name(),
                foreign_key.column(),
                foreign_key.references_table(),
            )),
            column: dialect.quote(foreign_key.column()),
            references_table: dialect.quote(foreign_key.references_table()),
            references_column: dialect.quote(foreign_key.references_column()),
            cascade: foreign_key.cascades_on_delete(),
        })
        .collect()
}

fn render(
    environment: &Environment<'_>,
    provider: &ProviderId,
    template: &str,
    context: &impl Serialize,
) -> Result<String, ScriptGenerationError> {
    environment
        .render_str(template, context)
        .map_err(|error| ScriptGenerationError::TemplateRender {
            provider: provider.to_string(),
            reason: error.to_string(),
        })
}
