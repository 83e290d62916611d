//! Domain model for schema bootstrap runs.

mod ids;
mod report;
mod script;
mod signature;

pub use ids::BootstrapRunId;
pub use report::{BootstrapOutcome, BootstrapReport, ExecutedScript};
pub use script::{BootstrapScript, ScriptKind};
pub use signature::{DEFAULT_SIGNATURE_TABLES, SignatureTables};
