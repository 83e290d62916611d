//! Port contracts for bootstrap script sources.

mod script_source;

#[cfg(test)]
pub use script_source::MockScriptSource;
pub use script_source::{ScriptSource, ScriptSourceError};
