//! Bootstrap orchestration services.

mod bootstrapper;
mod initializer;

pub use bootstrapper::{
    BootstrapError, BootstrapResult, DEFAULT_BOOTSTRAP_LOCK_KEY, SchemaBootstrapper,
};
pub use initializer::{InitializeError, initialize_database};
