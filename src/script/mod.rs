//! Script command splitting for batch-delimited SQL scripts.
//!
//! Schema scripts are written as batches separated by a sentinel line
//! ([`BATCH_DELIMITER`]). Each batch is submitted to the backend as one
//! command. Long lines may be wrapped with a trailing backslash, which is
//! removed before batches are cut.

mod splitter;

pub use splitter::{BATCH_DELIMITER, is_executable, split};

#[cfg(test)]
mod tests;
