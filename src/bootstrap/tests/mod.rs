//! Unit tests for the bootstrap module.

mod support;
