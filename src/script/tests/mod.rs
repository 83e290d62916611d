//! Unit tests for script splitting.
