//! In-memory adapters for provider ports.

mod connection;

pub use connection::{LockEvent, RecordingConnection};
