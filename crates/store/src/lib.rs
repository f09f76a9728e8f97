//! Append-only submission store backed by a single xlsx workbook.
//!
//! The workbook is the only shared mutable resource. Every operation opens
//! the file, works on it, and releases it; nothing is cached between calls.

pub mod cell;
pub mod config;
pub mod error;
pub mod schema;
pub mod store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use store::{Row, SubmissionStore};
