//! Domain types and validation rules for AI solution request submissions.
//!
//! This crate performs no I/O. The store and HTTP crates depend on it for
//! the [`submission::Submission`] record and the rules that guard it.

pub mod error;
pub mod submission;
pub mod types;
