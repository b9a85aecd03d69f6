//! Rubric files for course project grading.
//!
//! The [`rubric`] module writes and validates the per-team rubric document;
//! [`types::project`] holds the project and recorded-grade inputs it is
//! checked against.

pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod rubric;
pub mod scan;
pub mod types;
