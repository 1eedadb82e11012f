//! Core types for Fieldhand.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod edit;
pub mod id;

pub use edit::{ApplyResult, BatchReport, EditOutcome, FailureKind, FieldEdit};
pub use id::*;
