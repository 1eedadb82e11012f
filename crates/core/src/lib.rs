//! Fieldhand Core - Shared types library.
//!
//! This crate provides common types used across all Fieldhand components:
//! - `baselinker` - BaseLinker API client and the batch field editor
//! - `web` - Local web UI with the editable product table
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs plus the batch-edit vocabulary (`FieldEdit`,
//!   `ApplyResult`, `BatchReport`)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
