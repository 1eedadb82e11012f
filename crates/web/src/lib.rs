//! Fieldhand Web library.
//!
//! This crate provides the web front end as a library, allowing it to be
//! tested and reused. The binary in `main.rs` wires it to a listener.
//!
//! All data round-trips through the BaseLinker API on every request; the
//! server keeps no local state beyond the shared HTTP client.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
