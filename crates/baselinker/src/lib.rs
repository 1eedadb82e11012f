//! BaseLinker connector client and the batch field editor.
//!
//! This crate owns everything between the front ends and the vendor:
//!
//! - [`config`] - token + endpoint configuration loaded once at startup
//! - [`client`] - thin typed wrapper over the connector's form-POST protocol
//! - [`types`] - wire shapes for inventories, products, and field definitions
//! - [`editor`] - the batch-apply policy and the joined catalog view
//!
//! # Security
//!
//! The API token grants full access to the BaseLinker account. It is held in
//! a [`secrecy::SecretString`] and never appears in logs or `Debug` output.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod editor;
pub mod error;
pub mod types;

pub use client::BaselinkerClient;
pub use config::{Config, ConfigError};
pub use editor::{Catalog, FieldValue, ProductRow, apply_batch, load_catalog};
pub use error::Error;
