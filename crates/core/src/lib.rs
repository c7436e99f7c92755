//! Tiny ERP Core - Shared types library.
//!
//! This crate provides common types used across all Tiny ERP components:
//! - `store` - Persistent entity stores, the sales service and reports
//! - `cli` - Command-line front end over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O and no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, segments and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
