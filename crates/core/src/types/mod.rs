//! Core types for Tiny ERP.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod status;

pub use id::*;
pub use money::{CurrencyCode, Money, parse_amount};
pub use status::{ClientSegment, UserRole};
