//! Core types for Shoestore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod version;

pub use id::*;
pub use version::RowVersion;
