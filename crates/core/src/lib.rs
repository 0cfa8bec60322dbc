//! Shoestore Core - Shared types library.
//!
//! This crate provides common types used across all Shoestore components:
//! - `web` - The inventory web application
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and the row-version token

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
