//! Shoestore web application library.
//!
//! This crate provides the inventory application as a library, allowing the
//! router, repository, and configuration to be exercised directly from the
//! integration tests and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod models;
pub mod routes;
pub mod state;
