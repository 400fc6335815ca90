//! Our Shop Core - Shared types library.
//!
//! This crate provides common types used across all Our Shop components:
//! - `client` - The shopping client core (catalog, cart, session)
//! - `cli` - Command-line tools for account management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and passwords

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
