//! Our Shop client core.
//!
//! The stateful heart of the shopping client: a per-session cart over an
//! append-only catalog, session state replaced wholesale by account
//! operations, and a thin typed client for the remote Account Service.
//!
//! # Architecture
//!
//! - The cart is purely client-local; checkout is an in-memory transaction
//!   behind an injectable [`cart::Settlement`] seam
//! - The Account Service is the system of record for credentials; the
//!   [`account::AccountClient`] only translates shapes, never applies
//!   business logic
//! - Device capabilities (location, image picking) are opaque asynchronous
//!   providers that feed display-only fields
//!
//! # Example
//!
//! ```rust,ignore
//! use our_shop_client::account::AccountClient;
//! use our_shop_client::cart::LocalSettlement;
//! use our_shop_client::catalog::Catalog;
//! use our_shop_client::config::ClientConfig;
//! use our_shop_client::session::SessionManager;
//!
//! let config = ClientConfig::from_env()?;
//! let catalog = Catalog::with_defaults();
//! let sessions = SessionManager::new(AccountClient::new(&config));
//!
//! sessions.login("user@example.com", "hunter22").await?;
//! let laptop = catalog.get(1.into()).unwrap();
//! sessions.add_to_cart(laptop)?;
//! let receipt = sessions.checkout(&catalog, &mut LocalSettlement)?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod capability;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod session;
