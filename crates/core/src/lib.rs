//! Folio Core - Shared types library.
//!
//! Types used by every Folio component:
//! - `server` - the HTTP API serving portfolio, resume, contact and login routes
//! - `cli` - migrations, sample data and admin user management
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients.
//!
//! # Modules
//!
//! - [`types`] - Document identifiers and the validated email address type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
