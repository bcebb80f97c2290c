//! Folio server library.
//!
//! JSON API for a personal portfolio site: portfolio projects, resume
//! entries, a contact form relayed by email, and a bare credential check.
//! Exposed as a library so the CLI and the integration tests can build the
//! same router and stores as the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
