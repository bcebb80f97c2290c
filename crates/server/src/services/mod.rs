//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Username/password check behind a configurable credential strategy
//! - `email` - Mail transport abstraction (SMTP or in-memory recording)
//! - `contact` - Contact form rendering and relay to the site owner

pub mod auth;
pub mod contact;
pub mod email;
