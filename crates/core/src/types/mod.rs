//! Core types for Folio.

pub mod email;
pub mod id;

pub use email::{Email, EmailError};
pub use id::{IdParseError, PortfolioItemId, ResumeItemId, UserId};
