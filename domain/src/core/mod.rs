//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - opaque model selector handed to the completion provider
//! - [`question::Question`] - a validated user submission to debate
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod question;
