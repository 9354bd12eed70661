//! # CargoOps Core
//!
//! Domain model, navigation/workspace services, and repository ports for the
//! warehouse console.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
