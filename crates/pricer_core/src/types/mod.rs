//! Core types shared by every layer.
//!
//! - [`error`]: `DomainError`, `SolverError`, `PricingError`

pub mod error;

pub use error::{DomainError, PricingError, SolverError};
