//! Numerical building blocks.
//!
//! - [`solvers`]: Bracketing root finders

pub mod solvers;
