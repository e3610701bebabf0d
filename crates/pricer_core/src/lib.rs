//! # pricer_core: Numerical Foundation for the Valuation Workspace
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error types: `DomainError`, `SolverError`, `PricingError` (`types::error`)
//! - Bracketing root finder: `BisectionSolver`, `SolverConfig`, `RootResult` (`math::solvers`)
//! - Term structures: `RateCurve`, `YieldCurve`, `ShiftedCurve` (`market_data::curves`)
//! - Compounding conventions: `CompoundingConvention` (`market_data::compounding`)
//!
//! ## Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - tracing: Diagnostic events (no subscriber is installed here)
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::curves::{RateCurve, YieldCurve};
//! use pricer_core::market_data::CompoundingConvention;
//! use pricer_core::math::solvers::solve;
//!
//! // Discount factor under a flat 5% annual curve
//! let curve = RateCurve::flat(0.05).unwrap();
//! let df = curve.discount_factor(2.0, CompoundingConvention::Annual).unwrap();
//! assert!((df - 1.0 / 1.1025).abs() < 1e-15);
//!
//! // Recover the rate from the discount factor
//! let result = solve(
//!     |r: f64| 1.0 / (1.0 + r).powi(2) - df,
//!     0.0,
//!     1.0,
//!     1e-12,
//!     200,
//! )
//! .unwrap();
//! assert!((result.root - 0.05).abs() < 1e-10);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for curves, conventions, errors and solver results

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
