//! Market data structures for discounting.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait, piecewise-affine `RateCurve`, shifted views
//! - [`compounding`]: Compounding conventions (annual, periodic, continuous)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{RateCurve, YieldCurve};
//! use pricer_core::market_data::CompoundingConvention;
//!
//! let curve = RateCurve::flat(0.05).unwrap();
//! let semi = CompoundingConvention::periodic(2).unwrap();
//! let df = curve.discount_factor(10.0, semi).unwrap();
//! assert!((df - 1.025_f64.powi(-20)).abs() < 1e-14);
//! ```

pub mod compounding;
pub mod curves;

pub use compounding::CompoundingConvention;
pub use curves::{AffineSegment, RateCurve, ShiftedCurve, YieldCurve};
