//! Interest rate curve abstractions.
//!
//! This module provides:
//! - [`YieldCurve`]: Trait for rates, discount factors and forward rates
//! - [`RateCurve`]: Piecewise-affine term structure with a frozen tail
//! - [`AffineSegment`]: One affine piece of a `RateCurve`
//! - [`ShiftedCurve`]: Borrowed view adding a parallel shift

mod rate_curve;
mod shifted;
mod traits;

pub use rate_curve::{AffineSegment, RateCurve};
pub use shifted::ShiftedCurve;
pub use traits::YieldCurve;
