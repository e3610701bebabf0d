//! Payment schedule conventions.
//!
//! - [`Frequency`]: Coupon frequency, convertible to a compounding convention

mod frequency;

pub use frequency::Frequency;
