//! # Pricer Models (L2: Business Logic)
//!
//! Instruments and closed-form models.
//!
//! This crate provides:
//! - Cash-flow schedules and the bullet-bond schedule builder (`instruments`)
//! - European option contracts and forward contracts (`instruments`)
//! - Coupon frequencies (`schedules`)
//! - Black-Scholes prices, Greeks and implied volatility (`analytical`)
//!
//! ## Design Principles
//!
//! - **Validated construction**: instruments and models reject invalid inputs
//!   with `pricer_core::types::DomainError` and are immutable afterwards
//! - **Shared root finder**: implied volatility uses `pricer_core`'s bisection

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod schedules;
