//! # Pricer Pricing (Layer 3: Engines)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing runs the numerical engines on top of the Layer 1
//! foundation (`pricer_core`) and the Layer 2 instruments and closed-form
//! models (`pricer_models`):
//! - [`discounting`]: present value, durations, convexity and yield solving
//!   for cash-flow schedules under any yield curve
//! - [`mc`]: Monte Carlo valuation of European options, sequential with an
//!   injected generator or sharded across rayon workers
//! - [`rng`]: seeded generators, including per-block streams
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::curves::RateCurve;
//! use pricer_core::market_data::CompoundingConvention;
//! use pricer_models::instruments::{CashFlowSchedule, OptionContract, OptionType};
//! use pricer_models::schedules::Frequency;
//! use pricer_pricing::discounting::DiscountingEngine;
//! use pricer_pricing::mc::SimulationPricer;
//!
//! // Bond sensitivities
//! let bond = CashFlowSchedule::fixed_coupon_bond(1000.0, 0.05, 5.0, Frequency::Annual).unwrap();
//! let engine = DiscountingEngine::new(CompoundingConvention::Annual).unwrap();
//! let curve = RateCurve::flat(0.05).unwrap();
//! let pv = engine.present_value(&bond, &curve).unwrap();
//! assert!((pv - 1000.0).abs() < 1e-9);
//! let duration = engine.effective_duration(&bond, &curve, 1e-4).unwrap();
//! assert!(duration > 0.0);
//!
//! // Option by simulation
//! let call = OptionContract::new(100.0, 100.0, 0.05, 1.0, OptionType::Call).unwrap();
//! let result = SimulationPricer::default().price_seeded(&call, 0.2, 10_000, 42).unwrap();
//! assert!(result.std_error > 0.0);
//! ```
//!
//! ## Determinism
//!
//! No engine reads global state. Seeded Monte Carlo results depend only on
//! the inputs, the seed and the configured block size.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod discounting;
pub mod mc;
pub mod rng;
