//! # Random Number Generation Infrastructure
//!
//! Random number generation for the Monte Carlo engine.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is built from an explicit seed;
//!   nothing is ever seeded from global state or the clock
//! - **Sharding**: [`PricerRng::for_block`] derives an independent stream
//!   for each fixed-size block of samples, so a parallel run draws exactly
//!   the same numbers whatever the thread count
//! - **Injection**: [`PricerRng`] implements `rand::RngCore` and can be
//!   passed to any API taking a `rand::Rng`
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//!
//! let uniform_value = rng.gen_uniform();
//! let normal_value = rng.gen_normal();
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::PricerRng;
