//! Monte Carlo pricing of European options.
//!
//! # Architecture
//!
//! ```text
//! SimulationPricer
//! ├── SimulationConfig  (block size, parallel switch)
//! ├── PricerRng         (one generator per block, seeded from (seed, block))
//! └── Orchestration
//!     ├── price()         sequential, injected rand::Rng
//!     └── price_seeded()  rayon over blocks, ordered combination
//! ```
//!
//! # Reproducibility
//!
//! Per-block `(count, Σx, Σx²)` are collected in block order and folded
//! sequentially. Floating-point addition is therefore performed in the same
//! order on every run, and `price_seeded` returns bit-identical results
//! whether the rayon pool has one thread or many.
//!
//! ```rust
//! use pricer_models::instruments::{OptionContract, OptionType};
//! use pricer_pricing::mc::{SimulationConfig, SimulationPricer};
//!
//! let call = OptionContract::new(100.0, 100.0, 0.05, 1.0, OptionType::Call).unwrap();
//! let config = SimulationConfig::builder().block_size(10_000).build().unwrap();
//! let pricer = SimulationPricer::new(config).unwrap();
//!
//! let result = pricer.price_seeded(&call, 0.2, 50_000, 42).unwrap();
//! println!("Price: {} +/- {}", result.price, result.confidence_95());
//! ```

mod config;
mod pricer;

pub use config::{SimulationConfig, SimulationConfigBuilder, DEFAULT_BLOCK_SIZE, MIN_SAMPLES};
pub use pricer::{SimulationPricer, SimulationResult};
