//! Root-finding solvers for numerical computation.
//!
//! A single bracketing method is shared by every inversion in the workspace:
//! yield-from-price on the discounting side and implied volatility on the
//! option side.
//!
//! ## Available Solvers
//!
//! - [`BisectionSolver`]: Guaranteed convergence on any sign-changing bracket
//! - [`solve`]: Free-function form with explicit tolerance and iteration budget
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Half-width of the final bracket (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::{BisectionSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 (find √2)
//! let solver = BisectionSolver::new(SolverConfig::default());
//! let result = solver.solve(|x: f64| x * x - 2.0, 1.0, 2.0).unwrap();
//!
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod bisection;
mod config;

pub use bisection::{solve, BisectionSolver, RootResult};
pub use config::SolverConfig;
