//! Option command implementation
//!
//! Values a European option in closed form and by simulation, and inverts
//! an observed price for implied volatility.

use std::path::Path;

use pricer_core::math::solvers::SolverConfig;
use pricer_models::analytical::{BlackScholes, Greeks, ImpliedVolatilitySolver, VolatilityEstimate};
use pricer_models::instruments::OptionContract;
use pricer_pricing::mc::{SimulationConfig, SimulationPricer, SimulationResult};
use serde::Serialize;
use tracing::info;

use crate::config::{self, ImpliedVolSpec, OptionRequest, SimulationSpec};
use crate::Result;

/// `valuer option` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionReport {
    /// Validated contract terms
    pub contract: OptionContract,
    /// Volatility used for pricing
    pub volatility: f64,
    /// Black-Scholes price
    pub analytic_price: f64,
    /// Black-Scholes sensitivities
    pub greeks: Greeks,
    /// One entry per requested sample count
    pub simulations: Vec<SimulationResult>,
    /// Present when a market price was given
    pub implied_volatility: Option<VolatilityEstimate>,
}

/// Run the option command
pub fn run(path: &Path, pretty: bool) -> Result<()> {
    info!(path = %path.display(), "Loading option request");
    let request: OptionRequest = config::load(path)?;
    let report = value(&request)?;
    info!(
        analytic_price = report.analytic_price,
        simulations = report.simulations.len(),
        "Option valuation complete"
    );
    super::emit(&report, pretty)
}

/// Values a parsed option request.
pub fn value(request: &OptionRequest) -> Result<OptionReport> {
    request.validate()?;
    let contract = request.contract.build()?;
    let model = BlackScholes::new(contract, request.volatility)?;

    let simulations = match &request.simulation {
        Some(spec) => simulate(&contract, request.volatility, spec)?,
        None => Vec::new(),
    };

    let implied_volatility = match request.market_price {
        Some(market_price) => Some(
            implied_vol_solver(&request.implied_vol)?.implied_volatility(&contract, market_price)?,
        ),
        None => None,
    };

    Ok(OptionReport {
        contract,
        volatility: request.volatility,
        analytic_price: model.price(),
        greeks: model.greeks(),
        simulations,
        implied_volatility,
    })
}

fn simulate(
    contract: &OptionContract,
    volatility: f64,
    spec: &SimulationSpec,
) -> Result<Vec<SimulationResult>> {
    let mut builder = SimulationConfig::builder();
    if let Some(block_size) = spec.block_size {
        builder = builder.block_size(block_size);
    }
    let pricer = SimulationPricer::new(builder.build()?)?;

    let mut results = Vec::with_capacity(spec.sample_counts.len());
    for &sample_count in &spec.sample_counts {
        let result = pricer.price_seeded(contract, volatility, sample_count, spec.seed)?;
        info!(
            sample_count,
            price = result.price,
            std_error = result.std_error,
            "Simulation run"
        );
        results.push(result);
    }
    Ok(results)
}

fn implied_vol_solver(spec: &ImpliedVolSpec) -> Result<ImpliedVolatilitySolver> {
    let mut solver = ImpliedVolatilitySolver::new();
    if let Some((low, high)) = spec.bracket {
        solver = solver.with_bracket(low, high);
    }
    if spec.tolerance.is_some() || spec.max_iterations.is_some() {
        let defaults = *solver.config();
        let config = SolverConfig::new(
            spec.tolerance.unwrap_or(defaults.tolerance),
            spec.max_iterations.unwrap_or(defaults.max_iterations),
        )?;
        solver = solver.with_config(config);
    }
    Ok(solver)
}
