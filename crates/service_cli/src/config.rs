//! Valuation request files
//!
//! Requests are TOML documents deserialised with `serde` and validated
//! before any engine runs. See `configs/` for complete examples.

use std::path::Path;
use std::str::FromStr;

use pricer_core::market_data::curves::{AffineSegment, RateCurve};
use pricer_core::market_data::CompoundingConvention;
use pricer_core::math::solvers::SolverConfig;
use pricer_models::instruments::{CashFlowSchedule, OptionContract, OptionType};
use pricer_models::schedules::Frequency;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{CliError, Result};

/// Default flat-yield bracket for `target_price` solving.
pub const DEFAULT_YIELD_BRACKET: (f64, f64) = (-0.5, 1.0);

/// Reads and parses a TOML request file.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Parses a compounding convention.
///
/// Accepts `annual`, `continuous`, `periodic(m)` and the coupon frequency
/// names (`semi_annual`, `quarterly`, `monthly`).
pub fn parse_convention(s: &str) -> std::result::Result<CompoundingConvention, String> {
    let normalised = s.trim().to_lowercase();
    match normalised.as_str() {
        "annual" => return Ok(CompoundingConvention::Annual),
        "continuous" => return Ok(CompoundingConvention::Continuous),
        _ => {}
    }
    if let Some(m) = normalised
        .strip_prefix("periodic(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let m: u32 = m
            .trim()
            .parse()
            .map_err(|_| format!("Invalid periods per year in {}", s))?;
        return CompoundingConvention::periodic(m).map_err(|e| e.to_string());
    }
    Frequency::from_str(&normalised)
        .map(|frequency| frequency.compounding())
        .map_err(|_| {
            format!(
                "Unknown compounding convention: {}. Supported: annual, continuous, periodic(m), semi_annual, quarterly, monthly",
                s
            )
        })
}

fn deserialize_convention<'de, D>(deserializer: D) -> std::result::Result<CompoundingConvention, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_convention(&s).map_err(serde::de::Error::custom)
}

/// Term structure section of a bond request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurveSpec {
    /// One rate for every maturity.
    Flat {
        /// Annual rate
        rate: f64,
    },
    /// Linear between `(t, rate)` pillars, flat outside.
    Pillars {
        /// `(t, rate)` knots
        pillars: Vec<(f64, f64)>,
    },
    /// Explicit affine segments frozen after `horizon`.
    Segments {
        /// Segments in breakpoint order
        segments: Vec<SegmentSpec>,
        /// Time after which the rate is frozen
        horizon: f64,
    },
}

/// One affine piece `base + slope · (t − anchor)` starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SegmentSpec {
    /// Breakpoint where the segment begins
    pub start: f64,
    /// Reference time of `base`; defaults to `start`
    #[serde(default)]
    pub anchor: Option<f64>,
    /// Rate at the anchor
    pub base: f64,
    /// Rate change per year
    pub slope: f64,
}

impl CurveSpec {
    /// Builds the validated curve.
    pub fn build(&self) -> Result<RateCurve> {
        let curve = match self {
            CurveSpec::Flat { rate } => RateCurve::flat(*rate)?,
            CurveSpec::Pillars { pillars } => RateCurve::from_pillars(pillars)?,
            CurveSpec::Segments { segments, horizon } => {
                let segments = segments
                    .iter()
                    .map(|s| AffineSegment::anchored(s.start, s.anchor.unwrap_or(s.start), s.base, s.slope))
                    .collect();
                RateCurve::from_segments(segments, *horizon)?
            }
        };
        Ok(curve)
    }

    /// The rate of a flat curve.
    pub fn flat_rate(&self) -> Option<f64> {
        match self {
            CurveSpec::Flat { rate } => Some(*rate),
            _ => None,
        }
    }
}

/// Cash-flow section of a bond request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleSpec {
    /// Explicit `(time, amount)` flows.
    Flows {
        /// Flows in time order
        flows: Vec<(f64, f64)>,
    },
    /// Bullet bond terms.
    Bond {
        /// Face value repaid at maturity
        face: f64,
        /// Annual coupon rate
        coupon_rate: f64,
        /// Maturity in years
        maturity: f64,
        /// Coupon frequency
        frequency: Frequency,
    },
}

impl ScheduleSpec {
    /// Builds the validated schedule.
    pub fn build(&self) -> Result<CashFlowSchedule> {
        let schedule = match self {
            ScheduleSpec::Flows { flows } => CashFlowSchedule::new(flows.clone())?,
            ScheduleSpec::Bond {
                face,
                coupon_rate,
                maturity,
                frequency,
            } => CashFlowSchedule::fixed_coupon_bond(*face, *coupon_rate, *maturity, *frequency)?,
        };
        Ok(schedule)
    }
}

/// `valuer bond` request.
#[derive(Debug, Clone, Deserialize)]
pub struct BondRequest {
    /// Compounding convention for every discount factor
    #[serde(deserialize_with = "deserialize_convention")]
    pub convention: CompoundingConvention,
    /// Parallel shifts for effective duration and convexity (decimal)
    pub bumps: Vec<f64>,
    /// Price to solve the flat yield for
    #[serde(default)]
    pub target_price: Option<f64>,
    /// Flat-yield search bracket
    #[serde(default = "default_yield_bracket")]
    pub yield_bracket: (f64, f64),
    /// Root finder settings for the yield search
    #[serde(default)]
    pub solver: SolverConfig<f64>,
    /// Term structure
    pub curve: CurveSpec,
    /// Cash flows
    pub schedule: ScheduleSpec,
}

fn default_yield_bracket() -> (f64, f64) {
    DEFAULT_YIELD_BRACKET
}

impl BondRequest {
    /// Checks the fields not covered by the engines' own validation.
    pub fn validate(&self) -> Result<()> {
        if self.bumps.is_empty() {
            return Err(CliError::InvalidArgument(
                "bumps must list at least one shift size".to_string(),
            ));
        }
        self.convention.validate()?;
        self.solver.validate()?;
        Ok(())
    }
}

/// Option contract section of an option request.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ContractSpec {
    /// Spot price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Continuously-compounded risk-free rate
    pub rate: f64,
    /// Time to expiry in years
    pub expiry: f64,
    /// `call` or `put`
    pub option_type: OptionType,
}

impl ContractSpec {
    /// Builds the validated contract.
    pub fn build(&self) -> Result<OptionContract> {
        Ok(OptionContract::new(
            self.spot,
            self.strike,
            self.rate,
            self.expiry,
            self.option_type,
        )?)
    }
}

/// Monte Carlo section of an option request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationSpec {
    /// One run per entry
    pub sample_counts: Vec<usize>,
    /// Root seed shared by every run
    pub seed: u64,
    /// Samples per block generator
    #[serde(default)]
    pub block_size: Option<usize>,
}

/// Implied volatility overrides of an option request.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct ImpliedVolSpec {
    /// Volatility bracket
    #[serde(default)]
    pub bracket: Option<(f64, f64)>,
    /// Bisection tolerance
    #[serde(default)]
    pub tolerance: Option<f64>,
    /// Bisection iteration budget
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

/// `valuer option` request.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionRequest {
    /// Volatility for the analytic and Monte Carlo prices
    pub volatility: f64,
    /// Observed price to invert for implied volatility
    #[serde(default)]
    pub market_price: Option<f64>,
    /// Contract terms
    pub contract: ContractSpec,
    /// Monte Carlo runs
    #[serde(default)]
    pub simulation: Option<SimulationSpec>,
    /// Implied volatility solver overrides
    #[serde(default)]
    pub implied_vol: ImpliedVolSpec,
}

impl OptionRequest {
    /// Checks the fields not covered by the engines' own validation.
    pub fn validate(&self) -> Result<()> {
        if let Some(simulation) = &self.simulation {
            if simulation.sample_counts.is_empty() {
                return Err(CliError::InvalidArgument(
                    "simulation.sample_counts must list at least one run".to_string(),
                ));
            }
        }
        if self.market_price.is_none() && self.implied_vol != ImpliedVolSpec::default() {
            return Err(CliError::InvalidArgument(
                "implied_vol settings given without market_price".to_string(),
            ));
        }
        Ok(())
    }
}
