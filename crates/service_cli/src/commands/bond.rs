//! Bond command implementation
//!
//! Prices a cash-flow schedule off a rate curve and reports its rate
//! sensitivities.

use std::path::Path;

use pricer_pricing::discounting::DiscountingEngine;
use serde::Serialize;
use tracing::info;

use crate::config::{self, BondRequest};
use crate::Result;

/// Effective measures for one bump size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BumpSensitivity {
    /// Parallel shift (decimal)
    pub bump: f64,
    /// `(PV(−b) − PV(+b)) / (2·PV·b)`
    pub effective_duration: f64,
    /// `(PV(−b) + PV(+b) − 2·PV) / (PV·b²)`
    pub effective_convexity: f64,
}

/// Flat yield that reprices the schedule to the target price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YieldSolution {
    /// Price the yield was solved for
    pub target_price: f64,
    /// Solved flat yield
    pub flat_yield: f64,
    /// Final bisection bracket
    pub final_bracket: (f64, f64),
    /// Bisection steps
    pub iterations: usize,
}

/// `valuer bond` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondReport {
    /// Compounding convention used
    pub convention: String,
    /// Number of cash flows
    pub cash_flow_count: usize,
    /// Undiscounted sum of the flows
    pub total_amount: f64,
    /// Present value
    pub present_value: f64,
    /// PV-weighted average time
    pub macaulay_duration: f64,
    /// Macaulay over `1 + y/m`, for flat curves only
    pub modified_duration: Option<f64>,
    /// One entry per requested bump
    pub sensitivities: Vec<BumpSensitivity>,
    /// Present when a target price was requested
    pub yield_solution: Option<YieldSolution>,
}

/// Run the bond command
pub fn run(path: &Path, pretty: bool) -> Result<()> {
    info!(path = %path.display(), "Loading bond request");
    let request: BondRequest = config::load(path)?;
    let report = value(&request)?;
    info!(
        present_value = report.present_value,
        bumps = report.sensitivities.len(),
        "Bond valuation complete"
    );
    super::emit(&report, pretty)
}

/// Values a parsed bond request.
pub fn value(request: &BondRequest) -> Result<BondReport> {
    request.validate()?;
    let curve = request.curve.build()?;
    let schedule = request.schedule.build()?;
    let engine = DiscountingEngine::new(request.convention)?;

    let present_value = engine.present_value(&schedule, &curve)?;
    let macaulay_duration = engine.macaulay_duration(&schedule, &curve)?;
    let modified_duration = request
        .curve
        .flat_rate()
        .map(|y| engine.modified_duration(&schedule, y))
        .transpose()?;

    let sensitivities = request
        .bumps
        .iter()
        .map(|&bump| -> Result<BumpSensitivity> {
            Ok(BumpSensitivity {
                bump,
                effective_duration: engine.effective_duration(&schedule, &curve, bump)?,
                effective_convexity: engine.effective_convexity(&schedule, &curve, bump)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let yield_solution = match request.target_price {
        Some(target_price) => {
            let root = engine.yield_from_price(
                &schedule,
                target_price,
                request.yield_bracket,
                request.solver,
            )?;
            Some(YieldSolution {
                target_price,
                flat_yield: root.root,
                final_bracket: root.bracket,
                iterations: root.iterations,
            })
        }
        None => None,
    };

    Ok(BondReport {
        convention: request.convention.to_string(),
        cash_flow_count: schedule.len(),
        total_amount: schedule.total_amount(),
        present_value,
        macaulay_duration,
        modified_duration,
        sensitivities,
        yield_solution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use approx::assert_relative_eq;
    use pricer_core::types::PricingError;

    fn request(toml: &str) -> BondRequest {
        toml::from_str(toml).unwrap()
    }

    const FLAT_BOND: &str = r#"
convention = "semi_annual"
bumps = [0.01, 0.001, 0.0001]
target_price = 1030.6589375211192

[curve]
type = "flat"
rate = 0.04

[schedule]
type = "bond"
face = 1000.0
coupon_rate = 0.04375
maturity = 10.0
frequency = "semi_annual"
"#;

    #[test]
    fn test_flat_bond_report() {
        let report = value(&request(FLAT_BOND)).unwrap();
        assert_eq!(report.convention, "periodic(2)");
        assert_eq!(report.cash_flow_count, 20);
        assert_relative_eq!(report.present_value, 1_030.658_937_521_119, epsilon = 1e-8);
        assert_relative_eq!(report.macaulay_duration, 8.237_568_199_005_018, epsilon = 1e-9);

        let modified = report.modified_duration.unwrap();
        assert_relative_eq!(modified, 8.076_047_253_926_488, epsilon = 1e-9);

        // effective duration approaches modified duration as the bump shrinks
        let errors: Vec<f64> = report
            .sensitivities
            .iter()
            .map(|s| (s.effective_duration - modified).abs())
            .collect();
        assert!(errors[0] > errors[1] && errors[1] > errors[2]);

        let solution = report.yield_solution.unwrap();
        assert_relative_eq!(solution.flat_yield, 0.04, epsilon = 1e-9);
    }

    #[test]
    fn test_sloped_curve_has_no_modified_duration() {
        let toml = FLAT_BOND.replace(
            "type = \"flat\"\nrate = 0.04",
            "type = \"pillars\"\npillars = [[0.5, 0.03], [10.0, 0.05]]",
        );
        let report = value(&request(&toml)).unwrap();
        assert!(report.modified_duration.is_none());
        assert!(report.sensitivities.iter().all(|s| s.effective_duration > 0.0));
    }

    #[test]
    fn test_invalid_bump_is_reported() {
        let toml = FLAT_BOND.replace("[0.01, 0.001, 0.0001]", "[0.01, -0.001]");
        let err = value(&request(&toml)).unwrap_err();
        assert!(matches!(err, CliError::Pricing(PricingError::Domain(_))));
    }

    #[test]
    fn test_unreachable_target_is_bracket_error() {
        let toml = FLAT_BOND.replace("target_price = 1030.6589375211192", "target_price = 1.0e9");
        let err = value(&request(&toml)).unwrap_err();
        assert!(matches!(err, CliError::Pricing(ref e) if e.is_bracket()));
    }
}
