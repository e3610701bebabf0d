//! Property tests for the closed-form option model and implied volatility.

use pricer_models::analytical::{BlackScholes, ImpliedVolatilitySolver};
use pricer_models::instruments::{OptionContract, OptionType};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn put_call_parity_holds(
        spot in 20.0f64..300.0,
        strike in 20.0f64..300.0,
        rate in -0.02f64..0.15,
        expiry in 0.05f64..5.0,
        vol in 0.05f64..1.5,
    ) {
        let call = OptionContract::new(spot, strike, rate, expiry, OptionType::Call).unwrap();
        let put = call.with_type(OptionType::Put);
        let c = BlackScholes::new(call, vol).unwrap().price();
        let p = BlackScholes::new(put, vol).unwrap().price();
        let parity = spot - strike * (-rate * expiry).exp();
        prop_assert!((c - p - parity).abs() < 1e-9);
    }

    #[test]
    fn prices_respect_no_arbitrage_bounds(
        spot in 20.0f64..300.0,
        strike in 20.0f64..300.0,
        rate in 0.0f64..0.15,
        expiry in 0.05f64..5.0,
        vol in 0.05f64..1.5,
    ) {
        let call = OptionContract::new(spot, strike, rate, expiry, OptionType::Call).unwrap();
        let c = BlackScholes::new(call, vol).unwrap().price();
        let lower = (spot - strike * (-rate * expiry).exp()).max(0.0);
        prop_assert!(c >= lower - 1e-9);
        prop_assert!(c <= spot + 1e-9);
    }

    #[test]
    fn gamma_is_call_put_symmetric(
        spot in 50.0f64..150.0,
        strike in 50.0f64..150.0,
        expiry in 0.1f64..3.0,
        vol in 0.1f64..0.8,
    ) {
        let call = OptionContract::new(spot, strike, 0.03, expiry, OptionType::Call).unwrap();
        let put = call.with_type(OptionType::Put);
        let gc = BlackScholes::new(call, vol).unwrap().gamma();
        let gp = BlackScholes::new(put, vol).unwrap().gamma();
        prop_assert_eq!(gc, gp);
    }

    #[test]
    fn implied_volatility_round_trips(
        strike in 85.0f64..120.0,
        expiry in 0.25f64..2.0,
        vol in 0.1f64..1.0,
    ) {
        let call = OptionContract::new(100.0, strike, 0.05, expiry, OptionType::Call).unwrap();
        let price = BlackScholes::new(call, vol).unwrap().price();
        let est = ImpliedVolatilitySolver::new().implied_volatility(&call, price).unwrap();
        prop_assert!((est.volatility - vol).abs() < 1e-4);
    }
}

#[test]
fn implied_volatility_reference_case() {
    // S=100, K=105, r=5%, T=1, σ=25%
    let call = OptionContract::new(100.0, 105.0, 0.05, 1.0, OptionType::Call).unwrap();
    let price = BlackScholes::new(call, 0.25).unwrap().price();
    assert!((price - 10.002_202_117).abs() < 1e-8);

    let est = ImpliedVolatilitySolver::new()
        .implied_volatility(&call, price)
        .unwrap();
    assert!((est.volatility - 0.25).abs() < 1e-4);
}
