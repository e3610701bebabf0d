//! Term-structure discounting of cash-flow schedules.
//!
//! [`DiscountingEngine`] prices a [`CashFlowSchedule`](pricer_models::instruments::CashFlowSchedule)
//! off any [`YieldCurve`](pricer_core::market_data::curves::YieldCurve) and
//! derives its rate sensitivities:
//!
//! | Measure | Method |
//! |---|---|
//! | Present value | `Σ amount · DF(t)` |
//! | Effective duration / convexity | central difference under a parallel shift |
//! | Macaulay duration | PV-weighted average time |
//! | Modified duration | Macaulay over `1 + y/m` for a flat yield |
//! | Yield from price | bisection on the flat yield |

mod engine;

pub use engine::DiscountingEngine;
