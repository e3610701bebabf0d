//! Financial instrument definitions.
//!
//! # Instrument Types
//!
//! - [`CashFlowSchedule`]: Dated payments of a bond or any fixed-income stream
//! - [`OptionContract`]: European call or put with [`OptionType`]
//! - [`ForwardContract`]: Existing forward position, plus cost-of-carry
//!   [`forward_price`] and [`forward_price_with_dividends`]
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{CashFlowSchedule, OptionContract, OptionType};
//! use pricer_models::schedules::Frequency;
//!
//! let bond = CashFlowSchedule::fixed_coupon_bond(1000.0, 0.05, 5.0, Frequency::Annual).unwrap();
//! assert_eq!(bond.total_amount(), 1250.0);
//!
//! let put = OptionContract::new(100.0, 105.0, 0.05, 1.0, OptionType::Put).unwrap();
//! assert_eq!(put.payoff(100.0), 5.0);
//! ```

mod cashflows;
mod forward;
mod option;

pub use cashflows::{CashFlow, CashFlowSchedule};
pub use forward::{forward_price, forward_price_with_dividends, Direction, Dividend, ForwardContract};
pub use option::{OptionContract, OptionType};
