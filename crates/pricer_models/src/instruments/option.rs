//! European option contract definitions.

use pricer_core::types::DomainError;
use std::fmt;
use std::str::FromStr;

/// Right conferred by an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Intrinsic payoff at `terminal_spot` for `strike`.
    ///
    /// - Call: max(S - K, 0)
    /// - Put: max(K - S, 0)
    #[inline]
    pub fn payoff(&self, terminal_spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (terminal_spot - strike).max(0.0),
            OptionType::Put => (strike - terminal_spot).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(format!("Unknown option type: {}", s)),
        }
    }
}

/// European option on a non-dividend-paying underlying.
///
/// The rate is continuously compounded and the expiry is in years.
/// Immutable once built.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionContract, OptionType};
///
/// let call = OptionContract::new(100.0, 105.0, 0.05, 1.0, OptionType::Call).unwrap();
/// assert_eq!(call.strike(), 105.0);
/// assert!((call.discount_factor() - (-0.05_f64).exp()).abs() < 1e-15);
///
/// // Non-positive expiry is rejected
/// assert!(OptionContract::new(100.0, 105.0, 0.05, 0.0, OptionType::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract {
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    option_type: OptionType,
}

impl OptionContract {
    /// Creates a validated contract.
    ///
    /// # Errors
    /// - `DomainError::NonPositiveSpot` if spot <= 0 or non-finite
    /// - `DomainError::NonPositiveStrike` if strike <= 0 or non-finite
    /// - `DomainError::NonPositiveExpiry` if expiry <= 0 or non-finite
    /// - `DomainError::InvalidParameter` if the rate is non-finite
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        expiry: f64,
        option_type: OptionType,
    ) -> Result<Self, DomainError> {
        let contract = Self {
            spot,
            strike,
            rate,
            expiry,
            option_type,
        };
        contract.validate()?;
        Ok(contract)
    }

    /// Re-checks the contract; deserialised contracts skip [`new`](Self::new).
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(DomainError::NonPositiveSpot { spot: self.spot });
        }
        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(DomainError::NonPositiveStrike {
                strike: self.strike,
            });
        }
        if !(self.expiry.is_finite() && self.expiry > 0.0) {
            return Err(DomainError::NonPositiveExpiry {
                expiry: self.expiry,
            });
        }
        if !self.rate.is_finite() {
            return Err(DomainError::invalid("rate", self.rate));
        }
        Ok(())
    }

    /// Same contract with the other option type.
    pub fn with_type(&self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..*self
        }
    }

    /// Spot price of the underlying.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Continuously-compounded risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Payoff at expiry for a terminal underlying price.
    #[inline]
    pub fn payoff(&self, terminal_spot: f64) -> f64 {
        self.option_type.payoff(terminal_spot, self.strike)
    }

    /// e^(-rT)
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }
}
