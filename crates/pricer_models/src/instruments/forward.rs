//! Forward contract definitions.
//!
//! Cost-of-carry forward prices under continuous compounding, with and
//! without discrete dividends, and the value of an existing forward position.

use pricer_core::types::DomainError;

/// Trade direction for forward contracts.
///
/// # Variants
/// - `Long`: Buyer of the underlying (profits when price rises)
/// - `Short`: Seller of the underlying (profits when price falls)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Long position (buy underlying)
    Long,
    /// Short position (sell underlying)
    Short,
}

impl Direction {
    /// +1 for long, -1 for short.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

/// Discrete cash dividend paid by the underlying before delivery.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dividend {
    /// Cash amount.
    pub amount: f64,
    /// Payment time in years.
    pub time: f64,
    /// Continuously-compounded rate used to discount this dividend.
    pub rate: f64,
}

impl Dividend {
    /// Present value `D·e^(-r·t)`.
    #[inline]
    pub fn present_value(&self) -> f64 {
        self.amount * (-self.rate * self.time).exp()
    }
}

/// Forward price of a non-income asset: `S·e^(rT)`.
///
/// # Errors
/// - `DomainError::NonPositiveSpot` if spot <= 0 or non-finite
/// - `DomainError::NegativeTime` if maturity < 0
///
/// # Examples
/// ```
/// use pricer_models::instruments::forward_price;
///
/// let f = forward_price(100.0, 0.05, 1.0).unwrap();
/// assert!((f - 100.0 * 0.05_f64.exp()).abs() < 1e-12);
/// ```
pub fn forward_price(spot: f64, rate: f64, maturity: f64) -> Result<f64, DomainError> {
    forward_price_with_dividends(spot, &[], rate, maturity)
}

/// Forward price with discrete dividends: `(S − Σ D_i·e^(−r_i·t_i))·e^(rT)`.
///
/// Dividends paid after `maturity` do not reduce the forward price.
///
/// # Errors
/// - `DomainError::NonPositiveSpot` if spot <= 0 or non-finite
/// - `DomainError::NegativeTime` if maturity or a dividend time is negative
/// - `DomainError::InvalidParameter` for a non-finite rate or dividend field
///
/// # Examples
/// ```
/// use pricer_models::instruments::{forward_price_with_dividends, Dividend};
///
/// let div = Dividend { amount: 2.0, time: 5.0 / 12.0, rate: 0.03 };
/// let f = forward_price_with_dividends(50.0, &[div], 0.04, 1.0).unwrap();
/// let expected = (50.0 - 2.0 * (-0.03_f64 * 5.0 / 12.0).exp()) * 0.04_f64.exp();
/// assert!((f - expected).abs() < 1e-12);
/// ```
pub fn forward_price_with_dividends(
    spot: f64,
    dividends: &[Dividend],
    rate: f64,
    maturity: f64,
) -> Result<f64, DomainError> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(DomainError::NonPositiveSpot { spot });
    }
    if maturity.is_nan() || maturity < 0.0 {
        return Err(DomainError::NegativeTime { t: maturity });
    }
    if !rate.is_finite() {
        return Err(DomainError::invalid("rate", rate));
    }

    let mut pv_dividends = 0.0;
    for dividend in dividends {
        if dividend.time.is_nan() || dividend.time < 0.0 {
            return Err(DomainError::NegativeTime { t: dividend.time });
        }
        if !(dividend.amount.is_finite() && dividend.rate.is_finite()) {
            return Err(DomainError::invalid("dividend", format!("{:?}", dividend)));
        }
        if dividend.time <= maturity {
            pv_dividends += dividend.present_value();
        }
    }

    Ok((spot - pv_dividends) * (rate * maturity).exp())
}

/// An existing forward position.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{Direction, ForwardContract};
///
/// // Long 6.4m EUR at 1.22 USD/EUR
/// let fwd = ForwardContract::new(1.22, 6.4, 0.25, Direction::Long).unwrap();
/// let gain = fwd.settlement_gain(1.226);
/// assert!((gain - 0.0384).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForwardContract {
    delivery_price: f64,
    notional: f64,
    maturity: f64,
    direction: Direction,
}

impl ForwardContract {
    /// Creates a new forward position.
    ///
    /// # Errors
    /// - `DomainError::NonPositiveStrike` if delivery price <= 0 or non-finite
    /// - `DomainError::InvalidParameter` if notional <= 0 or non-finite
    /// - `DomainError::NegativeTime` if maturity < 0
    pub fn new(
        delivery_price: f64,
        notional: f64,
        maturity: f64,
        direction: Direction,
    ) -> Result<Self, DomainError> {
        if !(delivery_price.is_finite() && delivery_price > 0.0) {
            return Err(DomainError::NonPositiveStrike {
                strike: delivery_price,
            });
        }
        if !(notional.is_finite() && notional > 0.0) {
            return Err(DomainError::invalid("notional", notional));
        }
        if !maturity.is_finite() || maturity < 0.0 {
            return Err(DomainError::NegativeTime { t: maturity });
        }
        Ok(Self {
            delivery_price,
            notional,
            maturity,
            direction,
        })
    }

    /// Agreed delivery price K.
    #[inline]
    pub fn delivery_price(&self) -> f64 {
        self.delivery_price
    }

    /// Units of the underlying.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Delivery time T in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Long or short.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Value at time `elapsed` given the current forward price for the same delivery.
    ///
    /// Long side: `(F_t − K)·e^(−r(T−t))·notional`; the short side is the negative.
    ///
    /// # Errors
    /// `DomainError::NegativeTime` unless `0 <= elapsed <= maturity`.
    pub fn mark_to_market(
        &self,
        current_forward: f64,
        rate: f64,
        elapsed: f64,
    ) -> Result<f64, DomainError> {
        if elapsed.is_nan() || elapsed < 0.0 {
            return Err(DomainError::NegativeTime { t: elapsed });
        }
        let remaining = self.maturity - elapsed;
        if remaining < 0.0 {
            return Err(DomainError::NegativeTime { t: remaining });
        }
        if !(current_forward.is_finite() && rate.is_finite()) {
            return Err(DomainError::invalid(
                "forward",
                format!("F = {}, r = {}", current_forward, rate),
            ));
        }
        let discount = (-rate * remaining).exp();
        Ok(self.direction.sign() * (current_forward - self.delivery_price) * discount * self.notional)
    }

    /// Gain of the position settled at maturity against `spot_at_maturity`.
    ///
    /// Long side: `(S_T − K)·notional`.
    #[inline]
    pub fn settlement_gain(&self, spot_at_maturity: f64) -> f64 {
        self.direction.sign() * (spot_at_maturity - self.delivery_price) * self.notional
    }
}
