//! Cash-flow schedules.

use crate::schedules::Frequency;
use pricer_core::types::DomainError;

/// A single dated payment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashFlow {
    /// Payment time in years from valuation.
    pub time: f64,
    /// Payment amount.
    pub amount: f64,
}

/// Ordered sequence of `(time, amount)` payments.
///
/// Times are non-negative, finite and strictly increasing; amounts are
/// finite. Read-only after construction.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::CashFlowSchedule;
///
/// let schedule = CashFlowSchedule::new(vec![(0.5, 20.0), (1.0, 1020.0)]).unwrap();
/// assert_eq!(schedule.len(), 2);
/// assert_eq!(schedule.total_amount(), 1040.0);
///
/// // Times must increase
/// assert!(CashFlowSchedule::new(vec![(1.0, 5.0), (0.5, 5.0)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CashFlowSchedule {
    flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Builds a schedule from `(time, amount)` pairs.
    ///
    /// # Errors
    ///
    /// - `DomainError::Empty` if `flows` is empty
    /// - `DomainError::NegativeTime` for a negative or NaN time
    /// - `DomainError::NonIncreasingTimes` if times are not strictly increasing
    /// - `DomainError::InvalidParameter` for a non-finite time or amount
    pub fn new(flows: Vec<(f64, f64)>) -> Result<Self, DomainError> {
        Self::from_cash_flows(
            flows
                .into_iter()
                .map(|(time, amount)| CashFlow { time, amount })
                .collect(),
        )
    }

    /// Builds a schedule from [`CashFlow`] records, with the same checks as [`new`](Self::new).
    pub fn from_cash_flows(flows: Vec<CashFlow>) -> Result<Self, DomainError> {
        if flows.is_empty() {
            return Err(DomainError::Empty("cash-flow schedule"));
        }
        for (index, flow) in flows.iter().enumerate() {
            if flow.time.is_nan() || flow.time < 0.0 {
                return Err(DomainError::NegativeTime { t: flow.time });
            }
            if !flow.time.is_finite() {
                return Err(DomainError::invalid("time", flow.time));
            }
            if !flow.amount.is_finite() {
                return Err(DomainError::invalid("amount", flow.amount));
            }
            if index > 0 && flow.time <= flows[index - 1].time {
                return Err(DomainError::NonIncreasingTimes {
                    index,
                    t: flow.time,
                });
            }
        }
        Ok(Self { flows })
    }

    /// Coupon and principal flows of a bullet bond.
    ///
    /// Pays `face · coupon_rate / m` at every period end `k/m`, `k = 1..=n`
    /// where `n = round(maturity · m)`, with `face` added to the last flow.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidParameter` if `face` is not positive, `coupon_rate`
    /// is negative or non-finite, or `maturity` is not a positive whole number
    /// of periods.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_models::instruments::CashFlowSchedule;
    /// use pricer_models::schedules::Frequency;
    ///
    /// // 1000 face, 4.375% semi-annual coupon, 10 years
    /// let bond = CashFlowSchedule::fixed_coupon_bond(1000.0, 0.04375, 10.0, Frequency::SemiAnnual)
    ///     .unwrap();
    /// assert_eq!(bond.len(), 20);
    /// assert_eq!(bond.flows()[0].amount, 21.875);
    /// assert_eq!(bond.flows()[19].amount, 1021.875);
    /// assert_eq!(bond.flows()[19].time, 10.0);
    /// ```
    pub fn fixed_coupon_bond(
        face: f64,
        coupon_rate: f64,
        maturity: f64,
        frequency: Frequency,
    ) -> Result<Self, DomainError> {
        if !(face.is_finite() && face > 0.0) {
            return Err(DomainError::invalid("face", face));
        }
        if !(coupon_rate.is_finite() && coupon_rate >= 0.0) {
            return Err(DomainError::invalid("coupon_rate", coupon_rate));
        }
        let m = f64::from(frequency.periods_per_year());
        let periods = (maturity * m).round();
        if !(maturity.is_finite() && periods >= 1.0 && (periods - maturity * m).abs() < 1e-9) {
            return Err(DomainError::invalid("maturity", maturity));
        }

        let n = periods as usize;
        let coupon = face * coupon_rate / m;
        let flows = (1..=n)
            .map(|k| {
                let amount = if k == n { coupon + face } else { coupon };
                (k as f64 / m, amount)
            })
            .collect();
        Self::new(flows)
    }

    /// The flows in time order.
    #[inline]
    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Number of flows (never zero).
    #[inline]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Always `false`; construction rejects empty schedules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Iterator over the flows.
    pub fn iter(&self) -> std::slice::Iter<'_, CashFlow> {
        self.flows.iter()
    }

    /// Undiscounted sum of all amounts.
    pub fn total_amount(&self) -> f64 {
        self.flows.iter().map(|f| f.amount).sum()
    }

    /// Time of the last flow.
    pub fn final_time(&self) -> f64 {
        self.flows.last().map_or(0.0, |f| f.time)
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let s = CashFlowSchedule::new(vec![(0.0, 1.0), (0.5, 2.0), (3.0, -1.0)]).unwrap();
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.final_time(), 3.0);
        assert_eq!(s.total_amount(), 2.0);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            CashFlowSchedule::new(vec![]),
            Err(DomainError::Empty("cash-flow schedule"))
        );
    }

    #[test]
    fn test_rejects_negative_time() {
        assert_eq!(
            CashFlowSchedule::new(vec![(-0.5, 1.0)]),
            Err(DomainError::NegativeTime { t: -0.5 })
        );
    }

    #[test]
    fn test_rejects_duplicate_time() {
        assert!(matches!(
            CashFlowSchedule::new(vec![(0.5, 1.0), (0.5, 1.0)]),
            Err(DomainError::NonIncreasingTimes { index: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(CashFlowSchedule::new(vec![(f64::INFINITY, 1.0)]).is_err());
        assert!(CashFlowSchedule::new(vec![(1.0, f64::NAN)]).is_err());
    }

    #[test]
    fn test_bond_annual() {
        let bond = CashFlowSchedule::fixed_coupon_bond(100.0, 0.05, 3.0, Frequency::Annual).unwrap();
        let flows: Vec<(f64, f64)> = bond.iter().map(|f| (f.time, f.amount)).collect();
        assert_eq!(flows, vec![(1.0, 5.0), (2.0, 5.0), (3.0, 105.0)]);
    }

    #[test]
    fn test_bond_zero_coupon() {
        let bond = CashFlowSchedule::fixed_coupon_bond(100.0, 0.0, 2.0, Frequency::SemiAnnual).unwrap();
        assert_eq!(bond.len(), 4);
        assert_eq!(bond.total_amount(), 100.0);
    }

    #[test]
    fn test_bond_rejects_fractional_periods() {
        assert!(CashFlowSchedule::fixed_coupon_bond(100.0, 0.05, 2.3, Frequency::SemiAnnual).is_err());
        assert!(CashFlowSchedule::fixed_coupon_bond(100.0, 0.05, 0.0, Frequency::Annual).is_err());
        assert!(CashFlowSchedule::fixed_coupon_bond(0.0, 0.05, 1.0, Frequency::Annual).is_err());
        assert!(CashFlowSchedule::fixed_coupon_bond(100.0, -0.01, 1.0, Frequency::Annual).is_err());
    }

    #[test]
    fn test_into_iterator() {
        let s = CashFlowSchedule::new(vec![(1.0, 1.0), (2.0, 2.0)]).unwrap();
        let total: f64 = (&s).into_iter().map(|f| f.amount).sum();
        assert_eq!(total, 3.0);
    }
}
