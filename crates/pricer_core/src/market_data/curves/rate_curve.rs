//! Piecewise-affine rate curve.

use super::YieldCurve;
use crate::market_data::CompoundingConvention;
use crate::types::DomainError;
use tracing::trace;

/// One affine piece of a [`RateCurve`].
///
/// Active from `start` until the next segment's start:
///
/// ```text
/// rate(t) = base + slope · (t − anchor)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineSegment {
    /// Breakpoint where this segment becomes active (years).
    pub start: f64,
    /// Point where the segment's rate equals `base`.
    pub anchor: f64,
    /// Rate at `anchor`.
    pub base: f64,
    /// Rate change per year.
    pub slope: f64,
}

impl AffineSegment {
    /// Segment anchored at its own breakpoint.
    pub fn new(start: f64, base: f64, slope: f64) -> Self {
        Self {
            start,
            anchor: start,
            base,
            slope,
        }
    }

    /// Segment whose line passes through `(anchor, base)`.
    pub fn anchored(start: f64, anchor: f64, base: f64, slope: f64) -> Self {
        Self {
            start,
            anchor,
            base,
            slope,
        }
    }

    #[inline]
    fn rate_at(&self, t: f64) -> f64 {
        self.base + self.slope * (t - self.anchor)
    }

    fn is_finite(&self) -> bool {
        self.start.is_finite()
            && self.anchor.is_finite()
            && self.base.is_finite()
            && self.slope.is_finite()
    }
}

/// Term structure made of affine segments with a frozen tail.
///
/// Breakpoints are strictly increasing and the first one is `0`. Beyond
/// `horizon` the rate stays at `rate(horizon)`. Immutable once built.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{AffineSegment, RateCurve, YieldCurve};
///
/// // 4% at six months rising 7.04bp a year, frozen after seven years
/// let curve = RateCurve::from_segments(
///     vec![AffineSegment::anchored(0.0, 0.5, 0.04, 0.000704)],
///     7.0,
/// )
/// .unwrap();
///
/// assert!((curve.rate(0.5).unwrap() - 0.04).abs() < 1e-15);
/// assert!((curve.rate(10.0).unwrap() - 0.044576).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateCurve {
    segments: Vec<AffineSegment>,
    horizon: f64,
}

impl RateCurve {
    /// Constant rate for every maturity.
    pub fn flat(rate: f64) -> Result<Self, DomainError> {
        Self::from_segments(vec![AffineSegment::new(0.0, rate, 0.0)], 0.0)
    }

    /// Curve from explicit affine segments.
    ///
    /// # Errors
    ///
    /// - `DomainError::Empty` if `segments` is empty
    /// - `DomainError::InvalidParameter` if the first breakpoint is not `0`,
    ///   any parameter is non-finite, or `horizon` precedes the last breakpoint
    /// - `DomainError::NonIncreasingTimes` if breakpoints are not strictly increasing
    pub fn from_segments(segments: Vec<AffineSegment>, horizon: f64) -> Result<Self, DomainError> {
        let first = segments.first().ok_or(DomainError::Empty("rate curve segments"))?;
        if first.start != 0.0 {
            return Err(DomainError::invalid("first breakpoint", first.start));
        }
        if let Some(bad) = segments.iter().find(|s| !s.is_finite()) {
            return Err(DomainError::invalid("segment", format!("{:?}", bad)));
        }
        for (index, pair) in segments.windows(2).enumerate() {
            if pair[1].start <= pair[0].start {
                return Err(DomainError::NonIncreasingTimes {
                    index: index + 1,
                    t: pair[1].start,
                });
            }
        }
        let last_start = segments[segments.len() - 1].start;
        if !horizon.is_finite() || horizon < last_start {
            return Err(DomainError::invalid("horizon", horizon));
        }

        Ok(Self { segments, horizon })
    }

    /// Curve through `(t, rate)` pillars.
    ///
    /// Linear between pillars, flat before the first and after the last.
    ///
    /// # Errors
    ///
    /// - `DomainError::Empty` if `pillars` is empty
    /// - `DomainError::NegativeTime` for a negative pillar time
    /// - `DomainError::NonIncreasingTimes` if times are not strictly increasing
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::market_data::curves::{RateCurve, YieldCurve};
    ///
    /// let curve = RateCurve::from_pillars(&[(1.0, 0.03), (3.0, 0.05)]).unwrap();
    /// assert!((curve.rate(0.25).unwrap() - 0.03).abs() < 1e-15);
    /// assert!((curve.rate(2.0).unwrap() - 0.04).abs() < 1e-15);
    /// assert!((curve.rate(30.0).unwrap() - 0.05).abs() < 1e-15);
    /// ```
    pub fn from_pillars(pillars: &[(f64, f64)]) -> Result<Self, DomainError> {
        let &(first_t, first_r) = pillars.first().ok_or(DomainError::Empty("rate curve pillars"))?;
        for (index, &(t, r)) in pillars.iter().enumerate() {
            if t.is_nan() || t < 0.0 {
                return Err(DomainError::NegativeTime { t });
            }
            if !t.is_finite() || !r.is_finite() {
                return Err(DomainError::invalid("pillar", format!("({}, {})", t, r)));
            }
            if index > 0 && t <= pillars[index - 1].0 {
                return Err(DomainError::NonIncreasingTimes { index, t });
            }
        }

        let mut segments = Vec::with_capacity(pillars.len() + 1);
        if first_t > 0.0 {
            segments.push(AffineSegment::new(0.0, first_r, 0.0));
        }
        for pair in pillars.windows(2) {
            let (t0, r0) = pair[0];
            let (t1, r1) = pair[1];
            segments.push(AffineSegment::new(t0, r0, (r1 - r0) / (t1 - t0)));
        }
        let &(last_t, last_r) = &pillars[pillars.len() - 1];
        segments.push(AffineSegment::new(last_t, last_r, 0.0));

        Self::from_segments(segments, last_t)
    }

    /// Spot pillars implied by chaining forward rates onto a starting spot.
    ///
    /// Each `(forward, period)` entry extends the previous pillar by `period`
    /// years, so the `n`-th pillar satisfies
    ///
    /// ```text
    /// compound(r_n, t_n) = compound(r_0, t_0) · Π compound(f_i, Δt_i)
    /// ```
    ///
    /// The first pillar is `start` itself.
    ///
    /// # Errors
    ///
    /// - `DomainError::NegativeTime` if the start time is negative
    /// - `DomainError::InvalidParameter` for a non-finite rate or a
    ///   non-positive period
    /// - `DomainError::InvalidCompounding` if a growth factor is not positive
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::market_data::curves::RateCurve;
    /// use pricer_core::market_data::CompoundingConvention;
    ///
    /// // 3% for one year, then 5% for the next
    /// let pillars = RateCurve::spot_pillars_from_forwards(
    ///     (1.0, 0.03),
    ///     &[(0.05, 1.0)],
    ///     CompoundingConvention::Annual,
    /// )
    /// .unwrap();
    /// let expected = (1.03_f64 * 1.05).sqrt() - 1.0;
    /// assert!((pillars[1].1 - expected).abs() < 1e-15);
    /// ```
    pub fn spot_pillars_from_forwards(
        start: (f64, f64),
        forwards: &[(f64, f64)],
        convention: CompoundingConvention,
    ) -> Result<Vec<(f64, f64)>, DomainError> {
        let (t0, r0) = start;
        if t0.is_nan() || t0 < 0.0 {
            return Err(DomainError::NegativeTime { t: t0 });
        }
        if !t0.is_finite() || !r0.is_finite() {
            return Err(DomainError::invalid("start", format!("({}, {})", t0, r0)));
        }

        let mut growth = convention.compound_factor(r0, t0)?;
        let mut t = t0;
        let mut pillars = Vec::with_capacity(forwards.len() + 1);
        pillars.push(start);
        for &(forward, period) in forwards {
            if !(period.is_finite() && period > 0.0) {
                return Err(DomainError::invalid("forward period", period));
            }
            if !forward.is_finite() {
                return Err(DomainError::invalid("forward rate", forward));
            }
            growth *= convention.compound_factor(forward, period)?;
            t += period;
            pillars.push((t, convention.implied_rate(growth, t)?));
        }
        Ok(pillars)
    }

    /// Pillar curve through the spots implied by a forward strip.
    ///
    /// See [`RateCurve::spot_pillars_from_forwards`].
    pub fn from_forwards(
        start: (f64, f64),
        forwards: &[(f64, f64)],
        convention: CompoundingConvention,
    ) -> Result<Self, DomainError> {
        let pillars = Self::spot_pillars_from_forwards(start, forwards, convention)?;
        Self::from_pillars(&pillars)
    }

    /// Owned copy with `bump` added to every rate.
    pub fn shifted(&self, bump: f64) -> Result<Self, DomainError> {
        if !bump.is_finite() {
            return Err(DomainError::invalid("bump", bump));
        }
        let segments = self
            .segments
            .iter()
            .map(|s| AffineSegment {
                base: s.base + bump,
                ..*s
            })
            .collect();
        Ok(Self {
            segments,
            horizon: self.horizon,
        })
    }

    /// The affine segments, ordered by breakpoint.
    #[inline]
    pub fn segments(&self) -> &[AffineSegment] {
        &self.segments
    }

    /// Time beyond which the rate is frozen.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }
}

impl YieldCurve for RateCurve {
    fn rate(&self, t: f64) -> Result<f64, DomainError> {
        if t.is_nan() || t < 0.0 {
            return Err(DomainError::NegativeTime { t });
        }
        let t = t.min(self.horizon);
        // first breakpoint is 0, so at least one segment precedes t
        let idx = self.segments.partition_point(|s| s.start <= t) - 1;
        let rate = self.segments[idx].rate_at(t);
        trace!(t, segment = idx, rate, "curve lookup");
        Ok(rate)
    }
}
