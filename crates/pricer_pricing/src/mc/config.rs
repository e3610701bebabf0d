//! Monte Carlo simulation configuration.
//!
//! The configuration fixes how a seeded run is partitioned into blocks.
//! Sample counts and seeds are passed per call and never defaulted.

use pricer_core::types::DomainError;

/// Default number of samples drawn from each block generator.
pub const DEFAULT_BLOCK_SIZE: usize = 65_536;

/// Smallest sample count for which a sample standard deviation exists.
pub const MIN_SAMPLES: usize = 2;

/// Monte Carlo simulation configuration.
///
/// Immutable once built. Use [`SimulationConfigBuilder`] to construct
/// instances, or [`SimulationConfig::default`] for the default layout.
///
/// # Block Layout
///
/// A seeded run of `n` samples is split into `ceil(n / block_size)` blocks.
/// Block `b` covers samples `[b·block_size, min((b+1)·block_size, n))` and
/// draws from its own generator, so the sample stream (and therefore the
/// result) depends on the block size but not on how blocks are scheduled.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .block_size(4_096)
///     .parallel(false)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.block_size(), 4_096);
/// assert!(!config.parallel());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Samples per block generator.
    block_size: usize,
    /// Whether blocks are evaluated on the rayon pool.
    parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            parallel: true,
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of samples per block.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns whether blocks run on the rayon pool.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Number of blocks needed for `sample_count` samples.
    #[inline]
    pub fn block_count(&self, sample_count: usize) -> usize {
        sample_count.div_ceil(self.block_size.max(1))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidParameter` if `block_size` is 0.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.block_size == 0 {
            return Err(DomainError::invalid("block_size", "must be at least 1"));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// Unset fields take the values of [`SimulationConfig::default`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    block_size: Option<usize>,
    parallel: Option<bool>,
}

impl SimulationConfigBuilder {
    /// Sets the number of samples per block.
    #[inline]
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = Some(block_size);
        self
    }

    /// Enables or disables evaluation on the rayon pool.
    ///
    /// Sequential and parallel runs with the same block size produce
    /// bit-identical results.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the block size is 0.
    pub fn build(self) -> Result<SimulationConfig, DomainError> {
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            block_size: self.block_size.unwrap_or(defaults.block_size),
            parallel: self.parallel.unwrap_or(defaults.parallel),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.block_size(), 65_536);
        assert!(config.parallel());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = SimulationConfig::builder().build().unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = SimulationConfig::builder()
            .block_size(1_000)
            .parallel(false)
            .build()
            .unwrap();
        assert_eq!(config.block_size(), 1_000);
        assert!(!config.parallel());
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let result = SimulationConfig::builder().block_size(0).build();
        assert!(matches!(
            result,
            Err(DomainError::InvalidParameter {
                name: "block_size",
                ..
            })
        ));
    }

    #[test]
    fn test_block_count() {
        let config = SimulationConfig::builder().block_size(100).build().unwrap();
        assert_eq!(config.block_count(1), 1);
        assert_eq!(config.block_count(100), 1);
        assert_eq!(config.block_count(101), 2);
        assert_eq!(config.block_count(1_000), 10);
    }
}
