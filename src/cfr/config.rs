//! Configuration and statistics for the sequence-form self-play driver.

use serde::{Deserialize, Serialize};

/// Configuration for a [`super::driver::SelfPlayDriver`] run.
///
/// # Example
/// ```
/// use sequence_form_cfr::cfr::CFRConfig;
///
/// let config = CFRConfig::default();
/// assert!(config.use_cfr_plus);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CFRConfig {
    /// Use CFR+ (RM+ local matchers, linear-weighted averaging, alternating
    /// per-player updates). If `false`, runs vanilla CFR (RM local
    /// matchers, uniform averaging, simultaneous updates).
    pub use_cfr_plus: bool,

    /// Number of threads for the payoff-table reduction. `None` lets rayon
    /// size its global pool automatically.
    pub num_threads: Option<usize>,

    /// Random seed, for components that sample (MCCFR+). Vanilla/CFR+
    /// self-play is deterministic and ignores this.
    pub seed: Option<u64>,
}

impl Default for CFRConfig {
    fn default() -> Self {
        Self {
            use_cfr_plus: true,
            num_threads: None,
            seed: None,
        }
    }
}

impl CFRConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vanilla CFR: RM local matchers, uniform averaging.
    pub fn vanilla() -> Self {
        Self {
            use_cfr_plus: false,
            ..Default::default()
        }
    }

    pub fn with_cfr_plus(mut self, enable: bool) -> Self {
        self.use_cfr_plus = enable;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(threads) = self.num_threads {
            if threads == 0 {
                return Err(ConfigError::InvalidThreadCount(threads));
            }
        }
        Ok(())
    }
}

/// Errors that can occur when validating a [`CFRConfig`].
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// `num_threads` was set to zero.
    InvalidThreadCount(usize),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidThreadCount(n) => {
                write!(f, "num_threads must be at least 1, got {}", n)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Statistics tracked during self-play training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CFRStats {
    pub iterations: u64,
    pub elapsed_seconds: f64,
    pub iterations_per_second: f64,
    pub exploitability: Option<f64>,
    pub exploitability_history: Vec<ExploitabilityPoint>,
}

/// A single exploitability measurement at a specific iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploitabilityPoint {
    pub iteration: u64,
    pub exploitability: f64,
}

impl CFRStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }

    pub fn record_exploitability(&mut self, iteration: u64, exploitability: f64) {
        self.exploitability = Some(exploitability);
        self.exploitability_history.push(ExploitabilityPoint {
            iteration,
            exploitability,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_cfr_plus() {
        assert!(CFRConfig::default().use_cfr_plus);
    }

    #[test]
    fn vanilla_disables_cfr_plus() {
        assert!(!CFRConfig::vanilla().use_cfr_plus);
    }

    #[test]
    fn zero_threads_is_invalid() {
        let cfg = CFRConfig::default().with_threads(0);
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidThreadCount(0))));
    }
}
