//! Scan configuration for the discovery pipeline.

use chrono::Duration;

use crate::cache::CacheConfig;
use crate::overpass::DEFAULT_RADIUS_M;
use crate::scoring::PriorityPolicy;

/// Configuration parameters for facility scans.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Minimum time between two scan attempts (seconds).
    pub cooldown_secs: i64,

    /// Search radius around the reference coordinate (metres).
    pub radius_m: u32,

    /// Maximum number of facilities kept per scan.
    pub max_results: usize,

    /// Result cache settings.
    pub cache: CacheConfig,

    /// Scoring weights.
    pub policy: PriorityPolicy,
}

impl ScanConfig {
    /// Returns the cooldown as a Duration.
    pub fn cooldown(&self) -> Duration {
        Duration::seconds(self.cooldown_secs)
    }

    pub fn with_cooldown_secs(mut self, secs: i64) -> Self {
        self.cooldown_secs = secs;
        self
    }

    pub fn with_radius_m(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_policy(mut self, policy: PriorityPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: 20,
            radius_m: DEFAULT_RADIUS_M,
            max_results: 75,
            cache: CacheConfig::default(),
            policy: PriorityPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ScanConfig::default();

        assert_eq!(config.cooldown_secs, 20);
        assert_eq!(config.cooldown(), Duration::seconds(20));
        assert_eq!(config.radius_m, 10_000);
        assert_eq!(config.max_results, 75);
        assert_eq!(config.cache.precision, 3);
        assert_eq!(config.policy, PriorityPolicy::default());
    }

    #[test]
    fn custom_config() {
        let config = ScanConfig::default()
            .with_cooldown_secs(5)
            .with_radius_m(2_500)
            .with_max_results(10)
            .with_policy(PriorityPolicy::distance_only());

        assert_eq!(config.cooldown(), Duration::seconds(5));
        assert_eq!(config.radius_m, 2_500);
        assert_eq!(config.max_results, 10);
        assert_eq!(config.policy, PriorityPolicy::distance_only());
    }
}
