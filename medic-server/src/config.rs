//! Startup configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::discovery::ScanConfig;
use crate::geocode::GeocodeConfig;
use crate::overpass::OverpassConfig;

/// Errors reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything `main` needs to assemble the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub overpass: OverpassConfig,
    pub geocode: GeocodeConfig,
    pub scan: ScanConfig,
    /// Serve facilities from this fixture instead of the network
    pub mock_file: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Unset and blank variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_var("MEDIC_BIND_ADDR", get("MEDIC_BIND_ADDR"))?
            .unwrap_or_else(|| Self::default().bind_addr);
        let timeout: Option<u64> =
            parse_at_least("HTTP_TIMEOUT_SECS", get("HTTP_TIMEOUT_SECS"), 1)?;

        let mut overpass = OverpassConfig::new();
        if let Some(list) = get("OVERPASS_ENDPOINTS") {
            overpass = overpass.with_endpoints(split_list(&list));
        }
        if let Some(secs) = timeout {
            overpass = overpass.with_timeout(secs);
        }

        let mut geocode = GeocodeConfig::new();
        if let Some(url) = get("NOMINATIM_URL") {
            geocode = geocode.with_base_url(url.trim_end_matches('/'));
        }
        if let Some(region) = lookup("GEOCODE_REGION") {
            // Explicitly blank searches worldwide.
            let region = region.trim();
            geocode = geocode.with_region((!region.is_empty()).then(|| region.to_string()));
        }
        if let Some(secs) = timeout {
            geocode = geocode.with_timeout(secs);
        }

        let mut scan = ScanConfig::default();
        if let Some(secs) = parse_at_least("SCAN_COOLDOWN_SECS", get("SCAN_COOLDOWN_SECS"), 0)? {
            scan = scan.with_cooldown_secs(secs);
        }
        if let Some(radius) = parse_at_least("SCAN_RADIUS_M", get("SCAN_RADIUS_M"), 1)? {
            scan = scan.with_radius_m(radius);
        }
        if let Some(max) = parse_at_least("SCAN_MAX_RESULTS", get("SCAN_MAX_RESULTS"), 1)? {
            scan = scan.with_max_results(max);
        }

        Ok(Self {
            bind_addr,
            overpass,
            geocode,
            scan,
            mock_file: get("OVERPASS_MOCK_FILE").map(PathBuf::from),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            overpass: OverpassConfig::default(),
            geocode: GeocodeConfig::default(),
            scan: ScanConfig::default(),
            mock_file: None,
        }
    }
}

fn parse_var<T>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                value: v.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Like `parse_var`, but also rejects values below `min`.
fn parse_at_least<T>(
    var: &'static str,
    value: Option<String>,
    min: T,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr + PartialOrd + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    let parsed: Option<T> = parse_var(var, value)?;
    match parsed {
        Some(v) if v < min => Err(ConfigError::Invalid {
            var,
            value: v.to_string(),
            reason: format!("must be at least {min}"),
        }),
        other => Ok(other),
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.scan.cooldown_secs, 20);
        assert_eq!(config.scan.radius_m, 10_000);
        assert_eq!(config.scan.max_results, 75);
        assert_eq!(config.overpass.timeout_secs, 30);
        assert_eq!(config.overpass.endpoints.len(), 3);
        assert_eq!(config.geocode.region.as_deref(), Some("Tamil Nadu"));
        assert!(config.mock_file.is_none());
    }

    #[test]
    fn overrides_from_variables() {
        let config = config_from(&[
            ("MEDIC_BIND_ADDR", "0.0.0.0:8080"),
            ("OVERPASS_ENDPOINTS", " http://a/api , ,http://b/api "),
            ("NOMINATIM_URL", "http://geo.local/"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("SCAN_COOLDOWN_SECS", "0"),
            ("SCAN_RADIUS_M", "2500"),
            ("SCAN_MAX_RESULTS", "10"),
            ("OVERPASS_MOCK_FILE", "data/trichy_facilities.json"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.overpass.endpoints, vec!["http://a/api", "http://b/api"]);
        assert_eq!(config.overpass.timeout_secs, 5);
        assert_eq!(config.geocode.timeout_secs, 5);
        assert_eq!(config.geocode.base_url, "http://geo.local");
        assert_eq!(config.scan.cooldown_secs, 0);
        assert_eq!(config.scan.radius_m, 2500);
        assert_eq!(config.scan.max_results, 10);
        assert_eq!(
            config.mock_file,
            Some(PathBuf::from("data/trichy_facilities.json"))
        );
    }

    #[test]
    fn blank_region_searches_worldwide() {
        let config = config_from(&[("GEOCODE_REGION", "  ")]).unwrap();
        assert_eq!(config.geocode.region, None);

        let config = config_from(&[("GEOCODE_REGION", "Kerala")]).unwrap();
        assert_eq!(config.geocode.region.as_deref(), Some("Kerala"));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for (var, value) in [
            ("SCAN_MAX_RESULTS", "0"),
            ("SCAN_COOLDOWN_SECS", "-5"),
            ("HTTP_TIMEOUT_SECS", "0"),
            ("SCAN_RADIUS_M", "0"),
        ] {
            let err = config_from(&[(var, value)]).unwrap_err();
            let message = err.to_string();
            assert!(message.contains(var), "{message}");
            assert!(message.contains("must be at least"), "{message}");
        }
    }

    #[test]
    fn invalid_number_is_reported() {
        let err = config_from(&[("SCAN_MAX_RESULTS", "lots")]).unwrap_err();
        assert!(err.to_string().contains("SCAN_MAX_RESULTS"));
        assert!(err.to_string().contains("lots"));
    }
}
