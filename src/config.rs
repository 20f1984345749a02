use std::time::Duration;

use crate::constants::{
    DEFAULT_TIMEOUT_SECS, ENV_API_BASE, ENV_API_KEY, ENV_CODE_EXECUTOR_URL, ENV_MCP2_URL,
    ENV_PROPHET_URL, ENV_TIMEOUT_SECS, WEATHER_API_BASE,
};
use crate::error::ConfigError;

/// URLs of sibling services. The weather tools never call them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuxiliaryServices {
    pub mcp2_url: Option<String>,
    pub prophet_url: Option<String>,
    pub code_executor_url: Option<String>,
}

/// Process-wide configuration, read once at startup
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub auxiliary: AuxiliaryServices,
}

impl WeatherConfig {
    /// Creates a configuration with default base URL and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: WEATHER_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auxiliary: AuxiliaryServices::default(),
        }
    }

    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(ENV_API_KEY).ok_or(ConfigError::MissingApiKey(ENV_API_KEY))?;

        let base_url = get(ENV_API_BASE)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| WEATHER_API_BASE.to_string());

        let timeout = match get(ENV_TIMEOUT_SECS) {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: ENV_TIMEOUT_SECS,
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            api_key,
            base_url,
            timeout,
            auxiliary: AuxiliaryServices {
                mcp2_url: get(ENV_MCP2_URL),
                prophet_url: get(ENV_PROPHET_URL),
                code_executor_url: get(ENV_CODE_EXECUTOR_URL),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = WeatherConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey("WEATHER_API_KEY")));

        let err = WeatherConfig::from_lookup(lookup(&[("WEATHER_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = WeatherConfig::from_lookup(lookup(&[("WEATHER_API_KEY", "abc")])).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, WEATHER_API_BASE);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.auxiliary, AuxiliaryServices::default());
    }

    #[test]
    fn overrides_and_auxiliary_urls_are_read() {
        let config = WeatherConfig::from_lookup(lookup(&[
            ("WEATHER_API_KEY", "abc"),
            ("WEATHER_API_BASE", "http://localhost:9000/v1/"),
            ("WEATHER_API_TIMEOUT_SECS", "3"),
            ("MCP2_BASE_URL", "http://mcp2:8080"),
            ("CODE_EXECUTOR_URL", "http://exec:8002"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.auxiliary.mcp2_url.as_deref(), Some("http://mcp2:8080"));
        assert_eq!(config.auxiliary.prophet_url, None);
        assert_eq!(
            config.auxiliary.code_executor_url.as_deref(),
            Some("http://exec:8002")
        );
    }

    #[test]
    fn bad_timeout_is_rejected() {
        for raw in ["0", "soon", "-4"] {
            let err = WeatherConfig::from_lookup(lookup(&[
                ("WEATHER_API_KEY", "abc"),
                ("WEATHER_API_TIMEOUT_SECS", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimeout { .. }), "{raw}");
        }
    }
}
