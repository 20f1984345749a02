use thiserror::Error;

/// Startup failures. Any of these stops the server before it serves a request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingApiKey(&'static str),

    #[error("invalid value for {var}: {value:?} (expected a positive number of seconds)")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Per-call failures. Tools render these into their text result.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The caller passed an argument the provider cannot use
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Timeout, DNS failure, refused connection
    #[error("Network error while contacting the weather provider: {0}")]
    Network(String),

    /// Non-success status; `message` is the provider's own text when it sent one
    #[error("Weather provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },

    /// Response body was not JSON, or lacked a field we need
    #[error("Incomplete data from the weather provider: {0}")]
    DataShape(String),
}

impl WeatherError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::DataShape(format!("missing field `{field}`"))
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key in its query string
        let err = err.without_url();
        if err.is_timeout() {
            Self::Network(format!("request timed out ({err})"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_stable_prefixes() {
        let provider = WeatherError::Provider {
            status: 400,
            message: "No matching location found.".to_string(),
        };
        assert_eq!(
            provider.to_string(),
            "Weather provider error (HTTP 400): No matching location found."
        );
        assert!(WeatherError::missing("current.temp_c")
            .to_string()
            .starts_with("Incomplete data"));
        assert!(WeatherError::Network("refused".into())
            .to_string()
            .starts_with("Network error"));
    }
}
