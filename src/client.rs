use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::WeatherConfig;
use crate::constants::{MAX_FORECAST_DAYS, MIN_FORECAST_DAYS, USER_AGENT};
use crate::error::{ConfigError, WeatherError};
use crate::formatters::{
    format_alerts, format_current, format_forecast, format_locations, format_time_zone,
};
use crate::models::{
    Alert, AlertsResponse, CurrentResponse, CurrentSnapshot, Forecast, ForecastResponse,
    LocationMatch, ProviderErrorResponse, SearchResult, TimeZoneInfo, TimeZoneResponse,
};

/// HTTP client for the WeatherAPI.com REST API.
///
/// The `fetch_*` methods return typed results. The `get_*`/`search_*`
/// methods are the tool entry points: they always produce text, turning
/// every per-call failure into a descriptive message.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl WeatherClient {
    /// Creates a client with the configured timeout applied to every request
    pub fn new(config: WeatherConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Makes an HTTP GET request against `endpoint` and deserializes the JSON response
    async fn make_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.config.base_url, endpoint);
        tracing::debug!(%url, ?params, "sending provider request");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[("key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(provider_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::DataShape(format!("malformed JSON response ({e})")))
    }

    #[instrument(skip(self))]
    pub async fn fetch_current(&self, q: &str) -> Result<CurrentSnapshot, WeatherError> {
        require_non_empty("location query", q)?;
        let response: CurrentResponse = self.make_request("current.json", &[("q", q)]).await?;
        CurrentSnapshot::try_from(response)
    }

    /// Fetches a forecast; `days` is clamped into the provider's supported window first
    #[instrument(skip(self))]
    pub async fn fetch_forecast(&self, q: &str, days: i64) -> Result<Forecast, WeatherError> {
        require_non_empty("location query", q)?;
        let days = clamp_forecast_days(days).to_string();
        let response: ForecastResponse = self
            .make_request(
                "forecast.json",
                &[("q", q), ("days", days.as_str()), ("aqi", "no"), ("alerts", "no")],
            )
            .await?;
        Forecast::try_from(response)
    }

    #[instrument(skip(self))]
    pub async fn fetch_alerts(&self, area: &str) -> Result<Vec<Alert>, WeatherError> {
        require_non_empty("area", area)?;
        let response: AlertsResponse = self.make_request("alerts.json", &[("q", area)]).await?;
        response.into_alerts()
    }

    #[instrument(skip(self))]
    pub async fn fetch_locations(&self, q: &str) -> Result<Vec<LocationMatch>, WeatherError> {
        require_non_empty("search query", q)?;
        let results: Vec<SearchResult> = self.make_request("search.json", &[("q", q)]).await?;
        results.into_iter().map(LocationMatch::try_from).collect()
    }

    #[instrument(skip(self))]
    pub async fn fetch_time_zone(&self, q: &str) -> Result<TimeZoneInfo, WeatherError> {
        require_non_empty("location query", q)?;
        let response: TimeZoneResponse = self.make_request("timezone.json", &[("q", q)]).await?;
        TimeZoneInfo::try_from(response)
    }

    pub async fn get_current_weather(&self, q: &str) -> String {
        match self.fetch_current(q).await {
            Ok(snapshot) => format_current(&snapshot),
            Err(e) => failure("current weather", q, &e),
        }
    }

    pub async fn get_weather_forecast(&self, q: &str, days: i64) -> String {
        match self.fetch_forecast(q, days).await {
            Ok(forecast) => format_forecast(&forecast),
            Err(e) => failure("forecast", q, &e),
        }
    }

    pub async fn get_weather_alerts(&self, area: &str) -> String {
        match self.fetch_alerts(area).await {
            Ok(alerts) => format_alerts(area, &alerts),
            Err(e) => failure("weather alerts", area, &e),
        }
    }

    pub async fn search_locations(&self, q: &str) -> String {
        match self.fetch_locations(q).await {
            Ok(matches) => format_locations(q, &matches),
            Err(e) => failure("locations", q, &e),
        }
    }

    pub async fn get_time_zone(&self, q: &str) -> String {
        match self.fetch_time_zone(q).await {
            Ok(info) => format_time_zone(&info),
            Err(e) => failure("timezone information", q, &e),
        }
    }
}

/// Clamps a requested day count into the provider's 1..=7 window
pub fn clamp_forecast_days(days: i64) -> i64 {
    let clamped = days.clamp(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS);
    if clamped != days {
        tracing::warn!(requested = days, clamped, "forecast days out of range, clamping");
    }
    clamped
}

fn require_non_empty(name: &str, value: &str) -> Result<(), WeatherError> {
    if value.trim().is_empty() {
        return Err(WeatherError::InvalidInput(format!("{name} must not be empty")));
    }
    Ok(())
}

/// Builds a provider error, preferring the provider's own message
fn provider_error(status: StatusCode, body: &str) -> WeatherError {
    let message = serde_json::from_str::<ProviderErrorResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "request failed ({})",
                status.canonical_reason().unwrap_or("unknown status")
            )
        });

    WeatherError::Provider {
        status: status.as_u16(),
        message,
    }
}

fn failure(what: &str, subject: &str, err: &WeatherError) -> String {
    tracing::warn!(error = %err, subject, "failed to fetch {}", what);
    format!("Could not retrieve {what} for '{subject}'. {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_are_clamped_to_provider_window() {
        assert_eq!(clamp_forecast_days(0), 1);
        assert_eq!(clamp_forecast_days(-12), 1);
        assert_eq!(clamp_forecast_days(1), 1);
        assert_eq!(clamp_forecast_days(5), 5);
        assert_eq!(clamp_forecast_days(7), 7);
        assert_eq!(clamp_forecast_days(30), 7);
    }

    #[test]
    fn provider_message_is_surfaced_verbatim() {
        let body = r#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        let err = provider_error(StatusCode::BAD_REQUEST, body);
        assert_eq!(
            err.to_string(),
            "Weather provider error (HTTP 400): No matching location found."
        );
    }

    #[test]
    fn provider_error_without_payload_is_generic() {
        let err = provider_error(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(
            err.to_string(),
            "Weather provider error (HTTP 502): request failed (Bad Gateway)"
        );
    }

    #[tokio::test]
    async fn blank_query_is_rejected_without_a_request() {
        let mut config = WeatherConfig::new("test-key");
        config.base_url = "http://127.0.0.1:1".to_string();
        let client = WeatherClient::new(config).unwrap();

        let text = client.get_current_weather("   ").await;
        assert_eq!(
            text,
            "Could not retrieve current weather for '   '. Invalid input: location query must not be empty"
        );
    }
}
