use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError,
};

use crate::client::WeatherClient;
use crate::config::WeatherConfig;
use crate::error::ConfigError;
use crate::models::{AlertsRequest, ForecastRequest, LocationRequest};

/// MCP server exposing the WeatherAPI.com tools.
///
/// Every tool returns a success result carrying text, including when the
/// lookup failed; the text then describes the failure.
#[derive(Clone)]
pub struct Weather {
    client: WeatherClient,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance
    pub fn new(config: WeatherConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: WeatherClient::new(config)?,
            tool_router: Self::tool_router(),
        })
    }

    fn text(text: String) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-weatherapi-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather lookups powered by WeatherAPI.com: current conditions, \
                multi-day forecasts, active alerts, location search and timezones. \
                Locations may be city names, 'lat,lon' pairs, postal codes or IP addresses."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    #[tool(description = "Get the current weather for a location (city name, 'lat,lon', US zip, UK postcode or IP address).")]
    async fn get_current_weather(
        &self,
        Parameters(request): Parameters<LocationRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting current weather for: {}", request.q);
        Self::text(self.client.get_current_weather(&request.q).await)
    }

    #[tool(description = "Get a multi-day weather forecast for a location. 'days' is 1 to 7 (default 3); values outside that range are clamped.")]
    async fn get_weather_forecast(
        &self,
        Parameters(request): Parameters<ForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting {}-day forecast for: {}", request.days, request.q);
        Self::text(
            self.client
                .get_weather_forecast(&request.q, request.days)
                .await,
        )
    }

    #[tool(description = "Get active weather alerts for an area, if any.")]
    async fn get_weather_alerts(
        &self,
        Parameters(request): Parameters<AlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Checking weather alerts for: {}", request.area);
        Self::text(self.client.get_weather_alerts(&request.area).await)
    }

    #[tool(description = "Search for locations by full or partial name.")]
    async fn search_locations(
        &self,
        Parameters(request): Parameters<LocationRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Searching locations matching: {}", request.q);
        Self::text(self.client.search_locations(&request.q).await)
    }

    #[tool(description = "Get the timezone and local time for a location.")]
    async fn get_time_zone(
        &self,
        Parameters(request): Parameters<LocationRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting timezone for: {}", request.q);
        Self::text(self.client.get_time_zone(&request.q).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_service() -> Weather {
        let mut config = WeatherConfig::new("test-key");
        config.base_url = "http://127.0.0.1:1".to_string();
        Weather::new(config).unwrap()
    }

    fn result_text(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[test]
    fn router_registers_every_tool() {
        let service = offline_service();
        let mut names: Vec<String> = service
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            [
                "get_current_weather",
                "get_time_zone",
                "get_weather_alerts",
                "get_weather_forecast",
                "search_locations",
            ]
        );
    }

    #[tokio::test]
    async fn failures_are_reported_as_successful_text() {
        let service = offline_service();

        let result = service
            .get_weather_alerts(Parameters(AlertsRequest {
                area: "Miami".to_string(),
            }))
            .await
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        let text = result_text(&result);
        assert!(text.starts_with("Could not retrieve weather alerts for 'Miami'."));
        assert!(text.contains("Network error"));
    }
}
