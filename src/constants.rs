/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-weatherapi-server/0.1.0";

/// WeatherAPI.com base URL
pub const WEATHER_API_BASE: &str = "https://api.weatherapi.com/v1";

/// Per-request timeout applied when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Forecast window supported by the provider
pub const MIN_FORECAST_DAYS: i64 = 1;
pub const MAX_FORECAST_DAYS: i64 = 7;
pub const DEFAULT_FORECAST_DAYS: i64 = 3;

// Environment variables
pub const ENV_API_KEY: &str = "WEATHER_API_KEY";
pub const ENV_API_BASE: &str = "WEATHER_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "WEATHER_API_TIMEOUT_SECS";
pub const ENV_MCP2_URL: &str = "MCP2_BASE_URL";
pub const ENV_PROPHET_URL: &str = "PROPHET_SERVICE_URL";
pub const ENV_CODE_EXECUTOR_URL: &str = "CODE_EXECUTOR_URL";
