use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_FORECAST_DAYS;
use crate::error::WeatherError;

// ============================================================================
// WeatherAPI.com Response Models
// ============================================================================
//
// Every field is optional: the provider omits fields freely, so required
// values are enforced when converting into the snapshot types below.

#[derive(Debug, Deserialize)]
pub struct ProviderErrorResponse {
    pub error: Option<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderErrorBody {
    pub code: Option<i64>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocationData {
    pub name: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub tz_id: Option<String>,
    pub localtime: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConditionData {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub location: Option<LocationData>,
    pub current: Option<CurrentData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrentData {
    pub temp_c: Option<f64>,
    pub temp_f: Option<f64>,
    pub condition: Option<ConditionData>,
    pub wind_kph: Option<f64>,
    pub wind_dir: Option<String>,
    pub humidity: Option<f64>,
    pub cloud: Option<f64>,
    pub feelslike_c: Option<f64>,
    pub feelslike_f: Option<f64>,
    pub precip_mm: Option<f64>,
    pub uv: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub location: Option<LocationData>,
    pub forecast: Option<ForecastData>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastData {
    #[serde(rename = "forecastday")]
    pub forecast_day: Option<Vec<ForecastDayData>>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastDayData {
    pub date: Option<String>,
    pub day: Option<DayData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DayData {
    #[serde(rename = "maxtemp_c")]
    pub max_temp_c: Option<f64>,
    #[serde(rename = "mintemp_c")]
    pub min_temp_c: Option<f64>,
    #[serde(rename = "maxwind_kph")]
    pub max_wind_kph: Option<f64>,
    #[serde(rename = "avghumidity")]
    pub avg_humidity: Option<f64>,
    pub daily_chance_of_rain: Option<f64>,
    pub condition: Option<ConditionData>,
}

#[derive(Debug, Deserialize)]
pub struct AlertsResponse {
    pub alerts: Option<AlertList>,
}

#[derive(Debug, Deserialize)]
pub struct AlertList {
    pub alert: Option<Vec<AlertData>>,
}

#[derive(Debug, Deserialize)]
pub struct AlertData {
    pub headline: Option<String>,
    pub event: Option<String>,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    pub areas: Option<String>,
    pub effective: Option<String>,
    pub expires: Option<String>,
    pub desc: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct TimeZoneResponse {
    pub location: Option<LocationData>,
}

// ============================================================================
// Extracted Snapshots
// ============================================================================

/// A resolved place name: "name, region, country", skipping empty parts
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl Place {
    fn from_location(location: &LocationData) -> Option<Self> {
        let name = non_empty(location.name.clone())?;
        Some(Self {
            name,
            region: non_empty(location.region.clone()),
            country: non_empty(location.country.clone()),
        })
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for part in [&self.region, &self.country].into_iter().flatten() {
            write!(f, ", {part}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSnapshot {
    pub place: Place,
    pub local_time: Option<String>,
    pub condition: String,
    pub temp_c: f64,
    pub temp_f: Option<f64>,
    pub feelslike_c: Option<f64>,
    pub feelslike_f: Option<f64>,
    pub humidity: f64,
    pub wind_kph: f64,
    pub wind_dir: Option<String>,
    pub cloud: Option<f64>,
    pub precip_mm: Option<f64>,
    pub uv: Option<f64>,
}

impl TryFrom<CurrentResponse> for CurrentSnapshot {
    type Error = WeatherError;

    fn try_from(response: CurrentResponse) -> Result<Self, Self::Error> {
        let location = response
            .location
            .ok_or_else(|| WeatherError::missing("location"))?;
        let current = response
            .current
            .ok_or_else(|| WeatherError::missing("current"))?;

        let place =
            Place::from_location(&location).ok_or_else(|| WeatherError::missing("location.name"))?;
        let condition = current
            .condition
            .and_then(|c| non_empty(c.text))
            .ok_or_else(|| WeatherError::missing("current.condition.text"))?;

        Ok(Self {
            place,
            local_time: location.localtime,
            condition,
            temp_c: current
                .temp_c
                .ok_or_else(|| WeatherError::missing("current.temp_c"))?,
            temp_f: current.temp_f,
            feelslike_c: current.feelslike_c,
            feelslike_f: current.feelslike_f,
            humidity: current
                .humidity
                .ok_or_else(|| WeatherError::missing("current.humidity"))?,
            wind_kph: current
                .wind_kph
                .ok_or_else(|| WeatherError::missing("current.wind_kph"))?,
            wind_dir: current.wind_dir,
            cloud: current.cloud,
            precip_mm: current.precip_mm,
            uv: current.uv,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub condition: Option<String>,
    pub chance_of_rain: Option<f64>,
    pub max_wind_kph: Option<f64>,
    pub avg_humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub place: Option<Place>,
    pub days: Vec<ForecastDay>,
}

impl TryFrom<ForecastResponse> for Forecast {
    type Error = WeatherError;

    fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
        let raw_days = response
            .forecast
            .and_then(|f| f.forecast_day)
            .ok_or_else(|| WeatherError::missing("forecast.forecastday"))?;

        let days = raw_days
            .into_iter()
            .enumerate()
            .map(|(i, raw)| -> Result<ForecastDay, WeatherError> {
                let date = non_empty(raw.date)
                    .ok_or_else(|| WeatherError::missing(&format!("forecastday[{i}].date")))?;
                let day = raw
                    .day
                    .ok_or_else(|| WeatherError::missing(&format!("forecastday[{i}].day")))?;
                Ok(ForecastDay {
                    date,
                    max_temp_c: day.max_temp_c.ok_or_else(|| {
                        WeatherError::missing(&format!("forecastday[{i}].day.maxtemp_c"))
                    })?,
                    min_temp_c: day.min_temp_c.ok_or_else(|| {
                        WeatherError::missing(&format!("forecastday[{i}].day.mintemp_c"))
                    })?,
                    condition: day.condition.and_then(|c| non_empty(c.text)),
                    chance_of_rain: day.daily_chance_of_rain,
                    max_wind_kph: day.max_wind_kph,
                    avg_humidity: day.avg_humidity,
                })
            })
            .collect::<Result<Vec<_>, WeatherError>>()?;

        Ok(Self {
            place: response.location.as_ref().and_then(Place::from_location),
            days,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub headline: Option<String>,
    pub event: Option<String>,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    pub areas: Option<String>,
    pub effective: Option<String>,
    pub expires: Option<String>,
    pub description: Option<String>,
}

impl From<AlertData> for Alert {
    fn from(data: AlertData) -> Self {
        Self {
            headline: non_empty(data.headline),
            event: non_empty(data.event),
            severity: non_empty(data.severity),
            urgency: non_empty(data.urgency),
            areas: non_empty(data.areas),
            effective: non_empty(data.effective),
            expires: non_empty(data.expires),
            description: non_empty(data.desc),
        }
    }
}

impl AlertsResponse {
    /// Extracts alerts in provider order. A missing `alerts` object is incomplete data;
    /// a missing or empty `alert` list means there are no active alerts.
    pub fn into_alerts(self) -> Result<Vec<Alert>, WeatherError> {
        let list = self
            .alerts
            .ok_or_else(|| WeatherError::missing("alerts"))?;
        Ok(list
            .alert
            .unwrap_or_default()
            .into_iter()
            .map(Alert::from)
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationMatch {
    pub id: Option<i64>,
    pub place: Place,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl TryFrom<SearchResult> for LocationMatch {
    type Error = WeatherError;

    fn try_from(result: SearchResult) -> Result<Self, Self::Error> {
        let name = non_empty(result.name).ok_or_else(|| WeatherError::missing("name"))?;
        Ok(Self {
            id: result.id,
            place: Place {
                name,
                region: non_empty(result.region),
                country: non_empty(result.country),
            },
            lat: result.lat,
            lon: result.lon,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeZoneInfo {
    pub place: Place,
    pub tz_id: String,
    pub local_time: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl TryFrom<TimeZoneResponse> for TimeZoneInfo {
    type Error = WeatherError;

    fn try_from(response: TimeZoneResponse) -> Result<Self, Self::Error> {
        let location = response
            .location
            .ok_or_else(|| WeatherError::missing("location"))?;
        let place =
            Place::from_location(&location).ok_or_else(|| WeatherError::missing("location.name"))?;
        let tz_id =
            non_empty(location.tz_id).ok_or_else(|| WeatherError::missing("location.tz_id"))?;

        Ok(Self {
            place,
            tz_id,
            local_time: location.localtime,
            lat: location.lat,
            lon: location.lon,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct LocationRequest {
    /// Location query: city name, "lat,lon", US zip, UK postcode or IP address
    pub q: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ForecastRequest {
    /// Location query: city name, "lat,lon", US zip, UK postcode or IP address
    pub q: String,
    /// Number of forecast days, 1 to 7. Values outside the range are clamped.
    #[serde(default = "default_forecast_days")]
    pub days: i64,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AlertsRequest {
    /// Area to check for alerts, accepted in the same forms as a location query
    pub area: String,
}

fn default_forecast_days() -> i64 {
    DEFAULT_FORECAST_DAYS
}
