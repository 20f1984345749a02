use std::fmt::Display;

use crate::models::{Alert, CurrentSnapshot, Forecast, LocationMatch, TimeZoneInfo};

/// Formats current conditions into a human-readable string
pub fn format_current(snapshot: &CurrentSnapshot) -> String {
    let mut output = format!("Current Weather for {}:\n", snapshot.place);
    output.push_str(&format!("  Local Time: {}\n", or_na(&snapshot.local_time)));
    output.push_str(&format!(
        "  Temperature: {}\u{00b0}C / {}\u{00b0}F\n",
        snapshot.temp_c,
        or_na(&snapshot.temp_f)
    ));
    output.push_str(&format!("  Condition: {}\n", snapshot.condition));
    output.push_str(&format!(
        "  Feels Like: {}\u{00b0}C / {}\u{00b0}F\n",
        or_na(&snapshot.feelslike_c),
        or_na(&snapshot.feelslike_f)
    ));
    match &snapshot.wind_dir {
        Some(dir) => output.push_str(&format!("  Wind: {} kph ({})\n", snapshot.wind_kph, dir)),
        None => output.push_str(&format!("  Wind: {} kph\n", snapshot.wind_kph)),
    }
    output.push_str(&format!("  Humidity: {}%\n", snapshot.humidity));
    output.push_str(&format!("  Cloud Cover: {}%\n", or_na(&snapshot.cloud)));
    output.push_str(&format!("  Precipitation: {} mm\n", or_na(&snapshot.precip_mm)));
    output.push_str(&format!("  UV Index: {}\n", or_na(&snapshot.uv)));
    output
}

/// Formats a multi-day forecast, one block per day in provider order
pub fn format_forecast(forecast: &Forecast) -> String {
    let mut output = match &forecast.place {
        Some(place) => format!("Weather Forecast for {place}:\n\n"),
        None => String::from("Weather Forecast:\n\n"),
    };

    for day in &forecast.days {
        output.push_str(&format!(
            "Date: {}\n  Min/Max Temp: {}\u{00b0}C to {}\u{00b0}C\n  Condition: {}\n  Chance of Rain: {}%\n  Max Wind: {} kph\n  Avg Humidity: {}%\n\n",
            day.date,
            day.min_temp_c,
            day.max_temp_c,
            day.condition.as_deref().unwrap_or("Unknown"),
            or_na(&day.chance_of_rain),
            or_na(&day.max_wind_kph),
            or_na(&day.avg_humidity),
        ));
    }
    output
}

/// Formats weather alerts for an area
pub fn format_alerts(area: &str, alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return format!("No active weather alerts for '{area}'.");
    }

    let mut output = format!("Active Weather Alerts for '{area}':\n\n");
    for (i, alert) in alerts.iter().enumerate() {
        output.push_str(&format!(
            "Alert {}:\n  Headline: {}\n  Severity: {}\n  Areas: {}\n  Effective: {}\n  Expires: {}\n",
            i + 1,
            alert
                .headline
                .as_deref()
                .or(alert.event.as_deref())
                .unwrap_or("Unknown"),
            unknown(&alert.severity),
            unknown(&alert.areas),
            unknown(&alert.effective),
            unknown(&alert.expires),
        ));
        if let Some(event) = &alert.event {
            output.push_str(&format!("  Event: {}\n", event));
        }
        if let Some(urgency) = &alert.urgency {
            output.push_str(&format!("  Urgency: {}\n", urgency));
        }
        if let Some(description) = &alert.description {
            output.push_str(&format!("  Description: {}\n", description));
        }
        output.push('\n');
    }
    output
}

/// Formats location search matches
pub fn format_locations(query: &str, matches: &[LocationMatch]) -> String {
    if matches.is_empty() {
        return format!("No locations found matching '{query}'.");
    }

    let mut output = format!(
        "Found {} locations matching '{}':\n\n",
        matches.len(),
        query
    );
    for location in matches {
        output.push_str(&format!(
            "{}\n  Coordinates: {}, {}\n  ID: {}\n\n",
            location.place,
            or_na(&location.lat),
            or_na(&location.lon),
            or_na(&location.id)
        ));
    }
    output
}

/// Formats timezone information for a location
pub fn format_time_zone(info: &TimeZoneInfo) -> String {
    format!(
        "Timezone Information for {}:\n  Timezone: {}\n  Local Time: {}\n  Latitude: {}\n  Longitude: {}\n",
        info.place,
        info.tz_id,
        or_na(&info.local_time),
        or_na(&info.lat),
        or_na(&info.lon)
    )
}

fn or_na<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "N/A".to_string(), ToString::to_string)
}

fn unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastDay, Place};

    fn place() -> Place {
        Place {
            name: "London".into(),
            region: Some("City of London".into()),
            country: Some("UK".into()),
        }
    }

    fn day(date: &str) -> ForecastDay {
        ForecastDay {
            date: date.into(),
            max_temp_c: 21.5,
            min_temp_c: 11.0,
            condition: Some("Sunny".into()),
            chance_of_rain: Some(10.0),
            max_wind_kph: None,
            avg_humidity: Some(55.0),
        }
    }

    #[test]
    fn current_renders_required_fields_and_na_for_missing() {
        let snapshot = CurrentSnapshot {
            place: place(),
            local_time: None,
            condition: "Light rain".into(),
            temp_c: 12.0,
            temp_f: Some(53.6),
            feelslike_c: None,
            feelslike_f: None,
            humidity: 82.0,
            wind_kph: 19.8,
            wind_dir: Some("SW".into()),
            cloud: None,
            precip_mm: Some(0.4),
            uv: None,
        };

        let text = format_current(&snapshot);
        assert!(text.starts_with("Current Weather for London, City of London, UK:"));
        assert!(text.contains("Temperature: 12\u{00b0}C / 53.6\u{00b0}F"));
        assert!(text.contains("Condition: Light rain"));
        assert!(text.contains("Wind: 19.8 kph (SW)"));
        assert!(text.contains("Humidity: 82%"));
        assert!(text.contains("UV Index: N/A"));
    }

    #[test]
    fn forecast_keeps_day_order() {
        let forecast = Forecast {
            place: Some(place()),
            days: vec![day("2024-05-26"), day("2024-05-27"), day("2024-05-28")],
        };

        let text = format_forecast(&forecast);
        assert_eq!(text.matches("Date: ").count(), 3);
        let first = text.find("2024-05-26").unwrap();
        let last = text.find("2024-05-28").unwrap();
        assert!(first < last);
        assert!(text.contains("Min/Max Temp: 11\u{00b0}C to 21.5\u{00b0}C"));
        assert!(text.contains("Chance of Rain: 10%"));
        assert!(text.contains("Max Wind: N/A kph"));
    }

    #[test]
    fn empty_alerts_say_so() {
        assert_eq!(
            format_alerts("Miami", &[]),
            "No active weather alerts for 'Miami'."
        );
    }

    #[test]
    fn alerts_fall_back_to_event_when_headline_missing() {
        let alert = Alert {
            headline: None,
            event: Some("Flood Warning".into()),
            severity: Some("Severe".into()),
            urgency: None,
            areas: None,
            effective: None,
            expires: None,
            description: None,
        };

        let text = format_alerts("Houston", &[alert]);
        assert!(text.contains("Alert 1:\n  Headline: Flood Warning"));
        assert!(text.contains("Areas: Unknown"));
        assert!(!text.contains("Description"));
    }

    #[test]
    fn empty_search_says_so() {
        assert_eq!(
            format_locations("zzz", &[]),
            "No locations found matching 'zzz'."
        );
    }
}
