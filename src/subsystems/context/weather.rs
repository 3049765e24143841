//! Current-weather lookup (OpenWeatherMap `data/2.5/weather` shape).

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{fetch_json, http_client};
use crate::config::WeatherConfig;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub city: String,
    /// Rounded to the nearest whole degree.
    pub temp_celsius: i64,
    pub condition: String,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    api_base_url: String,
    default_city: String,
    api_key: Option<String>,
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig, api_key: Option<String>) -> Result<Self, AppError> {
        Ok(Self {
            client: http_client(config.timeout_seconds)?,
            api_base_url: config.api_base_url.clone(),
            default_city: config.city.clone(),
            api_key,
        })
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    /// One bounded request. Any failure yields `None`.
    pub async fn get_weather(&self, city: &str) -> Option<WeatherSnapshot> {
        let Some(key) = self.api_key.as_deref() else {
            debug!("weather: no API key configured");
            return None;
        };

        let req = self
            .client
            .get(&self.api_base_url)
            .query(&[("q", city), ("units", "metric"), ("appid", key)]);

        match fetch_json(req).await {
            Ok(body) => {
                let snapshot = parse_weather(&body, city);
                if snapshot.is_none() {
                    warn!(%city, "weather: response missing expected fields");
                }
                snapshot
            }
            Err(e) => {
                warn!(%city, error = %e, "weather lookup failed");
                None
            }
        }
    }
}

/// Extract a snapshot from a provider body. Missing `main`, `main.temp`, an
/// empty `weather` array or an empty `description` all mean "unavailable".
pub fn parse_weather(body: &Value, requested_city: &str) -> Option<WeatherSnapshot> {
    let temp = body.get("main")?.get("temp")?.as_f64()?;
    let condition = body
        .get("weather")?
        .as_array()?
        .first()?
        .get("description")?
        .as_str()?
        .trim();
    if condition.is_empty() {
        return None;
    }
    let city = body
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(requested_city);

    Some(WeatherSnapshot {
        city: city.to_string(),
        temp_celsius: temp.round() as i64,
        condition: condition.to_string(),
    })
}

/// City named after "weather in"/"weather for", if any.
pub fn city_from_utterance(lowered: &str) -> Option<String> {
    let idx = lowered.find("weather")?;
    let rest = &lowered[idx + "weather".len()..];
    let rest = rest
        .trim_start()
        .strip_prefix("in ")
        .or_else(|| rest.trim_start().strip_prefix("for "))?;
    let city = rest
        .trim()
        .trim_end_matches(|c: char| c == '?' || c == '.' || c == '!')
        .split(" today")
        .next()?
        .trim();
    if city.is_empty() {
        return None;
    }
    Some(title_case(city))
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
