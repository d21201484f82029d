//! Current weather from OpenWeatherMap.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::error::FetchError;
use super::http::HttpClient;
use super::{Fetcher, SourceData, SourceId};
use crate::config::WeatherSettings;

/// OpenWeatherMap current weather endpoint.
pub const WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Current conditions for one city, in metric units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Condition group, e.g. "Clear", "Rain".
    pub condition: String,
    pub description: String,
    pub humidity: i64,
    /// Pressure in hPa.
    pub pressure: i64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Cloud cover percentage.
    pub clouds: i64,
    pub visibility_km: f64,
    /// Unix timestamp.
    pub sunrise: i64,
    /// Unix timestamp.
    pub sunset: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiResponse {
    name: String,
    main: ApiMain,
    weather: Vec<ApiCondition>,
    wind: ApiWind,
    clouds: ApiClouds,
    visibility: i64,
    sys: ApiSys,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: i64,
    pressure: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiCondition {
    main: String,
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiClouds {
    all: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiSys {
    sunrise: i64,
    sunset: i64,
}

/// Decode an OpenWeatherMap response body.
pub fn parse_weather(body: &[u8]) -> Result<WeatherReport, FetchError> {
    let data: ApiResponse = serde_json::from_slice(body)?;
    let (condition, description) = data
        .weather
        .into_iter()
        .next()
        .map(|c| (c.main, c.description))
        .unwrap_or_default();

    Ok(WeatherReport {
        city: data.name,
        temp: data.main.temp,
        feels_like: data.main.feels_like,
        temp_min: data.main.temp_min,
        temp_max: data.main.temp_max,
        condition,
        description,
        humidity: data.main.humidity,
        pressure: data.main.pressure,
        wind_speed: data.wind.speed,
        clouds: data.clouds.all,
        visibility_km: data.visibility as f64 / 1000.0,
        sunrise: data.sys.sunrise,
        sunset: data.sys.sunset,
    })
}

/// Fetches current weather for the configured city.
pub struct WeatherFetcher {
    client: Arc<dyn HttpClient>,
    api_key: Option<String>,
    city: String,
}

impl WeatherFetcher {
    pub fn new(client: Arc<dyn HttpClient>, settings: &WeatherSettings) -> Self {
        Self {
            client,
            api_key: settings.api_key.clone(),
            city: settings.city.clone(),
        }
    }

    fn url(&self, api_key: &str) -> Result<Url, FetchError> {
        Url::parse_with_params(
            WEATHER_ENDPOINT,
            &[
                ("q", self.city.as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ],
        )
        .map_err(|e| FetchError::Request(e.to_string()))
    }
}

impl Fetcher for WeatherFetcher {
    fn source(&self) -> SourceId {
        SourceId::Weather
    }

    fn fetch(&self) -> Result<SourceData, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(FetchError::MissingConfig("weather.api_key"))?;

        let url = self.url(api_key)?;
        debug!(city = %self.city, "Fetching weather");
        let body = self.client.get(url.as_str(), &[])?;
        parse_weather(&body).map(SourceData::Weather)
    }
}
