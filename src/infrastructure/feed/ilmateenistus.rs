//! Estonian Environment Agency observation feed
//!
//! The feed is a single XML document with one `<station>` element per
//! weather station:
//!
//! ```xml
//! <observations timestamp="1710241502">
//!   <station>
//!     <name>Tallinn-Harku</name>
//!     <wmocode>26038</wmocode>
//!     <phenomenon>Light snow shower</phenomenon>
//!     <airtemperature>-2.1</airtemperature>
//!     <windspeed>4.7</windspeed>
//!     ...
//!   </station>
//! </observations>
//! ```

use std::time::Duration;

use async_trait::async_trait;
use quick_xml::de::from_str;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::ports::{FeedError, StationReading, WeatherFeed};

#[derive(Debug, Deserialize)]
struct Observations {
    #[serde(rename = "station", default)]
    stations: Vec<RawStation>,
}

#[derive(Debug, Deserialize)]
struct RawStation {
    name: Option<String>,
    wmocode: Option<String>,
    phenomenon: Option<String>,
    airtemperature: Option<String>,
    windspeed: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number(station: Option<&str>, field: &str, value: Option<String>) -> Option<f64> {
    let raw = non_blank(value)?;
    let number = raw.parse::<f64>().ok().filter(|n| n.is_finite());
    if number.is_none() {
        warn!(station = ?station, field, value = %raw, "Ignoring non-numeric reading");
    }
    number
}

impl From<RawStation> for StationReading {
    fn from(raw: RawStation) -> Self {
        let name = non_blank(raw.name);
        let air_temperature = parse_number(name.as_deref(), "airtemperature", raw.airtemperature);
        let wind_speed = parse_number(name.as_deref(), "windspeed", raw.windspeed);
        Self {
            wmo_code: non_blank(raw.wmocode),
            phenomenon: non_blank(raw.phenomenon),
            air_temperature,
            wind_speed,
            name,
        }
    }
}

/// Parse a feed document into station readings.
pub fn parse_observations(xml: &str) -> Result<Vec<StationReading>, FeedError> {
    let observations: Observations = from_str(xml).map_err(|e| FeedError::Parse(e.to_string()))?;
    Ok(observations
        .stations
        .into_iter()
        .map(StationReading::from)
        .collect())
}

pub struct IlmateenistusFeed {
    client: Client,
    url: String,
}

impl IlmateenistusFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WeatherFeed for IlmateenistusFeed {
    async fn fetch(&self) -> Result<Vec<StationReading>, FeedError> {
        debug!(url = %self.url, "Fetching weather observations");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        let readings = parse_observations(&body)?;
        debug!(stations = readings.len(), "Weather observations parsed");
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<observations timestamp="1710241502">
  <station>
    <name>Kuressaare linn</name>
    <wmocode></wmocode>
    <longitude>22.48944444411111</longitude>
    <latitude>58.26416666666667</latitude>
    <phenomenon/>
    <visibility/>
    <precipitations/>
    <airpressure/>
    <relativehumidity>87</relativehumidity>
    <airtemperature>1.6</airtemperature>
    <winddirection>194</winddirection>
    <windspeed>3.5</windspeed>
    <windspeedmax>5.2</windspeedmax>
    <waterlevel/>
    <waterlevel_eh2000/>
    <watertemperature/>
    <uvindex/>
  </station>
  <station>
    <name>Tallinn-Harku</name>
    <wmocode>26038</wmocode>
    <phenomenon>Light snow shower</phenomenon>
    <airtemperature>-2.1</airtemperature>
    <windspeed>4.7</windspeed>
  </station>
  <station>
    <name>Pärnu</name>
    <wmocode>41803</wmocode>
    <phenomenon>Glaze</phenomenon>
    <airtemperature></airtemperature>
    <windspeed>n/a</windspeed>
  </station>
</observations>"#;

    #[test]
    fn parses_stations() {
        let readings = parse_observations(SAMPLE).unwrap();
        assert_eq!(readings.len(), 3);

        let harku = &readings[1];
        assert_eq!(harku.name.as_deref(), Some("Tallinn-Harku"));
        assert_eq!(harku.wmo_code.as_deref(), Some("26038"));
        assert_eq!(harku.phenomenon.as_deref(), Some("Light snow shower"));
        assert_eq!(harku.air_temperature, Some(-2.1));
        assert_eq!(harku.wind_speed, Some(4.7));
    }

    #[test]
    fn blank_and_invalid_values_are_missing() {
        let readings = parse_observations(SAMPLE).unwrap();

        assert_eq!(readings[0].wmo_code, None);
        assert_eq!(readings[0].phenomenon, None);

        let parnu = &readings[2];
        assert_eq!(parnu.air_temperature, None);
        assert_eq!(parnu.wind_speed, None);
        assert_eq!(parnu.phenomenon.as_deref(), Some("Glaze"));
    }

    #[test]
    fn non_finite_values_are_missing() {
        let xml = r#"<observations>
  <station>
    <name>Tartu-Tõravere</name>
    <airtemperature>inf</airtemperature>
    <windspeed>NaN</windspeed>
  </station>
</observations>"#;
        let readings = parse_observations(xml).unwrap();

        assert_eq!(readings[0].air_temperature, None);
        assert_eq!(readings[0].wind_speed, None);
    }

    #[test]
    fn empty_document_has_no_stations() {
        let readings = parse_observations(r#"<observations timestamp="1"></observations>"#).unwrap();
        assert!(readings.is_empty());
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = parse_observations("<observations><station><name>x</station>").unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
        assert!(!err.is_transient());
    }
}
