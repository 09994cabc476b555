//! Outbound port for the upstream weather observation feed
//!
//! [`WeatherFeed`] decouples the ingestion job from the concrete transport.
//! The production implementation is
//! [`IlmateenistusFeed`](crate::infrastructure::feed::IlmateenistusFeed),
//! which downloads and parses the Estonian Environment Agency XML feed.

use async_trait::async_trait;
use thiserror::Error;

/// One station entry of a feed snapshot, as reported upstream.
///
/// Every field is optional: the feed omits values a station does not measure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationReading {
    pub name: Option<String>,
    pub wmo_code: Option<String>,
    pub air_temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub phenomenon: Option<String>,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Weather feed request failed: {0}")]
    Transport(String),

    #[error("Weather feed responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse weather feed: {0}")]
    Parse(String),
}

impl FeedError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Parse(_) => false,
        }
    }
}

/// Port for reading the current snapshot of all stations.
#[async_trait]
pub trait WeatherFeed: Send + Sync {
    async fn fetch(&self) -> Result<Vec<StationReading>, FeedError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors() {
        assert!(FeedError::Transport("connection reset".into()).is_transient());
        assert!(FeedError::Status { status: 503, body: String::new() }.is_transient());
        assert!(FeedError::Status { status: 429, body: String::new() }.is_transient());
        assert!(!FeedError::Status { status: 404, body: String::new() }.is_transient());
        assert!(!FeedError::Parse("unexpected eof".into()).is_transient());
    }
}
