pub mod ports;
pub mod services;

// Re-export key types for convenience
pub use ports::{FeedError, StationReading, WeatherFeed};
pub use services::{
    next_run_after, start_weather_ingest_task, DeliveryFeeService, FeeQuote, IngestError,
    IngestSchedule, WeatherIngestService,
};
