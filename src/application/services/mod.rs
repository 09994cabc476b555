//! Application services

mod delivery_fee;
mod ingest_schedule;
mod weather_ingest;

pub use delivery_fee::{DeliveryFeeService, FeeQuote};
pub use ingest_schedule::{next_run_after, start_weather_ingest_task, IngestSchedule};
pub use weather_ingest::{select_monitored, IngestError, WeatherIngestService};
