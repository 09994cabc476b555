//! Infrastructure layer - external concerns

pub mod database;
pub mod feed;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmWeatherRepository};
pub use feed::IlmateenistusFeed;
pub use storage::InMemoryWeatherRepository;
