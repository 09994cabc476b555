//! Database repository implementations

pub mod weather_repository;

pub use weather_repository::SeaOrmWeatherRepository;
