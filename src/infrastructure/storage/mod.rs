//! Storage implementations that need no database

mod memory;

pub use memory::InMemoryWeatherRepository;
