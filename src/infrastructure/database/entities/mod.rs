//! Database entities module

pub mod weather_data;

pub use weather_data::Entity as WeatherData;
