//! # Delivery Fee Service
//!
//! Delivery fees for food couriers in Tallinn, Tartu and Pärnu, adjusted
//! for the weather reported by the Estonian Environment Agency.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: cities, vehicles, phenomena, fee rules, repository port
//! - **application**: fee calculation and weather ingestion services
//! - **infrastructure**: SQLite storage (SeaORM), in-memory storage, XML feed client
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: graceful shutdown, retry with backoff

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmWeatherRepository};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiState};
