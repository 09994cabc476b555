pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmWeatherRepository;

use sea_orm::{Database, DatabaseConnection};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./delivery_fee.db?mode=rwc")
    pub url: String,
}

/// Connect to the database. Migrations are applied by the caller.
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!(url = %config.url, "Connecting to database");
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use migrator::Migrator;
    use sea_orm_migration::MigratorTrait;

    #[tokio::test]
    async fn connects_with_configured_url() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
        };

        let db = init_database(&config).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db.ping().await.unwrap();
    }

    #[tokio::test]
    async fn rejects_unknown_scheme() {
        let config = DatabaseConfig {
            url: "nosuchdb://localhost/x".to_string(),
        };
        assert!(init_database(&config).await.is_err());
    }
}
