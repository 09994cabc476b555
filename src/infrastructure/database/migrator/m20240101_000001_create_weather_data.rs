//! Create weather_data table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WeatherData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeatherData::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WeatherData::StationName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WeatherData::WmoCode).string())
                    .col(
                        ColumnDef::new(WeatherData::AirTemperature)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeatherData::WindSpeed)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WeatherData::WeatherPhenomenon).string())
                    .col(
                        ColumnDef::new(WeatherData::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups are always "newest for station"
        manager
            .create_index(
                Index::create()
                    .name("idx_weather_data_station_timestamp")
                    .table(WeatherData::Table)
                    .col(WeatherData::StationName)
                    .col(WeatherData::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeatherData::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum WeatherData {
    Table,
    Id,
    StationName,
    WmoCode,
    AirTemperature,
    WindSpeed,
    WeatherPhenomenon,
    Timestamp,
}
