use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MarketData::Table)
                    .if_not_exists()
                    .col(pk_auto(MarketData::Id))
                    .col(integer(MarketData::Year))
                    .col(integer(MarketData::Week))
                    .col(double(MarketData::RainfallMm))
                    .col(double(MarketData::TemperatureC))
                    .col(boolean(MarketData::MarketDay))
                    .col(boolean(MarketData::SchoolOpen))
                    .col(string_len(MarketData::DiseaseAlert, 10))
                    .col(string_len(MarketData::LastWeekDemand, 10))
                    .col(string_len(MarketData::MarketDemand, 10))
                    .col(string_len(MarketData::Month, 20))
                    .to_owned(),
            )
            .await?;

        // One row per market week
        manager
            .create_index(
                Index::create()
                    .name("idx_market_data_year_week")
                    .table(MarketData::Table)
                    .col(MarketData::Year)
                    .col(MarketData::Week)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MarketData::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MarketData {
    Table,
    Id,
    Year,
    Week,
    RainfallMm,
    TemperatureC,
    MarketDay,
    SchoolOpen,
    DiseaseAlert,
    LastWeekDemand,
    MarketDemand,
    Month,
}
