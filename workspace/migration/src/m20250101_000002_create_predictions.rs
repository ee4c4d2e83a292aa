use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Predictions::Table)
                    .if_not_exists()
                    .col(pk_auto(Predictions::Id))
                    .col(timestamp_with_time_zone(Predictions::Timestamp))
                    .col(string_len(Predictions::PredictedDemand, 10))
                    .col(double(Predictions::ConfidenceScore))
                    .to_owned(),
            )
            .await?;

        // Dashboard windows filter on timestamp
        manager
            .create_index(
                Index::create()
                    .name("idx_predictions_timestamp")
                    .table(Predictions::Table)
                    .col(Predictions::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Predictions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Predictions {
    Table,
    Id,
    Timestamp,
    PredictedDemand,
    ConfidenceScore,
}
