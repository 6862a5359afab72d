use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_holidays_worker_id")
                    .table(Holidays::Table)
                    .col(Holidays::WorkerId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_timelogs_worker_id")
                    .table(Timelogs::Table)
                    .col(Timelogs::WorkerId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_timelogs_worker_id")
                    .table(Timelogs::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_holidays_worker_id")
                    .table(Holidays::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Holidays {
    Table,
    WorkerId,
}

#[derive(DeriveIden)]
enum Timelogs {
    Table,
    WorkerId,
}
