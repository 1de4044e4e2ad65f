use crate::entities::prelude::*;
use crate::entities::{logins, logoffs};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Referenced tables first so the foreign keys on the event tables resolve.
        manager
            .create_table(
                schema
                    .create_table_from_entity(Clients)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Servers)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Logins)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Logoffs)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Tokens)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Both report queries group and join on (client, server) and compare timestamps.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_logins_pair_timestamp")
                    .table(Logins)
                    .col(logins::Column::ClientId)
                    .col(logins::Column::ServerId)
                    .col(logins::Column::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_logoffs_pair_timestamp")
                    .table(Logoffs)
                    .col(logoffs::Column::ClientId)
                    .col(logoffs::Column::ServerId)
                    .col(logoffs::Column::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tokens).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Logoffs).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Logins).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Servers).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Clients).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
