use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Country)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(GenreType)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Series)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(SeriesType)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(SeriesSubtitle)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(SeriesDubbing)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(SeriesReleaseCountry)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Episode)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Producer)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Phouse)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Collaboration)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Contract)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Admin)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Viewer)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Feedback)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(AdminHistory)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // The recent-feedback stat filters on FDATE.
        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_fdate")
                    .table(Feedback)
                    .col(crate::entities::feedback::Column::Fdate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminHistory).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedback).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Viewer).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admin).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contract).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Collaboration).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Phouse).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Producer).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Episode).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SeriesReleaseCountry).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SeriesDubbing).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SeriesSubtitle).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SeriesType).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Series).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GenreType).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Country).to_owned())
            .await?;

        Ok(())
    }
}
