use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250301_000001_create_images::Migration)]
    }
}

mod m20250301_000001_create_images {
    use sea_orm_migration::prelude::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Images::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Images::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Images::ImageUrl).string().not_null())
                        .col(ColumnDef::new(Images::Description).string())
                        .col(ColumnDef::new(Images::Location).string())
                        .col(ColumnDef::new(Images::Owner).string().not_null())
                        .col(
                            ColumnDef::new(Images::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Images::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_images_owner")
                        .table(Images::Table)
                        .col(Images::Owner)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Images::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Images {
        Table,
        Id,
        ImageUrl,
        Description,
        Location,
        Owner,
        CreatedAt,
        UpdatedAt,
    }
}
