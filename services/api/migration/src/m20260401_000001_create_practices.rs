use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Practices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Practices::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Practices::Name).string().not_null())
                    .col(ColumnDef::new(Practices::Address).string())
                    .col(ColumnDef::new(Practices::LogoUrl).string())
                    .col(
                        ColumnDef::new(Practices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Practices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Practices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Practices {
    Table,
    Id,
    Name,
    Address,
    LogoUrl,
    CreatedAt,
    UpdatedAt,
}
