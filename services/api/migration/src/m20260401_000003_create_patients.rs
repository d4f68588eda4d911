use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Patients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Patients::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Patients::DisplayName).string().not_null())
                    .col(ColumnDef::new(Patients::BirthDate).date())
                    .col(
                        ColumnDef::new(Patients::Status)
                            .string()
                            .not_null()
                            .default("Active"),
                    )
                    // Nullable: invite-created patients have no login yet.
                    .col(ColumnDef::new(Patients::Email).string().unique_key())
                    .col(ColumnDef::new(Patients::PasswordHash).string())
                    .col(ColumnDef::new(Patients::PatientCode).string().unique_key())
                    .col(ColumnDef::new(Patients::LastEntryAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Patients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Patients::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Patients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Patients {
    Table,
    Id,
    DisplayName,
    BirthDate,
    Status,
    Email,
    PasswordHash,
    PatientCode,
    LastEntryAt,
    CreatedAt,
    UpdatedAt,
}
