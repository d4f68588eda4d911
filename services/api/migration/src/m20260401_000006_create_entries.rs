use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entries::PatientId).uuid().not_null())
                    .col(
                        ColumnDef::new(Entries::HappenedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Entries::Situation).text())
                    .col(ColumnDef::new(Entries::Emotions).json_binary())
                    .col(ColumnDef::new(Entries::Triggers).json_binary())
                    .col(ColumnDef::new(Entries::Techniques).json_binary())
                    .col(ColumnDef::new(Entries::StutterFrequency).integer())
                    .col(ColumnDef::new(Entries::Notes).text())
                    .col(ColumnDef::new(Entries::Tags).json_binary())
                    .col(
                        ColumnDef::new(Entries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Entries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Entries::Table, Entries::PatientId)
                            .to(Patients::Table, Patients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Entries::Table)
                    .col(Entries::PatientId)
                    .col(Entries::HappenedAt)
                    .name("idx_entries_patient_happened_at")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Entries::Table)
                    .col(Entries::UpdatedAt)
                    .name("idx_entries_updated_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Entries {
    Table,
    Id,
    PatientId,
    HappenedAt,
    Situation,
    Emotions,
    Triggers,
    Techniques,
    StutterFrequency,
    Notes,
    Tags,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Patients {
    Table,
    Id,
}
