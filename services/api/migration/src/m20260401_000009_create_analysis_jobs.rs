use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AnalysisJobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnalysisJobs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AnalysisJobs::PatientId).uuid().not_null())
                    .col(ColumnDef::new(AnalysisJobs::CreatedByDoctorId).uuid().not_null())
                    .col(ColumnDef::new(AnalysisJobs::ObjectKey).string().not_null())
                    .col(ColumnDef::new(AnalysisJobs::Kind).string().not_null())
                    .col(
                        ColumnDef::new(AnalysisJobs::Status)
                            .string()
                            .not_null()
                            .default("Queued"),
                    )
                    .col(ColumnDef::new(AnalysisJobs::Progress).integer())
                    .col(ColumnDef::new(AnalysisJobs::Result).json_binary())
                    .col(ColumnDef::new(AnalysisJobs::Metrics).json_binary())
                    .col(ColumnDef::new(AnalysisJobs::ErrorMessage).text())
                    .col(ColumnDef::new(AnalysisJobs::StartedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(AnalysisJobs::FinishedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(AnalysisJobs::EntryId).uuid())
                    .col(
                        ColumnDef::new(AnalysisJobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnalysisJobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AnalysisJobs::Table, AnalysisJobs::PatientId)
                            .to(Patients::Table, Patients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AnalysisJobs::Table, AnalysisJobs::CreatedByDoctorId)
                            .to(Doctors::Table, Doctors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AnalysisJobs::Table, AnalysisJobs::EntryId)
                            .to(Entries::Table, Entries::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AnalysisJobs::Table)
                    .col(AnalysisJobs::PatientId)
                    .name("idx_analysis_jobs_patient_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AnalysisJobs::Table)
                    .col(AnalysisJobs::Status)
                    .name("idx_analysis_jobs_status")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AnalysisJobs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AnalysisJobs {
    Table,
    Id,
    PatientId,
    CreatedByDoctorId,
    ObjectKey,
    Kind,
    Status,
    Progress,
    Result,
    Metrics,
    ErrorMessage,
    StartedAt,
    FinishedAt,
    EntryId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Patients {
    Table,
    Id,
}

#[derive(Iden)]
enum Doctors {
    Table,
    Id,
}

#[derive(Iden)]
enum Entries {
    Table,
    Id,
}
