use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DoctorPatientLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DoctorPatientLinks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DoctorPatientLinks::DoctorId).uuid().not_null())
                    .col(ColumnDef::new(DoctorPatientLinks::PatientId).uuid().not_null())
                    .col(
                        ColumnDef::new(DoctorPatientLinks::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(DoctorPatientLinks::RequestedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DoctorPatientLinks::ApprovedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(DoctorPatientLinks::ApprovedByDoctorId).uuid())
                    .col(
                        ColumnDef::new(DoctorPatientLinks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DoctorPatientLinks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DoctorPatientLinks::Table, DoctorPatientLinks::DoctorId)
                            .to(Doctors::Table, Doctors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DoctorPatientLinks::Table, DoctorPatientLinks::PatientId)
                            .to(Patients::Table, Patients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(DoctorPatientLinks::Table)
                    .col(DoctorPatientLinks::DoctorId)
                    .col(DoctorPatientLinks::PatientId)
                    .unique()
                    .name("idx_doctor_patient_links_pair")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(DoctorPatientLinks::Table)
                    .col(DoctorPatientLinks::PatientId)
                    .name("idx_doctor_patient_links_patient_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DoctorPatientLinks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DoctorPatientLinks {
    Table,
    Id,
    DoctorId,
    PatientId,
    Status,
    RequestedAt,
    ApprovedAt,
    ApprovedByDoctorId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Doctors {
    Table,
    Id,
}

#[derive(Iden)]
enum Patients {
    Table,
    Id,
}
