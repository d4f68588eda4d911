use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PairingCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PairingCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PairingCodes::Code).string_len(6).not_null())
                    .col(ColumnDef::new(PairingCodes::DoctorId).uuid().not_null())
                    .col(
                        ColumnDef::new(PairingCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PairingCodes::ConsumedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(PairingCodes::ConsumedByPatientId).uuid())
                    .col(
                        ColumnDef::new(PairingCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PairingCodes::Table, PairingCodes::DoctorId)
                            .to(Doctors::Table, Doctors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Activity depends on now(), so code uniqueness is checked at issue
        // time rather than enforced by an index.
        manager
            .create_index(
                Index::create()
                    .table(PairingCodes::Table)
                    .col(PairingCodes::Code)
                    .name("idx_pairing_codes_code")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(PairingCodes::Table)
                    .col(PairingCodes::DoctorId)
                    .name("idx_pairing_codes_doctor_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(PairingCodes::Table)
                    .col(PairingCodes::ExpiresAt)
                    .name("idx_pairing_codes_expires_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PairingCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PairingCodes {
    Table,
    Id,
    Code,
    DoctorId,
    ExpiresAt,
    ConsumedAt,
    ConsumedByPatientId,
    CreatedAt,
}

#[derive(Iden)]
enum Doctors {
    Table,
    Id,
}
