use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EntryShares::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EntryShares::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EntryShares::EntryId).uuid().not_null())
                    .col(ColumnDef::new(EntryShares::SharedByPatientId).uuid().not_null())
                    .col(ColumnDef::new(EntryShares::SharedWithDoctorId).uuid().not_null())
                    .col(
                        ColumnDef::new(EntryShares::SharedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EntryShares::RevokedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(EntryShares::Table, EntryShares::EntryId)
                            .to(Entries::Table, Entries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EntryShares::Table, EntryShares::SharedByPatientId)
                            .to(Patients::Table, Patients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EntryShares::Table, EntryShares::SharedWithDoctorId)
                            .to(Doctors::Table, Doctors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(EntryShares::Table)
                    .col(EntryShares::EntryId)
                    .col(EntryShares::SharedWithDoctorId)
                    .unique()
                    .name("idx_entry_shares_entry_doctor")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EntryShares::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EntryShares {
    Table,
    Id,
    EntryId,
    SharedByPatientId,
    SharedWithDoctorId,
    SharedAt,
    RevokedAt,
}

#[derive(Iden)]
enum Entries {
    Table,
    Id,
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
