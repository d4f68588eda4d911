pub use sea_orm_migration::prelude::*;

mod m20260401_000001_create_practices;
mod m20260401_000002_create_doctors;
mod m20260401_000003_create_patients;
mod m20260401_000004_create_doctor_patient_links;
mod m20260401_000005_create_pairing_codes;
mod m20260401_000006_create_entries;
mod m20260401_000007_create_entry_shares;
mod m20260401_000008_create_comments;
mod m20260401_000009_create_analysis_jobs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_practices::Migration),
            Box::new(m20260401_000002_create_doctors::Migration),
            Box::new(m20260401_000003_create_patients::Migration),
            Box::new(m20260401_000004_create_doctor_patient_links::Migration),
            Box::new(m20260401_000005_create_pairing_codes::Migration),
            Box::new(m20260401_000006_create_entries::Migration),
            Box::new(m20260401_000007_create_entry_shares::Migration),
            Box::new(m20260401_000008_create_comments::Migration),
            Box::new(m20260401_000009_create_analysis_jobs::Migration),
        ]
    }
}
