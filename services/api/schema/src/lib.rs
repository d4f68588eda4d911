//! sea-orm entities for the Eloquia API database.

pub mod analysis_jobs;
pub mod comments;
pub mod doctor_patient_links;
pub mod doctors;
pub mod entries;
pub mod entry_shares;
pub mod pairing_codes;
pub mod patients;
pub mod practices;
