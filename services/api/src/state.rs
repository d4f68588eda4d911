use std::sync::Arc;

use sea_orm::DatabaseConnection;

use eloquia_auth_types::manager::SessionManager;
use eloquia_auth_types::password::PasswordHasher;
use eloquia_auth_types::settings::AuthSettings;

use crate::infra::db::{
    DbDoctorRepository, DbEntryRepository, DbLinkRepository, DbPairingCodeRepository,
    DbPatientRepository, DbPracticeRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub sessions: Arc<SessionManager>,
    pub passwords: PasswordHasher,
}

impl AppState {
    pub fn new(db: DatabaseConnection, auth: &AuthSettings) -> Self {
        Self {
            db,
            sessions: Arc::new(SessionManager::new(auth)),
            passwords: auth.passwords.clone(),
        }
    }

    pub fn doctor_repo(&self) -> DbDoctorRepository {
        DbDoctorRepository {
            db: self.db.clone(),
        }
    }

    pub fn patient_repo(&self) -> DbPatientRepository {
        DbPatientRepository {
            db: self.db.clone(),
        }
    }

    pub fn practice_repo(&self) -> DbPracticeRepository {
        DbPracticeRepository {
            db: self.db.clone(),
        }
    }

    pub fn link_repo(&self) -> DbLinkRepository {
        DbLinkRepository {
            db: self.db.clone(),
        }
    }

    pub fn pairing_code_repo(&self) -> DbPairingCodeRepository {
        DbPairingCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn entry_repo(&self) -> DbEntryRepository {
        DbEntryRepository {
            db: self.db.clone(),
        }
    }
}
