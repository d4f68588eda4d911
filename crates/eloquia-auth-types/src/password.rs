//! Argon2id password hashing.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng},
};

use eloquia_domain::account::MIN_PASSWORD_LEN;

use crate::settings::SettingsError;

/// Lowest accepted argon2 iteration count.
pub const MIN_PASSWORD_COST: u32 = 2;

/// Lowest accepted argon2 memory cost in KiB.
pub const MIN_PASSWORD_MEMORY_KIB: u32 = 1024;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password must be at least {} characters", MIN_PASSWORD_LEN)]
    TooShort,
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hashes and verifies passwords with fixed argon2id parameters.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(cost: u32, memory_kib: u32) -> Result<Self, SettingsError> {
        if cost < MIN_PASSWORD_COST {
            return Err(SettingsError::PasswordCostTooLow {
                min: MIN_PASSWORD_COST,
                got: cost,
            });
        }
        if memory_kib < MIN_PASSWORD_MEMORY_KIB {
            return Err(SettingsError::PasswordMemoryTooLow {
                min: MIN_PASSWORD_MEMORY_KIB,
                got: memory_kib,
            });
        }
        let params = Params::new(memory_kib, cost, 1, None)
            .map_err(|e| SettingsError::PasswordParams(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password into a PHC string. Rejects passwords shorter than
    /// [`MIN_PASSWORD_LEN`] characters.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(PasswordError::TooShort);
        }
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    /// Check a password against a stored PHC string. Unparseable hashes never
    /// verify.
    pub fn verify(&self, hash: &str, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        self.argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// [`hash`](Self::hash) on tokio's blocking pool, keeping argon2 off the
    /// async workers.
    pub async fn spawn_hash(&self, password: String) -> Result<String, PasswordError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PasswordError::Hash(e.to_string()))?
    }

    /// [`verify`](Self::verify) on tokio's blocking pool.
    pub async fn spawn_verify(&self, hash: String, password: String) -> Result<bool, PasswordError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&hash, &password))
            .await
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }
}
