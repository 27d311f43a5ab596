//! Password hashing and verification.
//!
//! Passwords are hashed with Argon2id and stored in PHC string format, so the
//! salt and parameters travel with the hash and can evolve without a schema
//! change.

use anyhow::anyhow;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::common::{Error, Result};

/// Minimum accepted password length, applied at registration, password
/// change, and password reset alike.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Checks the password policy shared by every endpoint that accepts a new
/// password.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::validation("password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Error::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(anyhow!("failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash string.
///
/// Returns `Ok(false)` on mismatch; only malformed hashes surface as errors.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| Error::Internal(anyhow!("stored password hash is malformed: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Internal(anyhow!(
            "failed to verify password: {e}"
        ))),
    }
}
