/// Password hashing using Argon2id
///
/// Passwords are stored as PHC strings (`$argon2id$v=19$m=...`), so the
/// parameters travel with the hash and verification needs no configuration.
///
/// # Parameters
///
/// - Memory: 64 MB (65536 KB)
/// - Iterations: 3
/// - Parallelism: 4 lanes
/// - Output: 32 bytes
///
/// # Example
///
/// ```
/// use dealership_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("drive-safely")?;
/// assert!(verify_password("drive-safely", &hash)?);
/// assert!(!verify_password("drive-fast", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};
use std::sync::OnceLock;

const DUMMY_PASSWORD: &str = "dealership-unknown-account";

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Stored hash could not be parsed
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Hashes a password with Argon2id and a fresh random salt
///
/// # Errors
///
/// Returns `PasswordError::HashError` if the parameters are rejected or
/// hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a plaintext password against a stored PHC hash
///
/// Returns `Ok(false)` for a wrong password. Errors are reserved for hashes
/// that cannot be parsed or verified at all.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    // Parameters come from the hash itself
    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}

/// Burns one verification for an account that doesn't exist
///
/// Makes an unknown username cost as much as a wrong password. Always
/// returns `false`, including for the password the throwaway hash was made
/// from.
pub fn verify_unknown_account(password: &str) -> bool {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    let hash = DUMMY_HASH.get_or_init(|| hash_password(DUMMY_PASSWORD).ok());
    if let Some(hash) = hash {
        let _ = verify_password(password, hash);
    }

    false
}
