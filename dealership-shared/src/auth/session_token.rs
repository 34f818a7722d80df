/// Session token generation
///
/// A session token is handed to the client once (in a cookie) and only its
/// SHA-256 digest is stored. Looking a session up means hashing the presented
/// token and matching on the digest column.
///
/// # Format
///
/// `dlr_` followed by 40 base62 characters (44 chars total).
///
/// # Example
///
/// ```
/// use dealership_shared::auth::session_token::{generate_session_token, hash_session_token, is_well_formed};
///
/// let (token, hash) = generate_session_token();
/// assert!(is_well_formed(&token));
/// assert_eq!(hash, hash_session_token(&token));
/// ```

use rand::Rng;
use sha2::{Digest, Sha256};

const TOKEN_RANDOM_LENGTH: usize = 40;

const TOKEN_PREFIX: &str = "dlr_";

/// Total length of a session token
pub const SESSION_TOKEN_LENGTH: usize = TOKEN_PREFIX.len() + TOKEN_RANDOM_LENGTH;

/// Generates a new session token
///
/// Returns `(plaintext_token, sha256_hex)`. Only the hash should be persisted.
pub fn generate_session_token() -> (String, String) {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    let random_part: String = (0..TOKEN_RANDOM_LENGTH)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();

    let token = format!("{}{}", TOKEN_PREFIX, random_part);
    let hash = hash_session_token(&token);

    (token, hash)
}

/// Hex-encoded SHA-256 digest of a token (64 chars)
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Cheap shape check run before touching the database
pub fn is_well_formed(token: &str) -> bool {
    token.len() == SESSION_TOKEN_LENGTH
        && token.starts_with(TOKEN_PREFIX)
        && token[TOKEN_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique() {
        let (a, hash_a) = generate_session_token();
        let (b, hash_b) = generate_session_token();

        assert_ne!(a, b);
        assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn test_generated_token_shape() {
        let (token, hash) = generate_session_token();

        assert_eq!(token.len(), SESSION_TOKEN_LENGTH);
        assert!(token.starts_with("dlr_"));
        assert_eq!(hash.len(), 64);
        assert!(is_well_formed(&token));
    }

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_session_token("dlr_abc"), hash_session_token("dlr_abc"));
        assert_ne!(hash_session_token("dlr_abc"), hash_session_token("dlr_abd"));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("dlr_short"));
        assert!(!is_well_formed(&format!("xyz_{}", "a".repeat(40))));
        assert!(!is_well_formed(&format!("dlr_{}!", "a".repeat(39))));
    }
}
