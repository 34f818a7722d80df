/// Authentication primitives
///
/// - `password`: Argon2id hashing and verification for user passwords
/// - `session_token`: Opaque session token generation and hashing
///
/// Session persistence lives in `models::session`; this module only deals
/// with the secret material.

pub mod password;
pub mod session_token;
