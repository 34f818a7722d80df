/// Database models
///
/// - `user`: User accounts
/// - `session`: Login sessions keyed by hashed tokens
/// - `car`: Car makes and models (local reference catalog)
///
/// Dealers and reviews are owned by the external dealership service and
/// have no local tables.

pub mod car;
pub mod session;
pub mod user;
