/// API route handlers
///
/// - `health`: Liveness and database connectivity
/// - `auth`: Login, logout, registration
/// - `cars`: Car catalog
/// - `dealers`: Dealer listing and details
/// - `reviews`: Dealer reviews and review submission

pub mod auth;
pub mod cars;
pub mod dealers;
pub mod health;
pub mod reviews;
