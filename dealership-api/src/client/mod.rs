/// Outbound clients for the external services
///
/// - `dealers`: Dealership/review service (GET listings, POST reviews)
/// - `sentiment`: Sentiment analyzer and the bounded review annotation
/// - `error`: Failure classification shared by both
///
/// Both services sit behind traits so handlers can run against in-process
/// fakes.

pub mod dealers;
pub mod error;
pub mod sentiment;

pub use dealers::{DealerService, RestDealerClient};
pub use error::{UpstreamError, UpstreamErrorKind};
pub use sentiment::{annotate_reviews, RestSentimentClient, SentimentAnalyzer};

use std::time::Duration;

/// Builds the HTTP client shared by all outbound calls
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("dealership-api/", env!("CARGO_PKG_VERSION")))
        .build()
}
