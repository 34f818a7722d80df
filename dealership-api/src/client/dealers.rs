/// Dealership service client
///
/// The dealership service owns dealers and reviews. It exposes:
///
/// ```text
/// GET  /fetchDealers                 all dealers
/// GET  /fetchDealers/{state}         dealers in one state
/// GET  /fetchDealer/{id}             one dealer
/// GET  /fetchReviews/dealer/{id}     reviews of one dealer
/// POST /insert_review                store a review
/// ```

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::error::{UpstreamError, UpstreamErrorKind};

const SERVICE: &str = "dealers";

/// Operations the handlers need from the dealership service
#[async_trait]
pub trait DealerService: Send + Sync {
    /// GETs `endpoint` (a path such as `/fetchDealer/5`) and returns its JSON body
    async fn get(&self, endpoint: &str) -> Result<Value, UpstreamError>;

    /// Forwards a review payload unchanged
    async fn post_review(&self, payload: &Value) -> Result<Value, UpstreamError>;
}

/// Endpoint for the dealer listing, optionally filtered by state
///
/// `None` and `"All"` both select the unfiltered listing.
pub fn dealers_endpoint(state: Option<&str>) -> String {
    match state {
        None | Some("All") => "/fetchDealers".to_string(),
        Some(state) => format!("/fetchDealers/{}", state),
    }
}

pub fn dealer_endpoint(dealer_id: u64) -> String {
    format!("/fetchDealer/{}", dealer_id)
}

pub fn dealer_reviews_endpoint(dealer_id: u64) -> String {
    format!("/fetchReviews/dealer/{}", dealer_id)
}

/// `DealerService` over HTTP
#[derive(Debug, Clone)]
pub struct RestDealerClient {
    client: Client,
    base_url: String,
}

impl RestDealerClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl DealerService for RestDealerClient {
    async fn get(&self, endpoint: &str) -> Result<Value, UpstreamError> {
        let url = self.url(endpoint);
        debug!(%url, "GET dealership service");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::new(SERVICE, UpstreamErrorKind::InvalidResponse, e.to_string()))
    }

    async fn post_review(&self, payload: &Value) -> Result<Value, UpstreamError> {
        let url = self.url("/insert_review");
        debug!(%url, "POST review to dealership service");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::new(SERVICE, UpstreamErrorKind::InvalidResponse, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dealers_endpoint() {
        assert_eq!(dealers_endpoint(None), "/fetchDealers");
        assert_eq!(dealers_endpoint(Some("All")), "/fetchDealers");
        assert_eq!(dealers_endpoint(Some("Texas")), "/fetchDealers/Texas");
    }

    #[test]
    fn test_dealer_endpoints() {
        assert_eq!(dealer_endpoint(5), "/fetchDealer/5");
        assert_eq!(dealer_reviews_endpoint(29), "/fetchReviews/dealer/29");
    }

    #[test]
    fn test_url_joining_ignores_extra_slashes() {
        let client = RestDealerClient::new(Client::new(), "http://dealers:3030/");
        assert_eq!(client.url("/fetchDealers"), "http://dealers:3030/fetchDealers");
        assert_eq!(client.url("fetchDealer/3"), "http://dealers:3030/fetchDealer/3");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_unavailable() {
        let client = RestDealerClient::new(Client::new(), "http://127.0.0.1:1");

        let err = client.get("/fetchDealers").await.unwrap_err();
        assert_eq!(err.service, "dealers");
        assert_eq!(err.kind, UpstreamErrorKind::Unavailable);
    }
}
