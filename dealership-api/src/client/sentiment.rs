/// Sentiment analyzer client and review annotation
///
/// The analyzer answers `GET {base}/analyze/{text}` with
/// `{"sentiment": "positive" | "negative" | "neutral"}`.
///
/// `annotate_reviews` runs the per-review calls with bounded concurrency and
/// keeps the input order. A failed analysis degrades that single review to
/// `NEUTRAL` instead of failing the whole listing.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{UpstreamError, UpstreamErrorKind};

const SERVICE: &str = "sentiment";

/// Label used when a review can't be analyzed
pub const NEUTRAL: &str = "neutral";

#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Returns the sentiment label for `text`
    async fn analyze(&self, text: &str) -> Result<String, UpstreamError>;
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    sentiment: String,
}

/// `SentimentAnalyzer` over HTTP
#[derive(Debug, Clone)]
pub struct RestSentimentClient {
    client: Client,
    base_url: Url,
}

impl RestSentimentClient {
    /// # Errors
    ///
    /// Fails if `base_url` doesn't parse or can't carry path segments.
    pub fn new(client: Client, base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Sentiment API URL cannot be used as a base: {}", base_url);
        }

        Ok(Self { client, base_url })
    }

    /// The review text becomes one percent-encoded path segment
    fn analyze_url(&self, text: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("analyze").push(text);
        }
        url
    }
}

#[async_trait]
impl SentimentAnalyzer for RestSentimentClient {
    async fn analyze(&self, text: &str) -> Result<String, UpstreamError> {
        let url = self.analyze_url(text);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))?;

        let body: SentimentResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::new(SERVICE, UpstreamErrorKind::InvalidResponse, e.to_string()))?;

        Ok(body.sentiment)
    }
}

/// Adds a `sentiment` field to every review object
///
/// At most `concurrency` analyses run at once. Output order matches input
/// order. Reviews without a `review` text get `NEUTRAL` without a call.
///
/// Non-object entries are the one exception to "every review gets a label":
/// there is no field to attach it to, so they pass through untouched and
/// carry no `sentiment`.
pub async fn annotate_reviews(
    analyzer: &dyn SentimentAnalyzer,
    reviews: Vec<Value>,
    concurrency: usize,
) -> Vec<Value> {
    stream::iter(reviews)
        .map(|review| annotate_one(analyzer, review))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

async fn annotate_one(analyzer: &dyn SentimentAnalyzer, mut review: Value) -> Value {
    if !review.is_object() {
        warn!("Skipping sentiment for non-object review entry");
        return review;
    }

    let label = match review.get("review").and_then(Value::as_str) {
        Some(text) => match analyzer.analyze(text).await {
            Ok(label) => label,
            Err(e) => {
                warn!(error = %e, review_id = ?review.get("id"), "Sentiment analysis failed");
                NEUTRAL.to_string()
            }
        },
        None => {
            debug!(review_id = ?review.get("id"), "Review has no text to analyze");
            NEUTRAL.to_string()
        }
    };

    if let Some(fields) = review.as_object_mut() {
        fields.insert("sentiment".to_string(), Value::String(label));
    }
    review
}
