/// Upstream failure classification
///
/// Every outbound failure is reduced to an `UpstreamErrorKind`. Clients only
/// ever see `UpstreamErrorKind::public_message`; the `detail` string with the
/// underlying error is for logs.

use std::fmt;

/// Closed set of outbound failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    /// Connection refused, DNS failure, reset
    Unavailable,

    /// No answer within the configured timeout
    Timeout,

    /// Service answered with a non-success status
    Rejected,

    /// Body was not the JSON we expected
    InvalidResponse,
}

impl UpstreamErrorKind {
    /// Fixed, client-safe description
    pub fn public_message(&self) -> &'static str {
        match self {
            UpstreamErrorKind::Unavailable => "service unavailable",
            UpstreamErrorKind::Timeout => "service timed out",
            UpstreamErrorKind::Rejected => "request rejected by service",
            UpstreamErrorKind::InvalidResponse => "invalid response from service",
        }
    }
}

impl fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.public_message())
    }
}

/// Failure of a call to an external service
#[derive(Debug, thiserror::Error)]
#[error("{service}: {kind} ({detail})")]
pub struct UpstreamError {
    /// Which collaborator failed (`dealers`, `sentiment`)
    pub service: &'static str,
    pub kind: UpstreamErrorKind,
    pub detail: String,
}

impl UpstreamError {
    pub fn new(service: &'static str, kind: UpstreamErrorKind, detail: impl Into<String>) -> Self {
        Self {
            service,
            kind,
            detail: detail.into(),
        }
    }

    /// Classifies a reqwest error
    pub fn from_reqwest(service: &'static str, err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            UpstreamErrorKind::Timeout
        } else if err.is_status() {
            UpstreamErrorKind::Rejected
        } else if err.is_decode() {
            UpstreamErrorKind::InvalidResponse
        } else {
            UpstreamErrorKind::Unavailable
        };

        Self::new(service, kind, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_message_hides_detail() {
        let err = UpstreamError::new(
            "dealers",
            UpstreamErrorKind::Unavailable,
            "connect ECONNREFUSED 10.0.0.7:3030",
        );

        assert_eq!(err.kind.public_message(), "service unavailable");
        assert!(!err.kind.to_string().contains("10.0.0.7"));
        assert!(err.to_string().contains("10.0.0.7"));
    }
}
