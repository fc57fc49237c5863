//! Domain errors for the catalog aggregation layer.

use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::models::ResourceKind;

/// Failures talking to the upstream catalog that are not a plain "absent" answer.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, DNS or TLS failure
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Non-2xx status other than 404
    #[error("Upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Body could not be decoded into the expected record shape
    #[error("Malformed {kind} payload: {reason}")]
    Malformed { kind: ResourceKind, reason: String },
}

impl UpstreamError {
    /// Returns true if the request may succeed when attempted again.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout => true,
            Self::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Malformed { .. } => false,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Errors surfaced by every public operation of the aggregation layer.
///
/// Callers rely on the three kinds being distinct: an absent entity is an
/// expected user-facing outcome, an upstream failure means "could not
/// determine", and a contract violation is a bug in the calling code.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: ResourceKind, key: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

impl CatalogError {
    pub fn not_found(kind: ResourceKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn malformed(kind: ResourceKind, reason: impl Into<String>) -> Self {
        Self::Upstream(UpstreamError::Malformed {
            kind,
            reason: reason.into(),
        })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Upstream(UpstreamError::Malformed { .. }))
    }

    /// Returns true if this error is transient and the request should be retried
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Upstream(err) => err.is_transient(),
            Self::NotFound { .. } | Self::ContractViolation(_) => false,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(CatalogError::from(UpstreamError::Timeout).is_transient());
        assert!(CatalogError::from(UpstreamError::Network("reset".to_string())).is_transient());
        assert!(CatalogError::from(UpstreamError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        })
        .is_transient());
        assert!(CatalogError::from(UpstreamError::Status {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: String::new(),
        })
        .is_transient());
    }

    #[test]
    fn test_permanent_errors() {
        assert!(!CatalogError::not_found(ResourceKind::Pokemon, "missingno").is_transient());
        assert!(!CatalogError::malformed(ResourceKind::Berry, "missing field `item`").is_transient());
        assert!(!CatalogError::ContractViolation("empty batch".to_string()).is_transient());
        assert!(!CatalogError::from(UpstreamError::Status {
            status: StatusCode::BAD_REQUEST,
            body: String::new(),
        })
        .is_transient());
    }

    #[test]
    fn test_error_kinds_are_exclusive() {
        let not_found = CatalogError::not_found(ResourceKind::Item, "cheri-berry");
        assert!(not_found.is_not_found());
        assert!(!not_found.is_malformed());

        let malformed = CatalogError::malformed(ResourceKind::Pokemon, "missing field `types`");
        assert!(malformed.is_malformed());
        assert!(!malformed.is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = CatalogError::not_found(ResourceKind::Pokemon, "missingno");
        assert_eq!(err.to_string(), "pokemon not found: missingno");

        let err = CatalogError::malformed(ResourceKind::Berry, "missing field `item`");
        assert_eq!(err.to_string(), "Malformed berry payload: missing field `item`");
    }
}
