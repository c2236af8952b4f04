// ── Core error types ──
//
// User-facing errors from stockly-core. Consumers never match on HTTP
// status codes or JSON parse failures directly; the
// `From<stockly_api::Error>` impl folds transport-layer errors into
// domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
///
/// `Clone` so a failed query can be handed to every observer.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach inventory API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Inventory API timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {entity_type} {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Rejected by server: {message}")]
    Rejected { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// Business-rule rejections: 4xx responses and `success: false` envelopes.
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::Rejected { .. } => true,
            Self::Api {
                status: Some(status),
                ..
            } => (400..500).contains(status),
            _ => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<stockly_api::Error> for CoreError {
    fn from(err: stockly_api::Error) -> Self {
        match err {
            stockly_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            stockly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            stockly_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            stockly_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            stockly_api::Error::Api {
                status: 404,
                message,
                ..
            } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: message,
            },
            stockly_api::Error::Api {
                message,
                code,
                status,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            stockly_api::Error::Rejected { message } => CoreError::Rejected { message },
            stockly_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_domain_variant() {
        let err = CoreError::from(stockly_api::Error::Api {
            message: "Product not found".into(),
            code: None,
            status: 404,
        });
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn client_errors_count_as_rejections() {
        let err = CoreError::from(stockly_api::Error::Api {
            message: "SKU already exists".into(),
            code: Some("duplicate_sku".into()),
            status: 409,
        });
        assert!(err.is_rejection());

        let server = CoreError::from(stockly_api::Error::Api {
            message: "boom".into(),
            code: None,
            status: 500,
        });
        assert!(!server.is_rejection());
    }
}
