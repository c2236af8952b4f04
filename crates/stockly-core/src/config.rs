// ── Runtime connection configuration ──
//
// Describes *where* the inventory API lives and how to talk to it.
// The CLI/TUI build an `InventoryConfig` and hand it in; core never
// reads config files.

use std::time::Duration;

use url::Url;

/// Default API root when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1/";

/// Default page size for the products list.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Configuration for a single inventory API endpoint.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// API root, e.g. `http://localhost:8080/api/v1/`.
    pub api_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// Accept self-signed certificates.
    pub accept_invalid_certs: bool,
    /// Rows per page for paginated lists.
    pub page_size: u32,
}

impl InventoryConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            ..Self::default()
        }
    }

    pub(crate) fn transport(&self) -> stockly_api::TransportConfig {
        stockly_api::TransportConfig {
            timeout: self.timeout,
            accept_invalid_certs: self.accept_invalid_certs,
            ..stockly_api::TransportConfig::default()
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!()),
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
