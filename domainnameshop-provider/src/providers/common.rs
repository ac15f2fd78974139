//! Provider common utility functions

use std::time::Duration;

use reqwest::Client;

// ============ HTTP Client ============

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create an HTTP client with the given timeouts
pub fn create_http_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> reqwest::Result<Client> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}

// ============ Domain name handling ============

/// Remove the trailing dot of a domain name
pub fn normalize_domain_name(name: &str) -> &str {
    name.trim_end_matches('.')
}
