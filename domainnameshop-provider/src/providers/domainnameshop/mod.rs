//! Domainname.shop (Domeneshop) Provider
//!
//! The API has no "get record by host" endpoint, so every identity lookup is
//! answered from a per-zone snapshot of the full record list, refreshed on
//! a miss.

mod cache;
pub mod codec;
mod error;
mod http;
mod provider;
mod types;
mod zones;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::error::Result;
use crate::http_client::{HttpTransport, Transport};
use crate::providers::common::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
use crate::types::Credentials;

use cache::RecordCache;

pub use types::{DsRecord, DsService, DsZone};

pub(crate) const PROVIDER_NAME: &str = "domainnameshop";
/// API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.domeneshop.no/v0";
/// TTL used when a record carries none.
///
/// Domeneshop itself defaults to one hour, which is too long for ACME
/// challenges. The API requires a multiple of 60 seconds.
pub const DEFAULT_TTL: Duration = Duration::from_secs(120);

/// Domainname.shop DNS Provider
pub struct DomainnameshopProvider {
    pub(crate) transport: Arc<dyn Transport>,
    /// Resolved zones, keyed by the zone string as the caller passed it
    pub(crate) zones: Mutex<HashMap<String, DsZone>>,
    pub(crate) records: RecordCache,
    pub(crate) default_ttl: Duration,
}

/// Domainname.shop Provider Builder
pub struct DomainnameshopProviderBuilder {
    credentials: Credentials,
    base_url: String,
    default_ttl: Duration,
    connect_timeout: Duration,
    request_timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
}

impl DomainnameshopProviderBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_ttl: DEFAULT_TTL,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            transport: None,
        }
    }

    /// Override the API base URL (e.g. for a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// TTL applied to records submitted with a zero TTL.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Use a custom transport. Base URL, credentials and timeouts are then ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<DomainnameshopProvider> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(
                PROVIDER_NAME,
                self.base_url,
                self.credentials,
                self.connect_timeout,
                self.request_timeout,
            )?),
        };

        Ok(DomainnameshopProvider::from_parts(
            transport,
            self.default_ttl,
        ))
    }
}

impl DomainnameshopProvider {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    pub fn builder(credentials: Credentials) -> DomainnameshopProviderBuilder {
        DomainnameshopProviderBuilder::new(credentials)
    }

    /// Provider on top of an existing transport, with the default TTL.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self::from_parts(transport, DEFAULT_TTL)
    }

    fn from_parts(transport: Arc<dyn Transport>, default_ttl: Duration) -> Self {
        Self {
            transport,
            zones: Mutex::new(HashMap::new()),
            records: RecordCache::default(),
            default_ttl,
        }
    }
}
