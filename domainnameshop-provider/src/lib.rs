//! # domainnameshop-provider
//!
//! DNS record management for [Domainname.shop](https://domene.shop/)
//! (Domeneshop), mapping a provider-independent record model onto the
//! [Domeneshop API](https://api.domeneshop.no/docs/).
//!
//! The API can only list a whole zone, create, update or delete by numeric
//! id. This crate resolves record identity for you: records without an id
//! are matched by host and data against a cached snapshot of the zone,
//! refreshed on a miss.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use domainnameshop_provider::{
//!     Credentials, DnsRecord, DomainnameshopProvider, RecordAppender, RecordData,
//!     RecordDeleter, RecordGetter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Credentials from DOMAINNAMESHOP_API_TOKEN / DOMAINNAMESHOP_API_SECRET
//!     let provider = DomainnameshopProvider::new(Credentials::from_env()?)?;
//!
//!     // 2. Create a record (TTL 0 = provider default of 120s)
//!     let challenge = DnsRecord::new(
//!         "_acme-challenge",
//!         Duration::ZERO,
//!         RecordData::TXT { text: "token".to_string() },
//!     );
//!     let created = provider.append_records("example.com.", &[challenge]).await?;
//!
//!     // 3. List the zone
//!     for record in provider.get_records("example.com.").await? {
//!         println!(
//!             "{} {} -> {}",
//!             record.name,
//!             record.data.record_type(),
//!             record.data.display_value()
//!         );
//!     }
//!
//!     // 4. Clean up
//!     provider.delete_records("example.com.", &created).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError).
//! Batch operations stop at the first failing record and wrap the cause in
//! [`ProviderError::BatchAborted`], which carries the record's index and
//! name. Records before it have already been applied.
//!
//! - [`ProviderError::InvalidCredentials`] — token/secret rejected
//! - [`ProviderError::ZoneResolution`] — zone name did not match exactly one domain
//! - [`ProviderError::InvalidField`] — an MX/SRV numeric field could not be parsed
//! - [`ProviderError::Http`] — any other HTTP error status, with the raw body
//!
//! Nothing is retried. Use the `*_detailed` methods on
//! [`DomainnameshopProvider`] to attempt every record and collect failures.

mod error;
mod http_client;
mod providers;
#[cfg(test)]
mod test_utils;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export transport
pub use http_client::{ApiResponse, HttpTransport, HttpUtils, Transport};

// Re-export record traits (internal traits are not exported)
pub use traits::{RecordAppender, RecordDeleter, RecordGetter, RecordSetter};

// Re-export types
pub use types::{
    BatchFailure, BatchResult, CredentialValidationError, Credentials, DnsRecord,
    ENV_API_SECRET, ENV_API_TOKEN, RecordData, Rr,
};

// Re-export provider
pub use providers::{
    DEFAULT_BASE_URL, DEFAULT_TTL, DomainnameshopProvider, DomainnameshopProviderBuilder,
    DsRecord, DsService, DsZone, codec,
};

// Re-export utils module
pub use utils::log_sanitizer;

// HTTP method type used by `Transport`
pub use reqwest::Method;
