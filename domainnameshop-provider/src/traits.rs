use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::DnsRecord;

/// Raw API error (internal).
///
/// Everything the transport returned for a failed request, before it is
/// classified into a [`ProviderError`].
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code from the JSON error body, if any.
    pub code: Option<String>,
    /// Human-readable message (the `help` field, or the raw body).
    pub message: String,
    /// Value of the `Retry-After` header, in seconds.
    pub retry_after: Option<u64>,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
            retry_after: None,
        }
    }

    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Some(code.into()),
            message: message.into(),
            retry_after: None,
        }
    }
}

/// Error context (internal).
/// Extra information used when mapping an error.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record name (for `RecordExists`).
    pub record_name: Option<String>,
    /// Record ID (for `RecordNotFound`).
    pub record_id: Option<String>,
    /// Domain name or id (for `DomainNotFound`).
    pub domain: Option<String>,
}

/// Provider error mapping trait (internal).
/// Maps a raw API failure onto the unified error type.
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier used in every error.
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error onto [`ProviderError`].
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: request body could not be encoded.
    fn serialization_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: status the mapper has no category for.
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code.or_else(|| Some(raw.status.to_string())),
            raw_message: raw.message,
        }
    }
}

/// Lists every record of a zone.
#[async_trait]
pub trait RecordGetter: Send + Sync {
    /// Fetch all records of `zone`.
    ///
    /// `zone` may be given with or without a trailing dot.
    async fn get_records(&self, zone: &str) -> Result<Vec<DnsRecord>>;
}

/// Creates records.
#[async_trait]
pub trait RecordAppender: Send + Sync {
    /// Create each record in `zone`, returning them with provider ids assigned.
    ///
    /// Not idempotent: appending the same record twice creates two records.
    /// Stops at the first failure; records created before it are kept.
    async fn append_records(&self, zone: &str, records: &[DnsRecord]) -> Result<Vec<DnsRecord>>;
}

/// Creates or updates records.
#[async_trait]
pub trait RecordSetter: Send + Sync {
    /// Update records that carry an id, create those that don't.
    ///
    /// Returns the records as the provider now holds them, in input order.
    /// Stops at the first failure.
    async fn set_records(&self, zone: &str, records: &[DnsRecord]) -> Result<Vec<DnsRecord>>;
}

/// Deletes records.
#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// Delete each record from `zone`, matched by id or by host and data.
    ///
    /// Records that do not exist are skipped. Returns the input records.
    /// Stops at the first failure.
    async fn delete_records(&self, zone: &str, records: &[DnsRecord]) -> Result<Vec<DnsRecord>>;
}
