use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Domainname.shop provider operations.
///
/// Each variant names the provider that produced it plus variant-specific
/// context. All variants are serializable for structured error reporting.
///
/// Nothing is retried: every variant is returned to the caller as soon as
/// it happens, and batch operations stop at the first failing record
/// (see [`BatchAborted`](Self::BatchAborted)).
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    #[error("[{provider}] Network error: {detail}")]
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("[{provider}] Request timeout: {detail}")]
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API token/secret pair was rejected (HTTP 401).
    #[error("[{provider}] Invalid credentials{}", suffix(.raw_message))]
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// The credentials are valid but not allowed to touch this resource (HTTP 403).
    #[error("[{provider}] Permission denied{}", suffix(.raw_message))]
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// The specified DNS record was not found (HTTP 404 on a record endpoint).
    #[error("[{provider}] Record '{record_id}' not found")]
    RecordNotFound {
        /// Provider that produced the error.
        provider: String,
        /// ID of the record that was not found.
        record_id: String,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// The specified domain was not found (HTTP 404 on a domain endpoint).
    #[error("[{provider}] Domain '{domain}' not found{}", suffix(.raw_message))]
    DomainNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Domain name or id that was not found.
        domain: String,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// A conflicting DNS record already exists (HTTP 409).
    #[error("[{provider}] Record '{record_name}' already exists")]
    RecordExists {
        /// Provider that produced the error.
        provider: String,
        /// Name of the conflicting record.
        record_name: String,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// The request was rejected as invalid (HTTP 400), e.g. a TTL that is
    /// not a multiple of 60.
    #[error("[{provider}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter, or `"request"` when unknown.
        param: String,
        /// Raw response body.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    #[error("[{provider}] Rate limited{}", retry_suffix(.retry_after))]
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if the API sent `Retry-After`.
        retry_after: Option<u64>,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// Any other HTTP status >= 400.
    #[error("[{provider}] HTTP {status}: {body}")]
    Http {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Looking up a zone by name returned zero or several domains.
    #[error("[{provider}] Expected 1 zone, got {count} for {zone}")]
    ZoneResolution {
        /// Provider that produced the error.
        provider: String,
        /// Zone name as passed by the caller.
        zone: String,
        /// Number of domains the API returned.
        count: usize,
    },

    /// A string-encoded numeric record field could not be parsed.
    #[error("[{provider}] Invalid {field} '{value}': {detail}")]
    InvalidField {
        /// Provider that produced the error.
        provider: String,
        /// Field name (`priority`, `weight` or `port`).
        field: String,
        /// The raw value as received.
        value: String,
        /// Parser message.
        detail: String,
    },

    /// An SRV host that is not of the form `_service._proto[.name]`.
    #[error(
        "[{provider}] Malformed SRV name '{name}': expected format '_service._proto'"
    )]
    MalformedSrvName {
        /// Provider that produced the error.
        provider: String,
        /// The offending host.
        name: String,
    },

    /// Failed to parse the provider's API response.
    #[error("[{provider}] Parse error: {detail}")]
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    #[error("[{provider}] Serialization error: {detail}")]
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// A batch operation stopped at the record at `index`.
    ///
    /// Records before `index` were already applied remotely and are not
    /// rolled back.
    #[error("record #{index} ('{record_name}') failed: {source}")]
    BatchAborted {
        /// Position of the failing record in the input slice.
        index: usize,
        /// Name of the failing record as given by the caller.
        record_name: String,
        /// The underlying failure.
        source: Box<ProviderError>,
    },

    /// An unrecognized error.
    #[error("[{provider}] {raw_message}")]
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code, if available.
        raw_code: Option<String>,
        /// Raw error message.
        raw_message: String,
    },
}

fn suffix(raw_message: &Option<String>) -> String {
    raw_message
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

fn retry_suffix(retry_after: &Option<u64>) -> String {
    retry_after
        .map(|secs| format!(" (retry after {secs}s)"))
        .unwrap_or_default()
}

impl ProviderError {
    /// Whether the error is caused by input or remote state rather than a fault,
    /// used to pick the log level.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidCredentials { .. }
            | Self::PermissionDenied { .. }
            | Self::RecordNotFound { .. }
            | Self::DomainNotFound { .. }
            | Self::RecordExists { .. }
            | Self::InvalidParameter { .. }
            | Self::ZoneResolution { .. }
            | Self::MalformedSrvName { .. }
            | Self::InvalidField { .. } => true,
            Self::BatchAborted { source, .. } => source.is_expected(),
            _ => false,
        }
    }

    /// HTTP status code behind this error, when it came from an HTTP response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidCredentials { .. } => Some(401),
            Self::PermissionDenied { .. } => Some(403),
            Self::RecordNotFound { .. } | Self::DomainNotFound { .. } => Some(404),
            Self::RecordExists { .. } => Some(409),
            Self::InvalidParameter { .. } => Some(400),
            Self::RateLimited { .. } => Some(429),
            Self::Http { status, .. } => Some(*status),
            Self::BatchAborted { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
