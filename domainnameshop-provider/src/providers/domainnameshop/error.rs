//! Domainname.shop error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{DomainnameshopProvider, PROVIDER_NAME};

/// Domainname.shop error mapping
///
/// The API signals failures through the HTTP status; the JSON body
/// (`{"code": ..., "help": ...}`) only refines the message.
/// Reference: <https://api.domeneshop.no/docs/#section/Overview/Error-handling>
impl ProviderErrorMapper for DomainnameshopProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.status {
            401 => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },
            403 => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },
            // Record endpoints answer 404 for an unknown record id, domain
            // endpoints for an unknown domain id
            404 => match context.record_id {
                Some(record_id) => ProviderError::RecordNotFound {
                    provider,
                    record_id,
                    raw_message: Some(raw.message),
                },
                None => ProviderError::DomainNotFound {
                    provider,
                    domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                    raw_message: Some(raw.message),
                },
            },
            409 => ProviderError::RecordExists {
                provider,
                record_name: context
                    .record_name
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },
            400 => ProviderError::InvalidParameter {
                provider,
                param: param_from_code(raw.code.as_deref()).to_string(),
                detail: raw.message,
            },
            429 => ProviderError::RateLimited {
                provider,
                retry_after: raw.retry_after,
                raw_message: Some(raw.message),
            },
            status if status >= 400 => ProviderError::Http {
                provider,
                status,
                body: raw.message,
            },
            // 1xx / 3xx: nothing the API documents
            _ => self.unknown_error(raw),
        }
    }
}

/// Best-effort parameter name from an error code like `dns:invalidTTL`.
fn param_from_code(code: Option<&str>) -> &'static str {
    let Some(code) = code.map(str::to_ascii_lowercase) else {
        return "request";
    };
    if code.contains("ttl") {
        "ttl"
    } else if code.contains("host") {
        "host"
    } else if code.contains("data") {
        "data"
    } else if code.contains("type") {
        "type"
    } else if code.contains("priority") || code.contains("weight") || code.contains("port") {
        "srv"
    } else {
        "request"
    }
}
