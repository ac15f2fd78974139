//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

pub(crate) mod domainnameshop;

pub use domainnameshop::{
    DEFAULT_BASE_URL, DEFAULT_TTL, DomainnameshopProvider, DomainnameshopProviderBuilder,
    DsRecord, DsService, DsZone, codec,
};
