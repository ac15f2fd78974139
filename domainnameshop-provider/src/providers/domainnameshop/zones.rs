//! Zone name → Domeneshop domain resolution

use reqwest::Method;

use crate::error::{ProviderError, Result};
use crate::providers::common::normalize_domain_name;
use crate::traits::{ErrorContext, ProviderErrorMapper};

use super::{DomainnameshopProvider, DsZone};

impl DomainnameshopProvider {
    /// Resolve `zone` to its Domeneshop domain, memoised per zone string.
    ///
    /// The lock is held across the lookup request, so concurrent callers
    /// resolving the same zone issue a single request.
    pub(crate) async fn resolve_zone(&self, zone: &str) -> Result<DsZone> {
        let mut zones = self.zones.lock().await;
        if let Some(cached) = zones.get(zone) {
            return Ok(cached.clone());
        }

        let path = format!(
            "/domains?domain={}",
            urlencoding::encode(normalize_domain_name(zone))
        );
        let context = ErrorContext {
            domain: Some(zone.to_string()),
            ..ErrorContext::default()
        };
        let mut found: Vec<DsZone> = self.request_json(Method::GET, &path, None, context).await?;

        if found.len() != 1 {
            log::warn!(
                "[{}] Zone lookup for '{zone}' returned {} domains",
                self.provider_name(),
                found.len()
            );
            return Err(ProviderError::ZoneResolution {
                provider: self.provider_name().to_string(),
                zone: zone.to_string(),
                count: found.len(),
            });
        }

        let resolved = found.remove(0);
        log::debug!(
            "[{}] Resolved zone '{zone}' to domain id {}",
            self.provider_name(),
            resolved.id
        );
        zones.insert(zone.to_string(), resolved.clone());
        Ok(resolved)
    }

    /// Domain metadata for `zone` (cached after the first lookup).
    pub async fn zone(&self, zone: &str) -> Result<DsZone> {
        self.resolve_zone(zone).await
    }
}
