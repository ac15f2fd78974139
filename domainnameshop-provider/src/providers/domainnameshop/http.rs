//! Domainname.shop HTTP request methods

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{ApiResponse, HttpUtils};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::types::{DsApiError, DsCreatedRecord};
use super::{DomainnameshopProvider, DsRecord};

impl DomainnameshopProvider {
    /// Execute a request; any non-2xx status becomes a mapped [`ProviderError`].
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        context: ErrorContext,
    ) -> Result<String> {
        let response = self.transport.execute(method, path, body).await?;
        if response.is_success() {
            return Ok(response.body);
        }
        Err(self.response_error(response, context))
    }

    /// Execute a request and decode the JSON body.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        context: ErrorContext,
    ) -> Result<T> {
        let text = self.request(method, path, body, context).await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    fn response_error(&self, response: ApiResponse, context: ErrorContext) -> ProviderError {
        let api_error = serde_json::from_str::<DsApiError>(&response.body).ok();
        let help = api_error.as_ref().and_then(|e| e.help.clone());
        let code = api_error.and_then(|e| e.code);

        let mut raw = match code {
            Some(code) => RawApiError::with_code(response.status, code, response.body),
            None => RawApiError::new(response.status, response.body),
        };
        raw.retry_after = response.retry_after;
        let detail = help.unwrap_or_else(|| truncate_for_log(&raw.message));
        let status = raw.status;
        let err = self.map_error(raw, context);

        if err.is_expected() {
            log::warn!("[{}] API error (HTTP {status}): {detail}", self.provider_name());
        } else {
            log::error!("[{}] API error (HTTP {status}): {detail}", self.provider_name());
        }
        err
    }

    fn encode(&self, record: &DsRecord) -> Result<String> {
        serde_json::to_string(record).map_err(|e| self.serialization_error(e))
    }

    /// `GET /domains/{id}/dns`
    pub(crate) async fn list_remote(&self, domain_id: u64, zone: &str) -> Result<Vec<DsRecord>> {
        let context = ErrorContext {
            domain: Some(zone.to_string()),
            ..ErrorContext::default()
        };
        self.request_json(
            Method::GET,
            &format!("/domains/{domain_id}/dns"),
            None,
            context,
        )
        .await
    }

    /// `POST /domains/{id}/dns`, returning the id the API assigned.
    pub(crate) async fn create_remote(&self, domain_id: u64, record: &DsRecord) -> Result<u64> {
        let context = ErrorContext {
            record_name: Some(record.host.clone()),
            domain: Some(domain_id.to_string()),
            ..ErrorContext::default()
        };
        let created: DsCreatedRecord = self
            .request_json(
                Method::POST,
                &format!("/domains/{domain_id}/dns"),
                Some(self.encode(record)?),
                context,
            )
            .await?;
        Ok(created.id)
    }

    /// `POST /domains/{id}/dns/{record_id}`. The response carries no record.
    pub(crate) async fn update_remote(&self, domain_id: u64, record: &DsRecord) -> Result<()> {
        self.request(
            Method::POST,
            &format!("/domains/{domain_id}/dns/{}", record.id),
            Some(self.encode(record)?),
            record_context(domain_id, record),
        )
        .await
        .map(drop)
    }

    /// `DELETE /domains/{id}/dns/{record_id}`
    pub(crate) async fn delete_remote(&self, domain_id: u64, record: &DsRecord) -> Result<()> {
        self.request(
            Method::DELETE,
            &format!("/domains/{domain_id}/dns/{}", record.id),
            None,
            record_context(domain_id, record),
        )
        .await
        .map(drop)
    }
}

fn record_context(domain_id: u64, record: &DsRecord) -> ErrorContext {
    ErrorContext {
        record_name: Some(record.host.clone()),
        record_id: Some(record.id.to_string()),
        domain: Some(domain_id.to_string()),
    }
}
