//! In-memory Domeneshop API for unit tests
//!
//! Implements [`Transport`] by routing requests against a small in-memory
//! model of domains and their records, and records every call so tests can
//! assert round-trip counts.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::Method;

use crate::error::Result;
use crate::http_client::{ApiResponse, Transport};
use crate::providers::domainnameshop::{DsRecord, DsService, DsZone};

#[derive(Default)]
struct State {
    zones: Vec<DsZone>,
    records: HashMap<u64, Vec<DsRecord>>,
    next_id: u64,
    calls: Vec<String>,
    fail_next: VecDeque<(u16, String)>,
    fail_matching: Vec<(String, u16, String)>,
}

/// Fake API handle; clones share state.
#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    state: Arc<Mutex<State>>,
}

impl FakeApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.lock().next_id = 1000;
        api
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_zone(self, domain: &str, id: u64) -> Self {
        {
            let mut state = self.lock();
            state.zones.push(DsZone {
                domain: domain.to_string(),
                id,
                expiry_date: None,
                registered_date: None,
                nameservers: vec!["ns1.hyp.net".to_string(), "ns2.hyp.net".to_string()],
                registrant: "Test Registrant".to_string(),
                renew: true,
                services: DsService {
                    dns: true,
                    email: false,
                    registrar: true,
                    webhotel: "none".to_string(),
                },
                status: "active".to_string(),
            });
            state.records.entry(id).or_default();
        }
        self
    }

    /// Seed a record; its id is kept as given.
    pub fn with_record(self, domain_id: u64, record: DsRecord) -> Self {
        self.lock()
            .records
            .entry(domain_id)
            .or_default()
            .push(record);
        self
    }

    pub fn into_transport(self) -> Arc<dyn Transport> {
        Arc::new(self)
    }

    /// The next request fails with `status` and `body`.
    pub fn fail_next(&self, status: u16, body: &str) {
        self.lock().fail_next.push_back((status, body.to_string()));
    }

    /// Every request whose path or body contains `needle` fails.
    pub fn fail_matching(&self, needle: &str, status: u16, body: &str) {
        self.lock()
            .fail_matching
            .push((needle.to_string(), status, body.to_string()));
    }

    /// Calls made so far, as `"METHOD /path"`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Number of calls with `method` whose path starts with `path_prefix`.
    pub fn count_calls(&self, method: &str, path_prefix: &str) -> usize {
        let prefix = format!("{method} {path_prefix}");
        self.lock()
            .calls
            .iter()
            .filter(|c| c.starts_with(&prefix))
            .count()
    }

    /// Current remote records of a domain.
    pub fn records(&self, domain_id: u64) -> Vec<DsRecord> {
        self.lock()
            .records
            .get(&domain_id)
            .cloned()
            .unwrap_or_default()
    }

    fn route(state: &mut State, method: &Method, path: &str, body: Option<&str>) -> ApiResponse {
        if let Some(query) = path.strip_prefix("/domains?domain=") {
            let wanted = urlencoding::decode(query).map(|d| d.into_owned()).unwrap_or_default();
            let found: Vec<&DsZone> = state.zones.iter().filter(|z| z.domain == wanted).collect();
            return json(200, &found);
        }

        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        let domain_id = segments.get(1).and_then(|s| s.parse::<u64>().ok());
        let record_id = segments.get(3).and_then(|s| s.parse::<u64>().ok());
        let Some(domain_id) = domain_id.filter(|id| state.records.contains_key(id)) else {
            return ApiResponse::new(404, r#"{"code":"domain:notFound","help":"Domain not found"}"#);
        };

        match (method.as_str(), segments.len(), record_id) {
            ("GET", 3, None) => json(200, &state.records[&domain_id]),
            ("POST", 3, None) => {
                let Some(mut record) = body.and_then(|b| serde_json::from_str::<DsRecord>(b).ok())
                else {
                    return ApiResponse::new(400, r#"{"code":"request:invalid","help":"Bad body"}"#);
                };
                state.next_id += 1;
                record.id = state.next_id;
                let id = record.id;
                state.records.entry(domain_id).or_default().push(record);
                json(201, &serde_json::json!({ "id": id }))
            }
            ("POST", 4, Some(rid)) => {
                let Some(update) = body.and_then(|b| serde_json::from_str::<DsRecord>(b).ok())
                else {
                    return ApiResponse::new(400, r#"{"code":"request:invalid","help":"Bad body"}"#);
                };
                let records = state.records.entry(domain_id).or_default();
                match records.iter_mut().find(|r| r.id == rid) {
                    Some(existing) => {
                        *existing = DsRecord { id: rid, ..update };
                        ApiResponse::new(204, "")
                    }
                    None => record_not_found(),
                }
            }
            ("DELETE", 4, Some(rid)) => {
                let records = state.records.entry(domain_id).or_default();
                let before = records.len();
                records.retain(|r| r.id != rid);
                if records.len() == before {
                    record_not_found()
                } else {
                    ApiResponse::new(204, "")
                }
            }
            _ => ApiResponse::new(404, "Not Found"),
        }
    }
}

fn json<T: serde::Serialize + ?Sized>(status: u16, value: &T) -> ApiResponse {
    ApiResponse::new(status, serde_json::to_string(value).unwrap_or_default())
}

fn record_not_found() -> ApiResponse {
    ApiResponse::new(404, r#"{"code":"record:notFound","help":"Record not found"}"#)
}

#[async_trait]
impl Transport for FakeApi {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<ApiResponse> {
        let mut state = self.lock();
        state.calls.push(format!("{method} {path}"));

        if let Some((status, body)) = state.fail_next.pop_front() {
            return Ok(ApiResponse::new(status, body));
        }
        let haystack = format!("{path} {}", body.as_deref().unwrap_or_default());
        if let Some((_, status, fail_body)) = state
            .fail_matching
            .iter()
            .find(|(needle, _, _)| haystack.contains(needle.as_str()))
        {
            return Ok(ApiResponse::new(*status, fail_body.clone()));
        }

        Ok(Self::route(&mut state, &method, path, body.as_deref()))
    }
}
