//! End-to-end tests against a mock Domeneshop API

mod common;

use common::txt;
use domainnameshop_provider::{
    Credentials, DomainnameshopProvider, ProviderError, RecordAppender, RecordData,
    RecordDeleter, RecordGetter,
};
use httpmock::prelude::*;
use serde_json::json;

fn provider_for(server: &MockServer) -> Option<DomainnameshopProvider> {
    DomainnameshopProvider::builder(Credentials::new("token", "secret"))
        .base_url(server.base_url())
        .build()
        .ok()
}

async fn mock_zone(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/domains")
                .query_param("domain", "example.com");
            then.status(200).json_body(json!([{
                "domain": "example.com",
                "id": 42,
                "expiry_date": "2030-01-01",
                "registered_date": "2020-01-01",
                "nameservers": ["ns1.hyp.net", "ns2.hyp.net"],
                "registrant": "Test",
                "renew": true,
                "services": {"dns": true, "email": true, "registrar": true, "webhotel": "none"},
                "status": "active"
            }]));
        })
        .await
}

#[tokio::test]
async fn list_decodes_every_kind() {
    let server = MockServer::start_async().await;
    let zone = mock_zone(&server).await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/domains/42/dns");
            then.status(200).json_body(json!([
                {"id": 1, "host": "@", "ttl": 3600, "type": "A", "data": "192.0.2.1"},
                {"id": 2, "host": "@", "ttl": 3600, "type": "MX", "data": "mx.example.com", "priority": "10"},
                {"id": 3, "host": "_sip._tcp", "ttl": 3600, "type": "SRV", "data": "sip.example.com",
                 "priority": "10", "weight": "5", "port": "5060"},
                {"id": 4, "host": "@", "ttl": 3600, "type": "CAA", "data": "0 issue \"letsencrypt.org\""}
            ]));
        })
        .await;

    let provider = require_some!(provider_for(&server));
    let records = require_ok!(provider.get_records("example.com.").await);

    zone.assert_async().await;
    list.assert_async().await;
    assert_eq!(records.len(), 4);
    assert!(matches!(
        &records[1].data,
        RecordData::MX { preference: 10, exchange } if exchange == "mx.example.com"
    ));
    assert!(matches!(
        &records[2].data,
        RecordData::SRV { service, transport, port: 5060, .. } if service == "sip" && transport == "tcp"
    ));
    assert_eq!(records[2].name, "@");
    assert!(matches!(&records[3].data, RecordData::Raw { record_type, .. } if record_type == "CAA"));
}

#[tokio::test]
async fn append_sends_normalized_body_with_default_ttl() {
    let server = MockServer::start_async().await;
    mock_zone(&server).await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/domains/42/dns")
                .header("content-type", "application/json")
                .json_body(json!({
                    "host": "_acme-challenge",
                    "data": "token-value",
                    "type": "TXT",
                    "ttl": 120
                }));
            then.status(201).json_body(json!({"id": 9001}));
        })
        .await;

    let provider = require_some!(provider_for(&server));
    let created = require_ok!(
        provider
            .append_records(
                "example.com",
                &[txt("_acme-challenge.example.com.", "token-value")]
            )
            .await
    );

    create.assert_async().await;
    assert_eq!(created[0].id, Some(9001));
    assert_eq!(created[0].name, "_acme-challenge");
}

#[tokio::test]
async fn delete_resolves_id_from_listing() {
    let server = MockServer::start_async().await;
    mock_zone(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domains/42/dns");
            then.status(200).json_body(json!([
                {"id": 77, "host": "_acme-challenge", "ttl": 120, "type": "TXT", "data": "token-value"}
            ]));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/domains/42/dns/77");
            then.status(204);
        })
        .await;

    let provider = require_some!(provider_for(&server));
    let res = provider
        .delete_records("example.com.", &[txt("_acme-challenge", "token-value")])
        .await;

    assert!(res.is_ok(), "delete failed: {res:?}");
    delete.assert_async().await;
}

#[tokio::test]
async fn rejected_credentials_surface_as_invalid_credentials() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domains");
            then.status(401).body("Unauthorized");
        })
        .await;

    let provider = require_some!(provider_for(&server));
    let res = provider.get_records("example.com").await;

    assert!(
        matches!(&res, Err(ProviderError::InvalidCredentials { raw_message: Some(m), .. }) if m == "Unauthorized"),
        "unexpected result: {res:?}"
    );
}

#[tokio::test]
async fn ambiguous_zone_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domains");
            then.status(200).json_body(json!([
                {"domain": "example.com", "id": 1},
                {"domain": "example.com", "id": 2}
            ]));
        })
        .await;

    let provider = require_some!(provider_for(&server));
    let res = provider.append_records("example.com", &[txt("a", "b")]).await;

    assert!(
        matches!(
            &res,
            Err(ProviderError::BatchAborted { index: 0, source, .. })
                if matches!(source.as_ref(), ProviderError::ZoneResolution { count: 2, .. })
        ),
        "unexpected result: {res:?}"
    );
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let server = MockServer::start_async().await;
    mock_zone(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domains/42/dns");
            then.status(500).body("database unavailable");
        })
        .await;

    let provider = require_some!(provider_for(&server));
    let res = provider.get_records("example.com").await;

    assert!(
        matches!(&res, Err(e) if e.status() == Some(500) && e.to_string().contains("database unavailable")),
        "unexpected result: {res:?}"
    );
}
