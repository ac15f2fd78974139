//! Shared test helpers

#![allow(dead_code)]

use std::env;
use std::time::Duration;

use domainnameshop_provider::{
    Credentials, DnsRecord, DomainnameshopProvider, RecordData, RecordDeleter, RecordGetter,
};

pub const ENV_TOKEN: &str = "DOMAINNAMESHOP_TEST_TOKEN";
pub const ENV_SECRET: &str = "DOMAINNAMESHOP_TEST_SECRET";
pub const ENV_ZONE: &str = "DOMAINNAMESHOP_TEST_ZONE";

/// Skip the test when an environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: environment variable {} not set", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique record name for a test run.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// TXT record with a zero TTL (provider default applies).
pub fn txt(name: &str, text: &str) -> DnsRecord {
    DnsRecord::new(
        name,
        Duration::ZERO,
        RecordData::TXT {
            text: text.to_string(),
        },
    )
}

/// Whether `records` holds a TXT record with this name and text.
pub fn has_txt(records: &[DnsRecord], name: &str, text: &str) -> bool {
    records.iter().any(|r| {
        r.name == name && matches!(&r.data, RecordData::TXT { text: t } if t == text)
    })
}

/// Provider and zone for live tests.
pub struct TestContext {
    pub provider: DomainnameshopProvider,
    pub zone: String,
}

impl TestContext {
    /// Build from `DOMAINNAMESHOP_TEST_*`; `None` when anything is missing.
    pub fn from_env() -> Option<Self> {
        let token = env::var(ENV_TOKEN).ok()?;
        let secret = env::var(ENV_SECRET).ok()?;
        let zone = env::var(ENV_ZONE).ok()?;

        let provider = DomainnameshopProvider::new(Credentials::new(token, secret)).ok()?;
        Some(Self { provider, zone })
    }

    /// Delete every record whose name starts with `_test-`.
    pub async fn cleanup_all_test_records(&self) {
        if let Ok(records) = self.provider.get_records(&self.zone).await {
            let leftovers: Vec<DnsRecord> = records
                .into_iter()
                .filter(|r| r.name.starts_with("_test-"))
                .collect();
            let _ = self.provider.delete_records(&self.zone, &leftovers).await;
        }
    }
}
