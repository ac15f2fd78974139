//! Domainname.shop API type definition
//!
//! Reference: <https://api.domeneshop.no/docs/>

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// ============ Domain ============

/// Domain (zone) as returned by `GET /domains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsZone {
    /// Domain name, without trailing dot.
    pub domain: String,
    /// Numeric id used in every DNS endpoint.
    pub id: u64,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub registered_date: Option<NaiveDate>,
    #[serde(default)]
    pub nameservers: Vec<String>,
    #[serde(default)]
    pub registrant: String,
    /// Whether the domain renews automatically.
    #[serde(default)]
    pub renew: bool,
    #[serde(default)]
    pub services: DsService,
    /// Registration status (`active`, `expired`, ...).
    #[serde(default)]
    pub status: String,
}

/// Services enabled on a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsService {
    /// Domeneshop hosts the DNS for this domain.
    #[serde(default)]
    pub dns: bool,
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub registrar: bool,
    /// Web hosting plan, `"none"` when absent.
    #[serde(default)]
    pub webhotel: String,
}

// ============ DNS Record ============

/// DNS record as the API represents it.
///
/// Every field is omitted from JSON when empty or zero. An `id` of 0 means
/// the record does not exist remotely (not created yet, or deleted).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsRecord {
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub id: u64,
    /// Host relative to the zone, `@` for the apex.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data: String,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub record_type: String,
    /// Seconds; the API only accepts multiples of 60.
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub ttl: u32,
    /// MX preference or SRV priority, string-encoded.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub priority: Option<String>,
    /// SRV weight, string-encoded.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub weight: Option<String>,
    /// SRV port, string-encoded.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub port: Option<String>,
}

/// Body of a successful `POST /domains/{id}/dns`.
#[derive(Debug, Deserialize)]
pub struct DsCreatedRecord {
    pub id: u64,
}

/// JSON error body (`{"code": "...", "help": "..."}`).
#[derive(Debug, Deserialize)]
pub struct DsApiError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

/// Numeric fields are documented as strings but older responses send numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.and_then(|v| match v {
            StringOrNumber::String(s) if s.is_empty() => None,
            StringOrNumber::String(s) => Some(s),
            StringOrNumber::Number(n) => Some(n.to_string()),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_omitted() {
        let record = DsRecord {
            host: "www".to_string(),
            data: "192.0.2.1".to_string(),
            record_type: "A".to_string(),
            ..DsRecord::default()
        };
        let json = serde_json::to_string(&record).unwrap_or_default();
        assert_eq!(json, r#"{"host":"www","data":"192.0.2.1","type":"A"}"#);
    }

    #[test]
    fn srv_fields_accept_strings_and_numbers() {
        let json = r#"{"id":3,"host":"_sip._tcp","data":"sip.example.com","type":"SRV","ttl":3600,"priority":"10","weight":5,"port":"5060"}"#;
        let res: Result<DsRecord, _> = serde_json::from_str(json);
        assert!(res.is_ok(), "unexpected parse result: {res:?}");
        let Ok(record) = res else {
            return;
        };
        assert_eq!(record.priority.as_deref(), Some("10"));
        assert_eq!(record.weight.as_deref(), Some("5"));
        assert_eq!(record.port.as_deref(), Some("5060"));
        assert_eq!(record.ttl, 3600);
    }

    #[test]
    fn zone_parses_full_payload() {
        let json = r#"{
            "domain": "example.com",
            "expiry_date": "2027-03-01",
            "id": 1337,
            "nameservers": ["ns1.hyp.net", "ns2.hyp.net", "ns3.hyp.net"],
            "registered_date": "2015-03-01",
            "registrant": "Ola Nordmann",
            "renew": true,
            "services": {"dns": true, "email": false, "registrar": true, "webhotel": "none"},
            "status": "active"
        }"#;
        let res: Result<DsZone, _> = serde_json::from_str(json);
        assert!(res.is_ok(), "unexpected parse result: {res:?}");
        let Ok(zone) = res else {
            return;
        };
        assert_eq!(zone.id, 1337);
        assert_eq!(zone.expiry_date, NaiveDate::from_ymd_opt(2027, 3, 1));
        assert_eq!(zone.nameservers.len(), 3);
        assert!(zone.services.dns);
        assert_eq!(zone.services.webhotel, "none");
    }

    #[test]
    fn zone_parses_minimal_payload() {
        let res: Result<DsZone, _> = serde_json::from_str(r#"{"domain":"example.com","id":1}"#);
        assert!(
            matches!(&res, Ok(z) if z.id == 1 && z.expiry_date.is_none()),
            "unexpected parse result: {res:?}"
        );
    }
}
