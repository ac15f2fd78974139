//! Mapping between [`DnsRecord`] and the API's [`DsRecord`]
//!
//! The API flattens MX and SRV into `data` plus string-encoded
//! `priority`/`weight`/`port` fields; the generic model keeps them typed.

use std::time::Duration;

use crate::error::{ProviderError, Result};
use crate::providers::common::normalize_domain_name;
use crate::types::{DnsRecord, RecordData, Rr};
use crate::utils::ttl::to_secs_u32;

use super::{DsRecord, PROVIDER_NAME};

/// Generic record → API record.
///
/// The host is taken verbatim from the flattened view; callers normalize
/// it against the zone with [`normalize_record_name`] before sending.
pub fn to_ds_record(record: &DnsRecord) -> Result<DsRecord> {
    let rr = record.rr();
    let mut ds = DsRecord {
        id: record.id.unwrap_or(0),
        host: rr.name,
        data: rr.data,
        record_type: rr.record_type,
        ttl: to_secs_u32(rr.ttl),
        ..DsRecord::default()
    };

    match &record.data {
        RecordData::MX {
            preference,
            exchange,
        } => {
            ds.priority = Some(preference.to_string());
            ds.data.clone_from(exchange);
        }
        RecordData::SRV {
            priority,
            weight,
            port,
            target,
            ..
        } => {
            ds.priority = Some(priority.to_string());
            ds.weight = Some(weight.to_string());
            ds.port = Some(port.to_string());
            ds.data.clone_from(target);
        }
        _ => {}
    }

    Ok(ds)
}

/// API record → generic record.
///
/// # Errors
/// * [`ProviderError::InvalidField`] - an MX/SRV numeric field is not a `u16`
/// * [`ProviderError::MalformedSrvName`] - an SRV host lacks `_service._proto`
pub fn to_dns_record(ds: &DsRecord) -> Result<DnsRecord> {
    let ttl = Duration::from_secs(u64::from(ds.ttl));

    let mut record = match ds.record_type.as_str() {
        "MX" => DnsRecord::new(
            ds.host.clone(),
            ttl,
            RecordData::MX {
                preference: parse_u16("priority", ds.priority.as_deref())?,
                exchange: ds.data.clone(),
            },
        ),
        "SRV" => {
            let priority = parse_u16("priority", ds.priority.as_deref())?;
            let weight = parse_u16("weight", ds.weight.as_deref())?;
            let port = parse_u16("port", ds.port.as_deref())?;
            let (service, transport, name) = split_srv_host(&ds.host)?;
            DnsRecord::new(
                name,
                ttl,
                RecordData::SRV {
                    service,
                    transport,
                    priority,
                    weight,
                    port,
                    target: ds.data.clone(),
                },
            )
        }
        _ => Rr {
            name: ds.host.clone(),
            record_type: ds.record_type.clone(),
            data: ds.data.clone(),
            ttl,
        }
        .parse(),
    };

    record.id = (ds.id != 0).then_some(ds.id);
    Ok(record)
}

/// Express `name` relative to `zone`.
///
/// Absolute, absolute-with-dot and relative forms all yield the same
/// result; the zone itself becomes `@`. Matching is ASCII case-insensitive
/// and only strips whole labels.
///
/// ```text
/// "123.test.example.com"  + "example.com." -> "123.test"
/// "123.test.example.com." + "example.com"  -> "123.test"
/// "123.test"              + "example.com"  -> "123.test"
/// "example.com."          + "example.com"  -> "@"
/// ```
pub fn normalize_record_name(name: &str, zone: &str) -> String {
    let name = normalize_domain_name(name);
    let zone = normalize_domain_name(zone);

    if zone.is_empty() {
        return if name.is_empty() { "@" } else { name }.to_string();
    }
    if name.eq_ignore_ascii_case(zone) || name.is_empty() {
        return "@".to_string();
    }

    let relative = name
        .len()
        .checked_sub(zone.len())
        .filter(|&cut| {
            cut > 0
                && name.is_char_boundary(cut)
                && name[cut..].eq_ignore_ascii_case(zone)
                && name[..cut].ends_with('.')
        })
        .map_or(name, |cut| &name[..cut]);

    let relative = normalize_domain_name(relative);
    if relative.is_empty() {
        "@".to_string()
    } else {
        relative.to_string()
    }
}

fn parse_u16(field: &str, value: Option<&str>) -> Result<u16> {
    let value = value.unwrap_or_default();
    value
        .parse::<u16>()
        .map_err(|e| ProviderError::InvalidField {
            provider: PROVIDER_NAME.to_string(),
            field: field.to_string(),
            value: value.to_string(),
            detail: e.to_string(),
        })
}

/// `_sip._tcp.example.com` → (`sip`, `tcp`, `example.com`); `_sip._tcp` → name `@`.
fn split_srv_host(host: &str) -> Result<(String, String, String)> {
    let mut parts = host.splitn(3, '.');
    let (Some(service), Some(transport)) = (parts.next(), parts.next()) else {
        return Err(ProviderError::MalformedSrvName {
            provider: PROVIDER_NAME.to_string(),
            name: host.to_string(),
        });
    };
    let name = parts.next().filter(|n| !n.is_empty()).unwrap_or("@");

    Ok((
        service.trim_start_matches('_').to_string(),
        transport.trim_start_matches('_').to_string(),
        name.to_string(),
    ))
}
