use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============ DNS Record Types ============

/// Type-safe representation of DNS record data.
///
/// Each variant carries the fields specific to that record type.
/// Types without a dedicated variant are kept as [`Raw`](Self::Raw) and
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RecordData {
    /// A record — maps a hostname to an IPv4 address.
    A {
        /// IPv4 address (e.g., `"192.0.2.1"`).
        address: String,
    },

    /// AAAA record — maps a hostname to an IPv6 address.
    AAAA {
        /// IPv6 address (e.g., `"2001:db8::1"`).
        address: String,
    },

    /// CNAME record — alias from one name to another.
    CNAME {
        /// Target hostname.
        target: String,
    },

    /// MX record — mail exchange server.
    MX {
        /// Preference (lower = preferred).
        preference: u16,
        /// Mail server hostname.
        exchange: String,
    },

    /// NS record — authoritative name server.
    NS {
        /// Name server hostname.
        nameserver: String,
    },

    /// SRV record — service locator.
    ///
    /// The owner name of an SRV record is `_service._transport.name`; the
    /// record's `name` holds only the trailing part (`@` for the apex).
    SRV {
        /// Service label without the leading underscore (e.g., `"sip"`).
        service: String,
        /// Transport label without the leading underscore (e.g., `"tcp"`).
        transport: String,
        /// Priority (lower = preferred).
        priority: u16,
        /// Weight for load balancing among same-priority targets.
        weight: u16,
        /// TCP/UDP port number.
        port: u16,
        /// Target hostname providing the service.
        target: String,
    },

    /// TXT record — arbitrary text data.
    TXT {
        /// Text content.
        text: String,
    },

    /// Any other record type, kept as type + zone-file style data.
    Raw {
        /// Record type as sent by the provider (e.g., `"CAA"`).
        record_type: String,
        /// Record data, verbatim.
        data: String,
    },
}

impl RecordData {
    /// Returns the record type string (`"A"`, `"MX"`, ...).
    pub fn record_type(&self) -> &str {
        match self {
            Self::A { .. } => "A",
            Self::AAAA { .. } => "AAAA",
            Self::CNAME { .. } => "CNAME",
            Self::MX { .. } => "MX",
            Self::NS { .. } => "NS",
            Self::SRV { .. } => "SRV",
            Self::TXT { .. } => "TXT",
            Self::Raw { record_type, .. } => record_type,
        }
    }

    /// Returns the primary display value for this record (the IP address for A/AAAA,
    /// the target for CNAME/SRV, the exchange for MX).
    pub fn display_value(&self) -> &str {
        match self {
            Self::A { address } | Self::AAAA { address } => address,
            Self::CNAME { target } | Self::SRV { target, .. } => target,
            Self::MX { exchange, .. } => exchange,
            Self::NS { nameserver } => nameserver,
            Self::TXT { text } => text,
            Self::Raw { data, .. } => data,
        }
    }
}

/// A DNS record in the provider-independent model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Provider-assigned identifier, `None` for records not yet created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Record name, relative to the zone (`"www"`, `"@"` for the apex) or absolute.
    pub name: String,
    /// Time to live. Zero means "use the provider default".
    #[serde(with = "crate::utils::ttl")]
    pub ttl: Duration,
    /// Type-specific record data.
    pub data: RecordData,
}

impl DnsRecord {
    /// Creates a record without a provider identifier.
    pub fn new(name: impl Into<String>, ttl: Duration, data: RecordData) -> Self {
        Self {
            id: None,
            name: name.into(),
            ttl,
            data,
        }
    }

    /// Returns the record with its provider identifier set.
    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Flattened `{name, type, data, ttl}` view of the record.
    ///
    /// MX and SRV data are rendered zone-file style (`"10 mail.example.com"`,
    /// `"10 5 5060 sip.example.com"`), and the SRV name gets its
    /// `_service._transport` prefix back.
    pub fn rr(&self) -> Rr {
        let (name, data) = match &self.data {
            RecordData::MX {
                preference,
                exchange,
            } => (self.name.clone(), format!("{preference} {exchange}")),
            RecordData::SRV {
                service,
                transport,
                priority,
                weight,
                port,
                target,
            } => (
                srv_owner_name(service, transport, &self.name),
                format!("{priority} {weight} {port} {target}"),
            ),
            other => (self.name.clone(), other.display_value().to_string()),
        };

        Rr {
            name,
            record_type: self.data.record_type().to_string(),
            data,
            ttl: self.ttl,
        }
    }
}

/// Builds `_service._transport[.name]`; an apex or empty name adds nothing.
pub(crate) fn srv_owner_name(service: &str, transport: &str, name: &str) -> String {
    let prefix = format!("_{service}._{transport}");
    if name.is_empty() || name == "@" {
        prefix
    } else {
        format!("{prefix}.{name}")
    }
}

/// Flattened view of a record: every kind reduces to these four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rr {
    /// Owner name.
    pub name: String,
    /// Record type string.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record data.
    pub data: String,
    /// Time to live.
    #[serde(with = "crate::utils::ttl")]
    pub ttl: Duration,
}

impl Rr {
    /// Turns the flattened record into a typed one.
    ///
    /// Only the single-value kinds (A, AAAA, CNAME, NS, TXT) get a dedicated
    /// variant; everything else becomes [`RecordData::Raw`]. No field of the
    /// data is parsed.
    pub fn parse(self) -> DnsRecord {
        let data = match self.record_type.to_uppercase().as_str() {
            "A" => RecordData::A {
                address: self.data,
            },
            "AAAA" => RecordData::AAAA {
                address: self.data,
            },
            "CNAME" => RecordData::CNAME { target: self.data },
            "NS" => RecordData::NS {
                nameserver: self.data,
            },
            "TXT" => RecordData::TXT { text: self.data },
            _ => RecordData::Raw {
                record_type: self.record_type,
                data: self.data,
            },
        };

        DnsRecord::new(self.name, self.ttl, data)
    }
}

// ============ Batch Operation Types ============

/// Result of a batch operation run in per-record-result mode.
///
/// Unlike the fail-fast trait methods, every record is attempted and each
/// failure is reported next to its input position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Number of records that succeeded.
    pub success_count: usize,
    /// Number of records that failed.
    pub failed_count: usize,
    /// Records as returned by each successful call, in input order.
    pub succeeded: Vec<DnsRecord>,
    /// Details about each failure.
    pub failures: Vec<BatchFailure>,
}

impl BatchResult {
    pub(crate) fn new(succeeded: Vec<DnsRecord>, failures: Vec<BatchFailure>) -> Self {
        Self {
            success_count: succeeded.len(),
            failed_count: failures.len(),
            succeeded,
            failures,
        }
    }
}

/// Information about a single failed record in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    /// Index of the failed record in the input slice.
    pub index: usize,
    /// Name of the record that failed.
    pub record_name: String,
    /// Human-readable reason for the failure.
    pub reason: String,
}

// ============ Credential Types ============

/// Environment variable holding the API token, read by [`Credentials::from_env`].
pub const ENV_API_TOKEN: &str = "DOMAINNAMESHOP_API_TOKEN";
/// Environment variable holding the API secret, read by [`Credentials::from_env`].
pub const ENV_API_SECRET: &str = "DOMAINNAMESHOP_API_SECRET";

/// Validation error for provider credentials.
///
/// Returned when a credential field is missing or empty.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key (map key or environment variable).
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key (map key or environment variable).
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Domainname.shop API credentials.
///
/// Tokens are created at <https://domene.shop/admin?view=api> and are sent
/// as HTTP Basic auth (token as user, secret as password).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// API token.
    pub api_token: String,
    /// API secret.
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_token: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Construct credentials from a `HashMap` with `apiToken` / `apiSecret` keys.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a field is missing or empty.
    pub fn from_map(
        map: &std::collections::HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            api_token: required(map.get("apiToken").cloned(), "apiToken", "API Token")?,
            api_secret: required(map.get("apiSecret").cloned(), "apiSecret", "API Secret")?,
        })
    }

    /// Read credentials from `DOMAINNAMESHOP_API_TOKEN` and `DOMAINNAMESHOP_API_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a variable is unset or empty.
    pub fn from_env() -> Result<Self, CredentialValidationError> {
        Ok(Self {
            api_token: required(std::env::var(ENV_API_TOKEN).ok(), ENV_API_TOKEN, "API Token")?,
            api_secret: required(
                std::env::var(ENV_API_SECRET).ok(),
                ENV_API_SECRET,
                "API Secret",
            )?,
        })
    }

    /// Convert credentials to a `HashMap` for flat key-value storage.
    pub fn to_map(&self) -> std::collections::HashMap<String, String> {
        [
            ("apiToken".to_string(), self.api_token.clone()),
            ("apiSecret".to_string(), self.api_secret.clone()),
        ]
        .into()
    }
}

fn required(
    value: Option<String>,
    field: &str,
    label: &str,
) -> Result<String, CredentialValidationError> {
    match value {
        None => Err(CredentialValidationError::MissingField {
            field: field.to_string(),
            label: label.to_string(),
        }),
        Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
            field: field.to_string(),
            label: label.to_string(),
        }),
        Some(v) => Ok(v),
    }
}
