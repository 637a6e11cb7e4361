use crate::domain::odata::{self, OData};
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpNamedLocation {
    #[serde(rename = "@odata.type", skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trusted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_ranges: Option<Vec<IpRange>>,
}

impl IpNamedLocation {
    pub fn new(display_name: impl Into<String>, ip_ranges: Vec<IpRange>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            ip_ranges: Some(ip_ranges),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryNamedLocation {
    #[serde(rename = "@odata.type", skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries_and_regions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_unknown_countries_and_regions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_lookup_method: Option<CountryLookupMethod>,
}

impl CountryNamedLocation {
    pub fn new(display_name: impl Into<String>, countries_and_regions: Vec<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            countries_and_regions: Some(countries_and_regions),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CountryLookupMethod {
    ClientIpAddress,
    AuthenticatorAppGps,
    #[serde(untagged)]
    Other(String),
}

/// CIDR range of an IP named location, discriminated by `@odata.type`.
///
/// Ranges of a kind this crate does not model are kept verbatim in `Other` and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpRange {
    V4 { cidr_address: String },
    V6 { cidr_address: String },
    Other(serde_json::Value),
}

impl IpRange {
    /// Picks the address family from the literal: anything containing ':' is IPv6.
    pub fn cidr(cidr_address: impl Into<String>) -> Self {
        let cidr_address = cidr_address.into();
        if cidr_address.contains(':') {
            IpRange::V6 { cidr_address }
        } else {
            IpRange::V4 { cidr_address }
        }
    }

    pub fn cidr_address(&self) -> Option<&str> {
        match self {
            IpRange::V4 { cidr_address } | IpRange::V6 { cidr_address } => Some(cidr_address),
            IpRange::Other(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CidrBody {
    cidr_address: String,
}

impl Serialize for IpRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (kind, cidr_address) = match self {
            IpRange::V4 { cidr_address } => (odata::TYPE_IPV4_CIDR_RANGE, cidr_address),
            IpRange::V6 { cidr_address } => (odata::TYPE_IPV6_CIDR_RANGE, cidr_address),
            IpRange::Other(value) => return value.serialize(serializer),
        };
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("@odata.type", kind)?;
        map.serialize_entry("cidrAddress", cidr_address)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for IpRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("@odata.type")
            .and_then(|t| t.as_str())
            .map(str::to_string);
        match kind.as_deref() {
            Some(odata::TYPE_IPV4_CIDR_RANGE) => {
                let body: CidrBody = serde_json::from_value(value).map_err(serde::de::Error::custom)?;
                Ok(IpRange::V4 {
                    cidr_address: body.cidr_address,
                })
            }
            Some(odata::TYPE_IPV6_CIDR_RANGE) => {
                let body: CidrBody = serde_json::from_value(value).map_err(serde::de::Error::custom)?;
                Ok(IpRange::V6 {
                    cidr_address: body.cidr_address,
                })
            }
            _ => Ok(IpRange::Other(value)),
        }
    }
}

/// A named location of either concrete kind.
///
/// The service returns both kinds from the same collection; the concrete type is
/// chosen from the `@odata.type` discriminator of each payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NamedLocation {
    Ip(IpNamedLocation),
    Country(CountryNamedLocation),
}

impl NamedLocation {
    /// Decodes a single payload, returning `Ok(None)` when the discriminator is
    /// missing or names a kind this crate does not model.
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Option<Self>> {
        let meta: OData = serde_json::from_value(value.clone())?;
        match meta.odata_type.as_deref() {
            Some(odata::TYPE_IP_NAMED_LOCATION) => {
                Ok(Some(NamedLocation::Ip(serde_json::from_value(value)?)))
            }
            Some(odata::TYPE_COUNTRY_NAMED_LOCATION) => {
                Ok(Some(NamedLocation::Country(serde_json::from_value(value)?)))
            }
            _ => Ok(None),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            NamedLocation::Ip(loc) => loc.id.as_deref(),
            NamedLocation::Country(loc) => loc.id.as_deref(),
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            NamedLocation::Ip(loc) => loc.display_name.as_deref(),
            NamedLocation::Country(loc) => loc.display_name.as_deref(),
        }
    }

    pub fn odata_type(&self) -> &'static str {
        match self {
            NamedLocation::Ip(_) => odata::TYPE_IP_NAMED_LOCATION,
            NamedLocation::Country(_) => odata::TYPE_COUNTRY_NAMED_LOCATION,
        }
    }
}

impl<'de> Deserialize<'de> for NamedLocation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("@odata.type")
            .and_then(|t| t.as_str())
            .unwrap_or("<missing>")
            .to_string();
        NamedLocation::from_value(value)
            .map_err(serde::de::Error::custom)?
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported named location type: {}", kind)))
    }
}

impl From<IpNamedLocation> for NamedLocation {
    fn from(loc: IpNamedLocation) -> Self {
        NamedLocation::Ip(loc)
    }
}

impl From<CountryNamedLocation> for NamedLocation {
    fn from(loc: CountryNamedLocation) -> Self {
        NamedLocation::Country(loc)
    }
}
