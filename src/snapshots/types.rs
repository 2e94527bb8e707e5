use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One protocol entry as delivered by the DeFiLlama /protocols endpoint
///
/// Only `id` is mandatory; it is the identity key across snapshots. Every
/// other field can be absent or null upstream and defaults accordingly.
/// Unknown fields in the payload are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProtocolRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Current TVL in USD; null or missing is treated as 0 everywhere
    #[serde(default)]
    pub tvl: Option<f64>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub chains: Vec<String>,
}

impl ProtocolRecord {
    /// TVL with the null-coerces-to-zero rule applied
    pub fn tvl_or_zero(&self) -> f64 {
        self.tvl.unwrap_or(0.0)
    }

    #[cfg(test)]
    pub fn test_record(id: &str, category: &str, tvl: Option<f64>) -> Self {
        Self {
            id: id.to_string(),
            name: Some(format!("{} protocol", id)),
            slug: Some(id.to_string()),
            category: Some(category.to_string()),
            tvl,
            logo: None,
            url: None,
            chains: vec![],
        }
    }
}

/// Listing entry for one stored snapshot file
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotMeta {
    pub filename: String,
    /// Timestamp parsed from the filename, ISO-8601 in API responses
    pub date: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        let record: ProtocolRecord = serde_json::from_str(r#"{"id":"42"}"#).unwrap();
        assert_eq!(record.id, "42");
        assert!(record.name.is_none());
        assert_eq!(record.tvl_or_zero(), 0.0);
        assert!(record.chains.is_empty());
    }

    #[test]
    fn test_null_tvl_treated_as_zero() {
        let record: ProtocolRecord = serde_json::from_str(r#"{"id":"42","tvl":null}"#).unwrap();
        assert_eq!(record.tvl_or_zero(), 0.0);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let raw = r#"{"id":"1","tvl":12.5,"chainTvls":{"Ethereum":12.5},"mcap":9.0}"#;
        let record: ProtocolRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.tvl_or_zero(), 12.5);
    }
}
