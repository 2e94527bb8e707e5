//! Protocol matching across two snapshots
//!
//! Classifies every allow-listed protocol into matched / new / removed by
//! its id and computes the TVL delta for matched ones. Matched protocols
//! whose start TVL is zero or missing are excluded from the matched set
//! entirely: a percentage against a zero base is undefined, and downstream
//! ranking depends on every matched entry carrying one.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::config::with_config;
use crate::snapshots::ProtocolRecord;

/// TVL filtering criteria for one comparison
///
/// The category allow-list is matched case-insensitively; both TVL bounds
/// are inclusive.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub min_tvl: f64,
    pub max_tvl: Option<f64>,
    allowed_categories: HashSet<String>,
}

impl FilterCriteria {
    pub fn new(min_tvl: f64, max_tvl: Option<f64>, allowed_categories: &[String]) -> Self {
        Self {
            min_tvl,
            max_tvl,
            allowed_categories: allowed_categories
                .iter()
                .map(|c| c.to_lowercase())
                .collect(),
        }
    }

    /// Criteria with the allow-list taken from configuration
    pub fn from_config(min_tvl: f64, max_tvl: Option<f64>) -> Self {
        let categories = with_config(|c| c.filters.allowed_categories.clone());
        Self::new(min_tvl, max_tvl, &categories)
    }

    /// Allow-list as a sorted list, for report metadata
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.allowed_categories.iter().cloned().collect();
        categories.sort();
        categories
    }

    /// Whether a record passes the category and TVL filters
    ///
    /// Missing category never matches the allow-list; missing TVL counts
    /// as zero against both bounds.
    pub fn is_valid(&self, record: &ProtocolRecord) -> bool {
        let category = record
            .category
            .as_deref()
            .unwrap_or("")
            .to_lowercase();
        if !self.allowed_categories.contains(&category) {
            return false;
        }

        let tvl = record.tvl_or_zero();
        if tvl < self.min_tvl {
            return false;
        }
        if let Some(max_tvl) = self.max_tvl {
            if tvl > max_tvl {
                return false;
            }
        }

        true
    }
}

/// One protocol row in a report view
///
/// `diff`/`pct` are present only for matched-comparison entries and are
/// omitted from JSON otherwise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProtocolEntry {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub category: String,
    pub tvl: f64,
    pub logo: Option<String>,
    pub url: Option<String>,
    pub chains: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pct: Option<f64>,
}

impl ProtocolEntry {
    fn from_record(record: &ProtocolRecord) -> Self {
        Self {
            name: record.name.clone(),
            slug: record.slug.clone(),
            category: record.category.clone().unwrap_or_else(|| "N/A".to_string()),
            tvl: record.tvl_or_zero(),
            logo: record.logo.clone(),
            url: record.url.clone(),
            chains: record.chains.clone(),
            diff: None,
            pct: None,
        }
    }
}

/// Classified output of one snapshot comparison
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonResult {
    /// Matched protocols with diff/pct, in ascending id order
    pub changes: Vec<ProtocolEntry>,
    /// Present only in the end snapshot
    pub new_protocols: Vec<ProtocolEntry>,
    /// Present only in the start snapshot
    pub removed_protocols: Vec<ProtocolEntry>,
}

/// Compare two snapshots under the given filters
///
/// Records failing the filters are invisible to the comparison. Duplicate
/// ids within one snapshot resolve last-write-wins; that mirrors the
/// upstream feed's behavior and is not a stability guarantee. Maps are
/// iterated in id order so equal-key sorts downstream stay reproducible.
pub fn compare_snapshots(
    start: &[ProtocolRecord],
    end: &[ProtocolRecord],
    filter: &FilterCriteria,
) -> ComparisonResult {
    let start_map: BTreeMap<&str, &ProtocolRecord> = start
        .iter()
        .filter(|r| filter.is_valid(r))
        .map(|r| (r.id.as_str(), r))
        .collect();
    let end_map: BTreeMap<&str, &ProtocolRecord> = end
        .iter()
        .filter(|r| filter.is_valid(r))
        .map(|r| (r.id.as_str(), r))
        .collect();

    let mut changes = Vec::new();
    let mut new_protocols = Vec::new();

    for (id, end_record) in &end_map {
        let mut entry = ProtocolEntry::from_record(end_record);

        match start_map.get(id) {
            Some(start_record) => {
                let start_tvl = start_record.tvl_or_zero();
                if start_tvl > 0.0 {
                    let diff = entry.tvl - start_tvl;
                    entry.diff = Some(diff);
                    entry.pct = Some(diff / start_tvl * 100.0);
                    changes.push(entry);
                }
                // Zero/missing start TVL: matched but unrankable, dropped
            }
            None => new_protocols.push(entry),
        }
    }

    let removed_protocols = start_map
        .iter()
        .filter(|(id, _)| !end_map.contains_key(*id))
        .map(|(_, record)| ProtocolEntry::from_record(record))
        .collect();

    ComparisonResult {
        changes,
        new_protocols,
        removed_protocols,
    }
}
