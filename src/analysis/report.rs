//! Ranked report assembly
//!
//! Takes one comparison and produces the seven ranked views plus metadata.
//! The report is a plain value recomputed per request; field names follow
//! the camelCase API contract consumed by the dashboard and the renderers.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Ordering;

use crate::snapshots::ProtocolRecord;

use super::compare::{compare_snapshots, FilterCriteria, ProtocolEntry};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub report_date: NaiveDateTime,
    pub comparison_date: NaiveDateTime,
    /// Raw end-snapshot record count, before any filtering
    pub protocol_count: usize,
    pub min_tvl_set: f64,
    pub max_tvl_set: Option<f64>,
    pub top_n_set: Option<usize>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TvlReport {
    pub report_metadata: ReportMetadata,
    pub top_increases_pct: Vec<ProtocolEntry>,
    pub top_increases_abs: Vec<ProtocolEntry>,
    pub top_decreases_pct: Vec<ProtocolEntry>,
    pub top_decreases_abs: Vec<ProtocolEntry>,
    pub new_protocols: Vec<ProtocolEntry>,
    pub removed_protocols: Vec<ProtocolEntry>,
    /// Matched + new combined, TVL descending. Deliberately never truncated
    /// by top_n; clients page this one themselves.
    pub all_protocols: Vec<ProtocolEntry>,
}

impl TvlReport {
    /// True when every ranked section is empty (the combined view aside)
    pub fn has_no_movements(&self) -> bool {
        self.top_increases_pct.is_empty()
            && self.top_increases_abs.is_empty()
            && self.top_decreases_pct.is_empty()
            && self.top_decreases_abs.is_empty()
            && self.new_protocols.is_empty()
            && self.removed_protocols.is_empty()
    }
}

/// Build the full report for two snapshots
///
/// `top_n = None` leaves every ranked view unbounded. Sorts are stable, so
/// entries with equal keys keep the comparator's ascending-id order.
pub fn build_report(
    start: &[ProtocolRecord],
    end: &[ProtocolRecord],
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    filter: &FilterCriteria,
    top_n: Option<usize>,
) -> TvlReport {
    let comparison = compare_snapshots(start, end, filter);

    let increases: Vec<ProtocolEntry> = comparison
        .changes
        .iter()
        .filter(|e| e.diff.unwrap_or(0.0) > 0.0)
        .cloned()
        .collect();
    let decreases: Vec<ProtocolEntry> = comparison
        .changes
        .iter()
        .filter(|e| e.diff.unwrap_or(0.0) < 0.0)
        .cloned()
        .collect();

    let mut all_protocols: Vec<ProtocolEntry> = comparison.changes;
    all_protocols.extend(comparison.new_protocols.iter().cloned());
    all_protocols.sort_by(|a, b| compare_f64(b.tvl, a.tvl));

    TvlReport {
        report_metadata: ReportMetadata {
            report_date: end_date,
            comparison_date: start_date,
            protocol_count: end.len(),
            min_tvl_set: filter.min_tvl,
            max_tvl_set: filter.max_tvl,
            top_n_set: top_n,
            categories: filter.categories(),
        },
        top_increases_pct: ranked(&increases, top_n, |a, b| {
            compare_f64(b.pct.unwrap_or(0.0), a.pct.unwrap_or(0.0))
        }),
        top_increases_abs: ranked(&increases, top_n, |a, b| {
            compare_f64(b.diff.unwrap_or(0.0), a.diff.unwrap_or(0.0))
        }),
        top_decreases_pct: ranked(&decreases, top_n, |a, b| {
            compare_f64(a.pct.unwrap_or(0.0), b.pct.unwrap_or(0.0))
        }),
        top_decreases_abs: ranked(&decreases, top_n, |a, b| {
            compare_f64(a.diff.unwrap_or(0.0), b.diff.unwrap_or(0.0))
        }),
        new_protocols: ranked(&comparison.new_protocols, top_n, |a, b| {
            compare_f64(b.tvl, a.tvl)
        }),
        removed_protocols: ranked(&comparison.removed_protocols, top_n, |a, b| {
            compare_f64(b.tvl, a.tvl)
        }),
        all_protocols,
    }
}

/// Stable-sort a copy of the entries and truncate to top_n when set
fn ranked(
    entries: &[ProtocolEntry],
    top_n: Option<usize>,
    cmp: impl Fn(&ProtocolEntry, &ProtocolEntry) -> Ordering,
) -> Vec<ProtocolEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(cmp);
    if let Some(n) = top_n {
        sorted.truncate(n);
    }
    sorted
}

/// Total order over the finite TVL/diff/pct values reports carry
fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
