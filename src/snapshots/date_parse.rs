//! Timestamp extraction from snapshot filenames
//!
//! Snapshot files are named with a date and optional time using `-`, `_`, or
//! space separators (`2025-07-18 10_30.json`). Rather than enumerating the
//! separator conventions, the parser strips the extension and reads every
//! maximal digit run left to right: year, month, day, then optional hour,
//! minute, second. Missing trailing components default to zero.
//!
//! Parse failure is a routine skip condition, not an error: listing code
//! logs a warning and moves on.

use chrono::{NaiveDate, NaiveDateTime};

/// Minimum digit groups: year, month, day
const MIN_GROUPS: usize = 3;
/// Maximum digit groups: year, month, day, hour, minute, second
const MAX_GROUPS: usize = 6;

/// Parse a calendar timestamp out of a snapshot filename
///
/// Returns None when the name does not contain 3..=6 digit groups or the
/// groups do not form a valid calendar date-time (month 13, day 32, a
/// group too large for u32, ...).
pub fn parse_snapshot_date(name: &str) -> Option<NaiveDateTime> {
    let stem = match name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => name,
    };

    let mut groups: Vec<u32> = Vec::with_capacity(MAX_GROUPS);
    let mut current = String::new();
    for ch in stem.chars() {
        if ch.is_ascii_digit() {
            current.push(ch);
        } else if !current.is_empty() {
            groups.push(current.parse().ok()?);
            current.clear();
        }
    }
    if !current.is_empty() {
        groups.push(current.parse().ok()?);
    }

    if groups.len() < MIN_GROUPS || groups.len() > MAX_GROUPS {
        return None;
    }

    while groups.len() < MAX_GROUPS {
        groups.push(0);
    }

    let year = i32::try_from(groups[0]).ok()?;
    NaiveDate::from_ymd_opt(year, groups[1], groups[2])
        .and_then(|date| date.and_hms_opt(groups[3], groups[4], groups[5]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_parses_space_and_underscore_separators() {
        assert_eq!(
            parse_snapshot_date("2025-07-18 10_30.json"),
            Some(dt(2025, 7, 18, 10, 30, 0))
        );
    }

    #[test]
    fn test_parses_date_only() {
        assert_eq!(
            parse_snapshot_date("2025-07-18.json"),
            Some(dt(2025, 7, 18, 0, 0, 0))
        );
    }

    #[test]
    fn test_parses_full_six_components() {
        assert_eq!(
            parse_snapshot_date("2024_01_02-03-04-05.json"),
            Some(dt(2024, 1, 2, 3, 4, 5))
        );
    }

    #[test]
    fn test_rejects_names_without_date() {
        assert_eq!(parse_snapshot_date("not_a_date.json"), None);
        assert_eq!(parse_snapshot_date("protocols.json"), None);
    }

    #[test]
    fn test_rejects_too_few_or_too_many_groups() {
        assert_eq!(parse_snapshot_date("2025-07.json"), None);
        assert_eq!(parse_snapshot_date("1-2-3-4-5-6-7.json"), None);
    }

    #[test]
    fn test_rejects_invalid_calendar_values() {
        assert_eq!(parse_snapshot_date("2025-13-01.json"), None);
        assert_eq!(parse_snapshot_date("2025-02-30.json"), None);
        assert_eq!(parse_snapshot_date("2025-07-18 25_00.json"), None);
    }

    #[test]
    fn test_rejects_oversized_digit_group() {
        // Digit run larger than u32 must fail the parse, not panic
        assert_eq!(parse_snapshot_date("99999999999999999999-01-01.json"), None);
    }

    #[test]
    fn test_extension_is_stripped_not_parsed() {
        // The "2" in a weird extension must not count as a digit group
        assert_eq!(
            parse_snapshot_date("2025-07-18.v2"),
            Some(dt(2025, 7, 18, 0, 0, 0))
        );
    }
}
