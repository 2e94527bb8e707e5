//! Snapshot ordering and "about N days ago" selection
//!
//! The scheduler captures snapshots roughly daily but with jitter, so the
//! weekly comparison accepts anything within a one-day tolerance on either
//! side of the target and picks whichever candidate lands closest to it.

use chrono::{Duration, NaiveDateTime};

use super::types::SnapshotMeta;

/// Sort snapshot metadata newest first (stable, ties keep input order)
pub fn sort_newest_first(mut snapshots: Vec<SnapshotMeta>) -> Vec<SnapshotMeta> {
    snapshots.sort_by(|a, b| b.date.cmp(&a.date));
    snapshots
}

/// Pick the candidate closest to `reference - days_ago` days
///
/// Only candidates whose distance from `reference` falls within
/// `[days_ago - 1, days_ago + 1]` days inclusive are considered. The first
/// candidate with the minimal distance to the exact target wins ties.
/// Returns None when no candidate falls in the window.
pub fn pick_near_days_ago(
    days_ago: i64,
    reference: NaiveDateTime,
    candidates: &[SnapshotMeta],
) -> Option<SnapshotMeta> {
    let window_min = Duration::days(days_ago - 1);
    let window_max = Duration::days(days_ago + 1);
    let target = reference - Duration::days(days_ago);

    let mut best: Option<(Duration, &SnapshotMeta)> = None;
    for meta in candidates {
        let age = reference - meta.date;
        if age < window_min || age > window_max {
            continue;
        }

        let distance = (meta.date - target).abs();
        match &best {
            Some((best_distance, _)) if *best_distance <= distance => {}
            _ => best = Some((distance, meta)),
        }
    }

    best.map(|(_, meta)| meta.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meta(filename: &str, reference: NaiveDateTime, days_back: i64, hours_back: i64) -> SnapshotMeta {
        SnapshotMeta {
            filename: filename.to_string(),
            date: reference - Duration::days(days_back) - Duration::hours(hours_back),
        }
    }

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 18)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_sort_newest_first() {
        let reference = reference();
        let sorted = sort_newest_first(vec![
            meta("b", reference, 2, 0),
            meta("a", reference, 0, 0),
            meta("c", reference, 5, 0),
        ]);
        let names: Vec<&str> = sorted.iter().map(|m| m.filename.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_exact_week_old_beats_neighbors() {
        let reference = reference();
        let candidates = vec![
            meta("6d", reference, 6, 0),
            meta("7d", reference, 7, 0),
            meta("8d", reference, 8, 0),
            meta("10d", reference, 10, 0),
        ];

        let picked = pick_near_days_ago(7, reference, &candidates).unwrap();
        assert_eq!(picked.filename, "7d");
    }

    #[test]
    fn test_candidates_outside_window_excluded() {
        let reference = reference();
        let candidates = vec![meta("10d", reference, 10, 0), meta("3d", reference, 3, 0)];
        assert!(pick_near_days_ago(7, reference, &candidates).is_none());
    }

    #[test]
    fn test_window_edges_inclusive() {
        let reference = reference();
        let candidates = vec![meta("6d", reference, 6, 0)];
        let picked = pick_near_days_ago(7, reference, &candidates).unwrap();
        assert_eq!(picked.filename, "6d");

        let candidates = vec![meta("8d", reference, 8, 0)];
        let picked = pick_near_days_ago(7, reference, &candidates).unwrap();
        assert_eq!(picked.filename, "8d");
    }

    #[test]
    fn test_closest_in_window_wins() {
        let reference = reference();
        let candidates = vec![
            meta("7d18h", reference, 7, 18),
            meta("7d2h", reference, 7, 2),
        ];
        let picked = pick_near_days_ago(7, reference, &candidates).unwrap();
        assert_eq!(picked.filename, "7d2h");
    }

    #[test]
    fn test_first_wins_distance_tie() {
        let reference = reference();
        // 6d12h and 7d12h are both 12 hours from the 7-day target
        let candidates = vec![
            meta("before", reference, 6, 12),
            meta("after", reference, 7, 12),
        ];
        let picked = pick_near_days_ago(7, reference, &candidates).unwrap();
        assert_eq!(picked.filename, "before");
    }

    #[test]
    fn test_empty_candidates() {
        assert!(pick_near_days_ago(7, reference(), &[]).is_none());
    }
}
