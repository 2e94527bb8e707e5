//! HTML message formatters for Telegram notifications

use crate::analysis::{format_percentage, pretty_usd, ProtocolEntry, TvlReport};

/// Entries shown per section in the condensed summary
const SECTION_LIMIT: usize = 5;

/// Sentinel text when the week produced nothing to rank
const NO_MOVEMENTS: &str = "No significant movements this week.";

/// Condensed weekly summary: top 5 per section
pub fn msg_weekly_summary(report: &TvlReport) -> String {
    let date = report.report_metadata.report_date.format("%d-%m-%Y");
    let mut out = format!("📊 <b>DeFi Weekly Report</b>\nWeek ending {}\n", date);

    if report.has_no_movements() {
        out.push('\n');
        out.push_str(NO_MOVEMENTS);
        return out;
    }

    add_change_section(&mut out, "📈 Top Increases (%)", &report.top_increases_pct);
    add_change_section(&mut out, "📉 Top Decreases (%)", &report.top_decreases_pct);
    add_tvl_section(&mut out, "🆕 New Protocols", &report.new_protocols);
    add_tvl_section(&mut out, "🗑 Removed Protocols", &report.removed_protocols);

    out
}

fn add_change_section(out: &mut String, title: &str, entries: &[ProtocolEntry]) {
    if entries.is_empty() {
        return;
    }

    out.push_str(&format!("\n<b>{}</b>\n", title));
    for entry in entries.iter().take(SECTION_LIMIT) {
        out.push_str(&format!(
            "• {}: {} ({})\n",
            html_escape(entry.name.as_deref().unwrap_or("N/A")),
            format_percentage(entry.pct.unwrap_or(0.0)),
            pretty_usd(entry.diff.unwrap_or(0.0)),
        ));
    }
}

fn add_tvl_section(out: &mut String, title: &str, entries: &[ProtocolEntry]) {
    if entries.is_empty() {
        return;
    }

    out.push_str(&format!("\n<b>{}</b>\n", title));
    for entry in entries.iter().take(SECTION_LIMIT) {
        out.push_str(&format!(
            "• {}: {}\n",
            html_escape(entry.name.as_deref().unwrap_or("N/A")),
            pretty_usd(entry.tvl),
        ));
    }
}

/// Escape the three characters Telegram HTML mode treats specially
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{build_report, FilterCriteria};
    use crate::snapshots::ProtocolRecord;
    use chrono::NaiveDate;

    fn date(day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, day)
            .unwrap()
            .and_hms_opt(4, 5, 0)
            .unwrap()
    }

    fn filter() -> FilterCriteria {
        FilterCriteria::new(0.0, None, &["lending".to_string()])
    }

    #[test]
    fn test_empty_report_uses_sentinel() {
        let report = build_report(&[], &[], date(11), date(18), &filter(), None);
        let msg = msg_weekly_summary(&report);
        assert!(msg.contains("No significant movements this week."));
    }

    #[test]
    fn test_sections_capped_at_five() {
        let start: Vec<ProtocolRecord> = (0..8)
            .map(|i| ProtocolRecord::test_record(&format!("p{}", i), "lending", Some(100.0)))
            .collect();
        let end: Vec<ProtocolRecord> = (0..8)
            .map(|i| {
                ProtocolRecord::test_record(&format!("p{}", i), "lending", Some(150.0 + i as f64))
            })
            .collect();

        let report = build_report(&start, &end, date(11), date(18), &filter(), None);
        let msg = msg_weekly_summary(&report);

        let bullet_count = msg
            .lines()
            .skip_while(|l| !l.contains("Top Increases"))
            .take_while(|l| !l.contains("Top Decreases"))
            .filter(|l| l.starts_with('•'))
            .count();
        assert_eq!(bullet_count, 5);
    }

    #[test]
    fn test_names_are_escaped() {
        let mut start = ProtocolRecord::test_record("amp", "lending", Some(100.0));
        start.name = Some("A&B <Finance>".to_string());
        let mut end = start.clone();
        end.tvl = Some(150.0);

        let report = build_report(&[start], &[end], date(11), date(18), &filter(), None);
        let msg = msg_weekly_summary(&report);
        assert!(msg.contains("A&amp;B &lt;Finance&gt;"));
    }
}
