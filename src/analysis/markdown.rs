//! Markdown rendering of a weekly report
//!
//! Produces the downloadable `DeFi_Report_<date>.md` document: numbered
//! sections for the ranked increase views, bulleted sections for new and
//! removed protocols. Empty sections are omitted entirely.

use super::compare::ProtocolEntry;
use super::format::pretty_usd;
use super::report::TvlReport;

const PROTOCOL_URL_BASE: &str = "https://defillama.com/protocol/";

/// Render a report as a Markdown document
pub fn create_markdown_report(report: &TvlReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    let end_date = report.report_metadata.report_date.format("%d-%m-%Y");
    lines.push("# DeFiLlama Weekly Report".to_string());
    lines.push(format!("#### Week ending {}", end_date));
    lines.push("\n---".to_string());

    add_ranked_section(
        &mut lines,
        "Top TVL Increases (%, 7d)",
        &report.top_increases_pct,
    );
    add_ranked_section(
        &mut lines,
        "Top TVL Increases (absolute, 7d)",
        &report.top_increases_abs,
    );
    add_listing_section(&mut lines, "New Protocols", &report.new_protocols);
    add_listing_section(&mut lines, "Removed Protocols", &report.removed_protocols);

    lines.join("\n")
}

/// Numbered section for matched protocols carrying diff/pct
fn add_ranked_section(lines: &mut Vec<String>, title: &str, protocols: &[ProtocolEntry]) {
    if protocols.is_empty() {
        return;
    }

    lines.push(format!("## {}", title));

    for (i, p) in protocols.iter().enumerate() {
        let diff = p.diff.unwrap_or(0.0);
        let pct = p.pct.unwrap_or(0.0);
        let change = if diff > 0.0 {
            format!("Increased by {}, +{:.1} %", pretty_usd(diff), pct)
        } else {
            format!("Decreased by {}, {:.1} %", pretty_usd(diff.abs()), pct)
        };

        lines.push(format!(
            "{}. **{}** / {} / {} / {} – [LINK]({}{})",
            i + 1,
            p.name.as_deref().unwrap_or("N/A"),
            p.category,
            pretty_usd(p.tvl),
            change,
            PROTOCOL_URL_BASE,
            p.slug.as_deref().unwrap_or("")
        ));

        if !p.chains.is_empty() {
            lines.push(format!("    - Chain: {}", p.chains.join(", ")));
        }
    }

    lines.push(String::new());
}

/// Bulleted section for new/removed protocols (no diff data)
fn add_listing_section(lines: &mut Vec<String>, title: &str, protocols: &[ProtocolEntry]) {
    if protocols.is_empty() {
        return;
    }

    lines.push(format!("## {} ({})", title, protocols.len()));

    for p in protocols {
        lines.push(format!(
            "- **{}** / {} / {} – [LINK]({}{})",
            p.name.as_deref().unwrap_or("N/A"),
            p.category,
            pretty_usd(p.tvl),
            PROTOCOL_URL_BASE,
            p.slug.as_deref().unwrap_or("")
        ));
    }

    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compare::FilterCriteria;
    use crate::analysis::report::build_report;
    use crate::snapshots::ProtocolRecord;
    use chrono::NaiveDate;

    fn sample_report() -> TvlReport {
        let filter = FilterCriteria::new(0.0, None, &["lending".to_string()]);
        let mut start = ProtocolRecord::test_record("aave", "lending", Some(1_000_000.0));
        start.name = Some("Aave".to_string());
        start.chains = vec!["Ethereum".to_string(), "Polygon".to_string()];
        let mut end = start.clone();
        end.tvl = Some(2_234_567.0);
        let fresh = ProtocolRecord::test_record("newbie", "lending", Some(45_000.0));

        build_report(
            &[start],
            &[end, fresh],
            NaiveDate::from_ymd_opt(2025, 7, 11)
                .unwrap()
                .and_hms_opt(4, 5, 0)
                .unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 18)
                .unwrap()
                .and_hms_opt(4, 5, 0)
                .unwrap(),
            &filter,
            None,
        )
    }

    #[test]
    fn test_header_and_sections() {
        let md = create_markdown_report(&sample_report());

        assert!(md.starts_with("# DeFiLlama Weekly Report"));
        assert!(md.contains("#### Week ending 18-07-2025"));
        assert!(md.contains("## Top TVL Increases (%, 7d)"));
        assert!(md.contains("## New Protocols (1)"));
        // Nothing was removed, so the section is omitted
        assert!(!md.contains("## Removed Protocols"));
    }

    #[test]
    fn test_ranked_line_format() {
        let md = create_markdown_report(&sample_report());

        assert!(md.contains("1. **Aave** / lending / $2.23M / Increased by $1.23M, +123.5 %"));
        assert!(md.contains("[LINK](https://defillama.com/protocol/aave)"));
        assert!(md.contains("    - Chain: Ethereum, Polygon"));
    }

    #[test]
    fn test_listing_line_format() {
        let md = create_markdown_report(&sample_report());
        assert!(md.contains("- **newbie protocol** / lending / $45.0K"));
    }

    #[test]
    fn test_empty_report_keeps_header_only() {
        let filter = FilterCriteria::new(0.0, None, &["lending".to_string()]);
        let report = build_report(
            &[],
            &[],
            NaiveDate::from_ymd_opt(2025, 7, 11)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 18)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            &filter,
            None,
        );

        let md = create_markdown_report(&report);
        assert!(md.contains("# DeFiLlama Weekly Report"));
        assert!(!md.contains("\n## "));
    }
}
