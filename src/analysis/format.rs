//! Human-readable number formatting for reports and notifications

/// Format a USD amount with magnitude suffix
///
/// Three tiers: billions and millions get two decimals, thousands one,
/// anything below two. Negative values carry a leading minus before the
/// dollar sign.
pub fn pretty_usd(n: f64) -> String {
    let sign = if n < 0.0 { "-" } else { "" };
    let n = n.abs();

    if n >= 1_000_000_000.0 {
        format!("{}${:.2}B", sign, n / 1_000_000_000.0)
    } else if n >= 1_000_000.0 {
        format!("{}${:.2}M", sign, n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{}${:.1}K", sign, n / 1_000.0)
    } else {
        format!("{}${:.2}", sign, n)
    }
}

/// Format a percentage with an explicit sign for positive values
pub fn format_percentage(n: f64) -> String {
    let sign = if n > 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_usd_tiers() {
        assert_eq!(pretty_usd(2_500_000_000.0), "$2.50B");
        assert_eq!(pretty_usd(1_234_567.0), "$1.23M");
        assert_eq!(pretty_usd(45_000.0), "$45.0K");
        assert_eq!(pretty_usd(999.99), "$999.99");
        assert_eq!(pretty_usd(0.0), "$0.00");
    }

    #[test]
    fn test_pretty_usd_negative() {
        assert_eq!(pretty_usd(-500.0), "-$500.00");
        assert_eq!(pretty_usd(-1_234_567.0), "-$1.23M");
    }

    #[test]
    fn test_format_percentage_signs() {
        assert_eq!(format_percentage(12.5), "+12.50%");
        assert_eq!(format_percentage(-3.2), "-3.20%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }
}
