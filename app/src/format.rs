//! Metric formatters.
//!
//! All formatters are plain `fn(f64) -> String` so they can be passed as
//! component props and `MetricSpec` overrides (see
//! `prism_types::ValueFormatter`).

/// Currency with thousands separators, rounded to whole units: `$1,234`,
/// negatives as `-$1,234`.
pub fn monetary(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// Plain count with thousands separators, rounded to whole units.
pub fn count(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(rounded.abs() as u64))
}

/// Percentage with one decimal: `12.5%`.
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Compact magnitude notation: `1.2K`, `3.4M`.
pub fn compact(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1_000_000.0 {
        format!("{sign}{:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{sign}{:.1}K", abs / 1_000.0)
    } else {
        format!("{sign}{}", abs.round() as u64)
    }
}

fn group_thousands(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while n > 0 {
        groups.push((n % 1000) as u16);
        n /= 1000;
    }
    let mut out = groups
        .pop()
        .map(|g| g.to_string())
        .unwrap_or_else(|| "0".to_string());
    while let Some(g) = groups.pop() {
        out.push_str(&format!(",{g:03}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monetary_groups_and_signs() {
        assert_eq!(monetary(0.0), "$0");
        assert_eq!(monetary(100.0), "$100");
        assert_eq!(monetary(1234.0), "$1,234");
        assert_eq!(monetary(-50.0), "-$50");
        assert_eq!(monetary(1234567.4), "$1,234,567");
    }

    #[test]
    fn count_rounds_to_whole_units() {
        assert_eq!(count(999.6), "1,000");
        assert_eq!(count(-2500.0), "-2,500");
    }

    #[test]
    fn percent_keeps_one_decimal() {
        assert_eq!(percent(12.55), "12.6%");
        assert_eq!(percent(0.0), "0.0%");
    }

    #[test]
    fn compact_scales_by_magnitude() {
        assert_eq!(compact(950.0), "950");
        assert_eq!(compact(1200.0), "1.2K");
        assert_eq!(compact(3_400_000.0), "3.4M");
        assert_eq!(compact(-1200.0), "-1.2K");
    }
}
