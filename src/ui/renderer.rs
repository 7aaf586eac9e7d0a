// Renderer module - formatting utilities shared by the terminal UI and the
// plain-text report

use {
    crate::dashboard::DashboardReport,
    chrono::{DateTime, Utc},
    std::fmt::Write,
};

/// Whole dollars with thousands separators, e.g. `1,234,567`
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }

    let rounded = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0.0 && rounded != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Short dollar form for chart labels, e.g. `$1.23B`
pub fn format_usd_compact(amount: f64) -> String {
    let abs = amount.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (amount / 1e9, "B")
    } else if abs >= 1e6 {
        (amount / 1e6, "M")
    } else if abs >= 1e3 {
        (amount / 1e3, "K")
    } else {
        (amount, "")
    };
    format!("${:.2}{}", scaled, suffix)
}

/// Fraction as signed percentage, e.g. `0.35` → `+35.00%`
pub fn format_pct(fraction: f64) -> String {
    format!("{:+.2}%", fraction * 100.0)
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Plain-text version of the dashboard for `--plain`
pub fn render_plain_report(report: &DashboardReport) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    let _ = writeln!(out, "Solana DeFi Adoption & User Behavior Dashboard");
    let _ = writeln!(out, "{}", "=".repeat(64));
    let _ = writeln!(out, "Protocols Analyzed: {}", summary.protocols_analyzed);
    let _ = writeln!(out, "Top TVL Protocol:   {}", summary.top_tvl_protocol);
    let _ = writeln!(out, "Average TVL ($):    {}", format_usd(summary.average_tvl));

    let _ = writeln!(out);
    let _ = writeln!(out, "Protocol TVL Comparison");
    let _ = writeln!(out, "{:<12} {:<10} {:>22}", "Protocol", "Slug", "TVL (USD)");
    let _ = writeln!(out, "{}", "-".repeat(46));
    for row in report.snapshot.ranked_by_tvl() {
        let _ = writeln!(out, "{:<12} {:<10} {:>22}", row.name, row.slug, format_usd(row.tvl));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Adoption Quality Score (AQS)");
    if report.scores.is_empty() {
        let _ = writeln!(out, "Not enough TVL history to score any protocol.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<4} {:<12} {:>12} {:>12} {:>8}",
        "Rank", "Protocol", "Growth", "Volatility", "AQS"
    );
    let _ = writeln!(out, "{}", "-".repeat(52));
    for (rank, s) in report.scores.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<12} {:>12} {:>12.4} {:>8.3}",
            rank + 1,
            s.protocol,
            format_pct(s.growth_rate),
            s.volatility,
            s.adoption_quality_score
        );
    }

    out
}
