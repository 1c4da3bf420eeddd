//! Presentation of projection results
//!
//! Formatting choices come from `DisplayConfig`; nothing here keeps state.

use std::fmt::Write as _;
use std::io;

use anyhow::Result;

use crate::config::DisplayConfig;
use crate::history::StoredExchange;
use crate::projection::{ComparativeProjection, ProjectionSeries};

/// Format an amount like `R$ 1,126.83`
pub fn format_currency(value: f64, display: &DisplayConfig) -> String {
    let amount = format_number(value, display);
    if display.currency_symbol.is_empty() {
        amount
    } else {
        format!("{} {}", display.currency_symbol, amount)
    }
}

/// Format a number with the configured separators
pub fn format_number(value: f64, display: &DisplayConfig) -> String {
    let raw = format!("{:.*}", display.decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(raw.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            if let Some(sep) = display.thousands_separator {
                grouped.push(sep);
            }
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if value < 0.0 && raw.chars().any(|c| c != '0' && c != '.') {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(display.decimal_separator);
        out.push_str(frac);
    }
    out
}

/// Text table of one series with a summary footer
pub fn render_table(series: &ProjectionSeries, display: &DisplayConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", series.kind.label());
    let _ = writeln!(out, "{:>6} {:>18} {:>16} {:>16}", "Period", "Value", "Earnings", "Paid out");
    let _ = writeln!(out, "{}", "-".repeat(59));

    for row in &series.rows {
        let _ = writeln!(
            out,
            "{:>6} {:>18} {:>16} {:>16}",
            row.period,
            format_currency(row.value, display),
            format_number(row.earnings, display),
            format_number(row.payout, display),
        );
    }

    let summary = series.summary();
    let _ = writeln!(out);
    let _ = writeln!(out, "Final value: {}", format_currency(summary.final_value, display));
    if summary.total_contributed > 0.0 {
        let _ = writeln!(out, "Contributed: {}", format_currency(summary.total_contributed, display));
    }
    let _ = writeln!(out, "Earnings:    {}", format_currency(summary.total_earnings, display));
    if summary.total_paid_out > 0.0 {
        let _ = writeln!(out, "Paid out:    {}", format_currency(summary.total_paid_out, display));
    }
    out
}

/// Text table with one column per comparison leg
pub fn render_comparison_table(comparison: &ComparativeProjection, display: &DisplayConfig) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>6}", "Period");
    for leg in &comparison.legs {
        let _ = write!(out, " {:>18}", format!("{} ({:.4}%)", leg.label, leg.rate * 100.0));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "-".repeat(6 + 19 * comparison.legs.len()));

    for i in 0..comparison.len() {
        let _ = write!(out, "{:>6}", i);
        if let Some(values) = comparison.row(i) {
            for value in values {
                let _ = write!(out, " {:>18}", format_currency(value, display));
            }
        }
        let _ = writeln!(out);
    }
    out
}

/// CSV of one series
pub fn write_csv<W: io::Write>(series: &ProjectionSeries, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Period", "Value", "Contribution", "Earnings", "PaidOut"])?;
    for row in &series.rows {
        csv.write_record([
            row.period.to_string(),
            format!("{:.8}", row.value),
            format!("{:.8}", row.contribution),
            format!("{:.8}", row.earnings),
            format!("{:.8}", row.payout),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// CSV with one value column per comparison leg
pub fn write_comparison_csv<W: io::Write>(comparison: &ComparativeProjection, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let mut header = vec!["Period".to_string()];
    header.extend(comparison.legs.iter().map(|l| l.label.clone()));
    csv.write_record(&header)?;

    for i in 0..comparison.len() {
        let mut record = vec![i.to_string()];
        if let Some(values) = comparison.row(i) {
            record.extend(values.iter().map(|v| format!("{:.8}", v)));
        }
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Stored exchanges, newest first
pub fn render_history(exchanges: &[StoredExchange]) -> String {
    if exchanges.is_empty() {
        return "No questions asked yet.\n".to_string();
    }

    let mut out = String::new();
    for exchange in exchanges {
        let _ = writeln!(out, "[{}]", exchange.asked_at.format("%Y-%m-%d %H:%M UTC"));
        let _ = writeln!(out, "Q: {}", exchange.record.question);
        let _ = writeln!(out, "A: {}", exchange.record.answer);
        let _ = writeln!(out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ConversationRecord;
    use crate::projection::{project, project_comparative, ScenarioInput, ScenarioKind};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_currency() {
        let display = DisplayConfig::default();
        assert_eq!(format_currency(1126.825030, &display), "R$ 1,126.83");
        assert_eq!(format_currency(0.0, &display), "R$ 0.00");
        assert_eq!(format_currency(1_234_567.891, &display), "R$ 1,234,567.89");
        assert_eq!(format_currency(999.999, &display), "R$ 1,000.00");
    }

    #[test]
    fn test_format_number_custom_separators() {
        let display = DisplayConfig {
            currency_symbol: String::new(),
            decimals: 1,
            thousands_separator: Some('.'),
            decimal_separator: ',',
        };
        assert_eq!(format_currency(1234567.24, &display), "1.234.567,2");
        assert_eq!(format_number(-1500.0, &display), "-1.500,0");
        assert_eq!(format_number(-0.01, &display), "0,0");
    }

    #[test]
    fn test_table_lists_every_period() {
        let series = project(ScenarioKind::CompoundGrowth, &ScenarioInput::new(1000.0, 0.01, 12)).unwrap();
        let table = render_table(&series, &DisplayConfig::default());

        assert!(table.starts_with("Compound growth"));
        assert!(table.contains("Final value: R$ 1,126.83"));
        // header + rule + 13 rows
        assert!(table.lines().filter(|l| l.trim_start().starts_with(char::is_numeric)).count() >= 13);
    }

    #[test]
    fn test_csv_output() {
        let input = ScenarioInput::new(0.0, 0.05, 3).with_contribution(100.0);
        let series = project(ScenarioKind::DcaAccumulation, &input).unwrap();

        let mut buf = Vec::new();
        write_csv(&series, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Period,Value,Contribution,Earnings,PaidOut");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1,105.00000000,100.00000000"));
    }

    #[test]
    fn test_comparison_outputs() {
        let comparison = project_comparative(&ScenarioInput::new(100.0, 0.03, 2)).unwrap();

        let mut buf = Vec::new();
        write_comparison_csv(&comparison, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("Period,base,12/12,8/12"));
        assert_eq!(text.lines().count(), 4);

        let table = render_comparison_table(&comparison, &DisplayConfig::default());
        assert!(table.contains("8/12"));
    }

    #[test]
    fn test_history_rendering() {
        assert_eq!(render_history(&[]), "No questions asked yet.\n");

        let exchange = StoredExchange {
            asked_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            record: ConversationRecord::new("What is Selic?", "The policy rate."),
        };
        let text = render_history(&[exchange]);
        assert!(text.contains("[2026-01-02 03:04 UTC]"));
        assert!(text.contains("Q: What is Selic?"));
    }
}
