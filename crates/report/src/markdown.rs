// Copyright 2025 k6-compare Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markdown rendering of a comparison report.
//!
//! The output layout (section order, headings, table columns and number
//! formats) is stable so reports from different runs can be diffed. Only the
//! generation timestamp varies between runs over the same input.

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::result::{MetricSet, ResultsTable};
use chrono::NaiveDateTime;
use std::fmt::Write;

/// Separator written between report sections.
pub const SECTION_RULE: &str = "---\n\n";

/// Comparison table header, including the alignment row.
pub const TABLE_HEADER: &str = "\
| Adapter | P50 (ms) | P95 (ms) | P99 (ms) | Avg (ms) | RPS | Total Reqs | Error Rate |
|---------|----------|----------|----------|----------|-----|------------|------------|
";

/// Inputs to rendering besides the results themselves.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Time the report was generated
    pub generated_at: NaiveDateTime,
    /// Static report text
    pub config: &'a ReportConfig,
}

/// A rendered report: ordered Markdown sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    sections: Vec<String>,
}

impl Report {
    /// The rendered sections in output order.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// The full Markdown document.
    pub fn to_markdown(&self) -> String {
        self.sections.join(SECTION_RULE)
    }
}

/// Render the full report for a non-empty results table.
pub fn render(table: &ResultsTable, ctx: &RenderContext<'_>) -> Result<Report> {
    if table.is_empty() {
        return Err(ReportError::EmptyResults);
    }

    Ok(Report {
        sections: vec![
            generate_header(ctx),
            generate_comparison_section(table),
            generate_winner_analysis(table),
            generate_detailed_metrics(table),
            generate_environment(ctx.config),
        ],
    })
}

/// Title, generation time and scenario line.
pub fn generate_header(ctx: &RenderContext<'_>) -> String {
    let mut output = String::new();

    writeln!(output, "# {}", ctx.config.title).unwrap();
    writeln!(output).unwrap();
    writeln!(
        output,
        "**Generated**: {}",
        ctx.generated_at.format("%Y-%m-%d %H:%M:%S")
    )
    .unwrap();
    writeln!(output).unwrap();
    writeln!(output, "**Test Scenario**: {}", ctx.config.scenario).unwrap();
    writeln!(output).unwrap();

    output
}

fn generate_comparison_section(table: &ResultsTable) -> String {
    let mut output = String::new();

    writeln!(output, "## Comparison Table").unwrap();
    writeln!(output).unwrap();
    output.push_str(&generate_comparison_table(table));
    writeln!(output).unwrap();

    output
}

/// Comparison table ranked by p95, lowest first.
pub fn generate_comparison_table(table: &ResultsTable) -> String {
    let mut output = String::from(TABLE_HEADER);

    for (adapter, m) in table.ranked_by_p95() {
        writeln!(
            output,
            "| {:20} | {:8.2} | {:8.2} | {:8.2} | {:8.2} | {:7.2} | {:10} | {:6.2}% |",
            adapter, m.p50, m.p95, m.p99, m.avg, m.rps, m.total_requests, m.error_rate
        )
        .unwrap();
    }

    output
}

/// Latency and throughput winners plus every adapter's error rate.
pub fn generate_winner_analysis(table: &ResultsTable) -> String {
    let mut output = String::new();

    writeln!(output, "## Performance Analysis").unwrap();
    writeln!(output).unwrap();

    if let Some((adapter, m)) = table.latency_winner() {
        writeln!(output, "### Latency Winner (P95)").unwrap();
        writeln!(output, "**{}**: {:.2}ms", adapter, m.p95).unwrap();
        writeln!(output).unwrap();
    }

    if let Some((adapter, m)) = table.throughput_winner() {
        writeln!(output, "### Throughput Winner (RPS)").unwrap();
        writeln!(output, "**{}**: {:.2} req/s", adapter, m.rps).unwrap();
        writeln!(output).unwrap();
    }

    writeln!(output, "### Error Rates").unwrap();
    for (adapter, m) in table.iter() {
        writeln!(output, "- **{}**: {:.2}%", adapter, m.error_rate).unwrap();
    }
    writeln!(output).unwrap();

    output
}

/// One subsection per adapter listing every metric.
pub fn generate_detailed_metrics(table: &ResultsTable) -> String {
    let mut output = String::new();

    writeln!(output, "## Detailed Metrics").unwrap();
    writeln!(output).unwrap();

    for (adapter, m) in table.iter() {
        write_adapter_details(&mut output, adapter, m);
    }

    output
}

fn write_adapter_details(output: &mut String, adapter: &str, m: &MetricSet) {
    writeln!(output, "### {}", adapter).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "- **P50**: {:.2}ms", m.p50).unwrap();
    writeln!(output, "- **P95**: {:.2}ms", m.p95).unwrap();
    writeln!(output, "- **P99**: {:.2}ms", m.p99).unwrap();
    writeln!(output, "- **Average**: {:.2}ms", m.avg).unwrap();
    writeln!(output, "- **Min**: {:.2}ms", m.min).unwrap();
    writeln!(output, "- **Max**: {:.2}ms", m.max).unwrap();
    writeln!(output, "- **RPS**: {:.2} req/s", m.rps).unwrap();
    writeln!(
        output,
        "- **Total Requests**: {}",
        group_thousands(m.total_requests)
    )
    .unwrap();
    writeln!(output, "- **Error Rate**: {:.2}%", m.error_rate).unwrap();
    writeln!(output).unwrap();
}

/// Environment footer, lines rendered verbatim as bullets.
pub fn generate_environment(config: &ReportConfig) -> String {
    let mut output = String::new();

    writeln!(output, "## Test Environment").unwrap();
    writeln!(output).unwrap();
    for line in &config.environment {
        writeln!(output, "- {}", line).unwrap();
    }

    output
}

/// Format an integer with `,` between groups of three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn metrics(p95: f64, rps: f64, error_rate: f64) -> MetricSet {
        MetricSet {
            p50: p95 / 2.0,
            p95,
            p99: p95 * 1.5,
            avg: p95 / 1.5,
            min: 1.0,
            max: p95 * 3.0,
            rps,
            total_requests: 1000,
            error_rate,
        }
    }

    fn sample_table() -> ResultsTable {
        let mut table = ResultsTable::new();
        table.insert("a", metrics(100.0, 50.0, 1.0));
        table.insert("b", metrics(50.0, 50.0, 1.0));
        table
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(22008), "22,008");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_comparison_table_rows() {
        let table = generate_comparison_table(&sample_table());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("| Adapter | P50 (ms) |"));
        assert_eq!(
            lines[2],
            "| b                    |    25.00 |    50.00 |    75.00 |    33.33 |   50.00 |       1000 |   1.00% |"
        );
        assert!(lines[3].starts_with("| a                    |"));
    }

    #[test]
    fn test_comparison_rows_non_decreasing_p95() {
        let mut table = ResultsTable::new();
        for (name, p95) in [("z", 3.0), ("m", 1.0), ("c", 2.0), ("k", 1.0)] {
            table.insert(name, metrics(p95, 1.0, 0.0));
        }
        let p95s: Vec<f64> = table.ranked_by_p95().iter().map(|(_, m)| m.p95).collect();
        assert!(p95s.windows(2).all(|w| w[0] <= w[1]));

        let rendered = generate_comparison_table(&table);
        let names: Vec<&str> = rendered
            .lines()
            .skip(2)
            .filter_map(|line| line.split('|').nth(1))
            .map(str::trim)
            .collect();
        assert_eq!(names, vec!["k", "m", "c", "z"]);
    }

    #[test]
    fn test_winner_analysis() {
        let mut table = sample_table();
        table.insert("c", metrics(70.0, 80.5, 12.346));
        let analysis = generate_winner_analysis(&table);

        assert!(analysis.contains("### Latency Winner (P95)\n**b**: 50.00ms\n"));
        assert!(analysis.contains("### Throughput Winner (RPS)\n**c**: 80.50 req/s\n"));
        assert!(analysis.contains(
            "### Error Rates\n- **a**: 1.00%\n- **b**: 1.00%\n- **c**: 12.35%\n"
        ));
    }

    #[test]
    fn test_detailed_metrics_lexical() {
        let details = generate_detailed_metrics(&sample_table());
        let a = details.find("### a").unwrap();
        let b = details.find("### b").unwrap();
        assert!(a < b);
        assert!(details.contains("- **Total Requests**: 1,000\n"));
        assert!(details.contains("- **RPS**: 50.00 req/s\n"));
        assert!(details.contains("- **Min**: 1.00ms\n"));
    }

    #[test]
    fn test_full_report_layout() {
        let config = ReportConfig::default();
        let ctx = RenderContext {
            generated_at: timestamp(),
            config: &config,
        };
        let report = render(&sample_table(), &ctx).unwrap();
        let markdown = report.to_markdown();

        assert_eq!(report.sections().len(), 5);
        assert!(markdown.starts_with(
            "# DB Performance Comparison Report\n\n**Generated**: 2024-01-01 12:00:00\n\n"
        ));
        let order = [
            "**Test Scenario**",
            "## Comparison Table",
            "## Performance Analysis",
            "## Detailed Metrics",
            "## Test Environment",
        ];
        let positions: Vec<usize> = order.iter().map(|h| markdown.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(markdown.matches(SECTION_RULE).count(), 4);
        assert!(markdown.ends_with("- **K6 Load**: 20 VUs, 2 minutes steady state\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = ReportConfig::default();
        let ctx = RenderContext {
            generated_at: timestamp(),
            config: &config,
        };
        let first = render(&sample_table(), &ctx).unwrap();
        let second = render(&sample_table(), &ctx).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_empty_table_rejected() {
        let config = ReportConfig::default();
        let ctx = RenderContext {
            generated_at: timestamp(),
            config: &config,
        };
        let err = render(&ResultsTable::new(), &ctx).unwrap_err();
        assert!(matches!(err, ReportError::EmptyResults));
    }
}
