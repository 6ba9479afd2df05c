//! Console output formatting
//!
//! Renders the coordinator's [`GlobalResult`] and [`TimingSummary`] in
//! text, JSON, or CSV. The output is informational, not a stable
//! machine-readable contract.

use crate::aggregate::{GlobalResult, TimingSummary};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Format type for output presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatType {
    /// Plain text format
    Text,
    /// JSON format
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// CSV format, one row per worker
    Csv,
}

/// Output formatter for run results
pub struct OutputFormatter {
    format_type: FormatType,
}

impl OutputFormatter {
    /// Create a new formatter with the specified format type
    pub fn new(format_type: FormatType) -> Self {
        Self { format_type }
    }

    /// Format the result according to the configured format type
    pub fn format(&self, result: &GlobalResult, summary: &TimingSummary) -> String {
        match self.format_type {
            FormatType::Text => self.format_text(result, summary),
            FormatType::Json => self.format_json(result, summary),
            FormatType::JsonPretty => self.format_json_pretty(result, summary),
            FormatType::Csv => self.format_csv(result),
        }
    }

    /// Format as plain text
    fn format_text(&self, result: &GlobalResult, summary: &TimingSummary) -> String {
        let mut output = String::new();
        let workers = result.per_worker.len() as u64;
        let base = result.intervals / workers.max(1);
        let rem = result.intervals % workers.max(1);

        writeln!(&mut output, "=== Midpoint-rule pi estimate ===").unwrap();
        writeln!(
            &mut output,
            "Intervals: {} across {} workers (base {}, remainder {})",
            result.intervals, workers, base, rem
        )
        .unwrap();
        writeln!(&mut output, "Pi estimate:    {:.16}", result.pi_estimate).unwrap();
        writeln!(&mut output, "Absolute error: {:.16}", result.error_vs_pi()).unwrap();
        writeln!(
            &mut output,
            "Total elapsed: {:.6} s",
            result.total_elapsed_secs
        )
        .unwrap();
        writeln!(
            &mut output,
            "Worker time min/max/avg: {:.6} / {:.6} / {:.6} s",
            summary.min_secs, summary.max_secs, summary.avg_secs
        )
        .unwrap();
        writeln!(
            &mut output,
            "Load imbalance factor: {:.3}",
            summary.load_imbalance
        )
        .unwrap();
        writeln!(
            &mut output,
            "Parallel efficiency: {:.1}%",
            summary.parallel_efficiency_pct
        )
        .unwrap();
        writeln!(&mut output).unwrap();

        writeln!(&mut output, "Per-worker breakdown:").unwrap();
        for worker in &result.per_worker {
            writeln!(
                &mut output,
                "  worker {}: {} intervals ({:.2}%) in {:.6} s",
                worker.rank,
                worker.interval_count,
                result.work_share_pct(worker.rank),
                worker.elapsed_secs
            )
            .unwrap();
        }

        output
    }

    /// Format as JSON (non-finite metric values serialize to null)
    fn format_json(&self, result: &GlobalResult, summary: &TimingSummary) -> String {
        json!({
            "summary": summary,
            "result": result
        })
        .to_string()
    }

    /// Format as pretty-printed JSON
    fn format_json_pretty(&self, result: &GlobalResult, summary: &TimingSummary) -> String {
        let output = json!({
            "summary": summary,
            "result": result
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| output.to_string())
    }

    /// Format as CSV, one row per worker
    fn format_csv(&self, result: &GlobalResult) -> String {
        let mut output = String::new();

        writeln!(&mut output, "rank,intervals,share_pct,local_sum,elapsed_secs").unwrap();
        for worker in &result.per_worker {
            writeln!(
                &mut output,
                "{},{},{:.2},{:.16},{:.6}",
                worker.rank,
                worker.interval_count,
                result.work_share_pct(worker.rank),
                worker.local_sum,
                worker.elapsed_secs
            )
            .unwrap();
        }

        output
    }
}
