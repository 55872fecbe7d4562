//! Rendering of summary maps: merged JSON, per-source JSON, and flat CSV.
//!
//! All writers take any `io::Write` sink. JSON output is newline-terminated;
//! an empty summary renders as `{}`, never as an error.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;

use crate::summary::LabelSummary;

/// Fixed CSV column order, independent of which fields any summary carries.
const CSV_HEADER: [&str; 11] = [
    "file",
    "label",
    "count",
    "base_events",
    "predicted_events",
    "scenario_created",
    "scenario_retired",
    "scenario_alerts",
    "scenario_active_peak",
    "avg_elapsed_ms",
    "avg_base_throughput_per_sec",
];

/// Write the pooled label → summary map as one JSON object.
pub fn write_merged_json<W: Write>(
    out: &mut W,
    summaries: &BTreeMap<String, LabelSummary>,
    pretty: bool,
) -> Result<(), OutputError> {
    let rendered = render_json(summaries, pretty)?;
    writeln!(out, "{rendered}").map_err(|e| OutputError::Io { source: e })
}

/// Write one JSON object keyed by source, each value a label → summary map.
///
/// Sources with no valid records are left out entirely; if a source appears
/// more than once, the later occurrence owns the key.
pub fn write_per_source_json<W: Write>(
    out: &mut W,
    summaries: &[(String, BTreeMap<String, LabelSummary>)],
    pretty: bool,
) -> Result<(), OutputError> {
    let populated: BTreeMap<&str, &BTreeMap<String, LabelSummary>> = summaries
        .iter()
        .filter(|(_, labels)| !labels.is_empty())
        .map(|(source, labels)| (source.as_str(), labels))
        .collect();

    let rendered = render_json(&populated, pretty)?;
    writeln!(out, "{rendered}").map_err(|e| OutputError::Io { source: e })
}

/// Write one CSV row per (source, label) pair, sources in bundle order.
///
/// The header row is written even when there are no data rows. Counter
/// totals a summary lacks are zero-filled; the two averages stay blank when
/// they were not computed.
pub fn write_csv<W: Write>(
    out: &mut W,
    summaries: &[(String, BTreeMap<String, LabelSummary>)],
) -> Result<(), OutputError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| OutputError::Csv { source: e })?;

    for (source, labels) in summaries {
        for (label, summary) in labels {
            writer
                .serialize(CsvRow::new(source, label, summary))
                .map_err(|e| OutputError::Csv { source: e })?;
        }
    }

    writer.flush().map_err(|e| OutputError::Io { source: e })
}

fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, OutputError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| OutputError::Json { source: e })
}

/// One flattened (source, label) row in the fixed column order.
#[derive(Serialize)]
struct CsvRow<'a> {
    file: &'a str,
    label: &'a str,
    count: usize,
    base_events: f64,
    predicted_events: f64,
    scenario_created: f64,
    scenario_retired: f64,
    scenario_alerts: f64,
    scenario_active_peak: f64,
    avg_elapsed_ms: Option<f64>,
    avg_base_throughput_per_sec: Option<f64>,
}

impl<'a> CsvRow<'a> {
    fn new(file: &'a str, label: &'a str, summary: &LabelSummary) -> Self {
        CsvRow {
            file,
            label,
            count: summary.count,
            base_events: summary.base_events.unwrap_or(0.0),
            predicted_events: summary.predicted_events.unwrap_or(0.0),
            scenario_created: summary.scenario_created.unwrap_or(0.0),
            scenario_retired: summary.scenario_retired.unwrap_or(0.0),
            scenario_alerts: summary.scenario_alerts.unwrap_or(0.0),
            scenario_active_peak: summary.scenario_active_peak.unwrap_or(0.0),
            avg_elapsed_ms: summary.avg_elapsed_ms,
            avg_base_throughput_per_sec: summary.avg_base_throughput_per_sec,
        }
    }
}

/// Errors from rendering or writing output.
#[derive(Debug)]
pub enum OutputError {
    Json { source: serde_json::Error },
    Csv { source: csv::Error },
    Io { source: io::Error },
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Json { source } => write!(f, "failed to encode summary JSON: {source}"),
            OutputError::Csv { source } => write!(f, "failed to write CSV: {source}"),
            OutputError::Io { source } => write!(f, "failed to write output: {source}"),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Json { source } => Some(source),
            OutputError::Csv { source } => Some(source),
            OutputError::Io { source } => Some(source),
        }
    }
}
