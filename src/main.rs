mod load;
mod output;
mod parse;
mod record;
mod summary;

use clap::Parser;
use std::collections::BTreeMap;
use std::io::{self, Write};

use load::SourceBundle;
use record::MetricsRecord;
use summary::LabelSummary;

/// Summarize Timely Worlds metrics logs: scan lines for JSON metric
/// snapshots (after a `json=` marker, or bare object lines), group them by
/// label, and print per-label aggregates as JSON or CSV.
#[derive(Parser, Debug)]
#[command(name = "summarize-metrics", version, about)]
pub struct Cli {
    /// Log files to scan; none (or '-') reads standard input
    #[arg(value_name = "FILE")]
    paths: Vec<String>,

    /// Indent the JSON output
    #[arg(long, conflicts_with = "csv")]
    pretty: bool,

    /// Aggregate each input separately instead of pooling all records
    #[arg(long)]
    per_file: bool,

    /// Emit CSV rows, one per (file, label) pair; implies --per-file
    #[arg(long)]
    csv: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "summarize_metrics=warn".parse().unwrap()),
        )
        .with_writer(io::stderr)
        .init();

    tracing::debug!(?cli, "parsed CLI arguments");

    let mut out = io::stdout().lock();
    if let Err(e) = run(&cli, &mut out) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), String> {
    let bundles = load::load_metrics(&cli.paths).map_err(|e| e.to_string())?;

    if cli.csv {
        let per_source = aggregate_per_source(&bundles);
        output::write_csv(out, &per_source).map_err(|e| e.to_string())
    } else if cli.per_file {
        let per_source = aggregate_per_source(&bundles);
        output::write_per_source_json(out, &per_source, cli.pretty).map_err(|e| e.to_string())
    } else {
        let pooled: Vec<MetricsRecord> = bundles.into_iter().flat_map(|b| b.records).collect();
        let summaries = summary::summarize(&pooled);
        output::write_merged_json(out, &summaries, cli.pretty).map_err(|e| e.to_string())
    }
}

fn aggregate_per_source(bundles: &[SourceBundle]) -> Vec<(String, BTreeMap<String, LabelSummary>)> {
    bundles
        .iter()
        .map(|b| (b.source.clone(), summary::summarize(&b.records)))
        .collect()
}
