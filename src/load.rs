/// Input loading: scan one or more log sources for labeled metric records.
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use crate::parse;
use crate::record::MetricsRecord;

/// Distinguished path argument that selects standard input.
pub const STDIN_SOURCE: &str = "-";

/// All valid records extracted from one input source, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBundle {
    pub source: String,
    pub records: Vec<MetricsRecord>,
}

/// Load every input into a bundle of valid records.
///
/// With no paths, standard input becomes the single source `-`. The stdin
/// marker cannot be combined with named files; that conflict is rejected
/// before any file is opened or any line read. Lines that don't carry a
/// labeled metric payload are skipped silently; only I/O failures and the
/// stdin conflict are errors.
pub fn load_metrics(paths: &[String]) -> Result<Vec<SourceBundle>, LoadError> {
    let paths: Vec<String> = if paths.is_empty() {
        vec![STDIN_SOURCE.to_string()]
    } else {
        paths.to_vec()
    };

    if paths.len() > 1 && paths.iter().any(|p| p == STDIN_SOURCE) {
        return Err(LoadError::StdinConflict);
    }

    let mut bundles = Vec::with_capacity(paths.len());
    for path in &paths {
        let records = if path == STDIN_SOURCE {
            scan_records(io::stdin().lock(), path)?
        } else {
            let file = File::open(path).map_err(|e| LoadError::Open {
                path: path.clone(),
                source: e,
            })?;
            scan_records(BufReader::new(file), path)?
        };
        tracing::debug!(source = %path, records = records.len(), "scanned input");
        bundles.push(SourceBundle {
            source: path.clone(),
            records,
        });
    }

    Ok(bundles)
}

/// Scan one reader line-by-line for labeled metric records.
///
/// Lines are processed incrementally; nothing beyond the kept records is
/// retained. A payload that parses but lacks a `label` is dropped here,
/// keeping the line parser purely syntactic.
fn scan_records<R: BufRead>(reader: R, path: &str) -> Result<Vec<MetricsRecord>, LoadError> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line.map_err(|e| LoadError::Read {
            path: path.to_string(),
            source: e,
        })?;
        match parse::parse_line(&line).and_then(MetricsRecord::from_value) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(source = %path, skipped, "lines without labeled payloads");
    }
    Ok(records)
}

/// Errors from loading metric sources.
#[derive(Debug)]
pub enum LoadError {
    /// `-` (stdin) appeared alongside other paths in the same invocation.
    StdinConflict,
    Open {
        path: String,
        source: io::Error,
    },
    Read {
        path: String,
        source: io::Error,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::StdinConflict => {
                write!(f, "stdin ('-') cannot be combined with other paths")
            }
            LoadError::Open { path, source } => write!(f, "failed to open {path}: {source}"),
            LoadError::Read { path, source } => write!(f, "failed to read {path}: {source}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::StdinConflict => None,
            LoadError::Open { source, .. } | LoadError::Read { source, .. } => Some(source),
        }
    }
}
