use csv::{ReaderBuilder, StringRecord};
use ecosafety_core::NodeRow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Required columns per node row; a 14th notes column is optional.
pub const NODE_COLUMNS: usize = 13;

const NUMERIC_COLUMNS: [&str; 7] = [
    "baseline_cin",
    "baseline_cout",
    "q_cms",
    "cref",
    "wsup",
    "eco_impact_score",
    "karma_per_unit",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open node file: {0}")]
    Open(#[from] std::io::Error),
    #[error("malformed node file: {0}")]
    Csv(#[from] csv::Error),
    #[error("node file has no header line")]
    MissingHeader,
    #[error("line {line}: column {column} ({name}) is not a number: {value:?}")]
    BadNumber {
        line: u64,
        column: usize,
        name: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub rows: Vec<NodeRow>,
    /// Rows dropped for having fewer than [`NODE_COLUMNS`] columns.
    pub skipped: usize,
}

pub fn load_nodes_path(path: &Path) -> Result<LoadOutcome, LoadError> {
    let file = File::open(path)?;
    load_nodes(file)
}

/// Reads a header line then one node row per line. Short rows are skipped
/// and counted; an unparseable number aborts the whole load.
pub fn load_nodes<R: Read>(reader: R) -> Result<LoadOutcome, LoadError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    if csv.headers()?.is_empty() {
        return Err(LoadError::MissingHeader);
    }

    let mut outcome = LoadOutcome::default();
    for record in csv.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if record.len() < NODE_COLUMNS {
            warn!(line, columns = record.len(), "skipping short node row");
            outcome.skipped += 1;
            continue;
        }
        outcome.rows.push(parse_row(&record, line)?);
    }

    info!(
        rows = outcome.rows.len(),
        skipped = outcome.skipped,
        "node rows loaded"
    );
    Ok(outcome)
}

fn parse_row(record: &StringRecord, line: u64) -> Result<NodeRow, LoadError> {
    let text = |i: usize| record.get(i).unwrap_or_default().to_string();
    let number = |i: usize| -> Result<f64, LoadError> {
        let raw = record.get(i).unwrap_or_default();
        raw.trim().parse::<f64>().map_err(|_| LoadError::BadNumber {
            line,
            column: i,
            name: NUMERIC_COLUMNS[i - 6],
            value: raw.to_string(),
        })
    };

    Ok(NodeRow {
        node_id: text(0),
        location: text(1),
        system: text(2),
        contaminant: text(3),
        parameter: text(4),
        unit: text(5),
        baseline_cin: number(6)?,
        baseline_cout: number(7)?,
        q_cms: number(8)?,
        cref: number(9)?,
        wsup: number(10)?,
        eco_impact_score: number(11)?,
        karma_per_unit: number(12)?,
        notes: record.get(13).map(str::to_string),
    })
}
