//! Subcommands and the output helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod nearby;
pub mod theme;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;
use tracing::debug;

use mapcoord_core::{ExtractionReport, LocateError, LocateOutcome, MapcoordConfig, PairOrder};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// How to read `[a,b]` pairs in page markup.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PairOrderArg {
    /// First number is longitude
    LngLat,
    /// First number is latitude
    LatLng,
}

impl From<PairOrderArg> for PairOrder {
    fn from(arg: PairOrderArg) -> Self {
        match arg {
            PairOrderArg::LngLat => PairOrder::LngLat,
            PairOrderArg::LatLng => PairOrder::LatLng,
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mapcoord")
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Load the explicit config file, else the default one, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<MapcoordConfig> {
    if let Some(path) = config_path {
        return Ok(MapcoordConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(MapcoordConfig::from_file(&path)?)
    } else {
        Ok(MapcoordConfig::default())
    }
}

/// One located (or failed) input, flattened for output.
#[derive(Debug, Clone, Serialize)]
pub struct LocateRow {
    pub input: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,

    #[serde(flatten)]
    pub report: ExtractionReport,

    pub from_page: bool,
}

impl LocateRow {
    pub fn new(input: &str, result: &Result<LocateOutcome, LocateError>) -> Self {
        match result {
            Ok(outcome) => Self {
                input: outcome.input.clone(),
                final_url: Some(outcome.final_url.clone()),
                report: ExtractionReport::success(&outcome.extraction),
                from_page: outcome.from_page,
            },
            Err(err) => Self {
                input: input.trim().to_string(),
                final_url: None,
                report: ExtractionReport::failure(err),
                from_page: false,
            },
        }
    }
}

const CSV_HEADER: [&str; 9] = [
    "input",
    "final_url",
    "success",
    "lat",
    "lng",
    "method_used",
    "matcher",
    "from_page",
    "error",
];

pub fn format_rows(rows: &[LocateRow], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let lines = rows
                .iter()
                .map(serde_json::to_string)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
        OutputFormat::Csv => format_csv(rows),
        OutputFormat::Text => Ok(rows.iter().map(format_text).collect::<Vec<_>>().join("\n")),
    }
}

fn format_csv(rows: &[LocateRow]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;

    for row in rows {
        let report = &row.report;
        let (lat, lng) = report
            .coordinates
            .map(|c| (c.lat.to_string(), c.lng.to_string()))
            .unwrap_or_default();

        wtr.write_record([
            row.input.as_str(),
            row.final_url.as_deref().unwrap_or(""),
            if report.success { "true" } else { "false" },
            lat.as_str(),
            lng.as_str(),
            report.method_used.map(|m| m.as_str()).unwrap_or(""),
            report.matcher.map(|m| m.as_str()).unwrap_or(""),
            if row.from_page { "true" } else { "false" },
            report.error.as_deref().unwrap_or(""),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(row: &LocateRow) -> String {
    let report = &row.report;
    match (report.coordinates, report.method_used) {
        (Some(c), Some(method)) => {
            let origin = if row.from_page { "page" } else { "url" };
            format!("{}\t{}, {}\t{} ({})", row.input, c.lat, c.lng, method, origin)
        }
        _ => format!(
            "{}\terror: {}",
            row.input,
            report.error.as_deref().unwrap_or("unknown error")
        ),
    }
}
