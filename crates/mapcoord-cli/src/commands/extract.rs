//! Extract command - locate a single map link.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use mapcoord_core::{
    CoordinateExtractor, ExtractionReport, LocateError, LocateOutcome, Locator, MapcoordConfig,
};

use super::{format_rows, load_config, LocateRow, OutputFormat, PairOrderArg};
use crate::http::{HttpClient, StaticPage};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Map URL (or, with --raw, any text) to scan
    #[arg(required = true)]
    input: String,

    /// Scan the input as plain text without classifying it as a URL
    #[arg(long, conflicts_with_all = ["page_file", "fetch_page"])]
    raw: bool,

    /// Markup to scan when the URL itself has no coordinate
    #[arg(long)]
    page_file: Option<PathBuf>,

    /// Fetch the page when the URL itself has no coordinate
    #[arg(long)]
    fetch_page: bool,

    /// Reading order for ambiguous [a,b] pairs
    #[arg(long, value_enum)]
    pair_order: Option<PairOrderArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut extractor = CoordinateExtractor::from_config(&config.extraction);
    if let Some(order) = args.pair_order {
        extractor = extractor.with_pair_order(order.into());
    }

    let row = if args.raw {
        info!("Scanning {} characters of raw text", args.input.len());
        let result = extractor.extract(&args.input);
        LocateRow {
            input: args.input.clone(),
            final_url: None,
            report: ExtractionReport::from_result(&result),
            from_page: false,
        }
    } else {
        let result = locate(&args, &config, Locator::new(extractor)).await?;
        LocateRow::new(&args.input, &result)
    };

    let output = format_rows(std::slice::from_ref(&row), args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    match row.report.error {
        Some(error) => anyhow::bail!(error),
        None => Ok(()),
    }
}

async fn locate(
    args: &ExtractArgs,
    config: &MapcoordConfig,
    locator: Locator,
) -> anyhow::Result<Result<LocateOutcome, LocateError>> {
    let client = HttpClient::new(&config.network)?;

    if let Some(page_file) = &args.page_file {
        let markup = fs::read_to_string(page_file)?;
        debug!("Read {} bytes of markup from {}", markup.len(), page_file.display());
        return Ok(locator
            .locate_with_page(&args.input, &client, &StaticPage(markup))
            .await);
    }

    if args.fetch_page || config.network.fetch_page {
        Ok(locator.locate_with_page(&args.input, &client, &client).await)
    } else {
        Ok(locator.locate(&args.input, &client).await)
    }
}
