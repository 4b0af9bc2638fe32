//! Batch command - locate every map link listed in one or more files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use mapcoord_core::{CoordinateExtractor, Locator};

use super::{format_rows, load_config, LocateRow, OutputFormat, PairOrderArg};
use crate::http::HttpClient;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Files (or glob pattern) listing one URL per line
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Number of links resolved concurrently
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Fetch the page when a URL itself has no coordinate
    #[arg(long)]
    fetch_page: bool,

    /// Reading order for ambiguous [a,b] pairs
    #[arg(long, value_enum)]
    pair_order: Option<PairOrderArg>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Non-empty lines that are not `#` comments.
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let mut urls = Vec::new();
    for path in &files {
        let listed = parse_url_list(&fs::read_to_string(path)?);
        debug!("{} URLs in {}", listed.len(), path.display());
        urls.extend(listed);
    }

    if urls.is_empty() {
        anyhow::bail!("No URLs found in {} file(s)", files.len());
    }

    eprintln!(
        "{} Found {} URLs in {} file(s)",
        style("ℹ").blue(),
        urls.len(),
        files.len()
    );

    let mut extractor = CoordinateExtractor::from_config(&config.extraction);
    if let Some(order) = args.pair_order {
        extractor = extractor.with_pair_order(order.into());
    }
    let locator = Locator::new(extractor);
    let client = HttpClient::new(&config.network)?;
    let fetch_page = args.fetch_page || config.network.fetch_page;

    let pb = ProgressBar::new(urls.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} links")?
            .progress_chars("=>-"),
    );

    let mut results = stream::iter(urls.iter())
        .map(|url| {
            let (locator, client) = (&locator, &client);
            async move {
                let result = if fetch_page {
                    locator.locate_with_page(url, client, client).await
                } else {
                    locator.locate(url, client).await
                };
                LocateRow::new(url, &result)
            }
        })
        .buffered(args.jobs.max(1));

    let mut rows = Vec::with_capacity(urls.len());
    while let Some(row) = results.next().await {
        pb.inc(1);

        if let Some(error_msg) = &row.report.error {
            if args.continue_on_error {
                warn!("Failed to locate {}: {}", row.input, error_msg);
            } else {
                pb.abandon();
                error!("Failed to locate {}: {}", row.input, error_msg);
                anyhow::bail!("Processing failed for {}: {}", row.input, error_msg);
            }
        }

        rows.push(row);
    }

    pb.finish_and_clear();

    let output = format_rows(&rows, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let failed: Vec<&LocateRow> = rows.iter().filter(|r| !r.report.success).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} links in {:?}",
        style("✓").green(),
        rows.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} located, {} failed",
        style(rows.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed links:").red());
        for row in &failed {
            eprintln!(
                "  - {}: {}",
                row.input,
                row.report.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}
