//! Nearby command - list venues within a radius of a point.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use mapcoord_core::{filter_by_distance, load_venues, Coordinate, NearbyVenue};

use super::{load_config, OutputFormat};

/// Arguments for the nearby command.
#[derive(Args)]
pub struct NearbyArgs {
    /// JSON file containing an array of venues
    #[arg(required = true)]
    venues: PathBuf,

    /// Latitude of the search origin
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude of the search origin
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,

    /// Maximum distance in kilometres (default from config)
    #[arg(long)]
    max_km: Option<f64>,

    /// Show at most this many venues
    #[arg(long)]
    limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: NearbyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let origin = Coordinate::new(args.lat, args.lng);
    if !origin.is_in_bounds() {
        anyhow::bail!("Origin {} is out of range", origin);
    }

    let max_km = args.max_km.unwrap_or(config.distance.default_max_km);
    if !max_km.is_finite() || max_km < 0.0 {
        anyhow::bail!("Maximum distance must be non-negative, got {}", max_km);
    }

    let venues = load_venues(&args.venues)?;
    let total = venues.len();

    let mut nearby = filter_by_distance(venues, origin, max_km);
    if let Some(limit) = args.limit {
        nearby.truncate(limit);
    }

    info!("{} of {} venues within {} km of {}", nearby.len(), total, max_km, origin);

    println!("{}", format_nearby(&nearby, args.format)?);

    if nearby.is_empty() {
        eprintln!(
            "{} No venues within {} km",
            style("ℹ").blue(),
            max_km
        );
    }

    Ok(())
}

fn format_nearby(nearby: &[NearbyVenue], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(nearby)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(["id", "name", "lat", "lng", "distance_km", "address"])?;
            for entry in nearby {
                let venue = &entry.item;
                wtr.write_record([
                    venue.id.as_str(),
                    venue.name.as_str(),
                    venue.location.lat.to_string().as_str(),
                    venue.location.lng.to_string().as_str(),
                    format!("{:.3}", entry.distance_km).as_str(),
                    venue.address.as_deref().unwrap_or(""),
                ])?;
            }
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(nearby
            .iter()
            .map(|entry| {
                format!(
                    "{:>8.2} km  {}{}",
                    entry.distance_km,
                    entry.item.name,
                    entry
                        .item
                        .address
                        .as_deref()
                        .map(|a| format!(" ({})", a))
                        .unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
