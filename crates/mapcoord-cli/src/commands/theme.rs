//! Theme command - resolve the display theme.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

use mapcoord_core::models::theme::ThemeOverrides;
use mapcoord_core::{FontChoice, ThemeConfig};

use super::{config_dir, load_config};

/// Arguments for the theme command.
#[derive(Args)]
pub struct ThemeArgs {
    /// Saved overrides file (default: theme.json in the config directory)
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Primary colour as hex, applied after saved overrides
    #[arg(long)]
    color: Option<String>,

    /// Font, applied after saved overrides
    #[arg(long, value_enum)]
    font: Option<FontArg>,

    /// Print JSON instead of CSS variables
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FontArg {
    Inter,
    Roboto,
    OpenSans,
    SystemUi,
}

impl From<FontArg> for FontChoice {
    fn from(arg: FontArg) -> Self {
        match arg {
            FontArg::Inter => FontChoice::Inter,
            FontArg::Roboto => FontChoice::Roboto,
            FontArg::OpenSans => FontChoice::OpenSans,
            FontArg::SystemUi => FontChoice::SystemUi,
        }
    }
}

#[derive(Serialize)]
struct ResolvedTheme<'a> {
    #[serde(flatten)]
    theme: &'a ThemeConfig,
    font_family: &'static str,
    primary_hsl: String,
}

pub async fn run(args: ThemeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let overrides_path = args
        .overrides
        .unwrap_or_else(|| config_dir().join("theme.json"));
    info!("Theme overrides from {}", overrides_path.display());

    let theme = config
        .theme
        .with_overrides(&overrides_path)?
        .apply(&ThemeOverrides {
            font: args.font.map(Into::into),
            primary_color: args.color,
        })?;

    let hsl = theme.primary_hsl()?;

    if args.json {
        let resolved = ResolvedTheme {
            theme: &theme,
            font_family: theme.font.css_stack(),
            primary_hsl: hsl.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        print!("{}", theme.css_variables()?);
    }

    Ok(())
}
