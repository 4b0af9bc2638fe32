//! Display theme: font choice and primary colour, with hex/HSL conversion.
//!
//! The theme is a plain value. Start from [`ThemeConfig::default`], apply a
//! user's saved overrides with [`ThemeConfig::with_overrides`], and pass the
//! result to whatever renders.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::ColorError;

/// Typeface used by the directory UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontChoice {
    #[default]
    Inter,
    Roboto,
    OpenSans,
    SystemUi,
}

impl FontChoice {
    /// CSS `font-family` stack.
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontChoice::Inter => "\"Inter\", sans-serif",
            FontChoice::Roboto => "\"Roboto\", sans-serif",
            FontChoice::OpenSans => "\"Open Sans\", sans-serif",
            FontChoice::SystemUi => "system-ui, -apple-system, sans-serif",
        }
    }
}

/// Resolved theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// UI typeface.
    pub font: FontChoice,

    /// Primary colour as `#rrggbb`.
    pub primary_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            font: FontChoice::default(),
            primary_color: "#3b82f6".to_string(),
        }
    }
}

/// User overrides saved separately from the base theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontChoice>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
}

impl ThemeConfig {
    /// Apply overrides, validating any colour they carry.
    pub fn apply(mut self, overrides: &ThemeOverrides) -> Result<Self, ColorError> {
        if let Some(font) = overrides.font {
            self.font = font;
        }
        if let Some(color) = &overrides.primary_color {
            self.primary_color = Rgb::from_hex(color)?.to_hex();
        }
        Ok(self)
    }

    /// Load overrides from a JSON file and apply them.
    ///
    /// A missing file leaves the theme unchanged.
    pub fn with_overrides(self, path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            debug!("No theme overrides at {}", path.display());
            return Ok(self);
        }

        let content = std::fs::read_to_string(path)?;
        let overrides: ThemeOverrides = serde_json::from_str(&content)?;
        Ok(self.apply(&overrides)?)
    }

    /// Primary colour in HSL.
    pub fn primary_hsl(&self) -> Result<Hsl, ColorError> {
        Ok(Hsl::from_rgb(Rgb::from_hex(&self.primary_color)?))
    }

    /// CSS custom properties for the theme.
    pub fn css_variables(&self) -> Result<String, ColorError> {
        Ok(format!(
            "--font-sans: {};\n--primary: {};\n",
            self.font.css_stack(),
            self.primary_hsl()?.to_css_components()
        ))
    }
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb`; the `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lower-case `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// HSL colour: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn from_rgb(rgb: Rgb) -> Self {
        let r = f64::from(rgb.r) / 255.0;
        let g = f64::from(rgb.g) / 255.0;
        let b = f64::from(rgb.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Self { h: 0.0, s: 0.0, l: l * 100.0 };
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self {
            h: h * 60.0,
            s: s * 100.0,
            l: l * 100.0,
        }
    }

    pub fn to_rgb(&self) -> Rgb {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;

        if s == 0.0 {
            let v = to_u8(l);
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgb::new(
            to_u8(hue_to_channel(p, q, h + 1.0 / 3.0)),
            to_u8(hue_to_channel(p, q, h)),
            to_u8(hue_to_channel(p, q, h - 1.0 / 3.0)),
        )
    }

    /// `h s% l%` as used inside CSS custom properties.
    pub fn to_css_components(&self) -> String {
        format!("{:.0} {:.0}% {:.0}%", self.h, self.s, self.l)
    }
}

impl std::fmt::Display for Hsl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hsl({})", self.to_css_components())
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
