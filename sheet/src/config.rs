use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

const FILENAME: &str = "config.toml";
const APP_DIR: &str = "worksheet";

pub const DEFAULT_PX_PER_MM: f64 = 4.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub fonts: FontConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Raster resolution for PNG output and ink replay.
    pub px_per_mm: f64,
    /// Output format of `export`.
    pub format: Format,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            px_per_mm: DEFAULT_PX_PER_MM,
            format: Format::Pdf,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Extra font file loaded after the embedded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Also load the fonts installed on the system.
    pub system: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            path: None,
            system: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Svg,
    Png,
    #[default]
    Pdf,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Svg => "svg",
            Format::Png => "png",
            Format::Pdf => "pdf",
        }
    }

    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?;
        [Format::Svg, Format::Png, Format::Pdf]
            .into_iter()
            .find(|f| ext.eq_ignore_ascii_case(f.extension()))
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(FILENAME))
    }

    /// Read `explicit`, or the default location. A missing default file
    /// yields the defaults; a missing explicit one is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).with_context(|| "Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.render.px_per_mm, 4.0);
        assert_eq!(config.render.format, Format::Pdf);
        assert!(config.fonts.system);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [render]
            format = "png"

            [fonts]
            path = "/tmp/font.otf"
            "#,
        )
        .unwrap();
        assert_eq!(config.render.format, Format::Png);
        assert_eq!(config.render.px_per_mm, 4.0);
        assert_eq!(config.fonts.path, Some(PathBuf::from("/tmp/font.otf")));
        assert!(config.fonts.system);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(toml::from_str::<Config>("[render]\nformat = \"gif\"").is_err());
    }

    #[test]
    fn shown_config_reads_back() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.PDF")), Some(Format::Pdf));
        assert_eq!(Format::from_path(Path::new("page.svg")), Some(Format::Svg));
        assert_eq!(Format::from_path(Path::new("page")), None);
        assert_eq!(Format::from_path(Path::new("page.jpg")), None);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("worksheet-no-such-config.toml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
