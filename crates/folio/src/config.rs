//! Optional `folio.toml` site configuration.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use folio_static::Portrait;

/// Configuration file structure (folio.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub build: BuildSection,
}

#[derive(Debug, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
    /// Profile image shown on the index page
    pub portrait: Option<Portrait>,
}

#[derive(Debug, Deserialize)]
pub struct BuildSection {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_assets")]
    pub assets: String,
    /// Stylesheet to inline into every page
    pub stylesheet: Option<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: String::new(),
            theme_color: default_theme_color(),
            portrait: None,
        }
    }
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
            assets: default_assets(),
            stylesheet: None,
        }
    }
}

fn default_title() -> String {
    "Site".to_string()
}
fn default_theme_color() -> String {
    "#101723".to_string()
}
fn default_source() -> String {
    ".".to_string()
}
fn default_output() -> String {
    "build".to_string()
}
fn default_assets() -> String {
    "static".to_string()
}

/// Load configuration from `path` if it exists, falling back to defaults.
/// A config file that exists but does not parse is an error.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let config: ConfigFile = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}
