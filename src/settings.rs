use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_CATEGORIES: &[&str] = &["Tecnología", "Electrodomésticos", "Bazar-y-decoración"];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub base_url: String,
    pub platform: String,
    pub country: String,
    pub timeout_secs: u64,
    pub categories: Vec<String>,
}

impl Settings {
    /// Defaults, then `SOS_*` variables, then plain `OUTPUT_DIR`.
    pub fn load() -> Result<Self> {
        build(None, std::env::var("OUTPUT_DIR").ok())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn build(env: Option<config::Map<String, String>>, output_dir: Option<String>) -> Result<Settings> {
    let categories: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();

    let settings = Config::builder()
        .set_default("output_dir", "./outputs")?
        .set_default("base_url", "https://www.cetrogar.com.ar")?
        .set_default("platform", "Cetrogar")?
        .set_default("country", "Argentina")?
        .set_default("timeout_secs", 30)?
        .set_default("categories", categories)?
        .add_source(
            Environment::with_prefix("SOS")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("categories")
                .source(env),
        )
        .set_override_option("output_dir", output_dir.filter(|d| !d.is_empty()))?
        .build()
        .context("Failed to load settings")?;

    settings
        .try_deserialize()
        .context("Invalid settings")
}
