//! Command-line arguments layered over an optional JSON settings file.
//!
//! The settings file lives at `<config_dir>/country-map/config.json`. Every
//! field is optional; missing fields take their defaults. Command-line flags
//! win over the file.

use crate::data::DatasetSource;
use crate::error::{MapError, Result};
use crate::logging::LogConfig;
use crate::route::Route;
use crate::widget::WorldMapProps;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "country-map";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "country-map.log";
pub const DATASET_FILE: &str = "ne_110m_admin_0_countries.geojson";
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/v5.1.2/geojson/ne_110m_admin_0_countries.geojson";

#[derive(Parser, Debug, Default)]
#[command(
    name = "country-map",
    version,
    about = "Interactive world map country selector for the terminal",
    long_about = "Pick a country on a braille world map.\n\n\
                  Hover shows country names, click selects, drag pans and the\n\
                  scroll wheel zooms. `g` switches to the example gallery."
)]
pub struct Cli {
    /// Start route, e.g. "/?country=Japan" or "/examples".
    #[arg(long, value_name = "PATH", conflicts_with = "examples")]
    pub route: Option<String>,

    /// Start on the example gallery.
    #[arg(long)]
    pub examples: bool,

    /// Country the main map starts on.
    #[arg(long, value_name = "NAME")]
    pub country: Option<String>,

    /// ISO 3166-1 alpha-2 code the main map starts on (ignored with --country).
    #[arg(long, value_name = "CODE")]
    pub code: Option<String>,

    /// Give the main map private state instead of the shared store.
    #[arg(long)]
    pub standalone: bool,

    /// Hide every country except the selected one.
    #[arg(long = "hide-unselected")]
    pub hide_unselected: bool,

    /// Directory holding the boundary GeoJSON.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Download the boundary GeoJSON when it is not on disk.
    #[arg(long)]
    pub fetch: bool,

    /// URL to download boundaries from.
    #[arg(long = "dataset-url", value_name = "URL")]
    pub dataset_url: Option<String>,

    /// Settings file (default: <config dir>/country-map/config.json).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the effective settings back to the settings file.
    #[arg(long = "save-config")]
    pub save_config: bool,

    /// Log filter, e.g. "debug" or "country_map=trace". RUST_LOG wins.
    #[arg(long = "log-level", value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Log file path.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Persistent settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub dataset_url: String,
    pub fetch: bool,
    pub show_unselected: bool,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from("data")),
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            fetch: false,
            show_unselected: true,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(LOG_FILE))
    }
}

/// Default settings file location.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}

/// Read settings. A missing file yields defaults; an unreadable or invalid
/// one is an error.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(MapError::FileRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&text).map_err(|source| MapError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Write settings, creating the parent directory if needed.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    let write_err = |source: std::io::Error| MapError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let text = serde_json::to_string_pretty(settings).map_err(|source| MapError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(write_err)?;
    info!(path = %path.display(), "settings saved");
    Ok(())
}

/// Everything the app needs to start.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub settings: Settings,
    pub settings_path: Option<PathBuf>,
    pub start: Route,
    pub map: WorldMapProps,
    pub save: bool,
}

impl Config {
    /// Merge the command line over the settings file.
    pub fn resolve(cli: Cli) -> Result<Self> {
        let settings_path = cli.config.clone().or_else(config_path);
        let settings = match &settings_path {
            Some(path) => load_settings(path)?,
            None => Settings::default(),
        };
        Self::merge(cli, settings, settings_path)
    }

    fn merge(cli: Cli, mut settings: Settings, settings_path: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = cli.data_dir {
            settings.data_dir = dir;
        }
        if let Some(url) = cli.dataset_url {
            settings.dataset_url = url;
        }
        if let Some(level) = cli.log_level {
            settings.log_level = level;
        }
        if cli.log_file.is_some() {
            settings.log_file = cli.log_file;
        }
        settings.fetch |= cli.fetch;
        if cli.hide_unselected {
            settings.show_unselected = false;
        }

        let start = match (cli.examples, cli.route) {
            (true, _) => Route::Examples,
            (false, Some(route)) => Route::parse(&route)?,
            (false, None) => Route::default(),
        };

        let map = WorldMapProps {
            initial_country: cli.country,
            init_country_code: cli.code,
            default_show_unselected: settings.show_unselected,
            standalone: cli.standalone,
        };

        Ok(Self {
            settings,
            settings_path,
            start,
            map,
            save: cli.save_config,
        })
    }

    pub fn dataset_source(&self) -> DatasetSource {
        DatasetSource {
            file: self.settings.data_dir.join(DATASET_FILE),
            url: self.settings.dataset_url.clone(),
            fetch: self.settings.fetch,
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.settings.log_level.clone(),
            file: self.settings.log_file(),
        }
    }
}
