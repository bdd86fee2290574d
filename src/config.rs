/// Service configuration loader - parses vrijeme.toml
///
/// Keeps the target city, feed URLs, and output locations out of the code
/// so the page can be built for another city or written somewhere else
/// without recompiling. Every field has a default, so a missing file (or a
/// file that only sets `city`) is enough to run.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "vrijeme.toml";

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_VAR: &str = "VRIJEME_CONFIG";
/// Environment variable overriding the configured city.
pub const CITY_VAR: &str = "VRIJEME_CITY";

pub const GENERAL_WEATHER_SOURCE: &str = "https://vrijeme.hr/hrvatska_n.xml";
pub const UVI_SOURCE: &str = "https://vrijeme.hr/uvi.xml";
pub const SEA_TEMPERATURE_SOURCE: &str = "https://vrijeme.hr/more_n.xml";

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Station name looked up in all three feeds.
    pub city: String,
    pub sources: SourceConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
    /// Fetch the three feeds concurrently. Output is identical either way.
    pub parallel_fetch: bool,
}

/// Feed URLs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub general: String,
    pub uv: String,
    pub sea: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Template location and rendered page destination
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub template_dir: PathBuf,
    pub template_name: String,
    pub path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            city: "Malinska".to_string(),
            sources: SourceConfig::default(),
            http: HttpConfig::default(),
            output: OutputConfig::default(),
            parallel_fetch: false,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            general: GENERAL_WEATHER_SOURCE.to_string(),
            uv: UVI_SOURCE.to_string(),
            sea: SEA_TEMPERATURE_SOURCE.to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("vrijeme_page/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("templates"),
            template_name: "template.html".to_string(),
            path: PathBuf::from("public/index.html"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

impl AppConfig {
    /// Parses configuration from TOML text. Absent fields keep their defaults.
    pub fn from_toml(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist. Any other read failure is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();

        match fs::read_to_string(path) {
            Ok(contents) => {
                tracing::info!("loaded configuration from {}", origin);
                Self::from_toml(&contents, &origin)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("{} not found, using built-in defaults", origin);
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path: origin, source }),
        }
    }

    /// Replaces the city when an override is given and non-blank.
    pub fn with_city_override(mut self, city: Option<String>) -> Self {
        if let Some(city) = city.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()) {
            tracing::info!("city overridden to {}", city);
            self.city = city;
        }
        self
    }
}

/// Loads configuration the way the binary does.
///
/// Reads `.env` if present, then the file named by `VRIJEME_CONFIG`
/// (default `vrijeme.toml` in the working directory), then applies
/// `VRIJEME_CITY`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenv::dotenv().ok();

    let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = AppConfig::load_from(Path::new(&path))?;

    Ok(config.with_city_override(env::var(CITY_VAR).ok()))
}
