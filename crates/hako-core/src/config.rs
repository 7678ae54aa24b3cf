use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Default JMA forecast endpoint; `{code}.json` is appended per area.
pub const DEFAULT_FORECAST_BASE_URL: &str = "https://www.jma.go.jp/bosai/forecast/data/forecast";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Forecast viewer settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Calculator settings
    #[serde(default)]
    pub calculator: CalculatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Static area dataset (centers and offices)
    pub areas_path: PathBuf,

    /// SQLite file holding areas and fetched forecasts
    pub database_path: PathBuf,

    /// HTTP timeout for a single forecast request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Requested area code -> code actually fetched
    #[serde(default = "default_area_overrides")]
    pub area_overrides: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_FORECAST_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_area_overrides() -> BTreeMap<String, String> {
    // Tokachi is published under the merged Kushiro/Nemuro/Tokachi office.
    BTreeMap::from([("014030".to_string(), "014100".to_string())])
}

impl WeatherConfig {
    fn with_dir(config_dir: &Path) -> Self {
        Self {
            base_url: default_base_url(),
            areas_path: config_dir.join("areas.json"),
            database_path: config_dir.join("weather.db"),
            timeout_secs: default_timeout_secs(),
            area_overrides: default_area_overrides(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self::with_dir(&default_config_dir())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Show the "M: x" label while memory holds a value
    #[serde(default = "default_show_memory_indicator")]
    pub show_memory_indicator: bool,
}

fn default_show_memory_indicator() -> bool {
    true
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            show_memory_indicator: default_show_memory_indicator(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hako")
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = default_config_dir();
        Self {
            weather: WeatherConfig::with_dir(&config_dir),
            calculator: CalculatorConfig::default(),
            config_dir,
        }
    }
}

impl Config {
    /// Load configuration from the user config directory, creating the default if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit file, writing defaults there if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let mut config = Self::default();
            if let Some(dir) = config_path.parent() {
                config.config_dir = dir.to_path_buf();
                config.weather = WeatherConfig::with_dir(dir);
            }
            config.save_to(config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if self.weather.timeout_secs == 0 {
            result.add_error("weather.timeout_secs", "Timeout must be greater than 0");
        } else if self.weather.timeout_secs > 300 {
            result.add_warning(
                "weather.timeout_secs",
                "Timeout is unusually long (>300 seconds)",
            );
        }

        for (requested, fetched) in &self.weather.area_overrides {
            if requested.trim().is_empty() || fetched.trim().is_empty() {
                result.add_error(
                    "weather.area_overrides",
                    format!("Empty area code in override {:?} -> {:?}", requested, fetched),
                );
            }
        }

        if !self.weather.areas_path.exists() {
            result.add_warning(
                "weather.areas_path",
                format!(
                    "Area dataset not found: {}",
                    self.weather.areas_path.display()
                ),
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the user config directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("hako");

        Ok(config_dir.join("config.toml"))
    }
}
