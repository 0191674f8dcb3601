//! Calendar configuration: the unlock window and the static-site paths.
//!
//! The window is static configuration read once at startup. Validation happens
//! when the [`ConfiguredWindow`] is built, so an invalid timezone or item count
//! never reaches the renderer.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Config file discovered in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "advent.toml";

pub const DEFAULT_START_YEAR: i32 = 2025;
pub const DEFAULT_START_MONTH: u32 = 12;
pub const DEFAULT_ITEM_COUNT: i64 = 24;
pub const DEFAULT_TIMEZONE: &str = "Europe/Madrid";

/// Largest item count a single month can unlock.
const MAX_ITEM_COUNT: u32 = 31;

/// The validated unlock window.
///
/// Days `1..=item_count` of `start_month` in `start_year` map to items
/// `1..=item_count`, evaluated in `timezone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfiguredWindow {
    start_year: i32,
    start_month: u32,
    item_count: u32,
    timezone: Tz,
}

impl ConfiguredWindow {
    /// Build a window, rejecting anything that could yield a partial grid.
    pub fn new(
        start_year: i32,
        start_month: u32,
        item_count: i64,
        timezone: &str,
    ) -> Result<Self, ConfigError> {
        if !(1..=12).contains(&start_month) {
            return Err(ConfigError::MonthOutOfRange(start_month));
        }
        if item_count < 1 {
            return Err(ConfigError::NonPositiveItemCount(item_count));
        }
        let item_count = match u32::try_from(item_count) {
            Ok(count) if count <= MAX_ITEM_COUNT => count,
            Ok(count) => return Err(ConfigError::ItemCountTooLarge(count)),
            Err(_) => return Err(ConfigError::ItemCountTooLarge(u32::MAX)),
        };
        let timezone =
            Tz::from_str(timezone).map_err(|_| ConfigError::InvalidTimezone(timezone.to_string()))?;

        Ok(Self {
            start_year,
            start_month,
            item_count,
            timezone,
        })
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

/// `[calendar]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Year in which the window opens.
    pub start_year: i32,
    /// Month (1-12) whose days unlock the items.
    pub start_month: u32,
    /// Number of tiles.
    pub item_count: i64,
    /// IANA timezone the unlock dates are evaluated in.
    pub timezone: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            start_month: DEFAULT_START_MONTH,
            item_count: DEFAULT_ITEM_COUNT,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

/// `[site]` section: where the static calendar page goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Output file for the rendered calendar page.
    pub output: String,
    /// Page title.
    pub title: String,
    /// Directory (relative to the page) holding the `day-NN.html` pages.
    pub days_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output: "public/index.html".to_string(),
            title: "Advent Calendar".to_string(),
            days_dir: "days".to_string(),
        }
    }
}

/// `[embed]` section: inputs of the image embedding build step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    pub pages_dir: String,
    pub images_dir: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            pages_dir: "raw_src/raw_days".to_string(),
            images_dir: "raw_src/raw_days/images".to_string(),
        }
    }
}

/// Top-level `advent.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub calendar: CalendarConfig,
    pub site: SiteConfig,
    pub embed: EmbedConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load from an explicit path, or from `advent.toml` in the working
    /// directory, falling back to defaults when neither exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        let discovered = Path::new(CONFIG_FILE_NAME);
        if discovered.is_file() {
            Self::load_from_path(discovered)
        } else {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.source_path = Some(path.to_path_buf());
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Validate the `[calendar]` section into an unlock window.
    pub fn window(&self) -> Result<ConfiguredWindow, ConfigError> {
        let cal = &self.calendar;
        ConfiguredWindow::new(cal.start_year, cal.start_month, cal.item_count, &cal.timezone)
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise None.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved against the config file location, or the CWD
    pub fn resolve_path(&self, path_str: &str) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            match self.base_dir() {
                Some(base) => base.join(path),
                None => path.to_path_buf(),
            }
        }
    }

    /// Serialize to the TOML written by `advent init`.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_valid() {
        let window = Config::default().window().unwrap();
        assert_eq!(window.start_year(), 2025);
        assert_eq!(window.start_month(), 12);
        assert_eq!(window.item_count(), 24);
        assert_eq!(window.timezone(), chrono_tz::Europe::Madrid);
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let err = ConfiguredWindow::new(2025, 12, 24, "Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimezone(ref tz) if tz == "Mars/Olympus_Mons"));
    }

    #[test]
    fn test_item_count_bounds() {
        assert!(matches!(
            ConfiguredWindow::new(2025, 12, 0, "UTC"),
            Err(ConfigError::NonPositiveItemCount(0))
        ));
        assert!(matches!(
            ConfiguredWindow::new(2025, 12, -3, "UTC"),
            Err(ConfigError::NonPositiveItemCount(-3))
        ));
        assert!(matches!(
            ConfiguredWindow::new(2025, 12, 32, "UTC"),
            Err(ConfigError::ItemCountTooLarge(32))
        ));
        assert!(ConfiguredWindow::new(2025, 12, 31, "UTC").is_ok());
        assert!(ConfiguredWindow::new(2025, 12, 1, "UTC").is_ok());
    }

    #[test]
    fn test_month_out_of_range() {
        assert!(matches!(
            ConfiguredWindow::new(2025, 13, 24, "UTC"),
            Err(ConfigError::MonthOutOfRange(13))
        ));
        assert!(matches!(
            ConfiguredWindow::new(2025, 0, 24, "UTC"),
            Err(ConfigError::MonthOutOfRange(0))
        ));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("advent.toml");
        fs::write(
            &path,
            "[calendar]\nstart_year = 2026\ntimezone = \"America/New_York\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.calendar.start_year, 2026);
        assert_eq!(config.calendar.start_month, 12);
        assert_eq!(config.calendar.item_count, 24);
        assert_eq!(config.site, SiteConfig::default());
        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));

        let window = config.window().unwrap();
        assert_eq!(window.timezone(), chrono_tz::America::New_York);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("advent.toml");
        fs::write(&path, "[calendar\nstart_year = ").unwrap();

        assert!(matches!(
            Config::load_from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(path.as_path())),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_resolve_path_relative_to_config() {
        let config = Config {
            source_path: Some(PathBuf::from("/srv/advent/advent.toml")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_path("public/index.html"),
            PathBuf::from("/srv/advent/public/index.html")
        );
        assert_eq!(config.resolve_path("/tmp/x"), PathBuf::from("/tmp/x"));

        let no_source = Config::default();
        assert_eq!(no_source.resolve_path("days"), PathBuf::from("days"));
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let text = Config::default().to_toml_string().unwrap();
        assert!(text.contains("[calendar]"));
        assert!(text.contains("timezone = \"Europe/Madrid\""));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
