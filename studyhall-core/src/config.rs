use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, PAYMENT_DONE_COUNTDOWN_SECS,
    PAYMENT_PROCESSING_SECS, SEAT_REFRESH_SECS,
};

pub const APP_NAME: &str = "studyhall";

fn config_dir() -> PathBuf {
    // Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
    #[cfg(unix)]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.is_empty()
        {
            return PathBuf::from(xdg_config_home).join(APP_NAME);
        }
        dirs::home_dir()
            .expect("Unable to find home directory")
            .join(".config")
            .join(APP_NAME)
    }
    #[cfg(windows)]
    {
        dirs::config_dir()
            .expect("Unable to find config directory")
            .join(APP_NAME)
    }
}

fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Seat map refresh cadence.
    #[serde(default)]
    pub poll: PollConfig,

    /// Payment modal timings.
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the cafe backend, e.g. `http://localhost:8000`.
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "ApiConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_string()
    }

    fn default_timeout_secs() -> u64 {
        DEFAULT_HTTP_TIMEOUT_SECS
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollConfig {
    /// Seconds between background seat refreshes.
    #[serde(default = "PollConfig::default_seat_refresh_secs")]
    pub seat_refresh_secs: u64,
}

impl PollConfig {
    fn default_seat_refresh_secs() -> u64 {
        SEAT_REFRESH_SECS
    }

    pub fn seat_refresh(&self) -> Duration {
        Duration::from_secs(self.seat_refresh_secs)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            seat_refresh_secs: Self::default_seat_refresh_secs(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentConfig {
    /// Seconds the payment modal shows the processing spinner.
    #[serde(default = "PaymentConfig::default_processing_secs")]
    pub processing_secs: u8,

    /// Countdown on the done screen before auto-returning home.
    #[serde(default = "PaymentConfig::default_done_countdown_secs")]
    pub done_countdown_secs: u8,
}

impl PaymentConfig {
    fn default_processing_secs() -> u8 {
        PAYMENT_PROCESSING_SECS
    }

    fn default_done_countdown_secs() -> u8 {
        PAYMENT_DONE_COUNTDOWN_SECS
    }

    pub fn timings(&self) -> crate::modal::PaymentTimings {
        crate::modal::PaymentTimings {
            processing_secs: self.processing_secs,
            done_countdown_secs: self.done_countdown_secs,
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            processing_secs: Self::default_processing_secs(),
            done_countdown_secs: Self::default_done_countdown_secs(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Primary accent color (default: "cyan").
    #[serde(
        default = "ThemeConfig::default_accent",
        deserialize_with = "deserialize_color"
    )]
    pub accent: ThemeColor,
    /// Success/positive color (default: "green").
    #[serde(
        default = "ThemeConfig::default_success",
        deserialize_with = "deserialize_color"
    )]
    pub success: ThemeColor,
    /// Error color (default: "red").
    #[serde(
        default = "ThemeConfig::default_error",
        deserialize_with = "deserialize_color"
    )]
    pub error: ThemeColor,
    /// Warning color (default: "yellow").
    #[serde(
        default = "ThemeConfig::default_warning",
        deserialize_with = "deserialize_color"
    )]
    pub warning: ThemeColor,
    /// Muted/dim text color (default: "gray").
    #[serde(
        default = "ThemeConfig::default_muted",
        deserialize_with = "deserialize_color"
    )]
    pub muted: ThemeColor,
    /// Border color (default: "gray").
    #[serde(
        default = "ThemeConfig::default_border",
        deserialize_with = "deserialize_color"
    )]
    pub border: ThemeColor,
    /// Hint/key binding color (default: "blue").
    #[serde(
        default = "ThemeConfig::default_hint",
        deserialize_with = "deserialize_color"
    )]
    pub hint: ThemeColor,
    /// Foreground color for highlighted/selected items (default: "black").
    #[serde(
        default = "ThemeConfig::default_highlight_fg",
        deserialize_with = "deserialize_color"
    )]
    pub highlight_fg: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: Self::default_accent(),
            success: Self::default_success(),
            error: Self::default_error(),
            warning: Self::default_warning(),
            muted: Self::default_muted(),
            border: Self::default_border(),
            hint: Self::default_hint(),
            highlight_fg: Self::default_highlight_fg(),
        }
    }
}

impl ThemeConfig {
    fn default_accent() -> ThemeColor {
        ThemeColor::Named(NamedColor::Cyan)
    }
    fn default_success() -> ThemeColor {
        ThemeColor::Named(NamedColor::Green)
    }
    fn default_error() -> ThemeColor {
        ThemeColor::Named(NamedColor::Red)
    }
    fn default_warning() -> ThemeColor {
        ThemeColor::Named(NamedColor::Yellow)
    }
    fn default_muted() -> ThemeColor {
        ThemeColor::Named(NamedColor::DarkGray)
    }
    fn default_border() -> ThemeColor {
        ThemeColor::Named(NamedColor::Gray)
    }
    fn default_hint() -> ThemeColor {
        ThemeColor::Named(NamedColor::Blue)
    }
    fn default_highlight_fg() -> ThemeColor {
        ThemeColor::Named(NamedColor::Black)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    DarkGray,
}

impl NamedColor {
    /// All named colours in alphabetical order, as accepted by the config parser.
    pub const fn all() -> &'static [(&'static str, NamedColor)] {
        &[
            ("black", NamedColor::Black),
            ("blue", NamedColor::Blue),
            ("cyan", NamedColor::Cyan),
            ("darkgray", NamedColor::DarkGray),
            ("gray", NamedColor::Gray),
            ("green", NamedColor::Green),
            ("magenta", NamedColor::Magenta),
            ("red", NamedColor::Red),
            ("white", NamedColor::White),
            ("yellow", NamedColor::Yellow),
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
            Self::DarkGray => "darkgray",
        }
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(n) => f.write_str(n.as_str()),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl Serialize for ThemeColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl ThemeColor {
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#')
            && hex.len() == 6
        {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Self::Rgb(r, g, b));
        }
        let lower = s.to_lowercase();
        // Handle aliases not in the canonical list
        let lookup = match lower.as_str() {
            "grey" => "gray",
            "darkgrey" | "dark_gray" => "darkgray",
            other => other,
        };
        NamedColor::all()
            .iter()
            .find(|(name, _)| *name == lookup)
            .map(|(_, color)| Self::Named(*color))
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<ThemeColor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ThemeColor::parse(&s).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid color '{s}': expected a named color (black, red, green, yellow, blue, magenta, cyan, white, gray/grey, darkgray) or hex (#rrggbb)"
        ))
    })
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

/// Load the config file, or fall back to defaults when none exists. An
/// explicit override path must exist.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = match config_override {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let default = config_file();
            if !default.exists() {
                return Ok(Config::default());
            }
            default
        }
    };
    let contents = fs::read_to_string(&config_file)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll.seat_refresh_secs, 5);
        assert_eq!(config.payment.processing_secs, 2);
        assert_eq!(config.payment.done_countdown_secs, 5);
    }

    #[test]
    fn test_full_config() {
        let config = load_config_from_str(
            r##"
[api]
base_url = "https://cafe.example.com"
timeout_secs = 3

[poll]
seat_refresh_secs = 10

[payment]
processing_secs = 1
done_countdown_secs = 8

[theme]
accent = "magenta"
border = "#20c0a0"
"##,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://cafe.example.com");
        assert_eq!(config.api.timeout(), Duration::from_secs(3));
        assert_eq!(config.poll.seat_refresh(), Duration::from_secs(10));
        assert_eq!(config.payment.done_countdown_secs, 8);
        assert_eq!(config.theme.accent, ThemeColor::Named(NamedColor::Magenta));
        assert_eq!(config.theme.border, ThemeColor::Rgb(0x20, 0xc0, 0xa0));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = load_config_from_str("[api]\nbase_uri = \"oops\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_color_rejected() {
        let result = load_config_from_str("[theme]\naccent = \"chartreuse\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_grey_alias_accepted() {
        let config = load_config_from_str("[theme]\nmuted = \"grey\"\n").unwrap();
        assert_eq!(config.theme.muted, ThemeColor::Named(NamedColor::Gray));
    }

    #[test]
    fn test_load_config_missing_override_fails() {
        let result = load_config(Some(Path::new("/nonexistent/config.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[api]\nbase_url = \"http://10.0.0.5:8000\"").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:8000");
    }
}
