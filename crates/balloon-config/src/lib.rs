//! Balloon widget configuration
//!
//! Loads tooltip style, settle-retry timing and popover text from `balloon.toml`,
//! with `BALLOON_*` environment variables as overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "balloon.toml";

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BalloonConfig {
    /// Balloon geometry and colors
    pub tooltip: TooltipStyleConfig,
    /// Delayed re-positioning passes after open/resize
    pub settle: SettleConfig,
    /// Popover input dialog text and options
    pub popover: PopoverConfig,
    /// Demo binary settings
    pub demo: DemoConfig,
}

/// Raw tooltip style as authored. Colors are CSS strings; validation happens
/// once when the widget converts this into its immutable style.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TooltipStyleConfig {
    /// Corner radius in CSS pixels
    pub radius: f32,
    /// Distance from the balloon edge to the tip apex
    pub tip_height: f32,
    /// Width of the tip where it meets the balloon
    pub tip_base: f32,
    pub header_color: String,
    pub body_color: String,
    pub border_color: String,
    pub shadow_color: String,
    /// Horizontal inset reserved on each side for the drop shadow
    pub shadow_margin: f32,
    /// Stroke the balloon outline with `border_color` (off by default)
    pub stroke_border: bool,
}

/// Settle-retry policy: extra positioning passes fired after open and after resize
/// to pick up layout metrics that arrive late.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettleConfig {
    /// Delays in milliseconds, each one a single re-positioning pass
    pub delays_ms: Vec<u64>,
}

/// Popover dialog configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PopoverConfig {
    pub input_label: String,
    pub header_text: String,
    pub hide_delete: bool,
    /// Message shown when accepting with an empty input
    pub blank_error: String,
    /// Header color; falls back to the host's primary color when unset
    pub header_color: Option<String>,
    pub body_color: String,
}

/// Demo application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Where the rendered balloon PNG is written
    pub output: PathBuf,
    /// Device pixel ratio reported by the simulated host
    pub device_pixel_ratio: f32,
}

impl Default for TooltipStyleConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            tip_height: 12.0,
            tip_base: 20.0,
            header_color: "#ccc".to_string(),
            body_color: "#eee".to_string(),
            border_color: "#666".to_string(),
            shadow_color: "#555".to_string(),
            shadow_margin: 7.0,
            stroke_border: false,
        }
    }
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            delays_ms: vec![20, 150],
        }
    }
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            input_label: "Description".to_string(),
            header_text: "Create".to_string(),
            hide_delete: false,
            blank_error: "This field cannot be blank.".to_string(),
            header_color: None,
            body_color: "white".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("balloon.png"),
            device_pixel_ratio: 1.0,
        }
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl BalloonConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from `balloon.toml` in the current directory,
    /// or return defaults if it is missing or unreadable
    pub fn load_or_default() -> Self {
        match Self::load_from_file(CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => Self::default(),
            Err(err) => {
                log::warn!("{err}; using defaults");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        // Tooltip style
        if let Ok(val) = std::env::var("BALLOON_RADIUS") {
            if let Ok(r) = val.parse::<f32>() {
                self.tooltip.radius = r;
            }
        }
        if let Ok(val) = std::env::var("BALLOON_TIP_HEIGHT") {
            if let Ok(h) = val.parse::<f32>() {
                self.tooltip.tip_height = h;
            }
        }
        if let Ok(val) = std::env::var("BALLOON_TIP_BASE") {
            if let Ok(b) = val.parse::<f32>() {
                self.tooltip.tip_base = b;
            }
        }
        if let Ok(color) = std::env::var("BALLOON_HEADER_COLOR") {
            self.tooltip.header_color = color;
        }
        if let Ok(color) = std::env::var("BALLOON_BODY_COLOR") {
            self.tooltip.body_color = color;
        }
        if let Ok(color) = std::env::var("BALLOON_SHADOW_COLOR") {
            self.tooltip.shadow_color = color;
        }
        if let Ok(val) = std::env::var("BALLOON_STROKE_BORDER") {
            self.tooltip.stroke_border = env_flag(&val);
        }

        // Settle retries, comma separated milliseconds ("20,150")
        if let Ok(val) = std::env::var("BALLOON_SETTLE_DELAYS") {
            let delays: Result<Vec<u64>, _> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse::<u64>)
                .collect();
            match delays {
                Ok(delays) => self.settle.delays_ms = delays,
                Err(err) => log::warn!("ignoring BALLOON_SETTLE_DELAYS={val:?}: {err}"),
            }
        }

        // Popover
        if let Ok(val) = std::env::var("BALLOON_HIDE_DELETE") {
            self.popover.hide_delete = env_flag(&val);
        }

        // Demo
        if let Ok(path) = std::env::var("BALLOON_OUTPUT") {
            self.demo.output = PathBuf::from(path);
        }
        if let Ok(val) = std::env::var("BALLOON_PIXEL_RATIO") {
            if let Ok(ratio) = val.parse::<f32>() {
                self.demo.device_pixel_ratio = ratio;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from balloon.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
