use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Optional file overriding colors, glyphs, paths and timing.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Immutable runtime settings, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Settings {
    pub colors: Colors,
    pub glyphs: Glyphs,
    pub battery: BatterySources,
    pub wifi: WifiSource,
    pub layout: Layout,
    /// Seconds slept after each emitted cycle.
    pub interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Colors {
    pub text: String,
    pub down: String,
    pub error: String,
}

/// Display glyphs. Defaults are Font Awesome code points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Glyphs {
    pub battery_full: String,
    pub battery_75: String,
    pub battery_50: String,
    pub battery_25: String,
    pub battery_0: String,
    pub charging: String,
    pub wifi: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BatterySources {
    pub capacity_path: PathBuf,
    pub status_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct WifiSource {
    pub command: String,
    pub args: Vec<String>,
    pub essid_pattern: String,
    /// Kill the command after this many milliseconds. Unset blocks forever.
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Layout {
    pub separator_block_width: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            colors: Colors::default(),
            glyphs: Glyphs::default(),
            battery: BatterySources::default(),
            wifi: WifiSource::default(),
            layout: Layout::default(),
            interval_secs: 3,
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            text: "#d3d3d3".into(),
            down: "#4e4a4b".into(),
            error: "#FF0000".into(),
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            battery_full: "\u{f240}".into(),
            battery_75: "\u{f241}".into(),
            battery_50: "\u{f242}".into(),
            battery_25: "\u{f243}".into(),
            battery_0: "\u{f244}".into(),
            charging: "\u{f0e7}".into(),
            wifi: "\u{f1eb}".into(),
        }
    }
}

impl Default for BatterySources {
    fn default() -> Self {
        Self {
            capacity_path: PathBuf::from("/sys/class/power_supply/BAT0/capacity"),
            status_path: PathBuf::from("/sys/class/power_supply/BAT0/status"),
        }
    }
}

impl Default for WifiSource {
    fn default() -> Self {
        Self {
            command: "iwconfig".into(),
            args: Vec::new(),
            essid_pattern: "ESSID:(.+)".into(),
            timeout_ms: None,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            separator_block_width: 35,
        }
    }
}

impl Settings {
    /// Parse and validate settings TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let settings: Self = toml::from_str(input).context("failed to parse settings TOML")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `dir/settings.toml`, or defaults when it is absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("invalid settings at {}", path.display()))
    }

    /// Validate required fields and semantic constraints.
    pub fn validate(&self) -> Result<()> {
        validate_nonempty("colors.text", &self.colors.text)?;
        validate_nonempty("colors.down", &self.colors.down)?;
        validate_nonempty("colors.error", &self.colors.error)?;
        validate_nonempty("wifi.command", &self.wifi.command)?;
        validate_nonempty("wifi.essid_pattern", &self.wifi.essid_pattern)?;

        if self.interval_secs == 0 {
            bail!("interval_secs must be greater than zero");
        }
        if self.wifi.timeout_ms == Some(0) {
            bail!("wifi.timeout_ms must be greater than zero when set");
        }

        Ok(())
    }
}

fn validate_nonempty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{field} must not be empty")
    }
    Ok(())
}
