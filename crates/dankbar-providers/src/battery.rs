use std::fs;
use std::path::{Path, PathBuf};

use dankbar_config::{Glyphs, Settings};
use dankbar_core::event::Event;
use dankbar_core::provider::{CollectError, Provider};

/// Status text the kernel reports while the battery is charging.
const CHARGING: &str = "Charging";

/// Battery charge tier and charging state, read from sysfs.
pub struct BatteryProvider {
    capacity_path: PathBuf,
    status_path: PathBuf,
    glyphs: Glyphs,
    color: String,
    error_color: String,
    separator_block_width: u32,
}

impl BatteryProvider {
    pub fn new(settings: &Settings) -> Self {
        Self {
            capacity_path: settings.battery.capacity_path.clone(),
            status_path: settings.battery.status_path.clone(),
            glyphs: settings.glyphs.clone(),
            color: settings.colors.text.clone(),
            error_color: settings.colors.error.clone(),
            separator_block_width: settings.layout.separator_block_width,
        }
    }
}

/// Pick the glyph for a charge percentage.
///
/// Bands: (75, ..] full, (50, 75] three quarters, (25, 50] half,
/// (15, 25] quarter, everything else empty.
pub fn tier_glyph(capacity: i64, glyphs: &Glyphs) -> &str {
    match capacity {
        c if c > 75 => glyphs.battery_full.as_str(),
        c if c > 50 => glyphs.battery_75.as_str(),
        c if c > 25 => glyphs.battery_50.as_str(),
        c if c > 15 => glyphs.battery_25.as_str(),
        _ => glyphs.battery_0.as_str(),
    }
}

/// Full text for a reading: the tier glyph, plus two spaces and the
/// charging glyph when `status` is exactly `Charging`.
pub fn render(capacity: i64, status: &str, glyphs: &Glyphs) -> String {
    let mut text = tier_glyph(capacity, glyphs).to_string();
    if status == CHARGING {
        text.push_str("  ");
        text.push_str(&glyphs.charging);
    }
    text
}

fn read_trimmed(path: &Path) -> Result<String, CollectError> {
    let raw = fs::read_to_string(path)
        .map_err(|err| CollectError::Read(format!("failed to read {}: {err}", path.display())))?;
    Ok(raw.trim().to_string())
}

impl Provider for BatteryProvider {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn error_color(&self) -> &str {
        &self.error_color
    }

    fn try_collect(&self) -> Result<Event, CollectError> {
        let raw = read_trimmed(&self.capacity_path)?;
        let capacity: i64 = raw.parse().map_err(|_| {
            CollectError::Parse(format!(
                "battery capacity {:?} in {} is not an integer",
                raw,
                self.capacity_path.display()
            ))
        })?;
        let status = read_trimmed(&self.status_path)?;

        Ok(Event::new(
            self.name(),
            render(capacity, &status, &self.glyphs),
            self.color.as_str(),
            self.separator_block_width,
        ))
    }
}
