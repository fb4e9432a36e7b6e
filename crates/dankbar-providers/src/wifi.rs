use std::time::Duration;

use regex::Regex;

use dankbar_config::Settings;
use dankbar_core::event::Event;
use dankbar_core::provider::{CollectError, Provider};

use crate::command;

/// Marker `iwconfig` prints for an interface that is not associated.
const OFF_MARKER: &str = ":off/any";

/// Wireless link state, read from the output of a diagnostic command.
pub struct WifiProvider {
    command: String,
    args: Vec<String>,
    timeout: Option<Duration>,
    essid_pattern: String,
    glyph: String,
    up_color: String,
    down_color: String,
    error_color: String,
    separator_block_width: u32,
}

impl WifiProvider {
    pub fn new(settings: &Settings) -> Self {
        Self {
            command: settings.wifi.command.clone(),
            args: settings.wifi.args.clone(),
            timeout: settings.wifi.timeout_ms.map(Duration::from_millis),
            essid_pattern: settings.wifi.essid_pattern.clone(),
            glyph: settings.glyphs.wifi.clone(),
            up_color: settings.colors.text.clone(),
            down_color: settings.colors.down.clone(),
            error_color: settings.colors.error.clone(),
            separator_block_width: settings.layout.separator_block_width,
        }
    }
}

/// True when the link should render as down: no ESSID match at all, or a
/// match carrying the `:off/any` marker.
pub fn link_down(output: &str, essid: &Regex) -> bool {
    match essid.find(output) {
        None => true,
        Some(m) => m.as_str().is_empty() || m.as_str().contains(OFF_MARKER),
    }
}

impl Provider for WifiProvider {
    fn name(&self) -> &'static str {
        "wifi"
    }

    fn error_color(&self) -> &str {
        &self.error_color
    }

    fn try_collect(&self) -> Result<Event, CollectError> {
        let out = command::run(&self.command, &self.args, self.timeout)?;
        let essid = Regex::new(&self.essid_pattern)
            .map_err(|err| CollectError::Pattern(err.to_string()))?;

        let output = String::from_utf8_lossy(&out);
        let color = if link_down(&output, &essid) {
            &self.down_color
        } else {
            &self.up_color
        };

        Ok(Event::new(
            self.name(),
            self.glyph.as_str(),
            color.as_str(),
            self.separator_block_width,
        ))
    }
}
