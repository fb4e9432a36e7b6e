use chrono::{DateTime, Local, TimeZone};

use dankbar_config::Settings;
use dankbar_core::event::Event;
use dankbar_core::provider::{CollectError, Provider};

/// `Jan 2 15:04 `: abbreviated month, unpadded day, 24h time, trailing space.
pub const CLOCK_FORMAT: &str = "%b %-d %H:%M ";

/// Local wall-clock time. Never fails.
pub struct ClockProvider {
    color: String,
    error_color: String,
    separator_block_width: u32,
}

impl ClockProvider {
    pub fn new(settings: &Settings) -> Self {
        Self {
            color: settings.colors.text.clone(),
            error_color: settings.colors.error.clone(),
            separator_block_width: settings.layout.separator_block_width,
        }
    }

    /// Build the event for a given instant.
    pub fn event_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Event
    where
        Tz::Offset: std::fmt::Display,
    {
        Event::new(
            self.name(),
            format_time(now),
            self.color.as_str(),
            self.separator_block_width,
        )
    }
}

pub fn format_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(CLOCK_FORMAT).to_string()
}

impl Provider for ClockProvider {
    fn name(&self) -> &'static str {
        "time"
    }

    fn error_color(&self) -> &str {
        &self.error_color
    }

    fn try_collect(&self) -> Result<Event, CollectError> {
        Ok(self.event_at(&Local::now()))
    }
}
