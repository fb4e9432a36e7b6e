//! Metric providers for dankbar.
//!
//! Each provider reads one piece of host state and renders it as a single
//! [`Event`](dankbar_core::event::Event):
//!
//! | name      | source                                       |
//! |-----------|----------------------------------------------|
//! | `wifi`    | ESSID line of a wireless diagnostic command  |
//! | `battery` | sysfs `capacity` and `status` files          |
//! | `time`    | local clock                                  |
//!
//! Providers never return an error to the cycle: failures collapse into the
//! shared `error` sentinel.

use anyhow::Result;

use dankbar_config::Settings;
use dankbar_core::registry::ProviderRegistry;

pub mod battery;
pub mod clock;
pub mod command;
pub mod wifi;

pub use battery::BatteryProvider;
pub use clock::ClockProvider;
pub use wifi::WifiProvider;

/// Registry holding every built-in provider, configured from `settings`.
pub fn default_registry(settings: &Settings) -> Result<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();
    registry.register(Box::new(WifiProvider::new(settings)))?;
    registry.register(Box::new(BatteryProvider::new(settings)))?;
    registry.register(Box::new(ClockProvider::new(settings)))?;
    Ok(registry)
}
