//! Configuration types and loaders for dankbar.
//!
//! Two files live in [`config_dir`]: `config.json`, the ordered list of
//! providers to show (bootstrapped to `["time"]`), and an optional
//! `settings.toml` with colors, glyphs, sysfs paths and timing.

use std::path::PathBuf;

pub mod selection;
pub mod settings;

pub use selection::Selection;
pub use settings::{BatterySources, Colors, Glyphs, Layout, Settings, WifiSource};

/// Return the configuration directory.
///
/// Precedence: `DANKBAR_CONFIG_DIR` env var > `$XDG_CONFIG_HOME/dankbar/`
/// (or the platform config dir) > `./dankbar`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DANKBAR_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(config) = dirs::config_dir() {
        return config.join("dankbar");
    }

    PathBuf::from("dankbar")
}
