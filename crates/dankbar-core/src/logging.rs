use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Prefix of every file written by the daily rolling appender.
const LOG_FILE_PREFIX: &str = "dankbar.log";
const LOG_RETENTION_DAYS: u64 = 7;

/// Return the log directory path.
///
/// Precedence: `DANKBAR_LOG_DIR` env var > `$XDG_DATA_HOME/dankbar/logs/`
/// (or the platform data dir) > `./logs`.
pub fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DANKBAR_LOG_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(data) = dirs::data_dir() {
        return data.join("dankbar").join("logs");
    }

    PathBuf::from("logs")
}

/// Remove dankbar log files older than `max_age_days` from `log_path`.
///
/// Only files starting with `dankbar.log` are considered so a shared
/// directory keeps its other contents.
fn cleanup_old_logs(log_path: &Path, max_age_days: u64) {
    let cutoff =
        std::time::SystemTime::now() - std::time::Duration::from_secs(max_age_days * 86400);
    if let Ok(entries) = std::fs::read_dir(log_path) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with(LOG_FILE_PREFIX) {
                continue;
            }
            if let Ok(meta) = entry.metadata() {
                if let Ok(modified) = meta.modified() {
                    if modified < cutoff {
                        let _ = std::fs::remove_file(entry.path());
                    }
                }
            }
        }
    }
}

/// Open the daily rolling appender in `log_path`, creating the directory.
///
/// Returns `None` (after a warning on stderr) when the directory cannot be
/// used.
fn open_appender(log_path: &Path) -> Option<RollingFileAppender> {
    if let Err(e) = std::fs::create_dir_all(log_path) {
        eprintln!(
            "warning: failed to create log directory {:?}: {}",
            log_path, e
        );
        return None;
    }

    cleanup_old_logs(log_path, LOG_RETENTION_DAYS);

    match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_path)
    {
        Ok(appender) => Some(appender),
        Err(e) => {
            eprintln!(
                "warning: failed to open log file in {:?}: {}; file logging disabled",
                log_path, e
            );
            None
        }
    }
}

/// Initialize file logging.
///
/// Filter controlled by `DANKBAR_LOG` or `RUST_LOG` (default: `info`).
/// Output: daily rotation in [`log_dir`], 7-day retention. Nothing is
/// written to stdout, which carries the bar protocol. An unusable log
/// directory disables file output instead of stopping the process.
pub fn init() {
    let filter = EnvFilter::try_from_env("DANKBAR_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = open_appender(&log_dir()).map(|appender| {
        tracing_subscriber::fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serialize env-mutating tests to avoid data races.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn log_dir_respects_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        let original = std::env::var("DANKBAR_LOG_DIR").ok();

        unsafe { std::env::set_var("DANKBAR_LOG_DIR", "/tmp/dankbar-test-logs") };
        assert_eq!(log_dir(), PathBuf::from("/tmp/dankbar-test-logs"));

        match original {
            Some(v) => unsafe { std::env::set_var("DANKBAR_LOG_DIR", v) },
            None => unsafe { std::env::remove_var("DANKBAR_LOG_DIR") },
        }
    }

    #[test]
    fn log_dir_default_ends_in_dankbar_logs() {
        let _guard = ENV_LOCK.lock().unwrap();
        let original = std::env::var("DANKBAR_LOG_DIR").ok();

        unsafe { std::env::remove_var("DANKBAR_LOG_DIR") };
        let dir = log_dir();
        if dirs::data_dir().is_some() {
            assert!(dir.ends_with("dankbar/logs"), "dir was {:?}", dir);
        }

        if let Some(v) = original {
            unsafe { std::env::set_var("DANKBAR_LOG_DIR", v) };
        }
    }

    #[test]
    fn cleanup_old_logs_removes_stale_files() {
        let tmp = tempfile::tempdir().unwrap();

        let log_a = tmp.path().join("dankbar.log.2025-01-01");
        let log_b = tmp.path().join("dankbar.log.2025-01-02");
        let other = tmp.path().join("other.txt");
        std::fs::write(&log_a, "a").unwrap();
        std::fs::write(&log_b, "b").unwrap();
        std::fs::write(&other, "c").unwrap();

        // max_age_days=0 means cutoff is "now", so all matching files get cleaned
        cleanup_old_logs(tmp.path(), 0);
        assert!(!log_a.exists(), "dankbar log file should be deleted");
        assert!(!log_b.exists(), "dankbar log file should be deleted");
        assert!(other.exists(), "unrelated file should be preserved");
    }

    #[test]
    fn cleanup_old_logs_keeps_recent_files() {
        let tmp = tempfile::tempdir().unwrap();
        let fresh = tmp.path().join("dankbar.log.today");
        std::fs::write(&fresh, "x").unwrap();

        cleanup_old_logs(tmp.path(), LOG_RETENTION_DAYS);
        assert!(fresh.exists());
    }

    #[test]
    fn open_appender_in_writable_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs");
        assert!(open_appender(&dir).is_some());
        assert!(dir.is_dir());
    }

    #[test]
    fn open_appender_in_unusable_dir_returns_none() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocker = tmp.path().join("logs");
        std::fs::write(&blocker, "not a dir").unwrap();

        assert!(open_appender(&blocker).is_none());
        assert!(open_appender(&blocker.join("nested")).is_none());
    }

    #[test]
    fn cleanup_missing_dir_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        cleanup_old_logs(&tmp.path().join("absent"), 0);
    }
}
