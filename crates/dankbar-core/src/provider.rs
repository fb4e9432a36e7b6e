use std::fmt;

use crate::event::Event;

/// Why a provider could not produce its event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectError {
    /// The external command could not be spawned or its output read.
    Command(String),
    /// The external command exited unsuccessfully.
    CommandFailed { command: String, code: Option<i32> },
    /// The external command did not finish within the configured budget.
    CommandTimeout { command: String, timeout_ms: u64 },
    /// The extraction pattern failed to compile.
    Pattern(String),
    /// A source file could not be read.
    Read(String),
    /// A source file held something other than the expected value.
    Parse(String),
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(msg) => write!(f, "{msg}"),
            Self::CommandFailed { command, code } => {
                write!(f, "command {command} exited unsuccessfully (code={code:?})")
            }
            Self::CommandTimeout {
                command,
                timeout_ms,
            } => write!(f, "command {command} timed out after {timeout_ms}ms"),
            Self::Pattern(msg) => write!(f, "invalid pattern: {msg}"),
            Self::Read(msg) => write!(f, "{msg}"),
            Self::Parse(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CollectError {}

/// A named metric source producing one [`Event`] per invocation.
///
/// Implementors only write [`try_collect`](Provider::try_collect). The
/// provided [`collect`](Provider::collect) fails closed: any error becomes
/// the shared sentinel built from [`error_color`](Provider::error_color), so
/// the returned event's name may differ from [`name`](Provider::name).
pub trait Provider {
    /// Registry key, also the `name` of every successful event.
    fn name(&self) -> &'static str;

    /// Color used for the sentinel event when collection fails.
    fn error_color(&self) -> &str;

    /// Gather the metric, reporting why it failed.
    fn try_collect(&self) -> Result<Event, CollectError>;

    fn collect(&self) -> Event {
        match self.try_collect() {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(provider = self.name(), error = %err, "provider failed");
                Event::error(self.error_color())
            }
        }
    }
}
