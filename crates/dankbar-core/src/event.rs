use serde::Serialize;

/// Name carried by the shared sentinel event.
pub const ERROR_NAME: &str = "error";
/// Text carried by the shared sentinel event.
pub const ERROR_TEXT: &str = "E";

/// One rendered status-bar slot.
///
/// Field order is the wire order: `name`, `full_text`, `color`, `separator`,
/// `separator_block_width`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub name: String,
    pub full_text: String,
    pub color: String,
    pub separator: bool,
    pub separator_block_width: u32,
}

impl Event {
    /// Build a regular provider event. `separator` is always `false`.
    pub fn new(
        name: impl Into<String>,
        full_text: impl Into<String>,
        color: impl Into<String>,
        separator_block_width: u32,
    ) -> Self {
        Self {
            name: name.into(),
            full_text: full_text.into(),
            color: color.into(),
            separator: false,
            separator_block_width,
        }
    }

    /// The sentinel substituted for any failed provider invocation.
    ///
    /// Carries no separator width, so the bar renders it flush.
    pub fn error(color: impl Into<String>) -> Self {
        Self::new(ERROR_NAME, ERROR_TEXT, color, 0)
    }

    pub fn is_error(&self) -> bool {
        self.name == ERROR_NAME
    }
}
