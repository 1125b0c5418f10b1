//! Configuration shared by grouping, drag gating, and import.

/// MIME type under which task drags carry their payload by default.
pub const DEFAULT_DRAG_MIME_TYPE: &str = "application/x-task-drag";

/// Configuration for the ordering engine.
///
/// # Examples
///
/// ```
/// use tasklane::ordering::config::OrderingConfig;
///
/// let config = OrderingConfig::default();
/// assert_eq!(config.no_scene_label, "No Scene");
///
/// let custom = OrderingConfig::default().with_drag_mime_type("application/x-board-card");
/// assert_eq!(custom.drag_mime_type, "application/x-board-card");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingConfig {
    /// MIME type a drag payload must carry to be treated as a task drag.
    pub drag_mime_type: String,
    /// Scene assigned to table rows whose title has no `[Scene]` tag.
    pub no_scene_label: String,
    /// Display title used when a title is empty after removing its tag.
    pub untitled_label: String,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            drag_mime_type: DEFAULT_DRAG_MIME_TYPE.to_owned(),
            no_scene_label: "No Scene".to_owned(),
            untitled_label: "Untitled".to_owned(),
        }
    }
}

impl OrderingConfig {
    /// Replaces the accepted drag MIME type.
    #[must_use]
    pub fn with_drag_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.drag_mime_type = mime_type.into();
        self
    }

    /// Replaces the labels used for untagged and untitled rows.
    #[must_use]
    pub fn with_labels(
        mut self,
        no_scene_label: impl Into<String>,
        untitled_label: impl Into<String>,
    ) -> Self {
        self.no_scene_label = no_scene_label.into();
        self.untitled_label = untitled_label.into();
        self
    }
}
