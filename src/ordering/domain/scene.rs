//! Scene tags parsed from task titles.
//!
//! The table view groups tasks by a leading bracketed tag, so
//! `"[Intro] Opening shot"` belongs to scene `Intro` and displays as
//! `Opening shot`.

use crate::ordering::config::OrderingConfig;

/// Scene and display title derived from a raw task title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneInfo {
    /// Scene group key.
    pub scene: String,
    /// Title with the scene tag removed.
    pub title: String,
}

/// Splits a raw title into its scene and display title.
///
/// # Examples
///
/// ```
/// use tasklane::ordering::{config::OrderingConfig, domain::parse_scene};
///
/// let config = OrderingConfig::default();
/// let info = parse_scene("  [Intro]  Opening shot ", &config);
/// assert_eq!(info.scene, "Intro");
/// assert_eq!(info.title, "Opening shot");
///
/// let untagged = parse_scene("Credits", &config);
/// assert_eq!(untagged.scene, "No Scene");
/// ```
#[must_use]
pub fn parse_scene(title: &str, config: &OrderingConfig) -> SceneInfo {
    let trimmed = title.trim();
    let tagged = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.split_once(']'))
        .filter(|(tag, _)| !tag.is_empty());

    let Some((tag, remainder)) = tagged else {
        return SceneInfo {
            scene: config.no_scene_label.clone(),
            title: non_empty_or(trimmed, &config.untitled_label),
        };
    };

    SceneInfo {
        scene: non_empty_or(tag.trim(), &config.no_scene_label),
        title: non_empty_or(remainder.trim(), &config.untitled_label),
    }
}

/// Returns the scene key of a raw title.
#[must_use]
pub fn scene_of(title: &str, config: &OrderingConfig) -> String {
    parse_scene(title, config).scene
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}

/// Carries the last explicit scene forward across imported rows.
///
/// Spreadsheet exports usually fill the scene column only on the first row
/// of each block; following rows belong to the same scene.
#[derive(Debug, Clone, Default)]
pub struct SceneCarry {
    last: Option<String>,
}

impl SceneCarry {
    /// Creates a carry with no scene seen yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the scene for a row given its raw scene cell.
    pub fn resolve(&mut self, cell: &str) -> Option<String> {
        let trimmed = cell.trim();
        if !trimmed.is_empty() {
            self.last = Some(trimmed.to_owned());
        }
        self.last.clone()
    }
}

/// Builds a stored title from an optional scene and a display title.
#[must_use]
pub fn tagged_title(scene: Option<&str>, title: &str) -> String {
    match scene {
        Some(tag) => format!("[{tag}] {title}"),
        None => title.to_owned(),
    }
}
