// SPDX-License-Identifier: MPL-2.0
//! Edit history types.
//!
//! An [`ImageHistory`] is the ordered list of steps that led to an image:
//! the entry at index 0 usually only refers to the original file, each later
//! entry carries the [`FilterAction`] that was applied. The naming engine only
//! reads histories; producing them is the editor's job.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Filter Actions
// =============================================================================

/// How an edit step can be reproduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterCategory {
    /// Fully described by its identifier and parameters; can be replayed.
    #[default]
    ReproducibleFilter,
    /// Replayable in principle, but not bit-exact (e.g. randomized filters).
    ComplexFilter,
    /// Only documented; the result cannot be recomputed.
    DocumentedHistory,
}

impl FilterCategory {
    #[must_use]
    pub fn is_reproducible(self) -> bool {
        matches!(self, Self::ReproducibleFilter)
    }
}

/// A single edit step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterAction {
    /// Filter identifier, e.g. `"digikam:RawConverter"`.
    pub identifier: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub category: FilterCategory,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl FilterAction {
    #[must_use]
    pub fn new(identifier: impl Into<String>, category: FilterCategory) -> Self {
        Self {
            identifier: identifier.into(),
            version: 1,
            category,
            ..Self::default()
        }
    }
}

// =============================================================================
// History Entries
// =============================================================================

/// Role of a file referenced from a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryImageType {
    /// The unedited source of the whole chain.
    Original,
    /// A file the history was derived from.
    Source,
    /// A stored snapshot between original and current.
    Intermediate,
    /// The file the history belongs to.
    Current,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The step applied at this point, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<FilterAction>,
    /// Files that hold the state after this step.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub referred_images: Vec<HistoryImageType>,
}

// =============================================================================
// ImageHistory
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageHistory {
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
}

impl ImageHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry that only refers to a file.
    #[must_use]
    pub fn with_referred_image(mut self, image_type: HistoryImageType) -> Self {
        self.entries.push(HistoryEntry {
            action: None,
            referred_images: vec![image_type],
        });
        self
    }

    /// Appends an edit step.
    #[must_use]
    pub fn with_action(mut self, action: FilterAction) -> Self {
        self.entries.push(HistoryEntry {
            action: Some(action),
            referred_images: Vec::new(),
        });
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The action of entry `index`, `None` if out of range or a pure reference entry.
    #[must_use]
    pub fn action(&self, index: usize) -> Option<&FilterAction> {
        self.entries.get(index).and_then(|entry| entry.action.as_ref())
    }

    /// Whether any entry refers to a file of the given role.
    #[must_use]
    pub fn has_referred_image_of_type(&self, image_type: HistoryImageType) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.referred_images.contains(&image_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_history() -> ImageHistory {
        ImageHistory::new()
            .with_referred_image(HistoryImageType::Original)
            .with_action(FilterAction::new(
                "digikam:RawConverter",
                FilterCategory::ReproducibleFilter,
            ))
            .with_action(FilterAction::new("digikam:HealingClone", FilterCategory::DocumentedHistory))
    }

    #[test]
    fn len_counts_reference_and_action_entries() {
        assert_eq!(sample_history().len(), 3);
        assert!(ImageHistory::new().is_empty());
    }

    #[test]
    fn action_returns_none_for_reference_entries() {
        let history = sample_history();
        assert!(history.action(0).is_none());
        assert_eq!(
            history.action(1).map(|a| a.identifier.as_str()),
            Some("digikam:RawConverter")
        );
        assert!(history.action(9).is_none());
    }

    #[test]
    fn referred_image_lookup() {
        let history = sample_history();
        assert!(history.has_referred_image_of_type(HistoryImageType::Original));
        assert!(!history.has_referred_image_of_type(HistoryImageType::Intermediate));
    }

    #[test]
    fn only_reproducible_category_is_reproducible() {
        assert!(FilterCategory::ReproducibleFilter.is_reproducible());
        assert!(!FilterCategory::ComplexFilter.is_reproducible());
        assert!(!FilterCategory::DocumentedHistory.is_reproducible());
    }

    #[test]
    fn history_reads_from_toml() {
        let text = r#"
            [[entries]]
            referred_images = ["original"]

            [[entries]]
            action = { identifier = "digikam:BCGFilter", category = "reproducible-filter" }

            [[entries]]
            [entries.action]
            identifier = "digikam:LocalContrast"
            category = "complex-filter"
            params = { strength = "0.4" }
        "#;
        let history: ImageHistory = toml::from_str(text).expect("valid history");

        assert_eq!(history.len(), 3);
        assert!(history.has_referred_image_of_type(HistoryImageType::Original));
        let contrast = history.action(2).expect("third entry has an action");
        assert_eq!(contrast.category, FilterCategory::ComplexFilter);
        assert_eq!(contrast.params.get("strength").map(String::as_str), Some("0.4"));
    }
}
