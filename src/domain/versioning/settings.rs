// SPDX-License-Identifier: MPL-2.0
//! Versioning settings.
//!
//! Persistence lives in [`crate::config`]; this module only holds the values.

/// Default storage format for new versions.
pub const DEFAULT_VERSION_FORMAT: &str = "JPG";

/// When to keep snapshots of intermediate editing states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntermediatePolicy {
    /// Keep the state of the previous session when the file is overwritten.
    pub after_each_session: bool,
    /// Keep the state right after a raw conversion step.
    pub after_raw_conversion: bool,
    /// Keep the state after every step that cannot be replayed from history.
    pub when_not_reproducible: bool,
}

impl IntermediatePolicy {
    /// No intermediates are stored.
    pub const NONE: Self = Self {
        after_each_session: false,
        after_raw_conversion: false,
        when_not_reproducible: false,
    };

    #[must_use]
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Which non-current versions are visible in views.
///
/// With neither flag set only the current version is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewFlags {
    pub show_original: bool,
    pub show_intermediates: bool,
}

impl ViewFlags {
    pub const ONLY_SHOW_CURRENT: Self = Self {
        show_original: false,
        show_intermediates: false,
    };

    #[must_use]
    pub fn only_show_current(&self) -> bool {
        *self == Self::ONLY_SHOW_CURRENT
    }
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self {
            show_original: true,
            show_intermediates: false,
        }
    }
}

/// What the editor does with unsaved changes when it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorClosingMode {
    #[default]
    AlwaysAsk,
    AutoSave,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionManagerSettings {
    /// Non-destructive editing is active.
    pub enabled: bool,
    pub save_intermediate_versions: IntermediatePolicy,
    pub show_in_view: ViewFlags,
    pub editor_closing_mode: EditorClosingMode,
    /// Upper-case format tag new versions are stored in.
    pub format: String,
}

impl VersionManagerSettings {
    /// Sets the storage format, normalized to upper case.
    pub fn set_format(&mut self, format: &str) {
        self.format = format.to_uppercase();
    }
}

impl Default for VersionManagerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            save_intermediate_versions: IntermediatePolicy::NONE,
            show_in_view: ViewFlags::default(),
            editor_closing_mode: EditorClosingMode::AlwaysAsk,
            format: DEFAULT_VERSION_FORMAT.to_string(),
        }
    }
}
