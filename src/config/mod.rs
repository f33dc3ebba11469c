// SPDX-License-Identifier: MPL-2.0
//! Loading and saving the versioning preferences in a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[versioning]` - Non-destructive editing switch, intermediate policy,
//!   view flags, editor closing behavior and storage format
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` on the command line
//! 3. Set `IMAGE_VERSIONING_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Migration
//!
//! Flat files written with the long digiKam-style keys
//! (`"Non-Destructive Editing Enabled" = true`, ...) are migrated to the
//! sectioned format when loaded. The next save writes the new format.
//!
//! # Examples
//!
//! ```no_run
//! use image_versioning::config;
//!
//! let (mut config, _warning) = config::load();
//! config.versioning.format = Some("TIFF".to_string());
//! config::save(&config).expect("Failed to save config");
//!
//! let settings = config.version_settings();
//! assert_eq!(settings.format, "TIFF");
//! ```

use crate::domain::versioning::{
    EditorClosingMode, IntermediatePolicy, VersionManagerSettings, ViewFlags,
    DEFAULT_VERSION_FORMAT,
};
use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Non-destructive editing settings.
///
/// Missing keys fall back to the values of [`VersionManagerSettings::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersioningConfig {
    #[serde(default = "default_enabled", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_after_each_session: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_after_raw_conversion: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_when_not_reproducible: Option<bool>,

    #[serde(
        default = "default_show_original",
        skip_serializing_if = "Option::is_none"
    )]
    pub show_original: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_intermediates: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save_when_closing_editor: Option<bool>,

    /// Storage format for new versions (e.g. "JPG", "TIFF").
    #[serde(default = "default_format", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self::from(&VersionManagerSettings::default())
    }
}

impl From<&VersionManagerSettings> for VersioningConfig {
    fn from(settings: &VersionManagerSettings) -> Self {
        let policy = settings.save_intermediate_versions;
        Self {
            enabled: Some(settings.enabled),
            intermediate_after_each_session: Some(policy.after_each_session),
            intermediate_after_raw_conversion: Some(policy.after_raw_conversion),
            intermediate_when_not_reproducible: Some(policy.when_not_reproducible),
            show_original: Some(settings.show_in_view.show_original),
            show_intermediates: Some(settings.show_in_view.show_intermediates),
            auto_save_when_closing_editor: Some(
                settings.editor_closing_mode == EditorClosingMode::AutoSave,
            ),
            format: Some(settings.format.clone()),
        }
    }
}

impl VersioningConfig {
    /// Resolves every unset key to its default.
    #[must_use]
    pub fn to_settings(&self) -> VersionManagerSettings {
        let defaults = VersionManagerSettings::default();
        let policy = defaults.save_intermediate_versions;
        let view = defaults.show_in_view;

        let editor_closing_mode = match self.auto_save_when_closing_editor {
            Some(true) => EditorClosingMode::AutoSave,
            Some(false) => EditorClosingMode::AlwaysAsk,
            None => defaults.editor_closing_mode,
        };

        let mut settings = VersionManagerSettings {
            enabled: self.enabled.unwrap_or(defaults.enabled),
            save_intermediate_versions: IntermediatePolicy {
                after_each_session: self
                    .intermediate_after_each_session
                    .unwrap_or(policy.after_each_session),
                after_raw_conversion: self
                    .intermediate_after_raw_conversion
                    .unwrap_or(policy.after_raw_conversion),
                when_not_reproducible: self
                    .intermediate_when_not_reproducible
                    .unwrap_or(policy.when_not_reproducible),
            },
            show_in_view: ViewFlags {
                show_original: self.show_original.unwrap_or(view.show_original),
                show_intermediates: self.show_intermediates.unwrap_or(view.show_intermediates),
            },
            editor_closing_mode,
            format: defaults.format,
        };

        if let Some(format) = self.format.as_deref().filter(|f| !f.trim().is_empty()) {
            settings.set_format(format.trim());
        }
        settings
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub versioning: VersioningConfig,
}

impl Config {
    /// Builds the settings the [`VersionManager`](crate::version_manager::VersionManager) runs with.
    #[must_use]
    pub fn version_settings(&self) -> VersionManagerSettings {
        self.versioning.to_settings()
    }

    #[must_use]
    pub fn from_version_settings(settings: &VersionManagerSettings) -> Self {
        Self {
            versioning: VersioningConfig::from(settings),
        }
    }
}

// =============================================================================
// Legacy Config (for migration from flat format)
// =============================================================================

/// Flat key layout used by digiKam's `[Non-Destructive Editing]` group.
#[derive(Debug, Deserialize)]
struct LegacyConfig {
    #[serde(rename = "Non-Destructive Editing Enabled", default)]
    enabled: Option<bool>,
    #[serde(rename = "Save Intermediate After Each Session", default)]
    after_each_session: Option<bool>,
    #[serde(rename = "Save Intermediate After Raw Conversion", default)]
    after_raw_conversion: Option<bool>,
    #[serde(rename = "Save Intermediate When Not Reproducible", default)]
    when_not_reproducible: Option<bool>,
    #[serde(rename = "Show Original in View", default)]
    show_original: Option<bool>,
    #[serde(rename = "Show Intermediates in View", default)]
    show_intermediates: Option<bool>,
    #[serde(rename = "Auto-Save When Closing Editor", default)]
    auto_save: Option<bool>,
    #[serde(rename = "Saving Format for Versions", default)]
    format: Option<String>,
}

impl LegacyConfig {
    fn has_any_key(&self) -> bool {
        self.enabled.is_some()
            || self.after_each_session.is_some()
            || self.after_raw_conversion.is_some()
            || self.when_not_reproducible.is_some()
            || self.show_original.is_some()
            || self.show_intermediates.is_some()
            || self.auto_save.is_some()
            || self.format.is_some()
    }
}

impl From<LegacyConfig> for Config {
    fn from(legacy: LegacyConfig) -> Self {
        let defaults = VersioningConfig::default();
        Config {
            versioning: VersioningConfig {
                enabled: legacy.enabled.or(defaults.enabled),
                intermediate_after_each_session: legacy
                    .after_each_session
                    .or(defaults.intermediate_after_each_session),
                intermediate_after_raw_conversion: legacy
                    .after_raw_conversion
                    .or(defaults.intermediate_after_raw_conversion),
                intermediate_when_not_reproducible: legacy
                    .when_not_reproducible
                    .or(defaults.intermediate_when_not_reproducible),
                // the flat layout never showed the original unless asked to
                show_original: legacy.show_original.or(Some(false)),
                show_intermediates: legacy.show_intermediates.or(defaults.show_intermediates),
                auto_save_when_closing_editor: legacy
                    .auto_save
                    .or(defaults.auto_save_when_closing_editor),
                format: legacy
                    .format
                    .map(|f| f.to_uppercase())
                    .or(defaults.format),
            },
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_enabled() -> Option<bool> {
    Some(true)
}

fn default_show_original() -> Option<bool> {
    Some(true)
}

fn default_format() -> Option<String> {
    Some(DEFAULT_VERSION_FORMAT.to_string())
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to load config");
                    return (
                        Config::default(),
                        Some(format!("could not read {}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads the configuration from an explicit file path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;

    if content.contains("[versioning]") {
        let config: Config = toml::from_str(&content)?;
        return Ok(config);
    }

    if let Ok(legacy) = toml::from_str::<LegacyConfig>(&content) {
        if legacy.has_any_key() {
            tracing::debug!(path = %path.display(), "migrating flat versioning config");
            return Ok(Config::from(legacy));
        }
    }

    // If neither works, try new format again and let errors propagate
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    let path = get_config_path_with_override(base_dir)
        .ok_or_else(|| Error::Config("Config path not found".to_string()))?;
    save_to_path(config, &path)
}

/// Saves the configuration to an explicit file path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
