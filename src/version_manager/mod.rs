// SPDX-License-Identifier: MPL-2.0
//! Entry point for versioning decisions.
//!
//! [`VersionManager`] holds the settings, the active naming scheme and the
//! collaborators used to inspect the disk and classify filters. Each
//! `operation*` call runs one [`VersionNameCreator`](creator::VersionNameCreator)
//! to completion and returns the resulting [`VersionFileOperation`].
//!
//! # Examples
//!
//! ```no_run
//! use image_versioning::domain::history::{HistoryImageType, ImageHistory};
//! use image_versioning::domain::versioning::VersionFileInfo;
//! use image_versioning::version_manager::{FileNameType, VersionManager};
//!
//! let manager = VersionManager::new();
//! let loaded = VersionFileInfo::new("/photos", "DSC0001.jpg", "JPG");
//! let resolved = ImageHistory::new().with_referred_image(HistoryImageType::Original);
//! let current = resolved.clone();
//!
//! let operation = manager
//!     .operation(FileNameType::NewVersionName, &loaded, &resolved, &current)
//!     .expect("directory is readable");
//! println!("save to {:?}", operation.save_file.file_path());
//! ```

mod creator;

use crate::directory_scanner::{DirectoryListing, FsDirectory};
use crate::domain::history::ImageHistory;
use crate::domain::versioning::{VersionFileInfo, VersionFileOperation, VersionManagerSettings};
use crate::error::Result;
use crate::filters::{DefaultFilterRegistry, FilterRegistry};
use crate::format::WORKSPACE_FORMATS;
use crate::naming::{DefaultVersionNamingScheme, VersionNamingScheme};
use creator::VersionNameCreator;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which name the caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileNameType {
    /// Save the current state, overwriting the loaded file when allowed.
    CurrentVersionName,
    /// Always branch off a new version.
    NewVersionName,
}

pub struct VersionManager {
    settings: VersionManagerSettings,
    scheme: Option<Box<dyn VersionNamingScheme>>,
    default_scheme: DefaultVersionNamingScheme,
    filters: Box<dyn FilterRegistry>,
    listing: Box<dyn DirectoryListing>,
}

impl VersionManager {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(VersionManagerSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: VersionManagerSettings) -> Self {
        Self {
            settings,
            scheme: None,
            default_scheme: DefaultVersionNamingScheme,
            filters: Box::new(DefaultFilterRegistry::new()),
            listing: Box::new(FsDirectory),
        }
    }

    // =========================================================================
    // Settings and collaborators
    // =========================================================================

    #[must_use]
    pub fn settings(&self) -> &VersionManagerSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: VersionManagerSettings) {
        self.settings = settings;
    }

    /// Whether non-destructive editing is switched on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// The active naming scheme; the built-in default unless one was set.
    #[must_use]
    pub fn naming_scheme(&self) -> &dyn VersionNamingScheme {
        match &self.scheme {
            Some(scheme) => scheme.as_ref(),
            None => &self.default_scheme,
        }
    }

    /// Replaces the naming scheme. The previous custom scheme is dropped.
    pub fn set_naming_scheme(&mut self, scheme: Box<dyn VersionNamingScheme>) {
        self.scheme = Some(scheme);
    }

    /// Goes back to the built-in naming scheme.
    pub fn reset_naming_scheme(&mut self) {
        self.scheme = None;
    }

    pub fn set_filter_registry(&mut self, filters: Box<dyn FilterRegistry>) {
        self.filters = filters;
    }

    pub fn set_directory_listing(&mut self, listing: Box<dyn DirectoryListing>) {
        self.listing = listing;
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Decides how to save the current state of `loaded_file`.
    ///
    /// `initial_resolved_history` is the part of the history backed by files
    /// found on disk, `current_history` the full chain including unsaved steps.
    pub fn operation(
        &self,
        request: FileNameType,
        loaded_file: &VersionFileInfo,
        initial_resolved_history: &ImageHistory,
        current_history: &ImageHistory,
    ) -> Result<VersionFileOperation> {
        let mut name = self.creator(loaded_file, initial_resolved_history, current_history);

        match request {
            FileNameType::CurrentVersionName => name.check_need_new_version(),
            FileNameType::NewVersionName => name.fork(),
        }

        name.set_save_directory();
        name.set_save_format();
        name.set_save_file_name()?;
        name.init_operation();
        name.check_intermediates()?;

        Ok(name.into_operation())
    }

    /// Saves a new version in `format` instead of the configured one.
    pub fn operation_new_version_in_format(
        &self,
        loaded_file: &VersionFileInfo,
        format: &str,
        initial_resolved_history: &ImageHistory,
        current_history: &ImageHistory,
    ) -> Result<VersionFileOperation> {
        let mut name = self.creator(loaded_file, initial_resolved_history, current_history);

        name.fork();
        name.set_save_directory();
        name.set_save_format_to(format);
        name.set_save_file_name()?;
        name.init_operation();
        name.check_intermediates()?;

        Ok(name.into_operation())
    }

    /// Saves a new version exactly at `save_location`, bypassing the naming scheme.
    pub fn operation_new_version_as(
        &self,
        loaded_file: &VersionFileInfo,
        save_location: &VersionFileInfo,
        initial_resolved_history: &ImageHistory,
        current_history: &ImageHistory,
    ) -> Result<VersionFileOperation> {
        let mut name = self.creator(loaded_file, initial_resolved_history, current_history);

        name.fork();
        name.set_save_directory_to(save_location.path.clone());
        name.set_save_format_to(&save_location.format);
        name.set_save_file_name_to(save_location.file_name());
        name.init_operation();
        name.check_intermediates()?;

        Ok(name.into_operation())
    }

    // =========================================================================
    // Formats and directories
    // =========================================================================

    /// Formats that may be overwritten in place: the fixed workspace formats
    /// plus the configured storage format.
    #[must_use]
    pub fn workspace_file_formats(&self) -> Vec<String> {
        let mut formats: Vec<String> = WORKSPACE_FORMATS.iter().map(|f| (*f).to_string()).collect();
        let configured = self.settings.format.to_uppercase();

        if !formats.contains(&configured) {
            formats.push(configured);
        }
        formats
    }

    /// Top-level directory that version directories are resolved against.
    #[must_use]
    pub fn toplevel_directory(&self, _path: &Path) -> PathBuf {
        PathBuf::from("/")
    }

    fn creator<'a>(
        &'a self,
        loaded_file: &VersionFileInfo,
        initial_resolved_history: &'a ImageHistory,
        current_history: &'a ImageHistory,
    ) -> VersionNameCreator<'a> {
        VersionNameCreator::new(
            self.naming_scheme(),
            self.filters.as_ref(),
            self.listing.as_ref(),
            &self.settings,
            self.workspace_file_formats(),
            loaded_file,
            initial_resolved_history,
            current_history,
        )
    }
}

impl Default for VersionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VersionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionManager")
            .field("settings", &self.settings)
            .field("custom_scheme", &self.scheme.is_some())
            .finish_non_exhaustive()
    }
}
