// SPDX-License-Identifier: MPL-2.0
//! Step-by-step derivation of a [`VersionFileOperation`].
//!
//! A [`VersionNameCreator`] is built for a single request and driven by
//! [`VersionManager`](super::VersionManager) through a fixed sequence:
//!
//! 1. [`check_need_new_version`](VersionNameCreator::check_need_new_version) or
//!    [`fork`](VersionNameCreator::fork)
//! 2. [`set_save_directory`](VersionNameCreator::set_save_directory)
//! 3. [`set_save_format`](VersionNameCreator::set_save_format)
//! 4. [`set_save_file_name`](VersionNameCreator::set_save_file_name)
//! 5. [`init_operation`](VersionNameCreator::init_operation)
//! 6. [`check_intermediates`](VersionNameCreator::check_intermediates)
//!
//! Each step relies on the ones before it: the suffix needs the format, the
//! intermediates need the final name and version counter.

use crate::directory_scanner::DirectoryListing;
use crate::domain::history::{HistoryImageType, ImageHistory};
use crate::domain::versioning::{
    Counter, PrimaryTask, Tasks, VersionFileInfo, VersionFileOperation, VersionManagerSettings,
};
use crate::error::{Error, Result};
use crate::filters::FilterRegistry;
use crate::format;
use crate::naming::VersionNamingScheme;
use std::path::PathBuf;
use tracing::debug;

pub(crate) struct VersionNameCreator<'a> {
    scheme: &'a dyn VersionNamingScheme,
    filters: &'a dyn FilterRegistry,
    listing: &'a dyn DirectoryListing,
    settings: &'a VersionManagerSettings,
    workspace_formats: Vec<String>,

    resolved_initial_history: &'a ImageHistory,
    current_history: &'a ImageHistory,

    loaded_file: VersionFileInfo,
    loaded_file_name: String,
    result: VersionFileInfo,
    operation: VersionFileOperation,

    from_raw: bool,
    new_version: bool,
    /// Suffixes follow the case of the loaded file's extension.
    lower_case_suffix: bool,

    /// `None` once an explicit file name made the version unknown.
    version: Option<Counter>,
    intermediate_counter: Counter,
    base_name: String,
    intermediate_path: PathBuf,
}

impl<'a> VersionNameCreator<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        scheme: &'a dyn VersionNamingScheme,
        filters: &'a dyn FilterRegistry,
        listing: &'a dyn DirectoryListing,
        settings: &'a VersionManagerSettings,
        workspace_formats: Vec<String>,
        loaded_file: &VersionFileInfo,
        resolved_initial_history: &'a ImageHistory,
        current_history: &'a ImageHistory,
    ) -> Self {
        let mut loaded_file = loaded_file.clone();
        loaded_file.format = loaded_file.format.to_uppercase();
        let loaded_file_name = loaded_file.file_name.clone().unwrap_or_default();

        Self {
            scheme,
            filters,
            listing,
            settings,
            workspace_formats,
            resolved_initial_history,
            current_history,
            from_raw: format::is_raw_format(&loaded_file.format),
            lower_case_suffix: prefers_lower_case_suffix(&loaded_file_name),
            loaded_file_name,
            loaded_file,
            result: VersionFileInfo::default(),
            operation: VersionFileOperation::default(),
            new_version: false,
            version: Some(scheme.initial_counter()),
            intermediate_counter: scheme.initial_counter(),
            base_name: String::new(),
            intermediate_path: PathBuf::new(),
        }
    }

    // =========================================================================
    // Need for a new version
    // =========================================================================

    /// Decides whether the loaded file can be overwritten.
    ///
    /// A new version is needed when no original or intermediate was found on
    /// disk, or when the loaded format is raw or not a workspace format.
    pub(crate) fn check_need_new_version(&mut self) {
        let has_original = self
            .resolved_initial_history
            .has_referred_image_of_type(HistoryImageType::Original);
        let has_intermediate = self
            .resolved_initial_history
            .has_referred_image_of_type(HistoryImageType::Intermediate);
        let is_workspace_format = self.workspace_formats.contains(&self.loaded_file.format);

        debug!(
            has_original,
            has_intermediate,
            from_raw = self.from_raw,
            is_workspace_format,
            "checking need for new version"
        );

        self.new_version =
            (!has_original && !has_intermediate) || self.from_raw || !is_workspace_format;
    }

    pub(crate) fn fork(&mut self) {
        self.new_version = true;
    }

    // =========================================================================
    // Directory and format
    // =========================================================================

    pub(crate) fn set_save_directory(&mut self) {
        let path = &self.loaded_file.path;
        self.result.path = self.scheme.directory(path, &self.loaded_file_name);
        self.intermediate_path = self
            .scheme
            .intermediate_directory(path, &self.loaded_file_name);
    }

    pub(crate) fn set_save_directory_to(&mut self, path: PathBuf) {
        self.intermediate_path = path.clone();
        self.result.path = path;
    }

    pub(crate) fn set_save_format(&mut self) {
        self.result.format = self.settings.format.clone();
    }

    pub(crate) fn set_save_format_to(&mut self, format: &str) {
        self.result.format = format.to_string();
    }

    // =========================================================================
    // File name
    // =========================================================================

    /// Picks the file name through the naming scheme.
    ///
    /// Without a new version the loaded name is kept (suffix adjusted to the
    /// save format). Otherwise version counters are tried until no file with
    /// the candidate stem exists in the save directory.
    pub(crate) fn set_save_file_name(&mut self) -> Result<()> {
        let parsed = self
            .scheme
            .base_name(&self.loaded_file.path, &self.loaded_file_name);
        if let Some(version) = parsed.version() {
            self.version = Some(version);
        }
        if let Some(counter) = parsed.intermediate_counter() {
            self.intermediate_counter = counter;
        }
        self.base_name = parsed.into_stem();

        debug!(
            file = %self.loaded_file_name,
            base_name = %self.base_name,
            version = ?self.version,
            intermediate_counter = %self.intermediate_counter,
            new_version = self.new_version,
            "analyzed loaded file name"
        );

        if !self.new_version {
            let mut file_name = self.loaded_file_name.clone();
            if !self.loaded_file.format.eq_ignore_ascii_case(&self.result.format) {
                set_file_suffix(&mut file_name, &self.result.format);
            }
            self.result.file_name = Some(file_name);
            return Ok(());
        }

        let directory = self.result.path.clone();
        let attempts = self.listing.entry_count(&directory)? + 1;
        let mut version = self
            .version
            .unwrap_or_else(|| self.scheme.initial_counter());

        // A directory with n entries blocks at most n candidates.
        for _ in 0..attempts {
            let suggested = self
                .scheme
                .version_file_name(&directory, &self.base_name, version);

            if !self.listing.has_file_with_stem(&directory, &suggested)? {
                self.version = Some(version);
                self.result.file_name = Some(add_file_suffix(
                    suggested,
                    &self.result.format,
                    self.lower_case_suffix,
                ));
                return Ok(());
            }

            version = self.scheme.incremented_counter(version);
        }

        Err(Error::NoAvailableName {
            directory,
            base_name: self.base_name.clone(),
        })
    }

    /// Uses `file_name` verbatim, keeping an unset name unset. The version
    /// counter becomes unknown.
    pub(crate) fn set_save_file_name_to(&mut self, file_name: Option<&str>) {
        self.base_name = file_name
            .unwrap_or_default()
            .split('.')
            .next()
            .unwrap_or_default()
            .to_string();
        self.result.file_name = file_name.map(str::to_string);
        self.version = None;
    }

    // =========================================================================
    // Operation
    // =========================================================================

    pub(crate) fn init_operation(&mut self) {
        let primary = if self.new_version {
            PrimaryTask::NewFile
        } else if self.result.file_name.as_deref() == Some(self.loaded_file_name.as_str()) {
            PrimaryTask::Replace
        } else {
            PrimaryTask::SaveAndDelete
        };

        self.operation.loaded_file = self.loaded_file.clone();
        self.operation.save_file = self.result.clone();
        self.operation.tasks = Tasks::new(primary);
    }

    /// Schedules intermediate snapshots according to the settings.
    ///
    /// Must run after [`init_operation`](Self::init_operation).
    pub(crate) fn check_intermediates(&mut self) -> Result<()> {
        let policy = self.settings.save_intermediate_versions;

        debug!(
            replace = self.operation.tasks.primary == PrimaryTask::Replace,
            after_each_session = policy.after_each_session,
            after_raw_conversion = policy.after_raw_conversion,
            when_not_reproducible = policy.when_not_reproducible,
            "checking intermediates"
        );

        let Some(version) = self.version else {
            debug!("version of save file unknown, no intermediates");
            return Ok(());
        };

        if policy.after_each_session && self.operation.tasks.primary == PrimaryTask::Replace {
            // The loaded file holds the state of the last session and is about
            // to be overwritten, so it becomes an intermediate.
            let loaded_format = self.loaded_file.format.clone();
            let intermediate = self.next_intermediate(version, &loaded_format)?;
            self.operation.tasks.move_to_intermediate = true;
            self.operation.intermediate_for_loaded_file = Some(intermediate);
        }

        // Inclusive range of steps whose result may need storing.
        // resolved.len() - 1 is the loaded file, current.len() - 1 the state being saved.
        let mut first_step = self.resolved_initial_history.len();
        let Some(last_step) = self.current_history.len().checked_sub(2) else {
            return Ok(());
        };

        debug!(
            initial_history = self.resolved_initial_history.len(),
            current_history = self.current_history.len(),
            first_step,
            last_step,
            "intermediate step range"
        );

        if last_step < first_step {
            // single editing step, or a redo moved the history backwards
            return Ok(());
        }

        if first_step == 0 {
            debug!("invalid history: resolved initial history has no entries");
            first_step = 1;
        }

        if policy.after_raw_conversion {
            let raw_conversion_step = (first_step..=last_step).rev().find(|&step| {
                self.current_history
                    .action(step)
                    .is_some_and(|action| self.filters.is_raw_conversion(&action.identifier))
            });

            if let Some(step) = raw_conversion_step {
                self.operation
                    .intermediates
                    .insert(step, VersionFileInfo::default());
            }
        }

        if policy.when_not_reproducible {
            for step in first_step..=last_step {
                let Some(action) = self.current_history.action(step) else {
                    continue;
                };
                debug!(step, reproducible = action.category.is_reproducible(), "history step");

                if !action.category.is_reproducible() {
                    self.operation
                        .intermediates
                        .insert(step, VersionFileInfo::default());
                }
            }
        }

        if self.operation.intermediates.is_empty() {
            return Ok(());
        }

        let steps: Vec<usize> = self.operation.intermediates.keys().copied().collect();
        debug!(?steps, "saving intermediates after steps");

        self.operation.tasks.store_intermediates = true;
        let save_format = self.result.format.clone();
        for step in steps {
            let intermediate = self.next_intermediate(version, &save_format)?;
            self.operation.intermediates.insert(step, intermediate);
        }

        Ok(())
    }

    /// Next free intermediate name.
    ///
    /// The intermediate counter advances on every attempt, so one run never
    /// hands out the same number twice.
    fn next_intermediate(&mut self, version: Counter, format: &str) -> Result<VersionFileInfo> {
        let directory = self.intermediate_path.clone();
        let attempts = self.listing.entry_count(&directory)? + 1;

        for _ in 0..attempts {
            let suggested = self.scheme.intermediate_file_name(
                &directory,
                &self.base_name,
                version,
                self.intermediate_counter,
            );
            self.intermediate_counter = self.scheme.incremented_counter(self.intermediate_counter);

            if !self.listing.has_file_with_stem(&directory, &suggested)? {
                return Ok(VersionFileInfo {
                    path: directory,
                    file_name: Some(add_file_suffix(suggested, format, self.lower_case_suffix)),
                    format: format.to_string(),
                });
            }
        }

        Err(Error::NoAvailableName {
            directory,
            base_name: self.base_name.clone(),
        })
    }

    pub(crate) fn into_operation(self) -> VersionFileOperation {
        self.operation
    }
}

// =============================================================================
// Suffix Helpers
// =============================================================================

/// Whether a new suffix should be lower case, judged from the last letter of
/// `file_name`.
///
/// Digits are skipped, so `photo.jp2` counts as lower case. Names without any
/// letter default to lower case.
pub(crate) fn prefers_lower_case_suffix(file_name: &str) -> bool {
    file_name
        .chars()
        .rev()
        .find(|c| c.is_alphabetic())
        .map_or(true, |c| !c.is_uppercase())
}

fn cased_suffix(format: &str, lower_case: bool) -> String {
    if lower_case {
        format.to_lowercase()
    } else {
        format.to_uppercase()
    }
}

/// Replaces the extension of `file_name` with `format` unless it already matches.
pub(crate) fn set_file_suffix(file_name: &mut String, format: &str) {
    if file_name.is_empty() {
        return;
    }

    let lower_case = prefers_lower_case_suffix(file_name);
    let suffix_begin = match file_name.rfind('.') {
        Some(index) => index + 1,
        None => {
            file_name.push('.');
            file_name.len()
        }
    };

    if !file_name[suffix_begin..].eq_ignore_ascii_case(format) {
        file_name.truncate(suffix_begin);
        file_name.push_str(&cased_suffix(format, lower_case));
    }
}

/// Appends `.format` to an extension-less name.
pub(crate) fn add_file_suffix(mut file_name: String, format: &str, lower_case: bool) -> String {
    if file_name.is_empty() {
        return file_name;
    }
    if !file_name.ends_with('.') {
        file_name.push('.');
    }
    file_name.push_str(&cased_suffix(format, lower_case));
    file_name
}
