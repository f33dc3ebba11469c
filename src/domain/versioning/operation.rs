// SPDX-License-Identifier: MPL-2.0
//! Outcome of a versioning decision.
//!
//! A [`VersionFileOperation`] tells the caller which files to write and what
//! to do with the loaded file. The naming engine never touches image files
//! itself; the caller carries out the plan.

use super::file_info::VersionFileInfo;
use std::collections::BTreeMap;
use std::path::PathBuf;

// =============================================================================
// Tasks
// =============================================================================

/// The main action of a save. Exactly one applies to every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimaryTask {
    /// Write a new file; the loaded file stays untouched.
    #[default]
    NewFile,
    /// Overwrite the loaded file in place.
    Replace,
    /// Write under a new name, then delete the loaded file.
    SaveAndDelete,
}

/// Any single task, for membership queries on [`Tasks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    NewFile,
    Replace,
    SaveAndDelete,
    MoveToIntermediate,
    StoreIntermediates,
}

/// Task set of an operation: one primary task plus optional extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tasks {
    pub primary: PrimaryTask,
    /// Move the loaded file aside as an intermediate before replacing it.
    pub move_to_intermediate: bool,
    /// Also write the intermediate snapshots listed in the operation.
    pub store_intermediates: bool,
}

impl Tasks {
    #[must_use]
    pub fn new(primary: PrimaryTask) -> Self {
        Self {
            primary,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn contains(&self, task: Task) -> bool {
        match task {
            Task::NewFile => self.primary == PrimaryTask::NewFile,
            Task::Replace => self.primary == PrimaryTask::Replace,
            Task::SaveAndDelete => self.primary == PrimaryTask::SaveAndDelete,
            Task::MoveToIntermediate => self.move_to_intermediate,
            Task::StoreIntermediates => self.store_intermediates,
        }
    }
}

// =============================================================================
// VersionFileOperation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionFileOperation {
    pub loaded_file: VersionFileInfo,
    pub save_file: VersionFileInfo,
    pub tasks: Tasks,
    /// Where the loaded file goes before it is replaced (`MoveToIntermediate`).
    pub intermediate_for_loaded_file: Option<VersionFileInfo>,
    /// Snapshots to store, keyed by the index of the history step they capture.
    pub intermediates: BTreeMap<usize, VersionFileInfo>,
}

impl VersionFileOperation {
    /// Every path the caller has to account for when executing the operation.
    ///
    /// Order: save file, moved loaded file, then stored intermediates by step.
    #[must_use]
    pub fn all_file_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(path) = self.save_file.file_path() {
            paths.push(path);
        }

        if let Some(path) = self
            .intermediate_for_loaded_file
            .as_ref()
            .and_then(VersionFileInfo::file_path)
        {
            paths.push(path);
        }

        paths.extend(self.intermediates.values().filter_map(VersionFileInfo::file_path));
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_contain_exactly_one_primary() {
        let tasks = Tasks::new(PrimaryTask::Replace);
        assert!(tasks.contains(Task::Replace));
        assert!(!tasks.contains(Task::NewFile));
        assert!(!tasks.contains(Task::SaveAndDelete));
        assert!(!tasks.contains(Task::MoveToIntermediate));
    }

    #[test]
    fn default_tasks_write_new_file() {
        assert!(Tasks::default().contains(Task::NewFile));
    }

    #[test]
    fn all_file_paths_lists_save_then_intermediates_in_step_order() {
        let mut operation = VersionFileOperation {
            save_file: VersionFileInfo::new("/p", "a_v1.jpg", "JPG"),
            intermediate_for_loaded_file: Some(VersionFileInfo::new("/p", "a_v1-1.jpg", "JPG")),
            ..VersionFileOperation::default()
        };
        operation
            .intermediates
            .insert(4, VersionFileInfo::new("/p", "a_v1-3.jpg", "JPG"));
        operation
            .intermediates
            .insert(2, VersionFileInfo::new("/p", "a_v1-2.jpg", "JPG"));

        assert_eq!(
            operation.all_file_paths(),
            vec![
                PathBuf::from("/p/a_v1.jpg"),
                PathBuf::from("/p/a_v1-1.jpg"),
                PathBuf::from("/p/a_v1-2.jpg"),
                PathBuf::from("/p/a_v1-3.jpg"),
            ]
        );
    }

    #[test]
    fn all_file_paths_skips_null_infos() {
        let operation = VersionFileOperation::default();
        assert!(operation.all_file_paths().is_empty());
    }
}
