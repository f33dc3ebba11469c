// SPDX-License-Identifier: MPL-2.0
//! Serializable view of a [`VersionFileOperation`].
//!
//! TOML tables cannot use integer keys, so the step-indexed intermediates are
//! flattened into an array of `{ step, file }` entries.

use crate::domain::versioning::{PrimaryTask, VersionFileInfo, VersionFileOperation};
use crate::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationReport {
    /// Task names in kebab case, primary task first.
    pub tasks: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_url: Option<String>,
    pub loaded_file: VersionFileInfo,
    pub save_file: VersionFileInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_for_loaded_file: Option<VersionFileInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub intermediates: Vec<IntermediateReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntermediateReport {
    /// Index of the history step the snapshot captures.
    pub step: usize,
    pub file: VersionFileInfo,
}

impl From<&VersionFileOperation> for OperationReport {
    fn from(operation: &VersionFileOperation) -> Self {
        let mut tasks = vec![match operation.tasks.primary {
            PrimaryTask::NewFile => "new-file",
            PrimaryTask::Replace => "replace",
            PrimaryTask::SaveAndDelete => "save-and-delete",
        }];
        if operation.tasks.move_to_intermediate {
            tasks.push("move-to-intermediate");
        }
        if operation.tasks.store_intermediates {
            tasks.push("store-intermediates");
        }

        Self {
            tasks,
            save_url: operation.save_file.file_url().map(String::from),
            loaded_file: operation.loaded_file.clone(),
            save_file: operation.save_file.clone(),
            intermediate_for_loaded_file: operation.intermediate_for_loaded_file.clone(),
            intermediates: operation
                .intermediates
                .iter()
                .map(|(step, file)| IntermediateReport {
                    step: *step,
                    file: file.clone(),
                })
                .collect(),
        }
    }
}

impl OperationReport {
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
