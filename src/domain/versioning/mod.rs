// SPDX-License-Identifier: MPL-2.0
//! Versioning domain types.
//!
//! - [`VersionFileInfo`]: directory, name and format of a version file
//! - [`VersionFileOperation`]: what the caller has to write, replace or delete
//! - [`VersionManagerSettings`]: user preferences for non-destructive editing
//! - [`Counter`]: opaque version/intermediate counter

pub mod file_info;
pub mod newtypes;
pub mod operation;
pub mod settings;

pub use file_info::VersionFileInfo;
pub use newtypes::Counter;
pub use operation::{PrimaryTask, Task, Tasks, VersionFileOperation};
pub use settings::{
    EditorClosingMode, IntermediatePolicy, VersionManagerSettings, ViewFlags,
    DEFAULT_VERSION_FORMAT,
};
