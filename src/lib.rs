// SPDX-License-Identifier: MPL-2.0
//! `image_versioning` decides where and under which name an edited image is
//! saved when non-destructive editing is on.
//!
//! Given the loaded file, its edit history and the user's preferences,
//! [`VersionManager`](version_manager::VersionManager) answers with a
//! [`VersionFileOperation`](domain::versioning::VersionFileOperation): the file
//! to write, whether the loaded file is replaced, and which intermediate
//! snapshots to keep. Nothing is written to disk by this crate; it only reads
//! directories to avoid name collisions.

#![doc(html_root_url = "https://docs.rs/image_versioning/0.3.0")]

pub mod config;
pub mod directory_scanner;
pub mod domain;
pub mod error;
pub mod filters;
pub mod format;
pub mod naming;
pub mod paths;
pub mod report;
pub mod version_manager;
