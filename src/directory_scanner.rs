// SPDX-License-Identifier: MPL-2.0
//! Read-only directory queries used to avoid file name collisions.
//!
//! The naming engine needs two answers from the filesystem: how many entries
//! a directory holds (which bounds the number of candidate names to try) and
//! whether a file `"<stem>.*"` already exists. Both are behind
//! [`DirectoryListing`] so callers can plug in a different view of the disk.

use crate::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub trait DirectoryListing: Send + Sync {
    /// Number of entries in `directory`. A missing directory has none.
    fn entry_count(&self, directory: &Path) -> Result<usize>;

    /// Whether a regular file named `"<stem>.<anything>"` exists in `directory`.
    fn has_file_with_stem(&self, directory: &Path, stem: &str) -> Result<bool>;
}

/// [`DirectoryListing`] backed by [`std::fs::read_dir`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectory;

impl DirectoryListing for FsDirectory {
    fn entry_count(&self, directory: &Path) -> Result<usize> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };

        let mut count = 0;
        for entry in entries {
            entry?;
            count += 1;
        }
        Ok(count)
    }

    fn has_file_with_stem(&self, directory: &Path, stem: &str) -> Result<bool> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(err.into()),
        };

        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };

            if matches_stem(name, stem) && entry.path().is_file() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// `name` matches the pattern `"<stem>.*"`.
fn matches_stem(name: &str, stem: &str) -> bool {
    name.strip_prefix(stem)
        .is_some_and(|rest| rest.starts_with('.'))
}
