// SPDX-License-Identifier: MPL-2.0
//! Location and format of a version file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// A file taking part in a versioning decision: directory, name and format tag.
///
/// The format is an upper-case tag such as `"JPG"`, `"TIFF"` or `"RAW-CR2"`.
/// A missing `file_name` means no name could be assigned (a null info).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionFileInfo {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default)]
    pub format: String,
}

impl VersionFileInfo {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, file_name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_name: Some(file_name.into()),
            format: format.into(),
        }
    }

    /// Builds an info from a full file path, splitting off the directory.
    ///
    /// Returns `None` when the path has no UTF-8 file name.
    #[must_use]
    pub fn from_file_path(file_path: &Path, format: impl Into<String>) -> Option<Self> {
        let file_name = file_path.file_name()?.to_str()?.to_string();
        let path = file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Some(Self {
            path,
            file_name: Some(file_name),
            format: format.into(),
        })
    }

    /// Returns `true` if no file name is set.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.file_name.is_none()
    }

    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Full path of the file, `None` for a null info.
    #[must_use]
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file_name.as_ref().map(|name| self.path.join(name))
    }

    /// `file://` URL of the file.
    ///
    /// `None` for a null info or when the directory is not absolute.
    #[must_use]
    pub fn file_url(&self) -> Option<Url> {
        self.file_path().and_then(|path| Url::from_file_path(path).ok())
    }
}
