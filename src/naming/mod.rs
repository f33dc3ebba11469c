// SPDX-License-Identifier: MPL-2.0
//! Naming schemes for version and intermediate files.
//!
//! The orchestration in [`crate::version_manager`] never formats file names
//! itself; it asks a [`VersionNamingScheme`]. The built-in
//! [`DefaultVersionNamingScheme`] uses suffixes on the original stem:
//!
//! | File                  | Meaning                            |
//! |-----------------------|------------------------------------|
//! | `DSC0636.JPG`         | original, or another naming scheme |
//! | `DSC0636_v5.JPG`      | version 5                          |
//! | `DSC0636_v5-3.JPG`    | intermediate 3 of version 5        |

use crate::domain::versioning::Counter;
use std::path::{Path, PathBuf};

// =============================================================================
// Parsed Names
// =============================================================================

/// Result of splitting a file name into its stem and version suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedName {
    /// `<stem>_v<version>-<counter>`
    Intermediate {
        stem: String,
        version: Counter,
        counter: Counter,
    },
    /// `<stem>_v<version>`
    Versioned { stem: String, version: Counter },
    /// No recognized suffix.
    Plain { stem: String },
}

impl ParsedName {
    /// The name with any version suffix removed.
    #[must_use]
    pub fn stem(&self) -> &str {
        match self {
            Self::Intermediate { stem, .. } | Self::Versioned { stem, .. } | Self::Plain { stem } => {
                stem
            }
        }
    }

    #[must_use]
    pub fn into_stem(self) -> String {
        match self {
            Self::Intermediate { stem, .. } | Self::Versioned { stem, .. } | Self::Plain { stem } => {
                stem
            }
        }
    }

    #[must_use]
    pub fn version(&self) -> Option<Counter> {
        match self {
            Self::Intermediate { version, .. } | Self::Versioned { version, .. } => Some(*version),
            Self::Plain { .. } => None,
        }
    }

    #[must_use]
    pub fn intermediate_counter(&self) -> Option<Counter> {
        match self {
            Self::Intermediate { counter, .. } => Some(*counter),
            Self::Versioned { .. } | Self::Plain { .. } => None,
        }
    }
}

// =============================================================================
// VersionNamingScheme
// =============================================================================

/// Naming convention for versions and intermediates.
///
/// `path` is the directory of the file in question. The default scheme
/// ignores it, other schemes may use it to pick names or directories.
pub trait VersionNamingScheme: Send + Sync {
    /// Splits `file_name` into a stem and any counters this scheme encoded in it.
    fn base_name(&self, path: &Path, file_name: &str) -> ParsedName;

    /// Name (without extension) of version `counter` of `base_name`.
    fn version_file_name(&self, path: &Path, base_name: &str, counter: Counter) -> String;

    /// Name (without extension) of intermediate `counter` of version `version`.
    fn intermediate_file_name(
        &self,
        path: &Path,
        base_name: &str,
        version: Counter,
        counter: Counter,
    ) -> String;

    /// Directory new versions of `file_name` in `path` are saved to.
    fn directory(&self, path: &Path, _file_name: &str) -> PathBuf {
        path.to_path_buf()
    }

    /// Directory intermediates of `file_name` in `path` are saved to.
    fn intermediate_directory(&self, path: &Path, _file_name: &str) -> PathBuf {
        path.to_path_buf()
    }

    fn initial_counter(&self) -> Counter;

    fn incremented_counter(&self, counter: Counter) -> Counter;
}

// =============================================================================
// DefaultVersionNamingScheme
// =============================================================================

const VERSION_MARKER: &str = "_v";

/// `_v<N>` / `_v<N>-<M>` suffix scheme, saving next to the loaded file.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultVersionNamingScheme;

impl VersionNamingScheme for DefaultVersionNamingScheme {
    fn base_name(&self, _path: &Path, file_name: &str) -> ParsedName {
        parse_version_suffix(complete_base_name(file_name))
    }

    fn version_file_name(&self, _path: &Path, base_name: &str, counter: Counter) -> String {
        format!("{base_name}{VERSION_MARKER}{counter}")
    }

    fn intermediate_file_name(
        &self,
        _path: &Path,
        base_name: &str,
        version: Counter,
        counter: Counter,
    ) -> String {
        format!("{base_name}{VERSION_MARKER}{version}-{counter}")
    }

    fn initial_counter(&self) -> Counter {
        Counter::new(1)
    }

    fn incremented_counter(&self, counter: Counter) -> Counter {
        Counter::new(counter.value().saturating_add(1))
    }
}

/// File name without its last extension (`a.b.jpg` → `a.b`).
#[must_use]
pub fn complete_base_name(file_name: &str) -> &str {
    file_name
        .rfind('.')
        .map_or(file_name, |index| &file_name[..index])
}

/// Parses `<stem>_v<N>-<M>`, then `<stem>_v<N>`, else falls back to plain.
///
/// The stem is the longest prefix that still leaves a valid suffix, so the
/// last `_v` in the name is the only candidate split point. The stem must not
/// be empty, and counters must be ASCII digits that fit a `u32`.
fn parse_version_suffix(name: &str) -> ParsedName {
    let plain = || ParsedName::Plain {
        stem: name.to_string(),
    };

    let Some(marker) = name.rfind(VERSION_MARKER) else {
        return plain();
    };
    if marker == 0 {
        return plain();
    }

    let stem = &name[..marker];
    let suffix = &name[marker + VERSION_MARKER.len()..];

    if let Some((version, counter)) = suffix.split_once('-') {
        return match (parse_counter(version), parse_counter(counter)) {
            (Some(version), Some(counter)) => ParsedName::Intermediate {
                stem: stem.to_string(),
                version,
                counter,
            },
            _ => plain(),
        };
    }

    match parse_counter(suffix) {
        Some(version) => ParsedName::Versioned {
            stem: stem.to_string(),
            version,
        },
        None => plain(),
    }
}

fn parse_counter(digits: &str) -> Option<Counter> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().map(Counter::new)
}
