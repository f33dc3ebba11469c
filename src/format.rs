// SPDX-License-Identifier: MPL-2.0
//! Image format tags.
//!
//! Formats are identified by upper-case tags (`"JPG"`, `"TIFF"`, ...). Camera
//! raw files get a `RAW-` prefix followed by their extension, so every raw
//! format can be recognized by prefix alone.

use std::path::Path;

/// Formats that can be edited and overwritten in place.
pub const WORKSPACE_FORMATS: &[&str] = &["JPG", "PNG", "TIFF", "PGF", "JP2"];

/// Prefix shared by all raw format tags.
pub const RAW_FORMAT_PREFIX: &str = "RAW";

/// Camera raw file extensions (lower case).
pub const RAW_EXTENSIONS: &[&str] = &[
    "3fr", "arw", "cr2", "cr3", "crw", "dcr", "dng", "erf", "kdc", "mef", "mos", "mrw", "nef",
    "nrw", "orf", "pef", "raf", "raw", "rw2", "rwl", "sr2", "srf", "srw", "x3f",
];

/// Extension aliases mapped to their canonical format tag.
const FORMAT_ALIASES: &[(&str, &str)] = &[
    ("jpeg", "JPG"),
    ("jpe", "JPG"),
    ("tif", "TIFF"),
    ("j2k", "JP2"),
    ("jpx", "JP2"),
    ("jpc", "JP2"),
];

/// Derives the format tag of a file from its extension.
///
/// Returns `None` when the path has no extension.
#[must_use]
pub fn format_from_path<P: AsRef<Path>>(path: P) -> Option<String> {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)?;

    if extension.is_empty() {
        return None;
    }

    if RAW_EXTENSIONS.contains(&extension.as_str()) {
        return Some(format!("{RAW_FORMAT_PREFIX}-{}", extension.to_uppercase()));
    }

    let canonical = FORMAT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == extension)
        .map_or_else(|| extension.to_uppercase(), |(_, tag)| (*tag).to_string());
    Some(canonical)
}

/// Whether `format` names a camera raw format (`RAW`, `RAW-CR2`, ...).
#[must_use]
pub fn is_raw_format(format: &str) -> bool {
    format.to_uppercase().starts_with(RAW_FORMAT_PREFIX)
}
