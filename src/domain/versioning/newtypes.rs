// SPDX-License-Identifier: MPL-2.0
//! Versioning newtypes.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Counter
// =============================================================================

/// Version or intermediate counter handed out by a naming scheme.
///
/// Orchestration code treats counters as opaque: they are created with
/// [`VersionNamingScheme::initial_counter`](crate::naming::VersionNamingScheme::initial_counter)
/// and advanced with
/// [`VersionNamingScheme::incremented_counter`](crate::naming::VersionNamingScheme::incremented_counter),
/// never by arithmetic at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counter(u32);

impl Counter {
    /// Wraps a raw counter value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Counter {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
