// SPDX-License-Identifier: MPL-2.0
//! Classification of filter identifiers.

use std::collections::HashSet;

/// Identifier of the built-in raw conversion filter.
pub const RAW_CONVERTER_IDENTIFIER: &str = "digikam:RawConverter";

/// Answers questions about filters referenced from an edit history.
pub trait FilterRegistry: Send + Sync {
    /// Whether the filter turns raw sensor data into a regular image.
    fn is_raw_conversion(&self, identifier: &str) -> bool;
}

/// Registry knowing the built-in raw converter plus any registered extras.
#[derive(Debug, Clone, Default)]
pub struct DefaultFilterRegistry {
    extra_raw_converters: HashSet<String>,
}

impl DefaultFilterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an additional raw conversion filter (e.g. from a plugin).
    #[must_use]
    pub fn with_raw_converter(mut self, identifier: impl Into<String>) -> Self {
        self.extra_raw_converters.insert(identifier.into());
        self
    }
}

impl FilterRegistry for DefaultFilterRegistry {
    fn is_raw_conversion(&self, identifier: &str) -> bool {
        identifier == RAW_CONVERTER_IDENTIFIER || self.extra_raw_converters.contains(identifier)
    }
}
