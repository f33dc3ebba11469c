// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("History Error: {0}")]
    History(String),

    /// Every candidate counter for `base_name` is already taken in `directory`.
    ///
    /// Only reachable with a naming scheme whose counters repeat, or when files
    /// appear in the directory while it is being scanned.
    #[error("No free file name for '{base_name}' in {}", directory.display())]
    NoAvailableName {
        directory: PathBuf,
        base_name: String,
    },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn no_available_name_mentions_base_and_directory() {
        let err = Error::NoAvailableName {
            directory: PathBuf::from("/photos/2024"),
            base_name: "DSC0001".to_string(),
        };
        let message = format!("{}", err);
        assert!(message.contains("DSC0001"));
        assert!(message.contains("/photos/2024"));
    }

    #[test]
    fn toml_parse_error_becomes_config_error() {
        let parse_error = toml::from_str::<toml::Table>("not = valid = toml").unwrap_err();
        let err: Error = parse_error.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
