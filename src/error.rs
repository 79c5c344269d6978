//! Error types for theme loading and link interaction.
//!
//! Rendering never fails; these cover the fallible edges around it.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for color parsing operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Input string was empty.
    #[error("empty input")]
    EmptyInput,

    /// Hex string had an invalid length.
    #[error("invalid hex length: {0} (expected 3, 4, 6, or 8)")]
    InvalidLength(usize),

    /// Invalid hexadecimal character.
    #[error("invalid hex character")]
    InvalidHexChar,
}

/// Error loading a theme configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid theme config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Failure reported by a [`LinkHost`](crate::LinkHost) while handling a tap.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("failed to open {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("link prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}
