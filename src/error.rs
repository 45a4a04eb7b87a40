//! Error types for asset and configuration loading
//!
//! SDL calls keep returning `String` errors (that is what the `sdl2` crate
//! hands back); everything the menu can recover from gets a typed error so
//! the caller can pick a fallback per asset class.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an image asset
#[derive(Debug, Error)]
pub enum LoadError {
    /// File is missing or unreadable
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// SDL_image could not decode the file
    #[error("cannot decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Pixel data did not match the declared dimensions
    #[error("pixel data is {actual} bytes, expected {expected}")]
    Format { expected: usize, actual: usize },
}

/// Errors that can occur while loading `MenuConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
