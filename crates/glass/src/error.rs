//! Error handling for the glass binary.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for glass commands.
pub type Result<T> = result::Result<T, Error>;

/// Errors that end a glass command.
#[derive(Debug, Error)]
pub enum Error {
    /// Failure inside the engine or the window system adapter.
    #[error(transparent)]
    Engine(#[from] glass_engine::Error),
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The listing could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// No target title was given.
    #[error("target missing; pass --target or one or more titles")]
    MissingTarget,
    /// Window transparency needs the Win32 layered-window API.
    #[cfg(not(windows))]
    #[error("glass only runs on Windows")]
    UnsupportedPlatform,
}
