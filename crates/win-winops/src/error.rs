use std::result::Result as StdResult;

use thiserror::Error;
use windows::core::Error as Win32Error;

/// Errors from Win32 window calls.
#[derive(Error, Debug)]
pub enum Error {
    /// A Win32 call reported failure.
    #[error("{op} failed: {source}")]
    Win32 {
        /// Name of the failing call.
        op: &'static str,
        /// Underlying OS error.
        #[source]
        source: Win32Error,
    },

    /// The handle no longer refers to a window.
    #[error("window {0:#x} is gone")]
    WindowGone(isize),
}

impl Error {
    /// Adapter for `map_err` on a named Win32 call.
    pub fn win32(op: &'static str) -> impl FnOnce(Win32Error) -> Self {
        move |source| Self::Win32 { op, source }
    }
}

/// Result alias for this crate.
pub type Result<T> = StdResult<T, Error>;
