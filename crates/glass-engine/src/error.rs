use std::result::Result as StdResult;

use thiserror::Error;

use crate::window::WindowHandle;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the glass engine and its platform adapters.
#[derive(Debug, Error)]
pub enum Error {
    /// The window-system listing call failed. Fatal to the current cycle.
    #[error("window enumeration failed: {0}")]
    Enumerate(String),

    /// Setting a window's opacity failed, usually because it closed.
    #[error("failed to set opacity of window {handle}: {reason}")]
    SetOpacity {
        /// Window the call targeted.
        handle: WindowHandle,
        /// Platform-reported reason.
        reason: String,
    },

    /// No window title matched the requested filter terms.
    #[error("no window title matches {0:?}")]
    NoMatchingWindow(String),

    /// A session was configured with out-of-range values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
