//! win-winops: Win32 window operations for glass.
//!
//! [`WinPlatform`] implements [`glass_engine::Platform`] over `user32`/`gdi32`:
//! top-level enumeration with z-previous links, layered-window alpha, foreground
//! queries, and a small interior pixel sample used for brightness.
//!
//! Windows-only; the crate is empty elsewhere.
#![cfg(windows)]

mod alpha;
mod error;
mod pixels;
mod process;
mod window;

use glass_engine::{
    ColorProfile, Error as EngineError, Platform, Rect, Result as EngineResult, WindowHandle,
    WindowSnapshot,
};

pub use error::{Error, Result};
pub use process::parent_pid;

/// The live Win32 window system.
#[derive(Clone, Copy, Debug, Default)]
pub struct WinPlatform;

impl WinPlatform {
    /// Adapter over the current desktop.
    pub fn new() -> Self {
        Self
    }
}

impl Platform for WinPlatform {
    fn enumerate(&self) -> EngineResult<Vec<WindowSnapshot>> {
        window::list_windows().map_err(|e| EngineError::Enumerate(e.to_string()))
    }

    fn set_opacity(&self, handle: WindowHandle, alpha: u8) -> EngineResult<()> {
        alpha::set_alpha(window::hwnd(handle), alpha).map_err(|e| EngineError::SetOpacity {
            handle,
            reason: e.to_string(),
        })
    }

    fn opacity(&self, handle: WindowHandle) -> u8 {
        alpha::read_alpha(window::hwnd(handle))
    }

    fn foreground(&self) -> Option<WindowHandle> {
        window::foreground()
    }

    fn rect(&self, handle: WindowHandle) -> Option<Rect> {
        window::window_rect(window::hwnd(handle))
    }

    fn sample_pixels(&self, handle: WindowHandle) -> Option<ColorProfile> {
        let hwnd = window::hwnd(handle);
        let rect = window::window_rect(hwnd)?;
        pixels::sample(hwnd, rect)
    }

    fn excluded_pids(&self) -> Vec<u32> {
        process::excluded_pids()
    }
}
