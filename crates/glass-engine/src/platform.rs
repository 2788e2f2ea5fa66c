//! The window-system seam the engine is written against.

use crate::{
    color::ColorProfile,
    error::Result,
    geom::Rect,
    window::{WindowHandle, WindowSnapshot},
};

/// Window-system primitives the engine consumes.
///
/// Implementations hide any callback-based enumeration and present plain value-returning
/// calls. All methods are synchronous and called from the single session worker.
pub trait Platform: Send + Sync {
    /// Every top-level window in window-system order, with the alpha read fresh.
    fn enumerate(&self) -> Result<Vec<WindowSnapshot>>;

    /// Apply `alpha` (1..=255). 255 restores the window and clears the layered flag.
    fn set_opacity(&self, handle: WindowHandle, alpha: u8) -> Result<()>;

    /// Current alpha; 255 for windows that are not translucent.
    fn opacity(&self, handle: WindowHandle) -> u8;

    /// Window currently receiving input focus.
    fn foreground(&self) -> Option<WindowHandle>;

    /// Current bounds of `handle`.
    fn rect(&self, handle: WindowHandle) -> Option<Rect>;

    /// Best-effort interior pixel sample.
    fn sample_pixels(&self, handle: WindowHandle) -> Option<ColorProfile>;

    /// Processes whose windows are never targets: this process and its parent.
    fn excluded_pids(&self) -> Vec<u32>;
}
