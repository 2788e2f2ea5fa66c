//! Per-poll window records.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use crate::{color::ColorProfile, curve::DEFAULT_BRIGHTNESS, geom::Rect};

/// Opaque window-system handle. Only compared and passed back to the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WindowHandle(pub isize);

impl Display for WindowHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:#x}", self.0)
    }
}

/// Window-system state flags read at enumeration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WindowFlags {
    /// The window has the visible style.
    pub visible: bool,
    /// The window is iconic.
    pub minimized: bool,
    /// Utility/palette window excluded from occlusion.
    pub tool_window: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            visible: true,
            minimized: false,
            tool_window: false,
        }
    }
}

impl WindowFlags {
    /// Visible and not minimized.
    pub fn is_shown(&self) -> bool {
        self.visible && !self.minimized
    }
}

/// Immutable record of one top-level window, rebuilt on every poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WindowSnapshot {
    /// Window title; not unique.
    pub title: String,
    /// Identity of the window.
    pub handle: WindowHandle,
    /// Owning process id.
    pub pid: u32,
    /// Next window along the chain the window system reports for this one (`GW_HWNDPREV`).
    pub z_prev: Option<WindowHandle>,
    /// Bounding rectangle.
    pub rect: Rect,
    /// Visibility and style flags.
    pub flags: WindowFlags,
    /// Alpha at first observation in this session; restored on exit.
    pub original_alpha: u8,
    /// Interior pixel samples, captured once per session.
    pub color_profile: Option<ColorProfile>,
}

impl WindowSnapshot {
    /// A visible, opaque window with no chain link and no color samples.
    pub fn new(handle: WindowHandle, title: impl Into<String>, pid: u32, rect: Rect) -> Self {
        Self {
            title: title.into(),
            handle,
            pid,
            z_prev: None,
            rect,
            flags: WindowFlags::default(),
            original_alpha: u8::MAX,
            color_profile: None,
        }
    }

    /// Set the z-previous link.
    pub fn with_z_prev(mut self, z_prev: Option<WindowHandle>) -> Self {
        self.z_prev = z_prev;
        self
    }

    /// Replace the flags.
    pub fn with_flags(mut self, flags: WindowFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the alpha observed for this window.
    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.original_alpha = alpha;
        self
    }

    /// Attach a color profile.
    pub fn with_profile(mut self, profile: ColorProfile) -> Self {
        self.color_profile = Some(profile);
        self
    }

    /// Average sampled gray, or the neutral default when nothing was sampled.
    pub fn brightness(&self) -> u8 {
        self.color_profile
            .as_ref()
            .map_or(DEFAULT_BRIGHTNESS, |p| p.avg_gray(DEFAULT_BRIGHTNESS))
    }
}

impl Display for WindowSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{:?}(HWND={}, PID={}) {:?}",
            self.title, self.handle, self.pid, self.rect
        )
    }
}
