use std::ffi::c_void;

use glass_engine::{Rect, WindowFlags, WindowHandle, WindowSnapshot};
use tracing::trace;
use windows::{
    Win32::{
        Foundation::{HWND, LPARAM, RECT},
        UI::WindowsAndMessaging::{
            EnumWindows, GW_HWNDPREV, GWL_EXSTYLE, GetForegroundWindow, GetWindow,
            GetWindowLongW, GetWindowRect, GetWindowTextLengthW, GetWindowTextW,
            GetWindowThreadProcessId, IsIconic, IsWindow, IsWindowVisible, WS_EX_TOOLWINDOW,
        },
    },
    core::BOOL,
};

use crate::{
    alpha::read_alpha,
    error::{Error, Result},
};

/// Engine handle to Win32 handle.
pub fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut c_void)
}

/// Win32 handle to engine handle.
pub fn handle(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

/// `EnumWindows` callback; `lparam` points at the output vector.
unsafe extern "system" fn collect(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: `list_handles` passes a live `&mut Vec<HWND>` for the duration of the call.
    let out = unsafe { &mut *(lparam.0 as *mut Vec<HWND>) };
    out.push(hwnd);
    BOOL::from(true)
}

/// Every top-level window handle in z-order.
fn list_handles() -> Result<Vec<HWND>> {
    let mut out: Vec<HWND> = Vec::new();
    unsafe { EnumWindows(Some(collect), LPARAM(&mut out as *mut Vec<HWND> as isize)) }
        .map_err(Error::win32("EnumWindows"))?;
    Ok(out)
}

/// True while `hwnd` refers to a window.
pub fn exists(hwnd: HWND) -> bool {
    unsafe { IsWindow(Some(hwnd)) }.as_bool()
}

/// Window title; empty when the window has none.
fn title(hwnd: HWND) -> String {
    let len = unsafe { GetWindowTextLengthW(hwnd) };
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u16; len as usize + 1];
    let n = unsafe { GetWindowTextW(hwnd, &mut buf) };
    String::from_utf16_lossy(&buf[..n.max(0) as usize])
}

/// Bounds of `hwnd`, if readable.
pub fn window_rect(hwnd: HWND) -> Option<Rect> {
    let mut r = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut r) }.ok()?;
    Some(Rect::new(r.left, r.top, r.right, r.bottom))
}

/// The window the system reports just before `hwnd` in z-order.
fn z_prev(hwnd: HWND) -> Option<WindowHandle> {
    unsafe { GetWindow(hwnd, GW_HWNDPREV) }
        .ok()
        .filter(|h| !h.0.is_null())
        .map(handle)
}

/// Owning process id.
fn pid(hwnd: HWND) -> u32 {
    let mut pid = 0u32;
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
    pid
}

/// Visibility and style flags.
fn flags(hwnd: HWND) -> WindowFlags {
    let ex_style = unsafe { GetWindowLongW(hwnd, GWL_EXSTYLE) } as u32;
    WindowFlags {
        visible: unsafe { IsWindowVisible(hwnd) }.as_bool(),
        minimized: unsafe { IsIconic(hwnd) }.as_bool(),
        tool_window: ex_style & WS_EX_TOOLWINDOW.0 != 0,
    }
}

/// Snapshot every top-level window, reading the alpha fresh.
///
/// Handles that close between enumeration and the attribute reads are skipped.
pub fn list_windows() -> Result<Vec<WindowSnapshot>> {
    let handles = list_handles()?;
    let mut out = Vec::with_capacity(handles.len());
    for hwnd in handles {
        if !exists(hwnd) {
            continue;
        }
        let rect = window_rect(hwnd).unwrap_or_default();
        let w = WindowSnapshot::new(handle(hwnd), title(hwnd), pid(hwnd), rect)
            .with_z_prev(z_prev(hwnd))
            .with_flags(flags(hwnd))
            .with_alpha(read_alpha(hwnd));
        out.push(w);
    }
    trace!(count = out.len(), "list_windows");
    Ok(out)
}

/// Window with input focus, if any.
pub fn foreground() -> Option<WindowHandle> {
    let hwnd = unsafe { GetForegroundWindow() };
    (!hwnd.0.is_null()).then(|| handle(hwnd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_conversion_roundtrips() {
        let h = WindowHandle(0x1234);
        assert_eq!(handle(hwnd(h)), h);
    }

    #[test]
    fn enumeration_succeeds() {
        let windows = list_windows().expect("list");
        for w in &windows {
            assert!(w.original_alpha >= 1);
        }
    }
}
