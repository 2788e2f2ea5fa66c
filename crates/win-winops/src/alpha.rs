//! Layered-window alpha.
//!
//! Alpha lives on the `WS_EX_LAYERED` extended style. A window without that style is fully
//! opaque; restoring to 255 also clears the style so the window goes back to normal
//! composition.

use glass_engine::MIN_ALPHA;
use tracing::trace;
use windows::Win32::{
    Foundation::{COLORREF, HWND},
    UI::WindowsAndMessaging::{
        GWL_EXSTYLE, GetLayeredWindowAttributes, GetWindowLongW, LAYERED_WINDOW_ATTRIBUTES_FLAGS,
        LWA_ALPHA, SetLayeredWindowAttributes, SetWindowLongW, WS_EX_LAYERED,
    },
};

use crate::{
    error::{Error, Result},
    window::{exists, handle},
};

/// Extended style bits.
fn ex_style(hwnd: HWND) -> u32 {
    unsafe { GetWindowLongW(hwnd, GWL_EXSTYLE) as u32 }
}

/// Replace the extended style bits.
fn set_ex_style(hwnd: HWND, style: u32) {
    unsafe { SetWindowLongW(hwnd, GWL_EXSTYLE, style as i32) };
}

/// Current alpha; 255 when the window is not layered or has no alpha attribute.
pub fn read_alpha(hwnd: HWND) -> u8 {
    if ex_style(hwnd) & WS_EX_LAYERED.0 == 0 {
        return u8::MAX;
    }
    let mut alpha = u8::MAX;
    let mut flags = LAYERED_WINDOW_ATTRIBUTES_FLAGS::default();
    let ok = unsafe { GetLayeredWindowAttributes(hwnd, None, Some(&mut alpha), Some(&mut flags)) };
    if ok.is_err() || flags.0 & LWA_ALPHA.0 == 0 {
        return u8::MAX;
    }
    alpha
}

/// Apply `alpha`. 0 is raised to 1; 255 restores the window only if it is translucent.
pub fn set_alpha(hwnd: HWND, alpha: u8) -> Result<()> {
    if !exists(hwnd) {
        return Err(Error::WindowGone(hwnd.0 as isize));
    }
    let alpha = alpha.max(MIN_ALPHA);
    if alpha == u8::MAX {
        if read_alpha(hwnd) == u8::MAX {
            return Ok(());
        }
        unsafe { SetLayeredWindowAttributes(hwnd, COLORREF(0), u8::MAX, LWA_ALPHA) }
            .map_err(Error::win32("SetLayeredWindowAttributes"))?;
        set_ex_style(hwnd, ex_style(hwnd) & !WS_EX_LAYERED.0);
        trace!(hwnd = %handle(hwnd), "alpha_cleared");
        return Ok(());
    }

    set_ex_style(hwnd, ex_style(hwnd) | WS_EX_LAYERED.0);
    unsafe { SetLayeredWindowAttributes(hwnd, COLORREF(0), alpha, LWA_ALPHA) }
        .map_err(Error::win32("SetLayeredWindowAttributes"))?;
    trace!(hwnd = %handle(hwnd), alpha, "alpha_set");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::*;

    #[test]
    fn null_window_is_gone() {
        let null = HWND(ptr::null_mut());
        assert!(matches!(set_alpha(null, 100), Err(Error::WindowGone(0))));
        assert_eq!(read_alpha(null), 255);
    }
}
