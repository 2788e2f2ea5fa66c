use glass_engine::{ColorProfile, Rect};
use windows::Win32::{
    Foundation::HWND,
    Graphics::Gdi::{GetPixel, GetWindowDC, ReleaseDC},
};

/// Points sampled along the window's diagonal.
const SAMPLES: i32 = 3;

/// Read `SAMPLES` pixels at even steps along the diagonal of the window interior.
///
/// Coordinates are relative to the window DC. Returns `None` when no DC is available or no
/// pixel could be read.
pub fn sample(hwnd: HWND, rect: Rect) -> Option<ColorProfile> {
    let dx = rect.width() / (SAMPLES + 1);
    let dy = rect.height() / (SAMPLES + 1);

    let hdc = unsafe { GetWindowDC(Some(hwnd)) };
    if hdc.is_invalid() {
        return None;
    }
    let refs: Vec<u32> = (1..=SAMPLES)
        .map(|i| unsafe { GetPixel(hdc, dx * i, dy * i) }.0)
        .collect();
    unsafe { ReleaseDC(Some(hwnd), hdc) };

    let profile = ColorProfile::from_colorrefs(refs);
    (!profile.is_empty()).then_some(profile)
}
