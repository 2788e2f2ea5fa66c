//! Sampled pixel colors and the brightness they imply.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// Marker the window system returns for pixels it cannot read.
pub const CLR_INVALID: u32 = 0xFFFF_FFFF;

/// A single sampled pixel, decoded from a `0x00BBGGRR` color reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Color {
    /// Raw color reference as sampled.
    pub colorref: u32,
    /// Perceptual gray level (0.30 R + 0.59 G + 0.11 B).
    pub gray: u8,
    /// Hue in degrees, `0..360`.
    pub hue: u16,
    /// Saturation, `0..=255`.
    pub saturation: u8,
    /// Value (brightest channel), `0..=255`.
    pub value: u8,
}

impl Color {
    /// Decode a sampled color reference. Returns `None` for [`CLR_INVALID`].
    ///
    /// A reference of `0` is read as white.
    pub fn from_colorref(colorref: u32) -> Option<Self> {
        if colorref == CLR_INVALID {
            return None;
        }
        let colorref = if colorref == 0 { 0x00FF_FFFF } else { colorref };

        let r = (colorref & 0xFF) as i32;
        let g = ((colorref >> 8) & 0xFF) as i32;
        let b = ((colorref >> 16) & 0xFF) as i32;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let chroma = max - min;

        let mut hue = if chroma == 0 {
            0
        } else if max == r {
            60 * (g - b) / chroma
        } else if max == g {
            60 * (b - r) / chroma + 120
        } else {
            60 * (r - g) / chroma + 240
        };
        if hue < 0 {
            hue += 360;
        }
        let saturation = if max == 0 { 0 } else { chroma * 255 / max };
        let gray = f64::from(r) * 0.3 + f64::from(g) * 0.59 + f64::from(b) * 0.11;

        Some(Self {
            colorref,
            gray: gray as u8,
            hue: hue as u16,
            saturation: saturation as u8,
            value: max as u8,
        })
    }
}

/// Small set of interior pixel samples for one window.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ColorProfile(Vec<Color>);

impl ColorProfile {
    /// Decode raw samples, dropping unreadable pixels.
    pub fn from_colorrefs<I: IntoIterator<Item = u32>>(refs: I) -> Self {
        Self(refs.into_iter().filter_map(Color::from_colorref).collect())
    }

    /// Number of usable samples.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no sample could be read.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mean gray level, or `default` when the profile is empty.
    pub fn avg_gray(&self, default: u8) -> u8 {
        if self.0.is_empty() {
            return default;
        }
        let sum: usize = self.0.iter().map(|c| usize::from(c.gray)).sum();
        (sum / self.0.len()) as u8
    }
}

impl Display for ColorProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let parts: Vec<String> = self.0.iter().map(|c| format!("{:x}", c.colorref)).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
