//! Opacity as a function of stacking depth.

/// Brightness assumed for windows with no usable pixel samples.
pub const DEFAULT_BRIGHTNESS: u8 = 128;

/// Brightness at and below which no extra dimming is applied.
const BRIGHTNESS_KNEE: u8 = 128;

/// Multiplier reached at full white.
const BRIGHTNESS_FLOOR: f64 = 0.5;

/// Lowest alpha ever produced; 0 is reserved by the window system.
pub const MIN_ALPHA: u8 = 1;

/// Inputs to [`opacity`] shared by every window of one session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Curve {
    /// Strength in percent, `0..=100`. 0 leaves every window opaque.
    pub percent: u8,
    /// Exponent applied to depth, `1.0..=3.0`.
    pub power: f64,
}

impl Curve {
    /// Alpha for a window at `depth` with average gray `brightness`.
    pub fn alpha(&self, depth: usize, brightness: u8) -> u8 {
        opacity(self.percent, depth, self.power, brightness)
    }
}

/// Extra dimming factor for bright windows: 1.0 up to the knee, falling linearly to 0.5
/// at 255.
pub fn brightness_adjust(brightness: u8) -> f64 {
    if brightness <= BRIGHTNESS_KNEE {
        return 1.0;
    }
    let over = f64::from(brightness - BRIGHTNESS_KNEE);
    let span = f64::from(u8::MAX - BRIGHTNESS_KNEE);
    1.0 - (1.0 - BRIGHTNESS_FLOOR) * over / span
}

/// `255 · min(1, ((100 − percent)/100)^(depth^curve) · adjust(brightness))`, truncated.
///
/// Depth 0 is the target tier and is always fully opaque. The result is never 0.
pub fn opacity(percent: u8, depth: usize, curve: f64, brightness: u8) -> u8 {
    if depth == 0 {
        return u8::MAX;
    }
    let keep = f64::from(100 - percent.min(100)) / 100.0;
    let exponent = (depth as f64).powf(curve);
    let v = (keep.powf(exponent) * brightness_adjust(brightness)).min(1.0);
    let alpha = (f64::from(u8::MAX) * v) as u8;
    alpha.max(MIN_ALPHA)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn worked_example() {
        assert_eq!(opacity(20, 1, 2.0, DEFAULT_BRIGHTNESS), 204);
        assert_eq!(opacity(20, 2, 2.0, DEFAULT_BRIGHTNESS), 104);
    }

    #[test]
    fn target_tier_is_opaque() {
        assert_eq!(opacity(100, 0, 3.0, 255), 255);
        assert_eq!(opacity(50, 0, 2.0, DEFAULT_BRIGHTNESS), 255);
    }

    #[test]
    fn zero_percent_is_opaque() {
        for depth in 0..8 {
            assert_eq!(opacity(0, depth, 2.0, DEFAULT_BRIGHTNESS), 255);
        }
    }

    #[test]
    fn full_percent_clamps_to_one() {
        for depth in 1..8 {
            assert_eq!(opacity(100, depth, 1.0, DEFAULT_BRIGHTNESS), 1);
        }
    }

    #[test]
    fn bright_windows_are_dimmed_further() {
        assert_eq!(brightness_adjust(0), 1.0);
        assert_eq!(brightness_adjust(128), 1.0);
        assert_eq!(brightness_adjust(255), 0.5);
        assert_eq!(opacity(0, 1, 2.0, 255), 127);
        assert!(opacity(20, 1, 2.0, 200) < opacity(20, 1, 2.0, 128));
    }

    #[test]
    fn curve_alpha_delegates() {
        let c = Curve {
            percent: 20,
            power: 2.0,
        };
        assert_eq!(c.alpha(1, DEFAULT_BRIGHTNESS), 204);
    }

    proptest! {
        #[test]
        fn opacity_non_increasing_in_depth(
            percent in 0u8..=100,
            curve in 1.0f64..=3.0,
            brightness in any::<u8>(),
            depth in 0usize..12,
        ) {
            let here = opacity(percent, depth, curve, brightness);
            let deeper = opacity(percent, depth + 1, curve, brightness);
            prop_assert!(deeper <= here);
        }

        #[test]
        fn opacity_never_zero(
            percent in 0u8..=100,
            curve in 1.0f64..=3.0,
            brightness in any::<u8>(),
            depth in 0usize..12,
        ) {
            prop_assert!(opacity(percent, depth, curve, brightness) >= MIN_ALPHA);
        }
    }
}
