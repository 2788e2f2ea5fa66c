//! Session configuration and its validation.

use std::time::Duration;

use crate::{
    animate::Fade,
    curve::Curve,
    error::{Error, Result},
};

/// Shortest accepted pause between fade steps.
pub const MIN_FADE_STEP: Duration = Duration::from_millis(1);

/// Accepted range for the curve exponent.
pub const CURVE_RANGE: (f64, f64) = (1.0, 3.0);

/// Configuration for a watch session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionCfg {
    /// Dimming strength in percent, `0..=100`.
    pub percent: u8,
    /// Depth exponent, `1.0..=3.0`.
    pub curve: f64,
    /// Poll interval.
    pub interval: Duration,
    /// Restore everything and stop after this long.
    pub recover_after: Option<Duration>,
    /// Fade timing for the foreground window.
    pub fade: Fade,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            percent: 50,
            curve: 2.0,
            interval: Duration::from_millis(250),
            recover_after: None,
            fade: Fade::default(),
        }
    }
}

impl SessionCfg {
    /// Reject out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if self.percent > 100 {
            return Err(Error::InvalidConfig(format!(
                "alpha should be between 0 and 100, got {}",
                self.percent
            )));
        }
        let (lo, hi) = CURVE_RANGE;
        if !(lo..=hi).contains(&self.curve) {
            return Err(Error::InvalidConfig(format!(
                "curve should be between {lo:.1} and {hi:.1}, got {}",
                self.curve
            )));
        }
        if self.interval.is_zero() {
            return Err(Error::InvalidConfig("interval must be non-zero".into()));
        }
        let fade = self.fade.clamped();
        if fade.wait < MIN_FADE_STEP || fade.wait > fade.timeout {
            return Err(Error::InvalidConfig(format!(
                "fade step should be between {MIN_FADE_STEP:?} and {:?}, got {:?}",
                fade.timeout, fade.wait
            )));
        }
        Ok(())
    }

    /// The opacity curve this configuration describes.
    pub fn curve(&self) -> Curve {
        Curve {
            percent: self.percent,
            power: self.curve,
        }
    }
}
