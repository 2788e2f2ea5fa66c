//! Stepped opacity fades for the window the user is looking at.

use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::trace;

use crate::{platform::Platform, window::WindowHandle};

/// Longest fade allowed; longer requests are clamped.
pub const MAX_FADE: Duration = Duration::from_millis(300);

/// Fade timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fade {
    /// Total fade duration.
    pub timeout: Duration,
    /// Pause between steps.
    pub wait: Duration,
}

impl Default for Fade {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(200),
            wait: Duration::from_millis(50),
        }
    }
}

impl Fade {
    /// Copy with `timeout` limited to [`MAX_FADE`].
    pub fn clamped(self) -> Self {
        Self {
            timeout: self.timeout.min(MAX_FADE),
            ..self
        }
    }

    /// Number of intermediate steps: `max(1, timeout / wait)`.
    pub fn steps(&self) -> u32 {
        if self.wait.is_zero() {
            return 1;
        }
        let n = self.timeout.as_nanos() / self.wait.as_nanos();
        u32::try_from(n).unwrap_or(u32::MAX).max(1)
    }
}

/// Set `alpha` on `handle`, ignoring failures.
///
/// Windows routinely disappear between enumeration and the set call; a failure here only
/// means there is nothing left to dim.
pub fn set_quiet(platform: &dyn Platform, handle: WindowHandle, alpha: u8) {
    if let Err(e) = platform.set_opacity(handle, alpha) {
        trace!(%handle, alpha, error = %e, "set_opacity_ignored");
    }
}

/// Walk `handle` from its current alpha to `target` in even steps, then set `target`
/// exactly.
///
/// A target of 255 is applied immediately. Stepping stops once the clamped timeout has
/// elapsed, however small `wait` is. Failures are ignored like [`set_quiet`].
pub async fn fade_to(platform: &dyn Platform, handle: WindowHandle, target: u8, fade: Fade) {
    let fade = fade.clamped();
    let current = platform.opacity(handle);
    if target == u8::MAX || current == target {
        set_quiet(platform, handle, target);
        return;
    }

    let steps = fade.steps();
    let delta = u8::try_from(u32::from(u8::MAX - target) / steps)
        .unwrap_or(u8::MAX)
        .max(1);
    trace!(%handle, current, target, steps, delta, "fade_start");

    let deadline = Instant::now() + fade.timeout;
    let mut alpha = current;
    for _ in 0..steps {
        set_quiet(platform, handle, alpha);
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        time::sleep(fade.wait.min(deadline - now)).await;
        alpha = step_toward(alpha, target, delta);
    }
    set_quiet(platform, handle, target);
}

/// Move `from` by `delta` toward `to` without passing it.
fn step_toward(from: u8, to: u8, delta: u8) -> u8 {
    if from > to {
        from.saturating_sub(delta).max(to)
    } else {
        from.saturating_add(delta).min(to)
    }
}
