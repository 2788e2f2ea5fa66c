//! One poll's worth of windows, addressable by handle.

use std::collections::HashMap;

use tracing::trace;

use crate::{
    error::Result,
    platform::Platform,
    window::{WindowHandle, WindowSnapshot},
};

/// Windows in enumeration order plus a handle→index lookup.
///
/// The lookup is built once on construction and never mutated; a new snapshot is taken on
/// every poll.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    windows: Vec<WindowSnapshot>,
    index: HashMap<WindowHandle, usize>,
}

impl Snapshot {
    /// Wrap an enumeration result. Later duplicates of a handle are unreachable by lookup.
    pub fn new(windows: Vec<WindowSnapshot>) -> Self {
        let mut index = HashMap::with_capacity(windows.len());
        for (i, w) in windows.iter().enumerate() {
            index.entry(w.handle).or_insert(i);
        }
        Self { windows, index }
    }

    /// Enumerate through `platform`, carrying first-seen state forward from `previous`.
    ///
    /// Windows already present in `previous` keep their original alpha and color profile.
    /// Newly seen windows with a non-empty rect are sampled once.
    pub fn capture(platform: &dyn Platform, previous: Option<&Self>) -> Result<Self> {
        let mut windows = platform.enumerate()?;
        let mut sampled = 0usize;
        for w in &mut windows {
            let prior = previous.and_then(|p| p.get(w.handle));
            if let Some(prior) = prior {
                w.original_alpha = prior.original_alpha;
                w.color_profile = prior.color_profile.clone();
            }
            if w.color_profile.is_none() && !w.rect.is_empty() {
                w.color_profile = platform.sample_pixels(w.handle);
                sampled += 1;
            }
        }
        trace!(windows = windows.len(), sampled, "snapshot_captured");
        Ok(Self::new(windows))
    }

    /// Look up a window by handle.
    pub fn get(&self, handle: WindowHandle) -> Option<&WindowSnapshot> {
        self.index.get(&handle).map(|&i| &self.windows[i])
    }

    /// Iterate windows in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &WindowSnapshot> {
        self.windows.iter()
    }

    /// Number of windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// True when the window system reported nothing.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::ColorProfile,
        geom::Rect,
        test_support::{MockPlatform, win},
    };

    #[test]
    fn lookup_by_handle() {
        let r = Rect::new(0, 0, 10, 10);
        let snap = Snapshot::new(vec![win(1, "one", 10, r), win(2, "two", 20, r)]);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get(WindowHandle(2)).map(|w| w.pid), Some(20));
        assert!(snap.get(WindowHandle(3)).is_none());
    }

    #[test]
    fn capture_carries_original_alpha_forward() {
        let mock = MockPlatform::new();
        mock.set_windows(vec![win(1, "one", 10, Rect::new(0, 0, 100, 100)).with_alpha(200)]);

        let first = Snapshot::capture(&mock, None).expect("first");
        assert_eq!(first.get(WindowHandle(1)).map(|w| w.original_alpha), Some(200));

        // A fresh read now reports what the session applied.
        mock.force_alpha(WindowHandle(1), 40);
        let fresh = Snapshot::capture(&mock, None).expect("fresh");
        assert_eq!(fresh.get(WindowHandle(1)).map(|w| w.original_alpha), Some(40));

        let carried = Snapshot::capture(&mock, Some(&first)).expect("carried");
        assert_eq!(carried.get(WindowHandle(1)).map(|w| w.original_alpha), Some(200));
    }

    #[test]
    fn capture_samples_new_windows_once() {
        let mock = MockPlatform::new();
        mock.set_profile(WindowHandle(1), ColorProfile::from_colorrefs([0x00FF_FFFF]));
        mock.set_windows(vec![
            win(1, "one", 10, Rect::new(0, 0, 100, 100)),
            win(2, "empty", 10, Rect::new(0, 0, 0, 0)),
        ]);

        let first = Snapshot::capture(&mock, None).expect("first");
        assert_eq!(mock.sample_calls(), 1);
        assert_eq!(first.get(WindowHandle(1)).map(|w| w.brightness()), Some(255));

        let second = Snapshot::capture(&mock, Some(&first)).expect("second");
        assert_eq!(mock.sample_calls(), 1);
        let carried = second.get(WindowHandle(1)).and_then(|w| w.color_profile.as_ref());
        assert!(carried.is_some());
    }

    #[test]
    fn capture_propagates_enumeration_failure() {
        let mock = MockPlatform::new();
        mock.set_fail_enumerate(true);
        assert!(Snapshot::capture(&mock, None).is_err());
    }
}
