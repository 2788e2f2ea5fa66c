//! In-memory [`Platform`] for tests.
//!
//! `MockPlatform` keeps a window list, a live alpha per window, and a log of every
//! successful opacity change. Handles are shared (`Clone` is cheap), so a test can keep a
//! copy while the session owns another.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use parking_lot::Mutex;

use crate::{
    color::ColorProfile,
    error::{Error, Result},
    geom::Rect,
    platform::Platform,
    window::{WindowHandle, WindowSnapshot},
};

/// Build a visible, opaque window record.
pub fn win(id: isize, title: &str, pid: u32, rect: Rect) -> WindowSnapshot {
    WindowSnapshot::new(WindowHandle(id), title, pid, rect)
}

/// Link each window's z-previous to the window after it, so the list reads from the
/// first window upward through the windows stacked above it.
pub fn link_chain(mut windows: Vec<WindowSnapshot>) -> Vec<WindowSnapshot> {
    let nexts: Vec<Option<WindowHandle>> = windows
        .iter()
        .skip(1)
        .map(|w| Some(w.handle))
        .chain([None])
        .collect();
    for (w, next) in windows.iter_mut().zip(nexts) {
        w.z_prev = next;
    }
    windows
}

/// Scriptable platform double.
#[derive(Clone, Default)]
pub struct MockPlatform {
    /// Windows reported by `enumerate`, in order.
    windows: Arc<Mutex<Vec<WindowSnapshot>>>,
    /// Current alpha per window.
    alphas: Arc<Mutex<HashMap<WindowHandle, u8>>>,
    /// Every successful `set_opacity`, in call order.
    history: Arc<Mutex<Vec<(WindowHandle, u8)>>>,
    /// Reported foreground window.
    foreground: Arc<Mutex<Option<WindowHandle>>>,
    /// Samples returned by `sample_pixels`.
    profiles: Arc<Mutex<HashMap<WindowHandle, ColorProfile>>>,
    /// Reported excluded process ids.
    excluded: Arc<Mutex<Vec<u32>>>,
    /// Make `enumerate` fail.
    fail_enumerate: Arc<AtomicBool>,
    /// Number of `enumerate` calls.
    enumerate_calls: Arc<AtomicUsize>,
    /// Number of `sample_pixels` calls.
    sample_calls: Arc<AtomicUsize>,
}

impl MockPlatform {
    /// Empty platform: no windows, no foreground.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the window list. Windows seen for the first time start at their
    /// `original_alpha`; known windows keep their live alpha.
    pub fn set_windows(&self, windows: Vec<WindowSnapshot>) {
        {
            let mut alphas = self.alphas.lock();
            for w in &windows {
                alphas.entry(w.handle).or_insert(w.original_alpha);
            }
        }
        *self.windows.lock() = windows;
    }

    /// Overwrite the live alpha without recording history.
    pub fn force_alpha(&self, handle: WindowHandle, alpha: u8) {
        self.alphas.lock().insert(handle, alpha);
    }

    /// Live alpha of `handle`; 255 for unknown windows.
    pub fn alpha(&self, handle: WindowHandle) -> u8 {
        self.alphas.lock().get(&handle).copied().unwrap_or(u8::MAX)
    }

    /// Values set on `handle`, in order.
    pub fn history(&self, handle: WindowHandle) -> Vec<u8> {
        self.history
            .lock()
            .iter()
            .filter(|(h, _)| *h == handle)
            .map(|&(_, a)| a)
            .collect()
    }

    /// Every successful set across all windows.
    pub fn all_history(&self) -> Vec<(WindowHandle, u8)> {
        self.history.lock().clone()
    }

    /// Set the reported foreground window.
    pub fn set_foreground(&self, handle: Option<WindowHandle>) {
        *self.foreground.lock() = handle;
    }

    /// Move a window; `rect` then reports the new bounds.
    pub fn set_rect(&self, handle: WindowHandle, rect: Rect) {
        if let Some(w) = self.windows.lock().iter_mut().find(|w| w.handle == handle) {
            w.rect = rect;
        }
    }

    /// Samples returned for `handle`.
    pub fn set_profile(&self, handle: WindowHandle, profile: ColorProfile) {
        self.profiles.lock().insert(handle, profile);
    }

    /// Process ids reported by `excluded_pids`.
    pub fn set_excluded(&self, pids: Vec<u32>) {
        *self.excluded.lock() = pids;
    }

    /// Make subsequent `enumerate` calls fail.
    pub fn set_fail_enumerate(&self, fail: bool) {
        self.fail_enumerate.store(fail, Ordering::SeqCst);
    }

    /// Number of `enumerate` calls so far.
    pub fn enumerate_calls(&self) -> usize {
        self.enumerate_calls.load(Ordering::SeqCst)
    }

    /// Number of `sample_pixels` calls so far.
    pub fn sample_calls(&self) -> usize {
        self.sample_calls.load(Ordering::SeqCst)
    }
}

impl Platform for MockPlatform {
    fn enumerate(&self) -> Result<Vec<WindowSnapshot>> {
        self.enumerate_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_enumerate.load(Ordering::SeqCst) {
            return Err(Error::Enumerate("mock enumeration failure".into()));
        }
        let alphas = self.alphas.lock();
        Ok(self
            .windows
            .lock()
            .iter()
            .map(|w| WindowSnapshot {
                original_alpha: alphas.get(&w.handle).copied().unwrap_or(u8::MAX),
                color_profile: None,
                ..w.clone()
            })
            .collect())
    }

    fn set_opacity(&self, handle: WindowHandle, alpha: u8) -> Result<()> {
        if !self.windows.lock().iter().any(|w| w.handle == handle) {
            return Err(Error::SetOpacity {
                handle,
                reason: "no such window".into(),
            });
        }
        let alpha = alpha.max(1);
        self.alphas.lock().insert(handle, alpha);
        self.history.lock().push((handle, alpha));
        Ok(())
    }

    fn opacity(&self, handle: WindowHandle) -> u8 {
        self.alpha(handle)
    }

    fn foreground(&self) -> Option<WindowHandle> {
        *self.foreground.lock()
    }

    fn rect(&self, handle: WindowHandle) -> Option<Rect> {
        self.windows
            .lock()
            .iter()
            .find(|w| w.handle == handle)
            .map(|w| w.rect)
    }

    fn sample_pixels(&self, handle: WindowHandle) -> Option<ColorProfile> {
        self.sample_calls.fetch_add(1, Ordering::SeqCst);
        self.profiles.lock().get(&handle).cloned()
    }

    fn excluded_pids(&self) -> Vec<u32> {
        self.excluded.lock().clone()
    }
}
