//! The watch loop and the one-shot commands built on the same pipeline.
//!
//! Every pass follows the same shape: capture a snapshot, select targets by title,
//! classify the occluders into tiers, then apply the curve. The watch loop repeats this
//! whenever the foreground window changes and restores every window to the alpha it had
//! when first observed once cancelled.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;
use tracing::{
    Dispatch, debug, dispatcher,
    instrument::WithSubscriber,
    trace, warn,
};

use crate::{
    animate::{fade_to, set_quiet},
    config::SessionCfg,
    error::{Error, Result},
    filter::TitleFilter,
    geom::Rect,
    listing::Listing,
    platform::Platform,
    snapshot::Snapshot,
    tiers::{Tiers, classify},
    window::WindowHandle,
};

/// Foreground identity used to decide whether a cycle can be skipped.
type ForegroundKey = (Option<WindowHandle>, Option<Rect>);

/// A configured dimming session over one platform.
pub struct Session {
    /// Window system access.
    platform: Arc<dyn Platform>,
    /// Validated configuration.
    cfg: SessionCfg,
    /// Target selection.
    filter: TitleFilter,
    /// Log sink every operation runs under.
    dispatch: Dispatch,
}

/// Mutable state carried between watch cycles.
#[derive(Default)]
struct WatchState {
    /// Last foreground handle and its bounds.
    last_fg: Option<ForegroundKey>,
    /// Snapshot from the last recompute.
    last: Option<Snapshot>,
}

impl Session {
    /// Validate `cfg` and bind the filter terms to this platform's excluded processes.
    pub fn new<I, S>(
        platform: Arc<dyn Platform>,
        cfg: SessionCfg,
        terms: I,
        dispatch: Dispatch,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        cfg.validate()?;
        let filter = TitleFilter::new(terms, platform.excluded_pids());
        if filter.terms().is_empty() {
            return Err(Error::InvalidConfig("no target title given".into()));
        }
        Ok(Self {
            platform,
            cfg,
            filter,
            dispatch,
        })
    }

    /// Poll until `cancel` fires (or the recovery timeout elapses), then restore.
    ///
    /// An enumeration failure ends the loop: windows are restored from the last good
    /// snapshot before the error is returned.
    pub async fn watch(&self, cancel: CancellationToken) -> Result<()> {
        self.watch_loop(cancel)
            .with_subscriber(self.dispatch.clone())
            .await
    }

    /// Body of [`Session::watch`], run under the session's dispatch.
    async fn watch_loop(&self, cancel: CancellationToken) -> Result<()> {
        let timer = self.cfg.recover_after.map(|after| spawn_recover_timer(after, cancel.clone()));
        debug!(
            terms = ?self.filter.terms(),
            percent = self.cfg.percent,
            curve = self.cfg.curve,
            interval_ms = self.cfg.interval.as_millis(),
            "watch_start"
        );

        let mut state = WatchState::default();
        let mut outcome = Ok(());
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = time::sleep(self.cfg.interval) => {}
            }
            if let Err(e) = self.cycle(&mut state).await {
                warn!(error = %e, "watch_cycle_failed");
                outcome = Err(e);
                break;
            }
        }

        if let Some(timer) = timer {
            timer.abort();
        }
        self.restore_original(state.last.as_ref());
        debug!("watch_stop");
        outcome
    }

    /// One poll: skip when the foreground is unchanged, otherwise recompute and apply.
    async fn cycle(&self, state: &mut WatchState) -> Result<()> {
        let fg = self.platform.foreground();
        let key = (fg, fg.and_then(|h| self.platform.rect(h)));
        if fg.is_some() && state.last_fg == Some(key) {
            return Ok(());
        }
        state.last_fg = Some(key);

        let started = Instant::now();
        let snapshot = Snapshot::capture(self.platform.as_ref(), state.last.as_ref())?;
        let targets = self.filter.select(&snapshot);
        let tiers = classify(&targets, &snapshot);
        trace!(
            windows = snapshot.len(),
            targets = targets.len(),
            elapsed_us = started.elapsed().as_micros(),
            "classified"
        );

        self.apply(&tiers, &snapshot, fg).await;
        let touched = tiers.occluder_handles();
        for w in snapshot.iter().filter(|w| !touched.contains(&w.handle)) {
            set_quiet(self.platform.as_ref(), w.handle, u8::MAX);
        }
        trace!(elapsed_us = started.elapsed().as_micros(), "cycle_done");

        state.last = Some(snapshot);
        Ok(())
    }

    /// Dim every occluder; the foreground window fades, the rest change at once.
    async fn apply(&self, tiers: &Tiers, snapshot: &Snapshot, fg: Option<WindowHandle>) {
        let curve = self.cfg.curve();
        for (depth, tier) in tiers.occluders() {
            for w in tier.iter().filter_map(|&h| snapshot.get(h)) {
                let alpha = curve.alpha(depth, w.brightness());
                debug!(depth, alpha, title = %w.title, pid = w.pid, "tier_window");
                if Some(w.handle) == fg {
                    fade_to(self.platform.as_ref(), w.handle, alpha, self.cfg.fade).await;
                } else {
                    set_quiet(self.platform.as_ref(), w.handle, alpha);
                }
            }
        }
    }

    /// Put every window back to its first-seen alpha.
    ///
    /// A fresh snapshot seeded with `last` picks up windows opened since the last cycle;
    /// if enumeration fails, `last` alone is used.
    fn restore_original(&self, last: Option<&Snapshot>) {
        let fresh = match Snapshot::capture(self.platform.as_ref(), last) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "restore_enumerate_failed");
                match last {
                    Some(s) => s.clone(),
                    None => return,
                }
            }
        };
        for w in fresh.iter() {
            set_quiet(self.platform.as_ref(), w.handle, w.original_alpha);
        }
        debug!(windows = fresh.len(), "restored");
    }

    /// Classify once and return the tiers without touching any window.
    pub fn list(&self) -> Result<Listing> {
        dispatcher::with_default(&self.dispatch, || {
            let (tiers, snapshot) = self.classify_once()?;
            Ok(Listing::new(&tiers, &snapshot))
        })
    }

    /// Classify once and dim every occluder. Nothing is restored afterwards.
    pub fn apply_once(&self) -> Result<Listing> {
        dispatcher::with_default(&self.dispatch, || {
            let (tiers, snapshot) = self.classify_once()?;
            let curve = self.cfg.curve();
            for (depth, tier) in tiers.occluders() {
                for w in tier.iter().filter_map(|&h| snapshot.get(h)) {
                    let alpha = curve.alpha(depth, w.brightness());
                    debug!(depth, alpha, title = %w.title, "tier_window");
                    set_quiet(self.platform.as_ref(), w.handle, alpha);
                }
            }
            Ok(Listing::new(&tiers, &snapshot))
        })
    }

    /// Fresh snapshot, selection and classification. Fails when nothing matches.
    fn classify_once(&self) -> Result<(Tiers, Snapshot)> {
        let snapshot = Snapshot::capture(self.platform.as_ref(), None)?;
        let targets = self.filter.select(&snapshot);
        if targets.is_empty() {
            return Err(Error::NoMatchingWindow(self.filter.terms().join(", ")));
        }
        Ok((classify(&targets, &snapshot), snapshot))
    }
}

/// Make every window fully opaque. Returns the number of windows touched.
pub fn recover_all(platform: &dyn Platform) -> Result<usize> {
    let windows = platform.enumerate()?;
    for w in &windows {
        set_quiet(platform, w.handle, u8::MAX);
    }
    debug!(windows = windows.len(), "recovered");
    Ok(windows.len())
}

/// One-shot timer that cancels the session after `after`.
fn spawn_recover_timer(after: Duration, cancel: CancellationToken) -> JoinHandle<()> {
    let fut = async move {
        time::sleep(after).await;
        debug!(after_ms = after.as_millis(), "recover_timeout");
        cancel.cancel();
    };
    tokio::spawn(fut.with_current_subscriber())
}
