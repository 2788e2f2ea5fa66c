//! Printable view of a classification.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use crate::{
    snapshot::Snapshot,
    tiers::Tiers,
    window::{WindowHandle, WindowSnapshot},
};

/// One window as shown by `list`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListedWindow {
    /// Window title.
    pub title: String,
    /// Owning process id.
    pub pid: u32,
    /// Window handle.
    pub handle: WindowHandle,
    /// Alpha at first observation.
    pub alpha: u8,
    /// Average sampled gray, when samples were taken.
    pub brightness: Option<u8>,
}

impl From<&WindowSnapshot> for ListedWindow {
    fn from(w: &WindowSnapshot) -> Self {
        Self {
            title: w.title.clone(),
            pid: w.pid,
            handle: w.handle,
            alpha: w.original_alpha,
            brightness: w.color_profile.as_ref().map(|_| w.brightness()),
        }
    }
}

/// One depth bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListedTier {
    /// Tier index; 0 holds the targets.
    pub depth: usize,
    /// Windows in placement order.
    pub windows: Vec<ListedWindow>,
}

/// Tiers resolved against the snapshot they were computed from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    /// Buckets, targets first.
    pub tiers: Vec<ListedTier>,
}

impl Listing {
    /// Resolve every handle in `tiers`; handles missing from `snapshot` are dropped.
    pub fn new(tiers: &Tiers, snapshot: &Snapshot) -> Self {
        let tiers = tiers
            .levels()
            .iter()
            .enumerate()
            .map(|(depth, level)| ListedTier {
                depth,
                windows: level
                    .iter()
                    .filter_map(|&h| snapshot.get(h))
                    .map(ListedWindow::from)
                    .collect(),
            })
            .collect();
        Self { tiers }
    }
}

impl Display for Listing {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for tier in &self.tiers {
            writeln!(f, "---- {} ----", tier.depth)?;
            for w in &tier.windows {
                writeln!(f, "  {}({})", w.title, w.pid)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::ColorProfile,
        geom::Rect,
        test_support::{link_chain, win},
        tiers::classify,
    };

    #[test]
    fn renders_tiers_in_order() {
        let full = Rect::new(0, 0, 100, 100);
        let snap = Snapshot::new(link_chain(vec![
            win(1, "Target", 1, full),
            win(2, "Above", 2, full).with_profile(ColorProfile::from_colorrefs([0x00FF_FFFF])),
        ]));
        let listing = Listing::new(&classify(&[WindowHandle(1)], &snap), &snap);
        assert_eq!(listing.to_string(), "---- 0 ----\n  Target(1)\n---- 1 ----\n  Above(2)\n");
        assert_eq!(listing.tiers[1].windows[0].brightness, Some(255));
        assert_eq!(listing.tiers[0].windows[0].brightness, None);
    }

    #[test]
    fn empty_target_set_renders_header_only() {
        let listing = Listing::new(&Tiers::targets_only(&[]), &Snapshot::default());
        assert_eq!(listing.to_string(), "---- 0 ----\n");
    }
}
