//! Stacking-depth classification.
//!
//! Starting at each target, the classifier follows the window system's z-previous chain
//! and buckets every window that visually overlaps the target into a tier. Tier 0 is the
//! target set itself. A window lands one tier deeper than the deepest foreign window it
//! overlaps while scanning existing tiers front to back; windows of the same process as
//! an already-tiered window are treated as part of that window's layer. The result counts
//! real layers of occlusion rather than raw z-order distance.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::{
    overlap::overlaps,
    snapshot::Snapshot,
    window::{WindowHandle, WindowSnapshot},
};

/// Walk steps after which every further step is logged.
pub const WALK_LOG_AFTER: usize = 200;

/// Walk steps after which the walk for one target is abandoned.
pub const WALK_ABORT_AFTER: usize = 250;

/// Ordered depth buckets. Index 0 always holds the targets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tiers {
    levels: Vec<Vec<WindowHandle>>,
}

impl Tiers {
    /// Tier list holding only the given targets.
    pub fn targets_only(targets: &[WindowHandle]) -> Self {
        Self {
            levels: vec![targets.to_vec()],
        }
    }

    /// All buckets, tier 0 first.
    pub fn levels(&self) -> &[Vec<WindowHandle>] {
        &self.levels
    }

    /// Number of buckets including the target bucket.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false: the target bucket exists even when empty.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Deepest tier index; 0 when nothing occludes the targets.
    pub fn level(&self) -> usize {
        self.levels.len() - 1
    }

    /// Occluding tiers with their depth (tier index, starting at 1).
    pub fn occluders(&self) -> impl Iterator<Item = (usize, &[WindowHandle])> {
        self.levels
            .iter()
            .enumerate()
            .skip(1)
            .map(|(d, tier)| (d, tier.as_slice()))
    }

    /// Tier index holding `handle`, if any.
    pub fn depth_of(&self, handle: WindowHandle) -> Option<usize> {
        self.levels.iter().position(|tier| tier.contains(&handle))
    }

    /// Every handle placed in a tier of depth 1 or more.
    pub fn occluder_handles(&self) -> HashSet<WindowHandle> {
        self.occluders()
            .flat_map(|(_, tier)| tier.iter().copied())
            .collect()
    }
}

/// Partition the windows occluding `targets` into depth tiers.
///
/// Pure function of its inputs: repeated calls on the same snapshot give the same tiers.
pub fn classify(targets: &[WindowHandle], snapshot: &Snapshot) -> Tiers {
    let mut tiers = Tiers::targets_only(targets);
    let mut placed: HashSet<WindowHandle> = targets.iter().copied().collect();

    for &handle in targets {
        let Some(target) = snapshot.get(handle) else {
            continue;
        };
        walk_from(target, snapshot, &mut tiers, &mut placed);
    }

    tiers
}

/// Follow the z-previous chain from one target, placing overlapping windows.
fn walk_from(
    target: &WindowSnapshot,
    snapshot: &Snapshot,
    tiers: &mut Tiers,
    placed: &mut HashSet<WindowHandle>,
) {
    let mut curr = target;
    let mut steps = 0usize;

    while let Some(prev) = curr.z_prev.and_then(|h| snapshot.get(h)) {
        steps += 1;
        if steps > WALK_LOG_AFTER {
            debug!(steps, curr = %curr.handle, prev = %prev.handle, "z_walk_long");
            if steps > WALK_ABORT_AFTER {
                debug!(target = %target.handle, "z_walk_aborted");
                break;
            }
        }
        curr = prev;

        if placed.contains(&prev.handle) || !overlaps(prev, target) {
            continue;
        }

        let depth = depth_for(prev, tiers, snapshot);
        if depth == tiers.levels.len() {
            tiers.levels.push(Vec::new());
        }
        tiers.levels[depth].push(prev.handle);
        placed.insert(prev.handle);
    }
}

/// Scan existing tiers front to back and pick the tier for `prev`.
///
/// Same-process windows are skipped. Each foreign window `prev` overlaps pushes it one
/// tier below that window's tier; the first foreign window it does not overlap ends the
/// scan.
fn depth_for(prev: &WindowSnapshot, tiers: &Tiers, snapshot: &Snapshot) -> usize {
    let mut depth = 1;
    for (d, tier) in tiers.occluders() {
        for w in tier.iter().filter_map(|&h| snapshot.get(h)) {
            if w.pid == prev.pid {
                continue;
            }
            if !overlaps(prev, w) {
                return depth;
            }
            depth = d + 1;
        }
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geom::Rect, test_support::{link_chain, win}};

    fn full() -> Rect {
        Rect::new(0, 0, 100, 100)
    }

    fn h(id: isize) -> WindowHandle {
        WindowHandle(id)
    }

    #[test]
    fn no_occluders_yields_targets_only() {
        let snap = Snapshot::new(vec![win(1, "T", 1, full())]);
        let tiers = classify(&[h(1)], &snap);
        assert_eq!(tiers.levels(), &[vec![h(1)]]);
        assert_eq!(tiers.level(), 0);
    }

    #[test]
    fn stacked_foreign_windows_get_successive_tiers() {
        let snap = Snapshot::new(link_chain(vec![
            win(1, "T", 1, full()),
            win(2, "A", 2, full()),
            win(3, "B", 3, full()),
        ]));
        let tiers = classify(&[h(1)], &snap);
        assert_eq!(tiers.levels(), &[vec![h(1)], vec![h(2)], vec![h(3)]]);
        assert_eq!(tiers.depth_of(h(3)), Some(2));
        assert_eq!(tiers.occluder_handles(), HashSet::from([h(2), h(3)]));
    }

    #[test]
    fn same_process_window_folds_into_existing_tier() {
        let snap = Snapshot::new(link_chain(vec![
            win(1, "T", 1, full()),
            win(2, "A", 2, full()),
            win(4, "C", 2, full()),
            win(3, "B", 3, full()),
        ]));
        let tiers = classify(&[h(1)], &snap);
        assert_eq!(tiers.levels(), &[vec![h(1)], vec![h(2), h(4)], vec![h(3)]]);
    }

    #[test]
    fn non_overlapping_windows_are_skipped_but_walked_through() {
        let snap = Snapshot::new(link_chain(vec![
            win(1, "T", 1, full()),
            win(2, "far away", 2, Rect::new(500, 500, 600, 600)),
            win(3, "A", 3, full()),
        ]));
        let tiers = classify(&[h(1)], &snap);
        assert_eq!(tiers.levels(), &[vec![h(1)], vec![h(3)]]);
    }

    #[test]
    fn side_by_side_occluders_share_a_tier() {
        // Two foreign windows each covering one half of the target; they do not overlap
        // each other, so the second stays in tier 1.
        let snap = Snapshot::new(link_chain(vec![
            win(1, "T", 1, Rect::new(0, 0, 200, 100)),
            win(2, "left", 2, Rect::new(0, 0, 90, 100)),
            win(3, "right", 3, Rect::new(110, 0, 200, 100)),
        ]));
        let tiers = classify(&[h(1)], &snap);
        assert_eq!(tiers.levels(), &[vec![h(1)], vec![h(2), h(3)]]);
    }

    #[test]
    fn targets_share_one_tier_list_without_duplicates() {
        // Two targets with the same occluder chain: the occluder is placed once.
        let a = win(1, "T1", 1, full()).with_z_prev(Some(h(3)));
        let b = win(2, "T2", 2, full()).with_z_prev(Some(h(3)));
        let occ = win(3, "O", 3, full());
        let snap = Snapshot::new(vec![a, b, occ]);
        let tiers = classify(&[h(1), h(2)], &snap);
        assert_eq!(tiers.levels(), &[vec![h(1), h(2)], vec![h(3)]]);
    }

    #[test]
    fn target_in_another_targets_chain_is_not_retiered() {
        let snap = Snapshot::new(link_chain(vec![
            win(1, "T1", 1, full()),
            win(2, "T2", 2, full()),
            win(3, "A", 3, full()),
        ]));
        let tiers = classify(&[h(1), h(2)], &snap);
        assert_eq!(tiers.levels(), &[vec![h(1), h(2)], vec![h(3)]]);
    }

    #[test]
    fn cyclic_chain_terminates() {
        let t = win(1, "T", 1, full()).with_z_prev(Some(h(2)));
        let a = win(2, "A", 2, full()).with_z_prev(Some(h(3)));
        let b = win(3, "B", 3, full()).with_z_prev(Some(h(2)));
        let snap = Snapshot::new(vec![t, a, b]);
        let tiers = classify(&[h(1)], &snap);
        assert_eq!(tiers.levels(), &[vec![h(1)], vec![h(2)], vec![h(3)]]);
    }

    #[test]
    fn walk_stops_at_unknown_handle() {
        let t = win(1, "T", 1, full()).with_z_prev(Some(h(99)));
        let snap = Snapshot::new(vec![t]);
        assert_eq!(classify(&[h(1)], &snap).len(), 1);
    }

    #[test]
    fn long_chain_is_truncated() {
        let mut wins = vec![win(1, "T", 1, full())];
        // Every window shares a pid so each folds into tier 1.
        for id in 2..400 {
            wins.push(win(id, "occ", 7, full()));
        }
        let snap = Snapshot::new(link_chain(wins));
        let tiers = classify(&[h(1)], &snap);
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers.levels()[1].len(), WALK_ABORT_AFTER);
    }

    #[test]
    fn classification_is_idempotent() {
        let snap = Snapshot::new(link_chain(vec![
            win(1, "T", 1, full()),
            win(2, "A", 2, full()),
            win(5, "gap", 5, Rect::new(400, 400, 500, 500)),
            win(4, "C", 2, full()),
            win(3, "B", 3, full()),
        ]));
        let first = classify(&[h(1)], &snap);
        let second = classify(&[h(1)], &snap);
        assert_eq!(first, second);
    }
}
