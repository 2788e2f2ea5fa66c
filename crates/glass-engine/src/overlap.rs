//! Pairwise overlap test used by the tier classifier.

use crate::window::WindowSnapshot;

/// The second window's rect is shrunk by `1/INSET_DIVISOR` of its size on each side, so
/// windows whose borders merely touch do not count as overlapping.
pub const INSET_DIVISOR: i32 = 10;

/// Does `a` visually overlap `b`?
///
/// Only `b` is inset and only `b` is checked for the tool-window style, so the result is
/// not symmetric. Both windows must be shown.
pub fn overlaps(a: &WindowSnapshot, b: &WindowSnapshot) -> bool {
    let inner = b
        .rect
        .shrink(b.rect.width() / INSET_DIVISOR, b.rect.height() / INSET_DIVISOR);
    a.rect.intersects(&inner) && a.flags.is_shown() && b.flags.is_shown() && !b.flags.tool_window
}
