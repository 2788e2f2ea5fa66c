//! Glass Engine
//!
//! Makes the windows stacked above a set of target windows translucent, so the targets
//! stay visible underneath. The crate is platform-neutral: all window-system access goes
//! through the [`Platform`] trait, and the Win32 implementation lives in `win-winops`.
//!
//! - [`Snapshot`]: one poll's windows, with first-seen alpha and color carried forward
//! - [`TitleFilter`]: picks targets by case-insensitive title substring
//! - [`classify`]: groups occluders into depth [`Tiers`]
//! - [`opacity`]: maps depth and brightness to an alpha
//! - [`Session`]: the watch loop plus the one-shot `list`, `apply_once` and
//!   [`recover_all`] operations
//!
//! [`test_support::MockPlatform`] is an in-memory platform for tests.

mod animate;
mod color;
mod config;
mod curve;
mod error;
mod filter;
mod geom;
mod listing;
mod overlap;
mod platform;
mod session;
mod snapshot;
mod tiers;
mod window;

pub mod test_support;

pub use animate::{Fade, MAX_FADE, fade_to};
pub use color::{CLR_INVALID, Color, ColorProfile};
pub use config::{CURVE_RANGE, MIN_FADE_STEP, SessionCfg};
pub use curve::{Curve, DEFAULT_BRIGHTNESS, MIN_ALPHA, brightness_adjust, opacity};
pub use error::{Error, Result};
pub use filter::{TitleFilter, split_terms};
pub use geom::Rect;
pub use listing::{ListedTier, ListedWindow, Listing};
pub use overlap::{INSET_DIVISOR, overlaps};
pub use platform::Platform;
pub use session::{Session, recover_all};
pub use snapshot::Snapshot;
pub use tiers::{Tiers, WALK_ABORT_AFTER, WALK_LOG_AFTER, classify};
pub use window::{WindowFlags, WindowHandle, WindowSnapshot};
