//! Window visibility strategies
//!
//! A strategy is the pluggable mechanism that actually hides and shows
//! a window at the OS level. Windows are hidden via transparency rather
//! than minimization or destruction so a live-but-invisible window can
//! still be queried for its thumbnail by an external compositor.
//!
//! Two implementations share one contract:
//!
//! - [`OpacityStrategy`]: toggles visibility synchronously
//! - [`FadeStrategy`]: hides immediately, shows with a fade-in ramp
//!
//! Both remember whatever original state they alter per window handle
//! (extended style bits, screen position) so `show` exactly inverts
//! `hide`, even after repeated hides without an intervening show.

mod fade;
mod opacity;

pub use fade::{FadeStrategy, FADE_DURATION_MS, FADE_STEPS};
pub use opacity::OpacityStrategy;

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

use crate::shell::{Window, WindowApi};
use crate::types::WindowHandle;

/// Layered-window extended style bit
pub const WS_EX_LAYERED: u32 = 0x0008_0000;

/// Mouse/hit-testing pass-through extended style bit
pub const WS_EX_TRANSPARENT: u32 = 0x0000_0020;

/// Fully opaque layered-window alpha
pub const ALPHA_OPAQUE: u8 = 255;

/// Fully transparent layered-window alpha
pub const ALPHA_TRANSPARENT: u8 = 0;

/// Off-screen coordinate used by the relocation fallback
///
/// Beyond typical virtual screen bounds on either axis.
pub const OFFSCREEN_OFFSET: i32 = 4000;

/// How a window is hidden and shown at the OS level
///
/// Both operations are idempotent and never fail: an OS call that
/// declines is degraded to the off-screen-relocation fallback, never
/// surfaced to the caller.
pub trait WindowStrategy: Send + Sync {
    /// Make the window visible and interactable again
    ///
    /// Restores the window to a state indistinguishable from "never
    /// hidden" (original extended style, original position if the
    /// fallback relocated it, full opacity) and brings it to the top of
    /// the z-order.
    fn show(&self, window: &dyn Window);

    /// Make the window invisible and non-hit-testable
    ///
    /// The OS still considers the window present, so thumbnail and
    /// preview queries keep working against a live window.
    fn hide(&self, window: &dyn Window);

    /// Move the window back to its pre-hide position without changing
    /// its visibility
    ///
    /// No-op when no relocation was recorded for the handle. Used when
    /// a hidden window is moved between scenes so it does not appear
    /// displaced when its scene is eventually shown.
    fn restore_position(&self, window: &dyn Window);
}

/// Original window state altered by a hide
#[derive(Clone, Copy, Debug, Default)]
struct SavedState {
    /// Extended style bits before the first hide
    ex_style: Option<u32>,
    /// On-screen position before the fallback relocated the window
    position: Option<(i32, i32)>,
}

/// Per-handle saved-state table with an arena lifecycle
///
/// Entries are inserted on the first hide and consumed by show, so the
/// table never grows past the set of currently hidden windows.
#[derive(Default)]
struct StateTable {
    entries: Mutex<HashMap<WindowHandle, SavedState>>,
}

impl StateTable {
    fn new() -> Self {
        Self::default()
    }

    /// Record the pre-hide extended style, first hide wins
    fn save_style_once(&self, handle: WindowHandle, style: u32) {
        if let Ok(mut entries) = self.entries.lock() {
            let entry = entries.entry(handle).or_default();
            if entry.ex_style.is_none() {
                entry.ex_style = Some(style);
            }
        }
    }

    /// Record the pre-relocation position, first relocation wins
    fn save_position_once(&self, handle: WindowHandle, position: (i32, i32)) {
        if let Ok(mut entries) = self.entries.lock() {
            let entry = entries.entry(handle).or_default();
            if entry.position.is_none() {
                entry.position = Some(position);
            }
        }
    }

    /// Consume the whole entry for `handle`
    fn take(&self, handle: WindowHandle) -> Option<SavedState> {
        self.entries.lock().ok()?.remove(&handle)
    }

    /// Consume only the saved position, leaving any saved style behind
    fn take_position(&self, handle: WindowHandle) -> Option<(i32, i32)> {
        let mut entries = self.entries.lock().ok()?;
        let entry = entries.get_mut(&handle)?;
        let position = entry.position.take();
        if entry.ex_style.is_none() && entry.position.is_none() {
            entries.remove(&handle);
        }
        position
    }
}

/// Shared fallback for windows the OS refuses layered transparency on
///
/// Remembers the current position (once) and parks the window at a
/// reserved off-screen coordinate.
fn relocate_offscreen(api: &dyn WindowApi, saved: &StateTable, handle: WindowHandle) {
    if let Some(rect) = api.window_rect(handle) {
        saved.save_position_once(handle, (rect.left, rect.top));
    }

    if !api.set_position(handle, OFFSCREEN_OFFSET, OFFSCREEN_OFFSET) {
        warn!(handle, "off-screen relocation failed, window stays visible");
    }
}
