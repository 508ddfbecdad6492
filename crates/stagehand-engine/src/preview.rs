//! Preview thumbnail geometry
//!
//! Scales every window of a scene uniformly so previews keep their
//! relative size ratio: the widest window maps to a fixed baseline
//! width, aspect ratios are preserved, and no preview collapses below a
//! minimum size. Minimized windows contribute their restored bounds so
//! a minimized window does not shrink the whole row.

use serde::{Deserialize, Serialize};

use crate::events::WindowSnapshot;

/// Preview width of the widest window in a scene
pub const PREVIEW_BASELINE_WIDTH: f64 = 120.0;

/// Smallest allowed preview dimension
pub const PREVIEW_MIN_SIZE: f64 = 30.0;

/// Scaled preview dimensions for one window
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreviewSize {
    pub width: f64,
    pub height: f64,
}

/// Compute preview sizes for the given windows, in order
///
/// The same scale factor is applied to every window so the previews
/// keep their on-screen proportions. An empty slice yields an empty
/// result.
pub fn preview_sizes(windows: &[WindowSnapshot]) -> Vec<PreviewSize> {
    if windows.is_empty() {
        return Vec::new();
    }

    let sizes: Vec<(i32, i32)> = windows.iter().map(effective_size).collect();

    let max_width = sizes.iter().map(|&(w, _)| w).max().unwrap_or(1).max(1);
    let scale = PREVIEW_BASELINE_WIDTH / max_width as f64;

    sizes
        .into_iter()
        .map(|(width, height)| PreviewSize {
            width: (width as f64 * scale).max(PREVIEW_MIN_SIZE),
            height: (height as f64 * scale).max(PREVIEW_MIN_SIZE),
        })
        .collect()
}

/// On-screen size, substituting the restored bounds while minimized
fn effective_size(window: &WindowSnapshot) -> (i32, i32) {
    if window.is_minimized {
        let bounds = window.normal_bounds;
        if bounds.width() > 0 && bounds.height() > 0 {
            return (bounds.width(), bounds.height());
        }
    }

    (window.location.width(), window.location.height())
}
