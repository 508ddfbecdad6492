//! Instantaneous visibility strategy

use std::sync::Arc;

use tracing::{trace, warn};

use super::{
    relocate_offscreen, StateTable, WindowStrategy, ALPHA_OPAQUE, ALPHA_TRANSPARENT,
    WS_EX_LAYERED, WS_EX_TRANSPARENT,
};
use crate::shell::{Window, WindowApi};

/// Synchronous opacity toggling
///
/// Hide enables the layered + transparent extended styles and drops the
/// alpha to zero; show inverts both. When the OS declines layered
/// attributes the window is parked off-screen instead, and its original
/// coordinate restored on show.
pub struct OpacityStrategy {
    api: Arc<dyn WindowApi>,
    saved: StateTable,
}

impl OpacityStrategy {
    pub fn new(api: Arc<dyn WindowApi>) -> Self {
        Self {
            api,
            saved: StateTable::new(),
        }
    }
}

impl WindowStrategy for OpacityStrategy {
    fn show(&self, window: &dyn Window) {
        let handle = window.handle();
        trace!(handle, "show");

        if let Some(saved) = self.saved.take(handle) {
            if let Some(style) = saved.ex_style {
                self.api.set_ex_style(handle, style);
            }
            if let Some((x, y)) = saved.position {
                self.api.set_position(handle, x, y);
            }
        }

        // Keep the layered bit so the alpha write below sticks
        if let Some(style) = self.api.ex_style(handle) {
            if style & WS_EX_LAYERED == 0 {
                self.api.set_ex_style(handle, style | WS_EX_LAYERED);
            }
        }

        self.api.set_alpha(handle, ALPHA_OPAQUE);
        window.bring_to_top();
    }

    fn hide(&self, window: &dyn Window) {
        let handle = window.handle();
        trace!(handle, "hide");

        if let Some(style) = self.api.ex_style(handle) {
            self.saved.save_style_once(handle, style);
            self.api
                .set_ex_style(handle, style | WS_EX_LAYERED | WS_EX_TRANSPARENT);
        }

        if !self.api.set_alpha(handle, ALPHA_TRANSPARENT) {
            warn!(handle, "layered alpha declined, relocating off-screen");
            relocate_offscreen(self.api.as_ref(), &self.saved, handle);
        }
    }

    fn restore_position(&self, window: &dyn Window) {
        if let Some((x, y)) = self.saved.take_position(window.handle()) {
            self.api.set_position(window.handle(), x, y);
        }
    }
}
