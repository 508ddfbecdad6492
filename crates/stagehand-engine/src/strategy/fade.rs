//! Animated visibility strategy

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{trace, warn};

use super::{
    relocate_offscreen, StateTable, WindowStrategy, ALPHA_OPAQUE, ALPHA_TRANSPARENT,
    WS_EX_LAYERED, WS_EX_TRANSPARENT,
};
use crate::clock::Clock;
use crate::shell::{Window, WindowApi};
use crate::types::WindowHandle;

/// Total duration of the show fade-in in milliseconds
pub const FADE_DURATION_MS: u64 = 200;

/// Number of alpha steps in the show fade-in
pub const FADE_STEPS: u32 = 20;

/// Fade-in on show, immediate on hide
///
/// Hide drops the alpha to zero synchronously so no window lingers
/// visibly during a switch-away. Show ramps the alpha from 0 to 255
/// over a fixed duration on a background thread; the final step always
/// writes exactly the target value.
///
/// Overlapping fades on one handle are last-writer-wins: every show and
/// hide bumps a per-handle generation counter, and a ramp step that
/// observes a stale generation stops silently.
pub struct FadeStrategy {
    api: Arc<dyn WindowApi>,
    clock: Arc<dyn Clock>,
    saved: StateTable,
    generations: Mutex<std::collections::HashMap<WindowHandle, Arc<AtomicU64>>>,
    ramps: Mutex<Vec<JoinHandle<()>>>,
}

impl FadeStrategy {
    pub fn new(api: Arc<dyn WindowApi>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            saved: StateTable::new(),
            generations: Mutex::new(std::collections::HashMap::new()),
            ramps: Mutex::new(Vec::new()),
        }
    }

    /// Invalidate any in-flight ramp for `handle` and return the token
    /// a new ramp must hold to keep running
    fn bump_generation(&self, handle: WindowHandle) -> Option<(Arc<AtomicU64>, u64)> {
        let mut generations = self.generations.lock().ok()?;
        let counter = generations
            .entry(handle)
            .or_insert_with(|| Arc::new(AtomicU64::new(0)))
            .clone();
        let generation = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Some((counter, generation))
    }

    fn spawn_ramp(&self, handle: WindowHandle, counter: Arc<AtomicU64>, generation: u64) {
        let api = self.api.clone();
        let clock = self.clock.clone();
        let step_duration = Duration::from_millis(FADE_DURATION_MS / FADE_STEPS as u64);

        let ramp = std::thread::spawn(move || {
            for step in 1..=FADE_STEPS {
                clock.sleep(step_duration);

                if counter.load(Ordering::SeqCst) != generation {
                    trace!(handle, "fade superseded");
                    return;
                }

                let alpha = if step == FADE_STEPS {
                    ALPHA_OPAQUE
                } else {
                    ((ALPHA_OPAQUE as u32 * step) / FADE_STEPS) as u8
                };

                if !api.set_alpha(handle, alpha) {
                    return;
                }
            }
        });

        if let Ok(mut ramps) = self.ramps.lock() {
            ramps.retain(|r| !r.is_finished());
            ramps.push(ramp);
        }
    }

    /// Block until every in-flight fade has finished
    ///
    /// Intended for orderly shutdown and for tests; callers on the
    /// event thread should never need it.
    pub fn wait_idle(&self) {
        let ramps = match self.ramps.lock() {
            Ok(mut ramps) => ramps.drain(..).collect::<Vec<_>>(),
            Err(_) => return,
        };
        for ramp in ramps {
            let _ = ramp.join();
        }
    }
}

impl WindowStrategy for FadeStrategy {
    fn show(&self, window: &dyn Window) {
        let handle = window.handle();
        trace!(handle, "show with fade");

        let token = self.bump_generation(handle);

        if let Some(saved) = self.saved.take(handle) {
            if let Some(style) = saved.ex_style {
                self.api.set_ex_style(handle, style);
            }
            if let Some((x, y)) = saved.position {
                self.api.set_position(handle, x, y);
            }
        }

        if let Some(style) = self.api.ex_style(handle) {
            if style & WS_EX_LAYERED == 0 {
                self.api.set_ex_style(handle, style | WS_EX_LAYERED);
            }
        }

        // Probe layered-alpha support before committing to a ramp
        if !self.api.set_alpha(handle, ALPHA_TRANSPARENT) {
            warn!(handle, "layered alpha declined, showing without fade");
            window.bring_to_top();
            return;
        }

        window.bring_to_top();

        if let Some((counter, generation)) = token {
            self.spawn_ramp(handle, counter, generation);
        } else {
            // Generation table unavailable, show at full alpha instead
            self.api.set_alpha(handle, ALPHA_OPAQUE);
        }
    }

    fn hide(&self, window: &dyn Window) {
        let handle = window.handle();
        trace!(handle, "hide");

        // Cancels any in-flight fade on this handle
        self.bump_generation(handle);

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
