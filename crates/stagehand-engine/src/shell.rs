//! Shell collaborator contracts
//!
//! The engine never talks to the OS directly. Everything it needs from
//! the desktop shell comes through the traits in this module:
//!
//! - [`Window`]: the capability set of one native window
//! - [`WindowsManager`]: window discovery and the event feed
//! - [`DesktopShell`]: desktop icon visibility and the desktop-view handle
//! - [`WindowApi`]: raw per-handle style/alpha/position operations,
//!   consumed by the visibility strategies
//! - [`ShellProbe`]: window-class and icon-list queries, consumed by the
//!   blank-desktop-click classifier
//!
//! `stagehand-win32` provides the production implementations; tests
//! substitute recording fakes.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::error::EngineResult;
use crate::events::WindowEvent;
use crate::types::{Rect, WindowHandle};

/// One native top-level window, as consumed by the engine
///
/// Windows are created and destroyed by the OS; the engine only holds
/// references and reacts to their lifecycle. Implementations are
/// expected to answer queries against live OS state.
pub trait Window: Send + Sync {
    fn handle(&self) -> WindowHandle;

    /// Short name of the owning process, the default grouping key
    fn process_name(&self) -> String;

    /// Full path of the owning process image, empty when unknown
    fn process_file_name(&self) -> String;

    fn title(&self) -> String;

    /// Whether the window participates in layout at all
    fn can_layout(&self) -> bool;

    fn is_minimized(&self) -> bool;

    /// Current on-screen rectangle
    fn location(&self) -> Rect;

    /// Restored-state rectangle; differs from `location` when minimized
    fn normal_bounds(&self) -> Rect;

    /// Give the window keyboard focus
    fn focus(&self);

    /// Raise the window to the top of the z-order without focusing it
    fn bring_to_top(&self);
}

/// Shared reference to a native window
pub type SharedWindow = Arc<dyn Window>;

/// Window discovery and lifecycle event source
///
/// The implementation owns the OS event hooks. On `start` it is handed
/// the sender side of the engine's event queue and must deliver all
/// subsequent [`WindowEvent`]s through it, in arrival order.
pub trait WindowsManager {
    /// Live list of tracked top-level windows
    fn windows(&self) -> Vec<SharedWindow>;

    fn start(&mut self, events: Sender<WindowEvent>) -> EngineResult<()>;

    fn stop(&mut self);
}

/// Desktop surface operations
pub trait DesktopShell {
    fn hide_icons(&self);

    fn show_icons(&self);

    /// Whether a desktop-view handle has been registered yet
    fn has_desktop_view(&self) -> bool;

    /// Register `handle` as the desktop view if it qualifies
    fn try_set_desktop_view(&self, handle: WindowHandle) -> bool;
}

/// Raw per-handle window operations consumed by visibility strategies
///
/// Every method mirrors a single OS call. A `false`/`None` return means
/// the call failed; per the engine's error policy such failures are
/// never fatal — strategies degrade to a fallback instead.
pub trait WindowApi: Send + Sync {
    /// Read the extended style bits, `None` on failure
    fn ex_style(&self, handle: WindowHandle) -> Option<u32>;

    fn set_ex_style(&self, handle: WindowHandle, style: u32) -> bool;

    /// Set the layered-window alpha (0 = transparent, 255 = opaque)
    fn set_alpha(&self, handle: WindowHandle, alpha: u8) -> bool;

    fn window_rect(&self, handle: WindowHandle) -> Option<Rect>;

    /// Move the window without resizing or activating it
    fn set_position(&self, handle: WindowHandle, x: i32, y: i32) -> bool;
}

/// Shell window-class and icon-list queries
///
/// Used only by the blank-desktop-click classifier.
pub trait ShellProbe {
    /// Class name of the window, `None` when the handle is gone
    fn window_class(&self, handle: WindowHandle) -> Option<String>;

    /// First direct child of `parent` with the given class
    fn find_child(&self, parent: WindowHandle, class: &str) -> Option<WindowHandle>;

    /// Number of selected items in an icon list-view control
    fn selected_icon_count(&self, list_view: WindowHandle) -> usize;
}
