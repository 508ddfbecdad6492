//! Blank-desktop-click classification
//!
//! A click that lands on the desktop background but actually selects or
//! interacts with an icon must not trigger a scene switch. This module
//! decides, from a window handle, whether a click was a genuine blank
//! click: the class name is read, shell chrome is excluded, and for the
//! desktop container windows the icon list-view is probed for selected
//! items.

use crate::shell::ShellProbe;
use crate::types::WindowHandle;

/// Taskbar host window class
const CLASS_TRAY: &str = "Shell_TrayWnd";

/// Taskbar notification area class
const CLASS_TRAY_NOTIFY: &str = "TrayNotifyWnd";

/// Desktop background host class (wallpaper worker)
const CLASS_WORKER: &str = "WorkerW";

/// Desktop background host class (program manager)
const CLASS_PROGMAN: &str = "Progman";

/// Shell default view hosting the icon list
const CLASS_DEF_VIEW: &str = "SHELLDLL_DefView";

/// Icon list-view control class
const CLASS_LIST_VIEW: &str = "SysListView32";

/// Whether a click on `handle` was a genuine blank-desktop click
///
/// Shell taskbar windows never qualify. The desktop container windows
/// qualify only when the icon list-view (located by walking container →
/// default view → list view) has zero selected items; the list-view and
/// default-view classes, hit directly, use the same zero-selection
/// test. Anything else is not a desktop click at all.
pub fn is_blank_desktop_click(probe: &dyn ShellProbe, handle: WindowHandle) -> bool {
    let class = match probe.window_class(handle) {
        Some(class) => class,
        None => return false,
    };

    if class.eq_ignore_ascii_case(CLASS_TRAY) || class.eq_ignore_ascii_case(CLASS_TRAY_NOTIFY) {
        return false;
    }

    if class.eq_ignore_ascii_case(CLASS_WORKER) || class.eq_ignore_ascii_case(CLASS_PROGMAN) {
        let list_view = probe
            .find_child(handle, CLASS_DEF_VIEW)
            .and_then(|def_view| probe.find_child(def_view, CLASS_LIST_VIEW));

        return selection_is_empty(probe, list_view);
    }

    if class.eq_ignore_ascii_case(CLASS_LIST_VIEW) || class.eq_ignore_ascii_case(CLASS_DEF_VIEW) {
        return selection_is_empty(probe, Some(handle));
    }

    false
}

/// Zero-selection test on an icon list-view
///
/// A missing list-view counts as empty: with no icon host there is
/// nothing a click could have selected.
fn selection_is_empty(probe: &dyn ShellProbe, list_view: Option<WindowHandle>) -> bool {
    match list_view {
        Some(list_view) => probe.selected_icon_count(list_view) == 0,
        None => true,
    }
}
