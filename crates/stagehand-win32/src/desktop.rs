//! Desktop surface operations

use std::sync::Mutex;

use stagehand_engine::{DesktopShell, ShellProbe, WindowHandle};
use tracing::warn;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{FindWindowW, ShowWindow, SW_HIDE, SW_SHOW};

use crate::probe::Win32Probe;

/// Window classes that qualify as the desktop view
const DESKTOP_VIEW_CLASSES: &[&str] = &["WorkerW", "Progman", "SHELLDLL_DefView", "SysListView32"];

/// [`DesktopShell`] over the shell's icon list-view
///
/// Icon visibility is toggled by hiding the `SysListView32` control
/// that hosts the desktop icons, located by walking Progman → default
/// view → list view.
#[derive(Default)]
pub struct Win32Desktop {
    probe: Win32Probe,
    desktop_view: Mutex<Option<WindowHandle>>,
}

impl Win32Desktop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locate the desktop icon list-view control
    fn icon_list_view(&self) -> Option<WindowHandle> {
        let progman = unsafe { FindWindowW(w!("Progman"), PCWSTR::null()) };
        if progman.0 == 0 {
            return None;
        }

        self.probe
            .find_child(progman.0, "SHELLDLL_DefView")
            .and_then(|def_view| self.probe.find_child(def_view, "SysListView32"))
    }

    fn set_icons_visible(&self, visible: bool) {
        match self.icon_list_view() {
            Some(list_view) => unsafe {
                ShowWindow(HWND(list_view), if visible { SW_SHOW } else { SW_HIDE });
            },
            None => warn!("desktop icon list-view not found"),
        }
    }
}

impl DesktopShell for Win32Desktop {
    fn hide_icons(&self) {
        self.set_icons_visible(false);
    }

    fn show_icons(&self) {
        self.set_icons_visible(true);
    }

    fn has_desktop_view(&self) -> bool {
        self.desktop_view
            .lock()
            .map(|view| view.is_some())
            .unwrap_or(false)
    }

    fn try_set_desktop_view(&self, handle: WindowHandle) -> bool {
        let class = match self.probe.window_class(handle) {
            Some(class) => class,
            None => return false,
        };

        if !DESKTOP_VIEW_CLASSES
            .iter()
            .any(|known| class.eq_ignore_ascii_case(known))
        {
            return false;
        }

        if let Ok(mut view) = self.desktop_view.lock() {
            *view = Some(handle);
            return true;
        }
        false
    }
}
