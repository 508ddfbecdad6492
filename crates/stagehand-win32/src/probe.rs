//! Window-class and icon-list queries

use stagehand_engine::{ShellProbe, WindowHandle};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{FindWindowExW, GetClassNameW, SendMessageW};

/// Selected-item count query on a list-view control
///
/// `LVM_FIRST + 50`; kept local so the crate does not need the whole
/// common-controls API surface.
const LVM_GETSELECTEDCOUNT: u32 = 0x1032;

/// [`ShellProbe`] over user32
#[derive(Clone, Copy, Debug, Default)]
pub struct Win32Probe;

impl Win32Probe {
    pub fn new() -> Self {
        Self
    }
}

impl ShellProbe for Win32Probe {
    fn window_class(&self, handle: WindowHandle) -> Option<String> {
        let mut buffer = [0u16; 256];
        let length = unsafe { GetClassNameW(HWND(handle), &mut buffer) };
        if length <= 0 {
            return None;
        }
        Some(String::from_utf16_lossy(&buffer[..length as usize]))
    }

    fn find_child(&self, parent: WindowHandle, class: &str) -> Option<WindowHandle> {
        let wide: Vec<u16> = class.encode_utf16().chain(std::iter::once(0)).collect();
        let child = unsafe {
            FindWindowExW(
                HWND(parent),
                HWND::default(),
                PCWSTR(wide.as_ptr()),
                PCWSTR::null(),
            )
        };
        if child.0 == 0 {
            None
        } else {
            Some(child.0)
        }
    }

    fn selected_icon_count(&self, list_view: WindowHandle) -> usize {
        let count = unsafe {
            SendMessageW(
                HWND(list_view),
                LVM_GETSELECTEDCOUNT,
                WPARAM(0),
                LPARAM(0),
            )
        };
        count.0.max(0) as usize
    }
}
