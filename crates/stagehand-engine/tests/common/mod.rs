//! Recording fakes and a test harness for driving the scene manager

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use stagehand_engine::{
    Clock, DesktopShell, EngineEvent, EngineResult, ManualClock, Rect, SceneManager, SharedWindow,
    ShellProbe, Window, WindowEvent, WindowHandle, WindowStrategy, WindowsManager,
};

/// One recorded strategy or window action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Show(WindowHandle),
    Hide(WindowHandle),
    RestorePosition(WindowHandle),
    Focus(WindowHandle),
    BringToTop(WindowHandle),
    HideIcons,
    ShowIcons,
}

pub type ActionLog = Arc<Mutex<Vec<Action>>>;

/// Scriptable window with a shared action log
pub struct FakeWindow {
    pub handle: WindowHandle,
    pub process: String,
    pub title: String,
    pub can_layout: bool,
    pub location: Rect,
    log: ActionLog,
}

impl Window for FakeWindow {
    fn handle(&self) -> WindowHandle {
        self.handle
    }
    fn process_name(&self) -> String {
        self.process.clone()
    }
    fn process_file_name(&self) -> String {
        if self.process.is_empty() {
            String::new()
        } else {
            format!("C:\\apps\\{}.exe", self.process)
        }
    }
    fn title(&self) -> String {
        self.title.clone()
    }
    fn can_layout(&self) -> bool {
        self.can_layout
    }
    fn is_minimized(&self) -> bool {
        false
    }
    fn location(&self) -> Rect {
        self.location
    }
    fn normal_bounds(&self) -> Rect {
        self.location
    }
    fn focus(&self) {
        self.log.lock().unwrap().push(Action::Focus(self.handle));
    }
    fn bring_to_top(&self) {
        self.log.lock().unwrap().push(Action::BringToTop(self.handle));
    }
}

/// Strategy that records calls instead of touching any OS
pub struct RecordingStrategy {
    log: ActionLog,
}

impl WindowStrategy for RecordingStrategy {
    fn show(&self, window: &dyn Window) {
        self.log.lock().unwrap().push(Action::Show(window.handle()));
    }
    fn hide(&self, window: &dyn Window) {
        self.log.lock().unwrap().push(Action::Hide(window.handle()));
    }
    fn restore_position(&self, window: &dyn Window) {
        self.log
            .lock()
            .unwrap()
            .push(Action::RestorePosition(window.handle()));
    }
}

/// Windows-manager fake backed by a shared window list
pub struct FakeWindowsManager {
    windows: Arc<Mutex<Vec<SharedWindow>>>,
}

impl WindowsManager for FakeWindowsManager {
    fn windows(&self) -> Vec<SharedWindow> {
        self.windows.lock().unwrap().clone()
    }
    fn start(&mut self, _events: Sender<WindowEvent>) -> EngineResult<()> {
        Ok(())
    }
    fn stop(&mut self) {}
}

/// Desktop fake recording icon toggles
pub struct FakeDesktop {
    log: ActionLog,
    desktop_view: Mutex<Option<WindowHandle>>,
}

impl DesktopShell for FakeDesktop {
    fn hide_icons(&self) {
        self.log.lock().unwrap().push(Action::HideIcons);
    }
    fn show_icons(&self) {
        self.log.lock().unwrap().push(Action::ShowIcons);
    }
    fn has_desktop_view(&self) -> bool {
        self.desktop_view.lock().unwrap().is_some()
    }
    fn try_set_desktop_view(&self, handle: WindowHandle) -> bool {
        *self.desktop_view.lock().unwrap() = Some(handle);
        true
    }
}

impl FakeDesktop {
    pub fn desktop_view(&self) -> Option<WindowHandle> {
        *self.desktop_view.lock().unwrap()
    }
}

/// Probe over a scripted desktop window tree
///
/// Handle 100 is the background container, 101 the default view, 102
/// the icon list-view, 110 the taskbar. Anything else reports an
/// application window class.
pub struct FakeProbe {
    pub selected_icons: Mutex<usize>,
}

pub const DESKTOP_CONTAINER: WindowHandle = 100;
pub const DESKTOP_DEF_VIEW: WindowHandle = 101;
pub const DESKTOP_LIST_VIEW: WindowHandle = 102;
pub const TASKBAR: WindowHandle = 110;

impl ShellProbe for FakeProbe {
    fn window_class(&self, handle: WindowHandle) -> Option<String> {
        let class = match handle {
            DESKTOP_CONTAINER => "Progman",
            DESKTOP_DEF_VIEW => "SHELLDLL_DefView",
            DESKTOP_LIST_VIEW => "SysListView32",
            TASKBAR => "Shell_TrayWnd",
            _ => "ApplicationFrameWindow",
        };
        Some(class.to_string())
    }

    fn find_child(&self, parent: WindowHandle, class: &str) -> Option<WindowHandle> {
        match (parent, class) {
            (DESKTOP_CONTAINER, "SHELLDLL_DefView") => Some(DESKTOP_DEF_VIEW),
            (DESKTOP_DEF_VIEW, "SysListView32") => Some(DESKTOP_LIST_VIEW),
            _ => None,
        }
    }

    fn selected_icon_count(&self, _list_view: WindowHandle) -> usize {
        *self.selected_icons.lock().unwrap()
    }
}

/// Everything a manager test needs, wired together
pub struct Harness {
    pub manager: SceneManager,
    pub windows: Arc<Mutex<Vec<SharedWindow>>>,
    pub log: ActionLog,
    pub desktop: Arc<FakeDesktop>,
    pub probe: Arc<FakeProbe>,
    pub clock: Arc<ManualClock>,
    pub events: Receiver<EngineEvent>,
}

impl Harness {
    /// Build a harness whose window list starts with `windows`, given
    /// as `(handle, process, title)` triples
    pub fn new(initial: &[(WindowHandle, &str, &str)]) -> Self {
        let log: ActionLog = Arc::new(Mutex::new(Vec::new()));
        let windows: Arc<Mutex<Vec<SharedWindow>>> = Arc::new(Mutex::new(Vec::new()));
        let desktop = Arc::new(FakeDesktop {
            log: log.clone(),
            desktop_view: Mutex::new(None),
        });
        let probe = Arc::new(FakeProbe {
            selected_icons: Mutex::new(0),
        });
        let clock = Arc::new(ManualClock::new());

        let mut manager = SceneManager::new(
            Box::new(FakeWindowsManager {
                windows: windows.clone(),
            }),
            desktop.clone(),
            probe.clone(),
            Arc::new(RecordingStrategy { log: log.clone() }),
            clock.clone() as Arc<dyn Clock>,
        );
        let events = manager.subscribe();

        let harness = Self {
            manager,
            windows,
            log,
            desktop,
            probe,
            clock,
            events,
        };

        for &(handle, process, title) in initial {
            harness.add_window(handle, process, title);
        }
        harness
    }

    /// Put a window into the live list without raising any event
    pub fn add_window(&self, handle: WindowHandle, process: &str, title: &str) -> SharedWindow {
        self.add_window_with(handle, process, title, true)
    }

    pub fn add_window_with(
        &self,
        handle: WindowHandle,
        process: &str,
        title: &str,
        can_layout: bool,
    ) -> SharedWindow {
        let window: SharedWindow = Arc::new(FakeWindow {
            handle,
            process: process.to_string(),
            title: title.to_string(),
            can_layout,
            location: Rect::new(0, 0, 800, 600),
            log: self.log.clone(),
        });
        self.windows.lock().unwrap().push(window.clone());
        window
    }

    /// Drop a window from the live list without raising any event
    pub fn remove_window(&self, handle: WindowHandle) -> Option<SharedWindow> {
        let mut windows = self.windows.lock().unwrap();
        let index = windows.iter().position(|w| w.handle() == handle)?;
        Some(windows.remove(index))
    }

    pub fn window(&self, handle: WindowHandle) -> SharedWindow {
        self.windows
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.handle() == handle)
            .cloned()
            .expect("window not in live list")
    }

    /// Recorded actions since the last drain
    pub fn drain_actions(&self) -> Vec<Action> {
        std::mem::take(&mut *self.log.lock().unwrap())
    }

    /// Outbound engine events since the last drain
    pub fn drain_events(&self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Scene ids by grouping key
    pub fn scene_ids(&mut self) -> HashMap<String, stagehand_engine::SceneId> {
        self.manager
            .scenes()
            .iter()
            .map(|s| (s.key().to_string(), s.id()))
            .collect()
    }
}
