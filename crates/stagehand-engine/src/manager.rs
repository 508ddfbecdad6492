//! Scene manager state machine
//!
//! Owns the set of scenes and the notion of the current view, and
//! carries all transition logic: scene discovery, switching, moving
//! windows between scenes, re-entrancy suppression, and desktop-click
//! handling.
//!
//! ## Threading
//!
//! One logical main thread owns all manager state. Inbound window
//! events are drained from an ordered queue and dispatched
//! synchronously; `suspend` is a cooperative guard that drops reactions
//! arriving while a transition's synchronous portion runs, because
//! those are feedback from the manager's own in-flight work. It is not
//! a lock against concurrent threads.

use std::collections::HashSet;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::classify::is_blank_desktop_click;
use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::events::{
    ChangeKind, EngineEvent, EventHub, SceneSnapshot, WindowEvent, WindowSnapshot,
    WindowUpdateKind,
};
use crate::scene::Scene;
use crate::shell::{DesktopShell, SharedWindow, ShellProbe, WindowsManager};
use crate::strategy::WindowStrategy;
use crate::types::{SceneId, WindowHandle};

/// How long a just-vacated scene refuses to be switched back into
pub const REENTRANCY_COOLDOWN_MS: u64 = 1000;

/// Minimum interval between two accepted desktop toggles
pub const DESKTOP_TOGGLE_DEBOUNCE_MS: u64 = 100;

/// Which view is active
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurrentView {
    /// No scene selected, the desktop icons are visible
    DesktopView,
    /// The scene whose windows are currently shown
    Active(SceneId),
}

impl CurrentView {
    /// The active scene id, `None` in desktop view
    pub fn scene_id(&self) -> Option<SceneId> {
        match self {
            Self::DesktopView => None,
            Self::Active(id) => Some(*id),
        }
    }
}

/// Scene grouping and visibility state machine
pub struct SceneManager {
    windows_manager: Box<dyn WindowsManager>,
    desktop: Arc<dyn DesktopShell>,
    probe: Arc<dyn ShellProbe>,
    strategy: Arc<dyn WindowStrategy>,
    clock: Arc<dyn Clock>,
    hub: EventHub,
    events: Option<Receiver<WindowEvent>>,
    /// Lazily discovered on first access
    scenes: Option<Vec<Scene>>,
    current: CurrentView,
    /// True while a transition's synchronous portion runs
    suspend: bool,
    /// Just-vacated scene id and the deadline its suppression lapses at
    reentrancy_lock: Option<(SceneId, Instant)>,
    /// Scene that was active before switching to the desktop view
    last_scene: Option<SceneId>,
    /// Most recently foregrounded window
    last_focused_window: Option<WindowHandle>,
    /// Last accepted desktop toggle, for debouncing
    last_desktop_toggle: Option<Instant>,
}

impl SceneManager {
    pub fn new(
        windows_manager: Box<dyn WindowsManager>,
        desktop: Arc<dyn DesktopShell>,
        probe: Arc<dyn ShellProbe>,
        strategy: Arc<dyn WindowStrategy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            windows_manager,
            desktop,
            probe,
            strategy,
            clock,
            hub: EventHub::new(),
            events: None,
            scenes: None,
            current: CurrentView::DesktopView,
            suspend: false,
            reentrancy_lock: None,
            last_scene: None,
            last_focused_window: None,
            last_desktop_toggle: None,
        }
    }

    /// Start receiving window events
    ///
    /// Must be called on the main thread: the windows-manager's OS
    /// hooks only deliver events to the thread that installed them.
    pub fn start(&mut self) -> EngineResult<()> {
        let thread = std::thread::current();
        if thread.name() != Some("main") {
            return Err(EngineError::NotMainThread {
                thread: thread.name().unwrap_or("<unnamed>").to_string(),
            });
        }

        if self.events.is_some() {
            return Err(EngineError::AlreadyStarted);
        }

        let (tx, rx) = channel();
        self.windows_manager.start(tx)?;
        self.events = Some(rx);
        self.desktop.hide_icons();
        Ok(())
    }

    /// Show every window of every scene and restore the desktop icons
    ///
    /// Orderly shutdown: no window is left permanently hidden when the
    /// process exits.
    pub fn stop(&mut self) {
        self.windows_manager.stop();
        self.events = None;

        if let Some(scenes) = &self.scenes {
            for scene in scenes {
                for window in scene.windows() {
                    self.strategy.show(window.as_ref());
                }
            }
        }

        self.desktop.show_icons();
    }

    /// Subscribe to outbound engine events
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        self.hub.subscribe()
    }

    pub fn current(&self) -> CurrentView {
        self.current
    }

    /// Known scenes, discovered on first access by grouping all
    /// sceneable windows by their grouping key
    pub fn scenes(&mut self) -> &[Scene] {
        self.ensure_scenes();
        self.scenes.as_deref().unwrap_or(&[])
    }

    /// Windows of the current scene, or all sceneable windows when the
    /// desktop view is active
    pub fn current_windows(&mut self) -> Vec<SharedWindow> {
        self.ensure_scenes();
        if let CurrentView::Active(id) = self.current {
            if let Some(scene) = self.find_scene(id) {
                return scene.windows().to_vec();
            }
        }
        self.sceneable_windows()
    }

    /// Scene the given window currently belongs to
    pub fn find_scene_for_window(&self, handle: WindowHandle) -> Option<&Scene> {
        self.scenes
            .as_ref()?
            .iter()
            .find(|scene| scene.contains(handle))
    }

    /// Drain and dispatch all queued window events
    pub fn pump(&mut self) {
        loop {
            let event = match &self.events {
                Some(rx) => match rx.try_recv() {
                    Ok(event) => event,
                    Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                },
                None => break,
            };
            self.handle_event(event);
        }
    }

    /// Dispatch one inbound window event
    ///
    /// Events arriving while a transition is in flight are feedback
    /// from the manager's own show/hide work and are dropped.
    pub fn handle_event(&mut self, event: WindowEvent) {
        if self.suspend {
            warn!("window event dropped while a transition is in flight");
            return;
        }

        match event {
            WindowEvent::Created { window, .. } => self.on_window_created(window),
            WindowEvent::Updated { window, update } => self.on_window_updated(window, update),
            WindowEvent::Destroyed { window } => self.on_window_destroyed(window),
            WindowEvent::UntrackedFocus { handle } => self.on_untracked_focus(handle),
            WindowEvent::DesktopShortClick { handle } => self.on_desktop_short_click(handle),
        }
    }

    /// New window: resolve or create its scene, then switch to it
    fn on_window_created(&mut self, window: SharedWindow) {
        self.ensure_scenes();

        let key = window.process_name();
        let window_snapshot = WindowSnapshot::of(window.as_ref());

        let scenes = match self.scenes.as_mut() {
            Some(scenes) => scenes,
            None => return,
        };

        let (scene_id, scene_snapshot, change) =
            match scenes.iter_mut().find(|s| s.matches_key(&key)) {
                Some(scene) => {
                    scene.add(window);
                    (scene.id(), scene.snapshot(), ChangeKind::Updated)
                }
                None => {
                    let scene = Scene::new(key, window);
                    let id = scene.id();
                    let snapshot = scene.snapshot();
                    scenes.push(scene);
                    (id, snapshot, ChangeKind::Created)
                }
            };

        self.hub.emit(EngineEvent::SceneChanged {
            scene: scene_snapshot,
            window: window_snapshot,
            change,
        });

        self.switch_to(Some(scene_id));
    }

    /// Foreground change: remember the window, then switch to its scene
    fn on_window_updated(&mut self, window: SharedWindow, update: WindowUpdateKind) {
        if update != WindowUpdateKind::Foreground {
            return;
        }

        self.last_focused_window = Some(window.handle());
        self.ensure_scenes();

        let known = self
            .find_scene_for_window(window.handle())
            .map(|scene| scene.id());
        let scene_id = match known {
            Some(id) => id,
            None => {
                // Unknown window, give it a scene of its own first
                let scene = Scene::new(window.process_name(), window.clone());
                let id = scene.id();
                let snapshot = scene.snapshot();
                if let Some(scenes) = self.scenes.as_mut() {
                    scenes.push(scene);
                }
                self.hub.emit(EngineEvent::SceneChanged {
                    scene: snapshot,
                    window: WindowSnapshot::of(window.as_ref()),
                    change: ChangeKind::Created,
                });
                id
            }
        };

        self.switch_to(Some(scene_id));
    }

    /// Window gone: remove it from its scene, reap the scene if empty
    ///
    /// The current view is left untouched; an `Active` id pointing at a
    /// reaped scene resolves on the next foreground or toggle event.
    fn on_window_destroyed(&mut self, window: SharedWindow) {
        let handle = window.handle();
        let window_snapshot = WindowSnapshot::of(window.as_ref());

        let scenes = match self.scenes.as_mut() {
            Some(scenes) => scenes,
            None => return,
        };

        let index = match scenes.iter().position(|s| s.contains(handle)) {
            Some(index) => index,
            None => return,
        };

        scenes[index].remove(handle);

        let (scene_snapshot, change) = if scenes[index].is_empty() {
            let scene = scenes.remove(index);
            debug!(key = scene.key(), "scene reaped");
            (scene.snapshot(), ChangeKind::Removed)
        } else {
            (scenes[index].snapshot(), ChangeKind::Updated)
        };

        self.hub.emit(EngineEvent::SceneChanged {
            scene: scene_snapshot,
            window: window_snapshot,
            change,
        });
    }

    /// Focus landed outside the managed set
    ///
    /// Never switches scenes; desktop toggling belongs to the dedicated
    /// click event. A non-blank target is opportunistically recorded as
    /// the desktop-view handle.
    fn on_untracked_focus(&mut self, handle: WindowHandle) {
        if is_blank_desktop_click(self.probe.as_ref(), handle) {
            return;
        }

        if !self.desktop.has_desktop_view() {
            self.desktop.try_set_desktop_view(handle);
        }
    }

    /// Short click on the desktop surface: toggle between the desktop
    /// view and the last active scene
    fn on_desktop_short_click(&mut self, handle: WindowHandle) {
        if !is_blank_desktop_click(self.probe.as_ref(), handle) {
            return;
        }

        let now = self.clock.now();
        if let Some(last) = self.last_desktop_toggle {
            if now.duration_since(last) < Duration::from_millis(DESKTOP_TOGGLE_DEBOUNCE_MS) {
                debug!("desktop toggle debounced");
                return;
            }
        }
        self.last_desktop_toggle = Some(now);

        match self.current {
            CurrentView::DesktopView => {
                if let Some(last_scene) = self.last_scene {
                    self.switch_to(Some(last_scene));
                }
            }
            CurrentView::Active(_) => self.switch_to(None),
        }
    }

    /// Switch the current view
    ///
    /// `None` switches to the desktop view. Effectively atomic from an
    /// external observer's point of view: the suspend guard covers the
    /// whole synchronous portion and is cleared on every path out, and
    /// focus is applied only after the guard clears so focus-change
    /// feedback cannot re-enter a suspended handler.
    pub fn switch_to(&mut self, target: Option<SceneId>) {
        self.ensure_scenes();

        if self.current.scene_id() == target {
            return;
        }

        if let Some(id) = target {
            if self.find_scene(id).is_none() {
                warn!(%id, "switch to unknown scene ignored");
                return;
            }
        }

        if self.is_reentrant(target) {
            debug!("switch suppressed by re-entrancy cool-down");
            return;
        }

        self.suspend = true;

        // Everything sceneable outside the target scene gets hidden
        let target_members: HashSet<WindowHandle> = target
            .and_then(|id| self.find_scene(id))
            .map(|scene| scene.windows().iter().map(|w| w.handle()).collect())
            .unwrap_or_default();
        let to_hide: Vec<SharedWindow> = self
            .sceneable_windows()
            .into_iter()
            .filter(|w| !target_members.contains(&w.handle()))
            .collect();

        let previous = self.current;
        self.current = match target {
            Some(id) => CurrentView::Active(id),
            None => CurrentView::DesktopView,
        };

        if let Some(scenes) = self.scenes.as_mut() {
            for scene in scenes.iter_mut() {
                scene.set_selected(Some(scene.id()) == target);
            }
        }

        let mut focus_candidate: Option<SharedWindow> = None;
        if let Some(id) = target {
            if let Some(scene) = self.find_scene(id) {
                for window in scene.windows() {
                    self.strategy.show(window.as_ref());
                }

                focus_candidate = self
                    .last_focused_window
                    .and_then(|handle| {
                        scene.windows().iter().find(|w| w.handle() == handle)
                    })
                    .or_else(|| scene.first())
                    .cloned();
            }
        }

        for window in &to_hide {
            self.strategy.hide(window.as_ref());
        }

        let previous_snapshot = previous.scene_id().and_then(|id| self.snapshot_of(id));
        let current_snapshot = target.and_then(|id| self.snapshot_of(id));
        debug!(
            from = ?previous_snapshot.as_ref().map(|s| s.key.as_str()),
            to = ?current_snapshot.as_ref().map(|s| s.key.as_str()),
            "current scene switched"
        );
        self.hub.emit(EngineEvent::CurrentSceneChanged {
            previous: previous_snapshot,
            current: current_snapshot,
        });

        match target {
            None => {
                self.last_scene = previous.scene_id();
                self.desktop.show_icons();
            }
            Some(_) => {
                self.last_scene = None;
                self.desktop.hide_icons();
            }
        }

        // Guard released on every path out of the transition
        self.suspend = false;

        if let Some(window) = focus_candidate {
            window.focus();
        }
    }

    /// Move a window from one scene to another
    ///
    /// No-op when source equals target, when either scene is unknown,
    /// or when the window is not a member of the source scene.
    pub fn move_window(&mut self, source: SceneId, handle: WindowHandle, target: SceneId) {
        self.ensure_scenes();

        if source == target {
            return;
        }

        let scenes = match self.scenes.as_mut() {
            Some(scenes) => scenes,
            None => return,
        };

        let source_index = match scenes.iter().position(|s| s.id() == source) {
            Some(index) => index,
            None => return,
        };
        let target_index = match scenes.iter().position(|s| s.id() == target) {
            Some(index) => index,
            None => return,
        };

        if !scenes[source_index].contains(handle) {
            return;
        }

        self.suspend = true;

        let mut emissions: Vec<EngineEvent> = Vec::new();
        let mut moved: Option<SharedWindow> = None;

        if let Some(scenes) = self.scenes.as_mut() {
            if let Some(window) = scenes[source_index].remove(handle) {
                scenes[target_index].add(window.clone());

                let window_snapshot = WindowSnapshot::of(window.as_ref());
                emissions.push(EngineEvent::SceneChanged {
                    scene: scenes[source_index].snapshot(),
                    window: window_snapshot.clone(),
                    change: ChangeKind::Updated,
                });
                emissions.push(EngineEvent::SceneChanged {
                    scene: scenes[target_index].snapshot(),
                    window: window_snapshot.clone(),
                    change: ChangeKind::Updated,
                });

                if scenes[source_index].is_empty() {
                    let reaped = scenes.remove(source_index);
                    emissions.push(EngineEvent::SceneChanged {
                        scene: reaped.snapshot(),
                        window: window_snapshot,
                        change: ChangeKind::Removed,
                    });
                }

                moved = Some(window);
            }
        }

        for event in emissions {
            self.hub.emit(event);
        }

        if let Some(window) = moved {
            if self.current == CurrentView::Active(target) {
                self.strategy.show(window.as_ref());
                window.focus();
            } else {
                self.strategy.hide(window.as_ref());
                // Put a relocated window back where it was so it is not
                // displaced when its new scene is eventually shown
                self.strategy.restore_position(window.as_ref());
            }
        }

        self.suspend = false;
    }

    /// Move the most recently added window of `source` into the current
    /// scene
    pub fn pop_window_from(&mut self, source: SceneId) {
        let current = match self.current {
            CurrentView::Active(id) => id,
            CurrentView::DesktopView => return,
        };

        if source == current {
            return;
        }

        self.ensure_scenes();

        let handle = self
            .scenes
            .as_ref()
            .and_then(|scenes| scenes.iter().find(|s| s.id() == source))
            .and_then(|scene| scene.last())
            .map(|window| window.handle());

        if let Some(handle) = handle {
            self.move_window(source, handle, current);
        }
    }

    /// Whether switching to `target` would bounce back into a scene
    /// that was just intentionally hidden
    ///
    /// Some applications re-activate a secondary window shortly after
    /// being hidden (a floating call notification, say); without the
    /// cool-down that feedback would immediately undo the switch. The
    /// vacated scene is latched only when moving between two real
    /// scenes, so a desktop toggle can always restore the last scene
    /// right away.
    fn is_reentrant(&mut self, target: Option<SceneId>) -> bool {
        let target = match target {
            Some(id) => id,
            None => return false,
        };

        let now = self.clock.now();

        if let Some((locked, deadline)) = self.reentrancy_lock {
            if locked == target && now < deadline {
                return true;
            }
        }

        if let CurrentView::Active(current) = self.current {
            self.reentrancy_lock = Some((
                current,
                now + Duration::from_millis(REENTRANCY_COOLDOWN_MS),
            ));
        }

        false
    }

    /// Group all sceneable windows by key, once
    fn ensure_scenes(&mut self) {
        if self.scenes.is_some() {
            return;
        }

        let mut scenes: Vec<Scene> = Vec::new();
        for window in self.sceneable_windows() {
            let key = window.process_name();
            match scenes.iter_mut().find(|s| s.matches_key(&key)) {
                Some(scene) => scene.add(window),
                None => scenes.push(Scene::new(key, window)),
            }
        }

        debug!(count = scenes.len(), "scenes discovered");
        self.scenes = Some(scenes);
    }

    /// Windows eligible for grouping: titled, with a known owning
    /// process image, participating in layout
    fn sceneable_windows(&self) -> Vec<SharedWindow> {
        self.windows_manager
            .windows()
            .into_iter()
            .filter(|w| {
                w.can_layout() && !w.process_file_name().is_empty() && !w.title().is_empty()
            })
            .collect()
    }

    fn find_scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.as_ref()?.iter().find(|s| s.id() == id)
    }

    fn snapshot_of(&self, id: SceneId) -> Option<SceneSnapshot> {
        self.find_scene(id).map(|scene| scene.snapshot())
    }
}
