//! Event types flowing into and out of the engine
//!
//! Inbound: [`WindowEvent`]s produced by the windows-manager collaborator
//! and drained in arrival order by the engine's main thread.
//!
//! Outbound: [`EngineEvent`]s describing scene mutations and
//! current-scene changes, fanned out to subscribers as serializable
//! snapshots so outer layers never hold references into engine state.

use std::sync::mpsc::{channel, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::shell::SharedWindow;
use crate::types::{Rect, SceneId, WindowHandle};

/// Kind of update reported for an existing window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowUpdateKind {
    /// The window became the foreground window
    Foreground,
    /// Any other attribute change (title, bounds)
    Other,
}

/// One inbound window lifecycle event
///
/// Delivered by the windows-manager collaborator through the sender it
/// receives on `start`. The engine dispatches these synchronously, in
/// arrival order.
pub enum WindowEvent {
    Created {
        window: SharedWindow,
        /// Whether this is the first window seen for its process
        first_for_process: bool,
    },
    Updated {
        window: SharedWindow,
        update: WindowUpdateKind,
    },
    Destroyed {
        window: SharedWindow,
    },
    /// Focus landed on a window outside the managed set
    UntrackedFocus {
        handle: WindowHandle,
    },
    /// A short click on the desktop surface
    DesktopShortClick {
        handle: WindowHandle,
    },
}

/// Serializable point-in-time view of one window
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub handle: WindowHandle,
    pub title: String,
    pub process_name: String,
    pub is_minimized: bool,
    /// Current on-screen rectangle
    pub location: Rect,
    /// Restored-state rectangle, used instead of `location` while minimized
    pub normal_bounds: Rect,
}

impl WindowSnapshot {
    pub fn of(window: &dyn crate::shell::Window) -> Self {
        Self {
            handle: window.handle(),
            title: window.title(),
            process_name: window.process_name(),
            is_minimized: window.is_minimized(),
            location: window.location(),
            normal_bounds: window.normal_bounds(),
        }
    }
}

/// Serializable point-in-time view of one scene
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub id: SceneId,
    /// Grouping key, typically the process name
    pub key: String,
    pub is_selected: bool,
    /// Members in insertion/move order
    pub windows: Vec<WindowSnapshot>,
}

/// What happened to a scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Created,
    Updated,
    Removed,
}

/// One outbound notification
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A scene was created, updated, or removed
    SceneChanged {
        scene: SceneSnapshot,
        /// The window whose appearance/disappearance/move caused the change
        window: WindowSnapshot,
        change: ChangeKind,
    },
    /// The current scene switched
    ///
    /// `None` on either side denotes the desktop view.
    CurrentSceneChanged {
        previous: Option<SceneSnapshot>,
        current: Option<SceneSnapshot>,
    },
}

/// Outbound event fan-out
///
/// Subscribers each get their own channel. A subscriber that drops its
/// receiver is pruned on the next emission.
#[derive(Default)]
pub struct EventHub {
    subscribers: Vec<Sender<EngineEvent>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber and return its receiving end
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber
    pub fn emit(&mut self, event: EngineEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
