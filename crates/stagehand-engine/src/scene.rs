//! Scene model
//!
//! A scene is a named, ordered group of windows treated as one
//! visibility unit. Scenes are identified by a generated id that is
//! stable for the scene's lifetime; the grouping key (typically the
//! owning process name) is used for lookup, not identity.

use crate::events::{SceneSnapshot, WindowSnapshot};
use crate::shell::SharedWindow;
use crate::types::{SceneId, WindowHandle};

/// An ordered, mutable group of windows sharing a key
///
/// Member order is insertion/move order, never sorted. The scene does
/// not reap itself when it becomes empty; the manager owns that.
pub struct Scene {
    id: SceneId,
    key: String,
    windows: Vec<SharedWindow>,
    selected: bool,
}

impl Scene {
    /// Create a scene containing a single window
    pub fn new(key: impl Into<String>, window: SharedWindow) -> Self {
        Self::with_windows(key, vec![window])
    }

    /// Create a scene containing the given windows, in order
    pub fn with_windows(key: impl Into<String>, windows: Vec<SharedWindow>) -> Self {
        Self {
            id: SceneId::new_v4(),
            key: key.into(),
            windows,
            selected: false,
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Grouping key, typically the process name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether this scene groups windows for `key` (case-insensitive)
    pub fn matches_key(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }

    pub fn windows(&self) -> &[SharedWindow] {
        &self.windows
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Append `window` to the member list
    ///
    /// No-op when a window with the same handle is already a member.
    pub fn add(&mut self, window: SharedWindow) {
        if !self.contains(window.handle()) {
            self.windows.push(window);
        }
    }

    /// Remove the member with the given handle
    ///
    /// Returns the removed window, or `None` when no member matched.
    /// May leave the scene empty; the caller is responsible for reaping.
    pub fn remove(&mut self, handle: WindowHandle) -> Option<SharedWindow> {
        let index = self.windows.iter().position(|w| w.handle() == handle)?;
        Some(self.windows.remove(index))
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.windows.iter().any(|w| w.handle() == handle)
    }

    pub fn first(&self) -> Option<&SharedWindow> {
        self.windows.first()
    }

    /// Most recently added member
    pub fn last(&self) -> Option<&SharedWindow> {
        self.windows.last()
    }

    /// Set the selection flag
    ///
    /// Returns true when the value actually changed, so the owner can
    /// raise the selection notification exactly once per change.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        true
    }

    /// Serializable point-in-time view of this scene
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            id: self.id,
            key: self.key.clone(),
            is_selected: self.selected,
            windows: self
                .windows
                .iter()
                .map(|w| WindowSnapshot::of(w.as_ref()))
                .collect(),
        }
    }
}

impl PartialEq for Scene {
    /// Two scenes are the same scene iff their generated ids match
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Scene {}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("windows", &self.windows.len())
            .field("selected", &self.selected)
            .finish()
    }
}
