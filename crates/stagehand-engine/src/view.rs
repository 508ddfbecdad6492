//! Ordered scene view reconciliation
//!
//! Outer layers keep a long-lived, ordered view of one scene and apply
//! successive snapshots to it with minimal disruption: a window that
//! kept its slot is updated in place, a window that moved is relocated
//! rather than recreated, new windows are inserted at their position,
//! and vanished windows are pruned. Preview geometry is recomputed
//! after every applied snapshot.

use crate::error::{EngineError, EngineResult};
use crate::events::{SceneSnapshot, WindowSnapshot};
use crate::preview::{preview_sizes, PreviewSize};
use crate::types::SceneId;

/// Reconciling view of one scene
///
/// Bound to a scene id at construction; snapshots of any other scene
/// are rejected.
pub struct SceneView {
    scene_id: SceneId,
    key: String,
    windows: Vec<WindowSnapshot>,
    previews: Vec<PreviewSize>,
}

impl SceneView {
    /// Build a view from an initial snapshot
    pub fn new(snapshot: &SceneSnapshot) -> Self {
        let mut view = Self {
            scene_id: snapshot.id,
            key: snapshot.key.clone(),
            windows: snapshot.windows.clone(),
            previews: Vec::new(),
        };
        view.previews = preview_sizes(&view.windows);
        view
    }

    pub fn scene_id(&self) -> SceneId {
        self.scene_id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Members in display order
    pub fn windows(&self) -> &[WindowSnapshot] {
        &self.windows
    }

    /// Preview sizes, parallel to [`windows`](Self::windows)
    pub fn previews(&self) -> &[PreviewSize] {
        &self.previews
    }

    /// Reconcile this view against a newer snapshot of the same scene
    pub fn apply(&mut self, snapshot: &SceneSnapshot) -> EngineResult<()> {
        if snapshot.id != self.scene_id {
            return Err(EngineError::SceneMismatch {
                expected: self.scene_id,
                actual: snapshot.id,
            });
        }

        self.key = snapshot.key.clone();

        for (i, incoming) in snapshot.windows.iter().enumerate() {
            if self.windows.len() > i && self.windows[i].handle == incoming.handle {
                // Same slot, update in place
                self.windows[i] = incoming.clone();
            } else if let Some(pos) = self
                .windows
                .iter()
                .position(|w| w.handle == incoming.handle)
            {
                // Known window in another slot, update and relocate
                self.windows[pos] = incoming.clone();
                let window = self.windows.remove(pos);
                self.windows.insert(i, window);
            } else {
                self.windows.insert(i, incoming.clone());
            }
        }

        // Prune members the scene no longer has
        self.windows
            .retain(|w| snapshot.windows.iter().any(|i| i.handle == w.handle));

        self.previews = preview_sizes(&self.windows);
        Ok(())
    }
}
