//! Error types for the scene engine
//!
//! This module provides structured error types for all fallible
//! operations in the engine. OS-call failures inside visibility
//! strategies are deliberately absent: those degrade locally and are
//! never surfaced as errors.

use crate::types::SceneId;

/// Errors that can occur in scene engine operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine was started from a thread other than the main thread
    ///
    /// Window events are only delivered to the thread that owns the
    /// event source, so starting anywhere else is a programming error.
    NotMainThread {
        /// Name of the offending thread, if it has one
        thread: String,
    },

    /// The engine was started twice
    AlreadyStarted,

    /// A scene with the given id is not known to the manager
    SceneNotFound(SceneId),

    /// A snapshot was applied to a view tracking a different scene
    SceneMismatch {
        /// The scene the view tracks
        expected: SceneId,
        /// The scene the snapshot belongs to
        actual: SceneId,
    },

    /// The windows-manager collaborator failed to start
    WindowSourceFailed(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotMainThread { thread } => {
                write!(f, "engine must be started on the main thread, not '{}'", thread)
            }
            Self::AlreadyStarted => write!(f, "engine is already started"),
            Self::SceneNotFound(id) => write!(f, "scene not found: {}", id),
            Self::SceneMismatch { expected, actual } => {
                write!(f, "snapshot for scene {} applied to view of scene {}", actual, expected)
            }
            Self::WindowSourceFailed(msg) => write!(f, "windows manager failed to start: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
