//! Core type definitions for the scene engine
//!
//! This module centralizes the handle and identifier types used
//! throughout the crate for consistency and discoverability.

use serde::{Deserialize, Serialize};

/// Opaque native window handle
///
/// Pointer-sized and stable for the lifetime of the window. The engine
/// never dereferences a handle; it only uses it as a key and passes it
/// back to the shell collaborators.
pub type WindowHandle = isize;

/// Unique scene identifier
///
/// Generated when a scene is created and stable for the scene's
/// lifetime. Scene equality is defined over this id, not the grouping
/// key.
pub type SceneId = uuid::Uuid;

/// Screen rectangle in virtual-desktop coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its left/top/right/bottom edges
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}
