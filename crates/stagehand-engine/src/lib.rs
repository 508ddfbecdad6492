//! Scene engine for the Stagehand window organizer
//!
//! Groups the top-level windows of a desktop into logical scenes (one
//! scene per originating process, by default) and switches which
//! scene's windows are visible, emulating a stage-manager style window
//! organizer.
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`types`]: Core handle and geometry types
//! - [`scene`]: The scene model (ordered window group, selection flag)
//! - [`manager`]: The `SceneManager` state machine and all transition logic
//! - [`strategy`]: Pluggable window show/hide mechanisms
//! - [`shell`]: Collaborator contracts for the desktop shell
//! - [`classify`]: Blank-desktop-click classification
//! - [`events`]: Inbound window events and outbound notifications
//! - [`preview`]: Thumbnail geometry for scene member windows
//! - [`view`]: Ordered view reconciliation over scene snapshots
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stagehand_engine::{
//!     FadeStrategy, SceneManager, SystemClock,
//! };
//!
//! let clock = Arc::new(SystemClock);
//! let strategy = Arc::new(FadeStrategy::new(api, clock.clone()));
//! let mut manager = SceneManager::new(windows, desktop, probe, strategy, clock);
//!
//! manager.start()?;
//! loop {
//!     manager.pump();
//!     // ... host event loop ...
//! }
//! ```
//!
//! ## Design Principles
//!
//! 1. **Single-Threaded Core**: All manager state lives on one logical
//!    main thread; inbound events are dispatched in arrival order
//! 2. **Time Abstraction**: Debouncing, cool-downs, and fades use an
//!    injectable clock for deterministic testing
//! 3. **Degrade, Never Abort**: OS-call failures inside a visibility
//!    strategy fall back locally and never corrupt the scene model
//! 4. **Live-But-Invisible**: Windows are hidden via transparency so
//!    external thumbnail compositors keep working

pub mod classify;
pub mod clock;
pub mod error;
pub mod events;
pub mod manager;
pub mod preview;
pub mod scene;
pub mod shell;
pub mod strategy;
pub mod types;
pub mod view;

// Re-export core types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{EngineError, EngineResult};
pub use events::{
    ChangeKind, EngineEvent, EventHub, SceneSnapshot, WindowEvent, WindowSnapshot,
    WindowUpdateKind,
};
pub use manager::{CurrentView, SceneManager};
pub use preview::{preview_sizes, PreviewSize};
pub use scene::Scene;
pub use shell::{DesktopShell, SharedWindow, ShellProbe, Window, WindowApi, WindowsManager};
pub use strategy::{FadeStrategy, OpacityStrategy, WindowStrategy};
pub use types::{Rect, SceneId, WindowHandle};
pub use view::SceneView;

/// Cool-down during which a just-vacated scene refuses re-entry, in milliseconds
pub use manager::REENTRANCY_COOLDOWN_MS;

/// Minimum interval between accepted desktop toggles, in milliseconds
pub use manager::DESKTOP_TOGGLE_DEBOUNCE_MS;

/// Duration of the show fade-in, in milliseconds
pub use strategy::FADE_DURATION_MS;

/// Number of steps in the show fade-in
pub use strategy::FADE_STEPS;
