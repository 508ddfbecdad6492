//! Win32 realization of the Stagehand shell collaborators
//!
//! Provides the production implementations of the engine's
//! [`WindowApi`](stagehand_engine::WindowApi),
//! [`ShellProbe`](stagehand_engine::ShellProbe), and
//! [`DesktopShell`](stagehand_engine::DesktopShell) contracts on top of
//! the `windows` crate.
//!
//! On non-Windows targets the crate compiles empty, so workspace-wide
//! builds and tests are unaffected by the platform surface.

#[cfg(windows)]
mod api;
#[cfg(windows)]
mod desktop;
#[cfg(windows)]
mod probe;

#[cfg(windows)]
pub use api::Win32WindowApi;
#[cfg(windows)]
pub use desktop::Win32Desktop;
#[cfg(windows)]
pub use probe::Win32Probe;
