//! Window manager core for a browser-simulated desktop.
//!
//! [`WindowManager`] owns the window table and is the only writer of window state. The drag and
//! resize controllers turn pointer events into geometry updates, the compositor projects the
//! table into frames and taskbar entries, and the Leptos components render them.

pub mod apps;
pub mod chrome;
pub mod components;
pub mod compositor;
pub mod config;
pub mod drag;
pub mod events;
pub mod geometry;
pub mod icons;
pub mod model;
pub mod resize;
mod runtime_context;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{ConfigError, WindowManagerConfig};
pub use events::{EventBus, Subscription, WindowEvent, WindowEventKind};
pub use model::*;
pub use runtime_context::desktop_viewport_rect;
pub use window_manager::{WindowCommand, WindowManager, WindowManagerError};
